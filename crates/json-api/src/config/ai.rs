//! AI Config

use clap::Args;

use storefront_app::ai::AiConfig;

/// Generative-AI provider settings.
#[derive(Debug, Args)]
pub struct AiSettings {
    /// Provider API base URL
    #[arg(
        long,
        env = "AI_ENDPOINT",
        default_value = "https://generativelanguage.googleapis.com/v1beta"
    )]
    pub ai_endpoint: String,

    /// Model used for product summaries
    #[arg(long, env = "AI_MODEL", default_value = "gemini-2.0-flash")]
    pub ai_model: String,

    /// Provider API key
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    pub ai_api_key: Option<String>,

    /// Fallback provider API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub google_api_key: Option<String>,
}

impl AiSettings {
    /// `AI_API_KEY` wins over `GOOGLE_API_KEY`; blank values are ignored.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        [&self.ai_api_key, &self.google_api_key]
            .into_iter()
            .flatten()
            .find(|key| !key.trim().is_empty())
            .cloned()
    }

    #[must_use]
    pub fn to_ai_config(&self) -> AiConfig {
        AiConfig {
            endpoint: self.ai_endpoint.clone(),
            model: self.ai_model.clone(),
            api_key: self.api_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(ai: Option<&str>, google: Option<&str>) -> AiSettings {
        AiSettings {
            ai_endpoint: "http://localhost".to_string(),
            ai_model: "gemini-test".to_string(),
            ai_api_key: ai.map(str::to_string),
            google_api_key: google.map(str::to_string),
        }
    }

    #[test]
    fn ai_key_takes_precedence() {
        assert_eq!(
            settings(Some("primary"), Some("fallback")).api_key().as_deref(),
            Some("primary")
        );
    }

    #[test]
    fn google_key_is_the_fallback() {
        assert_eq!(
            settings(None, Some("fallback")).api_key().as_deref(),
            Some("fallback")
        );
        assert_eq!(
            settings(Some("  "), Some("fallback")).api_key().as_deref(),
            Some("fallback")
        );
    }

    #[test]
    fn no_keys_means_none() {
        assert_eq!(settings(None, None).api_key(), None);
        assert_eq!(settings(Some(""), Some(" ")).api_key(), None);
    }
}
