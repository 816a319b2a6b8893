//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use super::Summarizer;

const TEMPERATURE: f64 = 0.2;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the provider.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API base, e.g. `"https://generativelanguage.googleapis.com/v1beta"`.
    pub endpoint: String,

    pub model: String,

    /// Blank keys count as missing.
    pub api_key: Option<String>,
}

/// Failures reaching the provider, displayed as the text handed back to
/// callers in place of a summary.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Model not found: {model}. Verify the model name and that your API key has access.")]
    ModelNotFound { model: String },

    #[error("AI provider error: {status} - {body}")]
    Provider { status: StatusCode, body: String },

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Unexpected response format")]
    UnexpectedFormat,

    #[error("Unexpected error calling AI provider: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error calling AI provider: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    config: AiConfig,
    http: Client,
}

impl GeminiSummarizer {
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Ask the provider for a summary, in a single request.
    ///
    /// # Errors
    ///
    /// Returns an error when no API key is configured, the provider answers
    /// with a non-success status or an unexpected body, or the request fails.
    pub async fn try_summarize(
        &self,
        name: &str,
        description: &str,
    ) -> Result<String, SummarizeError> {
        let key = self.api_key().ok_or(SummarizeError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body(&prompt(name, description)))
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SummarizeError::ModelNotFound {
                model: self.config.model.clone(),
            });
        }

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(error) => {
                    warn!(%error, %status, "failed to read provider error body");

                    format!("<unreadable body: {error}>")
                }
            };

            return Err(SummarizeError::Provider { status, body });
        }

        parse_summary(&response.text().await?)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, name: String, description: String) -> String {
        match self.try_summarize(&name, &description).await {
            Ok(summary) => {
                debug!(model = %self.config.model, "product summary generated");

                summary
            }
            Err(error) => {
                warn!(%error, model = %self.config.model, "product summary unavailable");

                error.to_string()
            }
        }
    }
}

fn prompt(name: &str, description: &str) -> String {
    format!(
        "Summarize this product for a listing in 2 short sentences:\nName: {name}\nDescription: {description}"
    )
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": TEMPERATURE },
    })
}

/// Text of the first part of the first candidate.
fn parse_summary(body: &str) -> Result<String, SummarizeError> {
    if body.trim().is_empty() {
        return Err(SummarizeError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body)?;

    if value.is_null() {
        return Err(SummarizeError::EmptyResponse);
    }

    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(SummarizeError::UnexpectedFormat)
}
