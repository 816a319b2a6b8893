//! Product description summaries from a generative-AI provider.

use async_trait::async_trait;
use mockall::automock;

mod gemini;

pub use gemini::{AiConfig, GeminiSummarizer, SummarizeError};

#[automock]
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Short listing blurb for a product.
    ///
    /// Never fails: when the provider cannot be used, the returned text says
    /// why instead.
    async fn summarize(&self, name: String, description: String) -> String;
}
