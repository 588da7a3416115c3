//! The external reasoning capability.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("provider returned an empty completion")]
    EmptyCompletion,
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// A text-completion backend that can stand in for the rule-based stages.
///
/// Implementations are constructed once at startup and shared across
/// concurrent analyses, so `complete` takes `&self` and must not keep
/// per-request state. The returned text is untrusted.
#[async_trait]
pub trait ReasoningProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Send one prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}
