//! OpenAI-compatible chat-completion client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::prompt::SYSTEM_PROMPT;
use crate::provider::{ProviderError, ReasoningProvider};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V3-0324";

/// Connection settings for [`HttpProvider`].
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Endpoint root, e.g. `https://router.huggingface.co/v1` (no trailing slash).
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl HttpProviderConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
            temperature: 0.1,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Reasoning provider backed by a chat-completions HTTP endpoint.
pub struct HttpProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpProvider {
    pub fn new(mut config: HttpProviderConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ReasoningProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = self.completions_url();
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        info!(url = %url, model = %self.config.model, "requesting completion");
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let content = completion_text(&text)?;
        debug!(chars = content.len(), "completion received");
        Ok(content)
    }
}

/// First choice's message content from a raw chat-completions body.
fn completion_text(body: &str) -> Result<String, ProviderError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(ProviderError::EmptyCompletion)
}
