//! OpenAI API client
//!
//! Direct HTTP client for the OpenAI Chat Completions API. The rendered ReAct
//! prompt is sent as a single user message with temperature 0 and a stop
//! sequence at `"Observation:"` so the model never fabricates tool output.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::{Completion, LlmProvider, Usage};

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 60;

// ============================================================================
// OpenAI request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

// ============================================================================
// OpenAiProvider
// ============================================================================

/// OpenAI LLM provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (proxies, compatible endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into();
        self
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, stop: &[&str]) -> Result<Completion> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: 0.0,
            stop: if stop.is_empty() {
                None
            } else {
                Some(stop.iter().map(|s| s.to_string()).collect())
            },
        };

        let url = format!("{}/chat/completions", self.api_base);
        tracing::debug!("[OpenAI] Request to {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read OpenAI response body")?;

        if !status.is_success() {
            tracing::error!("[OpenAI] API error: {} - {}", status, body);
            anyhow::bail!("OpenAI API error ({}): {}", status, body);
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body).context("Failed to parse OpenAI API response")?;

        let text = chat_response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow::anyhow!("OpenAI response contained no completion"))?;

        let usage = chat_response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        tracing::debug!(
            "[OpenAI] Completion received ({} tokens)",
            usage.total_tokens
        );

        Ok(Completion { text, usage })
    }
}
