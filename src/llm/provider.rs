//! LLM provider trait
//!
//! The agent loop only needs plain text completions with stop sequences; the
//! trait keeps the loop independent of the concrete API client (and lets
//! tests drive the loop with a scripted provider).

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage reported by the provider for one request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    /// Accumulate another request's usage into this one
    pub fn add(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// A single completion with its usage
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// The model identifier this provider is configured with
    fn model(&self) -> &str;

    /// Complete a prompt, stopping generation at any of the stop sequences
    async fn complete(&self, prompt: &str, stop: &[&str]) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_accumulation() {
        let mut total = Usage::default();
        total.add(&Usage {
            prompt_tokens: 100,
            completion_tokens: 20,
            total_tokens: 120,
        });
        total.add(&Usage {
            prompt_tokens: 50,
            completion_tokens: 10,
            total_tokens: 60,
        });

        assert_eq!(total.prompt_tokens, 150);
        assert_eq!(total.completion_tokens, 30);
        assert_eq!(total.total_tokens, 180);
    }
}
