//! # ReAct Assistant
//!
//! A single-agent "reason-then-act" assistant. It answers natural-language
//! questions by alternating free-text reasoning with calls to a small set of
//! tools (arithmetic, a static knowledge base, weather, cryptocurrency
//! prices, and optional web search), and exposes the result through a web
//! chat form.
//!
//! ## Architecture
//!
//! The agent follows the textual ReAct protocol:
//! 1. Render the prompt with the tool list, the question, and the scratchpad
//! 2. Complete with the LLM, stopping at `"Observation:"`
//! 3. Parse the output into a tool invocation or a final answer
//! 4. On an invocation, run the tool and append the observation
//! 5. Repeat up to five iterations, then conclude
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use react_assistant::{agent::ReActAssistant, llm::OpenAiProvider};
//!
//! let provider = OpenAiProvider::new(api_key, "gpt-3.5-turbo")?;
//! let assistant = ReActAssistant::new(Arc::new(provider), None)?;
//! let result = assistant.run("Quanto é 25 * 4 + 100?").await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod logging;
pub mod tools;
pub mod web;

pub use config::Config;
