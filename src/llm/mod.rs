pub mod openai;
pub mod pricing;
mod provider;

pub use openai::OpenAiProvider;
pub use provider::{Completion, LlmProvider, Usage};
