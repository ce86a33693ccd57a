//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.
//! The ReAct protocol passes a single free-text `Action Input` string to the
//! selected tool, so tools are text-in/text-out.

use async_trait::async_trait;

/// Result of executing a tool
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The text returned to the agent as the observation
    pub output: String,
    /// Whether the tool execution resulted in an error
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    ///
    /// Errors are still returned to the agent as observations; tools never
    /// propagate failures past their boundary.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

/// Trait for tools that the agent can use
///
/// `name` must be unique within a registry; `description` is the usage hint
/// shown to the model in the prompt.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool
    fn name(&self) -> &str;

    /// Get a description of this tool
    fn description(&self) -> &str;

    /// Execute the tool with the given free-text input
    ///
    /// Implementations catch all failures and report them through
    /// `ToolResult::error`; they do not return `Err` for bad input or
    /// network problems.
    async fn call(&self, input: &str) -> ToolResult;
}
