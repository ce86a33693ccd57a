//! Tool registry
//!
//! Holds the ordered set of tools available to the agent. The order is the
//! registration order, which is also the order tools are listed in the prompt.

use std::sync::Arc;

use anyhow::Result;

use super::tool::Tool;

/// Ordered registry of tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool
    ///
    /// Tool names are unique within the registry; registering a duplicate
    /// name is an error.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        if self.tools.iter().any(|t| t.name() == tool.name()) {
            anyhow::bail!("tool '{}' is already registered", tool.name());
        }
        tracing::info!("Registered tool: {}", tool.name());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Names of all registered tools, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Render the `{tools}` block of the prompt: one "Name: description"
    /// line per tool.
    pub fn render_descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the `{tool_names}` list of the prompt
    pub fn render_names(&self) -> String {
        self.names().join(", ")
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
