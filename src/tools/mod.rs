//! Tool system for the agent
//!
//! This module provides the Tool trait, the ToolRegistry, and the five tool
//! adapters the assistant can use.

pub mod calculator;
pub mod crypto;
pub mod knowledge;
mod registry;
mod tool;
pub mod weather;
pub mod web_search;

pub use calculator::CalculatorTool;
pub use crypto::CryptoTool;
pub use knowledge::KnowledgeBaseTool;
pub use registry::ToolRegistry;
pub use tool::{Tool, ToolResult};
pub use weather::WeatherTool;
pub use web_search::WebSearchTool;
