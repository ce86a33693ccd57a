pub mod assistant;
pub mod parser;
pub mod prompt;

pub use assistant::{AgentStep, ReActAssistant, RunMetrics, RunResult, MAX_ITERATIONS};
