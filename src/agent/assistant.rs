//! ReAct agent loop
//!
//! The assistant alternates free-text reasoning with tool invocations:
//! prompt the model, parse its output, run the selected tool, feed the
//! observation back, and repeat until the model produces a final answer or
//! the iteration cap is reached. Parse failures and unknown tool names are
//! recovered by feeding a corrective observation back to the model.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::llm::{pricing, LlmProvider, Usage};
use crate::tools::{
    CalculatorTool, CryptoTool, KnowledgeBaseTool, ToolRegistry, WeatherTool, WebSearchTool,
};

use super::parser::{parse_output, AgentOutput};
use super::prompt::render_prompt;

/// Maximum number of think/act/observe iterations per query
pub const MAX_ITERATIONS: usize = 5;

/// Pseudo tool name recorded for parse-failure recovery steps
const PARSE_ERROR_TOOL: &str = "_exception";

/// One intermediate step of a run: the model's reasoning text, the tool it
/// selected, the input it passed, and the observation it got back.
#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub thought: String,
    pub tool: String,
    pub tool_input: String,
    pub observation: String,
}

/// Aggregate usage metrics for one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetrics {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub total_cost: f64,
    pub duration_seconds: f64,
}

/// Outcome of one query execution
///
/// A result reports success xor an error: `answer` is present iff `success`,
/// `error` iff not.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub answer: Option<String>,
    pub error: Option<String>,
    pub steps: Vec<AgentStep>,
    pub metrics: RunMetrics,
    pub timestamp: DateTime<Utc>,
}

impl RunResult {
    /// Render the full reasoning trace as a markdown block
    pub fn render_trace(&self) -> String {
        if !self.success {
            return format!(
                "❌ Erro: {}",
                self.error.as_deref().unwrap_or("erro desconhecido")
            );
        }

        let mut output = String::from("🤖 **RACIOCÍNIO DO AGENTE ReAct**\n\n");

        for (i, step) in self.steps.iter().enumerate() {
            output.push_str(&format!(
                "**Passo {}:**\n\
                 💭 Pensamento: {}\n\
                 🔧 Ferramenta: {}\n\
                 📥 Input: {}\n\
                 📤 Resultado: {}\n\n",
                i + 1,
                step.thought,
                step.tool,
                step.tool_input,
                step.observation
            ));
        }

        output.push_str(&format!(
            "✅ **RESPOSTA FINAL:**\n{}\n\n",
            self.answer.as_deref().unwrap_or("")
        ));

        output.push_str("📊 **MÉTRICAS:**\n");
        output.push_str(&format!("- Tokens: {}\n", self.metrics.total_tokens));
        output.push_str(&format!("- Custo: ${:.4}\n", self.metrics.total_cost));
        output.push_str(&format!("- Duração: {:.2}s\n", self.metrics.duration_seconds));

        output
    }
}

/// The ReAct assistant: an LLM provider plus the registered tools
pub struct ReActAssistant {
    provider: Arc<dyn LlmProvider>,
    registry: ToolRegistry,
}

impl ReActAssistant {
    /// Create the assistant with the standard tool set
    ///
    /// The web search tool is registered only when a SerpAPI key is present;
    /// without one it is excluded from the registry entirely.
    pub fn new(provider: Arc<dyn LlmProvider>, serpapi_key: Option<String>) -> Result<Self> {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CalculatorTool::new()))?;
        registry.register(Arc::new(KnowledgeBaseTool::new()))?;
        registry.register(Arc::new(WeatherTool::new()?))?;
        registry.register(Arc::new(CryptoTool::new()?))?;

        let web_search = WebSearchTool::new(serpapi_key)?;
        if web_search.is_available() {
            registry.register(Arc::new(web_search))?;
            tracing::info!("[AGENT] WebSearch habilitada");
        } else {
            tracing::warn!("[AGENT] WebSearch desabilitada - SERPAPI_KEY não configurada");
        }

        tracing::info!(
            "[AGENT] ReAct Assistant inicializado com {} ferramentas",
            registry.len()
        );

        Ok(Self::with_registry(provider, registry))
    }

    /// Create the assistant with an explicit tool registry
    pub fn with_registry(provider: Arc<dyn LlmProvider>, registry: ToolRegistry) -> Self {
        Self { provider, registry }
    }

    /// Names of the registered tools, in prompt order
    pub fn available_tools(&self) -> Vec<String> {
        self.registry.names().iter().map(|n| n.to_string()).collect()
    }

    /// Execute one query
    ///
    /// Never returns an error: any failure in the loop (provider errors
    /// included) is converted into a failure `RunResult`.
    pub async fn run(&self, query: &str) -> RunResult {
        tracing::info!("[AGENT] Nova query: {}", query);
        let started = Instant::now();

        let mut steps = Vec::new();
        let mut usage = Usage::default();
        let outcome = self.run_loop(query, &mut steps, &mut usage).await;

        let metrics = RunMetrics {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            total_cost: pricing::completion_cost(self.provider.model(), &usage),
            duration_seconds: started.elapsed().as_secs_f64(),
        };

        match outcome {
            Ok(answer) => {
                tracing::info!(
                    "[AGENT] Sucesso em {} passo(s), {} tokens, ${:.4}",
                    steps.len(),
                    metrics.total_tokens,
                    metrics.total_cost
                );
                RunResult {
                    success: true,
                    answer: Some(answer),
                    error: None,
                    steps,
                    metrics,
                    timestamp: Utc::now(),
                }
            }
            Err(e) => {
                tracing::error!("[AGENT] Erro: {}", e);
                RunResult {
                    success: false,
                    answer: None,
                    error: Some(e.to_string()),
                    steps,
                    metrics,
                    timestamp: Utc::now(),
                }
            }
        }
    }

    /// The think/act/observe loop
    async fn run_loop(
        &self,
        query: &str,
        steps: &mut Vec<AgentStep>,
        usage: &mut Usage,
    ) -> Result<String> {
        let mut scratchpad = String::new();

        for iteration in 1..=MAX_ITERATIONS {
            tracing::debug!("[AGENT] Iteração {}", iteration);

            let prompt = render_prompt(&self.registry, query, &scratchpad);
            let completion = self.provider.complete(&prompt, &["Observation:"]).await?;
            usage.add(&completion.usage);

            let text = completion.text.trim().to_string();
            let (step, observation) = match parse_output(&text) {
                Ok(AgentOutput::Finish { answer }) => {
                    tracing::info!("[AGENT] Resposta final na iteração {}", iteration);
                    return Ok(answer);
                }
                Ok(AgentOutput::Action { tool, input }) => {
                    let observation = self.observe(&tool, &input).await;
                    (
                        AgentStep {
                            thought: text.clone(),
                            tool,
                            tool_input: input,
                            observation: observation.clone(),
                        },
                        observation,
                    )
                }
                Err(e) => {
                    tracing::warn!("[AGENT] Falha de parsing: {}", e);
                    let observation = format!(
                        "Formato inválido. Responda com 'Action: <ferramenta>' e \
                         'Action Input: <input>', ou 'Final Answer: <resposta>'. \
                         Ferramentas válidas: [{}]",
                        self.registry.render_names()
                    );
                    (
                        AgentStep {
                            thought: text.clone(),
                            tool: PARSE_ERROR_TOOL.to_string(),
                            tool_input: String::new(),
                            observation: observation.clone(),
                        },
                        observation,
                    )
                }
            };

            steps.push(step);
            scratchpad.push_str(&format!("{}\nObservation: {}\nThought: ", text, observation));
        }

        tracing::warn!("[AGENT] Limite de {} iterações atingido", MAX_ITERATIONS);
        Ok("Agente interrompido: limite de iterações atingido.".to_string())
    }

    /// Run the selected tool and produce the observation text
    async fn observe(&self, tool: &str, input: &str) -> String {
        match self.registry.get(tool) {
            Some(t) => {
                tracing::info!("[AGENT] Executando {} com input: {}", tool, input);
                let result = t.call(input).await;
                if result.is_error {
                    tracing::warn!("[AGENT] {} retornou erro: {}", tool, result.output);
                }
                result.output
            }
            None => {
                tracing::warn!("[AGENT] Ferramenta desconhecida: {}", tool);
                format!(
                    "{} não é uma ferramenta válida. Tente uma de: [{}]",
                    tool,
                    self.registry.render_names()
                )
            }
        }
    }
}
