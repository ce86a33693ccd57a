//! Web search tool using SerpAPI
//!
//! Optional: the tool is only constructed (and registered) when a SerpAPI key
//! is configured. Authentication, rate-limit, and timeout failures each map to
//! a distinct user-facing message.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

use super::tool::{Tool, ToolResult};

/// Request timeout in seconds
const TIMEOUT_SECS: u64 = 10;
/// SerpAPI search endpoint
const SERPAPI_BASE_URL: &str = "https://serpapi.com/search";
/// Maximum organic results included in the output
const MAX_RESULTS: usize = 5;
/// Maximum related questions included in the output
const MAX_RELATED_QUESTIONS: usize = 3;

/// SerpAPI response (only the sections we format)
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
    answer_box: Option<AnswerBox>,
    knowledge_graph: Option<KnowledgeGraph>,
    #[serde(default)]
    related_questions: Vec<RelatedQuestion>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnswerBox {
    answer: Option<String>,
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeGraph {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelatedQuestion {
    question: Option<String>,
}

/// Web search tool backed by SerpAPI
pub struct WebSearchTool {
    api_key: Option<String>,
    client: reqwest::Client,
    base_url: String,
}

impl WebSearchTool {
    /// Create a new web search tool
    ///
    /// `api_key` comes from configuration; when it is `None` the tool reports
    /// itself unavailable and must not be registered.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        if api_key.is_some() {
            tracing::info!("[WEBSEARCH] SerpAPI configurada com sucesso");
        } else {
            tracing::warn!("[WEBSEARCH] SERPAPI_KEY não configurada - busca web desabilitada");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            api_key,
            client,
            base_url: SERPAPI_BASE_URL.to_string(),
        })
    }

    /// Whether the tool can be used (a key is configured)
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, query: &str) -> ToolResult {
        let Some(api_key) = self.api_key.as_deref() else {
            return ToolResult::error(
                "❌ Busca web não disponível: SERPAPI_KEY não configurada.",
            );
        };

        tracing::info!("[WEBSEARCH] Buscando: {}", query);

        let response = match self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", query),
                ("api_key", api_key),
                ("engine", "google"),
                ("num", "5"),
                ("gl", "br"),
                ("hl", "pt"),
            ])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                tracing::error!("[WEBSEARCH] Timeout na requisição");
                return ToolResult::error("❌ Erro: Timeout ao buscar. Tente novamente.");
            }
            Err(e) => {
                tracing::error!("[WEBSEARCH] Erro: {}", e);
                return ToolResult::error(format!("❌ Erro ao buscar: {}", e));
            }
        };

        match response.status().as_u16() {
            200 => {}
            401 => {
                tracing::error!("[WEBSEARCH] Erro de autenticação: chave inválida");
                return ToolResult::error("❌ Erro: Chave SerpAPI inválida ou expirada");
            }
            429 => {
                tracing::error!("[WEBSEARCH] Limite de requisições excedido");
                return ToolResult::error(
                    "❌ Erro: Limite de buscas excedido. Tente novamente mais tarde.",
                );
            }
            status => {
                tracing::error!("[WEBSEARCH] Erro HTTP {}", status);
                return ToolResult::error(format!("❌ Erro ao buscar: Status {}", status));
            }
        }

        let data: SearchResponse = match response.json().await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("[WEBSEARCH] Erro: {}", e);
                return ToolResult::error(format!("❌ Erro ao buscar: {}", e));
            }
        };

        if data.organic_results.is_empty() {
            tracing::info!("[WEBSEARCH] Nenhum resultado encontrado para: {}", query);
            return ToolResult::success(format!("Nenhum resultado encontrado para '{}'", query));
        }

        tracing::info!(
            "[WEBSEARCH] Sucesso: {} resultados",
            data.organic_results.len()
        );
        ToolResult::success(format_results(&data, query))
    }
}

/// Format the search response into a structured text block
fn format_results(data: &SearchResponse, query: &str) -> String {
    let mut output = format!("🔍 **Resultados da busca para: '{}'**\n\n", query);

    if let Some(answer_box) = &data.answer_box {
        if let Some(answer) = answer_box.answer.as_deref().or(answer_box.snippet.as_deref()) {
            output.push_str(&format!("📌 **Resposta Direta:**\n{}\n\n", answer));
        }
    }

    if let Some(description) = data
        .knowledge_graph
        .as_ref()
        .and_then(|kg| kg.description.as_deref())
    {
        output.push_str(&format!("📚 **Sobre:**\n{}\n\n", description));
    }

    output.push_str("📄 **Principais Resultados:**\n\n");
    for (i, result) in data.organic_results.iter().take(MAX_RESULTS).enumerate() {
        let title = result.title.as_deref().unwrap_or("Sem título");
        let snippet = result.snippet.as_deref().unwrap_or("Sem descrição");
        let link = result.link.as_deref().unwrap_or("");

        output.push_str(&format!("**{}. {}**\n{}\n🔗 {}\n\n", i + 1, title, snippet, link));
    }

    if !data.related_questions.is_empty() {
        output.push_str("❓ **Perguntas Relacionadas:**\n");
        for question in data.related_questions.iter().take(MAX_RELATED_QUESTIONS) {
            output.push_str(&format!("- {}\n", question.question.as_deref().unwrap_or("")));
        }
    }

    output
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "WebSearch"
    }

    fn description(&self) -> &str {
        "Útil para buscar informações atualizadas na internet quando a base de conhecimento interna não tem a resposta. Use para: notícias recentes, eventos atuais, informações que mudam frequentemente, fatos que você não conhece. Input: query de busca como string (ex: 'notícias sobre IA 2024', 'quem ganhou a copa do mundo')"
    }

    async fn call(&self, input: &str) -> ToolResult {
        self.search(input.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_tracks_api_key() {
        let without_key = WebSearchTool::new(None).unwrap();
        assert!(!without_key.is_available());

        let with_key = WebSearchTool::new(Some("secret".to_string())).unwrap();
        assert!(with_key.is_available());
    }

    #[tokio::test]
    async fn test_search_without_key_reports_unavailable() {
        let tool = WebSearchTool::new(None).unwrap();
        let result = tool.call("qualquer coisa").await;
        assert!(result.is_error);
        assert!(result.output.contains("SERPAPI_KEY não configurada"));
    }

    #[test]
    fn test_format_results_full_response() {
        let json = r#"{
            "organic_results": [
                {"title": "Primeiro", "snippet": "Resumo um", "link": "https://a.example"},
                {"title": "Segundo", "snippet": "Resumo dois", "link": "https://b.example"}
            ],
            "answer_box": {"answer": "42"},
            "knowledge_graph": {"description": "Uma descrição"},
            "related_questions": [
                {"question": "Pergunta A?"},
                {"question": "Pergunta B?"}
            ]
        }"#;
        let data: SearchResponse = serde_json::from_str(json).unwrap();

        let output = format_results(&data, "sentido da vida");
        assert!(output.contains("Resultados da busca para: 'sentido da vida'"));
        assert!(output.contains("📌 **Resposta Direta:**\n42"));
        assert!(output.contains("📚 **Sobre:**\nUma descrição"));
        assert!(output.contains("**1. Primeiro**"));
        assert!(output.contains("**2. Segundo**"));
        assert!(output.contains("- Pergunta A?"));
    }

    #[test]
    fn test_format_results_minimal_response() {
        let json = r#"{"organic_results": [{"title": "Só um"}]}"#;
        let data: SearchResponse = serde_json::from_str(json).unwrap();

        let output = format_results(&data, "q");
        assert!(output.contains("**1. Só um**"));
        assert!(output.contains("Sem descrição"));
        assert!(!output.contains("Resposta Direta"));
        assert!(!output.contains("Perguntas Relacionadas"));
    }
}
