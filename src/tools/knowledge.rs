//! Knowledge base tool
//!
//! In-memory lookup over a fixed set of facts about technology topics. The
//! match policy is case-insensitive substring containment of a key in the
//! query; entries are checked in insertion order and the first match wins.

use async_trait::async_trait;

use super::tool::{Tool, ToolResult};

/// The fixed knowledge entries, in lookup order
const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "python",
        "Python é uma linguagem de programação de alto nível, interpretada e de propósito geral. Criada por Guido van Rossum em 1991.",
    ),
    (
        "langchain",
        "LangChain é um framework para desenvolvimento de aplicações com LLMs. Facilita a criação de agentes, chains e integração com ferramentas.",
    ),
    (
        "react",
        "ReAct (Reasoning + Acting) é um paradigma onde o agente alterna entre raciocínio (pensamento) e ação (uso de ferramentas) para resolver tarefas.",
    ),
    (
        "ia",
        "Inteligência Artificial é o campo da ciência da computação que busca criar sistemas capazes de realizar tarefas que normalmente requerem inteligência humana.",
    ),
    (
        "machine learning",
        "Machine Learning é um subcampo da IA focado em algoritmos que melhoram automaticamente através da experiência e uso de dados.",
    ),
    (
        "serpapi",
        "SerpAPI é uma API que permite fazer buscas no Google, Bing e outros motores de busca de forma programática, retornando resultados estruturados em JSON.",
    ),
];

/// Knowledge base lookup tool
pub struct KnowledgeBaseTool {
    entries: &'static [(&'static str, &'static str)],
}

impl KnowledgeBaseTool {
    /// Create a new knowledge base tool with the built-in entries
    pub fn new() -> Self {
        Self {
            entries: KNOWLEDGE_BASE,
        }
    }

    fn search(&self, query: &str) -> ToolResult {
        tracing::info!("[KNOWLEDGE] Buscando: {}", query);
        let query_lower = query.to_lowercase();

        for (key, fact) in self.entries {
            if query_lower.contains(key) {
                tracing::info!("[KNOWLEDGE] Encontrado: {}", key);
                return ToolResult::success(format!("Informação sobre '{}': {}", key, fact));
            }
        }

        tracing::info!("[KNOWLEDGE] Não encontrado: {}", query);
        ToolResult::success(format!(
            "Não encontrei informações sobre '{}' na base de conhecimento.",
            query
        ))
    }
}

impl Default for KnowledgeBaseTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for KnowledgeBaseTool {
    fn name(&self) -> &str {
        "KnowledgeBase"
    }

    fn description(&self) -> &str {
        "Útil para buscar informações sobre tecnologia, programação, IA na base de conhecimento interna. Input: termo de busca como string"
    }

    async fn call(&self, input: &str) -> ToolResult {
        self.search(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let tool = KnowledgeBaseTool::new();
        let result = tool.call("O que é LangChain?").await;
        assert!(!result.is_error);
        assert!(result.output.starts_with("Informação sobre 'langchain':"));
        assert!(result.output.contains("framework"));
    }

    #[tokio::test]
    async fn test_key_matches_inside_query() {
        let tool = KnowledgeBaseTool::new();
        let result = tool.call("me explique machine learning por favor").await;
        assert!(result.output.contains("subcampo da IA"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let tool = KnowledgeBaseTool::new();
        let result = tool.call("futebol").await;
        assert!(!result.is_error);
        assert!(result.output.contains("Não encontrei informações"));
        assert!(result.output.contains("futebol"));
    }

    #[tokio::test]
    async fn test_substring_policy_matches_keys_inside_words() {
        // The containment check has no word boundaries: "culinária" contains
        // "ia", so an unrelated query still hits that entry.
        let tool = KnowledgeBaseTool::new();
        let result = tool.call("culinária francesa").await;
        assert!(result.output.starts_with("Informação sobre 'ia':"));
    }

    #[tokio::test]
    async fn test_first_match_wins_in_insertion_order() {
        // "python" precedes "ia" in the table, so a query containing both
        // resolves to the python entry.
        let tool = KnowledgeBaseTool::new();
        let result = tool.call("python e ia").await;
        assert!(result.output.starts_with("Informação sobre 'python':"));
    }
}
