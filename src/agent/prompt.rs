//! ReAct prompt template
//!
//! The template describes the textual Thought/Action/Action Input/Observation
//! protocol the model must follow. It is rendered per request with the tool
//! list, the user question, and the scratchpad of previous steps.

use crate::tools::ToolRegistry;

/// The ReAct prompt template
pub const REACT_PROMPT: &str = r#"Você é um assistente inteligente que usa o paradigma ReAct (Reasoning + Acting).

Você tem acesso às seguintes ferramentas:

{tools}

Use o seguinte formato:

Question: a pergunta/tarefa do usuário
Thought: você deve sempre pensar sobre o que fazer
Action: a ação a tomar, deve ser uma de [{tool_names}]
Action Input: o input para a ação
Observation: o resultado da ação
... (esse ciclo Thought/Action/Action Input/Observation pode repetir N vezes)
Thought: Agora eu sei a resposta final
Final Answer: a resposta final para o usuário

IMPORTANTE:
- Sempre explique seu raciocínio (Thought)
- Use as ferramentas quando necessário
- Para informações atualizadas ou que você não conhece, use WebSearch
- Para informações na base de conhecimento interna, use KnowledgeBase primeiro
- Seja preciso e objetivo
- Responda em português brasileiro

Question: {input}
Thought: {agent_scratchpad}"#;

/// Render the prompt for one LLM call
pub fn render_prompt(registry: &ToolRegistry, question: &str, scratchpad: &str) -> String {
    REACT_PROMPT
        .replace("{tools}", &registry.render_descriptions())
        .replace("{tool_names}", &registry.render_names())
        .replace("{input}", question)
        .replace("{agent_scratchpad}", scratchpad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CalculatorTool, KnowledgeBaseTool};
    use std::sync::Arc;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(CalculatorTool::new())).unwrap();
        registry.register(Arc::new(KnowledgeBaseTool::new())).unwrap();
        registry
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let prompt = render_prompt(&registry(), "Quanto é 2 + 2?", "");

        assert!(!prompt.contains("{tools}"));
        assert!(!prompt.contains("{tool_names}"));
        assert!(!prompt.contains("{input}"));
        assert!(!prompt.contains("{agent_scratchpad}"));

        assert!(prompt.contains("Calculator: Útil para fazer cálculos"));
        assert!(prompt.contains("[Calculator, KnowledgeBase]"));
        assert!(prompt.contains("Question: Quanto é 2 + 2?"));
        assert!(prompt.ends_with("Thought: "));
    }

    #[test]
    fn test_render_appends_scratchpad() {
        let scratchpad = "preciso calcular\nAction: Calculator\nAction Input: 2 + 2\nObservation: Resultado: 4\nThought: ";
        let prompt = render_prompt(&registry(), "Quanto é 2 + 2?", scratchpad);
        assert!(prompt.contains("Observation: Resultado: 4"));
        assert!(prompt.ends_with("Thought: "));
    }
}
