//! ReAct output parsing
//!
//! Turns a model completion into either a tool invocation or a final answer.
//! The completion is generated with a stop sequence at `"Observation:"`, so a
//! well-formed completion ends right after the `Action Input` line or carries
//! a `Final Answer`.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Parsed agent output
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    /// The model chose a tool to run
    Action { tool: String, input: String },
    /// The model produced its final answer
    Finish { answer: String },
}

/// Failure to recognize either format
#[derive(Debug, Error)]
#[error("não foi possível interpretar a saída do modelo: {excerpt}")]
pub struct ParseError {
    pub excerpt: String,
}

fn final_answer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Final\s*Answer\s*:\s*(.*)").expect("hardcoded regex"))
}

fn action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*:\s*(.*?)\s*Action\s*Input\s*:\s*(.*)").expect("hardcoded regex")
    })
}

/// Parse one completion
///
/// A `Final Answer:` takes precedence over an action when both appear, so a
/// model that answers after narrating its previous actions still concludes.
pub fn parse_output(text: &str) -> Result<AgentOutput, ParseError> {
    if let Some(captures) = final_answer_re().captures(text) {
        return Ok(AgentOutput::Finish {
            answer: captures[1].trim().to_string(),
        });
    }

    if let Some(captures) = action_re().captures(text) {
        // The tool name is the first line of the Action capture; anything
        // after a newline belongs to hallucinated continuation.
        let tool = captures[1].lines().next().unwrap_or("").trim().to_string();
        let input = captures[2].trim().trim_matches('"').to_string();
        if !tool.is_empty() {
            return Ok(AgentOutput::Action { tool, input });
        }
    }

    let excerpt: String = text.chars().take(120).collect();
    Err(ParseError { excerpt })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_action() {
        let text = "Preciso calcular o valor.\nAction: Calculator\nAction Input: 25 * 4 + 100";
        let output = parse_output(text).unwrap();
        assert_eq!(
            output,
            AgentOutput::Action {
                tool: "Calculator".to_string(),
                input: "25 * 4 + 100".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_action_with_quoted_input() {
        let text = "Action: Weather\nAction Input: \"São Paulo\"";
        let output = parse_output(text).unwrap();
        assert_eq!(
            output,
            AgentOutput::Action {
                tool: "Weather".to_string(),
                input: "São Paulo".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_final_answer() {
        let text = "Agora eu sei a resposta final\nFinal Answer: O resultado é 200.";
        let output = parse_output(text).unwrap();
        assert_eq!(
            output,
            AgentOutput::Finish {
                answer: "O resultado é 200.".to_string(),
            }
        );
    }

    #[test]
    fn test_final_answer_takes_precedence() {
        let text = "Action: Calculator\nAction Input: 2+2\nFinal Answer: 4";
        let output = parse_output(text).unwrap();
        assert_eq!(
            output,
            AgentOutput::Finish {
                answer: "4".to_string(),
            }
        );
    }

    #[test]
    fn test_multiline_final_answer() {
        let text = "Final Answer: Primeira linha.\nSegunda linha.";
        match parse_output(text).unwrap() {
            AgentOutput::Finish { answer } => {
                assert_eq!(answer, "Primeira linha.\nSegunda linha.")
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_output() {
        let err = parse_output("vou pensar mais um pouco sobre isso").unwrap_err();
        assert!(err.excerpt.contains("vou pensar"));
    }

    #[test]
    fn test_action_without_input_is_error() {
        assert!(parse_output("Action: Calculator").is_err());
    }
}
