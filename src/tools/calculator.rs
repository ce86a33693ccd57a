//! Calculator tool
//!
//! Evaluates restricted arithmetic expressions. Input is validated against an
//! allow-list of characters before anything is parsed, and every evaluation
//! failure is reported as an error message rather than a fault.
//!
//! Results are f64 values formatted with Rust's default float display, so
//! integral quotients print without a decimal point (`10 / 5` is
//! `Resultado: 2`, not `2.0`).

use async_trait::async_trait;
use thiserror::Error;

use super::tool::{Tool, ToolResult};

/// Characters an expression may contain
const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Maximum nesting depth of the parser
///
/// Parentheses and unary-sign chains recurse; without a cap a long run of
/// allowed characters could exhaust the stack instead of returning an error.
const MAX_DEPTH: usize = 64;

/// Errors produced while evaluating an expression
#[derive(Debug, Error, PartialEq)]
enum EvalError {
    #[error("caractere inesperado '{0}'")]
    Unexpected(char),
    #[error("fim inesperado da expressão")]
    UnexpectedEnd,
    #[error("número inválido '{0}'")]
    InvalidNumber(String),
    #[error("divisão por zero")]
    DivisionByZero,
    #[error("esperado ')'")]
    MissingParen,
    #[error("expressão aninhada demais")]
    TooDeep,
}

/// Calculator tool for arithmetic expressions
pub struct CalculatorTool;

impl CalculatorTool {
    /// Create a new calculator tool
    pub fn new() -> Self {
        Self
    }

    /// Validate and evaluate an expression, formatting the outcome as a
    /// user-facing message.
    fn calculate(&self, expression: &str) -> ToolResult {
        tracing::info!("[CALCULATOR] Calculando: {}", expression);

        if !expression.chars().all(|c| ALLOWED_CHARS.contains(c)) {
            tracing::warn!("[CALCULATOR] Expressão rejeitada: {}", expression);
            return ToolResult::error("Erro: Expressão contém caracteres inválidos");
        }

        match evaluate(expression) {
            Ok(result) => {
                tracing::info!("[CALCULATOR] Resultado: {}", result);
                ToolResult::success(format!("Resultado: {}", result))
            }
            Err(e) => {
                tracing::error!("[CALCULATOR] Erro: {}", e);
                ToolResult::error(format!("Erro ao calcular: {}", e))
            }
        }
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Útil para fazer cálculos matemáticos. Input: expressão matemática como string (ex: '2+2', '10*5+3')"
    }

    async fn call(&self, input: &str) -> ToolResult {
        self.calculate(input)
    }
}

/// Evaluate an arithmetic expression over f64
///
/// Grammar (covers exactly the allowed character set):
///
/// ```text
/// expr  := term (('+' | '-') term)*
/// term  := unary (('*' | '/') unary)*
/// unary := ('+' | '-')* atom
/// atom  := number | '(' expr ')'
/// ```
fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let mut parser = Parser::new(expression);
    let value = parser.expr()?;
    parser.skip_spaces();
    match parser.peek() {
        Some(c) => Err(EvalError::Unexpected(c)),
        None => Ok(value),
    }
}

/// Recursive-descent parser over the expression characters
struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            depth: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.bump();
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some('+') => {
                    self.bump();
                    value += self.term()?;
                }
                Some('-') => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            self.skip_spaces();
            match self.peek() {
                Some('*') => {
                    self.bump();
                    value *= self.unary()?;
                }
                Some('/') => {
                    self.bump();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    /// Every recursive construct (parenthesized groups and sign chains)
    /// passes through here, so the depth accounting lives here.
    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;

        self.skip_spaces();
        let value = match self.peek() {
            Some('-') => {
                self.bump();
                self.unary().map(|v| -v)
            }
            Some('+') => {
                self.bump();
                self.unary()
            }
            _ => self.atom(),
        };

        self.depth -= 1;
        value
    }

    fn atom(&mut self) -> Result<f64, EvalError> {
        self.skip_spaces();
        match self.peek() {
            Some('(') => {
                self.bump();
                let value = self.expr()?;
                self.skip_spaces();
                if self.bump() != Some(')') {
                    return Err(EvalError::MissingParen);
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(EvalError::Unexpected(c)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let mut literal = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                literal.push(c);
                self.bump();
            } else {
                break;
            }
        }
        literal
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber(literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_arithmetic() {
        let tool = CalculatorTool::new();
        let result = tool.call("2 + 2").await;
        assert!(!result.is_error);
        assert_eq!(result.output, "Resultado: 4");
    }

    #[tokio::test]
    async fn test_precedence_example() {
        // The end-to-end example from the assistant's demo queries
        let tool = CalculatorTool::new();
        let result = tool.call("25 * 4 + 100").await;
        assert!(!result.is_error);
        assert_eq!(result.output, "Resultado: 200");
    }

    #[tokio::test]
    async fn test_parentheses_and_fractions() {
        let tool = CalculatorTool::new();
        let result = tool.call("(1 + 4) / 2").await;
        assert_eq!(result.output, "Resultado: 2.5");

        let result = tool.call("10 * (3 - 1)").await;
        assert_eq!(result.output, "Resultado: 20");
    }

    #[tokio::test]
    async fn test_unary_minus() {
        let tool = CalculatorTool::new();
        let result = tool.call("-5 + 3").await;
        assert_eq!(result.output, "Resultado: -2");

        let result = tool.call("2 * -3").await;
        assert_eq!(result.output, "Resultado: -6");
    }

    #[tokio::test]
    async fn test_disallowed_characters_never_evaluated() {
        let tool = CalculatorTool::new();
        for input in ["2 + x", "import os", "1; 2", "abc"] {
            let result = tool.call(input).await;
            assert!(result.is_error, "should reject: {}", input);
            assert_eq!(result.output, "Erro: Expressão contém caracteres inválidos");
        }
    }

    #[tokio::test]
    async fn test_malformed_expression() {
        let tool = CalculatorTool::new();
        // "2**3" passes the charset check ('*' is allowed) and fails in the
        // parser instead.
        for input in ["2 +", "(1 + 2", "1 2", "()", "2**3"] {
            let result = tool.call(input).await;
            assert!(result.is_error, "should fail: {}", input);
            assert!(result.output.starts_with("Erro ao calcular:"));
        }
    }

    #[tokio::test]
    async fn test_deeply_nested_parens_report_error() {
        // A pathological input made only of allowed characters must come
        // back as an error string, not exhaust the stack.
        let tool = CalculatorTool::new();
        let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let result = tool.call(&input).await;
        assert!(result.is_error);
        assert!(result.output.contains("expressão aninhada demais"));
    }

    #[tokio::test]
    async fn test_long_sign_chain_reports_error() {
        let tool = CalculatorTool::new();
        let input = format!("{}1", "-".repeat(100_000));
        let result = tool.call(&input).await;
        assert!(result.is_error);
        assert!(result.output.contains("expressão aninhada demais"));
    }

    #[test]
    fn test_nesting_within_limit_still_evaluates() {
        let input = format!("{}7{}", "(".repeat(MAX_DEPTH / 2), ")".repeat(MAX_DEPTH / 2));
        assert_eq!(evaluate(&input), Ok(7.0));
    }

    #[tokio::test]
    async fn test_division_by_zero() {
        let tool = CalculatorTool::new();
        let result = tool.call("1 / 0").await;
        assert!(result.is_error);
        assert!(result.output.contains("divisão por zero"));
    }

    #[test]
    fn test_evaluate_matches_standard_arithmetic() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
        assert_eq!(evaluate("100 / 5 / 2"), Ok(10.0));
        assert_eq!(evaluate("7 - 2 - 1"), Ok(4.0));
        assert_eq!(evaluate("1.5 * 2"), Ok(3.0));
        assert_eq!(evaluate(" 42 "), Ok(42.0));
    }
}
