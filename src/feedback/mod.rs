//! Structured Feedback Module
//!
//! Machine-readable output for tools driving the front end:
//! - JSON validation reports with the AST or a located error
//! - JSON token listings

use serde::Serialize;

use crate::frontend::ast::Expr;
use crate::frontend::lexer::tokenize;
use crate::frontend::parser::{validate_with_depth, Validation, DEFAULT_MAX_DEPTH};
use crate::frontend::token::{Token, TokenKind, TokenValue};
use crate::utils::{Error, Result};

// ==================== Error Report ====================

#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0101")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Character offsets of the offending input
    pub start: usize,
    pub end: usize,

    /// How to fix the input, when there is an obvious fix
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn from_error(error: &Error) -> Self {
        let span = error.span();
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            start: span.start,
            end: span.end,
            suggestion: suggest(error),
        }
    }
}

fn suggest(error: &Error) -> Option<String> {
    match error {
        Error::InvalidCharacter { ch, .. } => Some(format!(
            "Remove '{}'; only digits, identifiers, + - * / = ( ) are allowed",
            ch
        )),
        Error::IntegerOverflow { .. } => {
            Some(format!("Use a literal no larger than {}", u64::MAX))
        }
        Error::UnexpectedToken {
            expected: TokenKind::RParen,
            ..
        } => Some("Add a closing ')'".to_string()),
        Error::UnexpectedToken { expected, .. } => Some(format!("Insert {}", expected)),
        Error::ExpectedPrimary { .. } => {
            Some("Insert a number, a variable or a parenthesized expression".to_string())
        }
        Error::TrailingTokens { .. } => {
            Some("Join the extra input with an operator or remove it".to_string())
        }
        Error::NestingTooDeep { .. } => {
            Some("Split the expression or raise --max-depth".to_string())
        }
        Error::MissingValue { .. } => None,
    }
}

// ==================== Validation Report ====================

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub input: String,
    pub valid: bool,
    pub ast: Option<Expr>,
    pub error: Option<ErrorReport>,
}

impl ValidationReport {
    /// Validate `input` and report the outcome
    pub fn new(input: &str) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(input: &str, max_depth: usize) -> Self {
        Self::from_validation(input, validate_with_depth(input, max_depth))
    }

    pub fn from_validation(input: &str, validation: Validation) -> Self {
        let error = validation.error().map(ErrorReport::from_error);
        Self {
            input: input.to_string(),
            valid: validation.is_valid(),
            ast: validation.into_result().ok(),
            error,
        }
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ==================== Token Report ====================

#[derive(Debug, Clone, Serialize)]
pub struct TokenReport {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub start: usize,
    pub end: usize,
}

impl From<&Token> for TokenReport {
    fn from(token: &Token) -> Self {
        Self {
            kind: token.kind,
            value: token.value.clone(),
            start: token.span.start,
            end: token.span.end,
        }
    }
}

/// Tokenize `input` into serializable token records
pub fn token_reports(input: &str) -> Result<Vec<TokenReport>> {
    Ok(tokenize(input)?.iter().map(TokenReport::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_valid_report_json() {
        let report = ValidationReport::new("x = 1 + 2");
        let value: Value = serde_json::from_str(&report.to_json()).unwrap();

        assert_eq!(value["valid"], json!(true));
        assert_eq!(value["error"], Value::Null);
        assert_eq!(value["ast"]["node"], json!("VariableAssignment"));
        assert_eq!(value["ast"]["name"], json!("x"));
        assert_eq!(value["ast"]["value"]["node"], json!("BinaryOp"));
        assert_eq!(value["ast"]["value"]["op"], json!("+"));
        assert_eq!(value["ast"]["value"]["left"]["value"], json!(1));
        assert_eq!(value["ast"]["span"], json!({ "start": 0, "end": 9 }));
    }

    #[test]
    fn test_invalid_report_json() {
        let report = ValidationReport::new("(10 + 2");
        assert!(!report.valid);
        assert!(report.ast.is_none());

        let error = report.error.as_ref().unwrap();
        assert_eq!(error.code, "E0101");
        assert_eq!(error.start, 7);
        assert_eq!(error.suggestion.as_deref(), Some("Add a closing ')'"));

        let value: Value = serde_json::from_str(&report.to_json_pretty()).unwrap();
        assert_eq!(value["ast"], Value::Null);
        assert_eq!(value["error"]["code"], json!("E0101"));
    }

    #[test]
    fn test_lex_error_report() {
        let report = ValidationReport::new("10 & 2");
        let error = report.error.unwrap();
        assert_eq!(error.code, "E0001");
        assert_eq!((error.start, error.end), (3, 4));
    }

    #[test]
    fn test_token_reports() {
        let reports = token_reports("y=7").unwrap();
        let value = serde_json::to_value(&reports).unwrap();

        assert_eq!(
            value,
            json!([
                { "kind": "IDENTIFIER", "value": "y", "start": 0, "end": 1 },
                { "kind": "EQUALS", "value": "=", "start": 1, "end": 2 },
                { "kind": "INT", "value": 7, "start": 2, "end": 3 },
                { "kind": "EOF", "value": null, "start": 3, "end": 3 },
            ])
        );
    }

    #[test]
    fn test_token_reports_error() {
        assert!(matches!(
            token_reports("1 ? 2"),
            Err(Error::InvalidCharacter { ch: '?', .. })
        ));
    }
}
