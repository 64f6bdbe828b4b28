//! Error handling for the expression front end

use crate::frontend::token::TokenKind;
use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Lexing or parsing failure. Every variant aborts the current call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ==================== Lexer Errors ====================
    #[error("Invalid character '{ch}' at position {}", .span.start)]
    InvalidCharacter { ch: char, span: Span },

    #[error("Integer literal {literal} at position {} does not fit in 64 bits", .span.start)]
    IntegerOverflow { literal: String, span: Span },

    // ==================== Parser Errors ====================
    #[error("Unexpected token: expected {expected}, got {found} at position {}", .span.start)]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        span: Span,
    },

    #[error("Expected INT, IDENTIFIER or LPAREN, got {found} at position {}", .span.start)]
    ExpectedPrimary { found: TokenKind, span: Span },

    #[error("Unexpected {found} at position {} after complete expression", .span.start)]
    TrailingTokens { found: TokenKind, span: Span },

    #[error("Expression nested deeper than {limit} levels at position {}", .span.start)]
    NestingTooDeep { limit: usize, span: Span },

    #[error("{kind} token at position {} carries no value", .span.start)]
    MissingValue { kind: TokenKind, span: Span },
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidCharacter { span, .. }
            | Self::IntegerOverflow { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::ExpectedPrimary { span, .. }
            | Self::TrailingTokens { span, .. }
            | Self::NestingTooDeep { span, .. }
            | Self::MissingValue { span, .. } => *span,
        }
    }

    /// Character offset where the error was detected
    pub fn position(&self) -> usize {
        self.span().start
    }

    /// Stable diagnostic code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidCharacter { .. } => "E0001",
            Self::IntegerOverflow { .. } => "E0002",
            Self::UnexpectedToken { .. } => "E0101",
            Self::ExpectedPrimary { .. } => "E0102",
            Self::TrailingTokens { .. } => "E0103",
            Self::NestingTooDeep { .. } => "E0104",
            Self::MissingValue { .. } => "E0105",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_position() {
        let err = Error::InvalidCharacter {
            ch: '&',
            span: Span::new(3, 4),
        };
        assert_eq!(err.to_string(), "Invalid character '&' at position 3");
        assert_eq!(err.position(), 3);
        assert_eq!(err.code(), "E0001");
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = Error::UnexpectedToken {
            expected: TokenKind::RParen,
            found: TokenKind::Eof,
            span: Span::point(7),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected token: expected RPAREN, got EOF at position 7"
        );
    }

    #[test]
    fn test_missing_value_message() {
        let err = Error::MissingValue {
            kind: TokenKind::Int,
            span: Span::new(0, 1),
        };
        assert_eq!(err.to_string(), "INT token at position 0 carries no value");
        assert_eq!(err.code(), "E0105");
    }
}
