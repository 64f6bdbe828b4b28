//! Token definitions for arithmetic expressions

use std::fmt;

use serde::Serialize;

use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<TokenValue>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: Option<TokenValue>, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Operator or punctuation token carrying its literal character
    pub fn symbol(kind: TokenKind, ch: char, pos: usize) -> Self {
        Self {
            kind,
            value: Some(TokenValue::Char(ch)),
            span: Span::new(pos, pos + 1),
        }
    }

    pub fn int(value: u64, span: Span) -> Self {
        Self {
            kind: TokenKind::Int,
            value: Some(TokenValue::Int(value)),
            span,
        }
    }

    pub fn identifier(name: String, span: Span) -> Self {
        Self {
            kind: TokenKind::Identifier,
            value: Some(TokenValue::Text(name)),
            span,
        }
    }

    pub fn eof(pos: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            value: None,
            span: Span::point(pos),
        }
    }

    /// Integer payload of an INT token
    pub fn as_int(&self) -> Option<u64> {
        match self.value {
            Some(TokenValue::Int(n)) => Some(n),
            _ => None,
        }
    }

    /// Name carried by an IDENTIFIER token
    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Text(s)) => Some(s),
            _ => None,
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    /// Integer literal
    Int,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Mul,
    /// /
    Div,
    /// (
    LParen,
    /// )
    RParen,
    /// Variable name
    Identifier,
    /// =
    Equals,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Kind for a single-character operator or punctuation symbol
    pub fn from_symbol(c: char) -> Option<TokenKind> {
        match c {
            '+' => Some(TokenKind::Plus),
            '-' => Some(TokenKind::Minus),
            '*' => Some(TokenKind::Mul),
            '/' => Some(TokenKind::Div),
            '(' => Some(TokenKind::LParen),
            ')' => Some(TokenKind::RParen),
            '=' => Some(TokenKind::Equals),
            _ => None,
        }
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, TokenKind::Plus | TokenKind::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, TokenKind::Mul | TokenKind::Div)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Div => "DIV",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Equals => "EQUALS",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Semantic payload of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Int(u64),
    Text(String),
    Char(char),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(n) => write!(f, "{}", n),
            TokenValue::Text(s) => write!(f, "{}", s),
            TokenValue::Char(c) => write!(f, "{}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_kinds() {
        assert_eq!(TokenKind::from_symbol('+'), Some(TokenKind::Plus));
        assert_eq!(TokenKind::from_symbol(')'), Some(TokenKind::RParen));
        assert_eq!(TokenKind::from_symbol('='), Some(TokenKind::Equals));
        assert_eq!(TokenKind::from_symbol('&'), None);
    }

    #[test]
    fn test_payload_accessors() {
        let tok = Token::int(42, Span::new(0, 2));
        assert_eq!(tok.as_int(), Some(42));
        assert_eq!(tok.as_text(), None);

        let tok = Token::identifier("rate".to_string(), Span::new(0, 4));
        assert_eq!(tok.as_text(), Some("rate"));

        assert_eq!(Token::eof(5).value, None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::LParen.to_string(), "LPAREN");
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }
}
