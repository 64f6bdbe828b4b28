//! Lexer for arithmetic expressions
//!
//! Converts source text into a stream of tokens.

use log::trace;

use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// The lexer state
pub struct Lexer {
    /// Source text as characters
    source: Vec<char>,
    /// Current position in source
    pos: usize,
    /// Start position of current token
    start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source text
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            start: 0,
        }
    }

    /// Get the current character without advancing
    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn is_ident_start(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_'
    }

    fn is_ident_part(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Read an identifier
    fn read_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if Self::is_ident_part(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();
        Token::identifier(text, self.make_span())
    }

    /// Read a maximal run of decimal digits
    fn read_number(&mut self) -> Result<Token> {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[self.start..self.pos].iter().collect();

        // The run is non-empty and all digits, so parsing only fails on overflow.
        match text.parse::<u64>() {
            Ok(value) => Ok(Token::int(value, self.make_span())),
            Err(_) => Err(Error::IntegerOverflow {
                literal: text,
                span: self.make_span(),
            }),
        }
    }

    /// Get the next token. Returns EOF once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.start = self.pos;

        let Some(c) = self.peek() else {
            return Ok(Token::eof(self.pos));
        };

        if c.is_ascii_digit() {
            return self.read_number();
        }

        if Self::is_ident_start(c) {
            return Ok(self.read_identifier());
        }

        match TokenKind::from_symbol(c) {
            Some(kind) => {
                self.advance();
                Ok(Token::symbol(kind, c, self.start))
            }
            None => Err(Error::InvalidCharacter {
                ch: c,
                span: Span::new(self.pos, self.pos + 1),
            }),
        }
    }

    /// Tokenize the entire source. The result always ends with one EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            trace!("token {} {:?} at {:?}", token.kind, token.value, token.span);
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        debug_assert!(self.is_at_end());
        Ok(tokens)
    }
}

/// Tokenize `text` in one call
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    Lexer::new(text).tokenize()
}
