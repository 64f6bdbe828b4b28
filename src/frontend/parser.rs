//! Parser for arithmetic expressions
//!
//! Recursive descent, one function per grammar rule:
//!
//! ```text
//! expr       := assignment | binExpr
//! assignment := IDENTIFIER EQUALS expr
//! binExpr    := term ( (PLUS|MINUS) term )*
//! term       := factor ( (MUL|DIV) factor )*
//! factor     := INT | IDENTIFIER | LPAREN expr RPAREN
//! ```

use log::debug;

use crate::frontend::ast::{BinOp, Expr};
use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Error, Result, Span};

/// Default limit on nested `expr` productions and on tree height
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    /// Lex `source` and create a parser over its tokens
    pub fn new(source: &str) -> Result<Self> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Create a parser from pre-tokenized input. An EOF sentinel is
    /// appended when the sequence does not already end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::eof(end));
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // `tokens` always ends with EOF and `pos` never passes it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Token `offset` positions ahead of the current one, if any
    pub fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    /// Consume the current token. Stays on EOF once reached.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(Error::UnexpectedToken {
                expected,
                found: self.current_kind(),
                span: self.current().span,
            })
        }
    }

    // ==================== Parsing Methods ====================
    //
    // Each rule returns the subtree together with its height (a leaf is 1).
    // Heights are checked against `max_depth` as nodes are built, so every
    // accepted tree can be walked recursively.

    /// Parse one complete expression followed by EOF
    pub fn parse(&mut self) -> Result<Expr> {
        let (expr, _) = self.parse_expr()?;

        if !self.check(TokenKind::Eof) {
            return Err(Error::TrailingTokens {
                found: self.current_kind(),
                span: self.current().span,
            });
        }

        Ok(expr)
    }

    fn parse_expr(&mut self) -> Result<(Expr, usize)> {
        if self.depth >= self.max_depth {
            return Err(self.too_deep(self.current().span));
        }

        self.depth += 1;
        let result = if self.at_assignment() {
            self.parse_assignment()
        } else {
            self.parse_bin_expr()
        };
        self.depth -= 1;

        result
    }

    /// IDENTIFIER immediately followed by EQUALS
    fn at_assignment(&self) -> bool {
        self.check(TokenKind::Identifier)
            && self.peek(1).map(|t| t.kind) == Some(TokenKind::Equals)
    }

    fn parse_assignment(&mut self) -> Result<(Expr, usize)> {
        let name_token = self.expect(TokenKind::Identifier)?;
        let name = Self::identifier_name(&name_token)?;
        let equals = self.expect(TokenKind::Equals)?;

        let (value, value_height) = self.parse_expr()?;
        let height = self.grow(value_height, equals.span)?;
        let span = name_token.span.merge(&value.span());

        Ok((
            Expr::Assign {
                name,
                value: Box::new(value),
                span,
            },
            height,
        ))
    }

    fn parse_bin_expr(&mut self) -> Result<(Expr, usize)> {
        let (mut left, mut height) = self.parse_term()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let op_span = self.advance().span;
            let right = self.parse_term()?;
            (left, height) = self.binary(op, op_span, (left, height), right)?;
        }

        Ok((left, height))
    }

    fn parse_term(&mut self) -> Result<(Expr, usize)> {
        let (mut left, mut height) = self.parse_factor()?;

        loop {
            let op = match self.current_kind() {
                TokenKind::Mul => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                _ => break,
            };
            let op_span = self.advance().span;
            let right = self.parse_factor()?;
            (left, height) = self.binary(op, op_span, (left, height), right)?;
        }

        Ok((left, height))
    }

    fn parse_factor(&mut self) -> Result<(Expr, usize)> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Int => {
                self.advance();
                let value = token.as_int().ok_or(Error::MissingValue {
                    kind: token.kind,
                    span: token.span,
                })?;
                Ok((
                    Expr::Number {
                        value,
                        span: token.span,
                    },
                    1,
                ))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok((
                    Expr::Variable {
                        name: Self::identifier_name(&token)?,
                        span: token.span,
                    },
                    1,
                ))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            found => Err(Error::ExpectedPrimary {
                found,
                span: token.span,
            }),
        }
    }

    fn identifier_name(token: &Token) -> Result<String> {
        token
            .as_text()
            .map(str::to_string)
            .ok_or(Error::MissingValue {
                kind: token.kind,
                span: token.span,
            })
    }

    fn binary(
        &self,
        op: BinOp,
        op_span: Span,
        (left, left_height): (Expr, usize),
        (right, right_height): (Expr, usize),
    ) -> Result<(Expr, usize)> {
        let height = self.grow(left_height.max(right_height), op_span)?;
        let span = left.span().merge(&right.span());
        Ok((
            Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            },
            height,
        ))
    }

    /// Height of a new node above a child of `child_height`
    fn grow(&self, child_height: usize, at: Span) -> Result<usize> {
        let height = child_height + 1;
        if height > self.max_depth {
            return Err(self.too_deep(at));
        }
        Ok(height)
    }

    fn too_deep(&self, span: Span) -> Error {
        Error::NestingTooDeep {
            limit: self.max_depth,
            span,
        }
    }
}

/// Lex and parse `text` into an AST
pub fn parse(text: &str) -> Result<Expr> {
    Parser::new(text)?.parse()
}

/// Outcome of validating one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(Expr),
    Invalid(Error),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    /// The AST; `None` when the input was invalid
    pub fn ast(&self) -> Option<&Expr> {
        match self {
            Validation::Valid(expr) => Some(expr),
            Validation::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Validation::Valid(_) => None,
            Validation::Invalid(err) => Some(err),
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(Error::to_string)
    }

    pub fn into_result(self) -> Result<Expr> {
        match self {
            Validation::Valid(expr) => Ok(expr),
            Validation::Invalid(err) => Err(err),
        }
    }
}

impl From<Result<Expr>> for Validation {
    fn from(result: Result<Expr>) -> Self {
        match result {
            Ok(expr) => Validation::Valid(expr),
            Err(err) => Validation::Invalid(err),
        }
    }
}

/// Check whether `text` is a valid expression, building its AST if so
pub fn validate(text: &str) -> Validation {
    validate_with_depth(text, DEFAULT_MAX_DEPTH)
}

/// [`validate`] with an explicit nesting limit
pub fn validate_with_depth(text: &str, max_depth: usize) -> Validation {
    let result = Parser::new(text).and_then(|p| p.with_max_depth(max_depth).parse());
    match &result {
        Ok(expr) => debug!("valid expression, tree depth {}", expr.depth()),
        Err(err) => debug!("invalid expression: {}", err),
    }
    result.into()
}
