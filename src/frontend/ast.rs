//! Abstract Syntax Tree definitions for arithmetic expressions

use serde::Serialize;

use crate::frontend::token::TokenKind;
use crate::utils::Span;

/// Expression node. The tree owns its children; no sharing, no cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node")]
pub enum Expr {
    /// Integer literal
    #[serde(rename = "NumberLiteral")]
    Number { value: u64, span: Span },
    /// Reference to a variable (not resolved)
    #[serde(rename = "VariableReference")]
    Variable { name: String, span: Span },
    /// Binary operation
    #[serde(rename = "BinaryOp")]
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// `name = value`
    #[serde(rename = "VariableAssignment")]
    Assign {
        name: String,
        value: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number { span, .. } => *span,
            Expr::Variable { span, .. } => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Assign { span, .. } => *span,
        }
    }

    /// Node kind name as used by renderers
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number { .. } => "NumberLiteral",
            Expr::Variable { .. } => "VariableReference",
            Expr::Binary { .. } => "BinaryOp",
            Expr::Assign { .. } => "VariableAssignment",
        }
    }

    /// Direct children, left to right
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Number { .. } | Expr::Variable { .. } => vec![],
            Expr::Binary { left, right, .. } => vec![&**left, &**right],
            Expr::Assign { value, .. } => vec![&**value],
        }
    }

    /// Height of the tree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl BinOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Mul => Some(BinOp::Mul),
            TokenKind::Div => Some(BinOp::Div),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(value: u64, at: usize) -> Box<Expr> {
        Box::new(Expr::Number {
            value,
            span: Span::new(at, at + 1),
        })
    }

    #[test]
    fn test_children_and_depth() {
        let tree = Expr::Assign {
            name: "x".to_string(),
            value: Box::new(Expr::Binary {
                op: BinOp::Add,
                left: num(1, 4),
                right: num(2, 8),
                span: Span::new(4, 9),
            }),
            span: Span::new(0, 9),
        };

        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.kind_name(), "VariableAssignment");
        assert_eq!(tree.span(), Span::new(0, 9));
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(BinOp::from_token_kind(TokenKind::Div), Some(BinOp::Div));
        assert_eq!(BinOp::from_token_kind(TokenKind::Equals), None);
        assert_eq!(BinOp::Sub.symbol(), '-');
    }
}
