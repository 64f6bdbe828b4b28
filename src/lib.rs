//! Arithmetic expression front end
//!
//! Turns text such as `x = (10 + 2) * 5` into tokens and then into a
//! validated abstract syntax tree. Nothing is evaluated.

pub mod feedback;
pub mod frontend;
pub mod utils;

pub use frontend::ast::{BinOp, Expr};
pub use frontend::lexer::{tokenize, Lexer};
pub use frontend::parser::{parse, validate, validate_with_depth, Parser, Validation};
pub use frontend::printer::{render_token_table, render_tree};
pub use frontend::token::{Token, TokenKind, TokenValue};
pub use utils::{Error, Result, Span};
