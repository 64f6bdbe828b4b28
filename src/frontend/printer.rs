//! Printers for tokens and ASTs
//!
//! Outputs human-readable text for debugging and the CLI.

use std::fmt;

use crate::frontend::ast::Expr;
use crate::frontend::token::Token;

/// Indented tree printer for expressions
pub struct TreePrinter {
    output: String,
    indent: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a tree, one node per line, two spaces per level
    pub fn print(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.indent = 0;
        self.print_node(expr);
        self.output.clone()
    }

    fn print_node(&mut self, expr: &Expr) {
        let label = match expr {
            Expr::Number { value, .. } => format!("NumberLiteral({})", value),
            Expr::Variable { name, .. } => format!("VariableReference({})", name),
            Expr::Binary { op, .. } => format!("BinaryOp({})", op.symbol()),
            Expr::Assign { name, .. } => format!("VariableAssignment({})", name),
        };
        self.line(&label);

        self.indent += 1;
        for child in expr.children() {
            self.print_node(child);
        }
        self.indent -= 1;
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an expression as an indented tree
pub fn render_tree(expr: &Expr) -> String {
    TreePrinter::new().print(expr)
}

/// Render tokens as a numbered table of kind and value
pub fn render_token_table(tokens: &[Token]) -> String {
    let rule = "-".repeat(40);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{:<5} {:<12} {:<10}\n", "No.", "Type", "Value"));
    out.push_str(&rule);
    out.push('\n');

    for (i, token) in tokens.iter().enumerate() {
        let value = token
            .value
            .as_ref()
            .map_or_else(|| "None".to_string(), |v| v.to_string());
        out.push_str(&format!("{:<5} {:<12} {:<10}\n", i + 1, token.kind.name(), value));
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

/// Fully parenthesized infix form. Parsing the output yields the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { value, .. } => write!(f, "{}", value),
            Expr::Variable { name, .. } => write!(f, "{}", name),
            Expr::Binary { op, left, right, .. } => {
                write!(f, "(")?;
                write_operand(f, left)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, right)?;
                write!(f, ")")
            }
            Expr::Assign { name, value, .. } => write!(f, "{} = {}", name, value),
        }
    }
}

// An assignment operand needs its own parens or it would swallow the rest.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Assign { .. } => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::tokenize;
    use crate::frontend::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tree_indentation() {
        let expr = parse("2 + 3 * 4").unwrap();
        assert_eq!(
            render_tree(&expr),
            "BinaryOp(+)\n\
             \x20 NumberLiteral(2)\n\
             \x20 BinaryOp(*)\n\
             \x20   NumberLiteral(3)\n\
             \x20   NumberLiteral(4)\n"
        );
    }

    #[test]
    fn test_tree_assignment() {
        let expr = parse("total = x / 2").unwrap();
        assert_eq!(
            render_tree(&expr),
            "VariableAssignment(total)\n\
             \x20 BinaryOp(/)\n\
             \x20   VariableReference(x)\n\
             \x20   NumberLiteral(2)\n"
        );
    }

    #[test]
    fn test_printer_reusable() {
        let mut printer = TreePrinter::new();
        let first = printer.print(&parse("1 - 2").unwrap());
        let second = printer.print(&parse("7").unwrap());
        assert!(first.starts_with("BinaryOp(-)"));
        assert_eq!(second, "NumberLiteral(7)\n");
    }

    #[test]
    fn test_token_table() {
        let tokens = tokenize("x = 10").unwrap();
        let table = render_token_table(&tokens);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3].split_whitespace().collect::<Vec<_>>(), ["1", "IDENTIFIER", "x"]);
        assert_eq!(lines[5].split_whitespace().collect::<Vec<_>>(), ["3", "INT", "10"]);
        assert_eq!(lines[6].split_whitespace().collect::<Vec<_>>(), ["4", "EOF", "None"]);
    }

    #[test]
    fn test_display_round_trip() {
        for source in [
            "((1 + 2) * (3 - 4))",
            "(((8 / 2) / 2) - x)",
            "a = (b = 3)",
            "((y = 2) * 7)",
        ] {
            let first = parse(source).unwrap();
            let second = parse(&first.to_string()).unwrap();
            assert_eq!(first.to_string(), second.to_string());
            assert_eq!(render_tree(&first), render_tree(&second));
        }
    }
}
