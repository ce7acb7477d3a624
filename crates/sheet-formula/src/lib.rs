//! A small arithmetic formula language: numeric literals, cell references,
//! `+ - * /`, unary minus, and parentheses. No functions, ranges, strings
//! or comparisons — this grammar only needs to feed `sheet-engine`'s
//! numeric `Value` model.

mod ast;
mod error;
mod eval;
mod lexer;
mod parser;
mod position;
mod token;

pub use error::{ErrorKind, ParseError};
pub use position::{Position, Size, MAX_COLS, MAX_ROWS};

use ast::Expr;
use parser::Parser;

/// A parsed formula, ready to be evaluated or re-serialised.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    expr: Expr,
    refs: Vec<Position>,
}

impl Formula {
    /// Parses `text` (the part after a leading `=`). Never partially
    /// constructs a `Formula` on failure.
    pub fn parse(text: &str) -> Result<Formula, ParseError> {
        let expr = Parser::new(text).parse()?;
        let mut refs = Vec::new();
        collect_refs(&expr, &mut refs);
        Ok(Formula { expr, refs })
    }

    /// Evaluates the formula, resolving each referenced position through
    /// `resolve`. Left operands are evaluated before right ones; the
    /// first error encountered wins.
    pub fn evaluate(
        &self,
        resolve: &mut dyn FnMut(Position) -> Result<f64, ErrorKind>,
    ) -> Result<f64, ErrorKind> {
        eval::evaluate(&self.expr, resolve)
    }

    /// Positions referenced by this formula, deduplicated in first-
    /// encounter order (left to right, outer to inner).
    pub fn referenced_cells(&self) -> &[Position] {
        &self.refs
    }

    /// Canonical re-serialisation of the expression, without the leading
    /// `=` (callers that need the full cell text prepend it themselves).
    pub fn expression(&self) -> String {
        self.expr.to_string()
    }
}

fn collect_refs(expr: &Expr, out: &mut Vec<Position>) {
    match expr {
        Expr::Number(_) => {}
        Expr::Ref(pos) => {
            if !out.contains(pos) {
                out.push(*pos);
            }
        }
        Expr::Neg(inner) => collect_refs(inner, out),
        Expr::Add(l, r) | Expr::Sub(l, r) | Expr::Mul(l, r) | Expr::Div(l, r) => {
            collect_refs(l, out);
            collect_refs(r, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_cells_are_deduplicated_in_order() {
        let f = Formula::parse("B2+A1+B2").unwrap();
        assert_eq!(
            f.referenced_cells(),
            &[Position::new(1, 1), Position::new(0, 0)]
        );
    }

    #[test]
    fn expression_round_trips_through_reparse() {
        let f = Formula::parse("1+2*(3-4)").unwrap();
        let reparsed = Formula::parse(&f.expression()).unwrap();
        assert_eq!(f, reparsed);
    }

    #[test]
    fn expression_omits_redundant_parens() {
        let f = Formula::parse("1+2+3").unwrap();
        assert_eq!(f.expression(), "1+2+3");
    }

    #[test]
    fn expression_keeps_needed_parens_on_right_of_subtraction() {
        let f = Formula::parse("1-(2-3)").unwrap();
        assert_eq!(f.expression(), "1-(2-3)");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Formula::parse("1 +").is_err());
        assert!(Formula::parse("").is_err());
    }
}
