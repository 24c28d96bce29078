//! Expression parsing.
//!
//! Precedence, lowest to highest:
//!
//! | Level          | Operators                        | Associativity |
//! |----------------|----------------------------------|---------------|
//! | or             | `or` `\|\|`                      | left          |
//! | and            | `and` `&&`                       | left          |
//! | comparison     | `==` `!=` `<` `<=` `>` `>=`      | chained       |
//! | additive       | `+` `-`                          | left          |
//! | multiplicative | `*` `/` `%`                      | left          |
//! | power          | `^`                              | right         |
//! | unary          | `-` `+` `!` `typeof`             | prefix        |
//! | postfix        | `[i, j]` `.name` `.length`       | left          |
//!
//! A comparison chain `a < b <= c` becomes one `Compare` node so that the
//! evaluator computes `b` once.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point and the binary precedence chain
//! - `operators.rs`: operator matching helpers
//! - `primary.rs`: literals, variables, calls, casts, array/record literals
//! - `postfix.rs`: index, property and length access

mod operators;
mod postfix;
mod primary;

use ebs_ir::{BinaryOp, Expr, ExprKind, TokenKind};
use ebs_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_binary_or())
    }

    fn parse_binary_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.parse_binary_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_binary_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_additive()?;
        let mut rest = Vec::new();
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            rest.push((op, self.parse_additive()?));
        }

        if rest.len() > 1 {
            let line = first.line;
            return Ok(Expr::new(
                ExprKind::Compare {
                    first: Box::new(first),
                    rest,
                },
                line,
            ));
        }
        Ok(match rest.pop() {
            Some((op, right)) => binary(op, first, right),
            None => first,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_power()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `^` is right-associative: `2 ^ 3 ^ 2` is `2 ^ 9`.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = ensure_sufficient_stack(|| self.parse_power())?;
            return Ok(binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let line = self.current_line();
        if let Some(op) = self.match_unary_op() {
            self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                line,
            ));
        }
        if self.eat(&TokenKind::Typeof) {
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            return Ok(Expr::new(ExprKind::TypeOf(Box::new(operand)), line));
        }
        self.parse_postfix()
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    let line = left.line;
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        line,
    )
}
