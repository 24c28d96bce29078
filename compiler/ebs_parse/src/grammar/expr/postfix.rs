//! Postfix expressions: `x[i]`, `x[i, j]`, `x.field`, `x.length`, `x.size`.

use ebs_ir::{Expr, ExprKind, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let line = expr.line;
            match self.current_kind() {
                TokenKind::LBracket => {
                    self.advance();
                    let indices = self.parse_index_list()?;
                    expr = Expr::new(
                        ExprKind::Index {
                            target: Box::new(expr),
                            indices,
                        },
                        line,
                    );
                }
                TokenKind::Dot => {
                    self.advance();
                    let name = self.expect_word("property name after '.'")?;
                    let kind = if matches!(name.as_str(), "length" | "size") {
                        ExprKind::Length {
                            operand: Box::new(expr),
                            name,
                        }
                    } else {
                        ExprKind::Property {
                            target: Box::new(expr),
                            name,
                        }
                    };
                    expr = Expr::new(kind, line);
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Index expressions after `[`, through the closing `]`.
    pub(crate) fn parse_index_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut indices = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            indices.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RBracket, "']' after index")?;
        Ok(indices)
    }
}
