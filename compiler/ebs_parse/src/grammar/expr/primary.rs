//! Primary expressions.
//!
//! Literals, variables, grouping, calls (`f(x)`, `ns.fn(x)`, `call f(x)`,
//! `#f(x)`), casts (`int(x)`), array literals (`[a, b]` or `{a, b}`) and
//! record literals (`{ name: value, ... }`).

use ebs_ir::{CastTarget, Expr, ExprKind, Literal, TokenKind, TypeKeyword};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.current();
        let line = token.line;
        let kind = match &token.kind {
            TokenKind::Int(v) => literal(self, Literal::Int(*v)),
            TokenKind::Long(v) => literal(self, Literal::Long(*v)),
            TokenKind::Float(v) => literal(self, Literal::Float(*v)),
            TokenKind::Double(v) => literal(self, Literal::Double(*v)),
            TokenKind::Str(s) => literal(self, Literal::Str(s.clone())),
            TokenKind::Date(d) => literal(self, Literal::Date(*d)),
            TokenKind::True => literal(self, Literal::Bool(true)),
            TokenKind::False => literal(self, Literal::Bool(false)),
            TokenKind::Null => literal(self, Literal::Null),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "')' to close the parenthesized expression")?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.advance();
                ExprKind::Array(self.parse_expr_list(&TokenKind::RBracket, "']'")?)
            }
            TokenKind::LBrace => self.parse_brace_literal()?,
            TokenKind::Type(_) if self.peek_kind(1) == &TokenKind::Dot => {
                self.parse_identifier()?
            }
            TokenKind::Type(keyword) => self.parse_cast(*keyword)?,
            TokenKind::Call | TokenKind::Hash => {
                self.advance();
                ExprKind::Call(self.parse_call_statement()?)
            }
            TokenKind::Ident(_) => self.parse_identifier()?,
            _ => return Err(self.error("expected an expression")),
        };
        Ok(Expr::new(kind, line))
    }

    /// Variable reference, `name(args)`, or `ns.name(args)` where `ns` may
    /// be a type keyword (`array.sort(xs)`).
    fn parse_identifier(&mut self) -> Result<ExprKind, ParseError> {
        // Dotted call lookahead: ident (. word)* (
        let mut k = 1;
        while self.peek_kind(k) == &TokenKind::Dot && self.peek_kind(k + 1).word().is_some() {
            k += 2;
        }
        let name_token = self.current();
        if self.peek_kind(k) != &TokenKind::LParen {
            let name = self.expect_ident("variable name")?;
            return Ok(ExprKind::Variable(name));
        }

        let name = self.expect_call_name("block name")?;
        Ok(ExprKind::Call(self.parse_call_args(name, name_token)?))
    }

    /// `type(expr)`.
    fn parse_cast(&mut self, keyword: TypeKeyword) -> Result<ExprKind, ParseError> {
        let target = match keyword {
            TypeKeyword::Byte => CastTarget::Byte,
            TypeKeyword::Int => CastTarget::Int,
            TypeKeyword::Long => CastTarget::Long,
            TypeKeyword::Float => CastTarget::Float,
            TypeKeyword::Double => CastTarget::Double,
            TypeKeyword::String => CastTarget::String,
            TypeKeyword::Bool => CastTarget::Bool,
            TypeKeyword::Date => CastTarget::Date,
            TypeKeyword::Record => CastTarget::Record,
            TypeKeyword::Map => CastTarget::Map,
            TypeKeyword::Array | TypeKeyword::Bitmap | TypeKeyword::Intmap => {
                return Err(self.error(format!("cannot cast to '{}'", keyword.as_str())));
            }
        };
        self.advance();
        self.expect(
            &TokenKind::LParen,
            &format!("'(' after '{}' to form a cast", keyword.as_str()),
        )?;
        let operand = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "')' to close the cast")?;
        Ok(ExprKind::Cast {
            target,
            operand: Box::new(operand),
        })
    }

    /// `{ key: value, ... }` record, `{ a, b }` array, or `{}` empty record.
    fn parse_brace_literal(&mut self) -> Result<ExprKind, ParseError> {
        let is_record = self.peek_kind(1) == &TokenKind::RBrace
            || (self.peek_kind(2) == &TokenKind::Colon
                && (self.peek_kind(1).word().is_some()
                    || matches!(self.peek_kind(1), TokenKind::Str(_))));
        self.advance();
        if !is_record {
            return Ok(ExprKind::Array(self.parse_expr_list(&TokenKind::RBrace, "'}'")?));
        }

        let mut fields: Vec<(String, Expr)> = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            let key_token = self.current();
            let key = match &key_token.kind {
                TokenKind::Str(s) => {
                    self.advance();
                    s.clone()
                }
                _ => self.expect_word("record field name")?,
            };
            if fields.iter().any(|(name, _)| *name == key) {
                return Err(self.error(format!("duplicate record field '{key}'")));
            }
            self.expect(&TokenKind::Colon, "':' after the field name")?;
            fields.push((key, self.parse_expr()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}' to close the record")?;
        Ok(ExprKind::Record(fields))
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_expr_list(
        &mut self,
        close: &TokenKind,
        what: &str,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(close, &format!("{what} to close the list"))?;
        Ok(items)
    }
}

fn literal(parser: &mut Parser<'_>, value: Literal) -> ExprKind {
    parser.advance();
    ExprKind::Literal(value)
}
