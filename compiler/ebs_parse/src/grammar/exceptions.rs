//! Exception statements.
//!
//! ```text
//! try { ... } exceptions {
//!     when MATH_ERROR { ... }
//!     when BOOM(what, code) { ... }
//!     when ANY_ERROR(msg) { ... }
//! }
//! raise exception VALIDATION_ERROR("bad input");
//! raise exception Boom("a", 1, 2);
//! ```

use ebs_ir::{CatchKind, ExceptionKind, Handler, RaiseKind, StmtKind, TokenKind, ANY_ERROR};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `try` has been consumed.
    pub(crate) fn parse_try(&mut self) -> Result<StmtKind, ParseError> {
        let body = self.parse_block()?;
        self.expect(&TokenKind::Exceptions, "'exceptions' after the try block")?;
        self.expect(&TokenKind::LBrace, "'{' to start exception handlers")?;

        let mut handlers: Vec<Handler> = Vec::new();
        while self.check(&TokenKind::When) {
            let when = self.advance();
            let handler = self.parse_handler(when.line)?;
            if handlers.iter().any(|h| h.catch == CatchKind::Any) {
                tracing::warn!(
                    line = when.line,
                    "exception handler after ANY_ERROR can never run"
                );
            }
            handlers.push(handler);
        }
        self.expect(&TokenKind::RBrace, "'when' or '}' in exception handlers")?;

        if handlers.is_empty() {
            return Err(ParseError::at(
                self.cursor.previous(),
                "an 'exceptions' section needs at least one 'when' handler",
            ));
        }
        Ok(StmtKind::Try { body, handlers })
    }

    fn parse_handler(&mut self, line: u32) -> Result<Handler, ParseError> {
        let label_token = self.current();
        let label = self.expect_word("exception name after 'when'")?;
        let catch = CatchKind::from_label(&label);

        let mut captures: Vec<String> = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                captures.push(self.expect_ident("capture variable name")?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen, "')' after capture variables")?;
        }
        if captures.len() > 1 && !matches!(catch, CatchKind::Custom(_)) {
            return Err(ParseError::at(
                label_token,
                format!("'{}' handlers capture at most one variable", label.to_ascii_uppercase()),
            ));
        }

        let body = self.parse_block()?;
        Ok(Handler {
            catch,
            captures,
            body,
            line,
        })
    }

    /// `raise` has been consumed.
    pub(crate) fn parse_raise(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::Exception, "'exception' after 'raise'")?;
        let name_token = self.current();
        let name = self.expect_word("exception name")?;
        if name.eq_ignore_ascii_case(ANY_ERROR) {
            return Err(ParseError::at(name_token, "ANY_ERROR cannot be raised"));
        }

        let mut args = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen, "')' after exception arguments")?;
        }
        self.expect(&TokenKind::Semicolon, "';' after raise")?;

        let kind = match ExceptionKind::from_name(&name) {
            Some(kind) => {
                if args.len() > 1 {
                    return Err(ParseError::at(
                        name_token,
                        format!("{} takes at most one message argument", kind.name()),
                    ));
                }
                RaiseKind::Standard(kind)
            }
            // keep the spelling from the source for messages
            None => RaiseKind::Custom(name_token.lexeme(self.source).to_string()),
        };
        Ok(StmtKind::Raise { kind, args })
    }
}
