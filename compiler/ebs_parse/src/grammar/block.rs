//! Named block declarations.
//!
//! ```text
//! name(param: type [= default], ...) [return type] { ... }
//! name return type { ... }
//! name { ... }
//! ```

use ebs_ir::{NamedBlock, Param, TokenKind, TypeSpec};

use crate::{ParseError, Parser};

/// Everything before a named block's body.
pub(crate) struct BlockHeader {
    pub(crate) name: String,
    pub(crate) params: Vec<Param>,
    pub(crate) return_type: Option<TypeSpec>,
    pub(crate) line: u32,
}

impl Parser<'_> {
    pub(crate) fn parse_named_block(&mut self) -> Result<NamedBlock, ParseError> {
        if self.block_depth > 0 {
            return Err(self.error("named blocks can only be declared at the top level"));
        }
        let header = self.parse_block_header()?;
        let body = self.parse_block()?;
        Ok(NamedBlock {
            name: header.name,
            params: header.params,
            return_type: header.return_type,
            body,
            line: header.line,
        })
    }

    /// Parse the header, leaving the cursor on the body's `{`.
    pub(crate) fn parse_block_header(&mut self) -> Result<BlockHeader, ParseError> {
        let line = self.current_line();
        let name = self.expect_ident("named block name")?;

        let mut params: Vec<Param> = Vec::new();
        if self.eat(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                let param_token = self.current();
                let param = self.parse_param()?;
                if params.iter().any(|p| p.name == param.name) {
                    return Err(ParseError::at(
                        param_token,
                        format!("duplicate parameter '{}'", param.name),
                    ));
                }
                params.push(param);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen, "')' after parameters")?;
        }

        let return_type = if self.eat(&TokenKind::Return) {
            Some(self.parse_type()?)
        } else {
            None
        };

        if !self.check(&TokenKind::LBrace) {
            return Err(self.error(format!("expected '{{' to start the body of '{name}'")));
        }
        Ok(BlockHeader {
            name,
            params,
            return_type,
            line,
        })
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let name = self.expect_ident("parameter name")?;
        self.expect(&TokenKind::Colon, "':' and a type after the parameter name")?;
        let ty = self.parse_type()?;
        let default = if self.eat(&TokenKind::Eq) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Param { name, ty, default })
    }
}
