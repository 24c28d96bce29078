//! Call arguments.
//!
//! Arguments are positional or named (`param = expr`); positional arguments
//! come first. Calls to a named block known from the hoisting pass are
//! checked here, so a wrong argument list never reaches the evaluator.

use ebs_ir::{Arg, Call, Token, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse `( args )` for a call to `name`; the cursor is on `(`.
    ///
    /// `name_token` positions any signature mismatch error.
    pub(crate) fn parse_call_args(
        &mut self,
        name: String,
        name_token: &Token,
    ) -> Result<Call, ParseError> {
        self.expect(&TokenKind::LParen, "'(' to start call arguments")?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let arg_name = match (self.current_kind(), self.peek_kind(1)) {
                (TokenKind::Ident(param), TokenKind::Eq) => {
                    let param = param.clone();
                    self.advance();
                    self.advance();
                    Some(param)
                }
                _ => None,
            };
            let value = self.parse_expr()?;
            args.push(Arg {
                name: arg_name,
                value,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, "')' to close call arguments")?;

        self.check_call(&name, &args, name_token)?;
        Ok(Call { name, args })
    }

    pub(crate) fn check_call(
        &self,
        name: &str,
        args: &[Arg],
        token: &Token,
    ) -> Result<(), ParseError> {
        let Some(signature) = self.signatures.get(name) else {
            return Ok(());
        };

        let mut filled = vec![false; signature.params.len()];
        let mut positional = 0usize;
        let mut seen_named = false;
        for arg in args {
            let slot = match &arg.name {
                None => {
                    if seen_named {
                        return Err(ParseError::at(
                            token,
                            format!("positional argument after a named argument in call to '{name}'"),
                        ));
                    }
                    positional += 1;
                    if positional > signature.params.len() {
                        return Err(ParseError::at(
                            token,
                            format!(
                                "too many arguments: '{name}' takes {} but {} were given",
                                signature.params.len(),
                                args.len()
                            ),
                        ));
                    }
                    positional - 1
                }
                Some(param) => {
                    seen_named = true;
                    signature.position(param).ok_or_else(|| {
                        ParseError::at(token, format!("'{name}' has no parameter named '{param}'"))
                    })?
                }
            };
            if filled[slot] {
                return Err(ParseError::at(
                    token,
                    format!(
                        "parameter '{}' of '{name}' is given more than once",
                        signature.params[slot].0
                    ),
                ));
            }
            filled[slot] = true;
        }

        let missing = signature
            .params
            .iter()
            .zip(&filled)
            .find(|((_, has_default), filled)| !**filled && !has_default);
        if let Some(((param, _), _)) = missing {
            return Err(ParseError::at(
                token,
                format!("missing argument for parameter '{param}' of '{name}'"),
            ));
        }
        Ok(())
    }
}
