//! Named block hoisting.
//!
//! Before any statement is parsed, the token list is scanned at brace depth
//! zero for named block headers. Each header is parsed for its parameter
//! list and the body is skipped by bracket matching. The resulting table
//! lets the main pass check calls to blocks declared later in the file.

use ebs_ir::TokenKind;
use rustc_hash::FxHashMap;

use crate::{ParseError, Parser};

/// Parameter names of a named block, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Signature {
    /// `(name, has_default)` for each parameter.
    pub(crate) params: Vec<(String, bool)>,
}

impl Signature {
    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|(param, _)| param == name)
    }
}

impl Parser<'_> {
    /// First pass: collect every top-level named block signature.
    pub(crate) fn collect_signatures(&mut self) -> Result<FxHashMap<String, Signature>, ParseError> {
        let tokens = self.cursor.tokens();
        let mut found: FxHashMap<String, Signature> = FxHashMap::default();
        let mut depth = 0usize;
        let mut at_statement_start = true;
        let mut i = 0;

        while i < tokens.len() {
            if depth == 0 && at_statement_start {
                if self.is_opaque_at(i) {
                    i = self.statement_end(i) + 1;
                    continue;
                }
                if self.is_declaration_at(i) {
                    self.cursor.set_position(i);
                    let header = self.parse_block_header()?;
                    if found.contains_key(&header.name) {
                        return Err(ParseError::at(
                            &tokens[i],
                            format!("named block '{}' is already declared", header.name),
                        ));
                    }
                    let params = header
                        .params
                        .iter()
                        .map(|p| (p.name.clone(), p.default.is_some()))
                        .collect();
                    found.insert(header.name, Signature { params });

                    let open = self.cursor.position();
                    match self.matching_close(open) {
                        Some(close) => i = close + 1,
                        None => return Err(self.error("unclosed named block body")),
                    }
                    continue;
                }
            }

            let kind = &tokens[i].kind;
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            at_statement_start =
                depth == 0 && matches!(kind, TokenKind::Semicolon | TokenKind::RBrace);
            i += 1;
        }

        self.cursor.set_position(0);
        tracing::trace!(count = found.len(), "hoisted named blocks");
        Ok(found)
    }

    /// Whether the current token starts a named block declaration.
    pub(crate) fn at_declaration(&self) -> bool {
        self.is_declaration_at(self.cursor.position())
    }

    /// `name {`, `name return`, or `name ( ... )` followed by `return`/`{`.
    fn is_declaration_at(&self, i: usize) -> bool {
        let tokens = self.cursor.tokens();
        let Some(TokenKind::Ident(name)) = tokens.get(i).map(|t| &t.kind) else {
            return false;
        };
        if self.options.is_opaque_keyword(name) {
            return false;
        }
        match tokens.get(i + 1).map(|t| &t.kind) {
            Some(TokenKind::LBrace | TokenKind::Return) => true,
            Some(TokenKind::LParen) => self.matching_close(i + 1).is_some_and(|close| {
                matches!(
                    tokens.get(close + 1).map(|t| &t.kind),
                    Some(TokenKind::LBrace | TokenKind::Return)
                )
            }),
            _ => false,
        }
    }

    /// Whether token `i` is a host-registered opaque statement keyword.
    pub(crate) fn is_opaque_at(&self, i: usize) -> bool {
        matches!(
            self.cursor.tokens().get(i).map(|t| &t.kind),
            Some(TokenKind::Ident(word)) if self.options.is_opaque_keyword(word)
        )
    }

    /// Index of the bracket closing the one at `open`.
    pub(crate) fn matching_close(&self, open: usize) -> Option<usize> {
        let tokens = self.cursor.tokens();
        let mut depth = 0usize;
        for (offset, token) in tokens.get(open..)?.iter().enumerate() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(open + offset);
                    }
                }
                TokenKind::Eof => return None,
                _ => {}
            }
        }
        None
    }

    /// Index of the `;` ending the statement that starts at `start`
    /// (bracket depth zero), or of `Eof`.
    pub(crate) fn statement_end(&self, start: usize) -> usize {
        let tokens = self.cursor.tokens();
        let mut depth = 0usize;
        for (offset, token) in tokens[start..].iter().enumerate() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                }
                TokenKind::Semicolon if depth == 0 => return start + offset,
                TokenKind::Eof => return start + offset,
                _ => {}
            }
        }
        tokens.len() - 1
    }
}
