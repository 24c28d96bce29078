//! Token cursor for navigating the token stream.
//!
//! The token list always ends with `Eof`, so the cursor never runs past it:
//! advancing at `Eof` stays at `Eof`.

use ebs_ir::{Token, TokenKind};

/// Position within a lexed token list.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `tokens`.
    ///
    /// `tokens` must be non-empty and end with `Eof`, as produced by
    /// `ebs_lexer::tokenize`.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof),
            "token list must end with Eof"
        );
        Cursor { tokens, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Jump to a previously saved position.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len() - 1);
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    /// Token `n` positions ahead (0 is the current token), clamped to `Eof`.
    #[inline]
    pub fn peek(&self, n: usize) -> &'a Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Kind of the token `n` positions ahead.
    #[inline]
    pub fn peek_kind(&self, n: usize) -> &'a TokenKind {
        &self.peek(n).kind
    }

    /// The most recently consumed token (the current one at the start).
    #[inline]
    pub fn previous(&self) -> &'a Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        tracing::trace!(pos = self.pos, token = %token.kind, "advance");
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// All tokens, for lookahead scans that need random access.
    #[inline]
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }
}
