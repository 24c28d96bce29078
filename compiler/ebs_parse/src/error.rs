//! Parse error types.
//!
//! Parsing stops at the first error; there is no recovery. [`ParseError`]
//! carries the offending token's position and a description of what was
//! expected. [`SyntaxError`] is what the source-level entry points return,
//! covering both lexing and parsing failures.

use ebs_ir::{Span, Token};
use ebs_lexer::LexError;

/// A parse failure at a specific token.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}:{column}] Parse error at {found}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub span: Span,
    /// Description of the token the parser stopped at.
    pub found: String,
    pub message: String,
}

impl ParseError {
    /// Error positioned at `token`.
    #[cold]
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        ParseError {
            line: token.line,
            column: token.column,
            span: token.span,
            found: token.kind.describe(),
            message: message.into(),
        }
    }
}

/// Any compile-time failure: the source either did not lex or did not parse.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(err) => err.span,
            SyntaxError::Parse(err) => err.span,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            SyntaxError::Lex(err) => err.line,
            SyntaxError::Parse(err) => err.line,
        }
    }

    /// Short message without the position prefix, for diagnostic labels.
    pub fn label(&self) -> String {
        match self {
            SyntaxError::Lex(err) => err.kind.to_string(),
            SyntaxError::Parse(err) => err.message.clone(),
        }
    }
}
