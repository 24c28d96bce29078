//! Lexer error types.

use ebs_ir::Span;

/// A lexing failure. Lexing stops at the first error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}:{column}] Lex error: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub line: u32,
    pub column: u32,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid escape sequence '\\{0}' in string literal")]
    InvalidEscape(String),
    #[error("integer literal '{0}' is too large")]
    IntegerOverflow(String),
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
}
