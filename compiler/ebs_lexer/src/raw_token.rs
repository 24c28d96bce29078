//! Raw token shapes recognized by logos.
//!
//! Values are not computed here; [`crate::tokenize`] converts each raw
//! token into a `TokenKind` from its slice so that number overflow and bad
//! escapes become proper `LexError`s instead of opaque logos errors.

use logos::Logos;

#[derive(Logos, Copy, Clone, Debug, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    // === Numbers ===
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"[0-9]+[lL]")]
    LongSuffixed,
    #[regex(r"[0-9]+\.[0-9]+")]
    Decimal,
    #[regex(r"[0-9]+(\.[0-9]+)?[fF]")]
    FloatSuffixed,
    #[regex(r"[0-9]+(\.[0-9]+)?[dD]")]
    DoubleSuffixed,

    // === Strings ===
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,
    #[regex(r#""([^"\\]|\\.)*"#)]
    UnterminatedDoubleQuoted,
    #[regex(r"'([^'\\]|\\.)*")]
    UnterminatedSingleQuoted,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("#")]
    Hash,

    // === Operators ===
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("!")]
    Bang,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    #[token("=<")]
    LtEq,
    #[token(">=")]
    #[token("=>")]
    GtEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
}
