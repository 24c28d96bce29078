//! Token types produced by the lexer.

use std::fmt;

use crate::{Date, Span};

/// A lexed token.
///
/// The lexeme is not stored; use [`Token::lexeme`] with the original source.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, line: u32, column: u32) -> Self {
        Token {
            kind,
            span,
            line,
            column,
        }
    }

    /// Source text of this token.
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

/// Built-in type names usable in declarations, casts and `typedef`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKeyword {
    Byte,
    Int,
    Long,
    Float,
    Double,
    String,
    Bool,
    Date,
    Array,
    Record,
    Map,
    Bitmap,
    Intmap,
}

impl TypeKeyword {
    /// Canonical lowercase spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKeyword::Byte => "byte",
            TypeKeyword::Int => "int",
            TypeKeyword::Long => "long",
            TypeKeyword::Float => "float",
            TypeKeyword::Double => "double",
            TypeKeyword::String => "string",
            TypeKeyword::Bool => "bool",
            TypeKeyword::Date => "date",
            TypeKeyword::Array => "array",
            TypeKeyword::Record => "record",
            TypeKeyword::Map => "map",
            TypeKeyword::Bitmap => "bitmap",
            TypeKeyword::Intmap => "intmap",
        }
    }
}

/// Token kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Date(Date),
    /// Identifier, already folded to lowercase.
    Ident(String),

    // Keywords
    Var,
    Const,
    Print,
    Call,
    Return,
    If,
    Then,
    Else,
    While,
    Do,
    For,
    Foreach,
    In,
    Break,
    Continue,
    Try,
    Exceptions,
    When,
    Raise,
    Exception,
    Import,
    Typedef,
    Typeof,
    True,
    False,
    Null,
    Type(TypeKeyword),

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Hash,

    // Operators
    Eq,
    EqEq,
    NotEq,
    Bang,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    AndAnd,
    OrOr,
    PlusPlus,
    MinusMinus,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    Eof,
}

impl TokenKind {
    /// Keyword spelling for keyword-like tokens.
    ///
    /// Record field names, property names and handler labels may reuse
    /// keyword spellings (`{ date: ... }`, `x.size`), so the parser accepts
    /// any token for which this returns `Some` in name position.
    pub fn word(&self) -> Option<&str> {
        Some(match self {
            TokenKind::Ident(name) => name.as_str(),
            TokenKind::Var => "var",
            TokenKind::Const => "const",
            TokenKind::Print => "print",
            TokenKind::Call => "call",
            TokenKind::Return => "return",
            TokenKind::If => "if",
            TokenKind::Then => "then",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::For => "for",
            TokenKind::Foreach => "foreach",
            TokenKind::In => "in",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Try => "try",
            TokenKind::Exceptions => "exceptions",
            TokenKind::When => "when",
            TokenKind::Raise => "raise",
            TokenKind::Exception => "exception",
            TokenKind::Import => "import",
            TokenKind::Typedef => "typedef",
            TokenKind::Typeof => "typeof",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Null => "null",
            TokenKind::Type(kw) => kw.as_str(),
            _ => return None,
        })
    }

    /// Human-readable description used in parse errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Int(v) => format!("integer {v}"),
            TokenKind::Long(v) => format!("long {v}"),
            TokenKind::Float(v) => format!("float {v}"),
            TokenKind::Double(v) => format!("double {v}"),
            TokenKind::Str(s) => format!("string \"{s}\""),
            TokenKind::Date(d) => format!("date \"{d}\""),
            TokenKind::Ident(name) => format!("identifier '{name}'"),
            TokenKind::Eof => "end of file".to_string(),
            other => match other.word() {
                Some(word) => format!("'{word}'"),
                None => format!("'{other}'"),
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Hash => "#",
            TokenKind::Eq => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Bang => "!",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::Eof => "<eof>",
            other => {
                return match other.word() {
                    Some(word) => f.write_str(word),
                    None => write!(f, "{}", other.describe()),
                }
            }
        };
        f.write_str(text)
    }
}
