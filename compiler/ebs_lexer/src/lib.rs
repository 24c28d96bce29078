//! Lexer for EBS scripts using logos.
//!
//! [`tokenize`] makes a single left-to-right pass and returns the fully
//! materialized token list (the parser backtracks over it), always ending
//! with `Eof`. Words are folded to lowercase, so keywords and identifiers
//! are case-insensitive. Comments and whitespace are dropped.

mod escape;
mod keywords;
mod lex_error;
mod raw_token;

use ebs_ir::{Date, LineIndex, Span, Token, TokenKind};
use logos::Logos;

pub use lex_error::{LexError, LexErrorKind};
use raw_token::RawToken;

/// Tokenize `source`, failing on the first illegal character, malformed
/// literal or unterminated string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::with_capacity(source.len() / 4);
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let slice = lexer.slice();
        let span = Span::from_range(range.clone());
        let (line, column) = index.line_col(range.start);
        let fail = |kind| LexError {
            kind,
            span,
            line,
            column,
        };

        let Ok(raw) = result else {
            let ch = slice.chars().next().unwrap_or('\0');
            return Err(fail(LexErrorKind::UnexpectedChar(ch)));
        };

        let kind = match raw {
            RawToken::LineComment => continue,
            RawToken::Word => {
                let word = slice.to_ascii_lowercase();
                keywords::lookup(&word).unwrap_or(TokenKind::Ident(word))
            }
            RawToken::Integer => lex_integer(slice).ok_or_else(|| {
                fail(LexErrorKind::IntegerOverflow(slice.to_string()))
            })?,
            RawToken::LongSuffixed => without_suffix(slice)
                .parse::<i64>()
                .map(TokenKind::Long)
                .map_err(|_| fail(LexErrorKind::IntegerOverflow(slice.to_string())))?,
            RawToken::Decimal => slice
                .parse::<f64>()
                .map(TokenKind::Double)
                .map_err(|_| fail(LexErrorKind::InvalidNumber(slice.to_string())))?,
            RawToken::FloatSuffixed => without_suffix(slice)
                .parse::<f32>()
                .map(TokenKind::Float)
                .map_err(|_| fail(LexErrorKind::InvalidNumber(slice.to_string())))?,
            RawToken::DoubleSuffixed => without_suffix(slice)
                .parse::<f64>()
                .map(TokenKind::Double)
                .map_err(|_| fail(LexErrorKind::InvalidNumber(slice.to_string())))?,
            RawToken::DoubleQuoted | RawToken::SingleQuoted => {
                let body = &slice[1..slice.len() - 1];
                match escape::unescape(body) {
                    Ok(text) => string_or_date(text),
                    Err((escape, offset)) => {
                        let (line, column) = index.line_col(range.start + 1 + offset);
                        return Err(LexError {
                            kind: LexErrorKind::InvalidEscape(escape),
                            span,
                            line,
                            column,
                        });
                    }
                }
            }
            RawToken::UnterminatedDoubleQuoted | RawToken::UnterminatedSingleQuoted => {
                return Err(fail(LexErrorKind::UnterminatedString));
            }
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Hash => TokenKind::Hash,
            RawToken::Eq => TokenKind::Eq,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Bang => TokenKind::Bang,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Caret => TokenKind::Caret,
            RawToken::AndAnd => TokenKind::AndAnd,
            RawToken::OrOr => TokenKind::OrOr,
            RawToken::PlusPlus => TokenKind::PlusPlus,
            RawToken::MinusMinus => TokenKind::MinusMinus,
            RawToken::PlusEq => TokenKind::PlusEq,
            RawToken::MinusEq => TokenKind::MinusEq,
            RawToken::StarEq => TokenKind::StarEq,
            RawToken::SlashEq => TokenKind::SlashEq,
        };
        tokens.push(Token::new(kind, span, line, column));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    let (line, column) = index.line_col(source.len());
    tokens.push(Token::new(TokenKind::Eof, Span::point(end), line, column));

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

/// Plain digits are `int` unless they overflow it, then `long`.
fn lex_integer(slice: &str) -> Option<TokenKind> {
    if let Ok(value) = slice.parse::<i32>() {
        return Some(TokenKind::Int(value));
    }
    slice.parse::<i64>().ok().map(TokenKind::Long)
}

fn without_suffix(slice: &str) -> &str {
    &slice[..slice.len() - 1]
}

fn string_or_date(text: String) -> TokenKind {
    match Date::parse(&text) {
        Some(date) => TokenKind::Date(date),
        None => TokenKind::Str(text),
    }
}

#[cfg(test)]
mod tests;
