//! Keyword resolution.
//!
//! Keywords are case-insensitive: the lexer folds every word to lowercase
//! before calling [`lookup`], and anything not found here is an identifier.
//! Lookup buckets by length first; every keyword is 2-10 characters.

use ebs_ir::{TokenKind, TypeKeyword};

/// Look up a lowercased word.
#[inline]
pub(crate) fn lookup(word: &str) -> Option<TokenKind> {
    let len = word.len();
    if !(2..=10).contains(&len) {
        return None;
    }

    match len {
        2 => match word {
            "do" => Some(TokenKind::Do),
            "if" => Some(TokenKind::If),
            "in" => Some(TokenKind::In),
            "or" => Some(TokenKind::OrOr),
            _ => None,
        },
        3 => match word {
            "and" => Some(TokenKind::AndAnd),
            "for" => Some(TokenKind::For),
            "int" => Some(TokenKind::Type(TypeKeyword::Int)),
            "let" | "var" => Some(TokenKind::Var),
            "map" => Some(TokenKind::Type(TypeKeyword::Map)),
            "try" => Some(TokenKind::Try),
            _ => None,
        },
        4 => match word {
            "bool" => Some(TokenKind::Type(TypeKeyword::Bool)),
            "byte" => Some(TokenKind::Type(TypeKeyword::Byte)),
            "call" => Some(TokenKind::Call),
            "date" => Some(TokenKind::Type(TypeKeyword::Date)),
            "else" => Some(TokenKind::Else),
            "exit" => Some(TokenKind::Break),
            "long" => Some(TokenKind::Type(TypeKeyword::Long)),
            "null" => Some(TokenKind::Null),
            "then" => Some(TokenKind::Then),
            "true" => Some(TokenKind::True),
            "when" => Some(TokenKind::When),
            _ => None,
        },
        5 => match word {
            "array" => Some(TokenKind::Type(TypeKeyword::Array)),
            "break" => Some(TokenKind::Break),
            "const" => Some(TokenKind::Const),
            "false" => Some(TokenKind::False),
            "float" => Some(TokenKind::Type(TypeKeyword::Float)),
            "print" => Some(TokenKind::Print),
            "raise" => Some(TokenKind::Raise),
            "while" => Some(TokenKind::While),
            _ => None,
        },
        6 => match word {
            "bitmap" => Some(TokenKind::Type(TypeKeyword::Bitmap)),
            "double" => Some(TokenKind::Type(TypeKeyword::Double)),
            "import" => Some(TokenKind::Import),
            "intmap" => Some(TokenKind::Type(TypeKeyword::Intmap)),
            "record" => Some(TokenKind::Type(TypeKeyword::Record)),
            "return" => Some(TokenKind::Return),
            "string" => Some(TokenKind::Type(TypeKeyword::String)),
            "typeof" => Some(TokenKind::Typeof),
            _ => None,
        },
        7 => match word {
            "boolean" => Some(TokenKind::Type(TypeKeyword::Bool)),
            "foreach" => Some(TokenKind::Foreach),
            "integer" => Some(TokenKind::Type(TypeKeyword::Int)),
            "typedef" => Some(TokenKind::Typedef),
            _ => None,
        },
        8 => match word {
            "continue" => Some(TokenKind::Continue),
            _ => None,
        },
        9 => match word {
            "exception" => Some(TokenKind::Exception),
            _ => None,
        },
        10 => match word {
            "exceptions" => Some(TokenKind::Exceptions),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aliases_share_a_kind() {
        assert_eq!(lookup("let"), lookup("var"));
        assert_eq!(lookup("exit"), lookup("break"));
        assert_eq!(lookup("integer"), Some(TokenKind::Type(TypeKeyword::Int)));
        assert_eq!(lookup("boolean"), Some(TokenKind::Type(TypeKeyword::Bool)));
        assert_eq!(lookup("and"), Some(TokenKind::AndAnd));
    }

    #[test]
    fn test_non_keywords() {
        assert_eq!(lookup("x"), None);
        assert_eq!(lookup("length"), None);
        assert_eq!(lookup("exceptional"), None);
        // Lookup expects folded input
        assert_eq!(lookup("WHILE"), None);
    }
}
