#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use ebs_ir::TypeKeyword;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_declaration() {
    assert_eq!(
        kinds("var x: int = 42;"),
        vec![
            TokenKind::Var,
            TokenKind::Ident("x".to_string()),
            TokenKind::Colon,
            TokenKind::Type(TypeKeyword::Int),
            TokenKind::Eq,
            TokenKind::Int(42),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers_are_case_insensitive() {
    assert_eq!(
        kinds("WHILE While MyVar"),
        vec![
            TokenKind::While,
            TokenKind::While,
            TokenKind::Ident("myvar".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_numeric_literal_kinds() {
    assert_eq!(
        kinds("7 7L 7l 2.5 2.5f 3F 4d 1.25D"),
        vec![
            TokenKind::Int(7),
            TokenKind::Long(7),
            TokenKind::Long(7),
            TokenKind::Double(2.5),
            TokenKind::Float(2.5),
            TokenKind::Float(3.0),
            TokenKind::Double(4.0),
            TokenKind::Double(1.25),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_int_literal_promotes_to_long_on_overflow() {
    assert_eq!(
        kinds("2147483647 2147483648"),
        vec![
            TokenKind::Int(i32::MAX),
            TokenKind::Long(2_147_483_648),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_integer_too_large_for_long() {
    let err = tokenize("var x = 99999999999999999999;").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::IntegerOverflow("99999999999999999999".to_string())
    );
    assert_eq!((err.line, err.column), (1, 9));
}

#[test]
fn test_both_quote_styles_and_escapes() {
    assert_eq!(
        kinds(r#""a\tb" 'it\'s'"#),
        vec![
            TokenKind::Str("a\tb".to_string()),
            TokenKind::Str("it's".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_date_literal() {
    let tokens = kinds(r#""2024-01-15" "2024-01-15 10:30:00" "2024-13-01""#);
    assert!(matches!(tokens[0], TokenKind::Date(d) if d.to_string() == "2024-01-15"));
    assert!(matches!(tokens[1], TokenKind::Date(d) if d.time == Some((10, 30, 0))));
    assert_eq!(tokens[2], TokenKind::Str("2024-13-01".to_string()));
}

#[test]
fn test_comments_are_dropped() {
    assert_eq!(
        kinds("print 1; // trailing comment\n// full line\nprint 2;"),
        vec![
            TokenKind::Print,
            TokenKind::Int(1),
            TokenKind::Semicolon,
            TokenKind::Print,
            TokenKind::Int(2),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operator_spellings() {
    assert_eq!(
        kinds("a => b =< c and d or e != f"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::GtEq,
            TokenKind::Ident("b".to_string()),
            TokenKind::LtEq,
            TokenKind::Ident("c".to_string()),
            TokenKind::AndAnd,
            TokenKind::Ident("d".to_string()),
            TokenKind::OrOr,
            TokenKind::Ident("e".to_string()),
            TokenKind::NotEq,
            TokenKind::Ident("f".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_compound_assignment_operators() {
    assert_eq!(
        kinds("x += 1; y++; z -= 2; w /= 3; v *= 4; u--;")
            .into_iter()
            .filter(|k| !matches!(k, TokenKind::Ident(_) | TokenKind::Int(_) | TokenKind::Semicolon))
            .collect::<Vec<_>>(),
        vec![
            TokenKind::PlusEq,
            TokenKind::PlusPlus,
            TokenKind::MinusEq,
            TokenKind::SlashEq,
            TokenKind::StarEq,
            TokenKind::MinusMinus,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_positions_are_one_based() {
    let tokens = tokenize("var a = 1;\n  print a;").unwrap();
    let print = tokens.iter().find(|t| t.kind == TokenKind::Print).unwrap();
    assert_eq!((print.line, print.column), (2, 3));
    assert_eq!(print.lexeme("var a = 1;\n  print a;"), "print");
}

#[test]
fn test_unterminated_string() {
    let err = tokenize("print \"oops;\nprint 1;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!((err.line, err.column), (1, 7));
}

#[test]
fn test_illegal_character() {
    let err = tokenize("var x = 1;\nvar y = @;").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnexpectedChar('@'));
    assert_eq!((err.line, err.column), (2, 9));
    assert_eq!(err.to_string(), "[line 2:9] Lex error: unexpected character '@'");
}

#[test]
fn test_invalid_escape_points_at_escape() {
    let err = tokenize(r#"print "ab\q";"#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidEscape("q".to_string()));
    assert_eq!(err.column, 10);
}

#[test]
fn test_empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    assert_eq!(kinds("   // nothing\n"), vec![TokenKind::Eof]);
}
