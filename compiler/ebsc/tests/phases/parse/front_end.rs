use ebs_ir::{StmtKind, TokenKind};
use ebs_parse::{ParseOptions, SyntaxError};
use proptest::prelude::*;

use crate::common::parse_ok;

proptest! {
    #[test]
    fn prop_parser_never_panics(source in "\\PC{0,80}") {
        let _ = ebs_parse::parse("fuzz", &source);
    }

    #[test]
    fn prop_parse_tokens_agrees_with_parse(names in prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..6)) {
        let source: String = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("var v_{name} = {i};\n"))
            .collect();
        let tokens = ebs_lexer::tokenize(&source).unwrap();
        let from_tokens =
            ebs_parse::parse_tokens("test", &source, &tokens, &ParseOptions::default()).unwrap();
        prop_assert_eq!(from_tokens, parse_ok(&source));
    }

    #[test]
    fn prop_statement_lines_follow_source(count in 1usize..20) {
        let source: String = (0..count).map(|i| format!("print {i};\n")).collect();
        let program = parse_ok(&source);
        let lines: Vec<u32> = program.statements.iter().map(|s| s.line).collect();
        let expected: Vec<u32> = (1..).take(count).collect();
        prop_assert_eq!(lines, expected);
    }
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let err = ebs_parse::parse("test", "var a = 1;\nvar b = $;").unwrap_err();
    assert!(matches!(err, SyntaxError::Lex(_)));
    assert_eq!(err.line(), 2);
}

#[test]
fn test_keywords_lex_before_parse() {
    let tokens = ebs_lexer::tokenize("WHILE x { EXIT; }").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::While);
    let program = parse_ok("WHILE x { EXIT; }");
    assert!(matches!(program.statements[0].kind, StmtKind::While { .. }));
}
