use std::fs;
use std::path::Path;
use std::sync::Arc;

use ebs_eval::buffer_handler;
use ebsc::commands::{compile_file, exec_file, lex_file, parse_file, run_file};
use ebsc::{DriverError, RunOptions};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path.to_string_lossy().into_owned()
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_run_resolves_imports_next_to_script() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("lib")).unwrap();
    write(
        &dir,
        "lib/util.ebs",
        "shout(s: string) return string { return str.toupper(s) + \"!\"; }",
    );
    let main = write(&dir, "main.ebs", "import \"lib/util.ebs\";\nprint shout(\"hi\");");

    let output = buffer_handler();
    let result = run_file(&main, &RunOptions::default(), Arc::clone(&output)).unwrap();
    assert_eq!(result.imports, vec!["lib/util.ebs".to_string()]);
    assert_eq!(output.output(), "HI!\n");
}

#[test]
fn test_run_missing_file() {
    let error = run_file(
        "/definitely/not/here.ebs",
        &RunOptions::default(),
        buffer_handler(),
    )
    .unwrap_err();
    assert!(matches!(error, DriverError::Read { .. }));
}

#[test]
fn test_run_reports_syntax_error_with_source() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "bad.ebs", "var a = 1;\nvar b = ;");
    let error = run_file(&main, &RunOptions::default(), buffer_handler()).unwrap_err();
    let DriverError::Syntax { text, error, .. } = error else {
        panic!("expected a syntax error");
    };
    assert_eq!(text, "var a = 1;\nvar b = ;");
    assert_eq!(error.line(), 2);
}

#[test]
fn test_run_honors_max_depth() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "deep.ebs", "down(n: int) { call down(n + 1); }\ncall down(0);");
    let options = RunOptions {
        max_call_depth: 8,
        ..RunOptions::default()
    };
    let error = run_file(&main, &options, buffer_handler()).unwrap_err();
    let DriverError::Runtime { error, text, .. } = error else {
        panic!("expected a runtime error");
    };
    assert!(text.is_some());
    assert_eq!(error.to_string(), "VALIDATION_ERROR at line 1: call depth limit of 8 exceeded");
}

#[test]
fn test_compile_then_exec() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "prog.ebs", "var total = 0;\nfor (var i = 1; i <= 4; i++) { total += i; }\nprint total;");

    let written = compile_file(&main, None).unwrap();
    assert_eq!(written.extension().and_then(|e| e.to_str()), Some("ebc"));

    let output = buffer_handler();
    exec_file(&path_str(&written), &RunOptions::default(), Arc::clone(&output)).unwrap();
    assert_eq!(output.output(), "10\n");
}

#[test]
fn test_compile_to_explicit_output() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "prog.ebs", "print 1;");
    let target = dir.path().join("out.img");
    assert_eq!(compile_file(&main, Some(&target)).unwrap(), target);
    assert!(target.exists());
}

#[test]
fn test_exec_rejects_garbage_image() {
    let dir = TempDir::new().unwrap();
    let image = write(&dir, "junk.ebc", "not a program");
    let error = exec_file(&image, &RunOptions::default(), buffer_handler()).unwrap_err();
    assert!(matches!(error, DriverError::Cache(_)));
}

#[test]
fn test_parse_summary() {
    let dir = TempDir::new().unwrap();
    let main = write(
        &dir,
        "sum.ebs",
        "add(a: int, b: int) return int { return a + b; }\nhello { print 1; }\nprint add(1, 2);",
    );
    let mut out = Vec::new();
    parse_file(&main, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("  Named blocks: 2\n  Statements: 1\n"), "{text}");
    assert!(text.contains("  add(a, b) at line 1 returns a value\n"), "{text}");
    assert!(text.contains("  hello() at line 2\n"), "{text}");
}

#[test]
fn test_lex_dump() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "lex.ebs", "print 1;");
    let mut out = Vec::new();
    lex_file(&main, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().skip(1).collect();
    assert_eq!(lines, vec!["  1:1 Print", "  1:7 Int(1)", "  1:8 Semicolon", "  1:9 Eof"]);
}

#[test]
fn test_lex_error_is_syntax_error() {
    let dir = TempDir::new().unwrap();
    let main = write(&dir, "lex.ebs", "print @;");
    let error = lex_file(&main, &mut Vec::new()).unwrap_err();
    assert!(matches!(error, DriverError::Syntax { .. }));
}
