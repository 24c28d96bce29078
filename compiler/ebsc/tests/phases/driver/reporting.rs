use ebs_eval::{ControlFlowError, RunError, ScriptError};
use ebs_ir::ExceptionKind;
use ebsc::{line_range, render_run_error, render_syntax_error, DriverError, RunOptions};
use pretty_assertions::assert_eq;

fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_line_range() {
    let source = "first\r\nsecond\nthird";
    assert_eq!(line_range(source, 1), Some(0..5));
    assert_eq!(line_range(source, 2), Some(7..13));
    assert_eq!(line_range(source, 3), Some(14..19));
    assert_eq!(line_range(source, 4), None);
    assert_eq!(line_range(source, 0), None);
}

#[test]
fn test_syntax_error_shows_source_and_label() {
    let source = "var a = 1;\nvar b = ;";
    let error = ebs_parse::parse("bad.ebs", source).unwrap_err();
    let text = render(|out| render_syntax_error("bad.ebs", source, &error, out, false));
    assert!(text.contains("parse error at line 2"), "{text}");
    assert!(text.contains("expected an expression"), "{text}");
    assert!(text.contains("var b = ;"), "{text}");
}

#[test]
fn test_runtime_error_points_at_line() {
    let source = "print 1;\nvar x = 1 / 0;";
    let error = RunError::Runtime(
        ScriptError::new(ExceptionKind::Math, "division by zero").at_line(2),
    );
    let text = render(|out| render_run_error("main.ebs", source, &error, out, false));
    assert!(text.contains("MATH_ERROR"), "{text}");
    assert!(text.contains("var x = 1 / 0;"), "{text}");
    assert!(text.contains("division by zero"), "{text}");
}

#[test]
fn test_control_flow_error_is_one_line() {
    let error = RunError::ControlFlow(ControlFlowError::Break);
    let text = render(|out| render_run_error("main.ebs", "break;", &error, out, false));
    assert_eq!(text, "error in 'main.ebs': 'break' used outside of a loop\n");
}

#[test]
fn test_report_without_source() {
    let error = DriverError::Runtime {
        path: "prog.ebc".to_string(),
        text: None,
        error: RunError::Runtime(ScriptError::new(ExceptionKind::Io, "gone").at_line(3)),
    };
    let text = render(|out| error.report(out, false));
    assert_eq!(text, "error in 'prog.ebc': IO_ERROR at line 3: gone\n");
}

#[test]
fn test_usage_errors() {
    let mut options = RunOptions::default();
    let args: Vec<String> = ["--max-depth", "0"].iter().map(ToString::to_string).collect();
    assert!(matches!(options.apply_args(&args), Err(DriverError::Usage(_))));
    let args = vec!["--frobnicate".to_string()];
    assert!(matches!(options.apply_args(&args), Err(DriverError::Usage(_))));
}

#[test]
fn test_option_parsing() {
    let mut options = RunOptions::default();
    let args: Vec<String> = ["main.ebs", "--max-depth", "32", "-o", "out.ebc"]
        .iter()
        .map(ToString::to_string)
        .collect();
    let positional = options.apply_args(&args).unwrap();
    assert_eq!(positional, vec!["main.ebs".to_string()]);
    assert_eq!(options.max_call_depth, 32);
    assert_eq!(options.output, Some("out.ebc".into()));

    let mut options = RunOptions::default();
    options
        .apply_args(&["--max-depth=7".to_string()])
        .unwrap();
    assert_eq!(options.max_call_depth, 7);
}

#[test]
fn test_depth_from_environment_value() {
    assert_eq!(RunOptions::with_depth_var(Some("64")).max_call_depth, 64);
    assert_eq!(
        RunOptions::with_depth_var(Some("lots")).max_call_depth,
        ebs_eval::DEFAULT_MAX_CALL_DEPTH
    );
    assert_eq!(RunOptions::with_depth_var(None), RunOptions::default());
}
