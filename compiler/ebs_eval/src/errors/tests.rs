#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_custom_message_joins_params() {
    let error = ScriptError::custom(
        "Boom",
        vec![Value::Str("a".into()), Value::Int(1), Value::Double(2.0)],
    );
    assert_eq!(error.message, "Boom: a, 1, 2.0");
    assert_eq!(error.kind.name(), "Boom");
    assert_eq!(error.standard_kind(), None);
}

#[test]
fn test_custom_without_params_is_just_the_name() {
    assert_eq!(ScriptError::custom("Oops", Vec::new()).message, "Oops");
}

#[test]
fn test_at_line_keeps_first_line() {
    let error = division_by_zero().at_line(4).at_line(9);
    assert_eq!(error.line, 4);
    assert_eq!(error.to_string(), "MATH_ERROR at line 4: division by zero");
}

#[test]
fn test_signals_convert_to_run_errors() {
    assert_eq!(
        RunError::from_signal(ControlSignal::Break),
        RunError::ControlFlow(ControlFlowError::Break)
    );
    assert_eq!(
        RunError::from_signal(ControlSignal::Return(Value::Null)),
        RunError::ControlFlow(ControlFlowError::Return)
    );
    let raised = RunError::from_signal(undefined_variable("x").into());
    assert_eq!(
        raised.to_string(),
        "NOT_FOUND_ERROR at line 0: variable 'x' is not declared"
    );
}

#[test]
fn test_factory_kinds() {
    assert_eq!(
        call_depth_exceeded(8).standard_kind(),
        Some(ExceptionKind::Validation)
    );
    assert_eq!(
        constant_assignment("k").standard_kind(),
        Some(ExceptionKind::Access)
    );
    assert_eq!(
        index_out_of_bounds(5, 3).standard_kind(),
        Some(ExceptionKind::Index)
    );
    assert_eq!(null_access("index").message, "cannot index null");
}
