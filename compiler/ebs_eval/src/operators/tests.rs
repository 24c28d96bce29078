#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use ebs_ir::{Date, ExceptionKind};
use pretty_assertions::assert_eq;

fn eval(op: BinaryOp, left: Value, right: Value) -> Value {
    evaluate_binary(op, &left, &right).unwrap()
}

fn error_kind(op: BinaryOp, left: Value, right: Value) -> Option<ExceptionKind> {
    evaluate_binary(op, &left, &right).unwrap_err().standard_kind()
}

#[test]
fn test_promotes_to_widest_kind() {
    assert_eq!(eval(BinaryOp::Add, Value::Int(1), Value::Long(2)), Value::Long(3));
    assert_eq!(eval(BinaryOp::Add, Value::Int(1), Value::Float(0.5)), Value::Float(1.5));
    assert_eq!(
        eval(BinaryOp::Mul, Value::Float(2.0), Value::Double(1.25)),
        Value::Double(2.5)
    );
    assert_eq!(eval(BinaryOp::Add, Value::Byte(1), Value::Byte(2)), Value::Byte(3));
    assert_eq!(eval(BinaryOp::Add, Value::Byte(1), Value::Int(2)), Value::Int(3));
}

#[test]
fn test_integer_division_truncates() {
    assert_eq!(eval(BinaryOp::Div, Value::Int(7), Value::Int(2)), Value::Int(3));
    assert_eq!(eval(BinaryOp::Mod, Value::Int(-7), Value::Int(3)), Value::Int(-1));
}

#[test]
fn test_division_by_zero_is_math_error() {
    assert_eq!(
        error_kind(BinaryOp::Div, Value::Int(10), Value::Int(0)),
        Some(ExceptionKind::Math)
    );
    assert_eq!(
        error_kind(BinaryOp::Div, Value::Double(1.0), Value::Double(0.0)),
        Some(ExceptionKind::Math)
    );
    assert_eq!(
        error_kind(BinaryOp::Mod, Value::Long(1), Value::Long(0)),
        Some(ExceptionKind::Math)
    );
}

#[test]
fn test_zero_divided_is_zero_of_promoted_kind() {
    assert_eq!(eval(BinaryOp::Div, Value::Int(0), Value::Long(5)), Value::Long(0));
    assert_eq!(
        eval(BinaryOp::Div, Value::Int(0), Value::Double(2.0)),
        Value::Double(0.0)
    );
}

#[test]
fn test_overflow_is_math_error() {
    assert_eq!(
        error_kind(BinaryOp::Add, Value::Int(i32::MAX), Value::Int(1)),
        Some(ExceptionKind::Math)
    );
    assert_eq!(
        error_kind(BinaryOp::Sub, Value::Byte(1), Value::Byte(2)),
        Some(ExceptionKind::Math)
    );
    assert_eq!(
        error_kind(BinaryOp::Div, Value::Int(i32::MIN), Value::Int(-1)),
        Some(ExceptionKind::Math)
    );
}

#[test]
fn test_power() {
    assert_eq!(eval(BinaryOp::Pow, Value::Int(2), Value::Int(10)), Value::Int(1024));
    assert_eq!(eval(BinaryOp::Pow, Value::Int(2), Value::Int(-1)), Value::Double(0.5));
    assert_eq!(
        eval(BinaryOp::Pow, Value::Double(2.0), Value::Int(3)),
        Value::Double(8.0)
    );
    assert_eq!(
        error_kind(BinaryOp::Pow, Value::Int(10), Value::Int(12)),
        Some(ExceptionKind::Math)
    );
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        eval(BinaryOp::Add, Value::string("n="), Value::Int(3)),
        Value::string("n=3")
    );
    assert_eq!(
        eval(BinaryOp::Add, Value::Double(2.0), Value::string("!")),
        Value::string("2.0!")
    );
    assert_eq!(
        error_kind(BinaryOp::Sub, Value::string("a"), Value::Int(1)),
        Some(ExceptionKind::Type)
    );
}

#[test]
fn test_comparisons() {
    assert_eq!(eval(BinaryOp::Lt, Value::Int(1), Value::Double(1.5)), Value::Bool(true));
    assert_eq!(
        eval(BinaryOp::GtEq, Value::string("b"), Value::string("a")),
        Value::Bool(true)
    );
    let early = Value::Date(Date::new(2024, 1, 1).unwrap());
    let late = Value::Date(Date::new(2024, 6, 1).unwrap());
    assert_eq!(eval(BinaryOp::Lt, early, late), Value::Bool(true));
    assert_eq!(
        error_kind(BinaryOp::Lt, Value::string("a"), Value::Int(1)),
        Some(ExceptionKind::Type)
    );
    assert_eq!(
        eval(BinaryOp::Lt, Value::Double(f64::NAN), Value::Double(1.0)),
        Value::Bool(false)
    );
}

#[test]
fn test_equality() {
    assert_eq!(eval(BinaryOp::Eq, Value::Int(2), Value::Long(2)), Value::Bool(true));
    assert_eq!(eval(BinaryOp::Eq, Value::Int(2), Value::Double(2.0)), Value::Bool(true));
    assert_eq!(eval(BinaryOp::Eq, Value::Null, Value::Null), Value::Bool(true));
    assert_eq!(
        eval(BinaryOp::Eq, Value::string("1"), Value::Int(1)),
        Value::Bool(false)
    );
    assert_eq!(
        eval(
            BinaryOp::NotEq,
            Value::array(vec![Value::Int(1)]),
            Value::array(vec![Value::Long(1)])
        ),
        Value::Bool(false)
    );
}

#[test]
fn test_logical_operators_need_bools() {
    assert_eq!(
        eval(BinaryOp::And, Value::Bool(true), Value::Bool(false)),
        Value::Bool(false)
    );
    assert_eq!(
        eval(BinaryOp::Or, Value::Bool(false), Value::Bool(true)),
        Value::Bool(true)
    );
    assert_eq!(
        error_kind(BinaryOp::And, Value::Int(1), Value::Bool(true)),
        Some(ExceptionKind::Type)
    );
}
