//! Unary operators: `-`, `+` and `!`.

use ebs_ir::UnaryOp;

use crate::errors::{invalid_unary_op, negation_overflow};
use crate::{ScriptError, Value};

/// Evaluate `op operand`.
pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> Result<Value, ScriptError> {
    match (op, operand) {
        (UnaryOp::Neg, Value::Byte(v)) => Ok(Value::Int(-i32::from(*v))),
        (UnaryOp::Neg, Value::Int(v)) => {
            v.checked_neg().map(Value::Int).ok_or_else(negation_overflow)
        }
        (UnaryOp::Neg, Value::Long(v)) => {
            v.checked_neg().map(Value::Long).ok_or_else(negation_overflow)
        }
        (UnaryOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
        (UnaryOp::Neg, Value::Double(v)) => Ok(Value::Double(-v)),
        (UnaryOp::Plus, value) if value.is_numeric() => Ok(value.clone()),
        (UnaryOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
        _ => Err(invalid_unary_op(op, operand.kind_name())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use ebs_ir::ExceptionKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negation_keeps_kind() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Int(4)).unwrap(), Value::Int(-4));
        assert_eq!(
            evaluate_unary(UnaryOp::Neg, &Value::Double(1.5)).unwrap(),
            Value::Double(-1.5)
        );
        assert_eq!(evaluate_unary(UnaryOp::Neg, &Value::Byte(3)).unwrap(), Value::Int(-3));
    }

    #[test]
    fn test_negating_min_overflows() {
        let error = evaluate_unary(UnaryOp::Neg, &Value::Int(i32::MIN)).unwrap_err();
        assert_eq!(error.standard_kind(), Some(ExceptionKind::Math));
    }

    #[test]
    fn test_not_requires_bool() {
        assert_eq!(
            evaluate_unary(UnaryOp::Not, &Value::Bool(true)).unwrap(),
            Value::Bool(false)
        );
        let error = evaluate_unary(UnaryOp::Not, &Value::Int(1)).unwrap_err();
        assert_eq!(error.standard_kind(), Some(ExceptionKind::Type));
        assert_eq!(error.message, "operator '!' cannot be applied to int");
    }

    #[test]
    fn test_plus_rejects_strings() {
        assert!(evaluate_unary(UnaryOp::Plus, &Value::string("x")).is_err());
        assert_eq!(evaluate_unary(UnaryOp::Plus, &Value::Long(2)).unwrap(), Value::Long(2));
    }
}
