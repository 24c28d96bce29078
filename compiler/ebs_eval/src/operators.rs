//! Binary operators.
//!
//! Arithmetic promotes both operands to the wider of the two numeric kinds
//! (`byte < int < long < float < double`). Integer arithmetic is checked:
//! overflow and zero divisors raise `MATH_ERROR`. `+` with a string on
//! either side concatenates the stringified operands.
//!
//! `and`/`or` short-circuit in the interpreter; here they only validate
//! operands that are already evaluated.

use std::cmp::Ordering;

use ebs_ir::BinaryOp;

use crate::errors::{division_by_zero, integer_overflow, invalid_binary_op, modulo_by_zero};
use crate::{ScriptError, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Byte,
    Int,
    Long,
    Float,
    Double,
}

fn rank(value: &Value) -> Option<Rank> {
    match value {
        Value::Byte(_) => Some(Rank::Byte),
        Value::Int(_) => Some(Rank::Int),
        Value::Long(_) => Some(Rank::Long),
        Value::Float(_) => Some(Rank::Float),
        Value::Double(_) => Some(Rank::Double),
        _ => None,
    }
}

/// Evaluate `left op right`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ScriptError> {
    match op {
        BinaryOp::And | BinaryOp::Or => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(mismatch(op, left, right)),
        },
        BinaryOp::Eq => Ok(Value::Bool(values_equal(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!values_equal(left, right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering =
                compare_values(left, right).ok_or_else(|| mismatch(op, left, right))?;
            Ok(Value::Bool(ordering.is_some_and(|ordering| match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })))
        }
        BinaryOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            Ok(Value::Str(format!("{left}{right}")))
        }
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Pow => arithmetic(op, left, right),
    }
}

#[cold]
fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> ScriptError {
    invalid_binary_op(op, left.kind_name(), right.kind_name())
}

/// Structural equality with numeric promotion. Values of different
/// non-numeric kinds are never equal.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        _ if left.is_numeric() && right.is_numeric() => {
            match (left.as_integer(), right.as_integer()) {
                (Some(a), Some(b)) => a == b,
                _ => left.as_f64() == right.as_f64(),
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.items()
                    .iter()
                    .zip(b.items())
                    .all(|(x, y)| values_equal(x, y))
        }
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
                && a.fields().iter().zip(b.fields()).all(|(x, y)| {
                    x.name.eq_ignore_ascii_case(&y.name) && values_equal(&x.value, &y.value)
                })
        }
        (Value::Map(a), Value::Map(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && values_equal(va, vb))
        }
        (Value::Bits(a), Value::Bits(b)) => a.raw() == b.raw(),
        _ => left == right,
    }
}

/// Natural ordering of numbers, strings and dates.
///
/// `None` when the kinds cannot be ordered; `Some(None)` for NaN.
pub fn compare_values(left: &Value, right: &Value) -> Option<Option<Ordering>> {
    if left.is_numeric() && right.is_numeric() {
        return Some(match (left.as_integer(), right.as_integer()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
        });
    }
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(Some(a.cmp(b))),
        (Value::Date(a), Value::Date(b)) => Some(Some(a.cmp(b))),
        _ => None,
    }
}

macro_rules! checked_integer {
    ($op:expr, $a:expr, $b:expr, $wrap:path) => {{
        let (a, b) = ($a, $b);
        let result = match $op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            BinaryOp::Mul => a.checked_mul(b),
            BinaryOp::Div if b == 0 => return Err(division_by_zero()),
            BinaryOp::Div => a.checked_div(b),
            BinaryOp::Mod if b == 0 => return Err(modulo_by_zero()),
            BinaryOp::Mod => a.checked_rem(b),
            _ => u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)),
        };
        result.map($wrap).ok_or_else(|| integer_overflow($op))
    }};
}

#[allow(clippy::cast_possible_truncation, reason = "float operands stay float")]
fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ScriptError> {
    let (Some(left_rank), Some(right_rank)) = (rank(left), rank(right)) else {
        return Err(mismatch(op, left, right));
    };
    let rank = left_rank.max(right_rank);

    if op == BinaryOp::Pow && rank <= Rank::Long {
        if let (Some(base), Some(exp)) = (left.as_integer(), right.as_integer()) {
            if exp < 0 {
                let base = left.as_f64().unwrap_or_default();
                return Ok(Value::Double(base.powf(right.as_f64().unwrap_or_default())));
            }
            return integer_arithmetic(op, rank, base, exp);
        }
    }

    match rank {
        Rank::Double => {
            let a = left.as_f64().unwrap_or_default();
            let b = right.as_f64().unwrap_or_default();
            float_arithmetic(op, a, b).map(Value::Double)
        }
        Rank::Float => {
            let a = left.as_f64().unwrap_or_default();
            let b = right.as_f64().unwrap_or_default();
            float_arithmetic(op, a, b).map(|v| Value::Float(v as f32))
        }
        _ => {
            let a = left.as_integer().unwrap_or_default();
            let b = right.as_integer().unwrap_or_default();
            integer_arithmetic(op, rank, a, b)
        }
    }
}

fn integer_arithmetic(op: BinaryOp, rank: Rank, a: i64, b: i64) -> Result<Value, ScriptError> {
    let overflow = || integer_overflow(op);
    match rank {
        Rank::Byte => {
            let a = u8::try_from(a).map_err(|_| overflow())?;
            let b = u8::try_from(b).map_err(|_| overflow())?;
            checked_integer!(op, a, b, Value::Byte)
        }
        Rank::Int => {
            let a = i32::try_from(a).map_err(|_| overflow())?;
            let b = i32::try_from(b).map_err(|_| overflow())?;
            checked_integer!(op, a, b, Value::Int)
        }
        _ => checked_integer!(op, a, b, Value::Long),
    }
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> Result<f64, ScriptError> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(a / b),
        BinaryOp::Mod if b == 0.0 => Err(modulo_by_zero()),
        BinaryOp::Mod => Ok(a % b),
        _ => Ok(a.powf(b)),
    }
}

#[cfg(test)]
mod tests;
