//! `math.*` built-ins.

use std::cmp::Ordering;

use ebs_ir::ExceptionKind;

use super::{kind, Arity, BuiltinRegistry};
use crate::errors::{negation_overflow, wrong_arg_type};
use crate::operators::compare_values;
use crate::{ScriptError, Value};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("math.abs", Arity::Exact(1), abs);
    registry.register("math.min", Arity::AtLeast(1), |args| {
        extreme("math.min", args, Ordering::Less)
    });
    registry.register("math.max", Arity::AtLeast(1), |args| {
        extreme("math.max", args, Ordering::Greater)
    });
    registry.register("math.sqrt", Arity::Exact(1), |args| {
        let value = number("math.sqrt", args, 1)?;
        if value < 0.0 {
            return Err(ScriptError::new(
                ExceptionKind::Math,
                format!("square root of negative number {}", args[0]),
            ));
        }
        Ok(Value::Double(value.sqrt()))
    });
    registry.register("math.floor", Arity::Exact(1), |args| {
        rounding("math.floor", args, f64::floor)
    });
    registry.register("math.ceil", Arity::Exact(1), |args| {
        rounding("math.ceil", args, f64::ceil)
    });
    registry.register("math.round", Arity::Exact(1), |args| {
        rounding("math.round", args, f64::round)
    });
}

fn number(name: &str, args: &[Value], position: usize) -> Result<f64, ScriptError> {
    let value = args.get(position - 1);
    value
        .and_then(Value::as_f64)
        .ok_or_else(|| wrong_arg_type(name, position, "a number", kind(value)))
}

fn abs(args: &[Value]) -> Result<Value, ScriptError> {
    match &args[0] {
        Value::Byte(v) => Ok(Value::Byte(*v)),
        Value::Int(v) => v.checked_abs().map(Value::Int).ok_or_else(negation_overflow),
        Value::Long(v) => v.checked_abs().map(Value::Long).ok_or_else(negation_overflow),
        Value::Float(v) => Ok(Value::Float(v.abs())),
        Value::Double(v) => Ok(Value::Double(v.abs())),
        other => Err(wrong_arg_type("math.abs", 1, "a number", other.kind_name())),
    }
}

/// The argument that orders `wanted` against every other one.
fn extreme(name: &str, args: &[Value], wanted: Ordering) -> Result<Value, ScriptError> {
    let mut best = &args[0];
    for (i, candidate) in args.iter().enumerate() {
        if !candidate.is_numeric() {
            return Err(wrong_arg_type(name, i + 1, "a number", candidate.kind_name()));
        }
        if compare_values(candidate, best).flatten() == Some(wanted) {
            best = candidate;
        }
    }
    Ok(best.clone())
}

#[allow(clippy::cast_possible_truncation, reason = "rounded float stays float")]
fn rounding(name: &str, args: &[Value], op: fn(f64) -> f64) -> Result<Value, ScriptError> {
    match &args[0] {
        Value::Float(v) => Ok(Value::Float(op(f64::from(*v)) as f32)),
        Value::Double(v) => Ok(Value::Double(op(*v))),
        value if value.is_numeric() => Ok(value.clone()),
        other => Err(wrong_arg_type(name, 1, "a number", other.kind_name())),
    }
}
