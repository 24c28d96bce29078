//! `array.*` built-ins. Each returns a new array; the argument is untouched.

use std::cmp::Ordering;

use ebs_ir::ExceptionKind;

use super::{arg_index, kind, Arity, BuiltinRegistry};
use crate::errors::{fixed_array_growth, index_out_of_bounds, wrong_arg_type};
use crate::operators::compare_values;
use crate::{coerce, ArrayValue, ScriptError, Value};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("array.add", Arity::Exact(2), add);
    registry.register("array.remove", Arity::Exact(2), remove);
    registry.register("array.sort", Arity::Exact(1), sort);
    registry.register("array.fill", Arity::Exact(2), fill);
}

fn array_arg<'a>(name: &str, args: &'a [Value]) -> Result<&'a ArrayValue, ScriptError> {
    match args.first() {
        Some(Value::Array(array)) => Ok(array),
        other => Err(wrong_arg_type(name, 1, "an array", kind(other))),
    }
}

/// Same element type and fixedness as `template`, new contents.
fn rebuild(template: &ArrayValue, items: Vec<Value>) -> Value {
    let elem = template.elem_type().clone();
    Value::Array(if template.is_fixed() {
        ArrayValue::fixed(elem, items)
    } else {
        ArrayValue::dynamic(elem, items)
    })
}

fn add(args: &[Value]) -> Result<Value, ScriptError> {
    let array = array_arg("array.add", args)?;
    if array.is_fixed() {
        return Err(fixed_array_growth(array.len()));
    }
    let item = coerce(args[1].clone(), array.elem_type())?;
    let mut items = array.items().to_vec();
    items.push(item);
    Ok(rebuild(array, items))
}

fn remove(args: &[Value]) -> Result<Value, ScriptError> {
    let array = array_arg("array.remove", args)?;
    let index = arg_index("array.remove", args, 2)?;
    if array.is_fixed() {
        return Err(ScriptError::new(
            ExceptionKind::Index,
            format!("cannot shrink a fixed array of length {}", array.len()),
        ));
    }
    if index >= array.len() {
        return Err(index_out_of_bounds(
            i64::try_from(index).unwrap_or(i64::MAX),
            array.len(),
        ));
    }
    let mut items = array.items().to_vec();
    items.remove(index);
    Ok(rebuild(array, items))
}

/// Sorts numbers, strings or dates ascending. Mixed kinds do not sort.
fn sort(args: &[Value]) -> Result<Value, ScriptError> {
    let array = array_arg("array.sort", args)?;
    let items = array.items();
    let sortable = items.iter().all(Value::is_numeric)
        || items.iter().all(|v| matches!(v, Value::Str(_)))
        || items.iter().all(|v| matches!(v, Value::Date(_)));
    if !sortable {
        return Err(ScriptError::new(
            ExceptionKind::Type,
            "'array.sort' needs all numbers, all strings or all dates",
        ));
    }
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_values(a, b).flatten().unwrap_or(Ordering::Equal));
    Ok(rebuild(array, sorted))
}

fn fill(args: &[Value]) -> Result<Value, ScriptError> {
    let array = array_arg("array.fill", args)?;
    let item = coerce(args[1].clone(), array.elem_type())?;
    Ok(rebuild(array, vec![item; array.len()]))
}
