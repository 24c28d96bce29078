//! Conversions between values and types.
//!
//! [`coerce`] is the implicit conversion applied when a value lands in a
//! typed slot (binding, parameter, field, element, return value). It widens
//! numbers freely and narrows integers only when the value fits. [`cast`]
//! is the explicit, best-effort conversion behind `int(x)`, `string(x)`
//! and friends.

use std::collections::BTreeMap;
use std::sync::Arc;

use ebs_ir::{CastTarget, Date};

use super::{
    ArrayType, ArrayValue, BitsType, BitsValue, DataType, RecordField, RecordType, RecordValue,
    Value,
};
use crate::errors::{cannot_cast, no_such_field, type_mismatch};
use crate::ScriptError;

/// The value an uninitialized binding of type `ty` starts with.
pub fn default_value(ty: &DataType) -> Value {
    match ty {
        DataType::Any | DataType::Date => Value::Null,
        DataType::Byte => Value::Byte(0),
        DataType::Int => Value::Int(0),
        DataType::Long => Value::Long(0),
        DataType::Float => Value::Float(0.0),
        DataType::Double => Value::Double(0.0),
        DataType::String => Value::Str(String::new()),
        DataType::Bool => Value::Bool(false),
        DataType::Map => Value::Map(BTreeMap::new()),
        DataType::Record(None) => Value::Record(RecordValue::default()),
        DataType::Record(Some(record)) => Value::Record(default_record(record)),
        DataType::Array(array) => Value::Array(default_array(array)),
        DataType::Bits(bits) => Value::Bits(BitsValue::empty(Arc::clone(bits))),
    }
}

fn default_record(record: &RecordType) -> RecordValue {
    RecordValue::new(
        record
            .fields
            .iter()
            .map(|(name, ty)| RecordField {
                name: name.clone(),
                ty: ty.clone(),
                value: default_value(ty),
            })
            .collect(),
    )
}

fn default_array(array: &ArrayType) -> ArrayValue {
    match array.len {
        Some(len) => ArrayValue::fixed(
            array.elem.clone(),
            (0..len).map(|_| default_value(&array.elem)).collect(),
        ),
        None => ArrayValue::dynamic(array.elem.clone(), Vec::new()),
    }
}

/// Convert `value` for storage in a slot of type `ty`.
///
/// `null` fits every type.
#[allow(clippy::cast_possible_truncation, reason = "float narrowing is intended")]
pub fn coerce(value: Value, ty: &DataType) -> Result<Value, ScriptError> {
    if value.is_null() {
        return Ok(value);
    }
    match ty {
        DataType::Any => Ok(value),
        DataType::Byte | DataType::Int | DataType::Long => coerce_integer(value, ty),
        DataType::Float => match value {
            Value::Float(_) => Ok(value),
            Value::Double(v) => Ok(Value::Float(v as f32)),
            ref other if other.as_integer().is_some() => {
                Ok(Value::Float(other.as_f64().unwrap_or_default() as f32))
            }
            other => Err(type_mismatch("float", other.kind_name())),
        },
        DataType::Double => match value.as_f64() {
            Some(v) => Ok(Value::Double(v)),
            None => Err(type_mismatch("double", value.kind_name())),
        },
        DataType::String => match value {
            Value::Str(_) => Ok(value),
            other => Err(type_mismatch("string", other.kind_name())),
        },
        DataType::Bool => match value {
            Value::Bool(_) => Ok(value),
            other => Err(type_mismatch("bool", other.kind_name())),
        },
        DataType::Date => match value {
            Value::Date(_) => Ok(value),
            Value::Str(ref text) => match Date::parse(text) {
                Some(date) => Ok(Value::Date(date)),
                None => Err(type_mismatch("date", "a non-date string")),
            },
            other => Err(type_mismatch("date", other.kind_name())),
        },
        DataType::Map => match value {
            Value::Map(_) => Ok(value),
            Value::Record(record) => Ok(Value::Map(record.into_pairs().into_iter().collect())),
            other => Err(type_mismatch("map", other.kind_name())),
        },
        DataType::Record(None) => match value {
            Value::Record(_) => Ok(value),
            Value::Map(map) => Ok(Value::Record(RecordValue::untyped(map.into_iter().collect()))),
            other => Err(type_mismatch("record", other.kind_name())),
        },
        DataType::Record(Some(record)) => conform_record(value, record),
        DataType::Array(array) => conform_array(value, array),
        DataType::Bits(bits) => conform_bits(value, bits),
    }
}

fn coerce_integer(value: Value, ty: &DataType) -> Result<Value, ScriptError> {
    let Some(v) = value.as_integer() else {
        return Err(type_mismatch(&ty.name(), value.kind_name()));
    };
    let converted = match ty {
        DataType::Byte => u8::try_from(v).ok().map(Value::Byte),
        DataType::Int => i32::try_from(v).ok().map(Value::Int),
        _ => Some(Value::Long(v)),
    };
    converted.ok_or_else(|| type_mismatch(&ty.name(), &format!("{} {v}", value.kind_name())))
}

fn conform_record(value: Value, ty: &RecordType) -> Result<Value, ScriptError> {
    let pairs = match value {
        Value::Record(record) => record.into_pairs(),
        Value::Map(map) => map.into_iter().collect(),
        other => return Err(type_mismatch("record", other.kind_name())),
    };
    let mut record = default_record(ty);
    for (name, value) in pairs {
        let field = record.field_mut(&name).ok_or_else(|| no_such_field(&name))?;
        field.value = coerce(value, &field.ty)?;
    }
    Ok(Value::Record(record))
}

fn conform_array(value: Value, ty: &ArrayType) -> Result<Value, ScriptError> {
    let Value::Array(array) = value else {
        return Err(type_mismatch(
            &DataType::Array(Arc::new(ty.clone())).name(),
            value.kind_name(),
        ));
    };
    let mut items = array
        .into_items()
        .into_iter()
        .map(|item| coerce(item, &ty.elem))
        .collect::<Result<Vec<_>, _>>()?;
    match ty.len {
        Some(len) if items.len() > len => Err(type_mismatch(
            &format!("at most {len} elements"),
            &format!("{} elements", items.len()),
        )),
        Some(len) => {
            items.resize_with(len, || default_value(&ty.elem));
            Ok(Value::Array(ArrayValue::fixed(ty.elem.clone(), items)))
        }
        None => Ok(Value::Array(ArrayValue::dynamic(ty.elem.clone(), items))),
    }
}

fn conform_bits(value: Value, ty: &Arc<BitsType>) -> Result<Value, ScriptError> {
    match value {
        Value::Bits(bits) if bits.ty().width() == ty.width() => {
            Ok(Value::Bits(bits.retyped(Arc::clone(ty))))
        }
        ref other => match other.as_integer() {
            Some(raw) => Ok(Value::Bits(BitsValue::new(Arc::clone(ty), raw)?)),
            None => Err(type_mismatch(&ty.name(), other.kind_name())),
        },
    }
}

/// Explicit conversion for a cast expression.
#[allow(clippy::cast_possible_truncation, reason = "float narrowing is intended")]
pub fn cast(value: &Value, target: CastTarget) -> Result<Value, ScriptError> {
    let fail = || cannot_cast(value.kind_name(), target.type_name());
    match target {
        CastTarget::Byte => to_integer(value)
            .and_then(|v| u8::try_from(v).ok())
            .map(Value::Byte)
            .ok_or_else(fail),
        CastTarget::Int => to_integer(value)
            .and_then(|v| i32::try_from(v).ok())
            .map(Value::Int)
            .ok_or_else(fail),
        CastTarget::Long => to_integer(value).map(Value::Long).ok_or_else(fail),
        CastTarget::Float => to_float(value)
            .map(|v| Value::Float(v as f32))
            .ok_or_else(fail),
        CastTarget::Double => to_float(value).map(Value::Double).ok_or_else(fail),
        CastTarget::String => Ok(Value::Str(value.to_string())),
        CastTarget::Bool => to_bool(value).map(Value::Bool).ok_or_else(fail),
        CastTarget::Date => match value {
            Value::Date(_) => Ok(value.clone()),
            Value::Str(text) => Date::parse(text.trim()).map(Value::Date).ok_or_else(fail),
            _ => Err(fail()),
        },
        CastTarget::Record => match value {
            Value::Record(_) => Ok(value.clone()),
            Value::Map(map) => Ok(Value::Record(RecordValue::untyped(
                map.clone().into_iter().collect(),
            ))),
            Value::Str(text) => parse_json_object(text, true).ok_or_else(fail),
            _ => Err(fail()),
        },
        CastTarget::Map => match value {
            Value::Map(_) => Ok(value.clone()),
            Value::Record(record) => Ok(Value::Map(
                record.clone().into_pairs().into_iter().collect(),
            )),
            Value::Str(text) => parse_json_object(text, false).ok_or_else(fail),
            _ => Err(fail()),
        },
    }
}

#[allow(clippy::cast_possible_truncation, reason = "range checked before the cast")]
fn to_integer(value: &Value) -> Option<i64> {
    if let Some(v) = value.as_integer() {
        return Some(v);
    }
    let float = match value {
        Value::Float(v) => f64::from(*v),
        Value::Double(v) => *v,
        Value::Str(text) => {
            let text = text.trim();
            if let Ok(v) = text.parse::<i64>() {
                return Some(v);
            }
            text.parse::<f64>().ok()?
        }
        _ => return None,
    };
    let truncated = float.trunc();
    // 2^63 is the first f64 past i64::MAX.
    let limit = 9_223_372_036_854_775_808.0;
    if truncated.is_finite() && truncated >= -limit && truncated < limit {
        Some(truncated as i64)
    } else {
        None
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Str(text) => text.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(v) => Some(*v),
        Value::Str(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        other => other.as_f64().map(|v| v != 0.0),
    }
}

/// Parse a JSON object. Nested objects become records or maps to match
/// the outer target.
fn parse_json_object(text: &str, as_record: bool) -> Option<Value> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json @ serde_json::Value::Object(_)) => Some(from_json(json, as_record)),
        _ => None,
    }
}

fn from_json(json: serde_json::Value, as_record: bool) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(v) => Value::Bool(v),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(v) => Value::integer(v),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::Str(s),
        serde_json::Value::Array(items) => Value::array(
            items
                .into_iter()
                .map(|item| from_json(item, as_record))
                .collect(),
        ),
        serde_json::Value::Object(entries) => {
            let pairs = entries
                .into_iter()
                .map(|(key, value)| (key, from_json(value, as_record)));
            if as_record {
                Value::Record(RecordValue::untyped(pairs.collect()))
            } else {
                Value::Map(pairs.collect())
            }
        }
    }
}
