//! `map.*` built-ins. Records are accepted wherever a map is.

use super::{arg_str, kind, Arity, BuiltinRegistry};
use crate::errors::wrong_arg_type;
use crate::{ArrayValue, DataType, RecordValue, ScriptError, Value};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("map.keys", Arity::Exact(1), |args| {
        let keys: Vec<Value> = match &args[0] {
            Value::Map(map) => map.keys().map(Value::string).collect(),
            Value::Record(record) => record
                .fields()
                .iter()
                .map(|field| Value::string(field.name.as_str()))
                .collect(),
            other => return Err(not_a_map("map.keys", other)),
        };
        Ok(Value::Array(ArrayValue::dynamic(DataType::String, keys)))
    });
    registry.register("map.has", Arity::Exact(2), |args| {
        let key = arg_str("map.has", args, 2)?;
        match &args[0] {
            Value::Map(map) => Ok(Value::Bool(map.contains_key(key))),
            Value::Record(record) => Ok(Value::Bool(record.field(key).is_some())),
            other => Err(not_a_map("map.has", other)),
        }
    });
    registry.register("map.remove", Arity::Exact(2), |args| {
        let key = arg_str("map.remove", args, 2)?;
        match &args[0] {
            Value::Map(map) => {
                let mut map = map.clone();
                map.remove(key);
                Ok(Value::Map(map))
            }
            Value::Record(record) => Ok(Value::Record(RecordValue::new(
                record
                    .fields()
                    .iter()
                    .filter(|field| !field.name.eq_ignore_ascii_case(key))
                    .cloned()
                    .collect(),
            ))),
            other => Err(not_a_map("map.remove", other)),
        }
    });
}

#[cold]
fn not_a_map(name: &str, got: &Value) -> ScriptError {
    wrong_arg_type(name, 1, "a map or record", kind(Some(got)))
}
