//! `str.*` built-ins. Positions and lengths count characters, not bytes.

use ebs_ir::ExceptionKind;

use super::{arg_index, arg_str, kind, Arity, BuiltinRegistry};
use crate::errors::{index_out_of_bounds, wrong_arg_type};
use crate::{DataType, ScriptError, Value};

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("str.toupper", Arity::Exact(1), |args| {
        Ok(Value::string(arg_str("str.toupper", args, 1)?.to_uppercase()))
    });
    registry.register("str.tolower", Arity::Exact(1), |args| {
        Ok(Value::string(arg_str("str.tolower", args, 1)?.to_lowercase()))
    });
    registry.register("str.trim", Arity::Exact(1), |args| {
        Ok(Value::string(arg_str("str.trim", args, 1)?.trim()))
    });
    registry.register("str.contains", Arity::Exact(2), |args| {
        let (text, needle) = pair("str.contains", args)?;
        Ok(Value::Bool(text.contains(needle)))
    });
    registry.register("str.startswith", Arity::Exact(2), |args| {
        let (text, prefix) = pair("str.startswith", args)?;
        Ok(Value::Bool(text.starts_with(prefix)))
    });
    registry.register("str.endswith", Arity::Exact(2), |args| {
        let (text, suffix) = pair("str.endswith", args)?;
        Ok(Value::Bool(text.ends_with(suffix)))
    });
    registry.register("str.indexof", Arity::Exact(2), index_of);
    registry.register("str.substring", Arity::Between(2, 3), substring);
    registry.register("str.replace", Arity::Exact(3), |args| {
        let (text, from) = pair("str.replace", args)?;
        let to = arg_str("str.replace", args, 3)?;
        if from.is_empty() {
            return Ok(Value::string(text));
        }
        Ok(Value::string(text.replace(from, to)))
    });
    registry.register("str.split", Arity::Exact(2), split);
    registry.register("str.join", Arity::Exact(2), join);
    registry.register("str.isempty", Arity::Exact(1), |args| match &args[0] {
        Value::Null => Ok(Value::Bool(true)),
        Value::Str(s) => Ok(Value::Bool(s.is_empty())),
        other => Err(wrong_arg_type("str.isempty", 1, "a string", other.kind_name())),
    });
    registry.register("str.lpad", Arity::Between(2, 3), |args| pad("str.lpad", args, true));
    registry.register("str.rpad", Arity::Between(2, 3), |args| pad("str.rpad", args, false));
}

fn pair<'a>(name: &str, args: &'a [Value]) -> Result<(&'a str, &'a str), ScriptError> {
    Ok((arg_str(name, args, 1)?, arg_str(name, args, 2)?))
}

fn index_of(args: &[Value]) -> Result<Value, ScriptError> {
    let (text, needle) = pair("str.indexof", args)?;
    let index = match text.find(needle) {
        Some(byte) => i64::try_from(text[..byte].chars().count()).unwrap_or(i64::MAX),
        None => -1,
    };
    Ok(Value::integer(index))
}

fn substring(args: &[Value]) -> Result<Value, ScriptError> {
    let text = arg_str("str.substring", args, 1)?;
    let len = text.chars().count();
    let start = arg_index("str.substring", args, 2)?;
    let end = if args.len() == 3 {
        arg_index("str.substring", args, 3)?
    } else {
        len
    };
    if start > len {
        return Err(out_of_range(start, len));
    }
    if end < start || end > len {
        return Err(out_of_range(end, len));
    }
    Ok(Value::string(
        text.chars().skip(start).take(end - start).collect::<String>(),
    ))
}

#[cold]
fn out_of_range(index: usize, len: usize) -> ScriptError {
    index_out_of_bounds(i64::try_from(index).unwrap_or(i64::MAX), len)
}

fn split(args: &[Value]) -> Result<Value, ScriptError> {
    let (text, separator) = pair("str.split", args)?;
    let parts: Vec<Value> = if separator.is_empty() {
        text.chars().map(|c| Value::string(c.to_string())).collect()
    } else {
        text.split(separator).map(Value::string).collect()
    };
    Ok(Value::Array(crate::ArrayValue::dynamic(DataType::String, parts)))
}

fn join(args: &[Value]) -> Result<Value, ScriptError> {
    let Value::Array(items) = &args[0] else {
        return Err(wrong_arg_type("str.join", 1, "an array", kind(args.first())));
    };
    let separator = arg_str("str.join", args, 2)?;
    let parts: Vec<String> = items.items().iter().map(ToString::to_string).collect();
    Ok(Value::string(parts.join(separator)))
}

fn pad(name: &str, args: &[Value], left: bool) -> Result<Value, ScriptError> {
    let text = arg_str(name, args, 1)?;
    let width = arg_index(name, args, 2)?;
    let fill = if args.len() == 3 {
        let fill = arg_str(name, args, 3)?;
        let mut chars = fill.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(ScriptError::new(
                    ExceptionKind::Type,
                    format!("'{name}' pads with exactly one character, found \"{fill}\""),
                ))
            }
        }
    } else {
        ' '
    };
    let missing = width.saturating_sub(text.chars().count());
    let padding: String = std::iter::repeat(fill).take(missing).collect();
    Ok(Value::string(if left {
        padding + text
    } else {
        format!("{text}{padding}")
    }))
}
