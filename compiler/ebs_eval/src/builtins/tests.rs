#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{ArrayValue, DataType, SharedStore};
use ebs_ir::ExceptionKind;
use pretty_assertions::assert_eq;

fn call(name: &str, args: &[Value]) -> Result<Value, ScriptError> {
    let registry = BuiltinRegistry::with_core();
    registry
        .get(name)
        .unwrap_or_else(|| panic!("{name} is not registered"))
        .call(args)
}

fn strings(items: &[&str]) -> Value {
    Value::Array(ArrayValue::dynamic(
        DataType::String,
        items.iter().copied().map(Value::string).collect(),
    ))
}

fn ints(items: &[i32]) -> Value {
    Value::Array(ArrayValue::dynamic(
        DataType::Int,
        items.iter().copied().map(Value::Int).collect(),
    ))
}

fn error_kind(result: Result<Value, ScriptError>) -> ExceptionKind {
    result.unwrap_err().standard_kind().unwrap()
}

// Registry

#[test]
fn test_core_registry_contents() {
    let registry = BuiltinRegistry::with_core();
    assert!(registry.contains("str.toupper"));
    assert!(registry.contains("MATH.SQRT"));
    assert!(!registry.contains("shared.get"));
    assert!(registry.names().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(registry.len(), registry.names().len());
    assert!(BuiltinRegistry::new().is_empty());
}

#[test]
fn test_register_replaces_and_lowercases() {
    let mut registry = BuiltinRegistry::new();
    registry.register("Host.Answer", Arity::Exact(0), |_| Ok(Value::Int(41)));
    registry.register("host.answer", Arity::Exact(0), |_| Ok(Value::Int(42)));
    let builtin = registry.get("HOST.ANSWER").unwrap();
    assert_eq!(builtin.name(), "host.answer");
    assert_eq!(builtin.call(&[]).unwrap(), Value::Int(42));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_arity_checked_before_handler() {
    let err = call("str.toupper", &[]).unwrap_err();
    assert_eq!(err.standard_kind(), Some(ExceptionKind::Type));
    assert!(err.message.contains("1 argument"), "{}", err.message);
}

#[test]
fn test_arity_display() {
    assert_eq!(Arity::Exact(2).to_string(), "2 arguments");
    assert_eq!(Arity::Between(2, 3).to_string(), "2 to 3 arguments");
    assert_eq!(Arity::AtLeast(1).to_string(), "at least 1 argument");
    assert!(Arity::AtLeast(1).accepts(5));
    assert!(!Arity::Between(2, 3).accepts(4));
}

#[test]
fn test_extend_merges_registries() {
    let mut registry = BuiltinRegistry::new();
    registry.extend(BuiltinRegistry::with_core());
    assert!(registry.contains("array.sort"));
}

// str.*

#[test]
fn test_case_and_trim() {
    assert_eq!(call("str.toupper", &[Value::string("abc")]).unwrap(), Value::string("ABC"));
    assert_eq!(call("str.tolower", &[Value::string("AbC")]).unwrap(), Value::string("abc"));
    assert_eq!(call("str.trim", &[Value::string("  x ")]).unwrap(), Value::string("x"));
}

#[test]
fn test_string_argument_type_checked() {
    assert_eq!(error_kind(call("str.toupper", &[Value::Int(1)])), ExceptionKind::Type);
}

#[test]
fn test_searching() {
    let args = [Value::string("hello world"), Value::string("world")];
    assert_eq!(call("str.contains", &args).unwrap(), Value::Bool(true));
    assert_eq!(call("str.endswith", &args).unwrap(), Value::Bool(true));
    assert_eq!(call("str.startswith", &args).unwrap(), Value::Bool(false));
    assert_eq!(call("str.indexof", &args).unwrap(), Value::Int(6));
    let missing = [Value::string("abc"), Value::string("z")];
    assert_eq!(call("str.indexof", &missing).unwrap(), Value::Int(-1));
}

#[test]
fn test_indexof_counts_characters() {
    let args = [Value::string("héllo"), Value::string("l")];
    assert_eq!(call("str.indexof", &args).unwrap(), Value::Int(2));
}

#[test]
fn test_substring() {
    let text = Value::string("abcdef");
    assert_eq!(
        call("str.substring", &[text.clone(), Value::Int(2)]).unwrap(),
        Value::string("cdef")
    );
    assert_eq!(
        call("str.substring", &[text.clone(), Value::Int(1), Value::Int(3)]).unwrap(),
        Value::string("bc")
    );
    assert_eq!(
        error_kind(call("str.substring", &[text, Value::Int(4), Value::Int(9)])),
        ExceptionKind::Index
    );
}

#[test]
fn test_replace_split_join() {
    assert_eq!(
        call(
            "str.replace",
            &[Value::string("a-b-c"), Value::string("-"), Value::string("+")]
        )
        .unwrap(),
        Value::string("a+b+c")
    );
    let parts = call("str.split", &[Value::string("a,b,c"), Value::string(",")]).unwrap();
    assert_eq!(parts, strings(&["a", "b", "c"]));
    assert_eq!(
        call("str.join", &[parts, Value::string("|")]).unwrap(),
        Value::string("a|b|c")
    );
    assert_eq!(
        call("str.split", &[Value::string("ab"), Value::string("")]).unwrap(),
        strings(&["a", "b"])
    );
}

#[test]
fn test_isempty_and_padding() {
    assert_eq!(call("str.isempty", &[Value::Null]).unwrap(), Value::Bool(true));
    assert_eq!(call("str.isempty", &[Value::string("x")]).unwrap(), Value::Bool(false));
    assert_eq!(
        call("str.lpad", &[Value::string("7"), Value::Int(3), Value::string("0")]).unwrap(),
        Value::string("007")
    );
    assert_eq!(
        call("str.rpad", &[Value::string("ab"), Value::Int(4)]).unwrap(),
        Value::string("ab  ")
    );
    assert_eq!(
        error_kind(call(
            "str.lpad",
            &[Value::string("x"), Value::Int(3), Value::string("ab")]
        )),
        ExceptionKind::Type
    );
}

// math.*

#[test]
fn test_abs_keeps_kind() {
    assert_eq!(call("math.abs", &[Value::Int(-4)]).unwrap(), Value::Int(4));
    assert_eq!(call("math.abs", &[Value::Double(-1.5)]).unwrap(), Value::Double(1.5));
    assert_eq!(error_kind(call("math.abs", &[Value::Int(i32::MIN)])), ExceptionKind::Math);
}

#[test]
fn test_min_max_are_variadic() {
    let args = [Value::Int(3), Value::Double(1.5), Value::Long(9)];
    assert_eq!(call("math.min", &args).unwrap(), Value::Double(1.5));
    assert_eq!(call("math.max", &args).unwrap(), Value::Long(9));
    assert_eq!(
        error_kind(call("math.max", &[Value::Int(1), Value::string("2")])),
        ExceptionKind::Type
    );
}

#[test]
fn test_sqrt_and_rounding() {
    assert_eq!(call("math.sqrt", &[Value::Int(16)]).unwrap(), Value::Double(4.0));
    assert_eq!(error_kind(call("math.sqrt", &[Value::Int(-1)])), ExceptionKind::Math);
    assert_eq!(call("math.floor", &[Value::Double(2.7)]).unwrap(), Value::Double(2.0));
    assert_eq!(call("math.ceil", &[Value::Float(2.1)]).unwrap(), Value::Float(3.0));
    assert_eq!(call("math.round", &[Value::Double(2.5)]).unwrap(), Value::Double(3.0));
    assert_eq!(call("math.round", &[Value::Int(5)]).unwrap(), Value::Int(5));
}

// array.*

#[test]
fn test_add_returns_new_array() {
    let original = ints(&[1, 2]);
    let grown = call("array.add", &[original.clone(), Value::Byte(3)]).unwrap();
    assert_eq!(grown, ints(&[1, 2, 3]));
    assert_eq!(original, ints(&[1, 2]));
}

#[test]
fn test_add_to_fixed_array_fails() {
    let fixed = Value::Array(ArrayValue::fixed(DataType::Int, vec![Value::Int(0)]));
    assert_eq!(error_kind(call("array.add", &[fixed, Value::Int(1)])), ExceptionKind::Index);
}

#[test]
fn test_add_coerces_to_element_type() {
    assert_eq!(
        error_kind(call("array.add", &[ints(&[1]), Value::string("x")])),
        ExceptionKind::Type
    );
}

#[test]
fn test_remove() {
    assert_eq!(
        call("array.remove", &[ints(&[1, 2, 3]), Value::Int(1)]).unwrap(),
        ints(&[1, 3])
    );
    assert_eq!(
        error_kind(call("array.remove", &[ints(&[1]), Value::Int(1)])),
        ExceptionKind::Index
    );
}

#[test]
fn test_sort() {
    assert_eq!(call("array.sort", &[ints(&[3, 1, 2])]).unwrap(), ints(&[1, 2, 3]));
    assert_eq!(
        call("array.sort", &[strings(&["b", "c", "a"])]).unwrap(),
        strings(&["a", "b", "c"])
    );
    let mixed = Value::array(vec![Value::Int(1), Value::string("a")]);
    assert_eq!(error_kind(call("array.sort", &[mixed])), ExceptionKind::Type);
}

#[test]
fn test_fill_keeps_length() {
    let fixed = Value::Array(ArrayValue::fixed(DataType::Long, vec![Value::Long(0); 3]));
    assert_eq!(
        call("array.fill", &[fixed, Value::Int(7)]).unwrap(),
        Value::Array(ArrayValue::fixed(DataType::Long, vec![Value::Long(7); 3]))
    );
}

// map.*

#[test]
fn test_map_helpers() {
    let map = Value::Map(
        [("b", 2), ("a", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::Int(v)))
            .collect(),
    );
    assert_eq!(call("map.keys", &[map.clone()]).unwrap(), strings(&["a", "b"]));
    assert_eq!(
        call("map.has", &[map.clone(), Value::string("a")]).unwrap(),
        Value::Bool(true)
    );
    let removed = call("map.remove", &[map, Value::string("a")]).unwrap();
    assert_eq!(call("map.keys", &[removed]).unwrap(), strings(&["b"]));
}

#[test]
fn test_map_helpers_accept_records() {
    let record = Value::Record(crate::RecordValue::untyped(vec![
        ("Name".to_string(), Value::string("x")),
        ("age".to_string(), Value::Int(3)),
    ]));
    assert_eq!(call("map.keys", &[record.clone()]).unwrap(), strings(&["Name", "age"]));
    assert_eq!(
        call("map.has", &[record.clone(), Value::string("name")]).unwrap(),
        Value::Bool(true)
    );
    let removed = call("map.remove", &[record, Value::string("NAME")]).unwrap();
    assert_eq!(call("map.keys", &[removed]).unwrap(), strings(&["age"]));
    assert_eq!(error_kind(call("map.keys", &[Value::Int(1)])), ExceptionKind::Type);
}

// shared.*

#[test]
fn test_store_builtins_share_host_store() {
    let store = SharedStore::new();
    let mut registry = BuiltinRegistry::new();
    register_store(&mut registry, &store);
    let run = |name: &str, args: &[Value]| registry.get(name).unwrap().call(args).unwrap();

    assert_eq!(run("shared.get", &[Value::string("k")]), Value::Null);
    assert_eq!(run("shared.set", &[Value::string("k"), Value::Int(1)]), Value::Null);
    assert_eq!(store.get("k"), Some(Value::Int(1)));
    store.set("k", Value::Int(2));
    assert_eq!(run("shared.get", &[Value::string("k")]), Value::Int(2));
    assert_eq!(run("shared.has", &[Value::string("k")]), Value::Bool(true));
    assert_eq!(run("shared.remove", &[Value::string("k")]), Value::Int(2));
    assert!(store.is_empty());
}
