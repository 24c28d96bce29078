//! Runtime values.
//!
//! [`Value`] is a closed sum over every kind a script can hold. Containers
//! own their contents: assigning an array or record copies it, so no two
//! bindings ever alias the same storage and values can move freely between
//! threads.
//!
//! - `types.rs`: declared types (`DataType`) and `typeof` names
//! - `bits.rs`: packed bit field layouts
//! - `convert.rs`: coercion to declared types, casts, JSON input
//! - `display.rs`: stringification

mod bits;
mod convert;
mod display;
mod types;

use std::collections::BTreeMap;

use ebs_ir::{Date, Literal};

pub use bits::{BitsType, BitsValue};
pub use convert::{cast, coerce, default_value};
pub use types::{ArrayType, DataType, RecordType};

/// A script value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Byte(u8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Date(Date),
    Array(ArrayValue),
    Record(RecordValue),
    /// String-keyed map; iteration order is key order.
    Map(BTreeMap<String, Value>),
    Bits(BitsValue),
}

impl Value {
    /// Convenience constructor for string values.
    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// An untyped, growable array.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(ArrayValue::dynamic(DataType::Any, items))
    }

    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Int(v) => Value::Int(*v),
            Literal::Long(v) => Value::Long(*v),
            Literal::Float(v) => Value::Float(*v),
            Literal::Double(v) => Value::Double(*v),
            Literal::Bool(v) => Value::Bool(*v),
            Literal::Str(s) => Value::Str(s.clone()),
            Literal::Date(d) => Value::Date(*d),
            Literal::Null => Value::Null,
        }
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Byte(_) => "byte",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Record(_) => "record",
            Value::Map(_) => "map",
            Value::Bits(bits) => bits.ty().width().keyword(),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Byte(_) | Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_)
        )
    }

    /// Integer payload of `byte`, `int` and `long` values.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64`.
    #[allow(clippy::cast_precision_loss, reason = "long to double is lossy by nature")]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            other => other.as_integer().map(|v| v as f64),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Smallest of `int`/`long` that holds `value`.
    pub fn integer(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::Long(value),
        }
    }
}

/// An ordered array with an element type.
///
/// Fixed arrays keep their length for life; dynamic arrays grow by one when
/// assigned at `index == len`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayValue {
    elem: DataType,
    fixed: bool,
    items: Vec<Value>,
}

impl ArrayValue {
    pub fn dynamic(elem: DataType, items: Vec<Value>) -> Self {
        ArrayValue {
            elem,
            fixed: false,
            items,
        }
    }

    pub fn fixed(elem: DataType, items: Vec<Value>) -> Self {
        ArrayValue {
            elem,
            fixed: true,
            items,
        }
    }

    pub fn elem_type(&self) -> &DataType {
        &self.elem
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub(crate) fn items_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<Value> {
        self.items
    }
}

/// One field of a record value.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordField {
    pub name: String,
    /// Declared type; `Any` for fields that came from a literal.
    pub ty: DataType,
    pub value: Value,
}

/// A record: ordered, named fields. Field names match case-insensitively.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordValue {
    fields: Vec<RecordField>,
}

impl RecordValue {
    pub fn new(fields: Vec<RecordField>) -> Self {
        RecordValue { fields }
    }

    /// A record whose fields accept any value.
    pub fn untyped(pairs: Vec<(String, Value)>) -> Self {
        RecordValue {
            fields: pairs
                .into_iter()
                .map(|(name, value)| RecordField {
                    name,
                    ty: DataType::Any,
                    value,
                })
                .collect(),
        }
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.field(name).map(|field| &field.value)
    }

    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub(crate) fn field_mut(&mut self, name: &str) -> Option<&mut RecordField> {
        self.fields
            .iter_mut()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    pub fn into_pairs(self) -> Vec<(String, Value)> {
        self.fields
            .into_iter()
            .map(|field| (field.name, field.value))
            .collect()
    }
}
