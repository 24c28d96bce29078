//! Declared types and `typeof` names.

use std::fmt::Write as _;
use std::sync::Arc;

use super::{BitsType, Value};

/// A resolved type: what a binding, field, parameter or element accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum DataType {
    Any,
    Byte,
    Int,
    Long,
    Float,
    Double,
    String,
    Bool,
    Date,
    Map,
    /// `None` is the bare `record` keyword: any record.
    Record(Option<Arc<RecordType>>),
    Array(Arc<ArrayType>),
    Bits(Arc<BitsType>),
}

/// Fields of a record type, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordType {
    pub fields: Vec<(String, DataType)>,
}

impl RecordType {
    pub fn field(&self, name: &str) -> Option<&DataType> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, ty)| ty)
    }
}

/// One array dimension: element type and optional fixed length.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayType {
    pub elem: DataType,
    pub len: Option<usize>,
}

impl DataType {
    pub fn array(elem: DataType, len: Option<usize>) -> Self {
        DataType::Array(Arc::new(ArrayType { elem, len }))
    }

    pub fn record(fields: Vec<(String, DataType)>) -> Self {
        DataType::Record(Some(Arc::new(RecordType { fields })))
    }

    /// The `typeof` spelling of this type.
    pub fn name(&self) -> String {
        match self {
            DataType::Any => "any".to_string(),
            DataType::Byte => "byte".to_string(),
            DataType::Int => "int".to_string(),
            DataType::Long => "long".to_string(),
            DataType::Float => "float".to_string(),
            DataType::Double => "double".to_string(),
            DataType::String => "string".to_string(),
            DataType::Bool => "bool".to_string(),
            DataType::Date => "date".to_string(),
            DataType::Map => "map".to_string(),
            DataType::Record(None) => "record".to_string(),
            DataType::Record(Some(record)) => {
                let fields: Vec<String> = record
                    .fields
                    .iter()
                    .map(|(name, ty)| format!("{name}:{}", ty.name()))
                    .collect();
                record_signature(&fields)
            }
            DataType::Array(array) => {
                let mut dims = vec![array.len];
                let mut elem = &array.elem;
                while let DataType::Array(inner) = elem {
                    dims.push(inner.len);
                    elem = &inner.elem;
                }
                array_signature(&elem.name(), &dims)
            }
            DataType::Bits(bits) => bits.name(),
        }
    }
}

impl Value {
    /// The `typeof` name of this value.
    pub fn type_name(&self) -> String {
        match self {
            Value::Array(array) => {
                let mut dims = vec![array.is_fixed().then_some(array.len())];
                let mut elem = array.elem_type();
                while let DataType::Array(inner) = elem {
                    dims.push(inner.len);
                    elem = &inner.elem;
                }
                let base = match elem {
                    DataType::Any => "any".to_string(),
                    other => other.name(),
                };
                array_signature(&base, &dims)
            }
            Value::Record(record) => {
                let fields: Vec<String> = record
                    .fields()
                    .iter()
                    .map(|field| {
                        let ty = match field.ty {
                            DataType::Any => field.value.type_name(),
                            ref declared => declared.name(),
                        };
                        format!("{}:{ty}", field.name)
                    })
                    .collect();
                record_signature(&fields)
            }
            Value::Bits(bits) => bits.ty().name(),
            other => other.kind_name().to_string(),
        }
    }
}

fn record_signature(fields: &[String]) -> String {
    format!("record {{{}}}", fields.join(", "))
}

/// `array.int[3]`, `array.int[3,4]`, `array.record[2] {a:int}`.
fn array_signature(elem: &str, dims: &[Option<usize>]) -> String {
    let (base, suffix) = match elem.split_once(' ') {
        Some((base, rest)) => (base, Some(rest)),
        None => (elem, None),
    };
    let mut out = format!("array.{base}[");
    for (i, dim) in dims.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if let Some(len) = dim {
            let _ = write!(out, "{len}");
        }
    }
    out.push(']');
    if let Some(suffix) = suffix {
        out.push(' ');
        out.push_str(suffix);
    }
    out
}
