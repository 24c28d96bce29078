//! Stringification used by `print`, `+` concatenation and `string()`.
//!
//! Top-level strings print bare; strings inside containers are quoted.
//! Floating point values always show a fractional part.

use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, false)
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, nested: bool) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(v) => write!(f, "{v}"),
        Value::Byte(v) => write!(f, "{v}"),
        Value::Int(v) => write!(f, "{v}"),
        Value::Long(v) => write!(f, "{v}"),
        Value::Float(v) => f.write_str(&with_fraction(v.to_string())),
        Value::Double(v) => f.write_str(&with_fraction(v.to_string())),
        Value::Str(s) if nested => write!(f, "\"{s}\""),
        Value::Str(s) => f.write_str(s),
        Value::Date(d) => write!(f, "{d}"),
        Value::Array(array) => {
            f.write_str("[")?;
            for (i, item) in array.items().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, true)?;
            }
            f.write_str("]")
        }
        Value::Record(record) => write_entries(
            f,
            record
                .fields()
                .iter()
                .map(|field| (field.name.as_str(), &field.value)),
        ),
        Value::Map(map) => write_entries(f, map.iter().map(|(k, v)| (k.as_str(), v))),
        Value::Bits(bits) => {
            let entries = bits.entries();
            write_entries(f, entries.iter().map(|(k, v)| (k.as_str(), v)))
        }
    }
}

fn write_entries<'v>(
    f: &mut fmt::Formatter<'_>,
    entries: impl Iterator<Item = (&'v str, &'v Value)>,
) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: ")?;
        write_value(f, value, true)?;
    }
    f.write_str("}")
}

fn with_fraction(mut text: String) -> String {
    let is_plain = text.bytes().all(|b| b.is_ascii_digit() || b == b'-');
    if is_plain {
        text.push_str(".0");
    }
    text
}
