//! Packed bit fields (`bitmap` in 8 bits, `intmap` in 32 bits).

use std::sync::Arc;

use ebs_ir::{BitFieldSpec, BitWidth};

use crate::errors::{bit_field_overflow, no_such_field};
use crate::{ScriptError, Value};

/// Layout of a bit field type.
#[derive(Clone, Debug, PartialEq)]
pub struct BitsType {
    alias: Option<String>,
    width: BitWidth,
    fields: Vec<BitFieldSpec>,
}

impl BitsType {
    pub fn new(width: BitWidth, fields: Vec<BitFieldSpec>) -> Self {
        BitsType {
            alias: None,
            width,
            fields,
        }
    }

    /// The same layout, named by a `typedef`.
    #[must_use]
    pub fn named(&self, alias: &str) -> Self {
        BitsType {
            alias: Some(alias.to_string()),
            ..self.clone()
        }
    }

    pub fn width(&self) -> BitWidth {
        self.width
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn fields(&self) -> &[BitFieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&BitFieldSpec> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Largest raw value the whole field set can hold.
    pub fn max_raw(&self) -> u32 {
        match self.width {
            BitWidth::Byte => u32::from(u8::MAX),
            BitWidth::Int => u32::MAX,
        }
    }

    /// `bitmap flags` when named, `bitmap {a: 0, b: 1-3}` otherwise.
    pub fn name(&self) -> String {
        let keyword = self.width.keyword();
        if let Some(alias) = &self.alias {
            return format!("{keyword} {alias}");
        }
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| {
                if field.start == field.end {
                    format!("{}: {}", field.name, field.start)
                } else {
                    format!("{}: {}-{}", field.name, field.start, field.end)
                }
            })
            .collect();
        format!("{keyword} {{{}}}", fields.join(", "))
    }
}

fn field_max(field: &BitFieldSpec) -> u32 {
    let bits = u32::from(field.end - field.start) + 1;
    if bits >= 32 {
        u32::MAX
    } else {
        (1u32 << bits) - 1
    }
}

/// A bit field value: a layout plus its raw bits.
#[derive(Clone, Debug, PartialEq)]
pub struct BitsValue {
    ty: Arc<BitsType>,
    raw: u32,
}

impl BitsValue {
    /// Wrap `raw`, which must fit the layout's width.
    pub fn new(ty: Arc<BitsType>, raw: i64) -> Result<Self, ScriptError> {
        match u32::try_from(raw) {
            Ok(raw) if raw <= ty.max_raw() => Ok(BitsValue { ty, raw }),
            _ => Err(bit_field_overflow(
                ty.width.keyword(),
                raw,
                ty.max_raw(),
            )),
        }
    }

    /// All fields zero.
    pub fn empty(ty: Arc<BitsType>) -> Self {
        BitsValue { ty, raw: 0 }
    }

    pub fn ty(&self) -> &Arc<BitsType> {
        &self.ty
    }

    pub fn raw(&self) -> u32 {
        self.raw
    }

    /// Read a field. Fields too wide for an `int` read as `long`.
    pub fn get(&self, name: &str) -> Result<Value, ScriptError> {
        let field = self.ty.field(name).ok_or_else(|| no_such_field(name))?;
        let value = (self.raw >> field.start) & field_max(field);
        Ok(Value::integer(i64::from(value)))
    }

    /// Write a field, leaving the other bits alone.
    pub fn set(&mut self, name: &str, value: i64) -> Result<(), ScriptError> {
        let field = self.ty.field(name).ok_or_else(|| no_such_field(name))?;
        let max = field_max(field);
        let bits = match u32::try_from(value) {
            Ok(bits) if bits <= max => bits,
            _ => return Err(bit_field_overflow(&field.name, value, max)),
        };
        let mask = max << field.start;
        self.raw = (self.raw & !mask) | (bits << field.start);
        Ok(())
    }

    /// Field names with their current values, in layout order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.ty
            .fields
            .iter()
            .map(|field| {
                let value = (self.raw >> field.start) & field_max(field);
                (field.name.clone(), Value::integer(i64::from(value)))
            })
            .collect()
    }

    pub(crate) fn retyped(&self, ty: Arc<BitsType>) -> Self {
        BitsValue { ty, raw: self.raw }
    }
}
