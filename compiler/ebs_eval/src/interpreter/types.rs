//! Resolving written types.
//!
//! Alias names are looked up in the environment and array dimensions are
//! evaluated each time a declaration runs, so `var a: int[n];` sizes the
//! array from the current value of `n`.

use std::sync::Arc;

use ebs_ir::{ExceptionKind, Expr, TypeKeyword, TypeSpec, TypeSpecKind};

use super::Interpreter;
use crate::errors::{type_mismatch, unknown_type_alias};
use crate::{BitsType, ControlSignal, DataType, ScriptError};

impl Interpreter<'_> {
    pub(crate) fn resolve_type(&mut self, spec: &TypeSpec) -> Result<DataType, ControlSignal> {
        let base = self.resolve_base(&spec.kind)?;
        let Some(dims) = &spec.dims else {
            return Ok(base);
        };
        let mut lens = Vec::with_capacity(dims.len());
        for dim in dims {
            lens.push(match dim {
                Some(expr) => Some(self.eval_dimension(expr)?),
                None => None,
            });
        }
        // [3, 4] is an array of 3 arrays of 4
        Ok(lens
            .into_iter()
            .rev()
            .fold(base, |elem, len| DataType::array(elem, len)))
    }

    fn resolve_base(&mut self, kind: &TypeSpecKind) -> Result<DataType, ControlSignal> {
        Ok(match kind {
            TypeSpecKind::Keyword(keyword) => match keyword {
                TypeKeyword::Byte => DataType::Byte,
                TypeKeyword::Int => DataType::Int,
                TypeKeyword::Long => DataType::Long,
                TypeKeyword::Float => DataType::Float,
                TypeKeyword::Double => DataType::Double,
                TypeKeyword::String => DataType::String,
                TypeKeyword::Bool => DataType::Bool,
                TypeKeyword::Date => DataType::Date,
                TypeKeyword::Map => DataType::Map,
                TypeKeyword::Record => DataType::Record(None),
                // `array` is the element type of a bare `array` declaration
                TypeKeyword::Array | TypeKeyword::Bitmap | TypeKeyword::Intmap => DataType::Any,
            },
            TypeSpecKind::Alias(name) => self
                .env
                .alias(name)
                .cloned()
                .ok_or_else(|| unknown_type_alias(name))?,
            TypeSpecKind::Record(fields) => {
                let mut resolved = Vec::with_capacity(fields.len());
                for field in fields {
                    resolved.push((field.name.clone(), self.resolve_type(&field.ty)?));
                }
                DataType::record(resolved)
            }
            TypeSpecKind::Bits { width, fields } => {
                DataType::Bits(Arc::new(BitsType::new(*width, fields.clone())))
            }
        })
    }

    fn eval_dimension(&mut self, expr: &Expr) -> Result<usize, ControlSignal> {
        let value = self.eval_expr(expr)?;
        let len = value
            .as_integer()
            .ok_or_else(|| type_mismatch("an integer array length", value.kind_name()))?;
        usize::try_from(len).map_err(|_| {
            ScriptError::new(
                ExceptionKind::Index,
                format!("array length must not be negative, found {len}"),
            )
            .into()
        })
    }

    /// `typedef name = type;`
    pub(crate) fn define_type_alias(
        &mut self,
        name: &str,
        spec: &TypeSpec,
    ) -> Result<(), ControlSignal> {
        let ty = match self.resolve_type(spec)? {
            DataType::Bits(bits) => DataType::Bits(Arc::new(bits.named(name))),
            other => other,
        };
        tracing::trace!(alias = name, ty = %ty.name(), "typedef");
        self.env.define_alias(name, ty);
        Ok(())
    }
}
