//! Type annotations as written in the source.
//!
//! These are syntactic: alias names are resolved and array dimensions are
//! evaluated by the evaluator when the declaration runs.

use super::Expr;
use crate::TypeKeyword;

/// A parsed type annotation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeSpec {
    pub kind: TypeSpecKind,
    /// Array dimensions; `None` for a non-array type. Each entry is a size
    /// expression, or `None` for a dynamic dimension (`[]`).
    pub dims: Option<Vec<Option<Expr>>>,
}

impl TypeSpec {
    pub fn scalar(kind: TypeSpecKind) -> Self {
        TypeSpec { kind, dims: None }
    }

    pub fn is_array(&self) -> bool {
        self.dims.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeSpecKind {
    /// A built-in type keyword. `array` on its own means a dynamic array of
    /// any element type.
    Keyword(TypeKeyword),
    /// A `typedef` alias.
    Alias(String),
    /// `record { name: type, ... }`
    Record(Vec<FieldSpec>),
    /// `bitmap { ... }` (8 bits) or `intmap { ... }` (32 bits).
    Bits {
        width: BitWidth,
        fields: Vec<BitFieldSpec>,
    },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSpec {
    pub name: String,
    pub ty: TypeSpec,
}

/// Storage width of a packed bit-field type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum BitWidth {
    /// `bitmap`, backed by one byte.
    Byte,
    /// `intmap`, backed by 32 bits.
    Int,
}

impl BitWidth {
    pub fn bits(self) -> u8 {
        match self {
            BitWidth::Byte => 8,
            BitWidth::Int => 32,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BitWidth::Byte => "bitmap",
            BitWidth::Int => "intmap",
        }
    }
}

/// A named bit range `name: lo-hi` (inclusive) or single bit `name: n`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BitFieldSpec {
    pub name: String,
    pub start: u8,
    pub end: u8,
}
