//! Parsed programs and named blocks.

use rustc_hash::FxHashMap;

use super::{Block, Expr, Stmt, TypeSpec};

/// A user-declared function.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedBlock {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeSpec>,
    pub body: Block,
    pub line: u32,
}

impl NamedBlock {
    /// Position of a parameter by (lowercased) name.
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub ty: TypeSpec,
    pub default: Option<Expr>,
}

/// A parsed script.
///
/// Immutable once built; the evaluator only reads it, so one `Program` can
/// be shared across threads behind an `Arc`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub name: String,
    /// Named blocks keyed by lowercased name.
    pub blocks: FxHashMap<String, NamedBlock>,
    /// Top-level statements in source order (declarations excluded).
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Program {
            name: name.into(),
            blocks: FxHashMap::default(),
            statements: Vec::new(),
        }
    }

    /// Look up a named block, case-insensitively.
    pub fn block(&self, name: &str) -> Option<&NamedBlock> {
        self.blocks
            .get(name)
            .or_else(|| self.blocks.get(&name.to_ascii_lowercase()))
    }

    /// Block names in sorted order.
    pub fn block_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.blocks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
