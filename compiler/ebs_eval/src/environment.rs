//! Runtime state of one execution: the scope stack, type aliases and
//! imported programs.
//!
//! Scopes form a stack with the global scope at the bottom. A named block
//! invocation opens a *frame*: lookups inside it see the frame's own scopes
//! and the global scope, never the caller's locals.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use ebs_ir::Program;

use crate::{DataType, Value};

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `var x = ...`
    Mutable,
    /// `const x = ...`
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

/// Why [`Environment::assign`] failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    Immutable,
    Undefined,
}

/// A variable: its declared type, value and mutability.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub(crate) value: Value,
    pub(crate) ty: DataType,
    pub(crate) mutability: Mutability,
}

impl Binding {
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Declared type; `Any` for untyped bindings.
    pub fn ty(&self) -> &DataType {
        &self.ty
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }
}

#[derive(Clone, Debug, Default)]
struct Scope {
    bindings: FxHashMap<String, Binding>,
}

/// Scope stack plus per-execution tables.
///
/// Each execution or invocation owns its environment; environments are never
/// shared between threads while in use.
#[derive(Clone, Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    /// First scope of the innermost frame. 0 outside any named block.
    frame_base: usize,
    aliases: FxHashMap<String, DataType>,
    imports: Vec<(String, Arc<Program>)>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl Environment {
    /// A fresh environment holding only an empty global scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
            frame_base: 0,
            aliases: FxHashMap::default(),
            imports: Vec::new(),
        }
    }

    /// Number of scopes on the stack, global included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Pop the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Open a call frame with one empty scope. Returns the token that
    /// [`Environment::leave_frame`] needs.
    pub fn enter_frame(&mut self) -> usize {
        let saved = self.frame_base;
        self.frame_base = self.scopes.len();
        self.scopes.push(Scope::default());
        saved
    }

    /// Drop every scope of the current frame and restore the caller's.
    pub fn leave_frame(&mut self, saved: usize) {
        self.scopes.truncate(self.frame_base.max(1));
        self.frame_base = saved;
    }

    /// Declare `name` in the innermost scope, shadowing outer bindings.
    pub fn declare(&mut self, name: &str, ty: DataType, value: Value, mutability: Mutability) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(
                key(name),
                Binding {
                    value,
                    ty,
                    mutability,
                },
            );
        }
    }

    /// Declare an untyped, mutable variable. Hosts use this to seed globals.
    pub fn define(&mut self, name: &str, value: Value) {
        self.declare(name, DataType::Any, value, Mutability::Mutable);
    }

    /// Indices of the visible scopes, innermost first.
    fn visible(&self) -> impl Iterator<Item = usize> {
        let global = (self.frame_base > 0).then_some(0);
        (self.frame_base..self.scopes.len()).rev().chain(global)
    }

    fn find(&self, name: &str) -> Option<usize> {
        let name = key(name);
        self.visible()
            .find(|&index| self.scopes[index].bindings.contains_key(&name))
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        let index = self.find(name)?;
        self.scopes[index].bindings.get(&key(name))
    }

    pub(crate) fn lookup_mut(&mut self, name: &str) -> Option<&mut Binding> {
        let index = self.find(name)?;
        self.scopes[index].bindings.get_mut(&key(name))
    }

    /// Current value of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.lookup(name).map(Binding::value)
    }

    /// Overwrite the value of an existing mutable binding. The value is
    /// stored as given; callers coerce to the declared type first.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        let binding = self.lookup_mut(name).ok_or(AssignError::Undefined)?;
        if !binding.mutability.is_mutable() {
            return Err(AssignError::Immutable);
        }
        binding.value = value;
        Ok(())
    }

    pub fn alias(&self, name: &str) -> Option<&DataType> {
        self.aliases.get(&key(name))
    }

    pub fn define_alias(&mut self, name: &str, ty: DataType) {
        self.aliases.insert(key(name), ty);
    }

    pub fn is_imported(&self, path: &str) -> bool {
        self.imports.iter().any(|(imported, _)| imported == path)
    }

    pub(crate) fn record_import(&mut self, path: &str, program: Arc<Program>) {
        self.imports.push((path.to_string(), program));
    }

    /// Paths imported so far, in import order.
    pub fn imports(&self) -> Vec<&str> {
        self.imports.iter().map(|(path, _)| path.as_str()).collect()
    }

    /// The first imported program that declares block `name`.
    pub(crate) fn imported_block_owner(&self, name: &str) -> Option<Arc<Program>> {
        self.imports
            .iter()
            .find(|(_, program)| program.block(name).is_some())
            .map(|(_, program)| Arc::clone(program))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
