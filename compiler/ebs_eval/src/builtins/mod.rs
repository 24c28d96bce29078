//! Built-in function registry.
//!
//! External subsystems expose functionality to scripts by registering
//! dotted names (`namespace.function`) here. A call first looks for a named
//! block with that name, then for a built-in. Built-ins receive evaluated
//! arguments and either return a value or raise a [`ScriptError`], which
//! scripts can catch like any other exception.
//!
//! The core set (`str.*`, `math.*`, `array.*`, `map.*`) is installed by
//! [`BuiltinRegistry::with_core`]; `shared.*` is added when the engine is
//! given a [`SharedStore`](crate::SharedStore).

mod array;
mod map;
mod math;
mod store;
mod string;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::errors::{wrong_arg_count, wrong_arg_type};
use crate::{ScriptError, Value};

pub(crate) use store::register as register_store;

/// A built-in implementation.
pub type BuiltinFn = Arc<dyn Fn(&[Value]) -> Result<Value, ScriptError> + Send + Sync>;

/// How many arguments a built-in accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive range.
    Between(usize, usize),
    /// Variadic with a minimum.
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::Between(min, max) => (min..=max).contains(&count),
            Arity::AtLeast(min) => count >= min,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match *self {
            Arity::Exact(n) => write!(f, "{n} argument{}", plural(n)),
            Arity::Between(min, max) => write!(f, "{min} to {max} arguments"),
            Arity::AtLeast(min) => write!(f, "at least {min} argument{}", plural(min)),
        }
    }
}

/// A registered built-in.
#[derive(Clone)]
pub struct Builtin {
    name: String,
    arity: Arity,
    handler: BuiltinFn,
}

impl Builtin {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Check the argument count, then run the handler.
    pub fn call(&self, args: &[Value]) -> Result<Value, ScriptError> {
        if !self.arity.accepts(args.len()) {
            return Err(wrong_arg_count(
                &self.name,
                &self.arity.to_string(),
                args.len(),
            ));
        }
        (self.handler)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Name → built-in table. Names are case-insensitive.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    entries: FxHashMap<String, Builtin>,
}

impl BuiltinRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the core `str`, `math`, `array` and `map` built-ins.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        string::register(&mut registry);
        math::register(&mut registry);
        array::register(&mut registry);
        map::register(&mut registry);
        registry
    }

    /// Register (or replace) `name`.
    pub fn register<F>(&mut self, name: &str, arity: Arity, handler: F)
    where
        F: Fn(&[Value]) -> Result<Value, ScriptError> + Send + Sync + 'static,
    {
        let name = name.to_ascii_lowercase();
        self.entries.insert(
            name.clone(),
            Builtin {
                name,
                arity,
                handler: Arc::new(handler),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.entries
            .get(name)
            .or_else(|| self.entries.get(&name.to_ascii_lowercase()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every entry of `other` into `self`, replacing clashes.
    pub fn extend(&mut self, other: BuiltinRegistry) {
        self.entries.extend(other.entries);
    }
}

// Argument helpers shared by the core built-ins. `position` is 1-based.

fn arg_str<'a>(name: &str, args: &'a [Value], position: usize) -> Result<&'a str, ScriptError> {
    match args.get(position - 1) {
        Some(Value::Str(s)) => Ok(s),
        other => Err(wrong_arg_type(name, position, "a string", kind(other))),
    }
}

fn arg_int(name: &str, args: &[Value], position: usize) -> Result<i64, ScriptError> {
    let value = args.get(position - 1);
    value
        .and_then(Value::as_integer)
        .ok_or_else(|| wrong_arg_type(name, position, "an integer", kind(value)))
}

fn arg_index(name: &str, args: &[Value], position: usize) -> Result<usize, ScriptError> {
    let value = arg_int(name, args, position)?;
    usize::try_from(value).map_err(|_| {
        wrong_arg_type(name, position, "a non-negative integer", &value.to_string())
    })
}

fn kind(value: Option<&Value>) -> &'static str {
    value.map_or("nothing", Value::kind_name)
}

#[cfg(test)]
mod tests;
