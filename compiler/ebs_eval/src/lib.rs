//! EBS Eval - tree-walking evaluator and embedding API for EBS scripts.
//!
//! # Architecture
//!
//! - [`Value`]/[`DataType`]: the closed value model, coercion and casts
//! - [`Environment`]: scope stack, type aliases and imports of one run
//! - [`ControlSignal`]: `return`/`break`/`continue`/raised errors, carried
//!   in the `Err` side of [`EvalResult`]
//! - [`Interpreter`]: statement and expression evaluation
//! - [`BuiltinRegistry`]: functions hosts expose to scripts by dotted name
//! - [`OpaqueRegistry`]: handlers for host-defined statement forms
//! - [`Engine`]: the `execute`/`invoke` entry points
//!
//! Operators dispatch directly on the value enum in [`evaluate_binary`]
//! and [`evaluate_unary`].

mod builtins;
mod config;
mod engine;
mod environment;
pub mod errors;
pub mod interpreter;
mod loader;
mod opaque;
mod operators;
mod print_handler;
mod shared;
mod unary_operators;
mod value;

pub use builtins::{Arity, Builtin, BuiltinFn, BuiltinRegistry};
pub use config::{EngineBuilder, EngineConfig, DEFAULT_MAX_CALL_DEPTH};
pub use engine::{Engine, ExecutionResult};
pub use environment::{AssignError, Binding, Environment, Mutability};
pub use errors::{
    ControlFlowError, ControlSignal, EvalResult, ExecResult, RunError, ScriptError,
    ScriptErrorKind,
};
pub use interpreter::{Interpreter, ScopedInterpreter};
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use opaque::{OpaqueHandler, OpaqueRegistry};
pub use operators::{compare_values, evaluate_binary, values_equal};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use shared::{SharedMutableRegistry, SharedStore};
pub use unary_operators::evaluate_unary;
pub use value::{
    cast, coerce, default_value, ArrayType, ArrayValue, BitsType, BitsValue, DataType,
    RecordField, RecordType, RecordValue, Value,
};
