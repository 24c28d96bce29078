//! Runtime errors and control signals.
//!
//! Everything that leaves a statement early travels as a [`ControlSignal`]
//! in the `Err` side of [`EvalResult`]/[`ExecResult`]: `return`, `break`,
//! `continue`, raised exceptions, and control-flow faults.
//!
//! The constructors below are the single place runtime error messages are
//! written. They are `#[cold]` so the happy path stays tight.

use std::fmt;

use ebs_ir::{BinaryOp, ExceptionKind, UnaryOp};

use crate::Value;

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, ControlSignal>;

/// Result of executing a statement.
pub type ExecResult = Result<(), ControlSignal>;

/// Non-local exit from a statement or expression.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlSignal {
    /// `return`, caught by the nearest named block invocation.
    Return(Value),
    /// `break`, caught by the nearest loop.
    Break,
    /// `continue`, caught by the nearest loop.
    Continue,
    /// A raised exception, caught by the first matching `when` handler.
    Raised(ScriptError),
    /// A control-flow misuse found while unwinding. Never caught by `try`.
    Fault(ControlFlowError),
}

impl From<ScriptError> for ControlSignal {
    fn from(error: ScriptError) -> Self {
        ControlSignal::Raised(error)
    }
}

/// The kind of a raised exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptErrorKind {
    Standard(ExceptionKind),
    /// A user-named exception, spelled as written in the `raise`.
    Custom(String),
}

impl ScriptErrorKind {
    pub fn name(&self) -> &str {
        match self {
            ScriptErrorKind::Standard(kind) => kind.name(),
            ScriptErrorKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for ScriptErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recoverable runtime error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind} at line {line}: {message}")]
pub struct ScriptError {
    pub kind: ScriptErrorKind,
    pub message: String,
    /// Arguments of a custom `raise`, in order.
    pub params: Vec<Value>,
    /// Source line; 0 until the failing statement stamps it.
    pub line: u32,
}

impl ScriptError {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        ScriptError {
            kind: ScriptErrorKind::Standard(kind),
            message: message.into(),
            params: Vec::new(),
            line: 0,
        }
    }

    /// A custom exception. The message is `Name: p1, p2`.
    pub fn custom(name: impl Into<String>, params: Vec<Value>) -> Self {
        let name = name.into();
        let message = if params.is_empty() {
            name.clone()
        } else {
            let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
            format!("{name}: {}", rendered.join(", "))
        };
        ScriptError {
            kind: ScriptErrorKind::Custom(name),
            message,
            params,
            line: 0,
        }
    }

    /// Stamp `line` unless a line is already recorded.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        if self.line == 0 {
            self.line = line;
        }
        self
    }

    /// The standard kind, if this is not a custom exception.
    pub fn standard_kind(&self) -> Option<ExceptionKind> {
        match self.kind {
            ScriptErrorKind::Standard(kind) => Some(kind),
            ScriptErrorKind::Custom(_) => None,
        }
    }
}

/// `return`, `break` or `continue` used where nothing can catch it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ControlFlowError {
    #[error("'break' used outside of a loop")]
    Break,
    #[error("'continue' used outside of a loop")]
    Continue,
    #[error("'return' used outside of a named block")]
    Return,
}

/// An error that escaped `execute` or `invoke`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Runtime(ScriptError),
    #[error(transparent)]
    ControlFlow(ControlFlowError),
}

impl RunError {
    /// Convert a signal that reached the top of a run.
    pub fn from_signal(signal: ControlSignal) -> Self {
        match signal {
            ControlSignal::Raised(error) => RunError::Runtime(error),
            ControlSignal::Fault(error) => RunError::ControlFlow(error),
            ControlSignal::Return(_) => RunError::ControlFlow(ControlFlowError::Return),
            ControlSignal::Break => RunError::ControlFlow(ControlFlowError::Break),
            ControlSignal::Continue => RunError::ControlFlow(ControlFlowError::Continue),
        }
    }
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> ScriptError {
    ScriptError::new(ExceptionKind::Math, "division by zero")
}

#[cold]
pub fn modulo_by_zero() -> ScriptError {
    ScriptError::new(ExceptionKind::Math, "modulo by zero")
}

#[cold]
pub fn integer_overflow(op: BinaryOp) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Math,
        format!("integer overflow in '{op}'"),
    )
}

#[cold]
pub fn negation_overflow() -> ScriptError {
    ScriptError::new(ExceptionKind::Math, "integer overflow in negation")
}

// Operators and types

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("operator '{op}' cannot be applied to {left} and {right}"),
    )
}

#[cold]
pub fn invalid_unary_op(op: UnaryOp, operand: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("operator '{op}' cannot be applied to {operand}"),
    )
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("expected {expected}, found {got}"),
    )
}

#[cold]
pub fn cannot_cast(from: &str, to: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("cannot cast {from} to {to}"))
}

#[cold]
pub fn condition_not_bool(got: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("condition must be a bool, found {got}"),
    )
}

#[cold]
pub fn unknown_type_alias(name: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("unknown type '{name}'"))
}

#[cold]
pub fn not_iterable(got: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("cannot iterate over {got}"))
}

#[cold]
pub fn no_length(got: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("{got} has no length"))
}

// Names

#[cold]
pub fn undefined_variable(name: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::NotFound,
        format!("variable '{name}' is not declared"),
    )
}

#[cold]
pub fn undefined_block(name: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::NotFound,
        format!("no named block or built-in called '{name}'"),
    )
}

#[cold]
pub fn constant_assignment(name: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Access,
        format!("cannot assign to constant '{name}'"),
    )
}

// Indexing and fields

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Index,
        format!("index {index} is out of bounds for length {len}"),
    )
}

#[cold]
pub fn cannot_index(got: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("cannot index into {got}"))
}

#[cold]
pub fn invalid_index(got: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("index must be an integer, found {got}"),
    )
}

#[cold]
pub fn fixed_array_growth(len: usize) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Index,
        format!("cannot grow a fixed array of length {len}"),
    )
}

#[cold]
pub fn no_such_field(field: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::NotFound,
        format!("no field named '{field}'"),
    )
}

#[cold]
pub fn no_fields(got: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Type, format!("{got} has no fields"))
}

#[cold]
pub fn null_access(what: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Null, format!("cannot {what} null"))
}

#[cold]
pub fn bit_field_overflow(field: &str, value: i64, max: u32) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Validation,
        format!("value {value} does not fit bit field '{field}' (0 to {max})"),
    )
}

// Calls

#[cold]
pub fn wrong_arg_count(name: &str, expected: &str, got: usize) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("'{name}' takes {expected} but {got} were given"),
    )
}

#[cold]
pub fn wrong_arg_type(name: &str, position: usize, expected: &str, got: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("argument {position} of '{name}' must be {expected}, found {got}"),
    )
}

#[cold]
pub fn unknown_parameter(block: &str, param: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("'{block}' has no parameter named '{param}'"),
    )
}

#[cold]
pub fn duplicate_argument(block: &str, param: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("parameter '{param}' of '{block}' is given more than once"),
    )
}

#[cold]
pub fn missing_argument(block: &str, param: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("missing argument for parameter '{param}' of '{block}'"),
    )
}

#[cold]
pub fn named_builtin_argument(name: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Type,
        format!("built-in '{name}' does not take named arguments"),
    )
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Validation,
        format!("call depth limit of {limit} exceeded"),
    )
}

// Host integration

#[cold]
pub fn import_failed(path: &str, reason: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::Io,
        format!("cannot import '{path}': {reason}"),
    )
}

#[cold]
pub fn import_parse_failed(path: &str, reason: &str) -> ScriptError {
    ScriptError::new(ExceptionKind::Parse, format!("in '{path}': {reason}"))
}

#[cold]
pub fn no_opaque_handler(keyword: &str) -> ScriptError {
    ScriptError::new(
        ExceptionKind::NotFound,
        format!("no handler registered for '{keyword}' statements"),
    )
}

#[cfg(test)]
mod tests;
