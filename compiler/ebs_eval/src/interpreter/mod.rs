//! Tree-walking interpreter.
//!
//! An [`Interpreter`] borrows the engine configuration and one
//! [`Environment`] for the length of a single `execute` or `invoke`.
//! Statements run in `exec.rs`, expressions in `expr.rs`; the remaining
//! modules hold the statement kinds with more than a few lines of logic:
//!
//! - `call.rs`: named block and built-in calls, argument binding
//! - `assign.rs`: assignment through index and field paths
//! - `exceptions.rs`: `try` and `raise`
//! - `types.rs`: resolving written types to [`DataType`](crate::DataType)
//! - `import.rs`: `import` statements
//!
//! # Program threading
//!
//! A block declared in an imported file runs with that file's [`Program`]
//! as the current program, so calls from its body resolve against its own
//! blocks first. The call frame guard swaps the program in and restores
//! the caller's on exit.

mod assign;
mod call;
mod exceptions;
mod exec;
mod expr;
mod import;
mod scope_guard;
mod types;

pub use scope_guard::ScopedInterpreter;

use std::sync::Arc;

use ebs_ir::Program;

use crate::{EngineConfig, Environment};

/// Evaluation state for one run.
pub struct Interpreter<'a> {
    /// The program whose blocks a call resolves against first.
    pub(crate) program: Arc<Program>,
    /// The program the engine was built with.
    main: Arc<Program>,
    pub(crate) config: &'a EngineConfig,
    pub(crate) env: &'a mut Environment,
    pub(crate) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(program: Arc<Program>, config: &'a EngineConfig, env: &'a mut Environment) -> Self {
        Interpreter {
            main: Arc::clone(&program),
            program,
            config,
            env,
            call_depth: 0,
        }
    }

    /// The program that declares block `name`: the current program, then
    /// the main program, then imports in import order.
    pub(crate) fn find_block(&self, name: &str) -> Option<Arc<Program>> {
        if self.program.block(name).is_some() {
            return Some(Arc::clone(&self.program));
        }
        if self.main.block(name).is_some() {
            return Some(Arc::clone(&self.main));
        }
        self.env.imported_block_owner(name)
    }
}
