//! Command handlers for the `ebs` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading
//! sources and running a parsed program live here in the module root.

use std::path::Path;

use ebs_eval::{Engine, EngineBuilder, Environment, ExecutionResult, SharedPrintHandler};
use ebs_ir::Program;

use crate::{DriverError, RunOptions};

mod compile;
mod debug;
mod run;

pub use compile::{compile_file, exec_file};
pub use debug::{lex_file, parse_file};
pub use run::{run_file, run_source};

/// Read a source file into a string.
pub(crate) fn read_file(path: &str) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_string(),
        source,
    })
}

/// Directory imports of the file at `path` resolve against.
fn import_root(path: &str) -> &Path {
    Path::new(path)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Run `program` in a fresh environment.
fn execute(
    program: Program,
    root: &Path,
    options: &RunOptions,
    print: SharedPrintHandler,
    text: Option<&str>,
) -> Result<ExecutionResult, DriverError> {
    let path = program.name.clone();
    let config = EngineBuilder::new()
        .print_handler(print)
        .max_call_depth(options.max_call_depth)
        .import_root(root)
        .build();
    let engine = Engine::new(program, config);
    let mut env = Environment::new();
    engine
        .execute(&mut env)
        .map_err(|error| DriverError::Runtime {
            path,
            text: text.map(str::to_string),
            error,
        })
}
