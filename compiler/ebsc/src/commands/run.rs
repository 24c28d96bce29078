//! The `run` command: parse and execute a script.

use std::path::Path;

use ebs_eval::{ExecutionResult, SharedPrintHandler};

use super::{execute, import_root, read_file};
use crate::{DriverError, RunOptions};

/// Run the script at `path`. Imports resolve relative to its directory.
pub fn run_file(
    path: &str,
    options: &RunOptions,
    print: SharedPrintHandler,
) -> Result<ExecutionResult, DriverError> {
    let text = read_file(path)?;
    run_source(path, &text, import_root(path), options, print)
}

/// Parse and run `text` as the script named `path`.
pub fn run_source(
    path: &str,
    text: &str,
    root: &Path,
    options: &RunOptions,
    print: SharedPrintHandler,
) -> Result<ExecutionResult, DriverError> {
    let program = ebs_parse::parse(path, text).map_err(|error| DriverError::Syntax {
        path: path.to_string(),
        text: text.to_string(),
        error,
    })?;
    tracing::debug!(
        path,
        blocks = program.blocks.len(),
        statements = program.statements.len(),
        "parsed"
    );
    let result = execute(program, root, options, print, Some(text))?;
    tracing::debug!(
        path,
        statements = result.statements,
        imports = result.imports.len(),
        "run complete"
    );
    Ok(result)
}
