//! `compile` writes a parsed program as a bincode image; `exec` runs one
//! without re-parsing.

use std::path::{Path, PathBuf};

use ebs_eval::{ExecutionResult, SharedPrintHandler};
use ebs_ir::Program;

use super::{execute, import_root, read_file};
use crate::{DriverError, RunOptions};

/// Extension of compiled program images.
const IMAGE_EXTENSION: &str = "ebc";

/// Parse the script at `path` and write its image to `output`, or next to
/// the script with an `.ebc` extension. Returns the path written.
pub fn compile_file(path: &str, output: Option<&Path>) -> Result<PathBuf, DriverError> {
    let text = read_file(path)?;
    let program = ebs_parse::parse(path, &text).map_err(|error| DriverError::Syntax {
        path: path.to_string(),
        text: text.clone(),
        error,
    })?;
    let bytes = program.to_bytes()?;
    let target = output.map_or_else(
        || Path::new(path).with_extension(IMAGE_EXTENSION),
        Path::to_path_buf,
    );
    std::fs::write(&target, &bytes).map_err(|source| DriverError::Write {
        path: target.display().to_string(),
        source,
    })?;
    tracing::info!(path, output = %target.display(), bytes = bytes.len(), "compiled");
    Ok(target)
}

/// Run a program image written by [`compile_file`].
pub fn exec_file(
    path: &str,
    options: &RunOptions,
    print: SharedPrintHandler,
) -> Result<ExecutionResult, DriverError> {
    let bytes = std::fs::read(path).map_err(|source| DriverError::Read {
        path: path.to_string(),
        source,
    })?;
    let program = Program::from_bytes(&bytes)?;
    tracing::debug!(path, program = %program.name, "loaded image");
    execute(program, import_root(path), options, print, None)
}
