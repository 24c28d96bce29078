//! Driver failures.

use std::io::{self, Write};

use ebs_eval::RunError;
use ebs_ir::CacheError;
use ebs_parse::SyntaxError;

use crate::diagnostic::{render_run_error, render_syntax_error};

/// Why a command failed. Every variant exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{error}")]
    Syntax {
        path: String,
        text: String,
        error: SyntaxError,
    },
    /// An error escaped the script. `text` is the source when it is known;
    /// compiled programs run without it.
    #[error("{error}")]
    Runtime {
        path: String,
        text: Option<String>,
        error: RunError,
    },
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error("{0}")]
    Usage(String),
}

impl DriverError {
    /// Write this error for a person to read, with source context where
    /// there is some.
    pub fn report(&self, out: &mut dyn Write, color: bool) -> io::Result<()> {
        match self {
            DriverError::Syntax { path, text, error } => {
                render_syntax_error(path, text, error, out, color)
            }
            DriverError::Runtime {
                path,
                text: Some(text),
                error,
            } => render_run_error(path, text, error, out, color),
            DriverError::Runtime {
                path,
                text: None,
                error,
            } => writeln!(out, "error in '{path}': {error}"),
            other => writeln!(out, "error: {other}"),
        }
    }
}
