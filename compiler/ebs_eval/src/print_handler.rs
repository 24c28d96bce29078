//! Where `print` output goes.
//!
//! Hosts pick a destination when building the engine: standard output for
//! the command line, a buffer for tests and embedding UIs that show script
//! output, or nothing at all. Dispatch is a plain enum match.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Print destination.
#[derive(Debug)]
pub enum PrintHandler {
    /// Write each line to stdout.
    Stdout,
    /// Append to an in-memory buffer.
    Buffer(Mutex<String>),
    /// Discard output.
    Silent,
}

impl PrintHandler {
    /// Emit one line of script output.
    pub fn println(&self, line: &str) {
        match self {
            PrintHandler::Stdout => {
                let mut out = std::io::stdout().lock();
                // A closed stdout is not the script's problem.
                let _ = writeln!(out, "{line}");
            }
            PrintHandler::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(line);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Everything captured so far. Empty for non-buffering handlers.
    pub fn output(&self) -> String {
        match self {
            PrintHandler::Buffer(buffer) => buffer.lock().clone(),
            PrintHandler::Stdout | PrintHandler::Silent => String::new(),
        }
    }

    /// Drop captured output.
    pub fn clear(&self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared by an engine and every invocation it runs.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests;
