//! Driver tests: the `ebs` commands against files on disk.
//!
//! - `commands` - run, compile/exec, parse and lex
//! - `reporting` - rendered diagnostics and option parsing

mod commands;
mod reporting;
