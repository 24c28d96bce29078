//! EBS driver - the `ebs` command-line tool as a library.
//!
//! The binary in `main.rs` only parses arguments and reports errors; every
//! command lives in [`commands`] and returns a [`DriverError`] instead of
//! exiting, so the whole pipeline can be tested in-process.
//!
//! # Environment
//!
//! - `RUST_LOG`: enables logging (see [`init_tracing`])
//! - `EBS_LOG_TREE=1`: hierarchical log output instead of flat lines
//! - `EBS_MAX_CALL_DEPTH`: default for `--max-depth`

pub mod commands;
mod diagnostic;
mod error;
mod options;
mod tracing_setup;

pub use diagnostic::{line_range, render_run_error, render_syntax_error};
pub use error::DriverError;
pub use options::{RunOptions, MAX_DEPTH_ENV};
pub use tracing_setup::{init_tracing, LOG_TREE_ENV};
