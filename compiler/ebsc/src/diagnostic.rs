//! Error rendering with source snippets.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use ebs_eval::{RunError, ScriptError};
use ebs_parse::SyntaxError;

/// Render a lex or parse error against `source`.
pub fn render_syntax_error(
    path: &str,
    source: &str,
    error: &SyntaxError,
    out: &mut dyn Write,
    color: bool,
) -> io::Result<()> {
    let range = error.span().to_range();
    let range = range.start.min(source.len())..range.end.min(source.len());
    let title = match error {
        SyntaxError::Lex(_) => "lex error",
        SyntaxError::Parse(_) => "parse error",
    };
    Report::build(ReportKind::Error, path, range.start)
        .with_message(format!("{title} at line {}", error.line()))
        .with_config(Config::default().with_color(color))
        .with_label(Label::new((path, range)).with_message(error.label()))
        .finish()
        .write((path, Source::from(source)), out)
}

/// Render an error that escaped `execute`. Runtime errors point at the
/// line that raised them.
pub fn render_run_error(
    path: &str,
    source: &str,
    error: &RunError,
    out: &mut dyn Write,
    color: bool,
) -> io::Result<()> {
    match error {
        RunError::Runtime(error) => render_script_error(path, source, error, out, color),
        RunError::ControlFlow(error) => writeln!(out, "error in '{path}': {error}"),
    }
}

fn render_script_error(
    path: &str,
    source: &str,
    error: &ScriptError,
    out: &mut dyn Write,
    color: bool,
) -> io::Result<()> {
    let Some(range) = line_range(source, error.line) else {
        return writeln!(out, "error in '{path}': {error}");
    };
    Report::build(ReportKind::Error, path, range.start)
        .with_code(error.kind.name())
        .with_message(format!("uncaught {} at line {}", error.kind, error.line))
        .with_config(Config::default().with_color(color))
        .with_label(Label::new((path, range)).with_message(&error.message))
        .finish()
        .write((path, Source::from(source)), out)
}

/// Byte range of 1-based `line` in `source`, without its line ending.
pub fn line_range(source: &str, line: u32) -> Option<Range<usize>> {
    let mut start = 0;
    for (number, text) in (1..).zip(source.split_inclusive('\n')) {
        if number == line {
            let trimmed = text.trim_end_matches(|c| c == '\n' || c == '\r');
            return Some(start..start + trimmed.len());
        }
        start += text.len();
    }
    None
}
