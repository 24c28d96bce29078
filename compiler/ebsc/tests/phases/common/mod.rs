//! Shared helpers for phase tests.

use std::sync::Arc;

use ebs_eval::{buffer_handler, Engine, EngineBuilder, Environment, RunError};
use ebs_ir::Program;

/// Outcome of a scripted run: the result and everything printed.
pub struct Run {
    pub result: Result<usize, RunError>,
    pub output: String,
}

impl Run {
    /// Printed lines. Panics if the run failed.
    pub fn lines(&self) -> Vec<&str> {
        if let Err(error) = &self.result {
            panic!("script failed: {error}\noutput so far:\n{}", self.output);
        }
        self.output.lines().collect()
    }

    pub fn error(&self) -> &RunError {
        match &self.result {
            Err(error) => error,
            Ok(_) => panic!("expected the script to fail, output:\n{}", self.output),
        }
    }
}

pub fn parse_ok(source: &str) -> Program {
    match ebs_parse::parse("test", source) {
        Ok(program) => program,
        Err(err) => panic!("unexpected syntax error: {err}"),
    }
}

/// Execute an already parsed program with buffered output.
pub fn run_program(program: Program) -> Run {
    let output = buffer_handler();
    let config = EngineBuilder::new()
        .print_handler(Arc::clone(&output))
        .build();
    let engine = Engine::new(program, config);
    let mut env = Environment::new();
    let result = engine.execute(&mut env).map(|done| done.statements);
    Run {
        result,
        output: output.output(),
    }
}

/// Parse and execute `source` with buffered output.
pub fn run(source: &str) -> Run {
    run_program(parse_ok(source))
}
