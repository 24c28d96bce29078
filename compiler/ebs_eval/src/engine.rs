//! Host entry points.
//!
//! An [`Engine`] pairs one parsed [`Program`] with an [`EngineConfig`].
//! It holds no per-run state, so one engine can serve any number of
//! threads at once: each `execute` or `invoke` brings its own
//! [`Environment`].
//!
//! ```text
//! let program = ebs_parse::parse("main", source)?;
//! let engine = Engine::new(program, EngineConfig::default());
//! let mut env = Environment::new();
//! engine.execute(&mut env)?;
//! // later, from a UI callback thread with its own environment:
//! engine.invoke("onclick", vec![Value::Int(1)], &mut callback_env)?;
//! ```

use std::sync::Arc;

use ebs_ir::Program;

use crate::errors::{undefined_block, wrong_arg_count};
use crate::interpreter::Interpreter;
use crate::{BuiltinRegistry, EngineConfig, Environment, RunError, SharedMutableRegistry, Value};

/// What a completed `execute` reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Top-level statements of the main program that ran.
    pub statements: usize,
    /// Paths imported during the run, in import order.
    pub imports: Vec<String>,
}

/// A program ready to run.
#[derive(Clone, Debug)]
pub struct Engine {
    program: Arc<Program>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(program: Program, config: EngineConfig) -> Self {
        Self::from_shared(Arc::new(program), config)
    }

    pub fn from_shared(program: Arc<Program>, config: EngineConfig) -> Self {
        Engine { program, config }
    }

    pub fn program(&self) -> &Arc<Program> {
        &self.program
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The built-in registry; hosts may register more at any time.
    pub fn builtins(&self) -> &SharedMutableRegistry<BuiltinRegistry> {
        self.config.builtins()
    }

    /// Run the program's top-level statements against `env`.
    ///
    /// Named blocks become callable through [`Engine::invoke`] with the
    /// same environment afterwards, including blocks of imported files.
    pub fn execute(&self, env: &mut Environment) -> Result<ExecutionResult, RunError> {
        let mut interpreter = Interpreter::new(Arc::clone(&self.program), &self.config, env);
        match interpreter.exec_statements(&self.program.statements) {
            Ok(statements) => Ok(ExecutionResult {
                statements,
                imports: env.imports().into_iter().map(str::to_string).collect(),
            }),
            Err(signal) => {
                let error = RunError::from_signal(signal);
                tracing::warn!(program = %self.program.name, %error, "execution failed");
                Err(error)
            }
        }
    }

    /// Call named block `name` with positional arguments.
    ///
    /// Errors are logged here as well as returned, since callers on
    /// callback threads often have nowhere to report them.
    pub fn invoke(
        &self,
        name: &str,
        args: Vec<Value>,
        env: &mut Environment,
    ) -> Result<Value, RunError> {
        let result = self.invoke_inner(name, args, env);
        if let Err(error) = &result {
            tracing::error!(program = %self.program.name, block = name, %error, "invoke failed");
        }
        result
    }

    fn invoke_inner(
        &self,
        name: &str,
        args: Vec<Value>,
        env: &mut Environment,
    ) -> Result<Value, RunError> {
        let mut interpreter = Interpreter::new(Arc::clone(&self.program), &self.config, env);
        let owner = interpreter
            .find_block(name)
            .ok_or_else(|| RunError::Runtime(undefined_block(name)))?;
        let params = owner.block(name).map_or(0, |block| block.params.len());
        if args.len() > params {
            return Err(RunError::Runtime(wrong_arg_count(
                name,
                &format!("at most {params}"),
                args.len(),
            )));
        }
        let mut slots: Vec<Option<Value>> = args.into_iter().map(Some).collect();
        slots.resize(params, None);
        interpreter
            .call_block(owner, name, slots)
            .map_err(RunError::from_signal)
    }
}
