//! `try`/`exceptions` and `raise exception`.
//!
//! Handlers are tried in order; the first whose label matches runs in a
//! new scope with its capture variables bound. Only raised exceptions are
//! caught. `return`, `break` and `continue` pass through a `try` as if it
//! were a plain block.

use ebs_ir::{Block, CatchKind, Expr, Handler, RaiseKind};

use super::Interpreter;
use crate::{ControlSignal, ExecResult, ScriptError, ScriptErrorKind, Value};

fn handles(catch: &CatchKind, error: &ScriptError) -> bool {
    match (catch, &error.kind) {
        (CatchKind::Any, _) => true,
        (CatchKind::Standard(wanted), ScriptErrorKind::Standard(kind)) => wanted == kind,
        (CatchKind::Custom(wanted), ScriptErrorKind::Custom(name)) => {
            wanted.eq_ignore_ascii_case(name)
        }
        _ => false,
    }
}

/// Values for a handler's capture variables.
///
/// A custom exception with arguments binds them positionally, missing ones
/// as `null`. Otherwise the first variable gets the message.
fn captured(error: &ScriptError, count: usize) -> Vec<Value> {
    if matches!(error.kind, ScriptErrorKind::Custom(_)) && !error.params.is_empty() {
        return (0..count)
            .map(|i| error.params.get(i).cloned().unwrap_or_default())
            .collect();
    }
    (0..count)
        .map(|i| {
            if i == 0 {
                Value::Str(error.message.clone())
            } else {
                Value::Null
            }
        })
        .collect()
}

impl Interpreter<'_> {
    pub(crate) fn exec_try(&mut self, body: &Block, handlers: &[Handler]) -> ExecResult {
        let error = match self.exec_block(body) {
            Err(ControlSignal::Raised(error)) => error,
            other => return other,
        };
        let Some(handler) = handlers.iter().find(|h| handles(&h.catch, &error)) else {
            tracing::trace!(kind = %error.kind, "no handler matched");
            return Err(ControlSignal::Raised(error));
        };
        tracing::debug!(kind = %error.kind, line = handler.line, "exception caught");
        let values = captured(&error, handler.captures.len());
        self.with_env_scope(|scoped| {
            for (name, value) in handler.captures.iter().zip(values) {
                scoped.env.define(name, value);
            }
            for stmt in &handler.body.stmts {
                scoped.exec_stmt(stmt)?;
            }
            Ok(())
        })
    }

    /// Build the error a `raise exception` statement raises.
    pub(crate) fn raise(
        &mut self,
        kind: &RaiseKind,
        args: &[Expr],
    ) -> Result<ScriptError, ControlSignal> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        let error = match kind {
            RaiseKind::Standard(kind) => {
                let message = match values.first() {
                    Some(value) => value.to_string(),
                    None => format!("{} raised with no message", kind.name()),
                };
                ScriptError::new(*kind, message)
            }
            RaiseKind::Custom(name) => ScriptError::custom(name.as_str(), values),
        };
        tracing::debug!(kind = %error.kind, "raise");
        Ok(error)
    }
}
