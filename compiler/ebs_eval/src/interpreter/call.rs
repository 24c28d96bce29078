//! Calls to named blocks and built-ins.
//!
//! `call name(...)` resolves to a named block first (current program,
//! main program, then imports) and to a built-in second. Arguments are
//! evaluated in the caller's scope, left to right.
//!
//! A named block runs in a fresh call frame: it sees globals and its own
//! parameters, nothing of the caller. Parameters and the return value are
//! coerced to their declared types. A default value is evaluated inside the
//! frame, so it may refer to earlier parameters.

use std::sync::Arc;

use ebs_ir::{Call, NamedBlock, Program};

use super::Interpreter;
use crate::errors::{
    call_depth_exceeded, duplicate_argument, missing_argument, named_builtin_argument,
    undefined_block, unknown_parameter, wrong_arg_count,
};
use crate::{
    coerce, ControlFlowError, ControlSignal, DataType, EvalResult, Mutability, Value,
};

impl Interpreter<'_> {
    pub(crate) fn eval_call(&mut self, call: &Call) -> EvalResult {
        if let Some(owner) = self.find_block(&call.name) {
            let args = self.bind_arguments(&owner, call)?;
            return self.call_block(owner, &call.name, args);
        }

        let builtin = self.config.builtins().read().get(&call.name).cloned();
        let Some(builtin) = builtin else {
            return Err(undefined_block(&call.name).into());
        };
        if call.args.iter().any(|arg| arg.name.is_some()) {
            return Err(named_builtin_argument(builtin.name()).into());
        }
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expr(&arg.value)?);
        }
        tracing::trace!(builtin = builtin.name(), args = args.len(), "builtin call");
        Ok(builtin.call(&args)?)
    }

    /// Evaluate call arguments into parameter slots. Unfilled slots are
    /// `None` and take the parameter default.
    fn bind_arguments(
        &mut self,
        owner: &Program,
        call: &Call,
    ) -> Result<Vec<Option<Value>>, ControlSignal> {
        let Some(block) = owner.block(&call.name) else {
            return Err(undefined_block(&call.name).into());
        };
        let mut slots: Vec<Option<Value>> = vec![None; block.params.len()];
        let mut next_positional = 0;
        for arg in &call.args {
            let slot = match &arg.name {
                Some(name) => block
                    .param_index(&name.to_ascii_lowercase())
                    .ok_or_else(|| unknown_parameter(&block.name, name))?,
                None => {
                    next_positional += 1;
                    next_positional - 1
                }
            };
            if slot >= slots.len() {
                return Err(wrong_arg_count(
                    &block.name,
                    &format!("at most {}", block.params.len()),
                    call.args.len(),
                )
                .into());
            }
            if slots[slot].is_some() {
                return Err(duplicate_argument(&block.name, &block.params[slot].name).into());
            }
            slots[slot] = Some(self.eval_expr(&arg.value)?);
        }
        Ok(slots)
    }

    /// Run block `name` of `owner` with already evaluated arguments.
    pub(crate) fn call_block(
        &mut self,
        owner: Arc<Program>,
        name: &str,
        args: Vec<Option<Value>>,
    ) -> EvalResult {
        let limit = self.config.max_call_depth();
        if self.call_depth >= limit {
            return Err(call_depth_exceeded(limit).into());
        }
        let Some(block) = owner.block(name) else {
            return Err(undefined_block(name).into());
        };
        tracing::debug!(block = %block.name, depth = self.call_depth + 1, "call");

        let mut frame = self.framed(Arc::clone(&owner));
        frame.bind_parameters(block, args)?;
        let returned = match frame.exec_block(&block.body) {
            Ok(()) => Value::Null,
            Err(ControlSignal::Return(value)) => value,
            Err(ControlSignal::Break) => {
                return Err(ControlSignal::Fault(ControlFlowError::Break));
            }
            Err(ControlSignal::Continue) => {
                return Err(ControlSignal::Fault(ControlFlowError::Continue));
            }
            Err(signal) => return Err(signal),
        };
        match &block.return_type {
            Some(spec) => {
                let ty = frame.resolve_type(spec)?;
                Ok(coerce(returned, &ty)?)
            }
            None => Ok(returned),
        }
    }

    fn bind_parameters(
        &mut self,
        block: &NamedBlock,
        args: Vec<Option<Value>>,
    ) -> Result<(), ControlSignal> {
        for (param, arg) in block.params.iter().zip(args) {
            let value = match (arg, &param.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval_expr(default)?,
                (None, None) => return Err(missing_argument(&block.name, &param.name).into()),
            };
            let ty: DataType = self.resolve_type(&param.ty)?;
            let value = coerce(value, &ty)?;
            self.env.declare(&param.name, ty, value, Mutability::Mutable);
        }
        Ok(())
    }
}
