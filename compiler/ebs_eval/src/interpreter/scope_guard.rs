//! RAII scope guards for the interpreter's environment.
//!
//! [`ScopedInterpreter`] holds `&mut Interpreter` and derefs to it, so code
//! inside a scope uses the interpreter as usual. Dropping the guard undoes
//! what opening it did, whichever way the scope is left: normal
//! completion, `?` on a control signal, or a panic.
//!
//! Two kinds of scope exist:
//! - a block scope (`{ ... }`, loop bodies, handlers), popped on drop;
//! - a call frame, which hides the caller's locals, may switch the current
//!   program, and counts toward the call depth. Dropping it restores all
//!   three.
//!
//! ```text
//! interpreter.with_env_scope(|scoped| {
//!     scoped.env.define("i", Value::Int(0));
//!     scoped.exec_block(body)
//! })
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use ebs_ir::Program;

use super::Interpreter;

enum ScopeKind {
    Block,
    Frame {
        saved_base: usize,
        saved_program: Arc<Program>,
    },
}

/// Guard that closes a scope or call frame on drop.
pub struct ScopedInterpreter<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    kind: ScopeKind,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        match &self.kind {
            ScopeKind::Block => self.interpreter.env.pop_scope(),
            ScopeKind::Frame {
                saved_base,
                saved_program,
            } => {
                self.interpreter.env.leave_frame(*saved_base);
                self.interpreter.program = Arc::clone(saved_program);
                self.interpreter.call_depth -= 1;
            }
        }
    }
}

impl<'interp> Deref for ScopedInterpreter<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Open a block scope that closes when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'a> {
        self.env.push_scope();
        ScopedInterpreter {
            interpreter: self,
            kind: ScopeKind::Block,
        }
    }

    /// Run `f` inside a fresh block scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'a>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Open a call frame running against `program`.
    ///
    /// The caller checks the depth limit first.
    pub(crate) fn framed(&mut self, program: Arc<Program>) -> ScopedInterpreter<'_, 'a> {
        let saved_base = self.env.enter_frame();
        let saved_program = std::mem::replace(&mut self.program, program);
        self.call_depth += 1;
        ScopedInterpreter {
            interpreter: self,
            kind: ScopeKind::Frame {
                saved_base,
                saved_program,
            },
        }
    }
}
