//! Statement execution.

use ebs_ir::{Block, Expr, OpaqueStatement, Stmt, StmtKind, VarDecl};
use ebs_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{condition_not_bool, no_opaque_handler, not_iterable, null_access};
use crate::{coerce, default_value, ControlSignal, DataType, ExecResult, Mutability, Value};

/// What a loop does after its body ran.
enum LoopStep {
    Next,
    Exit,
}

/// Sort a body's outcome into loop control and signals that keep unwinding.
fn loop_step(result: ExecResult) -> Result<LoopStep, ControlSignal> {
    match result {
        Ok(()) | Err(ControlSignal::Continue) => Ok(LoopStep::Next),
        Err(ControlSignal::Break) => Ok(LoopStep::Exit),
        Err(signal) => Err(signal),
    }
}

/// Stamp the statement line on a raised error that has none yet.
fn at_line(signal: ControlSignal, line: u32) -> ControlSignal {
    match signal {
        ControlSignal::Raised(error) => ControlSignal::Raised(error.at_line(line)),
        other => other,
    }
}

impl Interpreter<'_> {
    /// Run top-level statements in order. Returns how many ran to completion.
    pub fn exec_statements(&mut self, stmts: &[Stmt]) -> Result<usize, ControlSignal> {
        for (done, stmt) in stmts.iter().enumerate() {
            if let Err(signal) = self.exec_stmt(stmt) {
                tracing::trace!(completed = done, "statement list interrupted");
                return Err(signal);
            }
        }
        Ok(stmts.len())
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
            .map_err(|signal| at_line(signal, stmt.line))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::VarDecl(decl) => self.exec_var_decl(decl),
            StmtKind::Assign(assign) => self.exec_assign(assign),
            StmtKind::Print(expr) => {
                let value = self.eval_expr(expr)?;
                self.config.print_handler().println(&value.to_string());
                Ok(())
            }
            StmtKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_condition(cond)? {
                    self.with_env_scope(|scoped| scoped.exec_stmt(then_branch))
                } else if let Some(else_branch) = else_branch {
                    self.with_env_scope(|scoped| scoped.exec_stmt(else_branch))
                } else {
                    Ok(())
                }
            }
            StmtKind::While { cond, body } => {
                while self.eval_condition(cond)? {
                    let result = self.with_env_scope(|scoped| scoped.exec_stmt(body));
                    if let LoopStep::Exit = loop_step(result)? {
                        break;
                    }
                }
                Ok(())
            }
            StmtKind::DoWhile { body, cond } => {
                loop {
                    if let LoopStep::Exit = loop_step(self.exec_block(body))? {
                        break;
                    }
                    if !self.eval_condition(cond)? {
                        break;
                    }
                }
                Ok(())
            }
            StmtKind::For {
                init,
                cond,
                step,
                body,
            } => self.with_env_scope(|scoped| {
                if let Some(init) = init {
                    scoped.exec_stmt(init)?;
                }
                loop {
                    if let Some(cond) = cond {
                        if !scoped.eval_condition(cond)? {
                            break;
                        }
                    }
                    if let LoopStep::Exit = loop_step(scoped.exec_block(body))? {
                        break;
                    }
                    if let Some(step) = step {
                        scoped.exec_stmt(step)?;
                    }
                }
                Ok(())
            }),
            StmtKind::ForEach {
                var,
                iterable,
                body,
            } => self.exec_foreach(var, iterable, body),
            StmtKind::Block(block) => self.exec_block(block),
            StmtKind::Call(call) => self.eval_call(call).map(drop),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Err(ControlSignal::Return(value))
            }
            StmtKind::Break => Err(ControlSignal::Break),
            StmtKind::Continue => Err(ControlSignal::Continue),
            StmtKind::Try { body, handlers } => self.exec_try(body, handlers),
            StmtKind::Raise { kind, args } => Err(self.raise(kind, args)?.into()),
            StmtKind::Typedef { name, ty } => self.define_type_alias(name, ty),
            StmtKind::Import(path) => self.exec_import(path),
            StmtKind::Opaque(opaque) => self.exec_opaque(opaque),
        }
    }

    /// Run a block's statements in a fresh scope.
    pub fn exec_block(&mut self, block: &Block) -> ExecResult {
        self.with_env_scope(|scoped| {
            for stmt in &block.stmts {
                scoped.exec_stmt(stmt)?;
            }
            Ok(())
        })
    }

    /// Evaluate an `if`/`while`/`for` condition, which must be a bool.
    fn eval_condition(&mut self, cond: &Expr) -> Result<bool, ControlSignal> {
        match self.eval_expr(cond)? {
            Value::Bool(value) => Ok(value),
            other => Err(condition_not_bool(other.kind_name()).into()),
        }
    }

    fn exec_var_decl(&mut self, decl: &VarDecl) -> ExecResult {
        let ty = match &decl.ty {
            Some(spec) => self.resolve_type(spec)?,
            None => DataType::Any,
        };
        let value = match &decl.init {
            Some(init) => coerce(self.eval_expr(init)?, &ty)?,
            None => default_value(&ty),
        };
        let mutability = if decl.constant {
            Mutability::Immutable
        } else {
            Mutability::Mutable
        };
        self.env.declare(&decl.name, ty, value, mutability);
        Ok(())
    }

    /// `foreach x in items`: array elements, map keys in key order, or the
    /// characters of a string.
    fn exec_foreach(&mut self, var: &str, iterable: &Expr, body: &Block) -> ExecResult {
        let items: Vec<Value> = match self.eval_expr(iterable)? {
            Value::Array(array) => array.into_items(),
            Value::Map(map) => map.into_keys().map(Value::Str).collect(),
            Value::Str(text) => text.chars().map(|c| Value::Str(c.to_string())).collect(),
            Value::Null => return Err(null_access("iterate over").into()),
            other => return Err(not_iterable(other.kind_name()).into()),
        };
        for item in items {
            let result = self.with_env_scope(|scoped| {
                scoped.env.define(var, item);
                for stmt in &body.stmts {
                    scoped.exec_stmt(stmt)?;
                }
                Ok(())
            });
            if let LoopStep::Exit = loop_step(result)? {
                break;
            }
        }
        Ok(())
    }

    fn exec_opaque(&mut self, stmt: &OpaqueStatement) -> ExecResult {
        let handler = self
            .config
            .opaque_handlers()
            .read()
            .get(&stmt.keyword)
            .cloned()
            .ok_or_else(|| no_opaque_handler(&stmt.keyword))?;
        tracing::debug!(keyword = %stmt.keyword, "dispatching opaque statement");
        handler(stmt)?;
        Ok(())
    }
}
