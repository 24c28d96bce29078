//! Expression evaluation.

use std::collections::BTreeMap;

use ebs_ir::{BinaryOp, Expr, ExprKind};
use ebs_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{
    cannot_index, index_out_of_bounds, invalid_index, no_fields, no_length, no_such_field,
    null_access, undefined_variable,
};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::{cast, ControlSignal, EvalResult, RecordValue, ScriptError, Value};

impl Interpreter<'_> {
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Value::from_literal(literal)),
            ExprKind::Variable(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| undefined_variable(name).into()),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            ExprKind::Compare { first, rest } => self.eval_comparison_chain(first, rest),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                Ok(evaluate_unary(*op, &operand)?)
            }
            ExprKind::Call(call) => self.eval_call(call),
            ExprKind::Index { target, indices } => {
                let mut value = self.eval_expr(target)?;
                for index in indices {
                    let index = self.eval_expr(index)?;
                    value = index_value(value, &index)?;
                }
                Ok(value)
            }
            ExprKind::Array(items) => {
                let items = items
                    .iter()
                    .map(|item| self.eval_expr(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Record(fields) => {
                let mut pairs = Vec::with_capacity(fields.len());
                for (name, value) in fields {
                    pairs.push((name.clone(), self.eval_expr(value)?));
                }
                Ok(Value::Record(RecordValue::untyped(pairs)))
            }
            ExprKind::Property { target, name } => {
                let target = self.eval_expr(target)?;
                Ok(property(target, name)?)
            }
            ExprKind::Cast { target, operand } => {
                let operand = self.eval_expr(operand)?;
                Ok(cast(&operand, *target)?)
            }
            ExprKind::TypeOf(operand) => Ok(Value::Str(self.eval_expr(operand)?.type_name())),
            ExprKind::Length { operand, name } => {
                let operand = self.eval_expr(operand)?;
                Ok(length_or_field(operand, name)?)
            }
        }
    }

    /// `&&`/`||` skip the right operand when the left decides the result.
    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        let left = self.eval_expr(left)?;
        match (op, &left) {
            (BinaryOp::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
            (BinaryOp::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
            _ => {}
        }
        let right = self.eval_expr(right)?;
        Ok(evaluate_binary(op, &left, &right)?)
    }

    /// `a < b <= c` is `a < b && b <= c` with `b` evaluated once.
    fn eval_comparison_chain(&mut self, first: &Expr, rest: &[(BinaryOp, Expr)]) -> EvalResult {
        let mut left = self.eval_expr(first)?;
        for (op, expr) in rest {
            let right = self.eval_expr(expr)?;
            if evaluate_binary(*op, &left, &right)? == Value::Bool(false) {
                return Ok(Value::Bool(false));
            }
            left = right;
        }
        Ok(Value::Bool(true))
    }
}

/// `target[index]` for one index.
///
/// Arrays take integer indices, strings return the character at an index,
/// records and maps take string keys. A missing map key reads as `null`.
pub(super) fn index_value(target: Value, index: &Value) -> Result<Value, ControlSignal> {
    match target {
        Value::Array(array) => {
            let position = array_position(index, array.len())?;
            Ok(array.into_items().swap_remove(position))
        }
        Value::Str(text) => {
            let len = text.chars().count();
            let position = array_position(index, len)?;
            Ok(text
                .chars()
                .nth(position)
                .map(|c| Value::Str(c.to_string()))
                .unwrap_or_default())
        }
        Value::Map(mut map) => {
            let key = key_of(index)?;
            Ok(map.remove(key).unwrap_or_default())
        }
        Value::Record(record) => {
            let key = key_of(index)?;
            Ok(record.get(key).cloned().ok_or_else(|| no_such_field(key))?)
        }
        Value::Null => Err(null_access("index").into()),
        other => Err(cannot_index(other.kind_name()).into()),
    }
}

/// Validate an index against a length.
pub(super) fn array_position(index: &Value, len: usize) -> Result<usize, ScriptError> {
    let raw = index
        .as_integer()
        .ok_or_else(|| invalid_index(index.kind_name()))?;
    usize::try_from(raw)
        .ok()
        .filter(|&position| position < len)
        .ok_or_else(|| index_out_of_bounds(raw, len))
}

pub(super) fn key_of(index: &Value) -> Result<&str, ScriptError> {
    index
        .as_str()
        .ok_or_else(|| invalid_index(index.kind_name()))
}

/// The map key `.name` refers to. Identifiers are lowercased by the lexer,
/// so an exact match wins and any case-insensitive match comes next.
pub(super) fn map_key(map: &BTreeMap<String, Value>, name: &str) -> Option<String> {
    if map.contains_key(name) {
        return Some(name.to_string());
    }
    map.keys().find(|key| key.eq_ignore_ascii_case(name)).cloned()
}

/// `target.name`.
pub(super) fn property(target: Value, name: &str) -> Result<Value, ScriptError> {
    match target {
        Value::Record(record) => record.get(name).cloned().ok_or_else(|| no_such_field(name)),
        Value::Map(mut map) => Ok(map_key(&map, name)
            .and_then(|key| map.remove(&key))
            .unwrap_or_default()),
        Value::Bits(bits) => bits.get(name),
        Value::Null => Err(null_access("read a field of")),
        other => Err(no_fields(other.kind_name())),
    }
}

/// `x.length`/`x.size`, unless `x` is a record or map with a member of
/// that name.
fn length_or_field(value: Value, name: &str) -> Result<Value, ScriptError> {
    let has_member = match &value {
        Value::Record(record) => record.field(name).is_some(),
        Value::Map(map) => map_key(map, name).is_some(),
        _ => false,
    };
    if has_member {
        property(value, name)
    } else {
        length(&value)
    }
}

/// `x.length`: characters, elements, entries or fields.
fn length(value: &Value) -> Result<Value, ScriptError> {
    let len = match value {
        Value::Str(text) => text.chars().count(),
        Value::Array(array) => array.len(),
        Value::Map(map) => map.len(),
        Value::Record(record) => record.len(),
        Value::Null => return Err(null_access("take the length of")),
        other => return Err(no_length(other.kind_name())),
    };
    Ok(Value::integer(i64::try_from(len).unwrap_or(i64::MAX)))
}
