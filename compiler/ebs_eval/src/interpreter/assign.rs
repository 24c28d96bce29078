//! Assignment statements.
//!
//! A target is a variable followed by any mix of `[i, j]` and `.field`
//! accessors. Index expressions are evaluated before the right-hand side.
//! The stored value is coerced to the type of the slot it lands in: the
//! binding, the array element type, or the record field type.

use ebs_ir::{Accessor, Assign, AssignOp, BinaryOp};

use super::expr::{array_position, index_value, key_of, map_key, property};
use super::Interpreter;
use crate::errors::{
    cannot_index, constant_assignment, fixed_array_growth, invalid_index, no_fields,
    no_such_field, null_access, type_mismatch, undefined_variable,
};
use crate::operators::evaluate_binary;
use crate::{coerce, ExecResult, RecordValue, ScriptError, Value};

/// One evaluated accessor.
enum Step {
    Index(Value),
    Field(String),
}

fn compound_op(op: AssignOp) -> Option<BinaryOp> {
    match op {
        AssignOp::Set => None,
        AssignOp::Add => Some(BinaryOp::Add),
        AssignOp::Sub => Some(BinaryOp::Sub),
        AssignOp::Mul => Some(BinaryOp::Mul),
        AssignOp::Div => Some(BinaryOp::Div),
    }
}

impl Interpreter<'_> {
    pub(crate) fn exec_assign(&mut self, assign: &Assign) -> ExecResult {
        let mut steps = Vec::with_capacity(assign.target.path.len());
        for accessor in &assign.target.path {
            match accessor {
                // a[i, j] is a[i][j]
                Accessor::Index(indices) => {
                    for index in indices {
                        steps.push(Step::Index(self.eval_expr(index)?));
                    }
                }
                Accessor::Field(name) => steps.push(Step::Field(name.clone())),
            }
        }
        let rhs = self.eval_expr(&assign.value)?;

        let root = assign.target.root.as_str();
        let binding = self
            .env
            .lookup(root)
            .ok_or_else(|| undefined_variable(root))?;
        if !binding.mutability().is_mutable() {
            return Err(constant_assignment(root).into());
        }
        let value = match compound_op(assign.op) {
            None => rhs,
            Some(op) => {
                let mut current = binding.value().clone();
                for step in &steps {
                    current = match step {
                        Step::Index(index) => index_value(current, index)?,
                        Step::Field(name) => property(current, name)?,
                    };
                }
                evaluate_binary(op, &current, &rhs)?
            }
        };

        let binding = self
            .env
            .lookup_mut(root)
            .ok_or_else(|| undefined_variable(root))?;
        if steps.is_empty() {
            binding.value = coerce(value, &binding.ty)?;
        } else {
            write_path(&mut binding.value, &steps, value)?;
        }
        Ok(())
    }
}

/// Store `value` at the end of `steps` inside `target`.
fn write_path(target: &mut Value, steps: &[Step], value: Value) -> Result<(), ScriptError> {
    let Some((step, rest)) = steps.split_first() else {
        *target = value;
        return Ok(());
    };
    match (target, step) {
        (Value::Array(array), Step::Index(index)) => {
            let len = array.len();
            if !rest.is_empty() {
                let position = array_position(index, len)?;
                return write_path(&mut array.items_mut()[position], rest, value);
            }
            let value = coerce(value, array.elem_type())?;
            let raw = index
                .as_integer()
                .ok_or_else(|| invalid_index(index.kind_name()))?;
            if usize::try_from(raw).is_ok_and(|position| position == len) {
                // dynamic arrays grow by one when written just past the end
                if array.is_fixed() {
                    return Err(fixed_array_growth(len));
                }
                array.items_mut().push(value);
                return Ok(());
            }
            let position = array_position(index, len)?;
            array.items_mut()[position] = value;
            Ok(())
        }
        (Value::Map(map), step) => {
            let key = match step {
                Step::Index(index) => key_of(index)?.to_string(),
                Step::Field(name) => map_key(map, name).unwrap_or_else(|| name.clone()),
            };
            if rest.is_empty() {
                map.insert(key, value);
                return Ok(());
            }
            match map.get_mut(&key) {
                Some(slot) => write_path(slot, rest, value),
                None => Err(null_access("index")),
            }
        }
        (Value::Record(record), Step::Index(index)) => {
            write_field(record, key_of(index)?, rest, value)
        }
        (Value::Record(record), Step::Field(name)) => write_field(record, name, rest, value),
        (Value::Bits(bits), Step::Field(name)) => {
            if !rest.is_empty() {
                return Err(no_fields("int"));
            }
            let raw = value
                .as_integer()
                .ok_or_else(|| type_mismatch("an integer", value.kind_name()))?;
            bits.set(name, raw)
        }
        (Value::Null, Step::Index(_)) => Err(null_access("index")),
        (Value::Null, Step::Field(_)) => Err(null_access("write a field of")),
        (other, Step::Index(_)) => Err(cannot_index(other.kind_name())),
        (other, Step::Field(_)) => Err(no_fields(other.kind_name())),
    }
}

fn write_field(
    record: &mut RecordValue,
    name: &str,
    rest: &[Step],
    value: Value,
) -> Result<(), ScriptError> {
    let field = record.field_mut(name).ok_or_else(|| no_such_field(name))?;
    if rest.is_empty() {
        field.value = coerce(value, &field.ty)?;
        Ok(())
    } else {
        write_path(&mut field.value, rest, value)
    }
}
