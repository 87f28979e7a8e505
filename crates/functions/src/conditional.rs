use cepflow_core::{Context, FunctionError, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, input};

pub const IF_THEN_ELSE: IfThenElse = IfThenElse;

/// `if(c, a, b)`: returns `a` when `c` is true, `b` when false.
///
/// The condition must be a `Bool`; anything else is an invalid argument on
/// both evaluation paths.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IfThenElse;

impl Function for IfThenElse {
    fn input_arity(&self) -> usize {
        3
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, position: usize) -> TypeSet {
        match position {
            0 => TypeSet::of(ValueType::Bool),
            _ => TypeSet::any(),
        }
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        ValueType::Any
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let condition = input(inputs, 0)?;
        let chosen = match condition {
            Value::Bool(true) => input(inputs, 1)?,
            Value::Bool(false) => input(inputs, 2)?,
            other => {
                return Err(FunctionError::invalid_argument(format!(
                    "condition must be a bool, got {}",
                    other.value_type()
                )));
            }
        };
        Ok(vec![chosen.clone()])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(*self)
    }

    crate::function_identity!();
}

impl core::fmt::Display for IfThenElse {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("if")
    }
}
