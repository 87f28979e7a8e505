use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation};

/// Always returns the same value, `Null` included.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: Value,
}

impl Constant {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Function for Constant {
    fn input_arity(&self) -> usize {
        0
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, _position: usize) -> TypeSet {
        TypeSet::any()
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        self.value.value_type()
    }

    fn evaluate_fast(
        &mut self,
        _inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        Ok(vec![self.value.clone()])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn notation(&self) -> Notation {
        Notation::Symbol
    }

    crate::function_identity!();
}

impl core::fmt::Display for Constant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.value {
            Value::Text(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}
