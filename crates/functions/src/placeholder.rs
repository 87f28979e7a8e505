//! Leaves that read from the enclosing call rather than from their own inputs.

use cepflow_core::{Context, FunctionError, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation, input};

/// Returns argument `index` of the enclosing call verbatim.
///
/// Declares no inputs of its own; inside a [`FunctionTree`](crate::FunctionTree)
/// it receives the tree's call arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPlaceholder {
    index: usize,
}

impl ArgumentPlaceholder {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl Function for ArgumentPlaceholder {
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
        ValueType::Any
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        Ok(vec![input(inputs, self.index)?.clone()])
    }

    /// Only requires the argument list to reach `index`.
    fn evaluate(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        if inputs.len() <= self.index {
            return Err(FunctionError::invalid_argument(format!(
                "{self} needs at least {} argument(s), got {}",
                self.index + 1,
                inputs.len()
            )));
        }
        self.evaluate_fast(inputs, context)
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn notation(&self) -> Notation {
        Notation::Symbol
    }

    fn argument_demand(&self) -> usize {
        self.index + 1
    }

    fn argument_types_for(&self, _index: usize) -> Option<TypeSet> {
        None
    }

    crate::function_identity!();
}

impl core::fmt::Display for ArgumentPlaceholder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}", self.index)
    }
}

/// Returns the context binding of `name`, or `Null` when unbound or when no
/// context is supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextPlaceholder {
    name: String,
}

impl ContextPlaceholder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Function for ContextPlaceholder {
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
        ValueType::Any
    }

    fn evaluate_fast(
        &mut self,
        _inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let value = context
            .and_then(|c| c.get(&self.name).cloned())
            .unwrap_or(Value::Null);
        Ok(vec![value])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn notation(&self) -> Notation {
        Notation::Symbol
    }

    crate::function_identity!();
}

impl core::fmt::Display for ContextPlaceholder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}", self.name)
    }
}
