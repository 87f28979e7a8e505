//! Generic two-input wrapper.

use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation, input};

/// The combination behind a [`BinaryFunction`].
pub trait BinaryOperation:
    core::fmt::Debug + core::fmt::Display + Clone + PartialEq + Send + 'static
{
    const LEFT: ValueType;
    const RIGHT: ValueType;
    const OUTPUT: ValueType;

    fn apply(&self, x: &Value, y: &Value) -> FunctionResult<Value>;
}

/// 2/1 function built from a [`BinaryOperation`]; renders infix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinaryFunction<B> {
    op: B,
}

impl<B: BinaryOperation> BinaryFunction<B> {
    pub const fn new(op: B) -> Self {
        Self { op }
    }

    pub fn operation(&self) -> &B {
        &self.op
    }
}

impl<B: BinaryOperation> Function for BinaryFunction<B> {
    fn input_arity(&self) -> usize {
        2
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, position: usize) -> TypeSet {
        match position {
            0 => TypeSet::of(B::LEFT),
            _ => TypeSet::of(B::RIGHT),
        }
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        B::OUTPUT
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        Ok(vec![self.op.apply(input(inputs, 0)?, input(inputs, 1)?)?])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn notation(&self) -> Notation {
        Notation::Infix
    }

    crate::function_identity!();
}

impl<B: BinaryOperation> core::fmt::Display for BinaryFunction<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.op)
    }
}
