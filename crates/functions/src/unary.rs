//! Generic single-input wrapper.

use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation, input};

/// The transform behind a [`UnaryFunction`].
///
/// Implementors declare their input and output classes; the wrapper enforces
/// them on the checked evaluation path.
pub trait UnaryOperation:
    core::fmt::Debug + core::fmt::Display + Clone + PartialEq + Send + 'static
{
    const INPUT: ValueType;
    const OUTPUT: ValueType;

    fn apply(&self, x: &Value) -> FunctionResult<Value>;
}

/// 1/1 function built from a [`UnaryOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UnaryFunction<U> {
    op: U,
}

impl<U: UnaryOperation> UnaryFunction<U> {
    pub const fn new(op: U) -> Self {
        Self { op }
    }

    pub fn operation(&self) -> &U {
        &self.op
    }
}

impl<U: UnaryOperation> Function for UnaryFunction<U> {
    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, _position: usize) -> TypeSet {
        TypeSet::of(U::INPUT)
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        U::OUTPUT
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        Ok(vec![self.op.apply(input(inputs, 0)?)?])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    fn notation(&self) -> Notation {
        Notation::Prefix
    }

    crate::function_identity!();
}

impl<U: UnaryOperation> core::fmt::Display for UnaryFunction<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepflow_core::FunctionError;

    #[derive(Debug, Clone, PartialEq)]
    struct Failing;

    impl core::fmt::Display for Failing {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("fail")
        }
    }

    impl UnaryOperation for Failing {
        const INPUT: ValueType = ValueType::Number;
        const OUTPUT: ValueType = ValueType::Number;

        fn apply(&self, _x: &Value) -> FunctionResult<Value> {
            Err(FunctionError::evaluation("foo"))
        }
    }

    #[test]
    fn transform_failure_surfaces_as_evaluation_error() {
        let mut f = UnaryFunction::new(Failing);
        let err = f.evaluate(&[Value::Int(3)], None).unwrap_err();
        assert_eq!(err, FunctionError::evaluation("foo"));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn declared_input_class_is_enforced() {
        let mut f = UnaryFunction::new(Failing);
        let err = f.evaluate(&[Value::from("3")], None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(f.input_types_for(0), TypeSet::of(ValueType::Number));
        assert_eq!(f.output_type_for(0), ValueType::Number);
    }
}
