use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::Function;

/// Returns each of its `k` inputs unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityFunction {
    arity: usize,
}

impl IdentityFunction {
    pub fn new(arity: usize) -> Self {
        Self { arity }
    }
}

impl Function for IdentityFunction {
    fn input_arity(&self) -> usize {
        self.arity
    }

    fn output_arity(&self) -> usize {
        self.arity
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
        Ok(inputs.iter().take(self.arity).cloned().collect())
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }

    crate::function_identity!();
}

impl core::fmt::Display for IdentityFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn returns_inputs_unchanged() {
        let mut f = IdentityFunction::new(1);
        assert_eq!(f.evaluate(&[Value::Bool(false)], None).unwrap(), vec![Value::Bool(false)]);
        assert_eq!(f.evaluate(&[Value::Int(0)], None).unwrap(), vec![Value::Int(0)]);
        assert_eq!(f.input_arity(), 1);
        assert_eq!(f.output_arity(), 1);
        assert_eq!(f.output_type_for(0), ValueType::Any);
        assert!(f.input_types_for(0).is_any());
        assert_eq!(f.input_types_for(0).len(), 1);

        let mut f2 = f.duplicate();
        assert_eq!(f2.evaluate(&[Value::Int(6)], None).unwrap(), vec![Value::Int(6)]);
        assert_eq!(f2.input_arity(), 1);
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let mut f = IdentityFunction::new(2);
        let err = f.evaluate(&[Value::Int(1)], None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    proptest! {
        /// Property: a k-ary identity maps k inputs to the same k outputs.
        #[test]
        fn output_arity_matches_input_arity(values in prop::collection::vec(any::<i64>(), 0..8)) {
            let inputs: Vec<Value> = values.into_iter().map(Value::Int).collect();
            let mut f = IdentityFunction::new(inputs.len());
            let out = f.evaluate(&inputs, None).unwrap();
            prop_assert_eq!(out.len(), f.output_arity());
            prop_assert_eq!(out, inputs);
        }
    }
}
