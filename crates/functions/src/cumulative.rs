//! Running fold over successive inputs.

use cepflow_core::{Context, FunctionError, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, input, single_output};

/// Stateful 1/1 function folding a binary combine function over its inputs.
///
/// Seed policy: the first input becomes the accumulator as-is. When a start
/// value is configured, the first output is `combine(start, first)` instead.
/// Each later input `v` yields `combine(accumulator, v)`.
///
/// The accumulator belongs to this instance alone: `duplicate()` returns a
/// copy with the same combine function and start value but no accumulated
/// state.
#[derive(Debug)]
pub struct CumulativeFunction {
    combine: Box<dyn Function>,
    start: Option<Value>,
    accumulator: Option<Value>,
}

impl CumulativeFunction {
    pub fn new(combine: impl Function) -> FunctionResult<Self> {
        Self::from_boxed(Box::new(combine))
    }

    pub fn from_boxed(combine: Box<dyn Function>) -> FunctionResult<Self> {
        if combine.input_arity() != 2 || combine.output_arity() != 1 {
            return Err(FunctionError::invalid_argument(format!(
                "cumulative combine must be 2/1, {combine} is {}/{}",
                combine.input_arity(),
                combine.output_arity()
            )));
        }
        Ok(Self {
            combine,
            start: None,
            accumulator: None,
        })
    }

    /// Combine the first input with `start` instead of using it as the seed.
    pub fn with_start_value(mut self, start: impl Into<Value>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn combine(&self) -> &dyn Function {
        self.combine.as_ref()
    }

    pub fn start_value(&self) -> Option<&Value> {
        self.start.as_ref()
    }

    /// Current accumulated value, if any input has been folded yet.
    pub fn accumulator(&self) -> Option<&Value> {
        self.accumulator.as_ref()
    }

    /// Same parameters, empty accumulator.
    pub fn fresh(&self) -> Self {
        Self {
            combine: self.combine.duplicate(),
            start: self.start.clone(),
            accumulator: None,
        }
    }
}

impl PartialEq for CumulativeFunction {
    /// Compares construction parameters, not accumulated state.
    fn eq(&self, other: &Self) -> bool {
        self.combine.equals(other.combine.as_ref()) && self.start == other.start
    }
}

impl Function for CumulativeFunction {
    fn input_arity(&self) -> usize {
        1
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, _position: usize) -> TypeSet {
        self.combine.input_types_for(1)
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        self.combine.output_type_for(0)
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let value = input(inputs, 0)?.clone();
        let previous = self.accumulator.as_ref().or(self.start.as_ref());
        let next = match previous {
            Some(acc) => single_output(self.combine.as_mut(), &[acc.clone(), value], context)?,
            None => value,
        };
        self.accumulator = Some(next.clone());
        Ok(vec![next])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.fresh())
    }

    fn reset(&mut self) {
        self.accumulator = None;
        self.combine.reset();
    }

    crate::function_identity!();
}

impl core::fmt::Display for CumulativeFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Cumulative({})", self.combine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ADDITION, MULTIPLICATION, NEGATION};
    use proptest::prelude::*;

    fn push(f: &mut dyn Function, v: i64) -> Value {
        f.evaluate(&[Value::Int(v)], None).unwrap().remove(0)
    }

    #[test]
    fn first_input_seeds_the_accumulator() {
        let mut product = CumulativeFunction::new(MULTIPLICATION).unwrap();
        assert_eq!(push(&mut product, 2), Value::Int(2));
        assert_eq!(push(&mut product, 3), Value::Int(6));
        assert_eq!(product.accumulator(), Some(&Value::Int(6)));
    }

    #[test]
    fn start_value_is_combined_with_first_input() {
        let mut sum = CumulativeFunction::new(ADDITION).unwrap().with_start_value(10);
        assert_eq!(push(&mut sum, 1), Value::Int(11));
        assert_eq!(push(&mut sum, 2), Value::Int(13));
    }

    #[test]
    fn duplicate_and_reset_drop_state() {
        let mut sum = CumulativeFunction::new(ADDITION).unwrap();
        push(&mut sum, 5);
        push(&mut sum, 5);

        let mut copy = sum.duplicate();
        assert!(copy.equals(&sum));
        assert_eq!(push(copy.as_mut(), 1), Value::Int(1));
        assert_eq!(push(&mut sum, 1), Value::Int(11));

        sum.reset();
        assert_eq!(sum.accumulator(), None);
        assert_eq!(push(&mut sum, 4), Value::Int(4));
    }

    #[test]
    fn failed_combination_keeps_previous_state() {
        let mut sum = CumulativeFunction::new(ADDITION).unwrap();
        push(&mut sum, 1);
        assert!(sum.evaluate_fast(&[Value::from("x")], None).is_err());
        assert_eq!(sum.accumulator(), Some(&Value::Int(1)));
    }

    #[test]
    fn combine_must_be_binary() {
        assert!(CumulativeFunction::new(NEGATION).is_err());
    }

    proptest! {
        /// Property: the last output equals a left fold of all inputs.
        #[test]
        fn matches_left_fold(values in prop::collection::vec(-1000i64..1000, 1..32)) {
            let mut sum = CumulativeFunction::new(ADDITION).unwrap();
            let mut last = Value::Null;
            for v in &values {
                last = push(&mut sum, *v);
            }
            prop_assert_eq!(last, Value::Int(values.iter().sum()));
        }
    }
}
