//! Representative arithmetic leaves.
//!
//! `Int ∘ Int` stays integral (overflow fails); any `Float` operand makes the
//! result a `Float`.

use cepflow_core::{FunctionError, FunctionResult, Value, ValueType};

use crate::binary::{BinaryFunction, BinaryOperation};
use crate::unary::{UnaryFunction, UnaryOperation};

pub type Addition = BinaryFunction<AddOp>;
pub type Multiplication = BinaryFunction<MulOp>;
pub type SquareRoot = UnaryFunction<SqrtOp>;

pub const ADDITION: Addition = BinaryFunction::new(AddOp);
pub const MULTIPLICATION: Multiplication = BinaryFunction::new(MulOp);
pub const SQUARE_ROOT: SquareRoot = UnaryFunction::new(SqrtOp);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AddOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MulOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SqrtOp;

fn arithmetic(
    symbol: &str,
    x: &Value,
    y: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> FunctionResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (x, y) {
        return int_op(*a, *b)
            .map(Value::Int)
            .ok_or_else(|| FunctionError::evaluation(format!("integer overflow in {a} {symbol} {b}")));
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
        _ => Err(FunctionError::invalid_argument(format!(
            "{symbol} expects numbers, got {} and {}",
            x.value_type(),
            y.value_type()
        ))),
    }
}

impl BinaryOperation for AddOp {
    const LEFT: ValueType = ValueType::Number;
    const RIGHT: ValueType = ValueType::Number;
    const OUTPUT: ValueType = ValueType::Number;

    fn apply(&self, x: &Value, y: &Value) -> FunctionResult<Value> {
        arithmetic("+", x, y, i64::checked_add, |a, b| a + b)
    }
}

impl core::fmt::Display for AddOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("+")
    }
}

impl BinaryOperation for MulOp {
    const LEFT: ValueType = ValueType::Number;
    const RIGHT: ValueType = ValueType::Number;
    const OUTPUT: ValueType = ValueType::Number;

    fn apply(&self, x: &Value, y: &Value) -> FunctionResult<Value> {
        arithmetic("×", x, y, i64::checked_mul, |a, b| a * b)
    }
}

impl core::fmt::Display for MulOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("×")
    }
}

impl UnaryOperation for SqrtOp {
    const INPUT: ValueType = ValueType::Number;
    const OUTPUT: ValueType = ValueType::Number;

    fn apply(&self, x: &Value) -> FunctionResult<Value> {
        let n = x.as_f64().ok_or_else(|| {
            FunctionError::invalid_argument(format!("√ expects a number, got {}", x.value_type()))
        })?;
        // Negative input yields NaN rather than an error.
        Ok(Value::Float(n.sqrt()))
    }
}

impl core::fmt::Display for SqrtOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("√")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Function;

    #[test]
    fn integer_arithmetic_stays_integral() {
        let mut add = ADDITION;
        assert_eq!(add.evaluate(&[Value::Int(2), Value::Int(3)], None).unwrap(), vec![Value::Int(5)]);
        let mut mul = MULTIPLICATION;
        assert_eq!(mul.evaluate(&[Value::Int(2), Value::Int(3)], None).unwrap(), vec![Value::Int(6)]);
    }

    #[test]
    fn float_operand_promotes() {
        let mut add = ADDITION;
        assert_eq!(
            add.evaluate(&[Value::Int(2), Value::Float(0.5)], None).unwrap(),
            vec![Value::Float(2.5)]
        );
    }

    #[test]
    fn overflow_is_an_evaluation_failure() {
        let mut mul = MULTIPLICATION;
        let err = mul.evaluate(&[Value::Int(i64::MAX), Value::Int(2)], None).unwrap_err();
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn non_numbers_are_invalid_arguments() {
        let mut add = ADDITION;
        let err = add.evaluate(&[Value::from("1"), Value::Int(2)], None).unwrap_err();
        assert!(err.is_invalid_argument());
        // The fast path skips the type check but the operation still refuses.
        let err = add.evaluate_fast(&[Value::from("1"), Value::Int(2)], None).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn square_root() {
        let mut sqrt = SQUARE_ROOT;
        assert_eq!(sqrt.evaluate(&[Value::Int(49)], None).unwrap(), vec![Value::Float(7.0)]);
        let negative = sqrt.evaluate(&[Value::Int(-1)], None).unwrap();
        assert!(negative[0].as_f64().is_some_and(f64::is_nan));
        assert_eq!(sqrt.to_string(), "√");
    }
}
