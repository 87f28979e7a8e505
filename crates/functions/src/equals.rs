use cepflow_core::{Context, FunctionResult, TypeSet, Value, ValueType};

use crate::function::{Function, Notation, input};

pub const EQUALS: Equals = Equals;

/// Equality across heterogeneous runtime values.
///
/// - `Int` and `Float` compare numerically.
/// - Sets compare by membership.
/// - Any other pair of different kinds is unequal (never an error).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Equals;

/// The comparison performed by [`Equals`].
pub fn values_equal(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => int_equals_float(*i, *f),
        _ => x == y,
    }
}

/// Exact comparison: no rounding of `i` through `f64`.
fn int_equals_float(i: i64, f: f64) -> bool {
    // 2^63 is exactly representable; anything at or above it exceeds i64.
    const I64_END: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-I64_END..I64_END).contains(&f) && f as i64 == i
}

impl Function for Equals {
    fn input_arity(&self) -> usize {
        2
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn input_types_for(&self, _position: usize) -> TypeSet {
        TypeSet::any()
    }

    fn output_type_for(&self, _position: usize) -> ValueType {
        ValueType::Bool
    }

    fn evaluate_fast(
        &mut self,
        inputs: &[Value],
        _context: Option<&mut Context>,
    ) -> FunctionResult<Vec<Value>> {
        let equal = values_equal(input(inputs, 0)?, input(inputs, 1)?);
        Ok(vec![Value::Bool(equal)])
    }

    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(*self)
    }

    fn notation(&self) -> Notation {
        Notation::Infix
    }

    crate::function_identity!();
}

impl core::fmt::Display for Equals {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("=")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn eq(x: impl Into<Value>, y: impl Into<Value>) -> bool {
        let mut f = EQUALS;
        f.evaluate(&[x.into(), y.into()], None).unwrap()[0] == Value::Bool(true)
    }

    #[test]
    fn scalars() {
        assert!(!eq(0, Value::Null));
        assert!(eq(0, 0));
        assert!(!eq(0, 1));
        assert!(!eq("0", 0));
        assert!(eq("0", "0"));
        assert!(!eq("0", "1"));
        assert!(eq(2, 2.0));
        assert!(eq(Value::Null, Value::Null));
    }

    #[test]
    fn int_and_float_compare_without_rounding() {
        let two_pow_53 = 9_007_199_254_740_992i64;
        assert!(!eq(two_pow_53 + 1, two_pow_53 as f64));
        assert!(!eq(two_pow_53 as f64, two_pow_53 + 1));
        assert!(eq(two_pow_53, two_pow_53 as f64));
        assert!(!eq(2, 2.5));
        assert!(!eq(i64::MAX, 9_223_372_036_854_775_808.0));
        assert!(eq(i64::MIN, i64::MIN as f64));
        assert!(!eq(0, f64::NAN));
    }

    #[test]
    fn sets_compare_by_membership() {
        let mut s1: BTreeSet<Value> = [Value::Int(0), Value::Int(1)].into();
        let s2: BTreeSet<Value> = [Value::Int(0), Value::Int(1)].into();
        assert!(eq(s1.clone(), s2.clone()));
        assert!(!eq(s1.clone(), 0));
        s1.insert(Value::Int(2));
        assert!(!eq(s1, s2));
    }
}
