//! Boolean connectives and lenient boolean parsing.

use cepflow_core::{FunctionError, FunctionResult, Value, ValueType};

use crate::binary::{BinaryFunction, BinaryOperation};
use crate::unary::{UnaryFunction, UnaryOperation};

pub type And = BinaryFunction<AndOp>;
pub type Or = BinaryFunction<OrOp>;
pub type Negation = UnaryFunction<NotOp>;

pub const AND: And = BinaryFunction::new(AndOp);
pub const OR: Or = BinaryFunction::new(OrOp);
pub const NEGATION: Negation = UnaryFunction::new(NotOp);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AndOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct OrOp;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct NotOp;

/// Interpret a value as a boolean.
///
/// Accepts booleans, numbers (non-zero is true) and the texts `true`/`false`,
/// `T`/`F`, `1`/`0`. Returns `None` for anything else.
pub fn parse_bool_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::Float(x) => Some(*x != 0.0),
        Value::Text(s) => match s.trim() {
            "T" | "1" => Some(true),
            "F" | "0" => Some(false),
            word if word.eq_ignore_ascii_case("true") => Some(true),
            word if word.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn boolean(symbol: &str, value: &Value) -> FunctionResult<bool> {
    value.as_bool().ok_or_else(|| {
        FunctionError::invalid_argument(format!(
            "{symbol} expects booleans, got {}",
            value.value_type()
        ))
    })
}

impl BinaryOperation for AndOp {
    const LEFT: ValueType = ValueType::Bool;
    const RIGHT: ValueType = ValueType::Bool;
    const OUTPUT: ValueType = ValueType::Bool;

    fn apply(&self, x: &Value, y: &Value) -> FunctionResult<Value> {
        Ok(Value::Bool(boolean("∧", x)? && boolean("∧", y)?))
    }
}

impl core::fmt::Display for AndOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("∧")
    }
}

impl BinaryOperation for OrOp {
    const LEFT: ValueType = ValueType::Bool;
    const RIGHT: ValueType = ValueType::Bool;
    const OUTPUT: ValueType = ValueType::Bool;

    fn apply(&self, x: &Value, y: &Value) -> FunctionResult<Value> {
        let (x, y) = (boolean("∨", x)?, boolean("∨", y)?);
        Ok(Value::Bool(x || y))
    }
}

impl core::fmt::Display for OrOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("∨")
    }
}

impl UnaryOperation for NotOp {
    const INPUT: ValueType = ValueType::Bool;
    const OUTPUT: ValueType = ValueType::Bool;

    fn apply(&self, x: &Value) -> FunctionResult<Value> {
        Ok(Value::Bool(!boolean("¬", x)?))
    }
}

impl core::fmt::Display for NotOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("¬")
    }
}
