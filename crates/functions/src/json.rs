//! Best-effort JSON parsing leaf.

use cepflow_core::{FunctionResult, Value, ValueType};

use crate::unary::{UnaryFunction, UnaryOperation};

pub type JsonParsing = UnaryFunction<ParseJson>;

pub const JSON_PARSING: JsonParsing = UnaryFunction::new(ParseJson);

/// Parses text into a structured [`Value`].
///
/// Malformed documents become `Null` rather than an error: this leaf sits at
/// the edge of a pipeline where input is not trusted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ParseJson;

impl UnaryOperation for ParseJson {
    const INPUT: ValueType = ValueType::Text;
    const OUTPUT: ValueType = ValueType::Any;

    fn apply(&self, x: &Value) -> FunctionResult<Value> {
        let Some(text) = x.as_str() else {
            return Ok(Value::Null);
        };
        match serde_json::from_str::<serde_json::Value>(text) {
            Ok(document) => Ok(Value::from(document)),
            Err(err) => {
                tracing::debug!(error = %err, "discarding malformed JSON input");
                Ok(Value::Null)
            }
        }
    }
}

impl core::fmt::Display for ParseJson {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("json")
    }
}
