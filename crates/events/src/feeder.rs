use cepflow_functions::JSON_PARSING;

use crate::function_processor::FunctionProcessor;

/// Processor turning JSON text events into structured values.
///
/// Malformed documents come out as `Null` instead of failing the push.
pub fn json_feeder() -> FunctionProcessor {
    FunctionProcessor::new(JSON_PARSING)
}
