use cepflow_core::{EngineConfig, EvaluationMode, EventCoordinate, TypeSet, Value, ValueType};
use cepflow_functions::{CumulativeFunction, Function};

use crate::error::{PushError, PushResult};
use crate::processor::{Processor, ProcessorCore};

/// Running fold over a single stream.
///
/// Each push folds the event into the accumulator of the wrapped
/// [`CumulativeFunction`] and emits the new accumulator. Provenance links
/// input `k` to output `k`, and output `k - 1` to output `k`, since every
/// accumulated value depends on the one before it.
#[derive(Debug)]
pub struct CumulativeProcessor {
    core: ProcessorCore,
    function: CumulativeFunction,
    mode: EvaluationMode,
    last_output: Option<EventCoordinate>,
}

impl CumulativeProcessor {
    pub fn new(function: CumulativeFunction) -> Self {
        Self {
            core: ProcessorCore::new(1, 1),
            function,
            mode: EvaluationMode::default(),
            last_output: None,
        }
    }

    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_mode(config.evaluation)
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn function(&self) -> &CumulativeFunction {
        &self.function
    }

    pub fn accumulator(&self) -> Option<&Value> {
        self.function.accumulator()
    }

    /// Unconnected copy with a new identity and an empty accumulator.
    ///
    /// The context is copied; the tracker is not.
    pub fn duplicate(&self) -> Self {
        Self {
            core: self.core.detached(),
            function: self.function.fresh(),
            mode: self.mode,
            last_output: None,
        }
    }
}

impl Processor for CumulativeProcessor {
    fn core(&self) -> &ProcessorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessorCore {
        &mut self.core
    }

    fn input_types_for(&self, port: usize) -> TypeSet {
        self.function.input_types_for(port)
    }

    fn output_type_for(&self, port: usize) -> ValueType {
        self.function.output_type_for(port)
    }

    fn push(&mut self, port: usize, value: Value) -> PushResult<()> {
        let source = self.core.next_input(port)?;
        let id = self.core.id();
        let inputs = [value];
        let context = Some(self.core.context_mut());
        let evaluated = match self.mode {
            EvaluationMode::Checked => self.function.evaluate(&inputs, context),
            EvaluationMode::Fast => self.function.evaluate_fast(&inputs, context),
        };
        let mut outputs = evaluated.map_err(|err| {
            tracing::warn!(processor = %id, function = %self.function, error = %err, "fold step failed");
            PushError::evaluation(id, err)
        })?;
        let Some(total) = outputs.pop() else {
            return Ok(());
        };

        let produced = self.core.next_output(0)?;
        self.core.associate(source, produced)?;
        if let Some(previous) = self.last_output.replace(produced) {
            self.core.associate_outputs(previous, produced)?;
        }
        self.core.emit(0, total)
    }

    fn reset(&mut self) {
        self.function.reset();
        self.last_output = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepflow_functions::{ADDITION, MULTIPLICATION};
    use proptest::prelude::*;

    fn product() -> CumulativeProcessor {
        CumulativeProcessor::new(CumulativeFunction::new(MULTIPLICATION).unwrap())
    }

    #[test]
    fn folds_every_push() {
        let mut p = product();
        p.push(0, Value::Int(2)).unwrap();
        assert_eq!(p.accumulator(), Some(&Value::Int(2)));
        p.push(0, Value::Int(3)).unwrap();
        assert_eq!(p.accumulator(), Some(&Value::Int(6)));
    }

    #[test]
    fn failed_step_reports_processor() {
        let mut p = product();
        p.push(0, Value::Int(2)).unwrap();
        let err = p.push(0, Value::from("x")).unwrap_err();
        assert!(matches!(err, PushError::Evaluation { processor, .. } if processor == p.id()));
        assert_eq!(p.accumulator(), Some(&Value::Int(2)));
    }

    #[test]
    fn only_port_zero_exists() {
        let mut p = product();
        assert!(matches!(p.push(1, Value::Int(1)), Err(PushError::InvalidPort { .. })));
    }

    #[test]
    fn reset_restarts_the_fold() {
        let mut p = product();
        p.push(0, Value::Int(5)).unwrap();
        p.reset();
        p.push(0, Value::Int(7)).unwrap();
        assert_eq!(p.accumulator(), Some(&Value::Int(7)));
    }

    proptest! {
        /// Property: a duplicate taken mid-stream never shares state with its source.
        #[test]
        fn duplicate_diverges(prefix in prop::collection::vec(-50i64..50, 0..10), extra in -50i64..50) {
            let mut sum = CumulativeProcessor::new(CumulativeFunction::new(ADDITION).unwrap());
            for v in &prefix {
                sum.push(0, Value::Int(*v)).unwrap();
            }
            let mut copy = sum.duplicate();
            copy.push(0, Value::Int(extra)).unwrap();

            prop_assert_eq!(copy.accumulator(), Some(&Value::Int(extra)));
            let expected = (!prefix.is_empty()).then(|| Value::Int(prefix.iter().sum()));
            prop_assert_eq!(sum.accumulator().cloned(), expected);
        }
    }
}
