use std::collections::VecDeque;

use cepflow_core::{EngineConfig, EvaluationMode, EventCoordinate, TypeSet, Value, ValueType};
use cepflow_functions::{ContextAssignment, Function};

use crate::error::{PushError, PushResult};
use crate::processor::{Processor, ProcessorCore};

/// Processor wrapping one function of arity `m`/`n`.
///
/// Events are aligned by position across the `m` input ports: once every
/// port holds at least one event, the oldest event of each is taken, the
/// function is evaluated once, and the `n` outputs are pushed downstream.
/// A single-input processor therefore evaluates on every push.
///
/// Each output is associated, for provenance, with every input event of the
/// same evaluation.
#[derive(Debug)]
pub struct FunctionProcessor {
    core: ProcessorCore,
    function: Box<dyn Function>,
    mode: EvaluationMode,
    queues: Vec<VecDeque<(EventCoordinate, Value)>>,
    assignments: Vec<ContextAssignment>,
}

impl FunctionProcessor {
    pub fn new(function: impl Function) -> Self {
        Self::from_boxed(Box::new(function))
    }

    pub fn from_boxed(function: Box<dyn Function>) -> Self {
        let (m, n) = (function.input_arity(), function.output_arity());
        Self {
            core: ProcessorCore::new(m, n),
            function,
            mode: EvaluationMode::default(),
            queues: vec![VecDeque::new(); m],
            assignments: Vec::new(),
        }
    }

    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_mode(config.evaluation)
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Run `assignment` against this processor's context after each evaluation.
    pub fn with_assignment(mut self, assignment: ContextAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    pub fn function(&self) -> &dyn Function {
        self.function.as_ref()
    }

    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Events waiting on `port` for their siblings on other ports.
    pub fn pending(&self, port: usize) -> usize {
        self.queues.get(port).map_or(0, VecDeque::len)
    }

    /// Unconnected copy with a new identity and a fresh copy of the function.
    pub fn duplicate(&self) -> Self {
        Self {
            core: self.core.detached(),
            function: self.function.duplicate(),
            mode: self.mode,
            queues: vec![VecDeque::new(); self.queues.len()],
            assignments: self.assignments.clone(),
        }
    }

    fn take_front(&mut self) -> Option<(Vec<EventCoordinate>, Vec<Value>)> {
        if self.queues.iter().any(VecDeque::is_empty) {
            return None;
        }
        self.queues
            .iter_mut()
            .map(VecDeque::pop_front)
            .collect::<Option<Vec<_>>>()
            .map(|front| front.into_iter().unzip())
    }
}

impl Processor for FunctionProcessor {
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
        let coordinate = self.core.next_input(port)?;
        self.queues[port].push_back((coordinate, value));

        let Some((sources, inputs)) = self.take_front() else {
            return Ok(());
        };

        let id = self.core.id();
        let context = self.core.context_mut();
        let evaluated = match self.mode {
            EvaluationMode::Checked => self.function.evaluate(&inputs, Some(context)),
            EvaluationMode::Fast => self.function.evaluate_fast(&inputs, Some(context)),
        };
        let outputs = evaluated.map_err(|err| {
            tracing::warn!(processor = %id, function = %self.function, error = %err, "evaluation failed");
            PushError::evaluation(id, err)
        })?;

        for assignment in &mut self.assignments {
            assignment
                .assign(&inputs, self.core.context_mut())
                .map_err(|err| PushError::evaluation(id, err))?;
        }

        for (port, value) in outputs.into_iter().enumerate() {
            let produced = self.core.next_output(port)?;
            for source in &sources {
                self.core.associate(*source, produced)?;
            }
            self.core.emit(port, value)?;
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
        self.function.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepflow_functions::{ADDITION, ArgumentPlaceholder, ContextPlaceholder, FunctionTree, IdentityFunction};

    #[test]
    fn aligns_events_across_ports() {
        let mut fp = FunctionProcessor::new(ADDITION);
        fp.push(0, Value::Int(1)).unwrap();
        fp.push(0, Value::Int(2)).unwrap();
        assert_eq!(fp.pending(0), 2);
        assert_eq!(fp.pending(1), 0);

        fp.push(1, Value::Int(10)).unwrap();
        assert_eq!(fp.pending(0), 1);
        assert_eq!(fp.pending(1), 0);
    }

    #[test]
    fn checked_mode_rejects_ill_typed_events() {
        let mut fp = FunctionProcessor::new(ADDITION);
        fp.push(0, Value::from("a")).unwrap();
        let err = fp.push(1, Value::Int(1)).unwrap_err();
        assert!(err.function_error().is_some_and(|e| e.is_invalid_argument()));
    }

    #[test]
    fn config_selects_evaluation_mode() {
        let config = EngineConfig {
            evaluation: EvaluationMode::Fast,
        };
        let fp = FunctionProcessor::new(IdentityFunction::new(1)).with_config(&config);
        assert_eq!(fp.mode(), EvaluationMode::Fast);
        assert_eq!(FunctionProcessor::new(ADDITION).mode(), EvaluationMode::Checked);
    }

    #[test]
    fn assignments_update_own_context() {
        let running = FunctionTree::binary(ADDITION, ContextPlaceholder::new("n"), ArgumentPlaceholder::new(0)).unwrap();
        let mut fp = FunctionProcessor::new(IdentityFunction::new(1))
            .with_assignment(ContextAssignment::new("n", running));
        fp.context_mut().put("n", 0);
        for v in [4, 5] {
            fp.push(0, Value::Int(v)).unwrap();
        }
        assert_eq!(fp.context().get("n"), Some(&Value::Int(9)));
    }

    #[test]
    fn reset_drops_pending_events_but_keeps_indices() {
        let mut fp = FunctionProcessor::new(ADDITION);
        fp.push(0, Value::Int(1)).unwrap();
        fp.reset();
        assert_eq!(fp.pending(0), 0);
        assert_eq!(fp.core_mut().next_input(0).unwrap().index(), 1);
    }

    #[test]
    fn duplicate_is_detached() {
        let fp = FunctionProcessor::new(ADDITION);
        let copy = fp.duplicate();
        assert_ne!(copy.id(), fp.id());
        assert!(copy.function().equals(fp.function()));
    }
}
