//! Push, wiring and provenance errors.

use cepflow_core::{FunctionError, ProcessorId, TypeSet, ValueType};
use thiserror::Error;

pub type PushResult<T> = Result<T, PushError>;

/// A push could not be delivered or processed.
///
/// Errors raised downstream travel back up the whole push chain unchanged:
/// the caller of the first `push` sees the failure of the deepest processor.
#[derive(Debug, Error)]
pub enum PushError {
    /// The wrapped function failed on the pushed events.
    #[error("processor {processor} failed to evaluate: {source}")]
    Evaluation {
        processor: ProcessorId,
        source: FunctionError,
    },

    #[error("processor {processor} has no input port {port}")]
    InvalidPort { processor: ProcessorId, port: usize },

    /// The target is already handling a push (feedback loop or concurrent caller).
    #[error("processor {processor} is busy")]
    Busy { processor: ProcessorId },

    #[error("processor {processor} is unusable after a panic")]
    Poisoned { processor: ProcessorId },

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

impl PushError {
    pub fn evaluation(processor: ProcessorId, source: FunctionError) -> Self {
        Self::Evaluation { processor, source }
    }

    /// Underlying function failure, if this push failed during evaluation.
    pub fn function_error(&self) -> Option<&FunctionError> {
        match self {
            Self::Evaluation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Two processors could not be wired together.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("processor {processor} has no output port {port} (output arity {arity})")]
    InvalidOutputPort {
        processor: ProcessorId,
        port: usize,
        arity: usize,
    },

    #[error("processor {processor} has no input port {port} (input arity {arity})")]
    InvalidInputPort {
        processor: ProcessorId,
        port: usize,
        arity: usize,
    },

    #[error("cannot connect {upstream} output(s) to {downstream} input(s)")]
    ArityMismatch { upstream: usize, downstream: usize },

    #[error("output type {output} is not accepted by input expecting {input}")]
    IncompatibleTypes { output: ValueType, input: TypeSet },

    #[error("processor is busy and cannot be rewired")]
    Busy,

    #[error("processor is unusable after a panic")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracker storage poisoned")]
    Poisoned,

    #[error("failed to export provenance: {0}")]
    Export(#[from] serde_json::Error),
}
