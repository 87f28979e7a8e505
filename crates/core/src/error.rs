//! Evaluation error model.

use thiserror::Error;

/// Result type returned by every function evaluation.
pub type FunctionResult<T> = Result<T, FunctionError>;

/// A function could not produce a result for the given inputs.
///
/// `InvalidArgument` is the specialised form used when an input violates the
/// declared arity or type contract of the function (for example a non-boolean
/// condition given to a conditional). Everything else is `Evaluation`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FunctionError {
    /// The function failed for a reason of its own.
    #[error("evaluation failed: {0}")]
    Evaluation(String),

    /// An input violated the declared arity/type contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl FunctionError {
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Configuration could not be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value outside its accepted set.
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
