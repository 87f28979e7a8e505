use cepflow_core::FunctionError;
use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

/// Tree construction was aborted.
///
/// Kept apart from [`FunctionError`]: a build failure means the token
/// sequence was malformed, not that some function failed to evaluate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("stack underflow: expected {expected}")]
    StackUnderflow { expected: String },

    #[error("expected {expected}, found {found}")]
    UnexpectedItem { expected: String, found: String },

    #[error("no build rule registered for {0:?}")]
    UnknownSymbol(String),

    /// More than one item was left once all reductions ran.
    #[error("expression incomplete: {remaining} items left on the stack")]
    Incomplete { remaining: usize },

    #[error("nothing was built")]
    Empty,

    #[error("malformed token {0:?}")]
    Malformed(String),

    /// The pieces were well formed but do not fit the function's contract.
    #[error("invalid tree: {0}")]
    Shape(#[from] FunctionError),

    #[error("reducing {symbol:?} failed: {source}")]
    Reduce {
        symbol: String,
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub fn underflow(expected: impl Into<String>) -> Self {
        Self::StackUnderflow {
            expected: expected.into(),
        }
    }

    pub fn unexpected(expected: impl Into<String>, found: impl ToString) -> Self {
        Self::UnexpectedItem {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    /// The innermost cause, looking through `Reduce` wrappers.
    pub fn root_cause(&self) -> &BuildError {
        match self {
            Self::Reduce { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
