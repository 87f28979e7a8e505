//! `cepflow-core`: runtime values and shared primitives.
//!
//! This crate holds the pieces every other crate agrees on: the runtime
//! [`Value`] model and its type metadata, the evaluation [`Context`], processor
//! identities and event coordinates, the evaluation error model, and engine
//! configuration. It has no knowledge of functions or processors.

pub mod config;
pub mod context;
pub mod error;
pub mod id;
pub mod types;
pub mod value;

pub use config::{EngineConfig, EvaluationMode};
pub use context::Context;
pub use error::{ConfigError, FunctionError, FunctionResult};
pub use id::{EventCoordinate, ProcessorId};
pub use types::{TypeSet, ValueType};
pub use value::Value;
