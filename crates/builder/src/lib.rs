//! `cepflow-builder`: assembling function trees from grammar reductions.
//!
//! An external parser drives an [`ExpressionBuilder`]: it shifts raw tokens
//! onto a [`ParseStack`] and, whenever a production is recognised, reduces
//! the matching symbol. The [`BuilderRegistry`] maps each symbol to a rule
//! that pops the production's slots and pushes one function.

pub mod builder;
pub mod error;
pub mod registry;
pub mod rules;
pub mod stack;

pub use builder::{BuildStep, ExpressionBuilder};
pub use error::{BuildError, BuildResult};
pub use registry::{BuildRule, BuilderRegistry};
pub use stack::{ParseStack, StackItem};
