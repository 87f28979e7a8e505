//! `cepflow-events`: push-driven processors and event provenance.
//!
//! Processors wrap functions from `cepflow-functions` and are wired into a
//! graph with [`Connector`]. A push into any input port synchronously runs
//! the whole downstream chain; errors travel back to the caller.
//!
//! An optional [`EventTracker`] records which input events produced which
//! output events.

pub mod connector;
pub mod cumulative;
pub mod error;
pub mod feeder;
pub mod function_processor;
pub mod processor;
pub mod sinks;
pub mod tracker;

pub use connector::Connector;
pub use cumulative::CumulativeProcessor;
pub use error::{ConnectError, PushError, PushResult, TrackerError};
pub use feeder::json_feeder;
pub use function_processor::FunctionProcessor;
pub use processor::{Processor, ProcessorCore, Pushable, SharedProcessor, shared};
pub use sinks::{BlackHole, Passthrough};
pub use tracker::{AssociationKind, AssociationRecord, EventTracker, InMemoryEventTracker};
