//! Wiring processors into a graph.

use std::sync::TryLockError;

use crate::error::ConnectError;
use crate::processor::{Pushable, SharedProcessor};

/// Connects output ports of one processor to input ports of another.
pub struct Connector;

impl Connector {
    /// Route output `out_port` of `upstream` into input `in_port` of `downstream`.
    ///
    /// Fails when either port does not exist or when the upstream output type
    /// cannot flow into the downstream input.
    pub fn connect(
        upstream: SharedProcessor,
        out_port: usize,
        downstream: SharedProcessor,
        in_port: usize,
    ) -> Result<(), ConnectError> {
        let pushable = Pushable::new(downstream, in_port)?;

        let mut up = match upstream.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(ConnectError::Busy),
            Err(TryLockError::Poisoned(_)) => return Err(ConnectError::Poisoned),
        };
        if out_port >= up.output_arity() {
            return Err(ConnectError::InvalidOutputPort {
                processor: up.id(),
                port: out_port,
                arity: up.output_arity(),
            });
        }

        let output = up.output_type_for(out_port);
        if !pushable.accepted_types().admits(output) {
            return Err(ConnectError::IncompatibleTypes {
                output,
                input: pushable.accepted_types().clone(),
            });
        }

        tracing::debug!(
            upstream = %up.id(),
            out_port,
            downstream = %pushable.processor(),
            in_port,
            "connected processors"
        );
        up.connect_output(out_port, pushable)
    }

    /// Connect every output `i` of `upstream` to input `i` of `downstream`.
    pub fn connect_all(upstream: SharedProcessor, downstream: SharedProcessor) -> Result<(), ConnectError> {
        let up_arity = arity_of(&upstream, |p| p.output_arity())?;
        let down_arity = arity_of(&downstream, |p| p.input_arity())?;
        if up_arity != down_arity {
            return Err(ConnectError::ArityMismatch {
                upstream: up_arity,
                downstream: down_arity,
            });
        }
        for port in 0..up_arity {
            Self::connect(upstream.clone(), port, downstream.clone(), port)?;
        }
        Ok(())
    }
}

fn arity_of(
    processor: &SharedProcessor,
    arity: impl Fn(&dyn crate::Processor) -> usize,
) -> Result<usize, ConnectError> {
    match processor.try_lock() {
        Ok(guard) => Ok(arity(&*guard)),
        Err(TryLockError::WouldBlock) => Err(ConnectError::Busy),
        Err(TryLockError::Poisoned(_)) => Err(ConnectError::Poisoned),
    }
}
