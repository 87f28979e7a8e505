//! Terminal and pass-through processors.

use cepflow_core::Value;

use crate::error::PushResult;
use crate::processor::{Processor, ProcessorCore};

/// Sink that accepts events on `arity` ports and discards them.
#[derive(Debug)]
pub struct BlackHole {
    core: ProcessorCore,
    received: Vec<u64>,
}

impl BlackHole {
    pub fn new(arity: usize) -> Self {
        Self {
            core: ProcessorCore::new(arity, 0),
            received: vec![0; arity],
        }
    }

    /// Events discarded on `port` since the last reset.
    pub fn received(&self, port: usize) -> u64 {
        self.received.get(port).copied().unwrap_or(0)
    }
}

impl Default for BlackHole {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Processor for BlackHole {
    fn core(&self) -> &ProcessorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessorCore {
        &mut self.core
    }

    fn push(&mut self, port: usize, _value: Value) -> PushResult<()> {
        self.core.next_input(port)?;
        self.received[port] += 1;
        Ok(())
    }

    fn reset(&mut self) {
        self.received.iter_mut().for_each(|n| *n = 0);
    }
}

/// Identity processor: every event on input `i` leaves on output `i`.
#[derive(Debug)]
pub struct Passthrough {
    core: ProcessorCore,
}

impl Passthrough {
    pub fn new(arity: usize) -> Self {
        Self {
            core: ProcessorCore::new(arity, arity),
        }
    }
}

impl Default for Passthrough {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Processor for Passthrough {
    fn core(&self) -> &ProcessorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ProcessorCore {
        &mut self.core
    }

    fn push(&mut self, port: usize, value: Value) -> PushResult<()> {
        let source = self.core.next_input(port)?;
        let produced = self.core.next_output(port)?;
        self.core.associate(source, produced)?;
        self.core.emit(port, value)
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PushError;

    #[test]
    fn black_hole_counts_per_port() {
        let mut sink = BlackHole::new(2);
        sink.push(1, Value::Int(1)).unwrap();
        sink.push(1, Value::Null).unwrap();
        assert_eq!(sink.received(0), 0);
        assert_eq!(sink.received(1), 2);
        assert!(matches!(sink.push(2, Value::Null), Err(PushError::InvalidPort { .. })));
        sink.reset();
        assert_eq!(sink.received(1), 0);
    }

    #[test]
    fn passthrough_keeps_its_own_context() {
        let mut p = Passthrough::default();
        p.context_mut().put("a", 6);
        assert_eq!(p.context().get("a"), Some(&Value::Int(6)));
        assert!(p.push(0, Value::Int(1)).is_ok());
    }
}
