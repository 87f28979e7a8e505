//! The push-driven processor contract and the state every processor shares.

use std::sync::{Arc, Mutex, TryLockError};

use cepflow_core::{Context, EventCoordinate, ProcessorId, TypeSet, Value, ValueType};

use crate::error::{ConnectError, PushError, PushResult};
use crate::tracker::EventTracker;

/// A processor as it lives inside a pipeline graph.
pub type SharedProcessor = Arc<Mutex<dyn Processor>>;

/// Wrap a processor for wiring, keeping its concrete type visible to the caller.
///
/// `Arc<Mutex<P>>` coerces to [`SharedProcessor`] wherever one is expected.
pub fn shared<P: Processor>(processor: P) -> Arc<Mutex<P>> {
    Arc::new(Mutex::new(processor))
}

/// A push-driven stream stage.
///
/// Pushing an event into an input port synchronously drives evaluation and
/// pushes any result downstream before returning. Failures propagate to the
/// caller of `push`.
///
/// Implementors own a [`ProcessorCore`] and expose it through `core` and
/// `core_mut`; everything else has a default built on it.
pub trait Processor: Send + std::fmt::Debug + 'static {
    fn core(&self) -> &ProcessorCore;

    fn core_mut(&mut self) -> &mut ProcessorCore;

    /// Handle one event arriving on input `port`.
    fn push(&mut self, port: usize, value: Value) -> PushResult<()>;

    /// Clear buffered events and accumulated state.
    fn reset(&mut self);

    fn id(&self) -> ProcessorId {
        self.core().id()
    }

    fn input_arity(&self) -> usize {
        self.core().input_arity()
    }

    fn output_arity(&self) -> usize {
        self.core().output_arity()
    }

    fn input_types_for(&self, _port: usize) -> TypeSet {
        TypeSet::any()
    }

    fn output_type_for(&self, _port: usize) -> ValueType {
        ValueType::Any
    }

    /// Route output `port` to a downstream input.
    fn connect_output(&mut self, port: usize, downstream: Pushable) -> Result<(), ConnectError> {
        self.core_mut().connect_output(port, downstream)
    }

    fn set_event_tracker(&mut self, tracker: Arc<dyn EventTracker>) {
        self.core_mut().set_tracker(Some(tracker));
    }

    fn clear_event_tracker(&mut self) {
        self.core_mut().set_tracker(None);
    }

    fn context(&self) -> &Context {
        self.core().context()
    }

    fn context_mut(&mut self) -> &mut Context {
        self.core_mut().context_mut()
    }
}

/// Identity, wiring, provenance and context state common to all processors.
///
/// Event counters only move forward: [`Processor::reset`] never rewinds them,
/// so every coordinate a processor issues is unique for its lifetime.
#[derive(Debug)]
pub struct ProcessorCore {
    id: ProcessorId,
    input_arity: usize,
    output_arity: usize,
    outputs: Vec<Option<Pushable>>,
    tracker: Option<Arc<dyn EventTracker>>,
    context: Context,
    inputs_seen: Vec<u64>,
    outputs_sent: Vec<u64>,
}

impl ProcessorCore {
    pub fn new(input_arity: usize, output_arity: usize) -> Self {
        Self {
            id: ProcessorId::next(),
            input_arity,
            output_arity,
            outputs: vec![None; output_arity],
            tracker: None,
            context: Context::new(),
            inputs_seen: vec![0; input_arity],
            outputs_sent: vec![0; output_arity],
        }
    }

    /// Same shape and context under a new identity, with no connections,
    /// no tracker and fresh counters.
    pub fn detached(&self) -> Self {
        let mut core = Self::new(self.input_arity, self.output_arity);
        core.context = self.context.clone();
        core
    }

    pub fn id(&self) -> ProcessorId {
        self.id
    }

    pub fn input_arity(&self) -> usize {
        self.input_arity
    }

    pub fn output_arity(&self) -> usize {
        self.output_arity
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn tracker(&self) -> Option<&Arc<dyn EventTracker>> {
        self.tracker.as_ref()
    }

    pub fn set_tracker(&mut self, tracker: Option<Arc<dyn EventTracker>>) {
        self.tracker = tracker;
    }

    pub fn is_connected(&self, port: usize) -> bool {
        self.outputs.get(port).is_some_and(Option::is_some)
    }

    pub fn connect_output(&mut self, port: usize, downstream: Pushable) -> Result<(), ConnectError> {
        if self.is_connected(port) {
            tracing::debug!(processor = %self.id, port, "replacing existing connection");
        }
        match self.outputs.get_mut(port) {
            Some(slot) => {
                *slot = Some(downstream);
                Ok(())
            }
            None => Err(ConnectError::InvalidOutputPort {
                processor: self.id,
                port,
                arity: self.output_arity,
            }),
        }
    }

    pub fn check_input_port(&self, port: usize) -> PushResult<()> {
        if port < self.input_arity {
            Ok(())
        } else {
            Err(PushError::InvalidPort {
                processor: self.id,
                port,
            })
        }
    }

    /// Assign the next coordinate on input `port` and record it.
    pub fn next_input(&mut self, port: usize) -> PushResult<EventCoordinate> {
        self.check_input_port(port)?;
        let index = self.inputs_seen[port];
        self.inputs_seen[port] += 1;
        let coordinate = EventCoordinate::new(self.id, port, index);
        if let Some(tracker) = &self.tracker {
            tracker.record_input(coordinate)?;
        }
        Ok(coordinate)
    }

    /// Assign the next coordinate on output `port` and record it.
    pub fn next_output(&mut self, port: usize) -> PushResult<EventCoordinate> {
        let Some(sent) = self.outputs_sent.get_mut(port) else {
            return Err(PushError::InvalidPort {
                processor: self.id,
                port,
            });
        };
        let coordinate = EventCoordinate::new(self.id, port, *sent);
        *sent += 1;
        if let Some(tracker) = &self.tracker {
            tracker.record_output(coordinate)?;
        }
        Ok(coordinate)
    }

    pub fn associate(&self, input: EventCoordinate, output: EventCoordinate) -> PushResult<()> {
        if let Some(tracker) = &self.tracker {
            tracker.associate(input, output)?;
        }
        Ok(())
    }

    pub fn associate_outputs(&self, earlier: EventCoordinate, later: EventCoordinate) -> PushResult<()> {
        if let Some(tracker) = &self.tracker {
            tracker.associate_outputs(earlier, later)?;
        }
        Ok(())
    }

    /// Deliver `value` to whatever is connected to output `port`.
    ///
    /// An unconnected port drops the event.
    pub fn emit(&self, port: usize, value: Value) -> PushResult<()> {
        match self.outputs.get(port) {
            Some(Some(downstream)) => downstream.push(value),
            Some(None) => {
                tracing::debug!(processor = %self.id, port, "dropping event on unconnected output");
                Ok(())
            }
            None => Err(PushError::InvalidPort {
                processor: self.id,
                port,
            }),
        }
    }
}

/// Handle on one input port of a shared processor.
#[derive(Clone)]
pub struct Pushable {
    target: SharedProcessor,
    processor: ProcessorId,
    port: usize,
    accepted: TypeSet,
}

impl Pushable {
    /// Fails if `port` is not an input of `target` or `target` is locked.
    pub fn new(target: SharedProcessor, port: usize) -> Result<Self, ConnectError> {
        let (processor, accepted) = {
            let guard = match target.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::WouldBlock) => return Err(ConnectError::Busy),
                Err(TryLockError::Poisoned(_)) => return Err(ConnectError::Poisoned),
            };
            if port >= guard.input_arity() {
                return Err(ConnectError::InvalidInputPort {
                    processor: guard.id(),
                    port,
                    arity: guard.input_arity(),
                });
            }
            (guard.id(), guard.input_types_for(port))
        };
        Ok(Self {
            target,
            processor,
            port,
            accepted,
        })
    }

    pub fn processor(&self) -> ProcessorId {
        self.processor
    }

    pub fn port(&self) -> usize {
        self.port
    }

    /// Types the target port accepts.
    pub fn accepted_types(&self) -> &TypeSet {
        &self.accepted
    }

    /// Push one event and run the downstream chain to completion.
    ///
    /// A target that is already mid-push (a cycle in the graph, or another
    /// thread) yields [`PushError::Busy`] instead of blocking.
    pub fn push(&self, value: impl Into<Value>) -> PushResult<()> {
        let mut target = match self.target.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                return Err(PushError::Busy {
                    processor: self.processor,
                });
            }
            Err(TryLockError::Poisoned(_)) => {
                return Err(PushError::Poisoned {
                    processor: self.processor,
                });
            }
        };
        target.push(self.port, value.into())
    }
}

impl std::fmt::Debug for Pushable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pushable")
            .field("processor", &self.processor)
            .field("port", &self.port)
            .finish()
    }
}
