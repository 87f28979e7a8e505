//! Processor identities and event coordinates.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_PROCESSOR_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a processor, assigned once at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessorId(u64);

impl ProcessorId {
    /// Issue a fresh identifier, unique within this process.
    pub fn next() -> Self {
        Self(NEXT_PROCESSOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position of one event in the life of a processor.
///
/// - `stream` distinguishes the input (or output) ports of the processor.
/// - `index` is the sequence number of the event on that port, starting at 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventCoordinate {
    processor: ProcessorId,
    stream: usize,
    index: u64,
}

impl EventCoordinate {
    pub fn new(processor: ProcessorId, stream: usize, index: u64) -> Self {
        Self {
            processor,
            stream,
            index,
        }
    }

    pub fn processor(&self) -> ProcessorId {
        self.processor
    }

    pub fn stream(&self) -> usize {
        self.stream
    }

    pub fn index(&self) -> u64 {
        self.index
    }
}

impl core::fmt::Display for EventCoordinate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.processor, self.stream, self.index)
    }
}
