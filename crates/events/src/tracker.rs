//! Provenance tracking: which input events produced which output events.
//!
//! A tracker is an optional collaborator of a processor. One instance is
//! typically shared (`Arc`) by every processor of a pipeline, so
//! implementations take `&self` and must tolerate interleaved calls from many
//! processor identities.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use cepflow_core::{EventCoordinate, ProcessorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

pub trait EventTracker: Send + Sync + std::fmt::Debug {
    fn record_input(&self, coordinate: EventCoordinate) -> Result<(), TrackerError>;

    fn record_output(&self, coordinate: EventCoordinate) -> Result<(), TrackerError>;

    /// Link an input event to an output event it contributed to.
    fn associate(&self, input: EventCoordinate, output: EventCoordinate) -> Result<(), TrackerError>;

    /// Link an output event to a later output it contributed to (running state).
    fn associate_outputs(
        &self,
        earlier: EventCoordinate,
        later: EventCoordinate,
    ) -> Result<(), TrackerError>;

    fn contains_input_association(
        &self,
        processor: ProcessorId,
        in_stream: usize,
        in_index: u64,
        out_stream: usize,
        out_index: u64,
    ) -> bool;

    fn contains_output_association(
        &self,
        processor: ProcessorId,
        earlier_stream: usize,
        earlier_index: u64,
        later_stream: usize,
        later_index: u64,
    ) -> bool;
}

impl<T> EventTracker for Arc<T>
where
    T: EventTracker + ?Sized,
{
    fn record_input(&self, coordinate: EventCoordinate) -> Result<(), TrackerError> {
        (**self).record_input(coordinate)
    }

    fn record_output(&self, coordinate: EventCoordinate) -> Result<(), TrackerError> {
        (**self).record_output(coordinate)
    }

    fn associate(&self, input: EventCoordinate, output: EventCoordinate) -> Result<(), TrackerError> {
        (**self).associate(input, output)
    }

    fn associate_outputs(
        &self,
        earlier: EventCoordinate,
        later: EventCoordinate,
    ) -> Result<(), TrackerError> {
        (**self).associate_outputs(earlier, later)
    }

    fn contains_input_association(
        &self,
        processor: ProcessorId,
        in_stream: usize,
        in_index: u64,
        out_stream: usize,
        out_index: u64,
    ) -> bool {
        (**self).contains_input_association(processor, in_stream, in_index, out_stream, out_index)
    }

    fn contains_output_association(
        &self,
        processor: ProcessorId,
        earlier_stream: usize,
        earlier_index: u64,
        later_stream: usize,
        later_index: u64,
    ) -> bool {
        (**self).contains_output_association(
            processor,
            earlier_stream,
            earlier_index,
            later_stream,
            later_index,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// input event → output event
    Input,
    /// earlier output event → later output event
    Output,
}

/// One lineage link, as stored by [`InMemoryEventTracker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationRecord {
    pub kind: AssociationKind,
    pub from: EventCoordinate,
    pub to: EventCoordinate,
    pub recorded_at: DateTime<Utc>,
}

impl AssociationRecord {
    fn links(&self, kind: AssociationKind, from: (usize, u64), to: (usize, u64)) -> bool {
        self.kind == kind
            && (self.from.stream(), self.from.index()) == from
            && (self.to.stream(), self.to.index()) == to
    }
}

type StreamKey = (ProcessorId, usize);

#[derive(Debug, Default)]
struct TrackerState {
    inputs: HashMap<StreamKey, Vec<u64>>,
    outputs: HashMap<StreamKey, Vec<u64>>,
    associations: HashMap<ProcessorId, Vec<AssociationRecord>>,
}

/// Append-only, in-process provenance store.
///
/// Writes take a write lock and fail with [`TrackerError::Poisoned`] if a
/// writer panicked; queries recover the data and keep answering.
#[derive(Debug, Default)]
pub struct InMemoryEventTracker {
    state: RwLock<TrackerState>,
}

impl InMemoryEventTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&self, f: impl FnOnce(&mut TrackerState)) -> Result<(), TrackerError> {
        let mut state = self.state.write().map_err(|_| TrackerError::Poisoned)?;
        f(&mut state);
        Ok(())
    }

    fn link(
        &self,
        kind: AssociationKind,
        from: EventCoordinate,
        to: EventCoordinate,
    ) -> Result<(), TrackerError> {
        let record = AssociationRecord {
            kind,
            from,
            to,
            recorded_at: Utc::now(),
        };
        self.append(|state| {
            state
                .associations
                .entry(to.processor())
                .or_default()
                .push(record)
        })
    }

    fn read<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Indices recorded on input `stream` of `processor`, in arrival order.
    pub fn recorded_inputs(&self, processor: ProcessorId, stream: usize) -> Vec<u64> {
        self.read(|s| s.inputs.get(&(processor, stream)).cloned().unwrap_or_default())
    }

    /// Indices recorded on output `stream` of `processor`, in emission order.
    pub fn recorded_outputs(&self, processor: ProcessorId, stream: usize) -> Vec<u64> {
        self.read(|s| s.outputs.get(&(processor, stream)).cloned().unwrap_or_default())
    }

    pub fn associations_for(&self, processor: ProcessorId) -> Vec<AssociationRecord> {
        self.read(|s| s.associations.get(&processor).cloned().unwrap_or_default())
    }

    pub fn association_count(&self) -> usize {
        self.read(|s| s.associations.values().map(Vec::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|s| s.inputs.is_empty() && s.outputs.is_empty() && s.associations.is_empty())
    }

    /// Every association, ordered by processor then insertion, as JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, TrackerError> {
        let mut records: Vec<(ProcessorId, Vec<AssociationRecord>)> = self.read(|s| {
            s.associations
                .iter()
                .map(|(id, records)| (*id, records.clone()))
                .collect()
        });
        records.sort_by_key(|(id, _)| *id);
        let flat: Vec<AssociationRecord> = records.into_iter().flat_map(|(_, r)| r).collect();
        Ok(serde_json::to_value(flat)?)
    }

    fn contains(
        &self,
        processor: ProcessorId,
        kind: AssociationKind,
        from: (usize, u64),
        to: (usize, u64),
    ) -> bool {
        self.read(|s| {
            s.associations
                .get(&processor)
                .is_some_and(|records| records.iter().any(|r| r.links(kind, from, to)))
        })
    }
}

impl EventTracker for InMemoryEventTracker {
    fn record_input(&self, coordinate: EventCoordinate) -> Result<(), TrackerError> {
        self.append(|state| {
            state
                .inputs
                .entry((coordinate.processor(), coordinate.stream()))
                .or_default()
                .push(coordinate.index())
        })
    }

    fn record_output(&self, coordinate: EventCoordinate) -> Result<(), TrackerError> {
        self.append(|state| {
            state
                .outputs
                .entry((coordinate.processor(), coordinate.stream()))
                .or_default()
                .push(coordinate.index())
        })
    }

    fn associate(&self, input: EventCoordinate, output: EventCoordinate) -> Result<(), TrackerError> {
        self.link(AssociationKind::Input, input, output)
    }

    fn associate_outputs(
        &self,
        earlier: EventCoordinate,
        later: EventCoordinate,
    ) -> Result<(), TrackerError> {
        self.link(AssociationKind::Output, earlier, later)
    }

    fn contains_input_association(
        &self,
        processor: ProcessorId,
        in_stream: usize,
        in_index: u64,
        out_stream: usize,
        out_index: u64,
    ) -> bool {
        self.contains(
            processor,
            AssociationKind::Input,
            (in_stream, in_index),
            (out_stream, out_index),
        )
    }

    fn contains_output_association(
        &self,
        processor: ProcessorId,
        earlier_stream: usize,
        earlier_index: u64,
        later_stream: usize,
        later_index: u64,
    ) -> bool {
        self.contains(
            processor,
            AssociationKind::Output,
            (earlier_stream, earlier_index),
            (later_stream, later_index),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn at(p: ProcessorId, stream: usize, index: u64) -> EventCoordinate {
        EventCoordinate::new(p, stream, index)
    }

    #[test]
    fn answers_only_recorded_links() {
        let tracker = InMemoryEventTracker::new();
        let p = ProcessorId::from_raw(1);
        tracker.associate(at(p, 0, 0), at(p, 0, 0)).unwrap();

        assert!(tracker.contains_input_association(p, 0, 0, 0, 0));
        assert!(!tracker.contains_input_association(p, 0, 1, 0, 1));
        assert!(!tracker.contains_output_association(p, 0, 0, 0, 0));
        assert!(!tracker.contains_input_association(ProcessorId::from_raw(2), 0, 0, 0, 0));
    }

    #[test]
    fn keeps_streams_separate_per_processor() {
        let tracker = InMemoryEventTracker::new();
        let (a, b) = (ProcessorId::from_raw(10), ProcessorId::from_raw(11));
        tracker.record_input(at(a, 0, 0)).unwrap();
        tracker.record_input(at(b, 0, 0)).unwrap();
        tracker.record_input(at(a, 0, 1)).unwrap();
        tracker.record_output(at(a, 1, 0)).unwrap();

        assert_eq!(tracker.recorded_inputs(a, 0), vec![0, 1]);
        assert_eq!(tracker.recorded_inputs(b, 0), vec![0]);
        assert_eq!(tracker.recorded_outputs(a, 1), vec![0]);
        assert!(tracker.recorded_outputs(a, 0).is_empty());
    }

    #[test]
    fn shared_tracker_keeps_every_interleaved_record() {
        let tracker = Arc::new(InMemoryEventTracker::new());
        let handles: Vec<_> = (0..4u64)
            .map(|n| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || {
                    let p = ProcessorId::from_raw(100 + n);
                    for i in 0..50 {
                        tracker.associate(at(p, 0, i), at(p, 0, i)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(tracker.association_count(), 200);
        assert!(tracker.contains_input_association(ProcessorId::from_raw(103), 0, 49, 0, 49));
    }

    #[test]
    fn exports_records_as_json() {
        let tracker = InMemoryEventTracker::new();
        let p = ProcessorId::from_raw(7);
        tracker.associate_outputs(at(p, 0, 0), at(p, 0, 1)).unwrap();

        let json = tracker.to_json().unwrap();
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["kind"], "output");
        assert_eq!(records[0]["to"]["index"], 1);
    }
}
