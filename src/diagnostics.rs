//! Structured diagnostics for traversal and selection decisions.
//!
//! Every step the tracer, layer builder and selector take can be reported
//! as a [`TraversalEvent`] to a [`DiagnosticSink`]. Sinks only observe;
//! they never influence which faces end up selected.

use crate::operations::selection::StopReason;
use crate::operations::traversal::{LayerOrigin, SeedStrategy};
use crate::topology::{EdgeId, FaceId};

/// A single decision taken while selecting alternating loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraversalEvent {
    /// Flood fill started over a candidate set.
    ComponentSearch { candidates: usize },
    /// A maximal connected component was extracted.
    ComponentFound { faces: Vec<FaceId> },

    /// Loop trace started at `face`, entering through `entry_edge`.
    TraceStarted {
        face: FaceId,
        entry_edge: EdgeId,
        entry_link_count: usize,
    },
    /// Face has fewer than two edges; the trace is just the face itself.
    TraceTooFewEdges { face: FaceId },
    /// One traversal step leaving `face` through `edge`.
    TraceStep {
        step: usize,
        face: FaceId,
        edge: EdgeId,
        link_count: usize,
    },
    /// The crossing edge has no other face.
    TraceBoundary { face: FaceId },
    /// The trace came back to its start face.
    TraceClosed { start: FaceId },
    /// The trace reached a face it already holds, away from the start.
    TracePartialCycle { face: FaceId },
    /// The step bound was hit before the trace terminated.
    TraceStepLimit { limit: usize },
    /// Trace finished with the given faces.
    TraceFinished { faces: Vec<FaceId> },

    /// Initial loop derived from the current selection.
    InitialLoop {
        strategy: SeedStrategy,
        faces: Vec<FaceId>,
    },

    /// A breadth-first layering iteration began.
    BfsIteration { iteration: usize },
    /// A frontier side collected new neighbours.
    FrontierExpanded { origin: LayerOrigin, faces: usize },
    /// A layer was appended to the output sequence.
    LayerAppended {
        index: usize,
        origin: LayerOrigin,
        faces: Vec<FaceId>,
    },
    /// Both frontiers emptied.
    BfsExhausted { iterations: usize },
    /// The iteration bound was hit with faces still on a frontier.
    BfsIterationLimit { limit: usize },

    /// Layer indices chosen by alternation.
    AlternationPlanned {
        total: usize,
        skip: usize,
        offset: usize,
        indices: Vec<usize>,
    },

    /// A driver pass started with `selected` faces selected.
    PassStarted { pass: usize, selected: usize },
    /// A driver pass committed and left `selected` faces selected.
    PassFinished { pass: usize, selected: usize },
    /// The driver stopped.
    Stopped { reason: StopReason },
}

/// Receiver for [`TraversalEvent`]s.
pub trait DiagnosticSink {
    /// Records one event.
    fn record(&mut self, event: TraversalEvent);
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _event: TraversalEvent) {}
}

/// Sink that forwards every event to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&mut self, event: TraversalEvent) {
        tracing::debug!(target: "faceloop::diagnostics", ?event);
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    /// Events in the order they were recorded.
    pub events: Vec<TraversalEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&TraversalEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, event: TraversalEvent) {
        self.events.push(event);
    }
}
