use std::collections::HashSet;

use tracing::warn;

use crate::diagnostics::{DiagnosticSink, NullSink, TraversalEvent};
use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, FaceId, MeshGraph};

/// Maximum number of face-to-face steps a single trace may take.
pub const MAX_TRACE_STEPS: usize = 200;

/// Returns the edge a trace leaves `face` through after entering via `edge`.
///
/// On a quad this is the edge two positions further round the boundary.
/// On any other polygon it is the first boundary edge that is not `edge`.
/// If neither rule finds an edge (the entry edge is not on the quad, or the
/// face has only that one edge), `edge` itself is returned.
///
/// # Errors
///
/// Returns an error if `face` is not in the mesh.
pub fn opposite_edge(
    mesh: &MeshGraph,
    face: FaceId,
    edge: EdgeId,
) -> std::result::Result<EdgeId, TopologyError> {
    let data = mesh.face(face)?;
    if data.is_quad() {
        return Ok(data
            .edge_index(edge)
            .map_or(edge, |idx| data.edges[(idx + 2) % 4]));
    }
    Ok(data.edges.iter().copied().find(|&e| e != edge).unwrap_or(edge))
}

/// Traces a face loop by walking across opposite edges.
///
/// Starting at `start`, the walk repeatedly crosses the edge opposite the
/// one it entered through. It stops when the crossing edge has no other
/// face (open loop), when it returns to `start` (closed loop, with `start`
/// appended again), when it meets a face it already holds (partial cycle,
/// not appended), or after [`MAX_TRACE_STEPS`] steps.
///
/// The walk only runs in one direction, away from the entry edge.
pub struct TraceLoop {
    start: FaceId,
    entry_edge: Option<EdgeId>,
}

impl TraceLoop {
    /// Creates a new `TraceLoop` from `start`, entering through its first
    /// boundary edge.
    #[must_use]
    pub fn new(start: FaceId) -> Self {
        Self {
            start,
            entry_edge: None,
        }
    }

    /// Sets the edge the trace is considered to have entered `start` through.
    #[must_use]
    pub fn with_entry_edge(mut self, edge: EdgeId) -> Self {
        self.entry_edge = Some(edge);
        self
    }

    /// Executes the trace, returning faces in traversal order.
    ///
    /// # Errors
    ///
    /// Returns an error if the start face or entry edge is not in the mesh.
    pub fn execute(&self, mesh: &MeshGraph) -> Result<Vec<FaceId>> {
        self.execute_with(mesh, &mut NullSink)
    }

    /// Executes the trace, reporting every step to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if the start face or entry edge is not in the mesh.
    pub fn execute_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &MeshGraph,
        sink: &mut S,
    ) -> Result<Vec<FaceId>> {
        let start = self.start;
        let entry = match self.entry_edge {
            Some(edge) => edge,
            None => {
                let edges = mesh.edges_of(start)?;
                match edges {
                    [first, _, ..] => *first,
                    _ => {
                        sink.record(TraversalEvent::TraceTooFewEdges { face: start });
                        return Ok(vec![start]);
                    }
                }
            }
        };
        sink.record(TraversalEvent::TraceStarted {
            face: start,
            entry_edge: entry,
            entry_link_count: mesh.faces_of(entry)?.len(),
        });

        let mut faces = vec![start];
        let mut seen: HashSet<FaceId> = HashSet::from([start]);
        let mut face = start;
        let mut crossing = opposite_edge(mesh, start, entry)?;
        let mut steps = 0;
        let mut terminated = false;

        while steps < MAX_TRACE_STEPS {
            steps += 1;
            let edge = mesh.edge(crossing)?;
            sink.record(TraversalEvent::TraceStep {
                step: steps,
                face,
                edge: crossing,
                link_count: edge.link_faces.len(),
            });

            let Some(next) = edge.other_face(face) else {
                sink.record(TraversalEvent::TraceBoundary { face });
                terminated = true;
                break;
            };
            if next == start {
                sink.record(TraversalEvent::TraceClosed { start });
                faces.push(next);
                terminated = true;
                break;
            }
            if !seen.insert(next) {
                sink.record(TraversalEvent::TracePartialCycle { face: next });
                terminated = true;
                break;
            }

            let crossed = crossing;
            face = next;
            crossing = opposite_edge(mesh, face, crossed)?;
            faces.push(face);
        }

        if !terminated {
            warn!(
                "face loop trace stopped after {MAX_TRACE_STEPS} steps with {} faces",
                faces.len()
            );
            sink.record(TraversalEvent::TraceStepLimit {
                limit: MAX_TRACE_STEPS,
            });
        }
        sink.record(TraversalEvent::TraceFinished {
            faces: faces.clone(),
        });
        Ok(faces)
    }
}
