use std::collections::HashSet;

use crate::diagnostics::{DiagnosticSink, NullSink, TraversalEvent};
use crate::error::{Result, SelectionError};
use crate::operations::query::neighbors_in_set;
use crate::topology::{FaceId, MeshGraph};

use super::trace_loop::TraceLoop;

/// How the initial loop was obtained from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStrategy {
    /// One face selected: the longest trace through it.
    SingleFace,
    /// Several faces forming a chain: used as-is.
    Continuous,
    /// Several faces with a branch: traced from the active face.
    Branching,
}

/// The seed loop for layering.
#[derive(Debug, Clone)]
pub struct InitialLoop {
    /// Faces in the loop. Traced loops keep traversal order; a continuous
    /// selection keeps mesh order.
    pub faces: Vec<FaceId>,
    /// How the faces were obtained.
    pub strategy: SeedStrategy,
}

/// Derives the initial face loop from the mesh's current selection.
///
/// - One selected face: a quad is traced across both of its opposite-edge
///   pairs, any other polygon from each of its edges, and the longest trace
///   wins (first one on ties).
/// - Several faces where none has more than two edge links into the
///   selection: the selection itself is the loop.
/// - Otherwise: a fresh trace from the active face, or the first selected
///   face when there is no active face.
#[derive(Debug, Default)]
pub struct DeriveInitialLoop;

impl DeriveInitialLoop {
    /// Creates a new `DeriveInitialLoop` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the derivation.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptySelection`] if no face is selected, or
    /// a topology error if the mesh is inconsistent.
    pub fn execute(&self, mesh: &MeshGraph) -> Result<InitialLoop> {
        self.execute_with(mesh, &mut NullSink)
    }

    /// Executes the derivation, reporting traces and the result to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptySelection`] if no face is selected, or
    /// a topology error if the mesh is inconsistent.
    pub fn execute_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &MeshGraph,
        sink: &mut S,
    ) -> Result<InitialLoop> {
        let selected = mesh.selected_faces();
        let seed = if selected.is_empty() {
            return Err(SelectionError::EmptySelection.into());
        } else if selected.len() == 1 {
            InitialLoop {
                faces: longest_trace(mesh, selected[0], sink)?,
                strategy: SeedStrategy::SingleFace,
            }
        } else if is_continuous(mesh, &selected)? {
            InitialLoop {
                faces: selected,
                strategy: SeedStrategy::Continuous,
            }
        } else {
            let start = mesh.active_face().unwrap_or(selected[0]);
            let mut faces = TraceLoop::new(start).execute_with(mesh, sink)?;
            if faces.is_empty() {
                faces.push(start);
            }
            InitialLoop {
                faces,
                strategy: SeedStrategy::Branching,
            }
        };

        sink.record(TraversalEvent::InitialLoop {
            strategy: seed.strategy,
            faces: seed.faces.clone(),
        });
        Ok(seed)
    }
}

/// No selected face has more than two edge links into the selection.
fn is_continuous(mesh: &MeshGraph, selected: &[FaceId]) -> Result<bool> {
    let set: HashSet<FaceId> = selected.iter().copied().collect();
    for &face in selected {
        if neighbors_in_set(mesh, face, &set)? > 2 {
            return Ok(false);
        }
    }
    Ok(true)
}

fn longest_trace<S: DiagnosticSink + ?Sized>(
    mesh: &MeshGraph,
    face: FaceId,
    sink: &mut S,
) -> Result<Vec<FaceId>> {
    let edges = mesh.edges_of(face)?;
    // edges 0 and 1 enter the two opposite pairs (0/2 and 1/3) of a quad
    let entries = if edges.len() == 4 { &edges[..2] } else { edges };

    let mut best: Vec<FaceId> = Vec::new();
    for &entry in entries {
        let trace = TraceLoop::new(face)
            .with_entry_edge(entry)
            .execute_with(mesh, sink)?;
        if trace.len() > best.len() {
            best = trace;
        }
    }
    if best.is_empty() {
        best.push(face);
    }
    Ok(best)
}
