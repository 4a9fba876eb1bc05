use std::collections::{HashSet, VecDeque};

use crate::diagnostics::{DiagnosticSink, NullSink, TraversalEvent};
use crate::error::Result;
use crate::topology::{FaceId, MeshGraph};

use super::adjacency::face_neighbors;

/// Partitions a set of faces into maximal edge-connected components.
///
/// Only faces in the candidate set are visited. Components come out in the
/// order of their first candidate, and each component lists its faces in
/// breadth-first order from that candidate, so the result is deterministic
/// for a given candidate order.
pub struct ExtractComponents<'a> {
    candidates: &'a [FaceId],
}

impl<'a> ExtractComponents<'a> {
    /// Creates a new `ExtractComponents` query over `candidates`.
    #[must_use]
    pub fn new(candidates: &'a [FaceId]) -> Self {
        Self { candidates }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate face is not in the mesh.
    pub fn execute(&self, mesh: &MeshGraph) -> Result<Vec<Vec<FaceId>>> {
        self.execute_with(mesh, &mut NullSink)
    }

    /// Executes the query, reporting each component to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate face is not in the mesh.
    pub fn execute_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &MeshGraph,
        sink: &mut S,
    ) -> Result<Vec<Vec<FaceId>>> {
        sink.record(TraversalEvent::ComponentSearch {
            candidates: self.candidates.len(),
        });
        let members: HashSet<FaceId> = self.candidates.iter().copied().collect();
        let mut visited: HashSet<FaceId> = HashSet::with_capacity(members.len());
        let mut components: Vec<Vec<FaceId>> = Vec::new();

        for &start in self.candidates {
            if !visited.insert(start) {
                continue;
            }
            let mut component = vec![start];
            let mut queue = VecDeque::new();
            queue.push_back(start);

            while let Some(curr) = queue.pop_front() {
                for nb in face_neighbors(mesh, curr)? {
                    if members.contains(&nb) && visited.insert(nb) {
                        component.push(nb);
                        queue.push_back(nb);
                    }
                }
            }

            sink.record(TraversalEvent::ComponentFound {
                faces: component.clone(),
            });
            components.push(component);
        }

        Ok(components)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::operations::creation::MakeGrid;

    #[test]
    fn empty_input_gives_no_components() {
        let mesh = MeshGraph::new();
        assert!(ExtractComponents::new(&[]).execute(&mesh).unwrap().is_empty());
    }

    #[test]
    fn splits_disconnected_columns() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(4, 2).execute(&mut mesh).unwrap();
        // columns 1 and 3 of a 4x2 grid
        let candidates = [f[1], f[5], f[3], f[7]];
        let comps = ExtractComponents::new(&candidates).execute(&mesh).unwrap();
        assert_eq!(comps, vec![vec![f[1], f[5]], vec![f[3], f[7]]]);
    }

    #[test]
    fn diagonal_faces_are_not_connected() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(2, 2).execute(&mut mesh).unwrap();
        let comps = ExtractComponents::new(&[f[0], f[3]]).execute(&mesh).unwrap();
        assert_eq!(comps.len(), 2);
    }

    #[test]
    fn duplicate_candidates_appear_once() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(3, 1).execute(&mut mesh).unwrap();
        let mut sink = RecordingSink::new();
        let comps = ExtractComponents::new(&[f[0], f[1], f[0], f[2]])
            .execute_with(&mesh, &mut sink)
            .unwrap();
        assert_eq!(comps, vec![vec![f[0], f[1], f[2]]]);
        assert_eq!(
            sink.count(|e| matches!(e, TraversalEvent::ComponentFound { .. })),
            1
        );
    }
}
