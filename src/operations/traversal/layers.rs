use std::collections::HashSet;

use tracing::{debug, warn};

use crate::diagnostics::{DiagnosticSink, NullSink, TraversalEvent};
use crate::error::Result;
use crate::operations::query::{face_neighbors, ExtractComponents};
use crate::topology::{FaceId, MeshGraph};

/// Maximum number of breadth-first iterations when layering.
pub const MAX_LAYER_ITERATIONS: usize = 1000;

/// Which frontier produced a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOrigin {
    /// The initial loop.
    Seed,
    /// The first frontier, which claims shared neighbours first.
    Above,
    /// The second frontier.
    Below,
}

/// One ring of faces at a given breadth-first distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Faces in the layer, all edge-connected to one another.
    pub faces: Vec<FaceId>,
    /// Frontier that produced this layer.
    pub origin: LayerOrigin,
    /// Breadth-first iteration the layer was found in (0 for the seed).
    pub depth: usize,
}

/// Builds the ordered loop-layer sequence around an initial loop.
///
/// Two frontiers start at the seed and expand in lock step. Each iteration
/// the "above" frontier collects every unvisited neighbour first, then the
/// "below" frontier collects what is left; every newly collected set is
/// split into connected components, each appended as a layer. Layering
/// stops when both frontiers are empty or after [`MAX_LAYER_ITERATIONS`].
///
/// Faces never reached (other mesh islands) are not part of any layer.
pub struct BuildLayers<'a> {
    seed: &'a [FaceId],
}

impl<'a> BuildLayers<'a> {
    /// Creates a new `BuildLayers` operation around `seed`.
    #[must_use]
    pub fn new(seed: &'a [FaceId]) -> Self {
        Self { seed }
    }

    /// Executes the layering.
    ///
    /// # Errors
    ///
    /// Returns an error if a face reached by the expansion is not in the mesh.
    pub fn execute(&self, mesh: &MeshGraph) -> Result<Vec<Layer>> {
        self.execute_with(mesh, &mut NullSink)
    }

    /// Executes the layering, reporting each iteration and layer to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if a face reached by the expansion is not in the mesh.
    pub fn execute_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &MeshGraph,
        sink: &mut S,
    ) -> Result<Vec<Layer>> {
        let mut visited: HashSet<FaceId> = HashSet::new();
        let seed: Vec<FaceId> = self
            .seed
            .iter()
            .copied()
            .filter(|&f| visited.insert(f))
            .collect();
        if seed.is_empty() {
            return Ok(Vec::new());
        }

        let mut layers = Vec::new();
        push_layer(&mut layers, seed.clone(), LayerOrigin::Seed, 0, sink);

        let mut above = seed.clone();
        let mut below = seed;
        let mut iterations = 0;

        while (!above.is_empty() || !below.is_empty()) && iterations < MAX_LAYER_ITERATIONS {
            iterations += 1;
            sink.record(TraversalEvent::BfsIteration {
                iteration: iterations,
            });

            let next_above = expand_frontier(mesh, &above, &mut visited)?;
            sink.record(TraversalEvent::FrontierExpanded {
                origin: LayerOrigin::Above,
                faces: next_above.len(),
            });
            for component in ExtractComponents::new(&next_above).execute_with(mesh, sink)? {
                push_layer(&mut layers, component, LayerOrigin::Above, iterations, sink);
            }

            let next_below = expand_frontier(mesh, &below, &mut visited)?;
            sink.record(TraversalEvent::FrontierExpanded {
                origin: LayerOrigin::Below,
                faces: next_below.len(),
            });
            for component in ExtractComponents::new(&next_below).execute_with(mesh, sink)? {
                push_layer(&mut layers, component, LayerOrigin::Below, iterations, sink);
            }

            above = next_above;
            below = next_below;
        }

        if above.is_empty() && below.is_empty() {
            sink.record(TraversalEvent::BfsExhausted { iterations });
        } else {
            warn!(
                "layering stopped after {MAX_LAYER_ITERATIONS} iterations with {} frontier faces left",
                above.len() + below.len()
            );
            sink.record(TraversalEvent::BfsIterationLimit {
                limit: MAX_LAYER_ITERATIONS,
            });
        }
        debug!(
            "built {} layers from a {}-face seed in {iterations} iterations",
            layers.len(),
            self.seed.len()
        );
        Ok(layers)
    }
}

/// Collects the unvisited neighbours of `frontier`, marking them visited.
fn expand_frontier(
    mesh: &MeshGraph,
    frontier: &[FaceId],
    visited: &mut HashSet<FaceId>,
) -> Result<Vec<FaceId>> {
    let mut next = Vec::new();
    for &face in frontier {
        for nb in face_neighbors(mesh, face)? {
            if visited.insert(nb) {
                next.push(nb);
            }
        }
    }
    Ok(next)
}

fn push_layer<S: DiagnosticSink + ?Sized>(
    layers: &mut Vec<Layer>,
    faces: Vec<FaceId>,
    origin: LayerOrigin,
    depth: usize,
    sink: &mut S,
) {
    sink.record(TraversalEvent::LayerAppended {
        index: layers.len(),
        origin,
        faces: faces.clone(),
    });
    layers.push(Layer {
        faces,
        origin,
        depth,
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingSink;
    use crate::operations::creation::{MakeGrid, MakePolygon, MakeTube};

    fn sorted(mut faces: Vec<FaceId>) -> Vec<FaceId> {
        faces.sort();
        faces
    }

    #[test]
    fn edge_column_layers_into_columns() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(4, 4).execute(&mut mesh).unwrap();
        let seed = [f[0], f[4], f[8], f[12]];
        let layers = BuildLayers::new(&seed).execute(&mesh).unwrap();
        assert_eq!(layers.len(), 4);
        for (col, layer) in layers.iter().enumerate() {
            let expected: Vec<FaceId> = (0..4).map(|row| f[row * 4 + col]).collect();
            assert_eq!(sorted(layer.faces.clone()), sorted(expected));
        }
        assert_eq!(layers[0].origin, LayerOrigin::Seed);
        assert_eq!(layers[3].depth, 3);
    }

    #[test]
    fn middle_column_splits_into_both_sides() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(5, 2).execute(&mut mesh).unwrap();
        let seed = [f[2], f[7]];
        let layers = BuildLayers::new(&seed).execute(&mesh).unwrap();
        let faces: Vec<Vec<FaceId>> = layers.iter().map(|l| sorted(l.faces.clone())).collect();
        assert_eq!(
            faces,
            vec![
                sorted(vec![f[2], f[7]]),
                sorted(vec![f[3], f[8]]),
                sorted(vec![f[1], f[6]]),
                sorted(vec![f[4], f[9]]),
                sorted(vec![f[0], f[5]]),
            ]
        );
        // "above" claims both sides in the first iteration
        assert!(layers[1..]
            .iter()
            .all(|l| l.origin == LayerOrigin::Above));
    }

    #[test]
    fn layers_partition_reachable_faces() {
        let mut mesh = MeshGraph::new();
        let f = MakeTube::new(6, 5).execute(&mut mesh).unwrap();
        let seed = [f[12], f[13], f[14], f[15], f[16], f[17]];
        let layers = BuildLayers::new(&seed).execute(&mesh).unwrap();

        let mut all: Vec<FaceId> = layers.iter().flat_map(|l| l.faces.clone()).collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
        assert_eq!(total, 30);
        // ring 2 seeds; rings 1, 3 then 0, 4
        assert_eq!(layers.len(), 5);
    }

    #[test]
    fn duplicate_seed_faces_collapse() {
        let mut mesh = MeshGraph::new();
        let f = MakeTube::new(4, 1).execute(&mut mesh).unwrap();
        let seed = [f[0], f[1], f[2], f[3], f[0]];
        let layers = BuildLayers::new(&seed).execute(&mesh).unwrap();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].faces, vec![f[0], f[1], f[2], f[3]]);
    }

    #[test]
    fn disconnected_island_is_untouched() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(2, 1).execute(&mut mesh).unwrap();
        let island = MakePolygon::new(3).execute(&mut mesh).unwrap();
        let layers = BuildLayers::new(&[f[0]]).execute(&mesh).unwrap();
        assert_eq!(layers.len(), 2);
        assert!(layers.iter().all(|l| !l.faces.contains(&island)));
    }

    #[test]
    fn empty_seed_has_no_layers() {
        let mesh = MeshGraph::new();
        assert!(BuildLayers::new(&[]).execute(&mesh).unwrap().is_empty());
    }

    #[test]
    fn reports_exhaustion() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(3, 1).execute(&mut mesh).unwrap();
        let mut sink = RecordingSink::new();
        BuildLayers::new(&[f[0]])
            .execute_with(&mesh, &mut sink)
            .unwrap();
        assert!(sink
            .events
            .contains(&TraversalEvent::BfsExhausted { iterations: 3 }));
        assert_eq!(
            sink.count(|e| matches!(e, TraversalEvent::LayerAppended { .. })),
            3
        );
    }

    #[test]
    fn long_strip_hits_iteration_limit() {
        let mut mesh = MeshGraph::new();
        let f = MakeGrid::new(1100, 1).execute(&mut mesh).unwrap();
        let mut sink = RecordingSink::new();
        let layers = BuildLayers::new(&[f[0]])
            .execute_with(&mesh, &mut sink)
            .unwrap();

        // seed plus one face per iteration; the rest of the strip is left out
        assert_eq!(layers.len(), MAX_LAYER_ITERATIONS + 1);
        assert_eq!(layers[MAX_LAYER_ITERATIONS].faces, vec![f[MAX_LAYER_ITERATIONS]]);
        assert_eq!(layers[MAX_LAYER_ITERATIONS].depth, MAX_LAYER_ITERATIONS);
        assert_eq!(
            sink.count(|e| matches!(e, TraversalEvent::BfsIterationLimit { .. })),
            1
        );
        assert_eq!(
            sink.count(|e| matches!(e, TraversalEvent::BfsExhausted { .. })),
            0
        );
    }
}
