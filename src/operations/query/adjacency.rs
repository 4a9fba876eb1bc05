use std::collections::HashSet;

use crate::error::TopologyError;
use crate::topology::{FaceId, MeshGraph};

/// Faces sharing an edge with `face`, in boundary order, without repeats.
///
/// # Errors
///
/// Returns an error if `face` or one of its edges is not in the mesh.
pub fn face_neighbors(mesh: &MeshGraph, face: FaceId) -> Result<Vec<FaceId>, TopologyError> {
    let mut seen = HashSet::new();
    let mut neighbors = Vec::new();
    for &edge in mesh.edges_of(face)? {
        for &nb in mesh.faces_of(edge)? {
            if nb != face && seen.insert(nb) {
                neighbors.push(nb);
            }
        }
    }
    Ok(neighbors)
}

/// Counts edge links from `face` into `set`.
///
/// A neighbour is counted once per shared edge, so two faces sharing two
/// edges contribute two.
///
/// # Errors
///
/// Returns an error if `face` or one of its edges is not in the mesh.
pub fn neighbors_in_set(
    mesh: &MeshGraph,
    face: FaceId,
    set: &HashSet<FaceId>,
) -> Result<usize, TopologyError> {
    let mut count = 0;
    for &edge in mesh.edges_of(face)? {
        count += mesh
            .faces_of(edge)?
            .iter()
            .filter(|&&nb| nb != face && set.contains(&nb))
            .count();
    }
    Ok(count)
}
