//! Property-based tests for loop tracing, layering and alternation.
//!
//! Run with: cargo test --test proptest_topology

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use faceloop::math::Point3;
use faceloop::operations::creation::{MakeGrid, MakeTube};
use faceloop::operations::query::ExtractComponents;
use faceloop::operations::selection::selected_indices;
use faceloop::operations::traversal::{BuildLayers, TraceLoop, MAX_TRACE_STEPS};
use faceloop::topology::{FaceId, MeshGraph, VertexData, VertexId};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// A grid together with a random subset mask over its faces.
fn arb_grid_subset() -> impl Strategy<Value = (usize, usize, Vec<bool>)> {
    (1usize..7, 1usize..7).prop_flat_map(|(cols, rows)| {
        prop::collection::vec(any::<bool>(), cols * rows).prop_map(move |mask| (cols, rows, mask))
    })
}

/// Random quads and triangles over a small vertex pool, so edges are
/// frequently shared by three or more faces and adjacency branches.
fn arb_face_soup() -> impl Strategy<Value = (u32, Vec<Vec<u32>>)> {
    (4u32..10).prop_flat_map(|n| {
        let face = prop_oneof![
            prop::collection::vec(0..n, 3),
            prop::collection::vec(0..n, 4),
        ];
        prop::collection::vec(face, 1..30).prop_map(move |faces| (n, faces))
    })
}

fn build_soup(n: u32, corners: &[Vec<u32>]) -> (MeshGraph, Vec<FaceId>) {
    let mut mesh = MeshGraph::new();
    let verts: Vec<VertexId> = (0..n)
        .map(|i| mesh.add_vertex(VertexData::new(Point3::new(f64::from(i), 0.0, 0.0))))
        .collect();
    let faces = corners
        .iter()
        .filter_map(|c| {
            let ids: Vec<VertexId> = c.iter().map(|&i| verts[i as usize]).collect();
            mesh.add_face(&ids).ok()
        })
        .collect();
    (mesh, faces)
}

fn assert_well_formed_trace(trace: &[FaceId]) {
    assert!(!trace.is_empty());
    assert!(trace.len() <= MAX_TRACE_STEPS + 1);
    let body = if trace.len() > 1 && trace.first() == trace.last() {
        &trace[..trace.len() - 1]
    } else {
        trace
    };
    let unique: HashSet<FaceId> = body.iter().copied().collect();
    assert_eq!(unique.len(), body.len(), "face repeated in {trace:?}");
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_components_partition_input((cols, rows, mask) in arb_grid_subset()) {
        let mut mesh = MeshGraph::new();
        let faces = MakeGrid::new(cols, rows).execute(&mut mesh).unwrap();
        let candidates: Vec<FaceId> = faces
            .iter()
            .zip(&mask)
            .filter(|(_, keep)| **keep)
            .map(|(&f, _)| f)
            .collect();

        let comps = ExtractComponents::new(&candidates).execute(&mesh).unwrap();

        let mut seen = HashSet::new();
        for comp in &comps {
            prop_assert!(!comp.is_empty());
            for f in comp {
                prop_assert!(seen.insert(*f), "face in two components");
            }
        }
        let expected: HashSet<FaceId> = candidates.iter().copied().collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn proptest_trace_is_bounded_on_soups((n, corners) in arb_face_soup()) {
        let (mesh, faces) = build_soup(n, &corners);
        for &face in &faces {
            for &edge in mesh.edges_of(face).unwrap() {
                let trace = TraceLoop::new(face).with_entry_edge(edge).execute(&mesh).unwrap();
                assert_well_formed_trace(&trace);
                prop_assert_eq!(trace[0], face);
            }
        }
    }

    #[test]
    fn proptest_trace_is_bounded_on_tubes(segments in 3usize..400, rings in 1usize..3) {
        let mut mesh = MeshGraph::new();
        let faces = MakeTube::new(segments, rings).execute(&mut mesh).unwrap();
        let side = mesh.edges_of(faces[0]).unwrap()[3];
        let trace = TraceLoop::new(faces[0]).with_entry_edge(side).execute(&mesh).unwrap();
        assert_well_formed_trace(&trace);
        let expected = if segments <= MAX_TRACE_STEPS { segments + 1 } else { MAX_TRACE_STEPS + 1 };
        prop_assert_eq!(trace.len(), expected);
    }

    #[test]
    fn proptest_layers_are_disjoint((n, corners) in arb_face_soup(), pick in any::<prop::sample::Index>()) {
        let (mesh, faces) = build_soup(n, &corners);
        prop_assume!(!faces.is_empty());
        let start = faces[pick.index(faces.len())];
        let seed = TraceLoop::new(start).execute(&mesh).unwrap();
        let layers = BuildLayers::new(&seed).execute(&mesh).unwrap();

        let mut seen = HashSet::new();
        for layer in &layers {
            for f in &layer.faces {
                prop_assert!(seen.insert(*f), "face in two layers");
            }
        }
        prop_assert!(seen.contains(&start));
    }

    #[test]
    fn proptest_alternation_is_pure(total in 0usize..200, skip in 1usize..=100, offset in 0usize..50) {
        let first = selected_indices(total, skip, offset);
        let second = selected_indices(total, skip, offset);
        prop_assert_eq!(&first, &second);
        for &idx in &first {
            prop_assert!(idx < total);
            prop_assert!(idx >= offset);
            prop_assert_eq!((idx - offset) % (skip + 1), 0);
        }
        let expected = if offset >= total { 0 } else { (total - offset).div_ceil(skip + 1) };
        prop_assert_eq!(first.len(), expected);
    }
}
