use super::edge::EdgeId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the mesh graph.
    pub struct FaceId;
}

/// Data associated with a polygon face.
///
/// `vertices` and `edges` run in the same cyclic order: `edges[i]` joins
/// `vertices[i]` and `vertices[(i + 1) % n]`.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Corner vertices in boundary order.
    pub vertices: Vec<VertexId>,
    /// Boundary edges in boundary order.
    pub edges: Vec<EdgeId>,
    /// Committed host selection flag.
    pub selected: bool,
}

impl FaceData {
    /// Number of sides of the polygon.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the face has no boundary edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns `true` for four-sided faces.
    #[must_use]
    pub fn is_quad(&self) -> bool {
        self.edges.len() == 4
    }

    /// Position of `edge` in the boundary cycle, if present.
    #[must_use]
    pub fn edge_index(&self, edge: EdgeId) -> Option<usize> {
        self.edges.iter().position(|&e| e == edge)
    }
}
