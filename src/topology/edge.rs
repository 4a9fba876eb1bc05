use super::face::FaceId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the mesh graph.
    pub struct EdgeId;
}

/// Data associated with an undirected mesh edge.
///
/// An edge joins two vertices and records every face whose boundary
/// runs along it. Manifold interior edges link two faces, boundary edges
/// one, and non-manifold edges three or more.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// The two endpoint vertices, in the order the edge was first created.
    pub vertices: [VertexId; 2],
    /// Faces sharing this edge, in the order they were attached.
    pub link_faces: Vec<FaceId>,
}

impl EdgeData {
    /// Creates an edge between two vertices with no linked faces.
    #[must_use]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        Self {
            vertices: [a, b],
            link_faces: Vec::new(),
        }
    }

    /// Returns `true` if exactly one face uses this edge.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.link_faces.len() == 1
    }

    /// Returns the first linked face that is not `face`.
    #[must_use]
    pub fn other_face(&self, face: FaceId) -> Option<FaceId> {
        self.link_faces.iter().copied().find(|&f| f != face)
    }
}
