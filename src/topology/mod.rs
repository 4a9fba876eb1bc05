pub mod edge;
pub mod face;
pub mod selection;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use face::{FaceData, FaceId};
pub use selection::SelectMode;
pub use vertex::{VertexData, VertexId};

use std::collections::HashMap;

use crate::error::TopologyError;
use slotmap::{SecondaryMap, SlotMap};

/// Central arena that owns the faces, edges and vertices of a polygon mesh.
///
/// Entities reference each other via typed IDs (generational indices).
/// Face/edge incidence is fixed once a face is added; only the per-face
/// selection flags change afterwards.
#[derive(Debug)]
pub struct MeshGraph {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    faces: SlotMap<FaceId, FaceData>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    pending: SecondaryMap<FaceId, bool>,
    select_mode: SelectMode,
    edit_mode: bool,
    active_face: Option<FaceId>,
}

impl Default for MeshGraph {
    fn default() -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            edge_lookup: HashMap::new(),
            pending: SecondaryMap::new(),
            select_mode: SelectMode::Face,
            edit_mode: true,
            active_face: None,
        }
    }
}

impl MeshGraph {
    /// Creates an empty mesh in edit mode with face selection active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the mesh.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Number of vertices in the mesh.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // --- Edge operations ---

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the mesh.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Faces linked to `edge`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not found in the mesh.
    pub fn faces_of(&self, edge: EdgeId) -> Result<&[FaceId], TopologyError> {
        Ok(&self.edge(edge)?.link_faces)
    }

    /// Looks up the undirected edge joining two vertices.
    #[must_use]
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    /// Number of edges in the mesh.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Face operations ---

    /// Adds a polygon face through the given corner vertices.
    ///
    /// Edges are shared with existing faces wherever the same vertex pair
    /// was already used, in either direction. Sharing an edge between more
    /// than two faces is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than three corners are given, if two
    /// consecutive corners coincide, or if a vertex is not in the mesh.
    pub fn add_face(&mut self, corners: &[VertexId]) -> Result<FaceId, TopologyError> {
        if corners.len() < 3 {
            return Err(TopologyError::InvalidTopology(format!(
                "face needs at least 3 vertices, got {}",
                corners.len()
            )));
        }
        for &v in corners {
            self.vertex(v)?;
        }
        let n = corners.len();
        for i in 0..n {
            if corners[i] == corners[(i + 1) % n] {
                return Err(TopologyError::InvalidTopology(
                    "face has repeated consecutive vertices".into(),
                ));
            }
        }

        let edges: Vec<EdgeId> = (0..n)
            .map(|i| self.ensure_edge(corners[i], corners[(i + 1) % n]))
            .collect();

        let face = self.faces.insert(FaceData {
            vertices: corners.to_vec(),
            edges: edges.clone(),
            selected: false,
        });
        for edge in edges {
            if let Some(data) = self.edges.get_mut(edge) {
                if !data.link_faces.contains(&face) {
                    data.link_faces.push(face);
                }
            }
        }
        Ok(face)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the mesh.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Boundary edges of `face` in cyclic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the mesh.
    pub fn edges_of(&self, face: FaceId) -> Result<&[EdgeId], TopologyError> {
        Ok(&self.face(face)?.edges)
    }

    /// Corner vertices of `face` in cyclic order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the mesh.
    pub fn vertices_of(&self, face: FaceId) -> Result<&[VertexId], TopologyError> {
        Ok(&self.face(face)?.vertices)
    }

    /// All faces, in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// Returns `true` if `face` belongs to this mesh.
    #[must_use]
    pub fn contains_face(&self, face: FaceId) -> bool {
        self.faces.contains_key(face)
    }

    /// Number of faces in the mesh.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn ensure_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let key = edge_key(a, b);
        if let Some(&edge) = self.edge_lookup.get(&key) {
            return edge;
        }
        let edge = self.edges.insert(EdgeData::new(a, b));
        self.edge_lookup.insert(key, edge);
        edge
    }
}

fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
