use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};
use crate::topology::{FaceId, MeshGraph, VertexData, VertexId};

/// Creates an open-ended cylindrical tube of quads around the Z axis.
///
/// The tube has `segments` quads around its circumference and `rings`
/// quads along its height, so every ring of faces is a closed face loop.
/// Faces are returned ring-major (`ring * segments + segment`); each quad
/// lists its boundary as bottom, side, top, side.
pub struct MakeTube {
    segments: usize,
    rings: usize,
    radius: f64,
    height: f64,
}

impl MakeTube {
    /// Creates a new `MakeTube` operation with unit radius and height.
    #[must_use]
    pub fn new(segments: usize, rings: usize) -> Self {
        Self {
            segments,
            rings,
            radius: 1.0,
            height: 1.0,
        }
    }

    /// Sets the tube radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the total tube height.
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    /// Executes the operation, adding the tube to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 3 segments, no rings, or a
    /// non-positive radius or height.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut MeshGraph) -> Result<Vec<FaceId>> {
        if self.segments < 3 {
            return Err(OperationError::InvalidInput(format!(
                "tube needs at least 3 segments, got {}",
                self.segments
            ))
            .into());
        }
        if self.rings == 0 {
            return Err(OperationError::InvalidInput("tube needs at least one ring".into()).into());
        }
        if self.radius <= 0.0 || self.height <= 0.0 {
            return Err(OperationError::InvalidInput(
                "tube radius and height must be positive".into(),
            )
            .into());
        }

        let dz = self.height / self.rings as f64;
        let mut verts: Vec<VertexId> = Vec::with_capacity(self.segments * (self.rings + 1));
        for r in 0..=self.rings {
            for s in 0..self.segments {
                let angle = TAU * s as f64 / self.segments as f64;
                let offset = Vector3::new(angle.cos(), angle.sin(), 0.0) * self.radius;
                let point = Point3::new(0.0, 0.0, r as f64 * dz) + offset;
                verts.push(mesh.add_vertex(VertexData::new(point)));
            }
        }

        let n = self.segments;
        let mut faces = Vec::with_capacity(n * self.rings);
        for r in 0..self.rings {
            for s in 0..n {
                let next = (s + 1) % n;
                faces.push(mesh.add_face(&[
                    verts[r * n + s],
                    verts[r * n + next],
                    verts[(r + 1) * n + next],
                    verts[(r + 1) * n + s],
                ])?);
            }
        }
        Ok(faces)
    }
}
