use std::f64::consts::TAU;

use crate::error::{OperationError, Result};
use crate::math::{Point3, Vector3};
use crate::topology::{FaceId, MeshGraph, VertexData, VertexId};

/// Creates a single regular polygon face centered at a point in the XY plane.
pub struct MakePolygon {
    sides: usize,
    center: Point3,
    radius: f64,
}

impl MakePolygon {
    /// Creates a new `MakePolygon` operation with unit radius at the origin.
    #[must_use]
    pub fn new(sides: usize) -> Self {
        Self {
            sides,
            center: Point3::origin(),
            radius: 1.0,
        }
    }

    /// Sets the polygon center.
    #[must_use]
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    /// Sets the circumradius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Executes the operation, adding the polygon to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 3 sides or the radius is
    /// not positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut MeshGraph) -> Result<FaceId> {
        if self.sides < 3 {
            return Err(OperationError::InvalidInput(format!(
                "polygon needs at least 3 sides, got {}",
                self.sides
            ))
            .into());
        }
        if self.radius <= 0.0 {
            return Err(
                OperationError::InvalidInput("polygon radius must be positive".into()).into(),
            );
        }
        let corners: Vec<VertexId> = (0..self.sides)
            .map(|i| {
                let angle = TAU * i as f64 / self.sides as f64;
                let offset = Vector3::new(angle.cos(), angle.sin(), 0.0) * self.radius;
                mesh.add_vertex(VertexData::new(self.center + offset))
            })
            .collect();
        Ok(mesh.add_face(&corners)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_all_boundary() {
        let mut mesh = MeshGraph::new();
        let f = MakePolygon::new(3).execute(&mut mesh).unwrap();
        let edges = mesh.edges_of(f).unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|&e| mesh.edge(e).unwrap().is_boundary()));
    }

    #[test]
    fn degenerate_polygon_rejected() {
        let mut mesh = MeshGraph::new();
        assert!(MakePolygon::new(2).execute(&mut mesh).is_err());
        assert!(MakePolygon::new(5).with_radius(-1.0).execute(&mut mesh).is_err());
    }
}
