use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{FaceId, MeshGraph, VertexData, VertexId};

/// Creates a flat grid of quads in the XY plane.
///
/// Faces are returned row-major (`row * cols + col`). Every quad lists its
/// boundary as bottom, right, top, left, so edge offsets 0/2 run along a
/// column and offsets 1/3 along a row.
pub struct MakeGrid {
    cols: usize,
    rows: usize,
    spacing: f64,
    origin: Point3,
}

impl MakeGrid {
    /// Creates a new `MakeGrid` operation with unit spacing at the origin.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            spacing: 1.0,
            origin: Point3::origin(),
        }
    }

    /// Sets the distance between adjacent grid lines.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the position of the grid's lower-left corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Point3) -> Self {
        self.origin = origin;
        self
    }

    /// Executes the operation, adding the grid to `mesh`.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the spacing is not
    /// positive.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, mesh: &mut MeshGraph) -> Result<Vec<FaceId>> {
        if self.cols == 0 || self.rows == 0 {
            return Err(OperationError::InvalidInput(format!(
                "grid needs at least one row and column, got {}x{}",
                self.cols, self.rows
            ))
            .into());
        }
        if self.spacing <= 0.0 {
            return Err(
                OperationError::InvalidInput("grid spacing must be positive".into()).into(),
            );
        }

        let stride = self.cols + 1;
        let mut verts: Vec<VertexId> = Vec::with_capacity(stride * (self.rows + 1));
        for j in 0..=self.rows {
            for i in 0..=self.cols {
                let point = Point3::new(
                    self.origin.x + i as f64 * self.spacing,
                    self.origin.y + j as f64 * self.spacing,
                    self.origin.z,
                );
                verts.push(mesh.add_vertex(VertexData::new(point)));
            }
        }

        let mut faces = Vec::with_capacity(self.cols * self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let v00 = verts[r * stride + c];
                let v10 = verts[r * stride + c + 1];
                let v11 = verts[(r + 1) * stride + c + 1];
                let v01 = verts[(r + 1) * stride + c];
                faces.push(mesh.add_face(&[v00, v10, v11, v01])?);
            }
        }
        Ok(faces)
    }
}
