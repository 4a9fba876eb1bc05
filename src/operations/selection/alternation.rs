use crate::diagnostics::{DiagnosticSink, NullSink, TraversalEvent};
use crate::error::Result;
use crate::operations::traversal::Layer;
use crate::topology::MeshGraph;

/// Layer indices selected by alternation: `offset`, `offset + skip + 1`,
/// `offset + 2 * (skip + 1)`, ... below `total`.
#[must_use]
pub fn selected_indices(total: usize, skip: usize, offset: usize) -> Vec<usize> {
    (offset..total).step_by(skip.saturating_add(1)).collect()
}

/// Rewrites selection flags so only every `skip + 1`-th layer is selected.
///
/// Every face of a selected layer becomes selected, every face of any other
/// layer becomes deselected. Faces outside the layers are left alone.
pub struct Alternation {
    skip: usize,
    offset: usize,
}

impl Alternation {
    /// Creates a new `Alternation` with the given skip count and offset.
    #[must_use]
    pub fn new(skip: usize, offset: usize) -> Self {
        Self { skip, offset }
    }

    /// Applies the alternation to `mesh`, returning the selected indices.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer face is not in the mesh.
    pub fn apply(&self, mesh: &mut MeshGraph, layers: &[Layer]) -> Result<Vec<usize>> {
        self.apply_with(mesh, layers, &mut NullSink)
    }

    /// Applies the alternation, reporting the chosen indices to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if a layer face is not in the mesh.
    pub fn apply_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &mut MeshGraph,
        layers: &[Layer],
        sink: &mut S,
    ) -> Result<Vec<usize>> {
        let indices = selected_indices(layers.len(), self.skip, self.offset);
        sink.record(TraversalEvent::AlternationPlanned {
            total: layers.len(),
            skip: self.skip,
            offset: self.offset,
            indices: indices.clone(),
        });

        for (idx, layer) in layers.iter().enumerate() {
            let select = indices.binary_search(&idx).is_ok();
            for &face in &layer.faces {
                mesh.set_selected(face, select)?;
            }
        }
        Ok(indices)
    }
}
