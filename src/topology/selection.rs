use crate::error::{CommitError, SelectionError, TopologyError};

use super::{FaceId, MeshGraph};

/// Element type the host currently selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    Vertex,
    Edge,
    #[default]
    Face,
}

impl MeshGraph {
    /// Returns the current selection flag of `face`, including writes not
    /// yet committed.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the mesh.
    pub fn is_selected(&self, face: FaceId) -> Result<bool, TopologyError> {
        let committed = self.face(face)?.selected;
        Ok(self.pending.get(face).copied().unwrap_or(committed))
    }

    /// Records a selection write for `face`. The write is visible to
    /// [`MeshGraph::is_selected`] immediately and reaches the committed
    /// state on the next [`MeshGraph::commit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the mesh.
    pub fn set_selected(&mut self, face: FaceId, selected: bool) -> Result<(), TopologyError> {
        let committed = self.face(face)?.selected;
        if committed == selected {
            self.pending.remove(face);
        } else {
            self.pending.insert(face, selected);
        }
        Ok(())
    }

    /// Selected faces, in mesh face order.
    #[must_use]
    pub fn selected_faces(&self) -> Vec<FaceId> {
        self.faces
            .iter()
            .filter(|(id, data)| self.pending.get(*id).copied().unwrap_or(data.selected))
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of selected faces.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.faces
            .iter()
            .filter(|(id, data)| self.pending.get(*id).copied().unwrap_or(data.selected))
            .count()
    }

    /// Number of selection writes waiting for [`MeshGraph::commit`].
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Flushes pending selection writes into the committed state and
    /// returns how many faces changed.
    ///
    /// # Errors
    ///
    /// Returns [`CommitError::NotEditable`] when the mesh is not in edit
    /// mode. Pending writes are left in place.
    pub fn commit(&mut self) -> Result<usize, CommitError> {
        if !self.edit_mode {
            return Err(CommitError::NotEditable {
                pending: self.pending.len(),
            });
        }
        let mut flushed = 0;
        for (face, selected) in self.pending.drain() {
            if let Some(data) = self.faces.get_mut(face) {
                data.selected = selected;
                flushed += 1;
            }
        }
        Ok(flushed)
    }

    /// Drops all pending selection writes.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }

    /// Returns the element type the host is selecting.
    #[must_use]
    pub fn select_mode(&self) -> SelectMode {
        self.select_mode
    }

    /// Sets the element type the host is selecting.
    pub fn set_select_mode(&mut self, mode: SelectMode) {
        self.select_mode = mode;
    }

    /// Returns `true` while the host accepts selection writes.
    #[must_use]
    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Enters or leaves edit mode.
    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.edit_mode = edit_mode;
    }

    /// The host's active face, if it is still part of the mesh.
    #[must_use]
    pub fn active_face(&self) -> Option<FaceId> {
        self.active_face.filter(|&f| self.faces.contains_key(f))
    }

    /// Sets or clears the host's active face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found in the mesh.
    pub fn set_active_face(&mut self, face: Option<FaceId>) -> Result<(), TopologyError> {
        if let Some(f) = face {
            self.face(f)?;
        }
        self.active_face = face;
        Ok(())
    }

    /// Checks that the host is in edit mode with face selection active.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::Precondition`] otherwise.
    pub fn ensure_face_edit_mode(&self) -> Result<(), SelectionError> {
        if !self.edit_mode {
            return Err(SelectionError::Precondition(
                "mesh is not in edit mode".into(),
            ));
        }
        if self.select_mode != SelectMode::Face {
            return Err(SelectionError::Precondition(format!(
                "face select mode required, current mode is {:?}",
                self.select_mode
            )));
        }
        Ok(())
    }
}
