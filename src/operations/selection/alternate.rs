use tracing::{debug, info};

use crate::diagnostics::{DiagnosticSink, NullSink, TracingSink, TraversalEvent};
use crate::error::{FaceLoopError, Result, SelectionError};
use crate::operations::traversal::{BuildLayers, DeriveInitialLoop};
use crate::topology::MeshGraph;

use super::alternation::Alternation;
use super::params::AlternateParams;

/// Why the driver stopped running passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The selected-face count did not change over the last pass.
    Converged { passes: usize },
    /// All `repeat` passes ran.
    RepeatExhausted,
}

/// Summary of one committed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// 1-based pass number.
    pub pass: usize,
    /// Selected faces when the pass started.
    pub selected_before: usize,
    /// Number of faces in the derived initial loop.
    pub initial_loop_len: usize,
    /// Number of layers built around the initial loop.
    pub layer_count: usize,
    /// Layer indices that were selected.
    pub selected_layers: Vec<usize>,
    /// Selected faces after the pass committed.
    pub selected_after: usize,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateReport {
    /// Committed passes, in order.
    pub passes: Vec<PassReport>,
    /// Why the run ended.
    pub stop: StopReason,
}

impl AlternateReport {
    /// Selected faces after the last committed pass.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.passes.last().map_or(0, |p| p.selected_after)
    }
}

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// At least one pass ran and its flags were committed.
    Finished(AlternateReport),
    /// Nothing usable to work from.
    Cancelled { reason: String },
}

/// Selects every Nth parallel face loop, starting from the current selection.
///
/// Each pass derives an initial loop from the selected faces, layers the
/// mesh outward from it, keeps every `skip + 1`-th layer selected and
/// commits. Passes repeat up to `repeat` times and stop early once a pass
/// leaves the selected-face count unchanged.
pub struct AlternateFaceLoops {
    params: AlternateParams,
}

impl AlternateFaceLoops {
    /// Creates a new `AlternateFaceLoops` operation with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: AlternateParams::default(),
        }
    }

    /// Sets the invocation parameters.
    #[must_use]
    pub fn with_params(mut self, params: AlternateParams) -> Self {
        self.params = params;
        self
    }

    /// Runs the operation as a host command: checks that the mesh is in
    /// face edit mode, then maps an empty selection or an empty layering to
    /// [`Outcome::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, a failed precondition,
    /// inconsistent topology or a rejected commit.
    pub fn invoke(&self, mesh: &mut MeshGraph) -> Result<Outcome> {
        mesh.ensure_face_edit_mode()?;
        match self.execute(mesh) {
            Ok(report) => Ok(Outcome::Finished(report)),
            Err(FaceLoopError::Selection(
                err @ (SelectionError::EmptySelection | SelectionError::NoLoopsFound),
            )) => {
                info!("alternate face loops cancelled: {err}");
                Ok(Outcome::Cancelled {
                    reason: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Executes the passes, sending diagnostics to `tracing` when
    /// `debug_mode` is set.
    ///
    /// # Errors
    ///
    /// See [`AlternateFaceLoops::execute_with`].
    pub fn execute(&self, mesh: &mut MeshGraph) -> Result<AlternateReport> {
        self.execute_with(mesh, &mut TracingSink)
    }

    /// Executes the passes, sending diagnostics to `sink` when `debug_mode`
    /// is set. With `debug_mode` off the sink receives nothing.
    ///
    /// A pass that fails leaves no pending writes behind; passes committed
    /// before it stay committed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::EmptySelection`] if a pass starts with no
    /// selected faces, [`SelectionError::NoLoopsFound`] if layering yields
    /// nothing, a [`crate::error::CommitError`] if the mesh rejects the
    /// flags, or a parameter or topology error.
    pub fn execute_with<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &mut MeshGraph,
        sink: &mut S,
    ) -> Result<AlternateReport> {
        self.params.validate()?;
        if self.params.debug_mode {
            self.run_passes(mesh, sink)
        } else {
            self.run_passes(mesh, &mut NullSink)
        }
    }

    fn run_passes<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &mut MeshGraph,
        sink: &mut S,
    ) -> Result<AlternateReport> {
        let mut passes = Vec::new();
        let mut previous: Option<usize> = None;
        let mut stop = StopReason::RepeatExhausted;

        for pass in 1..=self.params.repeat {
            let selected = mesh.selected_count();
            sink.record(TraversalEvent::PassStarted { pass, selected });
            if previous == Some(selected) {
                stop = StopReason::Converged { passes: pass - 1 };
                break;
            }
            previous = Some(selected);

            match self.run_pass(mesh, pass, selected, sink) {
                Ok(report) => {
                    sink.record(TraversalEvent::PassFinished {
                        pass,
                        selected: report.selected_after,
                    });
                    passes.push(report);
                }
                Err(err) => {
                    mesh.discard_pending();
                    return Err(err);
                }
            }
        }

        sink.record(TraversalEvent::Stopped { reason: stop });
        info!(
            "alternate face loops finished after {} passes ({stop:?}), {} faces selected",
            passes.len(),
            mesh.selected_count()
        );
        Ok(AlternateReport { passes, stop })
    }

    fn run_pass<S: DiagnosticSink + ?Sized>(
        &self,
        mesh: &mut MeshGraph,
        pass: usize,
        selected_before: usize,
        sink: &mut S,
    ) -> Result<PassReport> {
        if selected_before == 0 {
            return Err(SelectionError::EmptySelection.into());
        }

        let seed = DeriveInitialLoop::new().execute_with(mesh, sink)?;
        for &face in &seed.faces {
            mesh.set_selected(face, true)?;
        }

        let layers = BuildLayers::new(&seed.faces).execute_with(mesh, sink)?;
        if layers.is_empty() {
            return Err(SelectionError::NoLoopsFound.into());
        }

        let selected_layers = Alternation::new(self.params.skip, self.params.offset)
            .apply_with(mesh, &layers, sink)?;
        mesh.commit()?;

        let selected_after = mesh.selected_count();
        debug!(
            "pass {pass}: {:?} seed of {} faces, {} layers, selected {selected_before} -> {selected_after}",
            seed.strategy,
            seed.faces.len(),
            layers.len()
        );
        Ok(PassReport {
            pass,
            selected_before,
            initial_loop_len: seed.faces.len(),
            layer_count: layers.len(),
            selected_layers,
            selected_after,
        })
    }
}

impl Default for AlternateFaceLoops {
    fn default() -> Self {
        Self::new()
    }
}
