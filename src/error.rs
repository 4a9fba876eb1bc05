use thiserror::Error;

/// Top-level error type for face-loop selection.
#[derive(Debug, Error)]
pub enum FaceLoopError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to mesh topology lookups and construction.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors that cancel a selection run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("No faces selected")]
    EmptySelection,

    #[error("No face loops found for the selection")]
    NoLoopsFound,

    #[error("precondition failed: {0}")]
    Precondition(String),
}

/// Errors raised by the host when flushing selection flags.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("mesh is not in an editable mode ({pending} pending writes rejected)")]
    NotEditable { pending: usize },
}

/// Errors related to invocation parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Errors related to mesh construction operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`FaceLoopError`].
pub type Result<T> = std::result::Result<T, FaceLoopError>;
