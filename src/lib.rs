pub mod diagnostics;
pub mod error;
pub mod math;
pub mod operations;
pub mod topology;

pub use error::{FaceLoopError, Result};
