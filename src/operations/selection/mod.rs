mod alternate;
mod alternation;
mod params;

pub use alternate::{AlternateFaceLoops, AlternateReport, Outcome, PassReport, StopReason};
pub use alternation::{selected_indices, Alternation};
pub use params::AlternateParams;
