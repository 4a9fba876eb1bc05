mod initial_loop;
mod layers;
mod trace_loop;

pub use initial_loop::{DeriveInitialLoop, InitialLoop, SeedStrategy};
pub use layers::{BuildLayers, Layer, LayerOrigin, MAX_LAYER_ITERATIONS};
pub use trace_loop::{opposite_edge, TraceLoop, MAX_TRACE_STEPS};
