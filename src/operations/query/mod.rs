mod adjacency;
mod components;

pub use adjacency::{face_neighbors, neighbors_in_set};
pub use components::ExtractComponents;
