pub mod creation;
pub mod query;
pub mod selection;
pub mod traversal;
