pub mod core;
pub mod graph;
