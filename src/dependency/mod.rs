//! Dependency graph construction and topological sequencing.

mod graph;

pub use graph::Graph;
