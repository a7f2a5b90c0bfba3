//! Dependency graph value type and the algorithms that operate over it.

pub mod algorithms;
pub mod builder;

pub use algorithms::*;
pub use builder::{DependencyGraph, EdgeType, GraphEdge};
