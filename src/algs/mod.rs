//! Mesh algorithms: hexahedron decomposition and face adjacency.

pub mod adjacency;
pub mod decompose;
