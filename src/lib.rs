//! Undirected graphs of comparable vertex labels, such as social networks.
//!
//! The central type is [`Graph`], a simple undirected graph that validates
//! every operation and reports mistakes as [`GraphError`] values instead of
//! corrupting its state. On top of it sit breadth-first [distances and
//! paths](algo::shortest_paths) and the [diameter](algo::diameter), a
//! [loader](io) for adjacency list files and an interactive
//! [console](console).
//!
//! ```
//! use sociograph::Graph;
//!
//! let mut graph = Graph::new();
//!
//! graph.add_vertex_set(["Alice", "Bob", "Carol", "Dave"]).unwrap();
//! graph.add_edge_set(&"Bob", ["Alice", "Carol"]).unwrap();
//!
//! assert_eq!(graph.distance(&"Alice", &"Carol"), Ok(Some(2)));
//! assert_eq!(graph.distance(&"Alice", &"Dave"), Ok(None));
//! assert_eq!(graph.diameter(), 2);
//! ```

pub mod algo;
pub mod common;
pub mod console;
pub mod core;
pub mod graph;
pub mod infra;
pub mod io;
pub mod storage;

pub use crate::core::GraphError;
pub use graph::Graph;

pub mod prelude {
    pub use crate::algo::{Diameter, ShortestPaths};
    pub use crate::core::{EdgeSet, GraphBase, GraphError, Neighbors, VertexSet};
    pub use crate::graph::Graph;
    pub use crate::storage::AdjMap;
}
