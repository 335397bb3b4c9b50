use std::fmt;

use thiserror::Error;

use crate::algo::shortest_paths;

/// Recoverable failure of a graph operation.
///
/// Every operation that returns this error leaves the graph exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V> {
    #[error("vertex {0} does not exist")]
    UnknownVertex(V),

    #[error("vertex {0} already exists")]
    DuplicateVertex(V),

    #[error("edge {0} - {1} already exists")]
    DuplicateEdge(V, V),

    #[error("edge {0} - {1} does not exist")]
    UnknownEdge(V, V),

    #[error("vertex {0} cannot be connected to itself")]
    SelfLoop(V),

    #[error("invalid argument: {0}")]
    InvalidArgument(InvalidArgumentKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidArgumentKind {
    LengthMismatch { vertices: usize, adjacency: usize },
    AsymmetricAdjacency,
}

impl fmt::Display for InvalidArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidArgumentKind::LengthMismatch {
                vertices,
                adjacency,
            } => write!(
                f,
                "got {vertices} vertices but {adjacency} adjacency sets"
            ),
            InvalidArgumentKind::AsymmetricAdjacency => {
                f.write_str("adjacency sets are not symmetric")
            }
        }
    }
}

impl<V> From<shortest_paths::Error<V>> for GraphError<V> {
    fn from(error: shortest_paths::Error<V>) -> Self {
        match error {
            shortest_paths::Error::SourceAbsent(vertex)
            | shortest_paths::Error::GoalAbsent(vertex) => GraphError::UnknownVertex(vertex),
        }
    }
}
