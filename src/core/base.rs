use std::hash::Hash;

/// Base trait for all graph-like types.
///
/// Vertices are identified by their labels, which need to be totally ordered
/// (the vertex set is kept sorted) and hashable (algorithms key their
/// auxiliary maps by vertex).
pub trait GraphBase {
    type Vertex: Ord + Hash + Clone;
}

pub trait VertexSet: GraphBase {
    type VerticesIter<'a>: Iterator<Item = &'a Self::Vertex>
    where
        Self: 'a;

    /// Iterates over all vertices in ascending order.
    fn vertices(&self) -> Self::VerticesIter<'_>;

    fn vertex_count(&self) -> usize;

    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool {
        self.vertices().any(|v| v == vertex)
    }
}

pub trait EdgeSet: GraphBase {
    fn edge_count(&self) -> usize;

    /// Returns `true` if `dst` is recorded as a neighbor of `src`.
    ///
    /// Only the adjacency of `src` is consulted. Symmetry is a property of the
    /// implementation, not something this method verifies.
    fn contains_edge(&self, src: &Self::Vertex, dst: &Self::Vertex) -> bool;
}

pub trait Neighbors: GraphBase {
    type NeighborsIter<'a>: Iterator<Item = &'a Self::Vertex>
    where
        Self: 'a;

    /// Iterates over the neighbors of `src` in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `src` is not a vertex of the graph.
    fn neighbors(&self, src: &Self::Vertex) -> Self::NeighborsIter<'_>;

    /// # Panics
    ///
    /// Panics if `src` is not a vertex of the graph.
    fn degree(&self, src: &Self::Vertex) -> usize {
        self.neighbors(src).count()
    }
}
