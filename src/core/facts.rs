//! Collection of simple utilities for various properties and calculations.

/// Returns the number of edges in an undirected [complete graph] on the given
/// number of vertices, which is the upper bound on the edge count of any
/// simple undirected graph.
///
/// [complete graph]: https://en.wikipedia.org/wiki/Complete_graph
///
/// # Examples
///
/// ```
/// use sociograph::core::facts::complete_graph_edge_count;
///
/// assert_eq!(complete_graph_edge_count(5), 10);
/// assert_eq!(complete_graph_edge_count(0), 0);
/// ```
pub fn complete_graph_edge_count(vertex_count: usize) -> usize {
    vertex_count * vertex_count.saturating_sub(1) / 2
}
