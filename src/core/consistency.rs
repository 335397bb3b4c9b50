//! Validation of the representation invariant.
//!
//! [`check_consistency`] verifies, for any type implementing the core traits,
//! that:
//!
//! * every neighbor is itself a vertex,
//! * adjacency is symmetric,
//! * there are no self-loops,
//! * neighbor sequences contain no duplicates and agree with the reported
//!   degree,
//! * the edge count equals half of the degree sum and does not exceed the
//!   edge count of the complete graph.
//!
//! The full check visits every vertex and edge. [`check_consistency_around`]
//! is its local counterpart: it checks only the adjacency of the given
//! vertices and the edge count bound, which is all a single mutation can
//! break.
//!
//! [`Graph`](crate::Graph) runs a check after every mutation and panics on
//! failure, because a violation is a bug in the implementation and never a
//! consequence of user input.

use std::collections::BTreeSet;

use thiserror::Error;

use super::{facts, EdgeSet, Neighbors, VertexSet};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyCheckError {
    #[error("vertices iterator count ({0}) is not equal to vertex count ({1})")]
    VerticesVertexCountMismatch(usize, usize),
    #[error("vertex at position {0} (zero-based) has a neighbor that is not a vertex")]
    DanglingNeighbor(usize),
    #[error("vertex at position {0} (zero-based) is its own neighbor")]
    SelfLoop(usize),
    #[error("vertex at position {0} (zero-based) has a neighbor that does not list it back")]
    AsymmetricAdjacency(usize),
    #[error("vertex at position {0} (zero-based) lists the same neighbor more than once")]
    DuplicateNeighbor(usize),
    #[error("degree ({0}) is not equal to neighbors iterator count ({1})")]
    DegreeNeighborsMismatch(usize, usize),
    #[error("sum of degrees ({0}) is not equal to doubled edge count ({1})")]
    HandshakingLemma(usize, usize),
    #[error("edge count ({0}) exceeds the edge count of a complete graph ({1})")]
    EdgeCountBound(usize, usize),
}

pub fn check_consistency<G>(graph: &G) -> Result<(), ConsistencyCheckError>
where
    G: VertexSet + EdgeSet + Neighbors,
{
    let vertex_count = graph.vertex_count();
    let vertices_count = graph.vertices().count();

    if vertices_count != vertex_count {
        return Err(ConsistencyCheckError::VerticesVertexCountMismatch(
            vertices_count,
            vertex_count,
        ));
    }

    check_edge_count_bound(graph)?;

    let mut degree_sum = 0;

    for (position, vertex) in graph.vertices().enumerate() {
        degree_sum += check_adjacency(graph, vertex, || position)?;
    }

    let edge_count = graph.edge_count();

    if degree_sum != 2 * edge_count {
        return Err(ConsistencyCheckError::HandshakingLemma(
            degree_sum,
            2 * edge_count,
        ));
    }

    Ok(())
}

/// Checks the adjacency of the given vertices and the edge count bound.
///
/// Vertices that are not in the graph are skipped, so the former neighbors of
/// a removed vertex can be passed as they are.
pub fn check_consistency_around<'a, G, I>(
    graph: &G,
    touched: I,
) -> Result<(), ConsistencyCheckError>
where
    G: VertexSet + EdgeSet + Neighbors,
    G::Vertex: 'a,
    I: IntoIterator<Item = &'a G::Vertex>,
{
    for vertex in touched {
        if graph.contains_vertex(vertex) {
            // Linear, so only computed on failure.
            check_adjacency(graph, vertex, || {
                graph
                    .vertices()
                    .position(|v| v == vertex)
                    .unwrap_or(usize::MAX)
            })?;
        }
    }

    check_edge_count_bound(graph)
}

// Returns the degree of the vertex.
fn check_adjacency<G, P>(
    graph: &G,
    vertex: &G::Vertex,
    position: P,
) -> Result<usize, ConsistencyCheckError>
where
    G: VertexSet + EdgeSet + Neighbors,
    P: Fn() -> usize,
{
    let mut distinct = BTreeSet::new();

    for neighbor in graph.neighbors(vertex) {
        if neighbor == vertex {
            return Err(ConsistencyCheckError::SelfLoop(position()));
        }

        if !graph.contains_vertex(neighbor) {
            return Err(ConsistencyCheckError::DanglingNeighbor(position()));
        }

        if !graph.contains_edge(neighbor, vertex) {
            return Err(ConsistencyCheckError::AsymmetricAdjacency(position()));
        }

        if !distinct.insert(neighbor) {
            return Err(ConsistencyCheckError::DuplicateNeighbor(position()));
        }
    }

    let degree = graph.degree(vertex);
    if degree != distinct.len() {
        return Err(ConsistencyCheckError::DegreeNeighborsMismatch(
            degree,
            distinct.len(),
        ));
    }

    Ok(degree)
}

fn check_edge_count_bound<G>(graph: &G) -> Result<(), ConsistencyCheckError>
where
    G: VertexSet + EdgeSet,
{
    let edge_count = graph.edge_count();
    let bound = facts::complete_graph_edge_count(graph.vertex_count());

    if edge_count > bound {
        return Err(ConsistencyCheckError::EdgeCountBound(edge_count, bound));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{btree_map, BTreeMap},
        slice,
    };

    use assert_matches::assert_matches;

    use crate::core::GraphBase;

    use super::*;

    // Raw adjacency without any maintenance, so that broken states can be
    // constructed directly.
    #[derive(Default)]
    struct Raw {
        adjacency: BTreeMap<u32, Vec<u32>>,
        edge_count: usize,
        vertex_count: Option<usize>,
        degrees: BTreeMap<u32, usize>,
    }

    impl Raw {
        fn with(entries: &[(u32, &[u32])], edge_count: usize) -> Self {
            Self {
                adjacency: entries.iter().map(|(v, ns)| (*v, ns.to_vec())).collect(),
                edge_count,
                ..Self::default()
            }
        }
    }

    impl GraphBase for Raw {
        type Vertex = u32;
    }

    impl VertexSet for Raw {
        type VerticesIter<'a> = btree_map::Keys<'a, u32, Vec<u32>>;

        fn vertices(&self) -> Self::VerticesIter<'_> {
            self.adjacency.keys()
        }

        fn vertex_count(&self) -> usize {
            self.vertex_count.unwrap_or(self.adjacency.len())
        }

        fn contains_vertex(&self, vertex: &u32) -> bool {
            self.adjacency.contains_key(vertex)
        }
    }

    impl EdgeSet for Raw {
        fn edge_count(&self) -> usize {
            self.edge_count
        }

        fn contains_edge(&self, src: &u32, dst: &u32) -> bool {
            self.adjacency
                .get(src)
                .map_or(false, |neighbors| neighbors.contains(dst))
        }
    }

    impl Neighbors for Raw {
        type NeighborsIter<'a> = slice::Iter<'a, u32>;

        fn neighbors(&self, src: &u32) -> Self::NeighborsIter<'_> {
            self.adjacency[src].iter()
        }

        fn degree(&self, src: &u32) -> usize {
            self.degrees
                .get(src)
                .copied()
                .unwrap_or(self.adjacency[src].len())
        }
    }

    #[test]
    fn empty_is_consistent() {
        assert_eq!(check_consistency(&Raw::default()), Ok(()));
    }

    #[test]
    fn triangle_is_consistent() {
        let raw = Raw::with(&[(0, &[1, 2]), (1, &[0, 2]), (2, &[0, 1])], 3);
        assert_eq!(check_consistency(&raw), Ok(()));
    }

    #[test]
    fn vertex_count_mismatch() {
        let mut raw = Raw::with(&[(0, &[1]), (1, &[0])], 1);
        raw.vertex_count = Some(3);

        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::VerticesVertexCountMismatch(2, 3))
        );
    }

    #[test]
    fn dangling_neighbor() {
        let raw = Raw::with(&[(0, &[1]), (1, &[0, 7])], 1);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::DanglingNeighbor(1))
        );
    }

    #[test]
    fn asymmetric() {
        let raw = Raw::with(&[(0, &[1]), (1, &[])], 0);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::AsymmetricAdjacency(0))
        );
    }

    #[test]
    fn self_loop() {
        let raw = Raw::with(&[(0, &[0])], 0);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::SelfLoop(0))
        );
    }

    #[test]
    fn duplicate_neighbor() {
        let raw = Raw::with(&[(0, &[1]), (1, &[0, 0])], 1);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::DuplicateNeighbor(1))
        );
    }

    #[test]
    fn degree_mismatch() {
        let mut raw = Raw::with(&[(0, &[1, 2]), (1, &[0]), (2, &[0])], 2);
        raw.degrees.insert(0, 1);

        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::DegreeNeighborsMismatch(1, 2))
        );
    }

    #[test]
    fn wrong_edge_count() {
        let raw = Raw::with(&[(0, &[1]), (1, &[0, 2]), (2, &[1])], 3);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::HandshakingLemma(4, 6))
        );
    }

    #[test]
    fn edge_count_bound() {
        let raw = Raw::with(&[(0, &[1]), (1, &[0])], 2);
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::EdgeCountBound(2, 1))
        );
    }

    #[test]
    fn around_checks_touched_vertices_only() {
        // Vertex 3 is broken, but it is not among the touched ones.
        let raw = Raw::with(&[(0, &[1]), (1, &[0]), (2, &[]), (3, &[3])], 1);

        assert_eq!(check_consistency_around(&raw, &[0, 1, 2]), Ok(()));
        assert_matches!(
            check_consistency_around(&raw, &[1, 3]),
            Err(ConsistencyCheckError::SelfLoop(3))
        );
        assert_matches!(
            check_consistency(&raw),
            Err(ConsistencyCheckError::SelfLoop(3))
        );
    }

    #[test]
    fn around_skips_missing_vertices() {
        let raw = Raw::with(&[(0, &[1]), (1, &[0])], 1);
        assert_eq!(check_consistency_around(&raw, &[0, 1, 5]), Ok(()));
    }

    #[test]
    fn around_detects_broken_adjacency() {
        let raw = Raw::with(&[(0, &[1]), (1, &[])], 0);
        assert_matches!(
            check_consistency_around(&raw, &[0]),
            Err(ConsistencyCheckError::AsymmetricAdjacency(0))
        );

        let raw = Raw::with(&[(0, &[1]), (1, &[0, 7])], 1);
        assert_matches!(
            check_consistency_around(&raw, &[1]),
            Err(ConsistencyCheckError::DanglingNeighbor(1))
        );
    }

    #[test]
    fn around_checks_edge_count_bound() {
        let raw = Raw::with(&[(0, &[]), (1, &[])], 5);
        assert_matches!(
            check_consistency_around(&raw, []),
            Err(ConsistencyCheckError::EdgeCountBound(5, 1))
        );
    }
}
