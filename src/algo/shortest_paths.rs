//! Find [single source shortest paths] and their distances in an unweighted
//! graph.
//!
//! Every edge counts as one hop, so the search is a breadth-first traversal
//! from the source. If a goal is given, the traversal stops as soon as the
//! goal is discovered, leaving the rest of the graph unexplored.
//!
//! [single source shortest paths]:
//!     https://en.wikipedia.org/wiki/Shortest_path_problem#Single-source_shortest_paths
//!
//! # Examples
//!
//! ```
//! use sociograph::{algo::ShortestPaths, Graph};
//!
//! let mut graph = Graph::new();
//!
//! graph.add_vertex_set(["Alice", "Bob", "Carol", "Dave"]).unwrap();
//! graph.add_edge(&"Alice", &"Bob").unwrap();
//! graph.add_edge(&"Bob", &"Carol").unwrap();
//! graph.add_edge(&"Carol", &"Dave").unwrap();
//!
//! let shortest_paths = ShortestPaths::on(graph.storage()).goal("Dave").run("Alice").unwrap();
//! let path = shortest_paths
//!     .reconstruct("Dave")
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(shortest_paths[&"Dave"], 3);
//! assert_eq!(path, vec!["Carol", "Bob", "Alice"]);
//! ```

use std::ops::Index;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::GraphBase;

mod bfs;
mod builder;

pub use builder::ShortestPathsBuilder;

/// Shortest paths and their distances from a single source vertex.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug)]
pub struct ShortestPaths<G: GraphBase> {
    source: G::Vertex,
    // Using HashMaps because the algorithm supports early termination when
    // reaching given goal. It is likely that reaching goal means visiting a
    // subgraph which is significantly smaller than the original graph.
    dist: FxHashMap<G::Vertex, usize>,
    pred: FxHashMap<G::Vertex, G::Vertex>,
}

impl<G> ShortestPaths<G>
where
    G: GraphBase,
{
    /// Source vertex where the search was started.
    pub fn source(&self) -> &G::Vertex {
        &self.source
    }

    /// Returns the number of edges on the shortest path between the source
    /// vertex and the given vertex, or `None` if it's not known.
    ///
    /// There are two causes why the distance between two vertices is not known:
    /// (1) the vertices are not connected, or (2) the
    /// [goal](ShortestPathsBuilder::goal) was reached before visiting the given
    /// vertex.
    pub fn dist(&self, to: &G::Vertex) -> Option<usize> {
        self.dist.get(to).copied()
    }

    /// Returns an iterator over vertices on the path between the given vertex
    /// and the source vertex, in this order. Neither the given vertex itself
    /// is included, nor the source vertex if the given vertex is the source.
    ///
    /// The iterator is empty if the vertex was not reached.
    pub fn reconstruct(&self, to: G::Vertex) -> PathReconstruction<'_, G> {
        PathReconstruction {
            curr: to,
            pred: &self.pred,
        }
    }

    /// Largest distance among the reached vertices.
    ///
    /// Without a goal, this is the [eccentricity] of the source vertex.
    ///
    /// [eccentricity]: https://en.wikipedia.org/wiki/Distance_(graph_theory)
    pub fn max_dist(&self) -> usize {
        self.dist.values().copied().max().unwrap_or_default()
    }

    /// Number of vertices with known distance, including the source.
    pub fn reached_count(&self) -> usize {
        self.dist.len()
    }
}

impl<'a, G> Index<&'a G::Vertex> for ShortestPaths<G>
where
    G: GraphBase,
{
    type Output = usize;

    fn index(&self, index: &'a G::Vertex) -> &Self::Output {
        &self.dist[index]
    }
}

/// The error encountered during a [`ShortestPaths`] run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error<V> {
    /// The source vertex is not in the graph.
    #[error("source vertex {0} does not exist")]
    SourceAbsent(V),

    /// The goal vertex is not in the graph.
    #[error("goal vertex {0} does not exist")]
    GoalAbsent(V),
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`ShortestPaths::reconstruct`].
pub struct PathReconstruction<'a, G: GraphBase> {
    curr: G::Vertex,
    pred: &'a FxHashMap<G::Vertex, G::Vertex>,
}

impl<'a, G: GraphBase> Iterator for PathReconstruction<'a, G> {
    type Item = G::Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        self.curr = self.pred.get(&self.curr).cloned()?;
        Some(self.curr.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use petgraph::graph::UnGraph;
    use proptest::prelude::*;

    use crate::{
        infra::{proptest::graph_undirected, testing::create_path},
        storage::AdjMap,
    };

    use super::*;

    fn create_basic_graph() -> AdjMap<u32> {
        let mut graph = AdjMap::new();

        for v in 0..7 {
            graph.add_vertex(v);
        }

        graph.add_edge(&0, &1);
        graph.add_edge(&0, &2);
        graph.add_edge(&1, &3);
        graph.add_edge(&2, &3);
        graph.add_edge(&3, &4);
        graph.add_edge(&4, &5);

        // 6 is isolated.
        graph
    }

    #[test]
    fn bfs_basic() {
        let graph = create_basic_graph();
        let paths = ShortestPaths::on(&graph).run(0).unwrap();

        assert_eq!(paths.source(), &0);
        assert_eq!(paths.dist(&0), Some(0));
        assert_eq!(paths.dist(&1), Some(1));
        assert_eq!(paths.dist(&2), Some(1));
        assert_eq!(paths.dist(&3), Some(2));
        assert_eq!(paths[&4], 3);
        assert_eq!(paths[&5], 4);
        assert_eq!(paths.dist(&6), None);
        assert_eq!(paths.max_dist(), 4);
        assert_eq!(paths.reached_count(), 6);

        // Neighbors are explored in ascending order, so the path goes through
        // the smaller of the two equally short alternatives.
        assert_eq!(paths.reconstruct(5).collect::<Vec<_>>(), vec![4, 3, 1, 0]);
        assert_eq!(paths.reconstruct(0).count(), 0);
        assert_eq!(paths.reconstruct(6).count(), 0);
    }

    #[test]
    fn bfs_early_termination() {
        let graph = create_basic_graph();
        let paths = ShortestPaths::on(&graph).goal(1).run(0).unwrap();

        assert_eq!(paths.dist(&1), Some(1));
        assert_eq!(paths.dist(&5), None);
        assert_eq!(paths.dist(&3), None);
    }

    #[test]
    fn bfs_goal_is_source() {
        let graph = create_basic_graph();
        let paths = ShortestPaths::on(&graph).goal(3).run(3).unwrap();

        assert_eq!(paths.dist(&3), Some(0));
        assert_eq!(paths.reached_count(), 1);
    }

    #[test]
    fn bfs_goal_not_reached() {
        let graph = create_basic_graph();
        let paths = ShortestPaths::on(&graph).goal(6).run(0).unwrap();

        assert_eq!(paths.dist(&6), None);
        assert_eq!(paths.reached_count(), 6);
    }

    #[test]
    fn absent_vertices() {
        let graph = create_basic_graph();

        assert_matches!(
            ShortestPaths::on(&graph).run(9),
            Err(Error::SourceAbsent(9))
        );
        assert_matches!(
            ShortestPaths::on(&graph).goal(8).run(0),
            Err(Error::GoalAbsent(8))
        );
    }

    #[test]
    fn bfs_path() {
        let graph = create_path(5);
        let paths = ShortestPaths::on(&graph).run(4).unwrap();

        assert_eq!(paths[&0], 4);
        assert_eq!(paths.reconstruct(0).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_bfs_connected_all_reachable(graph in graph_undirected().max_size(64).connected(), source: u32) {
            let n = graph.vertex_count() as u32;
            prop_assume!(n > 0);

            let source = source % n;
            let paths = ShortestPaths::on(graph.storage()).run(source).unwrap();

            for &v in graph.vertices() {
                prop_assert_ne!(paths.dist(&v), None);

                let u = paths.reconstruct(v).last();
                if v != source {
                    prop_assert_eq!(u, Some(source));
                } else {
                    prop_assert_eq!(u, None);
                }
            }
        }

        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_bfs_petgraph_agree(graph in graph_undirected().max_size(64), source: u32) {
            let n = graph.vertex_count() as u32;
            prop_assume!(n > 0);

            let source = source % n;
            let paths = ShortestPaths::on(graph.storage()).run(source).unwrap();

            // The strategy labels the vertices with 0..n, which matches the
            // node indices of petgraph when the nodes are added in order.
            let mut reference = UnGraph::<u32, ()>::with_capacity(graph.vertex_count(), graph.edge_count());
            let nodes = graph.vertices().map(|&v| reference.add_node(v)).collect::<Vec<_>>();

            for &v in graph.vertices() {
                for &w in graph.neighbors(&v).unwrap() {
                    if v < w {
                        reference.add_edge(nodes[v as usize], nodes[w as usize], ());
                    }
                }
            }

            let expected = petgraph::algo::dijkstra(&reference, nodes[source as usize], None, |_| 1usize);

            for &v in graph.vertices() {
                prop_assert_eq!(paths.dist(&v), expected.get(&nodes[v as usize]).copied());
            }
        }
    }
}
