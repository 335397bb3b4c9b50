//! Find the [diameter] of a graph, the largest distance between any two
//! vertices.
//!
//! Pairs of vertices that are not connected do not contribute, so the
//! diameter of a disconnected graph is the largest diameter of its
//! components. A graph without edges has diameter zero.
//!
//! [diameter]: https://en.wikipedia.org/wiki/Distance_(graph_theory)
//!
//! # Examples
//!
//! ```
//! use sociograph::{algo::Diameter, Graph};
//!
//! let mut graph = Graph::new();
//!
//! graph.add_vertex_set(["Alice", "Bob", "Carol", "Dave"]).unwrap();
//! graph.add_edge_set(&"Bob", ["Alice", "Carol"]).unwrap();
//! graph.add_edge(&"Carol", &"Dave").unwrap();
//!
//! let diameter = Diameter::on(graph.storage()).run();
//!
//! assert_eq!(diameter.value(), 3);
//! assert_eq!(diameter.endpoints(), Some((&"Alice", &"Dave")));
//! ```

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;

use crate::{
    common::{VertexIndexMap, VisitSet},
    core::{GraphBase, Neighbors, VertexSet},
};

/// Diameter of a graph together with a pair of vertices that realizes it.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug)]
pub struct Diameter<G: GraphBase> {
    value: usize,
    endpoints: Option<(G::Vertex, G::Vertex)>,
}

impl<G> Diameter<G>
where
    G: GraphBase,
{
    pub fn value(&self) -> usize {
        self.value
    }

    /// The first pair of vertices (in vertex order) whose distance equals the
    /// diameter, or `None` if the diameter is zero.
    pub fn endpoints(&self) -> Option<(&G::Vertex, &G::Vertex)> {
        self.endpoints.as_ref().map(|(u, v)| (u, v))
    }
}

/// Builder for [`Diameter`].
pub struct DiameterBuilder<'a, G> {
    graph: &'a G,
}

impl<G> Diameter<G>
where
    G: GraphBase,
{
    /// Starts building the algorithm on the given graph.
    pub fn on(graph: &G) -> DiameterBuilder<'_, G> {
        DiameterBuilder { graph }
    }
}

impl<'a, G> DiameterBuilder<'a, G>
where
    G: GraphBase,
{
    /// Runs a breadth-first search from every vertex and keeps the largest
    /// distance found.
    pub fn run(self) -> Diameter<G>
    where
        G: VertexSet + Neighbors,
    {
        eccentricities(self.graph)
    }
}

/// Returns the diameter of the graph.
pub fn diameter<G>(graph: &G) -> usize
where
    G: VertexSet + Neighbors,
{
    Diameter::on(graph).run().value()
}

fn eccentricities<G>(graph: &G) -> Diameter<G>
where
    G: VertexSet + Neighbors,
{
    // Every vertex is visited from every source, so dense indices and a bit
    // set pay off here, unlike in the single source search.
    let map = VertexIndexMap::new(graph.vertices());

    let mut visited = FixedBitSet::with_capacity(map.len());
    let mut queue = VecDeque::new();

    let mut value = 0;
    let mut endpoints = None;

    for source in 0..map.len() {
        visited.reset_visited();
        queue.clear();

        visited.visit(source);
        queue.push_back((source, 0));

        let mut farthest = (source, 0);

        while let Some((vertex, vertex_dist)) = queue.pop_front() {
            if vertex_dist > farthest.1 {
                farthest = (vertex, vertex_dist);
            }

            let neighbors = graph
                .neighbors(&map[vertex])
                .filter_map(|neighbor| map.index_of(neighbor));

            for next in neighbors {
                if visited.visit(next) {
                    queue.push_back((next, vertex_dist + 1));
                }
            }
        }

        // Strict comparison keeps the first pair found on ties.
        if farthest.1 > value {
            value = farthest.1;
            endpoints = Some((map[source].clone(), map[farthest.0].clone()));
        }
    }

    Diameter { value, endpoints }
}
