use std::collections::{hash_map::Entry, VecDeque};

use rustc_hash::FxHashMap;

use crate::core::Neighbors;

use super::ShortestPaths;

pub fn bfs<G>(graph: &G, source: G::Vertex, goal: Option<G::Vertex>) -> ShortestPaths<G>
where
    G: Neighbors,
{
    // The distance map doubles as the visit set. A vertex gets its distance
    // when it is discovered, and in an unweighted graph the first discovery
    // is along a shortest path.
    let mut dist = FxHashMap::default();
    let mut pred = FxHashMap::default();
    let mut queue = VecDeque::new();

    dist.insert(source.clone(), 0);

    if goal.as_ref() != Some(&source) {
        queue.push_back((source.clone(), 0));
    }

    'search: while let Some((vertex, vertex_dist)) = queue.pop_front() {
        let next_dist = vertex_dist + 1;

        for next in graph.neighbors(&vertex) {
            if let Entry::Vacant(slot) = dist.entry(next.clone()) {
                slot.insert(next_dist);
                pred.insert(next.clone(), vertex.clone());

                if goal.as_ref() == Some(next) {
                    break 'search;
                }

                queue.push_back((next.clone(), next_dist));
            }
        }
    }

    ShortestPaths { source, dist, pred }
}
