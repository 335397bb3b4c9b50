use std::{
    collections::{btree_map, btree_set, BTreeMap, BTreeSet},
    hash::Hash,
    mem,
};

use crate::core::{EdgeSet, GraphBase, Neighbors, VertexSet};

pub type VerticesIter<'a, V> = btree_map::Keys<'a, V, BTreeSet<V>>;
pub type NeighborsIter<'a, V> = btree_set::Iter<'a, V>;

/// Ordered adjacency map of an undirected simple graph.
///
/// Each vertex maps to the set of its neighbors. An edge is stored as the
/// reciprocal membership of its endpoints, and the edge mutators always update
/// both endpoints together, so the adjacency is symmetric after every call.
/// Self-loops and parallel edges are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjMap<V> {
    adjacency: BTreeMap<V, BTreeSet<V>>,
    edge_count: usize,
}

impl<V: Ord> AdjMap<V> {
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
            edge_count: 0,
        }
    }

    /// Creates the storage from adjacency sets that are already known to be
    /// symmetric, without self-loops and referring only to present vertices.
    pub(crate) fn from_adjacency(adjacency: BTreeMap<V, BTreeSet<V>>) -> Self {
        let degree_sum: usize = adjacency.values().map(BTreeSet::len).sum();

        Self {
            adjacency,
            edge_count: degree_sum / 2,
        }
    }

    pub fn neighbor_set(&self, vertex: &V) -> Option<&BTreeSet<V>> {
        self.adjacency.get(vertex)
    }

    /// Adds an isolated vertex. Returns `false` and leaves the storage
    /// untouched if the vertex already exists.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        match self.adjacency.entry(vertex) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(BTreeSet::new());
                true
            }
        }
    }

    /// Removes the vertex together with all its edges and returns its former
    /// neighbors.
    pub fn remove_vertex(&mut self, vertex: &V) -> Option<BTreeSet<V>> {
        let neighbors = self.adjacency.remove(vertex)?;
        self.detach(vertex, &neighbors);
        Some(neighbors)
    }

    /// Removes all edges of the vertex, keeping the vertex itself, and returns
    /// its former neighbors.
    pub fn isolate_vertex(&mut self, vertex: &V) -> Option<BTreeSet<V>> {
        let neighbors = mem::take(self.adjacency.get_mut(vertex)?);
        self.detach(vertex, &neighbors);
        Some(neighbors)
    }

    /// Removes the edge between `src` and `dst` from both endpoints. Returns
    /// `false` if there is no such edge.
    pub fn remove_edge(&mut self, src: &V, dst: &V) -> bool {
        let removed = match self.adjacency.get_mut(src) {
            Some(neighbors) => neighbors.remove(dst),
            None => false,
        };

        if removed {
            if let Some(neighbors) = self.adjacency.get_mut(dst) {
                neighbors.remove(src);
            }
            self.edge_count -= 1;
        }

        removed
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edge_count = 0;
    }

    // Removes `vertex` from the adjacency of each of its former neighbors.
    fn detach(&mut self, vertex: &V, neighbors: &BTreeSet<V>) {
        for neighbor in neighbors {
            if let Some(back) = self.adjacency.get_mut(neighbor) {
                back.remove(vertex);
            }
        }

        self.edge_count -= neighbors.len();
    }
}

impl<V: Ord + Clone> AdjMap<V> {
    /// Connects `src` and `dst`. Returns `false` and leaves the storage
    /// untouched if either endpoint is missing, the endpoints are equal or
    /// the edge already exists.
    pub fn add_edge(&mut self, src: &V, dst: &V) -> bool {
        if src == dst || !self.adjacency.contains_key(dst) {
            return false;
        }

        let inserted = match self.adjacency.get_mut(src) {
            Some(neighbors) => neighbors.insert(dst.clone()),
            None => false,
        };

        if !inserted {
            return false;
        }

        if let Some(neighbors) = self.adjacency.get_mut(dst) {
            neighbors.insert(src.clone());
        }

        self.edge_count += 1;
        true
    }
}

impl<V: Ord> Default for AdjMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Ord + Hash + Clone> GraphBase for AdjMap<V> {
    type Vertex = V;
}

impl<V: Ord + Hash + Clone> VertexSet for AdjMap<V> {
    type VerticesIter<'a> = VerticesIter<'a, V>
    where
        Self: 'a;

    fn vertices(&self) -> Self::VerticesIter<'_> {
        self.adjacency.keys()
    }

    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }
}

impl<V: Ord + Hash + Clone> EdgeSet for AdjMap<V> {
    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn contains_edge(&self, src: &V, dst: &V) -> bool {
        self.adjacency
            .get(src)
            .map_or(false, |neighbors| neighbors.contains(dst))
    }
}

impl<V: Ord + Hash + Clone> Neighbors for AdjMap<V> {
    type NeighborsIter<'a> = NeighborsIter<'a, V>
    where
        Self: 'a;

    fn neighbors(&self, src: &V) -> Self::NeighborsIter<'_> {
        self.adjacency
            .get(src)
            .expect("vertex does not exist")
            .iter()
    }

    fn degree(&self, src: &V) -> usize {
        self.adjacency
            .get(src)
            .expect("vertex does not exist")
            .len()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::consistency::check_consistency;

    use super::*;

    fn create_triangle() -> AdjMap<u32> {
        let mut storage = AdjMap::new();

        storage.add_vertex(0);
        storage.add_vertex(1);
        storage.add_vertex(2);

        storage.add_edge(&0, &1);
        storage.add_edge(&1, &2);
        storage.add_edge(&2, &0);

        storage
    }

    #[test]
    fn basic() {
        let storage = create_triangle();

        assert_eq!(storage.vertex_count(), 3);
        assert_eq!(storage.edge_count(), 3);
        assert_eq!(storage.vertices().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(storage.neighbors(&1).copied().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(storage.degree(&2), 2);

        check_consistency(&storage).unwrap();
    }

    #[test]
    fn add_edge_is_symmetric() {
        let mut storage = AdjMap::new();

        storage.add_vertex("b");
        storage.add_vertex("a");

        assert!(storage.add_edge(&"b", &"a"));
        assert!(storage.contains_edge(&"a", &"b"));
        assert!(storage.contains_edge(&"b", &"a"));
        assert_eq!(storage.edge_count(), 1);
    }

    #[test]
    fn add_edge_rejected() {
        let mut storage = create_triangle();

        assert!(!storage.add_edge(&0, &1));
        assert!(!storage.add_edge(&1, &0));
        assert!(!storage.add_edge(&0, &0));
        assert!(!storage.add_edge(&0, &7));
        assert!(!storage.add_edge(&7, &0));

        assert_eq!(storage, create_triangle());
    }

    #[test]
    fn add_vertex_twice() {
        let mut storage = create_triangle();

        assert!(!storage.add_vertex(1));
        assert_eq!(storage.degree(&1), 2);
    }

    #[test]
    fn remove_vertex() {
        let mut storage = create_triangle();

        assert_eq!(
            storage.remove_vertex(&1),
            Some(BTreeSet::from([0, 2]))
        );
        assert_eq!(storage.vertex_count(), 2);
        assert_eq!(storage.edge_count(), 1);
        assert!(!storage.contains_edge(&0, &1));
        assert_eq!(storage.remove_vertex(&1), None);

        check_consistency(&storage).unwrap();
    }

    #[test]
    fn remove_edge() {
        let mut storage = create_triangle();

        assert!(storage.remove_edge(&2, &0));
        assert!(!storage.remove_edge(&0, &2));
        assert!(!storage.contains_edge(&0, &2));
        assert_eq!(storage.edge_count(), 2);

        check_consistency(&storage).unwrap();
    }

    #[test]
    fn isolate_vertex() {
        let mut storage = create_triangle();

        assert_eq!(
            storage.isolate_vertex(&0),
            Some(BTreeSet::from([1, 2]))
        );
        assert!(storage.contains_vertex(&0));
        assert_eq!(storage.degree(&0), 0);
        assert_eq!(storage.edge_count(), 1);
        assert_eq!(storage.isolate_vertex(&9), None);

        check_consistency(&storage).unwrap();
    }

    #[test]
    fn clear() {
        let mut storage = create_triangle();
        storage.clear();

        assert_eq!(storage.vertex_count(), 0);
        assert_eq!(storage.edge_count(), 0);
    }

    #[test]
    fn from_adjacency_counts_edges() {
        let adjacency = BTreeMap::from([
            (0, BTreeSet::from([1, 2])),
            (1, BTreeSet::from([0])),
            (2, BTreeSet::from([0])),
            (3, BTreeSet::new()),
        ]);

        let storage = AdjMap::from_adjacency(adjacency);

        assert_eq!(storage.edge_count(), 2);
        check_consistency(&storage).unwrap();
    }

    #[test]
    #[should_panic(expected = "vertex does not exist")]
    fn neighbors_of_absent_vertex() {
        let storage = create_triangle();
        let _ = storage.neighbors(&5).count();
    }
}
