//! The graph type.
//!
//! [`Graph`] is an undirected graph of comparable vertex labels. It owns an
//! [adjacency map](crate::storage::AdjMap) and puts a validating layer on top
//! of it: every operation checks its arguments and either fully commits or
//! returns a [`GraphError`] without touching the graph, and every mutation is
//! followed by a [consistency check](crate::core::consistency).
//!
//! # Examples
//!
//! ```
//! use sociograph::{Graph, GraphError};
//!
//! let mut graph = Graph::new();
//!
//! graph.add_vertex_set(["Alice", "Bob", "Carol"]).unwrap();
//! graph.add_edge(&"Alice", &"Bob").unwrap();
//! graph.add_edge(&"Bob", &"Carol").unwrap();
//!
//! assert_eq!(graph.distance(&"Alice", &"Carol"), Ok(Some(2)));
//! assert_eq!(graph.path_between(&"Alice", &"Carol"), Ok(Some(vec!["Bob"])));
//! assert_eq!(graph.diameter(), 2);
//!
//! assert_eq!(
//!     graph.add_edge(&"Bob", &"Alice"),
//!     Err(GraphError::DuplicateEdge("Bob", "Alice"))
//! );
//! ```

use std::{
    collections::{btree_map, btree_set, BTreeMap, BTreeSet},
    fmt,
    hash::Hash,
};

use crate::{
    algo::{Diameter, ShortestPaths},
    core::{
        consistency::{check_consistency, check_consistency_around},
        EdgeSet, GraphError, InvalidArgumentKind, Neighbors, VertexSet,
    },
    storage::{
        adj_map::{NeighborsIter, VerticesIter},
        AdjMap,
    },
};

/// Lazy intersection of two adjacency sets, in ascending order.
pub type CommonNeighbors<'a, V> = btree_set::Intersection<'a, V>;

/// Undirected simple graph with vertex labels of type `V`.
///
/// Two graphs are equal if they have the same vertices and the same
/// adjacency.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<V> {
    storage: AdjMap<V>,
}

impl<V> Graph<V>
where
    V: Ord + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            storage: AdjMap::new(),
        }
    }

    /// Creates a graph from vertices and their adjacency sets, paired by
    /// position.
    ///
    /// The adjacency must describe an undirected simple graph: every neighbor
    /// is one of the vertices, no vertex is its own neighbor, and if `w` is a
    /// neighbor of `v` then `v` is a neighbor of `w`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociograph::Graph;
    ///
    /// let graph = Graph::from_adjacency(
    ///     ["A", "B", "C"],
    ///     [vec!["B"], vec!["A", "C"], vec!["B"]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_adjacency<I, A, N>(vertices: I, adjacency: A) -> Result<Self, GraphError<V>>
    where
        I: IntoIterator<Item = V>,
        A: IntoIterator<Item = N>,
        N: IntoIterator<Item = V>,
    {
        let vertices = vertices.into_iter().collect::<Vec<_>>();
        let adjacency = adjacency
            .into_iter()
            .map(|neighbors| neighbors.into_iter().collect::<BTreeSet<_>>())
            .collect::<Vec<_>>();

        if vertices.len() != adjacency.len() {
            return Err(GraphError::InvalidArgument(
                InvalidArgumentKind::LengthMismatch {
                    vertices: vertices.len(),
                    adjacency: adjacency.len(),
                },
            ));
        }

        let mut map = BTreeMap::new();

        for (vertex, neighbors) in vertices.into_iter().zip(adjacency) {
            match map.entry(vertex) {
                btree_map::Entry::Occupied(entry) => {
                    return Err(GraphError::DuplicateVertex(entry.key().clone()))
                }
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(neighbors);
                }
            }
        }

        for (vertex, neighbors) in map.iter() {
            for neighbor in neighbors {
                if neighbor == vertex {
                    return Err(GraphError::SelfLoop(vertex.clone()));
                }

                match map.get(neighbor) {
                    None => return Err(GraphError::UnknownVertex(neighbor.clone())),
                    Some(back) if !back.contains(vertex) => {
                        return Err(GraphError::InvalidArgument(
                            InvalidArgumentKind::AsymmetricAdjacency,
                        ))
                    }
                    Some(_) => {}
                }
            }
        }

        let graph = Self {
            storage: AdjMap::from_adjacency(map),
        };

        graph.assert_consistent();
        Ok(graph)
    }

    /// Underlying storage, for use with the generic [algorithms](crate::algo).
    pub fn storage(&self) -> &AdjMap<V> {
        &self.storage
    }

    pub fn vertex_count(&self) -> usize {
        self.storage.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.storage.contains_vertex(vertex)
    }

    pub fn contains_edge(&self, src: &V, dst: &V) -> Result<bool, GraphError<V>> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        Ok(self.storage.contains_edge(src, dst))
    }

    pub fn degree(&self, vertex: &V) -> Result<usize, GraphError<V>> {
        self.check_vertex(vertex)?;
        Ok(self.storage.degree(vertex))
    }

    /// Returns the vertices in ascending order.
    pub fn vertices(&self) -> VerticesIter<'_, V> {
        self.storage.vertices()
    }

    /// Returns the neighbors of the vertex in ascending order.
    pub fn neighbors(&self, vertex: &V) -> Result<NeighborsIter<'_, V>, GraphError<V>> {
        self.check_vertex(vertex)?;
        Ok(self.storage.neighbors(vertex))
    }

    /// Returns the vertices adjacent to both `v` and `w` in ascending order.
    ///
    /// The intersection is computed lazily while iterating. To iterate again,
    /// call the method again.
    pub fn common_neighbors(&self, v: &V, w: &V) -> Result<CommonNeighbors<'_, V>, GraphError<V>> {
        let lhs = self
            .storage
            .neighbor_set(v)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))?;
        let rhs = self
            .storage
            .neighbor_set(w)
            .ok_or_else(|| GraphError::UnknownVertex(w.clone()))?;

        Ok(lhs.intersection(rhs))
    }

    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError<V>> {
        if self.contains_vertex(&vertex) {
            return Err(GraphError::DuplicateVertex(vertex));
        }

        self.storage.add_vertex(vertex.clone());
        self.assert_consistent_around([&vertex]);
        Ok(())
    }

    /// Adds all given vertices, or none of them if any is already present.
    /// Repeated vertices in the input are added once.
    pub fn add_vertex_set<I>(&mut self, vertices: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        let vertices = vertices.into_iter().collect::<BTreeSet<_>>();

        if let Some(vertex) = vertices.iter().find(|v| self.contains_vertex(v)) {
            return Err(GraphError::DuplicateVertex(vertex.clone()));
        }

        for vertex in vertices.iter() {
            self.storage.add_vertex(vertex.clone());
        }

        self.assert_consistent_around(&vertices);
        Ok(())
    }

    /// Adds a new vertex connected to all given neighbors, which must already
    /// be present.
    pub fn add_attached_vertex<I>(&mut self, vertex: V, neighbors: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        if self.contains_vertex(&vertex) {
            return Err(GraphError::DuplicateVertex(vertex));
        }

        let neighbors = neighbors.into_iter().collect::<BTreeSet<_>>();

        if neighbors.contains(&vertex) {
            return Err(GraphError::SelfLoop(vertex));
        }

        self.check_vertices(&neighbors)?;

        self.storage.add_vertex(vertex.clone());
        for neighbor in neighbors.iter() {
            self.storage.add_edge(&vertex, neighbor);
        }

        self.assert_consistent_around(std::iter::once(&vertex).chain(&neighbors));
        Ok(())
    }

    pub fn remove_vertex(&mut self, vertex: &V) -> Result<(), GraphError<V>> {
        let neighbors = self
            .storage
            .remove_vertex(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;

        self.assert_consistent_around(&neighbors);
        Ok(())
    }

    /// Removes all given vertices with their edges, or none of them if any
    /// is missing.
    pub fn remove_vertex_set<I>(&mut self, vertices: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        let vertices = vertices.into_iter().collect::<BTreeSet<_>>();
        self.check_vertices(&vertices)?;

        let mut touched = BTreeSet::new();
        for vertex in vertices.iter() {
            touched.extend(self.storage.remove_vertex(vertex).unwrap_or_default());
        }

        self.assert_consistent_around(&touched);
        Ok(())
    }

    /// Removes all edges of the vertex, keeping the vertex in the graph.
    pub fn isolate_vertex(&mut self, vertex: &V) -> Result<(), GraphError<V>> {
        let neighbors = self
            .storage
            .isolate_vertex(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))?;

        self.assert_consistent_around(std::iter::once(vertex).chain(&neighbors));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.storage.clear();
        self.assert_consistent_around([]);
    }

    pub fn add_edge(&mut self, src: &V, dst: &V) -> Result<(), GraphError<V>> {
        self.check_new_edge(src, dst)?;

        self.storage.add_edge(src, dst);
        self.assert_consistent_around([src, dst]);
        Ok(())
    }

    /// Connects `src` to all given vertices, or to none of them if any of the
    /// edges cannot be added.
    pub fn add_edge_set<I>(&mut self, src: &V, dsts: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        self.check_vertex(src)?;

        let dsts = dsts.into_iter().collect::<BTreeSet<_>>();
        for dst in dsts.iter() {
            self.check_new_edge(src, dst)?;
        }

        for dst in dsts.iter() {
            self.storage.add_edge(src, dst);
        }

        self.assert_consistent_around(std::iter::once(src).chain(&dsts));
        Ok(())
    }

    pub fn remove_edge(&mut self, src: &V, dst: &V) -> Result<(), GraphError<V>> {
        self.check_existing_edge(src, dst)?;

        self.storage.remove_edge(src, dst);
        self.assert_consistent_around([src, dst]);
        Ok(())
    }

    /// Disconnects `src` from all given vertices, or from none of them if any
    /// of the edges does not exist.
    pub fn remove_edge_set<I>(&mut self, src: &V, dsts: I) -> Result<(), GraphError<V>>
    where
        I: IntoIterator<Item = V>,
    {
        self.check_vertex(src)?;

        let dsts = dsts.into_iter().collect::<BTreeSet<_>>();
        for dst in dsts.iter() {
            self.check_existing_edge(src, dst)?;
        }

        for dst in dsts.iter() {
            self.storage.remove_edge(src, dst);
        }

        self.assert_consistent_around(std::iter::once(src).chain(&dsts));
        Ok(())
    }

    /// Returns the number of edges on a shortest path between the vertices,
    /// or `None` if they are not connected.
    pub fn distance(&self, src: &V, dst: &V) -> Result<Option<usize>, GraphError<V>> {
        let paths = ShortestPaths::on(&self.storage)
            .goal(dst.clone())
            .run(src.clone())?;

        Ok(paths.dist(dst))
    }

    /// Returns the vertices strictly between `src` and `dst` on a shortest
    /// path, in order from `src`.
    ///
    /// The path is `None` if the vertices are not connected, and empty if
    /// they are adjacent or equal.
    pub fn path_between(&self, src: &V, dst: &V) -> Result<Option<Vec<V>>, GraphError<V>> {
        let paths = ShortestPaths::on(&self.storage)
            .goal(dst.clone())
            .run(src.clone())?;

        if paths.dist(dst).is_none() {
            return Ok(None);
        }

        let mut path = paths
            .reconstruct(dst.clone())
            .take_while(|vertex| vertex != src)
            .collect::<Vec<_>>();

        path.reverse();
        Ok(Some(path))
    }

    /// Returns the largest distance from the vertex to any vertex reachable
    /// from it.
    pub fn eccentricity(&self, vertex: &V) -> Result<usize, GraphError<V>> {
        let paths = ShortestPaths::on(&self.storage).run(vertex.clone())?;
        Ok(paths.max_dist())
    }

    /// Returns the largest distance between any two connected vertices.
    pub fn diameter(&self) -> usize {
        Diameter::on(&self.storage).run().value()
    }

    fn check_vertex(&self, vertex: &V) -> Result<(), GraphError<V>> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex.clone()))
        }
    }

    fn check_vertices(&self, vertices: &BTreeSet<V>) -> Result<(), GraphError<V>> {
        vertices.iter().try_for_each(|vertex| self.check_vertex(vertex))
    }

    fn check_new_edge(&self, src: &V, dst: &V) -> Result<(), GraphError<V>> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        if src == dst {
            return Err(GraphError::SelfLoop(src.clone()));
        }

        if self.storage.contains_edge(src, dst) {
            return Err(GraphError::DuplicateEdge(src.clone(), dst.clone()));
        }

        Ok(())
    }

    fn check_existing_edge(&self, src: &V, dst: &V) -> Result<(), GraphError<V>> {
        self.check_vertex(src)?;
        self.check_vertex(dst)?;

        if !self.storage.contains_edge(src, dst) {
            return Err(GraphError::UnknownEdge(src.clone(), dst.clone()));
        }

        Ok(())
    }

    fn assert_consistent(&self) {
        if let Err(error) = check_consistency(&self.storage) {
            panic!("representation invariant violated: {error}");
        }
    }

    // A mutation can only break the adjacency of the vertices it touched and
    // the edge count, so release builds check just these. Debug builds scan
    // the whole graph.
    fn assert_consistent_around<'a, I>(&self, touched: I)
    where
        V: 'a,
        I: IntoIterator<Item = &'a V>,
    {
        if cfg!(debug_assertions) {
            self.assert_consistent();
        } else if let Err(error) = check_consistency_around(&self.storage, touched) {
            panic!("representation invariant violated: {error}");
        }
    }
}

impl<V> Default for Graph<V>
where
    V: Ord + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<AdjMap<V>> for Graph<V>
where
    V: Ord + Hash + Clone,
{
    fn from(storage: AdjMap<V>) -> Self {
        let graph = Self { storage };
        graph.assert_consistent();
        graph
    }
}

impl<'a, V> IntoIterator for &'a Graph<V>
where
    V: Ord + Hash + Clone,
{
    type Item = &'a V;
    type IntoIter = VerticesIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices()
    }
}

/// Writes the graph in the adjacency list format, one vertex per line
/// followed by its neighbors.
impl<V> fmt::Display for Graph<V>
where
    V: Ord + Hash + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in self.vertices() {
            write!(f, "{vertex}:")?;

            for neighbor in self.storage.neighbors(vertex) {
                write!(f, " {neighbor}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
