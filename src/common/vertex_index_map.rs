use std::ops::Index;

/// Bijection between the vertices of a graph and the dense range `0..n`.
///
/// Vertices are numbered in ascending order, so that mapping a vertex to its
/// index is a binary search and the opposite direction is constant time.
/// Algorithms that need to visit every vertex use the dense indices for
/// bit sets and vectors instead of hashing the vertices over and over.
#[derive(Debug)]
pub struct VertexIndexMap<'a, V> {
    map: Vec<&'a V>,
}

impl<'a, V: Ord> VertexIndexMap<'a, V> {
    pub fn new<I>(vertices: I) -> Self
    where
        I: IntoIterator<Item = &'a V>,
    {
        let mut map = vertices.into_iter().collect::<Vec<_>>();
        // Storages with ordered vertices make this a no-op pass.
        map.sort_unstable();
        map.dedup();

        Self { map }
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.map.binary_search(&vertex).ok()
    }
}

impl<'a, V> Index<usize> for VertexIndexMap<'a, V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        self.map[index]
    }
}
