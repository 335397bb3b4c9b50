use std::{
    fmt,
    hash::Hash,
    ops::{Deref, DerefMut},
};

use crate::{
    core::{facts, EdgeSet, GraphError},
    graph::Graph,
    storage::AdjMap,
};

use super::export::Dot;

pub fn create_complete(vertex_count: usize) -> AdjMap<u32> {
    let mut graph = create_isolated(vertex_count);
    let vertices = 0..vertex_count as u32;

    for u in vertices.clone() {
        for v in vertices.clone() {
            if v >= u {
                break;
            }

            graph.add_edge(&u, &v);
        }
    }

    debug_assert_eq!(
        graph.edge_count(),
        facts::complete_graph_edge_count(vertex_count)
    );

    graph
}

pub fn create_path(vertex_count: usize) -> AdjMap<u32> {
    let mut graph = create_isolated(vertex_count);

    for v in 1..vertex_count as u32 {
        graph.add_edge(&(v - 1), &v);
    }

    graph
}

pub fn create_cycle(vertex_count: usize) -> AdjMap<u32> {
    let mut graph = create_path(vertex_count);

    if vertex_count > 2 {
        graph.add_edge(&(vertex_count as u32 - 1), &0);
    }

    graph
}

fn create_isolated(vertex_count: usize) -> AdjMap<u32> {
    let mut graph = AdjMap::new();

    for v in 0..vertex_count as u32 {
        graph.add_vertex(v);
    }

    graph
}

/// Wrapper that prints the graph in DOT format when debug formatted, which
/// makes failing property tests easier to inspect.
#[derive(Clone, PartialEq, Eq)]
pub struct AsDot<V> {
    graph: Graph<V>,
}

impl<V> AsDot<V> {
    pub fn new(graph: Graph<V>) -> Self {
        Self { graph }
    }

    pub fn into_inner(self) -> Graph<V> {
        self.graph
    }
}

impl<V> fmt::Debug for AsDot<V>
where
    V: Ord + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dot = Dot::new(None, |v: &V| format!("{v:?}")).to_string(&self.graph);
        f.write_str(&dot)
    }
}

impl<V> Deref for AsDot<V> {
    type Target = Graph<V>;

    fn deref(&self) -> &Self::Target {
        &self.graph
    }
}

impl<V> DerefMut for AsDot<V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.graph
    }
}

impl<V> From<Graph<V>> for AsDot<V> {
    fn from(graph: Graph<V>) -> Self {
        Self::new(graph)
    }
}

/// Position of a vertex in the ascending vertex order, modulo the vertex
/// count at the time of use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }

    pub fn resolve<V>(&self, graph: &Graph<V>) -> Option<V>
    where
        V: Ord + Hash + Clone,
    {
        let index = self.get(graph.vertex_count())?;
        graph.vertices().nth(index).cloned()
    }
}

/// A mutation of a [`Graph`], with existing vertices referred to by
/// [`Index`] so that randomly generated operations mostly hit valid
/// arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum MutOp<V> {
    AddVertex(V),
    AddVertexSet(Vec<V>),
    AddAttachedVertex(V, Vec<Index>),
    RemoveVertex(Index),
    RemoveVertexSet(Vec<Index>),
    IsolateVertex(Index),
    Clear,
    AddEdge(Index, Index),
    AddEdgeSet(Index, Vec<Index>),
    RemoveEdge(Index, Index),
    RemoveEdgeSet(Index, Vec<Index>),
}

impl<V> MutOp<V>
where
    V: Ord + Hash + Clone,
{
    /// Applies the operation to the graph. Operations that refer to existing
    /// vertices do nothing on an empty graph.
    pub fn apply(self, graph: &mut Graph<V>) -> Result<(), GraphError<V>> {
        match self {
            MutOp::AddVertex(vertex) => graph.add_vertex(vertex),
            MutOp::AddVertexSet(vertices) => graph.add_vertex_set(vertices),
            MutOp::AddAttachedVertex(vertex, neighbors) => {
                let neighbors = resolve_all(graph, neighbors);
                graph.add_attached_vertex(vertex, neighbors)
            }
            MutOp::RemoveVertex(index) => match index.resolve(graph) {
                Some(vertex) => graph.remove_vertex(&vertex),
                None => Ok(()),
            },
            MutOp::RemoveVertexSet(indices) => {
                let vertices = resolve_all(graph, indices);
                graph.remove_vertex_set(vertices)
            }
            MutOp::IsolateVertex(index) => match index.resolve(graph) {
                Some(vertex) => graph.isolate_vertex(&vertex),
                None => Ok(()),
            },
            MutOp::Clear => {
                graph.clear();
                Ok(())
            }
            MutOp::AddEdge(src, dst) => match (src.resolve(graph), dst.resolve(graph)) {
                (Some(src), Some(dst)) => graph.add_edge(&src, &dst),
                _ => Ok(()),
            },
            MutOp::AddEdgeSet(src, dsts) => match src.resolve(graph) {
                Some(src) => {
                    let dsts = resolve_all(graph, dsts);
                    graph.add_edge_set(&src, dsts)
                }
                None => Ok(()),
            },
            MutOp::RemoveEdge(src, dst) => match (src.resolve(graph), dst.resolve(graph)) {
                (Some(src), Some(dst)) => graph.remove_edge(&src, &dst),
                _ => Ok(()),
            },
            MutOp::RemoveEdgeSet(src, dsts) => match src.resolve(graph) {
                Some(src) => {
                    let dsts = resolve_all(graph, dsts);
                    graph.remove_edge_set(&src, dsts)
                }
                None => Ok(()),
            },
        }
    }
}

fn resolve_all<V>(graph: &Graph<V>, indices: Vec<Index>) -> Vec<V>
where
    V: Ord + Hash + Clone,
{
    indices
        .iter()
        .filter_map(|index| index.resolve(graph))
        .collect()
}
