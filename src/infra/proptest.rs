use std::collections::BTreeSet;

use proptest::{
    prelude::*,
    strategy::{NewTree, ValueTree},
    test_runner::TestRunner,
};

use crate::graph::Graph;

use super::testing::{AsDot, Index, MutOp};

/// Strategy for random graphs with vertices labeled `0..n`.
pub fn graph_undirected() -> GraphStrategy {
    GraphStrategy::new()
}

/// Strategy for single [mutations](MutOp) with small vertex labels, so that
/// collisions with existing vertices are common.
pub fn mut_op() -> impl Strategy<Value = MutOp<u32>> {
    let vertex = || 0..16u32;
    let index = || any::<usize>().prop_map(Index);
    let indices = move || prop::collection::vec(index(), 0..4);

    let vertex_ops = prop_oneof![
        vertex().prop_map(MutOp::AddVertex),
        prop::collection::vec(vertex(), 0..4).prop_map(MutOp::AddVertexSet),
        (vertex(), indices()).prop_map(|(v, ns)| MutOp::AddAttachedVertex(v, ns)),
        index().prop_map(MutOp::RemoveVertex),
        indices().prop_map(MutOp::RemoveVertexSet),
        index().prop_map(MutOp::IsolateVertex),
        Just(MutOp::Clear),
    ];

    let edge_ops = prop_oneof![
        (index(), index()).prop_map(|(s, d)| MutOp::AddEdge(s, d)),
        (index(), indices()).prop_map(|(s, ds)| MutOp::AddEdgeSet(s, ds)),
        (index(), index()).prop_map(|(s, d)| MutOp::RemoveEdge(s, d)),
        (index(), indices()).prop_map(|(s, ds)| MutOp::RemoveEdgeSet(s, ds)),
    ];

    // Edges need vertices to land on, so vertex operations are not
    // outnumbered.
    prop_oneof![vertex_ops, edge_ops]
}

#[derive(Debug, Clone)]
pub struct GraphStrategy {
    params: StrategyParams,
}

macro_rules! delegate_builder_fn {
    ($name:ident$(, $param:ident: $param_type:ty)*) => {
        #[doc = concat!("See [StrategyParams::", stringify!($name), "](StrategyParams::", stringify!($name), ") for details.")]
        pub fn $name(self, $($param: $param_type),*) -> Self {
            Self {
                params: self.params.$name($($param,)*),
            }
        }
    }
}

impl GraphStrategy {
    pub fn new() -> Self {
        Self::with_params(StrategyParams::default())
    }

    pub fn with_params(params: StrategyParams) -> Self {
        Self { params }
    }

    // Builder pattern on the strategy itself to allow usage as in
    // `graph_undirected().max_size(100).connected()`.
    delegate_builder_fn!(max_size, max_size: usize);
    delegate_builder_fn!(connected);
    delegate_builder_fn!(density, density: f32);
    delegate_builder_fn!(sparse);
}

impl Default for GraphStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct StrategyParams {
    max_size: usize,
    connected: bool,
    // (0, 1] - 1 means no limitation in choosing p, lower values artificially
    // decrease chosen p
    density: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 32,
            connected: false,
            density: 1.0,
        }
    }
}

impl StrategyParams {
    pub fn max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    pub fn connected(self) -> Self {
        Self {
            connected: true,
            ..self
        }
    }

    pub fn density(self, density: f32) -> Self {
        assert!(
            density > 0.0 && density <= 1.0,
            "density must be in (0, 1] range"
        );
        Self { density, ..self }
    }

    pub fn sparse(self) -> Self {
        self.density(0.05)
    }
}

impl Strategy for GraphStrategy {
    type Tree = GraphValueTree;
    type Value = AsDot<u32>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let n = runner.rng().gen_range(0..=self.params.max_size);
        let p = runner.rng().gen::<f32>() * self.params.density;

        let mut edges = BTreeSet::new();

        for v in 1..n {
            for w in 0..v {
                if runner.rng().gen_bool(p as f64) {
                    edges.insert((w, v));
                }
            }
        }

        if self.params.connected {
            // Attaching every vertex to some earlier vertex yields a spanning
            // tree.
            for v in 1..n {
                let w = runner.rng().gen_range(0..v);
                edges.insert((w, v));
            }
        }

        Ok(GraphValueTree {
            vertex_count: n,
            edges: edges.into_iter().collect(),
            removed_vertices: BTreeSet::new(),
            removed_edges: BTreeSet::new(),
            next: Shrink::Vertex(0),
            last: None,
            // Removing vertices or edges can disconnect the graph.
            no_shrink: self.params.connected,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shrink {
    Vertex(usize),
    Edge(usize),
}

#[derive(Debug, Clone)]
pub struct GraphValueTree {
    vertex_count: usize,
    edges: Vec<(usize, usize)>,
    removed_vertices: BTreeSet<usize>,
    removed_edges: BTreeSet<usize>,
    next: Shrink,
    last: Option<Shrink>,
    no_shrink: bool,
}

impl ValueTree for GraphValueTree {
    type Value = AsDot<u32>;

    fn current(&self) -> Self::Value {
        // Remaining vertices are relabeled to keep the labels contiguous.
        let mut labels = vec![None; self.vertex_count];
        let mut next_label = 0u32;

        for (v, label) in labels.iter_mut().enumerate() {
            if !self.removed_vertices.contains(&v) {
                *label = Some(next_label);
                next_label += 1;
            }
        }

        let mut graph = Graph::new();
        graph
            .add_vertex_set(0..next_label)
            .expect("labels are distinct");

        for (e, &(src, dst)) in self.edges.iter().enumerate() {
            if self.removed_edges.contains(&e) {
                continue;
            }

            if let (Some(src), Some(dst)) = (labels[src], labels[dst]) {
                graph.add_edge(&src, &dst).expect("edges are distinct");
            }
        }

        AsDot::new(graph)
    }

    fn simplify(&mut self) -> bool {
        if self.no_shrink {
            return false;
        }

        // Vertices first, because removing a vertex also removes its edges,
        // then the remaining edges one by one.
        loop {
            match self.next {
                Shrink::Vertex(v) if v < self.vertex_count => {
                    self.next = Shrink::Vertex(v + 1);

                    if self.removed_vertices.insert(v) {
                        self.last = Some(Shrink::Vertex(v));
                        return true;
                    }
                }
                Shrink::Vertex(_) => self.next = Shrink::Edge(0),
                Shrink::Edge(e) if e < self.edges.len() => {
                    self.next = Shrink::Edge(e + 1);

                    let (src, dst) = self.edges[e];
                    let alive = !self.removed_vertices.contains(&src)
                        && !self.removed_vertices.contains(&dst);

                    if alive && self.removed_edges.insert(e) {
                        self.last = Some(Shrink::Edge(e));
                        return true;
                    }
                }
                Shrink::Edge(_) => return false,
            }
        }
    }

    fn complicate(&mut self) -> bool {
        match self.last.take() {
            Some(Shrink::Vertex(v)) => self.removed_vertices.remove(&v),
            Some(Shrink::Edge(e)) => self.removed_edges.remove(&e),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algo::ShortestPaths;

    use super::*;

    #[test]
    fn generated_graphs_respect_params() {
        let mut runner = TestRunner::deterministic();
        let strategy = graph_undirected().max_size(20);

        for _ in 0..32 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();

            assert!(graph.vertex_count() <= 20);
            assert!(graph
                .vertices()
                .copied()
                .eq(0..graph.vertex_count() as u32));
        }
    }

    #[test]
    fn connected_graphs_are_connected() {
        let mut runner = TestRunner::deterministic();
        let strategy = graph_undirected().max_size(20).sparse().connected();

        for _ in 0..32 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();

            if graph.vertex_count() > 0 {
                let paths = ShortestPaths::on(graph.storage()).run(0).unwrap();
                assert_eq!(paths.reached_count(), graph.vertex_count());
            }
        }
    }

    #[test]
    fn shrinking_removes_structure() {
        let mut runner = TestRunner::deterministic();
        let strategy = graph_undirected().max_size(12);

        let mut tree = strategy.new_tree(&mut runner).unwrap();
        while tree.current().vertex_count() == 0 {
            tree = strategy.new_tree(&mut runner).unwrap();
        }

        let initial = tree.current();

        assert!(tree.simplify());
        assert_eq!(tree.current().vertex_count(), initial.vertex_count() - 1);

        assert!(tree.complicate());
        assert_eq!(tree.current(), initial);

        // The restored vertex stays, everything else goes.
        while tree.simplify() {}
        assert_eq!(tree.current().vertex_count(), 1);
        assert_eq!(tree.current().edge_count(), 0);
    }
}
