#![allow(dead_code)]

use fastrand::Rng;

pub const RANDOM_SEED: u64 = 0x5c1a17e4b3d2f019;

/// Random edges of a graph on `0..n` vertices, each pair included with
/// probability `p`. Skips over excluded pairs geometrically instead of
/// rolling a die for every pair.
pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_bound: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_bound,
            p,
        }
    }

    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        let Self { v, w, .. } = self;
        let n = self.n;
        let p = self.p;

        if *v >= n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

        while *w >= *v && *v < n {
            *w -= *v;
            *v += 1;
        }

        if *v < n { Some((*v, *w)) } else { None }
    }
}

pub fn sociograph_random(vertex_count: usize, density: f32, rng: &mut Rng) -> sociograph::Graph<u32> {
    let mut graph = sociograph::Graph::new();
    graph
        .add_vertex_set(0..vertex_count as u32)
        .expect("vertices are distinct");

    let mut edges = RandomEdges::new(vertex_count, density);

    while let Some((u, v)) = edges.next_edge(rng) {
        graph
            .add_edge(&(u as u32), &(v as u32))
            .expect("edges are distinct");
    }

    graph
}

pub fn petgraph_random(vertex_count: usize, density: f32, rng: &mut Rng) -> petgraph::graph::UnGraph<u32, ()> {
    let mut graph = petgraph::graph::UnGraph::with_capacity(vertex_count, 0);

    for u in 0..vertex_count {
        graph.add_node(u as u32);
    }

    let mut edges = RandomEdges::new(vertex_count, density);

    while let Some((u, v)) = edges.next_edge(rng) {
        graph.add_edge(
            petgraph::graph::NodeIndex::new(u),
            petgraph::graph::NodeIndex::new(v),
            (),
        );
    }

    graph
}
