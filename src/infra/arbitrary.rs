use std::{fmt, hash::Hash};

use arbitrary::{Arbitrary, Unstructured};

use crate::graph::Graph;

use super::testing::{Index, MutOp};

pub struct MutOpsSeq<V>(pub Vec<MutOp<V>>);

impl<V> IntoIterator for MutOpsSeq<V> {
    type Item = MutOp<V>;
    type IntoIter = std::vec::IntoIter<MutOp<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V> MutOpsSeq<V>
where
    V: Ord + Hash + Clone + fmt::Debug,
{
    /// Applies the operations while printing the equivalent calls on the
    /// graph, with indices resolved to vertices.
    pub fn replay(self, graph: &mut Graph<V>) {
        println!("let mut graph = Graph::new();");
        println!();

        for op in self {
            let view: &Graph<V> = graph;
            let resolve = |index: &Index| index.resolve(view);
            let resolve_all = |indices: &[Index]| {
                indices
                    .iter()
                    .filter_map(|index| index.resolve(view))
                    .collect::<Vec<_>>()
            };

            match &op {
                MutOp::AddVertex(vertex) => println!("graph.add_vertex({vertex:?});"),
                MutOp::AddVertexSet(vertices) => println!("graph.add_vertex_set({vertices:?});"),
                MutOp::AddAttachedVertex(vertex, neighbors) => println!(
                    "graph.add_attached_vertex({vertex:?}, {:?});",
                    resolve_all(neighbors)
                ),
                MutOp::RemoveVertex(index) => {
                    println!("graph.remove_vertex(&{:?});", resolve(index))
                }
                MutOp::RemoveVertexSet(indices) => {
                    println!("graph.remove_vertex_set({:?});", resolve_all(indices))
                }
                MutOp::IsolateVertex(index) => {
                    println!("graph.isolate_vertex(&{:?});", resolve(index))
                }
                MutOp::Clear => println!("graph.clear();"),
                MutOp::AddEdge(src, dst) => {
                    println!("graph.add_edge(&{:?}, &{:?});", resolve(src), resolve(dst))
                }
                MutOp::AddEdgeSet(src, dsts) => println!(
                    "graph.add_edge_set(&{:?}, {:?});",
                    resolve(src),
                    resolve_all(dsts)
                ),
                MutOp::RemoveEdge(src, dst) => {
                    println!("graph.remove_edge(&{:?}, &{:?});", resolve(src), resolve(dst))
                }
                MutOp::RemoveEdgeSet(src, dsts) => println!(
                    "graph.remove_edge_set(&{:?}, {:?});",
                    resolve(src),
                    resolve_all(dsts)
                ),
            }

            let _ = op.apply(graph);
        }

        println!();
        println!("check_consistency(graph.storage()).unwrap();");
    }
}

impl<V: fmt::Debug> fmt::Debug for MutOpsSeq<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut graph);")?;
        writeln!(f)?;
        writeln!(f, "// use `cargo test fuzz_replay_mut_ops_seq`")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OpKind {
    AddVertex,
    AddVertexSet,
    AddAttachedVertex,
    RemoveVertex,
    RemoveVertexSet,
    IsolateVertex,
    Clear,
    AddEdge,
    AddEdgeSet,
    RemoveEdge,
    RemoveEdgeSet,
}

impl<'a, V> Arbitrary<'a> for MutOpsSeq<V>
where
    V: Arbitrary<'a>,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let total = u.len();
        let mut seq = Vec::new();

        while !u.is_empty() {
            let progress = (total - u.len()) as f64 / total as f64;

            let op = match arbitrary_op(u, progress) {
                Ok(op) => op,
                Err(_) => break,
            };

            seq.push(op);
        }

        Ok(MutOpsSeq(seq))
    }
}

fn arbitrary_op<'a, V>(u: &mut Unstructured<'a>, progress: f64) -> arbitrary::Result<MutOp<V>>
where
    V: Arbitrary<'a>,
{
    // Growing operations dominate at the beginning of the sequence and
    // shrinking operations catch up towards its end. Clearing should be rare
    // operation.
    let grow = non_linear_decrease(progress);
    let shrink = 1.0 - grow;

    u.choose_weighted(
        &[
            OpKind::AddVertex,
            OpKind::AddVertexSet,
            OpKind::AddAttachedVertex,
            OpKind::AddEdge,
            OpKind::AddEdgeSet,
            OpKind::RemoveVertex,
            OpKind::RemoveVertexSet,
            OpKind::IsolateVertex,
            OpKind::RemoveEdge,
            OpKind::RemoveEdgeSet,
            OpKind::Clear,
        ],
        &[
            grow,
            grow * 0.25,
            grow * 0.25,
            grow,
            grow * 0.5,
            shrink * 0.25,
            shrink * 0.1,
            shrink * 0.1,
            shrink * 0.5,
            shrink * 0.2,
            0.01,
        ],
    )
    .and_then(|kind| match kind {
        OpKind::AddVertex => Ok(MutOp::AddVertex(u.arbitrary()?)),
        OpKind::AddVertexSet => Ok(MutOp::AddVertexSet(u.arbitrary()?)),
        OpKind::AddAttachedVertex => Ok(MutOp::AddAttachedVertex(
            u.arbitrary()?,
            u.arbitrary()?,
        )),
        OpKind::RemoveVertex => Ok(MutOp::RemoveVertex(u.arbitrary()?)),
        OpKind::RemoveVertexSet => Ok(MutOp::RemoveVertexSet(u.arbitrary()?)),
        OpKind::IsolateVertex => Ok(MutOp::IsolateVertex(u.arbitrary()?)),
        OpKind::Clear => Ok(MutOp::Clear),
        OpKind::AddEdge => Ok(MutOp::AddEdge(u.arbitrary()?, u.arbitrary()?)),
        OpKind::AddEdgeSet => Ok(MutOp::AddEdgeSet(u.arbitrary()?, u.arbitrary()?)),
        OpKind::RemoveEdge => Ok(MutOp::RemoveEdge(u.arbitrary()?, u.arbitrary()?)),
        OpKind::RemoveEdgeSet => Ok(MutOp::RemoveEdgeSet(u.arbitrary()?, u.arbitrary()?)),
    })
}

trait UnstructuredExt {
    fn nice_f64(&mut self) -> arbitrary::Result<f64>;
    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T>;
}

impl<'a> UnstructuredExt for Unstructured<'a> {
    fn nice_f64(&mut self) -> arbitrary::Result<f64> {
        const RESOLUTION: u8 = 100;
        let int = self.int_in_range(0..=RESOLUTION)?;
        Ok(int as f64 / RESOLUTION as f64)
    }

    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T> {
        if choices.is_empty() || choices.len() != weights.len() {
            return Err(arbitrary::Error::EmptyChoose);
        }

        let weight_sum = weights.iter().copied().sum::<f64>();
        let bound = self.nice_f64()? * weight_sum;

        let mut acc = 0.0;
        for (choice, weight) in choices.iter().zip(weights.iter().copied()) {
            acc += weight;

            if acc >= bound {
                return Ok(choice);
            }
        }

        // Rounding errors can leave the bound slightly above the final sum.
        Ok(&choices[choices.len() - 1])
    }
}

// f(0) = 1, f(1) ~= 0.152
fn non_linear_decrease(x: f64) -> f64 {
    1.0 / (x + 1.0).powf(std::f64::consts::E)
}
