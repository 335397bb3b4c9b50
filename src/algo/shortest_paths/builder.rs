use crate::core::{GraphBase, Neighbors, VertexSet};

use super::{bfs::bfs, Error, ShortestPaths};

/// Builder for [`ShortestPaths`].
pub struct ShortestPathsBuilder<'a, G>
where
    G: GraphBase,
{
    graph: &'a G,
    goal: Option<G::Vertex>,
}

impl<G> ShortestPaths<G>
where
    G: GraphBase,
{
    /// Starts building the algorithm on the given graph.
    pub fn on(graph: &G) -> ShortestPathsBuilder<'_, G> {
        ShortestPathsBuilder { graph, goal: None }
    }
}

impl<'a, G> ShortestPathsBuilder<'a, G>
where
    G: GraphBase,
{
    /// Stops the search as soon as the goal is reached.
    pub fn goal(self, goal: G::Vertex) -> Self {
        Self {
            goal: Some(goal),
            ..self
        }
    }

    /// Runs the search from the given source vertex.
    pub fn run(self, source: G::Vertex) -> Result<ShortestPaths<G>, Error<G::Vertex>>
    where
        G: VertexSet + Neighbors,
    {
        let ShortestPathsBuilder { graph, goal } = self;

        if !graph.contains_vertex(&source) {
            return Err(Error::SourceAbsent(source));
        }

        if let Some(goal) = goal.as_ref() {
            if !graph.contains_vertex(goal) {
                return Err(Error::GoalAbsent(goal.clone()));
            }
        }

        Ok(bfs(graph, source, goal))
    }
}
