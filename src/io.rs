//! Loading graphs from adjacency list files.
//!
//! Each non-blank line names a vertex, optionally followed by its neighbors:
//!
//! ```text
//! Alice: Bob Carol
//! Bob - Alice
//! Carol:Alice
//! Dave
//! ```
//!
//! Fields are separated by any mix of whitespace, `-` and `:`, and empty
//! fields are ignored. A vertex that appears on several lines collects the
//! neighbors of all of them.
//!
//! There are two ways to turn the lists into a graph. [`read_graph`] builds
//! the graph in bulk and requires the lists to be symmetric, so every edge
//! must be listed by both of its endpoints. [`read_and_fill`] adds the
//! vertices first and then the edges one by one, skipping edges that are
//! already present, so listing an edge on one side is enough.

use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use log::{debug, info};
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{core::GraphError, graph::Graph};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read graph: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Graph {
        line: usize,
        source: GraphError<String>,
    },

    #[error("invalid graph: {0}")]
    Build(#[source] GraphError<String>),
}

/// How to build the graph from the adjacency lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// See [`read_graph`].
    #[default]
    Bulk,
    /// See [`read_and_fill`].
    Incremental,
}

/// Vertices in order of first appearance with their neighbors, paired by
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyLists {
    pub vertices: Vec<String>,
    pub adjacency: Vec<BTreeSet<String>>,
    /// One-based number of the line where each vertex first appeared.
    pub lines: Vec<usize>,
}

impl AdjacencyLists {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push<I>(
        &mut self,
        vertex: &str,
        neighbors: I,
        line: usize,
        positions: &mut FxHashMap<String, usize>,
    ) where
        I: Iterator<Item = String>,
    {
        let position = *positions.entry(vertex.to_owned()).or_insert_with(|| {
            self.vertices.push(vertex.to_owned());
            self.adjacency.push(BTreeSet::new());
            self.lines.push(line);
            self.vertices.len() - 1
        });

        self.adjacency[position].extend(neighbors);
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == ':'
}

pub fn parse_adjacency<R: BufRead>(reader: R) -> io::Result<AdjacencyLists> {
    let mut lists = AdjacencyLists::default();
    let mut positions = FxHashMap::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split(is_separator).filter(|field| !field.is_empty());

        if let Some(vertex) = fields.next() {
            lists.push(vertex, fields.map(str::to_owned), index + 1, &mut positions);
        }
    }

    debug!(
        "parsed adjacency lists of {} vertices with {} neighbor entries",
        lists.len(),
        lists.adjacency.iter().map(BTreeSet::len).sum::<usize>()
    );

    Ok(lists)
}

/// Reads the adjacency lists and builds the graph in bulk.
pub fn read_graph<R: BufRead>(reader: R) -> Result<Graph<String>, LoadError> {
    let lists = parse_adjacency(reader)?;
    Graph::from_adjacency(lists.vertices, lists.adjacency).map_err(LoadError::Build)
}

/// Reads the adjacency lists and adds their vertices and edges to the graph.
///
/// The graph is left untouched if loading fails.
pub fn read_and_fill<R: BufRead>(graph: &mut Graph<String>, reader: R) -> Result<(), LoadError> {
    let lists = parse_adjacency(reader)?;
    let mut filled = graph.clone();

    filled
        .add_vertex_set(lists.vertices.iter().cloned())
        .map_err(|source| {
            // The only possible failure is a vertex that is already in the
            // graph, so report the line that introduces it.
            let line = match &source {
                GraphError::DuplicateVertex(vertex) => lists
                    .vertices
                    .iter()
                    .position(|v| v == vertex)
                    .map_or(0, |position| lists.lines[position]),
                _ => 0,
            };
            LoadError::Graph { line, source }
        })?;

    let rows = lists.vertices.iter().zip(&lists.adjacency).zip(&lists.lines);

    for ((vertex, neighbors), &line) in rows {
        for neighbor in neighbors {
            let exists = filled
                .contains_edge(neighbor, vertex)
                .map_err(|source| LoadError::Graph { line, source })?;

            if !exists {
                filled
                    .add_edge(neighbor, vertex)
                    .map_err(|source| LoadError::Graph { line, source })?;
            }
        }
    }

    *graph = filled;
    Ok(())
}

pub fn load_file<P: AsRef<Path>>(path: P, mode: LoadMode) -> Result<Graph<String>, LoadError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let graph = match mode {
        LoadMode::Bulk => read_graph(reader)?,
        LoadMode::Incremental => {
            let mut graph = Graph::new();
            read_and_fill(&mut graph, reader)?;
            graph
        }
    };

    info!(
        "loaded {} ({:?}): {} vertices, {} edges",
        path.display(),
        mode,
        graph.vertex_count(),
        graph.edge_count()
    );

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use assert_matches::assert_matches;

    use crate::core::InvalidArgumentKind;

    use super::*;

    const SYMMETRIC: &str = "Alice: Bob Carol\n\nBob - Alice\nCarol:Alice\nDave\n";
    const ONE_SIDED: &str = "Alice: Bob Carol\nBob\nCarol: Bob\nDave\n";

    fn names(vertices: &[&str]) -> Vec<String> {
        vertices.iter().map(|v| v.to_string()).collect()
    }

    fn set(vertices: &[&str]) -> BTreeSet<String> {
        vertices.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parse_separators() {
        let lists = parse_adjacency(Cursor::new(SYMMETRIC)).unwrap();

        assert_eq!(lists.vertices, names(&["Alice", "Bob", "Carol", "Dave"]));
        assert_eq!(
            lists.adjacency,
            vec![
                set(&["Bob", "Carol"]),
                set(&["Alice"]),
                set(&["Alice"]),
                set(&[])
            ]
        );
        assert_eq!(lists.lines, vec![1, 3, 4, 5]);
    }

    #[test]
    fn parse_empty_fields() {
        let lists = parse_adjacency(Cursor::new("  A ::  B--C \n \t \n")).unwrap();

        assert_eq!(lists.vertices, names(&["A"]));
        assert_eq!(lists.adjacency, vec![set(&["B", "C"])]);
    }

    #[test]
    fn parse_repeated_vertex_merges() {
        let lists = parse_adjacency(Cursor::new("A: B\nB: A C\nA: C\nC: A B\n")).unwrap();

        assert_eq!(lists.vertices, names(&["A", "B", "C"]));
        assert_eq!(lists.adjacency[0], set(&["B", "C"]));
        assert_eq!(lists.lines, vec![1, 2, 4]);
    }

    #[test]
    fn read_graph_bulk() {
        let graph = read_graph(Cursor::new(SYMMETRIC)).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(
            graph.contains_edge(&"Carol".to_string(), &"Alice".to_string()),
            Ok(true)
        );
    }

    #[test]
    fn read_graph_requires_symmetry() {
        assert_matches!(
            read_graph(Cursor::new(ONE_SIDED)),
            Err(LoadError::Build(GraphError::InvalidArgument(
                InvalidArgumentKind::AsymmetricAdjacency
            )))
        );
    }

    #[test]
    fn read_and_fill_one_sided() {
        let mut graph = Graph::new();
        read_and_fill(&mut graph, Cursor::new(ONE_SIDED)).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.degree(&"Bob".to_string()), Ok(2));
    }

    #[test]
    fn bulk_and_incremental_agree() {
        let bulk = read_graph(Cursor::new(SYMMETRIC)).unwrap();

        let mut incremental = Graph::new();
        read_and_fill(&mut incremental, Cursor::new(SYMMETRIC)).unwrap();

        assert_eq!(bulk, incremental);
    }

    #[test]
    fn read_and_fill_unknown_neighbor() {
        let mut graph = Graph::new();

        assert_matches!(
            read_and_fill(&mut graph, Cursor::new("A: B\nB: X\n")),
            Err(LoadError::Graph { line: 2, source: GraphError::UnknownVertex(vertex) }) if vertex == "X"
        );
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn read_and_fill_self_loop() {
        let mut graph = Graph::new();

        assert_matches!(
            read_and_fill(&mut graph, Cursor::new("A: B\nB: B\n")),
            Err(LoadError::Graph { line: 2, source: GraphError::SelfLoop(_) })
        );
    }

    #[test]
    fn read_and_fill_existing_vertex() {
        let mut graph = Graph::new();
        graph.add_vertex("B".to_string()).unwrap();

        assert_matches!(
            read_and_fill(&mut graph, Cursor::new("A\nB: A\n")),
            Err(LoadError::Graph { line: 2, source: GraphError::DuplicateVertex(_) })
        );
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SYMMETRIC.as_bytes()).unwrap();

        let bulk = load_file(file.path(), LoadMode::Bulk).unwrap();
        let incremental = load_file(file.path(), LoadMode::Incremental).unwrap();

        assert_eq!(bulk, incremental);
        assert_eq!(bulk.edge_count(), 2);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert_matches!(
            load_file(dir.path().join("missing.txt"), LoadMode::Bulk),
            Err(LoadError::Io(_))
        );
    }
}
