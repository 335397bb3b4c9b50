//! Interactive console over a set of named graphs.
//!
//! A [`Session`] holds the loaded graphs and the one that commands currently
//! operate on. Each input line is parsed into a [`Command`] and executed
//! against the session. Failures are reported to the output and the session
//! goes on, only `quit` or the end of the input ends it.
//!
//! ```
//! use std::io::Cursor;
//!
//! use sociograph::console::{run, Session};
//!
//! let mut session = Session::new();
//! let input = "new people\nadd-vertices Alice Bob Carol\nadd-edges Bob Alice Carol\npair Alice Carol\n";
//! let mut out = Vec::new();
//!
//! run(&mut session, Cursor::new(input), &mut out).unwrap();
//!
//! let out = String::from_utf8(out).unwrap();
//! assert!(out.contains("distance: 2"));
//! assert!(out.contains("path: Alice -> Bob -> Carol"));
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufRead, BufWriter, Write},
    path::PathBuf,
    str::{FromStr, SplitWhitespace},
};

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    algo::ShortestPaths,
    core::GraphError,
    graph::Graph,
    infra::export::{Arbor, Dot, Export},
    io::{load_file, LoadError, LoadMode},
};

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Graph(#[from] GraphError<String>),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown command `{0}`, type `help` for the list of commands")]
    UnknownCommand(String),

    #[error("`{command}` is missing argument {argument}")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    #[error("`{command}` does not take argument `{argument}`")]
    UnexpectedArgument { command: String, argument: String },

    #[error("unknown graph `{0}`")]
    UnknownGraph(String),

    #[error("no graph selected, use `load` or `new` first")]
    NoGraphSelected,

    #[error("invalid argument `{argument}`, expected {expected}")]
    InvalidArgument {
        argument: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Dot,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Graphs,
    Use(String),
    New(String),
    Load {
        name: String,
        path: PathBuf,
        mode: LoadMode,
    },
    Info,
    Show,
    Vertex(String),
    Pair(String, String),
    HasVertex(String),
    HasEdge(String, String),
    AddVertex(String),
    AddVertices(Vec<String>),
    AddAttached(String, Vec<String>),
    RemoveVertex(String),
    RemoveVertices(Vec<String>),
    Isolate(String),
    AddEdge(String, String),
    AddEdges(String, Vec<String>),
    RemoveEdge(String, String),
    RemoveEdges(String, Vec<String>),
    Clear,
    Equal(String, String),
    Export { path: PathBuf, format: ExportFormat },
}

const HELP: &str = "\
graphs                         list loaded graphs
use NAME                       operate on graph NAME
new NAME                       create an empty graph
load NAME PATH [bulk|incremental]
                               load a graph from an adjacency list file
info                           counts, diameter and vertices
show                           adjacency lists
vertex V                       degree, neighbors and eccentricity of V
pair V W                       distance, shortest path and common neighbors
has-vertex V                   whether V exists
has-edge V W                   whether V and W are connected
add-vertex V                   add isolated vertex
add-vertices V...              add isolated vertices
add-attached V W...            add vertex V connected to W...
remove-vertex V                remove vertex and its edges
remove-vertices V...           remove vertices and their edges
isolate V                      remove all edges of V
add-edge V W                   connect V and W
add-edges V W...               connect V to each of W...
remove-edge V W                disconnect V and W
remove-edges V W...            disconnect V from each of W...
clear                          remove everything
equal A B                      compare graphs A and B
export PATH [dot|html]         write the graph for visualization
help                           this message
quit                           end the session
";

struct Args<'a> {
    command: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn required(&mut self, argument: &'static str) -> Result<String, ConsoleError> {
        self.tokens
            .next()
            .map(str::to_owned)
            .ok_or_else(|| ConsoleError::MissingArgument {
                command: self.command.to_owned(),
                argument,
            })
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    fn rest(&mut self) -> Vec<String> {
        self.tokens.by_ref().map(str::to_owned).collect()
    }

    fn finish<T>(mut self, value: T) -> Result<T, ConsoleError> {
        match self.tokens.next() {
            Some(argument) => Err(ConsoleError::UnexpectedArgument {
                command: self.command.to_owned(),
                argument: argument.to_owned(),
            }),
            None => Ok(value),
        }
    }
}

impl FromStr for Command {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().unwrap_or_default();
        let mut args = Args { command, tokens };

        let parsed = match command {
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "graphs" => Command::Graphs,
            "use" => Command::Use(args.required("NAME")?),
            "new" => Command::New(args.required("NAME")?),
            "load" => {
                let name = args.required("NAME")?;
                let path = args.required("PATH")?.into();
                let mode = match args.optional() {
                    None | Some("bulk") => LoadMode::Bulk,
                    Some("incremental") => LoadMode::Incremental,
                    Some(other) => {
                        return Err(ConsoleError::InvalidArgument {
                            argument: other.to_owned(),
                            expected: "`bulk` or `incremental`",
                        })
                    }
                };
                Command::Load { name, path, mode }
            }
            "info" => Command::Info,
            "show" => Command::Show,
            "vertex" => Command::Vertex(args.required("V")?),
            "pair" => Command::Pair(args.required("V")?, args.required("W")?),
            "has-vertex" => Command::HasVertex(args.required("V")?),
            "has-edge" => Command::HasEdge(args.required("V")?, args.required("W")?),
            "add-vertex" => Command::AddVertex(args.required("V")?),
            "add-vertices" => Command::AddVertices(args.rest()),
            "add-attached" => {
                let vertex = args.required("V")?;
                Command::AddAttached(vertex, args.rest())
            }
            "remove-vertex" => Command::RemoveVertex(args.required("V")?),
            "remove-vertices" => Command::RemoveVertices(args.rest()),
            "isolate" => Command::Isolate(args.required("V")?),
            "add-edge" => Command::AddEdge(args.required("V")?, args.required("W")?),
            "add-edges" => {
                let src = args.required("V")?;
                Command::AddEdges(src, args.rest())
            }
            "remove-edge" => Command::RemoveEdge(args.required("V")?, args.required("W")?),
            "remove-edges" => {
                let src = args.required("V")?;
                Command::RemoveEdges(src, args.rest())
            }
            "clear" => Command::Clear,
            "equal" => Command::Equal(args.required("A")?, args.required("B")?),
            "export" => {
                let path = args.required("PATH")?.into();
                let format = match args.optional() {
                    None | Some("dot") => ExportFormat::Dot,
                    Some("html") => ExportFormat::Html,
                    Some(other) => {
                        return Err(ConsoleError::InvalidArgument {
                            argument: other.to_owned(),
                            expected: "`dot` or `html`",
                        })
                    }
                };
                Command::Export { path, format }
            }
            other => return Err(ConsoleError::UnknownCommand(other.to_owned())),
        };

        args.finish(parsed)
    }
}

/// Whether the session should go on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Default)]
pub struct Session {
    graphs: BTreeMap<String, Graph<String>>,
    current: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the graph under the name, replacing any graph of the same name.
    /// The first graph added to the session becomes the current one.
    pub fn insert(&mut self, name: impl Into<String>, graph: Graph<String>) {
        let name = name.into();

        if self.current.is_none() {
            self.current = Some(name.clone());
        }

        self.graphs.insert(name, graph);
    }

    pub fn select(&mut self, name: &str) -> Result<(), ConsoleError> {
        if !self.graphs.contains_key(name) {
            return Err(ConsoleError::UnknownGraph(name.to_owned()));
        }

        self.current = Some(name.to_owned());
        Ok(())
    }

    pub fn graph(&self, name: &str) -> Option<&Graph<String>> {
        self.graphs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.graphs.keys().map(String::as_str)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Result<&Graph<String>, ConsoleError> {
        self.current
            .as_ref()
            .and_then(|name| self.graphs.get(name))
            .ok_or(ConsoleError::NoGraphSelected)
    }

    fn current_mut(&mut self) -> Result<&mut Graph<String>, ConsoleError> {
        self.current
            .as_ref()
            .and_then(|name| self.graphs.get_mut(name))
            .ok_or(ConsoleError::NoGraphSelected)
    }

    fn named(&self, name: &str) -> Result<&Graph<String>, ConsoleError> {
        self.graphs
            .get(name)
            .ok_or_else(|| ConsoleError::UnknownGraph(name.to_owned()))
    }

    /// Applies a mutation to the current graph and reports its size.
    fn mutate<W, F>(&mut self, out: &mut W, f: F) -> Result<(), ConsoleError>
    where
        W: Write,
        F: FnOnce(&mut Graph<String>) -> Result<(), GraphError<String>>,
    {
        let graph = self.current_mut()?;
        f(graph)?;

        writeln!(
            out,
            "ok: {} vertices, {} edges",
            graph.vertex_count(),
            graph.edge_count()
        )?;
        Ok(())
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, ConsoleError> {
        debug!("executing {command:?}");

        match command {
            Command::Help => out.write_all(HELP.as_bytes())?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Graphs => {
                for name in self.names() {
                    let marker = if Some(name) == self.current_name() { '*' } else { ' ' };
                    writeln!(out, "{marker} {name}")?;
                }
            }
            Command::Use(name) => self.select(&name)?,
            Command::New(name) => {
                self.insert(name.clone(), Graph::new());
                self.select(&name)?;
            }
            Command::Load { name, path, mode } => {
                let graph = load_file(&path, mode)?;
                writeln!(
                    out,
                    "loaded {name}: {} vertices, {} edges",
                    graph.vertex_count(),
                    graph.edge_count()
                )?;
                self.insert(name.clone(), graph);
                self.select(&name)?;
            }
            Command::Info => write_info(self.current()?, out)?,
            Command::Show => write!(out, "{}", self.current()?)?,
            Command::Vertex(vertex) => {
                let graph = self.current()?;

                writeln!(out, "degree: {}", graph.degree(&vertex)?)?;
                writeln!(out, "neighbors: {}", join(graph.neighbors(&vertex)?, " "))?;
                writeln!(out, "eccentricity: {}", graph.eccentricity(&vertex)?)?;
            }
            Command::Pair(src, dst) => {
                let graph = self.current()?;
                let paths = ShortestPaths::on(graph.storage())
                    .goal(dst.clone())
                    .run(src.clone())
                    .map_err(GraphError::from)?;

                match paths.dist(&dst) {
                    Some(distance) => {
                        // Predecessors run from `dst` back to `src`.
                        let mut path = paths.reconstruct(dst.clone()).collect::<Vec<_>>();
                        path.reverse();
                        path.push(dst.clone());

                        writeln!(out, "distance: {distance}")?;
                        writeln!(out, "path: {}", join(&path, " -> "))?;
                    }
                    None => {
                        writeln!(out, "distance: -1")?;
                        writeln!(out, "path: none")?;
                    }
                }

                writeln!(
                    out,
                    "common neighbors: {}",
                    join(graph.common_neighbors(&src, &dst)?, " ")
                )?;
            }
            Command::HasVertex(vertex) => {
                writeln!(out, "{}", self.current()?.contains_vertex(&vertex))?;
            }
            Command::HasEdge(src, dst) => {
                writeln!(out, "{}", self.current()?.contains_edge(&src, &dst)?)?;
            }
            Command::AddVertex(vertex) => self.mutate(out, |g| g.add_vertex(vertex))?,
            Command::AddVertices(vertices) => self.mutate(out, |g| g.add_vertex_set(vertices))?,
            Command::AddAttached(vertex, neighbors) => {
                self.mutate(out, |g| g.add_attached_vertex(vertex, neighbors))?
            }
            Command::RemoveVertex(vertex) => self.mutate(out, |g| g.remove_vertex(&vertex))?,
            Command::RemoveVertices(vertices) => {
                self.mutate(out, |g| g.remove_vertex_set(vertices))?
            }
            Command::Isolate(vertex) => self.mutate(out, |g| g.isolate_vertex(&vertex))?,
            Command::AddEdge(src, dst) => self.mutate(out, |g| g.add_edge(&src, &dst))?,
            Command::AddEdges(src, dsts) => self.mutate(out, |g| g.add_edge_set(&src, dsts))?,
            Command::RemoveEdge(src, dst) => self.mutate(out, |g| g.remove_edge(&src, &dst))?,
            Command::RemoveEdges(src, dsts) => {
                self.mutate(out, |g| g.remove_edge_set(&src, dsts))?
            }
            Command::Clear => self.mutate(out, |g| {
                g.clear();
                Ok(())
            })?,
            Command::Equal(a, b) => {
                writeln!(out, "{}", self.named(&a)? == self.named(&b)?)?;
            }
            Command::Export { path, format } => {
                let graph = self.current()?;
                let name = self.current_name().unwrap_or_default().to_owned();
                let mut file = BufWriter::new(File::create(&path)?);

                match format {
                    ExportFormat::Dot => Dot::with_display(Some(name)).export(graph, &mut file)?,
                    ExportFormat::Html => Arbor::with_display(name).export(graph, &mut file)?,
                }

                file.flush()?;
                info!("exported graph to {}", path.display());
                writeln!(out, "written {}", path.display())?;
            }
        }

        Ok(Flow::Continue)
    }
}

fn join<'a, I>(items: I, separator: &str) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn write_info<W: Write>(graph: &Graph<String>, out: &mut W) -> io::Result<()> {
    writeln!(out, "vertices: {}", graph.vertex_count())?;
    writeln!(out, "edges: {}", graph.edge_count())?;
    writeln!(out, "diameter: {}", graph.diameter())?;

    let vertices = graph.vertices().collect::<Vec<_>>();

    for row in vertices.chunks(4) {
        let row = row
            .iter()
            .map(|vertex| format!("{vertex:<10}"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", row.trim_end())?;
    }

    Ok(())
}

/// Reads commands from the input until `quit` or its end.
///
/// Only failures of the input or output end the session. Command failures
/// are written to the output as `error: ...` lines.
pub fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}> ", session.current_name().unwrap_or_default())?;
        out.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = line
            .parse::<Command>()
            .and_then(|command| session.execute(command, out));

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(error) => {
                warn!("command `{}` failed: {error}", line.trim());
                writeln!(out, "error: {error}")?;
            }
        }
    }

    writeln!(out)?;
    Ok(())
}
