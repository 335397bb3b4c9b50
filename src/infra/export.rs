use std::{
    fmt::Display,
    hash::Hash,
    io::{self, Cursor, Write},
};

use crate::{common::VertexIndexMap, core::Neighbors, graph::Graph};

pub trait Export<G> {
    fn export<W: Write>(&self, graph: &G, out: &mut W) -> io::Result<()>;
}

// Visits every edge once, as a pair of dense vertex indices with the smaller
// index first.
fn for_each_edge<V, F>(graph: &Graph<V>, indexer: &VertexIndexMap<'_, V>, mut f: F) -> io::Result<()>
where
    V: Ord + Hash + Clone,
    F: FnMut(usize, usize) -> io::Result<()>,
{
    for (u, vertex) in graph.vertices().enumerate() {
        for neighbor in graph.storage().neighbors(vertex) {
            match indexer.index_of(neighbor) {
                Some(v) if v > u => f(u, v)?,
                _ => {}
            }
        }
    }

    Ok(())
}

/// Exporter to the [Graphviz DOT] language.
///
/// [Graphviz DOT]: https://graphviz.org/doc/info/lang.html
pub struct Dot<V> {
    name: String,
    get_vertex_label: Box<dyn Fn(&V) -> String>,
}

impl<V> Dot<V> {
    pub fn new<FV>(name: Option<String>, get_vertex_label: FV) -> Self
    where
        FV: Fn(&V) -> String + 'static,
    {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_vertex_label: Box::new(get_vertex_label),
        }
    }

    pub fn to_string(&self, graph: &Graph<V>) -> String
    where
        V: Ord + Hash + Clone,
    {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }
}

impl<V: Display> Dot<V> {
    pub fn with_display(name: Option<String>) -> Self {
        Self::new(name, |v| format!("{v}"))
    }
}

impl<V> Export<Graph<V>> for Dot<V>
where
    V: Ord + Hash + Clone,
{
    fn export<W: Write>(&self, graph: &Graph<V>, out: &mut W) -> io::Result<()> {
        let indexer = VertexIndexMap::new(graph.vertices());

        writeln!(out, "graph {} {{", self.name)?;

        for (index, vertex) in graph.vertices().enumerate() {
            writeln!(
                out,
                "    v{} [label={:?}];",
                index,
                (self.get_vertex_label)(vertex)
            )?;
        }

        for_each_edge(graph, &indexer, |u, v| writeln!(out, "    v{u} -- v{v};"))?;

        writeln!(out, "}}")
    }
}

/// Exporter to an HTML page that draws the graph with the [arbor.js]
/// particle system.
///
/// The page expects `jquery.min.js`, `arbor.js`, `graphics.js` and
/// `renderer.js` next to it.
///
/// [arbor.js]: https://github.com/samizdatco/arbor
pub struct Arbor<V> {
    name: String,
    get_vertex_label: Box<dyn Fn(&V) -> String>,
}

impl<V> Arbor<V> {
    pub fn new<FV>(name: impl Into<String>, get_vertex_label: FV) -> Self
    where
        FV: Fn(&V) -> String + 'static,
    {
        Self {
            name: name.into(),
            get_vertex_label: Box::new(get_vertex_label),
        }
    }
}

impl<V: Display> Arbor<V> {
    pub fn with_display(name: impl Into<String>) -> Self {
        Self::new(name, |v| format!("{v}"))
    }
}

const ARBOR_SCRIPTS: [&str; 4] = ["jquery.min.js", "arbor.js", "graphics.js", "renderer.js"];

impl<V> Export<Graph<V>> for Arbor<V>
where
    V: Ord + Hash + Clone,
{
    fn export<W: Write>(&self, graph: &Graph<V>, out: &mut W) -> io::Result<()> {
        let indexer = VertexIndexMap::new(graph.vertices());

        writeln!(out, "<html><head>")?;
        for script in ARBOR_SCRIPTS {
            writeln!(
                out,
                "<script language=\"javascript\" type=\"text/javascript\" src=\"{script}\"></script>"
            )?;
        }
        writeln!(out, "</head><body>")?;
        writeln!(
            out,
            "<canvas id=\"viewport\" width=\"1200\" height=\"600\"></canvas>"
        )?;
        writeln!(out, "<script language=\"javascript\" type=\"text/javascript\">")?;
        writeln!(out, "var sys = arbor.ParticleSystem(30, 600, 0.6, true);")?;
        writeln!(out, "sys.parameters({{gravity:true}});")?;
        writeln!(out, "sys.renderer = Renderer(\"#viewport\");")?;

        writeln!(out, "var data = {{nodes:{{")?;
        for (index, vertex) in graph.vertices().enumerate() {
            writeln!(
                out,
                "v{}:{{'color':'blue','shape':'dot','label':{:?}}},",
                index,
                (self.get_vertex_label)(vertex)
            )?;
        }

        writeln!(out, "}},edges:{{")?;
        let mut current = None;
        for_each_edge(graph, &indexer, |u, v| {
            if current != Some(u) {
                if current.is_some() {
                    writeln!(out, "}},")?;
                }
                write!(out, "v{u}:{{")?;
                current = Some(u);
            }
            write!(out, "v{v}:{{}},")
        })?;
        if current.is_some() {
            writeln!(out, "}},")?;
        }

        writeln!(out, "}}}};sys.graft(data);</script>")?;
        writeln!(
            out,
            "<section id=\"info\"><p id='info_0' class='info'>GRAPH {}</p></section>",
            self.name
        )?;
        writeln!(out, "</body></html>")
    }
}
