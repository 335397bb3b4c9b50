//! Interactive console over graphs loaded from adjacency list files.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::Env;
use log::info;

use sociograph::console::{self, Session};
use sociograph::io::{load_file, LoadError, LoadMode};

#[derive(Parser)]
#[command(
    name = "sociograph",
    about = "Explore undirected graphs, such as social networks, from the command line"
)]
struct Cli {
    /// Adjacency list files to load, each named by its file stem
    files: Vec<PathBuf>,

    /// Add vertices and edges one by one instead of requiring symmetric lists
    #[arg(long)]
    incremental: bool,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn graph_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    let mode = if cli.incremental {
        LoadMode::Incremental
    } else {
        LoadMode::Bulk
    };

    let mut session = Session::new();

    for path in cli.files.iter() {
        match load_file(path, mode) {
            Ok(graph) => session.insert(graph_name(path), graph),
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                let code = match e {
                    LoadError::Io(_) => 1,
                    LoadError::Graph { .. } | LoadError::Build(_) => 2,
                };
                process::exit(code);
            }
        }
    }

    info!("starting console with {} graphs", cli.files.len());

    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout());

    if let Err(e) = console::run(&mut session, stdin.lock(), &mut stdout) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
