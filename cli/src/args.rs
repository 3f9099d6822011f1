use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use graph_paths_core::Algorithm;

/// Shortest paths over weighted graph documents
#[derive(Parser, Debug)]
#[command(name = "graph-paths")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Maximum relaxation steps per solver run (0 = unbounded)
    #[arg(long, global = true, env = "GRAPH_PATHS_MAX_STEPS", default_value_t = 0)]
    pub max_steps: u64,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, e.g. `debug` or `graph_paths_core=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shortest path between two nodes
    Route {
        /// Graph document (JSON)
        file: PathBuf,

        /// Solver: dijkstra, astar or bellman-ford
        #[arg(long, short, value_parser = parse_algorithm, default_value = "dijkstra")]
        algorithm: Algorithm,

        /// Source node id
        #[arg(long)]
        from: String,

        /// Target node id
        #[arg(long)]
        to: String,

        #[command(flatten)]
        orientation: OrientationArgs,
    },

    /// Distance from one node to every node
    Distances {
        /// Graph document (JSON)
        file: PathBuf,

        /// Solver: dijkstra or bellman-ford
        #[arg(long, short, value_parser = parse_algorithm, default_value = "dijkstra")]
        algorithm: Algorithm,

        /// Source node id
        #[arg(long)]
        from: String,

        #[command(flatten)]
        orientation: OrientationArgs,
    },

    /// Summarize a graph document as the solvers will see it
    Stats {
        /// Graph document (JSON)
        file: PathBuf,

        #[command(flatten)]
        orientation: OrientationArgs,
    },
}

/// Orientation override. Without either flag the document's `directed` field applies.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OrientationArgs {
    /// Treat every edge as bidirectional
    #[arg(long, env = "GRAPH_PATHS_UNDIRECTED")]
    pub undirected: bool,

    /// Treat edges as one-way (wins over --undirected)
    #[arg(long)]
    pub directed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

fn parse_algorithm(s: &str) -> Result<Algorithm, String> {
    s.parse::<Algorithm>().map_err(|e| e.to_string())
}
