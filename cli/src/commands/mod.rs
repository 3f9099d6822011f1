//! Subcommand handlers. Each one loads the graph, runs against a fresh
//! adjacency view and returns the text to print on stdout.

mod distances;
mod route;
mod stats;

use std::time::Instant;

use tracing::debug;

use crate::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::CliError;
use crate::load::load_graph;

pub fn run(cli: &Cli, start: Instant) -> Result<String, CliError> {
    match &cli.command {
        Commands::Route {
            file,
            algorithm,
            from,
            to,
            orientation,
        } => {
            let settings = Settings::resolve(cli, *orientation)?;
            let graph = load_graph(file, &settings)?;
            debug!(elapsed = ?start.elapsed(), "load");
            route::execute(&graph, *algorithm, from, to, &settings)
        }
        Commands::Distances {
            file,
            algorithm,
            from,
            orientation,
        } => {
            let settings = Settings::resolve(cli, *orientation)?;
            let graph = load_graph(file, &settings)?;
            debug!(elapsed = ?start.elapsed(), "load");
            distances::execute(&graph, *algorithm, from, &settings)
        }
        Commands::Stats { file, orientation } => {
            let settings = Settings::resolve(cli, *orientation)?;
            let graph = load_graph(file, &settings)?;
            debug!(elapsed = ?start.elapsed(), "load");
            stats::execute(&graph, &settings)
        }
    }
}

/// Human rendering of a distance: integers without a fractional part.
pub(crate) fn format_distance(d: f64) -> String {
    if !d.is_finite() {
        "unreachable".to_string()
    } else {
        format!("{}", d)
    }
}
