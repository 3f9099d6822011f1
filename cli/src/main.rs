//! graph-paths: run Dijkstra, A* or Bellman-Ford over a JSON graph document.

mod args;
mod commands;
mod config;
mod error;
mod load;
mod logging;

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use args::{Cli, OutputFormat};
use error::ExitCode as CliExitCode;

fn main() -> ExitCode {
    let start = Instant::now();

    // clap reports usage errors with exit code 2 on its own
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::run(&cli, start) {
        Ok(output) => {
            println!("{}", output);
            tracing::debug!(elapsed = ?start.elapsed(), "done");
            ExitCode::from(CliExitCode::Success as u8)
        }
        Err(e) => {
            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
