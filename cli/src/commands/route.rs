use graph_paths_core::{run, Algorithm, Graph, Query};

use crate::args::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;

pub fn execute(
    graph: &Graph,
    algorithm: Algorithm,
    from: &str,
    to: &str,
    settings: &Settings,
) -> Result<String, CliError> {
    let query = Query::new(algorithm, from, to).with_budget(settings.budget());
    let report = run(graph, &query)?;

    Ok(match settings.format {
        OutputFormat::Human => report.summary(),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
    })
}
