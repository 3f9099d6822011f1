use graph_paths_core::Graph;
use serde::Serialize;

use crate::args::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct GraphStats {
    directed: bool,
    node_count: usize,
    edge_count: usize,
    usable_edges: usize,
    dropped_edges: Vec<String>,
    ghost_nodes: Vec<String>,
    min_weight: Option<f64>,
    negative_edge: Option<String>,
}

pub fn execute(graph: &Graph, settings: &Settings) -> Result<String, CliError> {
    let adjacency = graph.adjacency();
    let stats = GraphStats {
        directed: adjacency.is_directed(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        usable_edges: adjacency.edge_count(),
        dropped_edges: adjacency.dropped_edges().to_vec(),
        ghost_nodes: adjacency.ghost_nodes().to_vec(),
        min_weight: adjacency.min_weight(),
        negative_edge: adjacency.first_negative_edge().map(|(e, _)| e.to_string()),
    };

    Ok(match settings.format {
        OutputFormat::Json => serde_json::to_string_pretty(&stats)?,
        OutputFormat::Human => render(&stats),
    })
}

fn render(s: &GraphStats) -> String {
    let list = |ids: &[String]| {
        if ids.is_empty() {
            "none".to_string()
        } else {
            ids.join(", ")
        }
    };

    [
        format!("orientation:    {}", if s.directed { "directed" } else { "undirected" }),
        format!("nodes:          {}", s.node_count),
        format!("edges:          {} ({} usable)", s.edge_count, s.usable_edges),
        format!("dropped edges:  {}", list(&s.dropped_edges)),
        format!("ghost nodes:    {}", list(&s.ghost_nodes)),
        format!(
            "negative edge:  {}",
            s.negative_edge.as_deref().unwrap_or("none")
        ),
    ]
    .join("\n")
}
