use graph_paths_core::{bellman_ford_bounded, dijkstra_bounded, Algorithm, Graph, ShortestPathTree};
use serde::Serialize;

use super::format_distance;
use crate::args::OutputFormat;
use crate::config::Settings;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct DistanceRow {
    node: String,
    /// `null` when unreachable.
    distance: Option<f64>,
    predecessor: Option<String>,
    via: Option<String>,
}

#[derive(Debug, Serialize)]
struct DistanceTable {
    algorithm: Algorithm,
    source: String,
    negative_cycle: bool,
    distances: Vec<DistanceRow>,
}

pub fn execute(
    graph: &Graph,
    algorithm: Algorithm,
    from: &str,
    settings: &Settings,
) -> Result<String, CliError> {
    let adjacency = graph.adjacency();

    let (tree, negative_cycle) = match algorithm {
        Algorithm::Dijkstra => (dijkstra_bounded(&adjacency, from, settings.budget())?, false),
        Algorithm::BellmanFord => {
            let out = bellman_ford_bounded(&adjacency, graph.node_ids(), from, settings.budget())?;
            (out.tree().clone(), out.has_negative_cycle)
        }
        Algorithm::AStar => {
            return Err(CliError::usage(
                "distances needs a single-source solver: dijkstra or bellman-ford",
            ))
        }
    };

    let table = DistanceTable {
        algorithm,
        source: from.to_string(),
        negative_cycle,
        distances: if negative_cycle {
            Vec::new()
        } else {
            rows(graph, &tree)
        },
    };

    match settings.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&table)?),
        OutputFormat::Human => Ok(render(&table)),
    }
}

/// One row per graph node, in insertion order. Ghost vertices are left out.
fn rows(graph: &Graph, tree: &ShortestPathTree<'_>) -> Vec<DistanceRow> {
    graph
        .node_ids()
        .map(|id| {
            let d = tree.distance(id);
            let pred = tree.predecessor(id);
            DistanceRow {
                node: id.to_string(),
                distance: d.is_finite().then_some(d),
                predecessor: pred.map(|(n, _)| n.to_string()),
                via: pred.map(|(_, e)| e.to_string()),
            }
        })
        .collect()
}

fn render(table: &DistanceTable) -> String {
    if table.negative_cycle {
        return format!(
            "{}: negative-weight cycle detected; shortest path undefined",
            table.algorithm
        );
    }

    let width = table
        .distances
        .iter()
        .map(|r| r.node.len())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = vec![format!("{}: distances from {}", table.algorithm, table.source)];
    for row in &table.distances {
        let dist = format_distance(row.distance.unwrap_or(f64::INFINITY));
        match &row.predecessor {
            Some(p) => lines.push(format!("  {:<width$}  {:>12}  (via {})", row.node, dist, p)),
            None => lines.push(format!("  {:<width$}  {:>12}", row.node, dist)),
        }
    }
    lines.join("\n")
}
