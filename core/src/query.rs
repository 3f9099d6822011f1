use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::astar::astar_bounded;
use crate::bellman_ford::bellman_ford_bounded;
use crate::dijkstra::dijkstra_bounded;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::traversal::{resolve_endpoint, Budget, Path};

/// Solver selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Dijkstra,
    AStar,
    BellmanFord,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::AStar, Algorithm::BellmanFord];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::BellmanFord => "bellman-ford",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            "bellman-ford" | "bellmanford" | "bellman_ford" | "bf" => Ok(Algorithm::BellmanFord),
            other => Err(Error::invalid_argument(format!(
                "unknown algorithm '{}' (expected dijkstra, astar or bellman-ford)",
                other
            ))),
        }
    }
}

/// One algorithm-run request: which solver, between which nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub algorithm: Algorithm,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub budget: Budget,
}

impl Query {
    pub fn new(algorithm: Algorithm, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            algorithm,
            source: Some(source.into()),
            target: Some(target.into()),
            budget: Budget::unlimited(),
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }
}

/// Outcome of a [`Query`].
///
/// `distance` is `None` when the target is unreachable, and also when a
/// negative cycle makes it undefined. Check `negative_cycle` before trusting
/// anything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub algorithm: Algorithm,
    pub source: NodeId,
    pub target: NodeId,
    pub distance: Option<f64>,
    pub reachable: bool,
    pub path: Option<Path>,
    pub negative_cycle: bool,
}

impl RouteReport {
    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if self.negative_cycle {
            return format!(
                "{}: negative-weight cycle detected; shortest path undefined",
                self.algorithm
            );
        }
        match (&self.distance, &self.path) {
            (Some(d), Some(p)) => format!(
                "{}: shortest path {} -> {} = {} ({})",
                self.algorithm, self.source, self.target, d, p
            ),
            (Some(d), None) => format!(
                "{}: shortest path {} -> {} = {}",
                self.algorithm, self.source, self.target, d
            ),
            (None, _) => format!(
                "{}: no path found from {} to {}",
                self.algorithm, self.source, self.target
            ),
        }
    }
}

fn require<'q>(value: &'q Option<NodeId>, role: &str) -> Result<&'q str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::invalid_argument(format!("{} must be specified", role))),
    }
}

/// Run one query against the current state of `graph`.
///
/// The adjacency view is rebuilt for this call, so edits made since the
/// previous run are always reflected.
pub fn run(graph: &Graph, query: &Query) -> Result<RouteReport> {
    let source = require(&query.source, "source")?;
    let target = require(&query.target, "target")?;

    let adjacency = graph.adjacency();
    resolve_endpoint(&adjacency, target, "target")?;

    let (distance, path, negative_cycle) = match query.algorithm {
        Algorithm::Dijkstra => {
            let tree = dijkstra_bounded(&adjacency, source, query.budget)?;
            let d = tree.distance(target);
            (d.is_finite().then_some(d), tree.path_to(target), false)
        }
        Algorithm::AStar => {
            let out = astar_bounded(&adjacency, source, target, &graph.positions(), query.budget)?;
            (out.cost(), out.path(), false)
        }
        Algorithm::BellmanFord => {
            let out = bellman_ford_bounded(&adjacency, graph.node_ids(), source, query.budget)?;
            if out.has_negative_cycle {
                (None, None, true)
            } else {
                let d = out.distance(target);
                (d.is_finite().then_some(d), out.path_to(target), false)
            }
        }
    };

    let report = RouteReport {
        algorithm: query.algorithm,
        source: source.to_string(),
        target: target.to_string(),
        distance,
        reachable: distance.is_some(),
        path,
        negative_cycle,
    };
    info!(
        algorithm = %report.algorithm,
        source = %report.source,
        target = %report.target,
        distance = ?report.distance,
        negative_cycle,
        "route computed"
    );
    Ok(report)
}
