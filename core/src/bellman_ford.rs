use tracing::{debug, warn};

use crate::adjacency::{Adjacency, VertexIdx};
use crate::error::{Error, Result};
use crate::query::Algorithm;
use crate::traversal::{resolve_endpoint, Budget, Path, Predecessor, ShortestPathTree, StepCounter};

/// Result of a Bellman-Ford run.
///
/// When `has_negative_cycle` is set the distances and predecessors of every
/// vertex reachable from the cycle are meaningless; [`BellmanFordOutcome::path_to`]
/// refuses to build paths in that case.
#[derive(Debug, Clone)]
pub struct BellmanFordOutcome<'a> {
    pub has_negative_cycle: bool,
    /// Relaxation passes actually run, not counting the final detection sweep.
    pub passes: usize,
    tree: ShortestPathTree<'a>,
}

impl<'a> BellmanFordOutcome<'a> {
    pub fn tree(&self) -> &ShortestPathTree<'a> {
        &self.tree
    }

    pub fn distance(&self, id: &str) -> f64 {
        self.tree.distance(id)
    }

    pub fn path_to(&self, target: &str) -> Option<Path> {
        if self.has_negative_cycle {
            return None;
        }
        self.tree.path_to(target)
    }
}

/// Single-source shortest paths that tolerate negative weights.
///
/// Vertices listed in `node_ids` are swept in that order, followed by any
/// ghost vertices of the adjacency view; ids unknown to the view are ignored.
/// `source` must be one of the listed ids.
pub fn bellman_ford<'a, I, S>(
    adjacency: &'a Adjacency,
    node_ids: I,
    source: &str,
) -> Result<BellmanFordOutcome<'a>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    bellman_ford_bounded(adjacency, node_ids, source, Budget::unlimited())
}

/// [`bellman_ford`] with a cap on relaxation steps.
pub fn bellman_ford_bounded<'a, I, S>(
    adjacency: &'a Adjacency,
    node_ids: I,
    source: &str,
    budget: Budget,
) -> Result<BellmanFordOutcome<'a>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let src = resolve_endpoint(adjacency, source, "source")?;

    let mut listed = vec![false; adjacency.vertex_count()];
    let mut order: Vec<VertexIdx> = Vec::new();
    for id in node_ids {
        match adjacency.vertex(id.as_ref()) {
            Some(v) if !listed[v] => {
                listed[v] = true;
                order.push(v);
            }
            Some(_) => {}
            None => debug!(node = id.as_ref(), "bellman-ford skipping unknown node id"),
        }
    }
    if !listed[src] {
        return Err(Error::node_not_found(source));
    }
    // Ghost vertices relay edges for Dijkstra and A*, so they are swept too.
    for ghost in adjacency.ghost_nodes() {
        if let Some(v) = adjacency.vertex(ghost) {
            if !listed[v] {
                listed[v] = true;
                order.push(v);
            }
        }
    }

    run(adjacency, &order, src, budget)
}

#[tracing::instrument(skip_all, fields(vertices = order.len()))]
fn run<'a>(
    adjacency: &'a Adjacency,
    order: &[VertexIdx],
    src: VertexIdx,
    budget: Budget,
) -> Result<BellmanFordOutcome<'a>> {
    let n = adjacency.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<Predecessor>> = vec![None; n];
    let mut steps = StepCounter::new(Algorithm::BellmanFord, budget);

    dist[src] = 0.0;

    let max_passes = order.len().saturating_sub(1);
    let mut passes = 0;
    for _ in 0..max_passes {
        passes += 1;
        let mut updated = false;
        for &u in order {
            // Unreached vertices can't relax anything.
            if dist[u] == f64::INFINITY {
                continue;
            }
            for nb in adjacency.neighbors(u) {
                steps.tick()?;
                let alt = dist[u] + nb.weight;
                if alt < dist[nb.target] {
                    dist[nb.target] = alt;
                    prev[nb.target] = Some(Predecessor { node: u, edge: nb.edge });
                    updated = true;
                }
            }
        }
        // A quiet pass means convergence; further passes would be no-ops.
        if !updated {
            break;
        }
    }

    // Anything still relaxable after |V| - 1 passes lies on or behind a negative cycle.
    let mut has_negative_cycle = false;
    'sweep: for &u in order {
        if dist[u] == f64::INFINITY {
            continue;
        }
        for nb in adjacency.neighbors(u) {
            steps.tick()?;
            if dist[u] + nb.weight < dist[nb.target] {
                has_negative_cycle = true;
                break 'sweep;
            }
        }
    }

    if has_negative_cycle {
        warn!(
            source = adjacency.id(src),
            "negative-weight cycle reachable from source; distances undefined"
        );
    }
    debug!(passes, relaxations = steps.used(), has_negative_cycle, "bellman-ford finished");

    Ok(BellmanFordOutcome {
        has_negative_cycle,
        passes,
        tree: ShortestPathTree::new(adjacency, src, dist, prev),
    })
}
