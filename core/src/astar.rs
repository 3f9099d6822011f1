use tracing::debug;

use crate::adjacency::{Adjacency, VertexIdx};
use crate::error::Result;
use crate::graph::{Position, Positions};
use crate::heap::{HeapEntry, MinHeap};
use crate::query::Algorithm;
use crate::traversal::{
    require_non_negative, resolve_endpoint, Budget, Path, Predecessor, ShortestPathTree,
    StepCounter,
};

/// Result of an A* search.
///
/// `tree` holds the g-scores and predecessors recorded up to the point the
/// search stopped. Only the goal's entry is final.
#[derive(Debug, Clone)]
pub struct AStarOutcome<'a> {
    pub found: bool,
    pub expanded: usize,
    tree: ShortestPathTree<'a>,
    goal: VertexIdx,
}

impl<'a> AStarOutcome<'a> {
    /// Best known cost from the source to `id` when the search stopped.
    pub fn g_score(&self, id: &str) -> f64 {
        self.tree.distance(id)
    }

    /// Cost to the goal, or `None` when it was not reached.
    pub fn cost(&self) -> Option<f64> {
        self.found
            .then(|| self.tree.distance(self.tree.adjacency().id(self.goal)))
    }

    pub fn path(&self) -> Option<Path> {
        if !self.found {
            return None;
        }
        self.tree.path_to(self.tree.adjacency().id(self.goal))
    }

    pub fn tree(&self) -> &ShortestPathTree<'a> {
        &self.tree
    }
}

/// Goal-directed shortest path using the Euclidean distance to the goal as heuristic.
///
/// Nodes without a position sit at the origin, which can make the heuristic
/// uninformative or inadmissible; the search still terminates but the cost is
/// only guaranteed optimal when the heuristic never overestimates.
pub fn astar<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    goal: &str,
    positions: &Positions,
) -> Result<AStarOutcome<'a>> {
    astar_bounded(adjacency, source, goal, positions, Budget::unlimited())
}

/// [`astar`] with a cap on relaxation steps.
#[tracing::instrument(skip(adjacency, positions), fields(vertices = adjacency.vertex_count()))]
pub fn astar_bounded<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    goal: &str,
    positions: &Positions,
    budget: Budget,
) -> Result<AStarOutcome<'a>> {
    let src = resolve_endpoint(adjacency, source, "source")?;
    let goal_idx = resolve_endpoint(adjacency, goal, "goal")?;
    require_non_negative(adjacency, Algorithm::AStar)?;

    let n = adjacency.vertex_count();
    let goal_pos = positions.get(goal);
    let coords: Vec<Position> = adjacency
        .vertices()
        .map(|(_, id)| positions.get(id))
        .collect();
    let h = |v: VertexIdx| coords[v].distance(&goal_pos);

    let mut g = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<Predecessor>> = vec![None; n];
    // Open-set membership and the f-score each open vertex is queued under.
    let mut open = vec![false; n];
    let mut queued_f = vec![f64::INFINITY; n];
    let mut heap = MinHeap::new();
    let mut steps = StepCounter::new(Algorithm::AStar, budget);
    let mut expanded = 0usize;
    let mut found = false;

    g[src] = 0.0;
    queued_f[src] = h(src);
    open[src] = true;
    heap.push(src, queued_f[src]);

    while let Some(HeapEntry { value: current, priority }) = heap.pop() {
        // Entries left behind by a refresh or by an earlier expansion are stale.
        if !open[current] || priority > queued_f[current] {
            continue;
        }
        open[current] = false;
        expanded += 1;

        if current == goal_idx {
            found = true;
            break;
        }

        for nb in adjacency.neighbors(current) {
            steps.tick()?;
            let tentative = g[current] + nb.weight;
            if tentative < g[nb.target] {
                prev[nb.target] = Some(Predecessor {
                    node: current,
                    edge: nb.edge,
                });
                g[nb.target] = tentative;
                let f = tentative + h(nb.target);
                // No decrease-key: an open vertex gets a fresh entry and the
                // old one is skipped when popped.
                if !open[nb.target] || f < queued_f[nb.target] {
                    open[nb.target] = true;
                    queued_f[nb.target] = f;
                    heap.push(nb.target, f);
                }
            }
        }
    }

    debug!(found, expanded, relaxations = steps.used(), "astar finished");
    Ok(AStarOutcome {
        found,
        expanded,
        tree: ShortestPathTree::new(adjacency, src, g, prev),
        goal: goal_idx,
    })
}
