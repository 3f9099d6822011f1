use tracing::debug;

use crate::adjacency::Adjacency;
use crate::error::Result;
use crate::heap::{HeapEntry, MinHeap};
use crate::query::Algorithm;
use crate::traversal::{
    require_non_negative, resolve_endpoint, Budget, Predecessor, ShortestPathTree, StepCounter,
};

/// Single-source shortest paths over non-negative weights.
///
/// Returns distances to every reachable vertex and a predecessor tree rooted
/// at `source`. Negative weights are rejected with `Error::NegativeWeight`.
pub fn dijkstra<'a>(adjacency: &'a Adjacency, source: &str) -> Result<ShortestPathTree<'a>> {
    dijkstra_bounded(adjacency, source, Budget::unlimited())
}

/// [`dijkstra`] with a cap on relaxation steps.
#[tracing::instrument(skip(adjacency), fields(vertices = adjacency.vertex_count()))]
pub fn dijkstra_bounded<'a>(
    adjacency: &'a Adjacency,
    source: &str,
    budget: Budget,
) -> Result<ShortestPathTree<'a>> {
    let src = resolve_endpoint(adjacency, source, "source")?;
    require_non_negative(adjacency, Algorithm::Dijkstra)?;

    let n = adjacency.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<Predecessor>> = vec![None; n];
    let mut heap = MinHeap::with_capacity(n);
    let mut steps = StepCounter::new(Algorithm::Dijkstra, budget);
    let mut settled = 0usize;
    let mut stale = 0usize;

    dist[src] = 0.0;
    heap.push(src, 0.0);

    while let Some(HeapEntry { value: u, priority }) = heap.pop() {
        // Lazy deletion: an entry is live iff its priority equals dist[u].
        // Anything larger was superseded by a later push.
        if priority > dist[u] {
            stale += 1;
            continue;
        }
        settled += 1;

        for nb in adjacency.neighbors(u) {
            steps.tick()?;
            let alt = priority + nb.weight;
            if alt < dist[nb.target] {
                dist[nb.target] = alt;
                prev[nb.target] = Some(Predecessor { node: u, edge: nb.edge });
                heap.push(nb.target, alt);
            }
        }
    }

    debug!(settled, stale, relaxations = steps.used(), "dijkstra finished");
    Ok(ShortestPathTree::new(adjacency, src, dist, prev))
}
