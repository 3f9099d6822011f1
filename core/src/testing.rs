//! Fixtures shared by the solver tests.

use crate::adjacency::Adjacency;
use crate::graph::{EdgeRecord, Node};

/// LCG for deterministic pseudo-random test graphs.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
}

/// Six nodes A..F with canvas positions.
pub fn sample_nodes() -> Vec<Node> {
    vec![
        Node::new("A", "A").at(-200.0, -100.0),
        Node::new("B", "B").at(-50.0, -120.0),
        Node::new("C", "C").at(80.0, -50.0),
        Node::new("D", "D").at(150.0, 70.0),
        Node::new("E", "E").at(0.0, 80.0),
        Node::new("F", "F").at(-140.0, 40.0),
    ]
}

pub fn sample_edges() -> Vec<EdgeRecord> {
    vec![
        EdgeRecord::new("e1", "A", "B", 4.0),
        EdgeRecord::new("e2", "A", "C", 7.0),
        EdgeRecord::new("e3", "B", "C", 1.0),
        EdgeRecord::new("e4", "B", "F", 5.0),
        EdgeRecord::new("e5", "C", "D", 3.0),
        EdgeRecord::new("e6", "C", "E", 2.0),
        EdgeRecord::new("e7", "E", "D", 4.0),
        EdgeRecord::new("e8", "F", "E", 6.0),
    ]
}

/// Random graph on `n0..n{nodes-1}` with weights `lo, lo + 1, ...` up to `hi`.
/// Nodes carry no positions.
pub fn random_graph(
    rng: &mut FastRng,
    nodes: u64,
    edges: u64,
    lo: f64,
    hi: f64,
) -> (Vec<Node>, Vec<EdgeRecord>) {
    let node_list: Vec<Node> = (0..nodes)
        .map(|i| Node::new(format!("n{}", i), format!("n{}", i)))
        .collect();
    let span = (hi - lo).max(0.0) as u64 + 1;
    let edge_list = (0..edges)
        .map(|i| {
            let from = rng.next(nodes);
            let to = rng.next(nodes);
            let weight = lo + rng.next(span) as f64;
            EdgeRecord::new(format!("r{}", i), format!("n{}", from), format!("n{}", to), weight)
        })
        .collect();
    (node_list, edge_list)
}

/// Minimum path weight from `source` to `target` by trying every simple path.
///
/// Only valid when no negative cycle is reachable.
pub fn exhaustive_distance(adjacency: &Adjacency, source: &str, target: &str) -> f64 {
    fn walk(
        adj: &Adjacency,
        at: usize,
        target: usize,
        on_path: &mut Vec<bool>,
        cost: f64,
        best: &mut f64,
    ) {
        if at == target {
            *best = best.min(cost);
            return;
        }
        for nb in adj.neighbors(at) {
            if !on_path[nb.target] {
                on_path[nb.target] = true;
                walk(adj, nb.target, target, on_path, cost + nb.weight, best);
                on_path[nb.target] = false;
            }
        }
    }

    let (Some(s), Some(t)) = (adjacency.vertex(source), adjacency.vertex(target)) else {
        return f64::INFINITY;
    };
    let mut on_path = vec![false; adjacency.vertex_count()];
    on_path[s] = true;
    let mut best = f64::INFINITY;
    walk(adjacency, s, t, &mut on_path, 0.0, &mut best);
    best
}

/// True if some cycle reachable from `source` has negative total weight,
/// found by enumerating simple cycles through each reachable vertex.
pub fn has_reachable_negative_cycle(adjacency: &Adjacency, source: &str) -> bool {
    fn cycle_from(
        adj: &Adjacency,
        start: usize,
        at: usize,
        on_path: &mut Vec<bool>,
        cost: f64,
    ) -> bool {
        for nb in adj.neighbors(at) {
            let next_cost = cost + nb.weight;
            if nb.target == start && next_cost < 0.0 {
                return true;
            }
            if !on_path[nb.target] {
                on_path[nb.target] = true;
                let found = cycle_from(adj, start, nb.target, on_path, next_cost);
                on_path[nb.target] = false;
                if found {
                    return true;
                }
            }
        }
        false
    }

    let Some(s) = adjacency.vertex(source) else {
        return false;
    };

    // Reachable set by plain DFS
    let n = adjacency.vertex_count();
    let mut reachable = vec![false; n];
    let mut stack = vec![s];
    reachable[s] = true;
    while let Some(v) = stack.pop() {
        for nb in adjacency.neighbors(v) {
            if !reachable[nb.target] {
                reachable[nb.target] = true;
                stack.push(nb.target);
            }
        }
    }

    (0..n).filter(|&v| reachable[v]).any(|v| {
        let mut on_path = vec![false; n];
        on_path[v] = true;
        cycle_from(adjacency, v, v, &mut on_path, 0.0)
    })
}
