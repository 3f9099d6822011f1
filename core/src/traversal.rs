use std::fmt;

use serde::Serialize;
use tracing::warn;

use crate::adjacency::{Adjacency, EdgeIdx, VertexIdx};
use crate::error::{Error, Result};
use crate::graph::{EdgeId, NodeId};
use crate::query::Algorithm;

/// Upper bound on the work a solver call may do.
///
/// One step is one edge relaxation attempt. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Budget {
    pub max_steps: Option<u64>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self { max_steps: None }
    }

    pub fn steps(max_steps: u64) -> Self {
        Self {
            max_steps: Some(max_steps),
        }
    }
}

/// Counts relaxation attempts against a [`Budget`].
pub(crate) struct StepCounter {
    algorithm: Algorithm,
    limit: Option<u64>,
    used: u64,
}

impl StepCounter {
    pub(crate) fn new(algorithm: Algorithm, budget: Budget) -> Self {
        Self {
            algorithm,
            limit: budget.max_steps,
            used: 0,
        }
    }

    pub(crate) fn tick(&mut self) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.used >= limit {
                return Err(Error::BudgetExhausted {
                    algorithm: self.algorithm,
                    steps: self.used,
                });
            }
        }
        self.used += 1;
        Ok(())
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }
}

/// Resolve a caller-supplied endpoint id against the adjacency view.
pub(crate) fn resolve_endpoint(adjacency: &Adjacency, id: &str, role: &str) -> Result<VertexIdx> {
    if id.is_empty() {
        return Err(Error::invalid_argument(format!("{} id must not be empty", role)));
    }
    adjacency.vertex(id).ok_or_else(|| Error::node_not_found(id))
}

/// Fail fast when a solver that needs non-negative weights meets a negative edge.
pub(crate) fn require_non_negative(adjacency: &Adjacency, algorithm: Algorithm) -> Result<()> {
    match adjacency.first_negative_edge() {
        Some((edge, weight)) => Err(Error::NegativeWeight {
            algorithm,
            edge: edge.to_string(),
            weight,
        }),
        None => Ok(()),
    }
}

/// How a vertex was reached on the best known path: previous vertex and edge used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    pub node: VertexIdx,
    pub edge: EdgeIdx,
}

/// Distance map plus predecessor map produced by one solver call.
///
/// Borrows the adjacency view it was computed from; both are discarded
/// once the caller has read the result.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<'a> {
    adjacency: &'a Adjacency,
    source: VertexIdx,
    dist: Vec<f64>,
    prev: Vec<Option<Predecessor>>,
}

impl<'a> ShortestPathTree<'a> {
    pub(crate) fn new(
        adjacency: &'a Adjacency,
        source: VertexIdx,
        dist: Vec<f64>,
        prev: Vec<Option<Predecessor>>,
    ) -> Self {
        Self {
            adjacency,
            source,
            dist,
            prev,
        }
    }

    pub fn adjacency(&self) -> &'a Adjacency {
        self.adjacency
    }

    pub fn source(&self) -> &'a str {
        self.adjacency.id(self.source)
    }

    /// Best known distance to `id`; `+inf` when unreached or unknown.
    pub fn distance(&self, id: &str) -> f64 {
        self.adjacency
            .vertex(id)
            .map(|v| self.dist[v])
            .unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, id: &str) -> bool {
        self.distance(id).is_finite()
    }

    /// Every vertex with its distance, in adjacency order.
    pub fn distances(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.adjacency
            .vertices()
            .map(move |(v, id)| (id, self.dist[v]))
    }

    /// Predecessor node id and edge id for `id`, or `None` for the source and unreached nodes.
    pub fn predecessor(&self, id: &str) -> Option<(&'a str, &'a str)> {
        let v = self.adjacency.vertex(id)?;
        self.prev[v].map(|p| (self.adjacency.id(p.node), self.adjacency.edge_id(p.edge)))
    }

    pub(crate) fn predecessors(&self) -> &[Option<Predecessor>] {
        &self.prev
    }

    /// Ordered path from this tree's source to `target`.
    pub fn path_to(&self, target: &str) -> Option<Path> {
        reconstruct_path(self, self.source(), target)
    }
}

/// An ordered source-to-target path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
}

impl Path {
    /// Number of edges on the path.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// Sum of the edge weights along the path, read from `adjacency`.
    ///
    /// Returns `None` if some step is not an edge of `adjacency`.
    pub fn cost(&self, adjacency: &Adjacency) -> Option<f64> {
        self.nodes
            .windows(2)
            .zip(&self.edges)
            .map(|(pair, edge)| {
                let from = adjacency.vertex(&pair[0])?;
                let to = adjacency.vertex(&pair[1])?;
                adjacency
                    .neighbors(from)
                    .iter()
                    .find(|n| n.target == to && adjacency.edge_id(n.edge) == edge)
                    .map(|n| n.weight)
            })
            .sum()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes.join(" -> "))
    }
}

/// Walk predecessor links back from `target` and return the path in
/// source-to-target order.
///
/// Returns `None` when `target` is unknown, when it has no predecessor and is
/// not the source, or when the chain breaks or loops before reaching `source`.
/// Works the same on Dijkstra, A* and Bellman-Ford trees.
pub fn reconstruct_path(tree: &ShortestPathTree<'_>, source: &str, target: &str) -> Option<Path> {
    let adjacency = tree.adjacency();
    let source = adjacency.vertex(source)?;
    let target = adjacency.vertex(target)?;
    let prev = tree.predecessors();

    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut current = target;

    // A simple path visits each vertex at most once; more steps means a loop.
    let max_steps = adjacency.vertex_count();

    loop {
        nodes.push(current);
        if current == source {
            break;
        }
        let step = prev[current]?;
        edges.push(step.edge);
        current = step.node;

        if nodes.len() > max_steps {
            warn!(
                target = adjacency.id(target),
                "predecessor chain loops; refusing to build a path"
            );
            return None;
        }
    }

    nodes.reverse();
    edges.reverse();

    Some(Path {
        nodes: nodes.into_iter().map(|v| adjacency.id(v).to_string()).collect(),
        edges: edges
            .into_iter()
            .map(|e| adjacency.edge_id(e).to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::build_adjacency;
    use crate::graph::{EdgeRecord, Node};

    fn chain() -> Adjacency {
        let nodes: Vec<Node> = ["A", "B", "C", "D"]
            .iter()
            .map(|id| Node::new(*id, *id))
            .collect();
        build_adjacency(
            &nodes,
            &[
                EdgeRecord::new("ab", "A", "B", 1.0),
                EdgeRecord::new("bc", "B", "C", 2.0),
                EdgeRecord::new("cd", "C", "D", 3.0),
            ],
            true,
        )
    }

    fn tree_with(adj: &Adjacency, prev: Vec<Option<Predecessor>>) -> ShortestPathTree<'_> {
        let dist = vec![0.0; adj.vertex_count()];
        ShortestPathTree::new(adj, 0, dist, prev)
    }

    #[test]
    fn test_reconstruct_orders_source_to_target() {
        let adj = chain();
        let tree = tree_with(
            &adj,
            vec![
                None,
                Some(Predecessor { node: 0, edge: 0 }),
                Some(Predecessor { node: 1, edge: 1 }),
                Some(Predecessor { node: 2, edge: 2 }),
            ],
        );
        let path = reconstruct_path(&tree, "A", "D").unwrap();
        assert_eq!(path.nodes, vec!["A", "B", "C", "D"]);
        assert_eq!(path.edges, vec!["ab", "bc", "cd"]);
        assert_eq!(path.hops(), 3);
        assert_eq!(path.to_string(), "A -> B -> C -> D");
        assert_eq!(path.cost(&adj), Some(6.0));
    }

    #[test]
    fn test_reconstruct_source_equals_target() {
        let adj = chain();
        let tree = tree_with(&adj, vec![None; 4]);
        let path = reconstruct_path(&tree, "B", "B").unwrap();
        assert_eq!(path.nodes, vec!["B"]);
        assert!(path.edges.is_empty());
    }

    #[test]
    fn test_reconstruct_no_predecessor() {
        let adj = chain();
        let tree = tree_with(&adj, vec![None; 4]);
        assert!(reconstruct_path(&tree, "A", "D").is_none());
    }

    #[test]
    fn test_reconstruct_from_intermediate_root() {
        let adj = chain();
        let tree = tree_with(
            &adj,
            vec![
                None,
                Some(Predecessor { node: 0, edge: 0 }),
                Some(Predecessor { node: 1, edge: 1 }),
                Some(Predecessor { node: 2, edge: 2 }),
            ],
        );
        let path = reconstruct_path(&tree, "B", "D").unwrap();
        assert_eq!(path.nodes, vec!["B", "C", "D"]);
    }

    #[test]
    fn test_reconstruct_broken_chain() {
        let adj = chain();
        // D -> C, but C has no predecessor and is not the source
        let tree = tree_with(
            &adj,
            vec![None, None, None, Some(Predecessor { node: 2, edge: 2 })],
        );
        assert!(reconstruct_path(&tree, "A", "D").is_none());
    }

    #[test]
    fn test_reconstruct_looping_chain() {
        let adj = chain();
        // B and C point at each other; A is never reached
        let tree = tree_with(
            &adj,
            vec![
                None,
                Some(Predecessor { node: 2, edge: 1 }),
                Some(Predecessor { node: 1, edge: 1 }),
                Some(Predecessor { node: 2, edge: 2 }),
            ],
        );
        assert!(reconstruct_path(&tree, "A", "D").is_none());
    }

    #[test]
    fn test_reconstruct_unknown_ids() {
        let adj = chain();
        let tree = tree_with(&adj, vec![None; 4]);
        assert!(reconstruct_path(&tree, "A", "Z").is_none());
        assert!(reconstruct_path(&tree, "Z", "A").is_none());
    }

    #[test]
    fn test_tree_accessors() {
        let adj = chain();
        let tree = ShortestPathTree::new(
            &adj,
            0,
            vec![0.0, 1.0, f64::INFINITY, f64::INFINITY],
            vec![None, Some(Predecessor { node: 0, edge: 0 }), None, None],
        );
        assert_eq!(tree.source(), "A");
        assert_eq!(tree.distance("B"), 1.0);
        assert!(!tree.is_reachable("C"));
        assert_eq!(tree.distance("nope"), f64::INFINITY);
        assert_eq!(tree.predecessor("B"), Some(("A", "ab")));
        assert_eq!(tree.predecessor("A"), None);
        assert_eq!(tree.distances().count(), 4);
    }

    #[test]
    fn test_step_counter_budget() {
        let mut counter = StepCounter::new(Algorithm::Dijkstra, Budget::steps(2));
        assert!(counter.tick().is_ok());
        assert!(counter.tick().is_ok());
        assert_eq!(
            counter.tick(),
            Err(Error::BudgetExhausted {
                algorithm: Algorithm::Dijkstra,
                steps: 2
            })
        );
        assert_eq!(counter.used(), 2);

        let mut unbounded = StepCounter::new(Algorithm::BellmanFord, Budget::unlimited());
        for _ in 0..1000 {
            unbounded.tick().unwrap();
        }
    }

    #[test]
    fn test_resolve_endpoint() {
        let adj = chain();
        assert_eq!(resolve_endpoint(&adj, "C", "source"), Ok(2));
        assert!(matches!(
            resolve_endpoint(&adj, "", "source"),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(
            resolve_endpoint(&adj, "Q", "target"),
            Err(Error::node_not_found("Q"))
        );
    }
}
