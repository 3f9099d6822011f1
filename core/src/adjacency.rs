use std::collections::HashMap;

use tracing::{debug, warn};

use crate::graph::{EdgeId, EdgeRecord, Node, NodeId};

/// Dense vertex index into an [`Adjacency`]. Only meaningful for the view that produced it.
pub type VertexIdx = usize;

/// Dense edge index into an [`Adjacency`].
pub type EdgeIdx = usize;

/// One outgoing entry: neighbor, weight and the edge that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub target: VertexIdx,
    pub weight: f64,
    pub edge: EdgeIdx,
}

/// Read-only adjacency view derived from node and edge collections.
///
/// Node ids are interned to dense indices: caller nodes come first in input
/// order, followed by "ghost" vertices created for edge endpoints that name
/// no node. Rebuilt before every solver run; never cached across edits.
#[derive(Debug, Clone)]
pub struct Adjacency {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, VertexIdx>,
    outgoing: Vec<Vec<Neighbor>>,
    edge_ids: Vec<EdgeId>,
    edge_weights: Vec<f64>,
    dropped: Vec<EdgeId>,
    ghosts: Vec<NodeId>,
    directed: bool,
}

impl Adjacency {
    fn with_capacity(node_count: usize, edge_count: usize, directed: bool) -> Self {
        Self {
            ids: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            outgoing: Vec::with_capacity(node_count),
            edge_ids: Vec::with_capacity(edge_count),
            edge_weights: Vec::with_capacity(edge_count),
            dropped: Vec::new(),
            ghosts: Vec::new(),
            directed,
        }
    }

    fn intern(&mut self, id: &str) -> (VertexIdx, bool) {
        if let Some(&idx) = self.index.get(id) {
            return (idx, false);
        }
        let idx = self.ids.len();
        self.ids.push(id.to_string());
        self.index.insert(id.to_string(), idx);
        self.outgoing.push(Vec::new());
        (idx, true)
    }

    fn intern_endpoint(&mut self, id: &str, edge: &str) -> VertexIdx {
        let (idx, created) = self.intern(id);
        if created {
            warn!(node = id, edge, "edge endpoint names no node; adding ghost vertex");
            self.ghosts.push(id.to_string());
        }
        idx
    }

    /// Resolve a node id to its dense index.
    pub fn vertex(&self, id: &str) -> Option<VertexIdx> {
        self.index.get(id).copied()
    }

    pub fn id(&self, v: VertexIdx) -> &str {
        &self.ids[v]
    }

    /// Outgoing entries of `v`, in edge insertion order.
    pub fn neighbors(&self, v: VertexIdx) -> &[Neighbor] {
        self.outgoing.get(v).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn edge_id(&self, e: EdgeIdx) -> &str {
        &self.edge_ids[e]
    }

    pub fn edge_weight(&self, e: EdgeIdx) -> f64 {
        self.edge_weights[e]
    }

    /// Number of vertices, ghosts included.
    pub fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of edges that survived construction. Undirected edges count once.
    pub fn edge_count(&self) -> usize {
        self.edge_ids.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexIdx, &str)> {
        self.ids.iter().enumerate().map(|(i, id)| (i, id.as_str()))
    }

    /// Ids of edges dropped because their weight was not finite.
    pub fn dropped_edges(&self) -> &[EdgeId] {
        &self.dropped
    }

    /// Vertex ids created for dangling edge endpoints.
    pub fn ghost_nodes(&self) -> &[NodeId] {
        &self.ghosts
    }

    pub fn min_weight(&self) -> Option<f64> {
        self.edge_weights.iter().copied().reduce(f64::min)
    }

    /// First surviving edge with a negative weight, if any.
    pub fn first_negative_edge(&self) -> Option<(&str, f64)> {
        self.edge_weights
            .iter()
            .position(|&w| w < 0.0)
            .map(|e| (self.edge_ids[e].as_str(), self.edge_weights[e]))
    }
}

/// Build the adjacency view for one solver run.
///
/// Edges with a non-finite weight are skipped. When `directed` is false every
/// surviving edge is inserted in both directions under the same edge id.
/// Endpoints are not checked against `nodes`; unknown ids become ghost vertices.
pub fn build_adjacency(nodes: &[Node], edges: &[EdgeRecord], directed: bool) -> Adjacency {
    let mut adj = Adjacency::with_capacity(nodes.len(), edges.len(), directed);

    for node in nodes {
        let (_, created) = adj.intern(&node.id);
        if !created {
            warn!(node = %node.id, "duplicate node id; keeping first occurrence");
        }
    }

    for edge in edges {
        if !edge.weight.is_finite() {
            warn!(edge = %edge.id, weight = edge.weight, "dropping edge with non-finite weight");
            adj.dropped.push(edge.id.clone());
            continue;
        }

        let from = adj.intern_endpoint(&edge.from, &edge.id);
        let to = adj.intern_endpoint(&edge.to, &edge.id);
        let e = adj.edge_ids.len();
        adj.edge_ids.push(edge.id.clone());
        adj.edge_weights.push(edge.weight);

        adj.outgoing[from].push(Neighbor {
            target: to,
            weight: edge.weight,
            edge: e,
        });
        if !directed {
            adj.outgoing[to].push(Neighbor {
                target: from,
                weight: edge.weight,
                edge: e,
            });
        }
    }

    debug!(
        vertices = adj.vertex_count(),
        edges = adj.edge_count(),
        dropped = adj.dropped.len(),
        ghosts = adj.ghosts.len(),
        directed,
        "built adjacency"
    );

    adj
}
