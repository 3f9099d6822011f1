use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::adjacency::{build_adjacency, Adjacency};
use crate::error::{Error, Result};

/// Caller-visible node identifier. Integer ids are carried as their decimal form.
pub type NodeId = String;

/// Caller-visible edge identifier.
pub type EdgeId = String;

/// 2-D coordinates, used only by the A* heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A graph vertex as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x: None,
            y: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Position with each missing coordinate read as 0.
    pub fn position(&self) -> Position {
        Position::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0))
    }
}

/// A weighted edge as supplied by the caller.
///
/// The weight is not validated here; `build_adjacency` drops non-finite
/// weights and nothing checks that `from`/`to` name existing nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub id: EdgeId,
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub from: NodeId,
    #[serde(deserialize_with = "id_from_str_or_int")]
    pub to: NodeId,
    #[serde(deserialize_with = "weight_from_number_or_str")]
    pub weight: f64,
}

impl EdgeRecord {
    pub fn new(
        id: impl Into<EdgeId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        weight: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

/// Serialized form of a graph: `{ "directed": bool, "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_directed")]
    pub directed: bool,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

fn default_directed() -> bool {
    true
}

fn id_from_str_or_int<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Int(i) => i.to_string(),
    })
}

/// Weights arrive either as numbers or as edge-label strings. A label that
/// does not parse becomes NaN and is dropped later by `build_adjacency`.
fn weight_from_number_or_str<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawWeight {
        Num(f64),
        Str(String),
        Null(()),
    }

    Ok(match RawWeight::deserialize(deserializer)? {
        RawWeight::Num(w) => w,
        RawWeight::Str(s) => s.trim().parse().unwrap_or(f64::NAN),
        RawWeight::Null(()) => f64::NAN,
    })
}

/// Node coordinates keyed by id, for the A* heuristic.
#[derive(Debug, Clone, Default)]
pub struct Positions {
    by_id: HashMap<NodeId, Position>,
}

impl Positions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: &[Node]) -> Self {
        Self {
            by_id: nodes.iter().map(|n| (n.id.clone(), n.position())).collect(),
        }
    }

    pub fn insert(&mut self, id: impl Into<NodeId>, position: Position) {
        self.by_id.insert(id.into(), position);
    }

    /// Position of `id`, or the origin when unknown.
    pub fn get(&self, id: &str) -> Position {
        self.by_id.get(id).copied().unwrap_or(Position::ORIGIN)
    }
}

/// Long-lived, caller-mutated graph: nodes, edges and the orientation flag.
///
/// Node ids are unique. Edges added through [`Graph::add_edge`] are checked;
/// edges added through [`Graph::insert_edge`] are stored as given.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    nodes: Vec<Node>,
    edges: Vec<EdgeRecord>,
    node_index: HashMap<NodeId, usize>,
    next_edge: u64,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::new(),
            next_edge: 1,
        }
    }

    /// Build from a document, rejecting duplicate node ids. Edges are taken as-is.
    pub fn from_document(doc: GraphDocument) -> Result<Self> {
        let mut graph = Graph::new(doc.directed);
        for node in doc.nodes {
            graph.insert_node(node)?;
        }
        for edge in doc.edges {
            graph.insert_edge(edge);
        }
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            directed: self.directed,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn set_directed(&mut self, directed: bool) {
        self.directed = directed;
    }

    /// Add a node whose id is derived from `label`: the trimmed label itself,
    /// or `label_1`, `label_2`, ... when that id is taken.
    pub fn add_node(&mut self, label: &str, position: Option<Position>) -> Result<NodeId> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::invalid_argument("node label must not be empty"));
        }

        let mut id = label.to_string();
        let mut suffix = 1;
        while self.node_index.contains_key(&id) {
            id = format!("{}_{}", label, suffix);
            suffix += 1;
        }

        let mut node = Node::new(id.clone(), label);
        if let Some(p) = position {
            node = node.at(p.x, p.y);
        }
        self.insert_node(node)?;
        Ok(id)
    }

    /// Add a node with an explicit id.
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.node_index.contains_key(&node.id) {
            return Err(Error::DuplicateNode { id: node.id });
        }
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Add an edge between two existing nodes, each named by id or label.
    ///
    /// Returns the generated edge id (`e1`, `e2`, ...).
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<EdgeId> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(Error::invalid_argument("edge endpoints must not be empty"));
        }
        let from_id = self
            .resolve(from)
            .ok_or_else(|| Error::node_not_found(from))?
            .id
            .clone();
        let to_id = self
            .resolve(to)
            .ok_or_else(|| Error::node_not_found(to))?
            .id
            .clone();

        let id = self.next_edge_id();
        if !weight.is_finite() {
            return Err(Error::NonFiniteWeight { edge: id, weight });
        }

        self.next_edge += 1;
        self.edges.push(EdgeRecord::new(id.clone(), from_id, to_id, weight));
        Ok(id)
    }

    /// Store an edge without checking its endpoints or weight.
    pub fn insert_edge(&mut self, edge: EdgeRecord) {
        self.edges.push(edge);
    }

    fn next_edge_id(&mut self) -> EdgeId {
        loop {
            let id = format!("e{}", self.next_edge);
            if !self.edges.iter().any(|e| e.id == id) {
                return id;
            }
            self.next_edge += 1;
        }
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let idx = self.node_index.remove(id)?;
        let node = self.nodes.remove(idx);
        self.edges.retain(|e| e.from != id && e.to != id);
        self.reindex();
        Some(node)
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<EdgeRecord> {
        let idx = self.edges.iter().position(|e| e.id == id)?;
        Some(self.edges.remove(idx))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.next_edge = 1;
    }

    fn reindex(&mut self) {
        self.node_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Look up a node by id, falling back to the first node with that label.
    pub fn resolve(&self, id_or_label: &str) -> Option<&Node> {
        self.node(id_or_label)
            .or_else(|| self.nodes.iter().find(|n| n.label == id_or_label))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build a fresh adjacency view reflecting the current nodes, edges and orientation.
    pub fn adjacency(&self) -> Adjacency {
        build_adjacency(&self.nodes, &self.edges, self.directed)
    }

    pub fn positions(&self) -> Positions {
        Positions::from_nodes(&self.nodes)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(true)
    }
}
