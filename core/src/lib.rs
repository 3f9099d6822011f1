//! graph-paths-core: In-memory weighted shortest-path engine.
//!
//! Builds an adjacency view from caller-owned node and edge collections and
//! answers shortest-path queries with Dijkstra (binary min-heap), A*
//! (Euclidean heuristic) or Bellman-Ford (negative-cycle detection).
//! No rendering, persistence or global state: every call takes its inputs
//! by argument and returns its results by value.

mod adjacency;
mod astar;
mod bellman_ford;
mod dijkstra;
mod error;
mod graph;
mod heap;
mod query;
mod traversal;

#[cfg(test)]
mod testing;

pub use adjacency::{build_adjacency, Adjacency, EdgeIdx, Neighbor, VertexIdx};
pub use astar::{astar, astar_bounded, AStarOutcome};
pub use bellman_ford::{bellman_ford, bellman_ford_bounded, BellmanFordOutcome};
pub use dijkstra::{dijkstra, dijkstra_bounded};
pub use error::{Error, Result};
pub use graph::{EdgeId, EdgeRecord, Graph, GraphDocument, Node, NodeId, Position, Positions};
pub use heap::{HeapEntry, MinHeap};
pub use query::{run, Algorithm, Query, RouteReport};
pub use traversal::{reconstruct_path, Budget, Path, Predecessor, ShortestPathTree};
