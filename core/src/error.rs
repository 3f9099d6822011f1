use thiserror::Error;

use crate::query::Algorithm;

/// Errors raised by graph editing and solver calls.
///
/// "No path" is never an error: solvers report it through infinite
/// distances and `found = false`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node not found: {id}")]
    NodeNotFound { id: String },

    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight { edge: String, weight: f64 },

    #[error("{algorithm} requires non-negative weights, edge {edge} has weight {weight}")]
    NegativeWeight {
        algorithm: Algorithm,
        edge: String,
        weight: f64,
    },

    #[error("{algorithm} exceeded its step budget after {steps} relaxations")]
    BudgetExhausted { algorithm: Algorithm, steps: u64 },
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub fn node_not_found(id: impl Into<String>) -> Self {
        Error::NodeNotFound { id: id.into() }
    }

    /// True for errors caused by the caller's request rather than the graph data.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::NodeNotFound { .. } | Error::BudgetExhausted { .. }
        )
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
