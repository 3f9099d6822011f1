use std::path::PathBuf;

use graph_paths_core::Error as EngineError;
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    /// Generic failure, e.g. an unreadable file.
    Failure = 1,
    /// Bad flags or arguments, including unknown node ids.
    Usage = 2,
    /// The graph document itself is unusable.
    Data = 3,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid graph document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage(_) => ExitCode::Usage,
            CliError::Engine(e) if e.is_usage() => ExitCode::Usage,
            CliError::Engine(_) | CliError::Document { .. } => ExitCode::Data,
            CliError::Io { .. } | CliError::Encode(_) => ExitCode::Failure,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "usage_error",
            CliError::Engine(EngineError::InvalidArgument(_)) => "invalid_argument",
            CliError::Engine(EngineError::NodeNotFound { .. }) => "node_not_found",
            CliError::Engine(EngineError::DuplicateNode { .. }) => "duplicate_node",
            CliError::Engine(EngineError::NonFiniteWeight { .. }) => "non_finite_weight",
            CliError::Engine(EngineError::NegativeWeight { .. }) => "negative_weight",
            CliError::Engine(EngineError::BudgetExhausted { .. }) => "budget_exhausted",
            CliError::Io { .. } => "io_error",
            CliError::Document { .. } => "invalid_document",
            CliError::Encode(_) => "encode_error",
        }
    }

    /// Error envelope written to stderr under `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_paths_core::Algorithm;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::usage("x").exit_code(), ExitCode::Usage);
        assert_eq!(
            CliError::from(EngineError::node_not_found("Q")).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            CliError::from(EngineError::NegativeWeight {
                algorithm: Algorithm::Dijkstra,
                edge: "e1".into(),
                weight: -1.0,
            })
            .exit_code(),
            ExitCode::Data
        );
        let io = CliError::Io {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(io.exit_code(), ExitCode::Failure);
    }

    #[test]
    fn test_json_envelope() {
        let err = CliError::from(EngineError::node_not_found("Q"));
        let json = err.to_json();
        assert_eq!(json["code"], 2);
        assert_eq!(json["type"], "node_not_found");
        assert_eq!(json["message"], "node not found: Q");
    }
}
