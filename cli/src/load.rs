use std::path::Path;
use std::time::Instant;

use graph_paths_core::{Graph, GraphDocument};
use tracing::info;

use crate::config::Settings;
use crate::error::CliError;

/// Read a graph document and apply the orientation override from `settings`.
pub fn load_graph(path: &Path, settings: &Settings) -> Result<Graph, CliError> {
    let start = Instant::now();

    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document(path, &text)?;
    let document_directed = doc.directed;

    let mut graph = Graph::from_document(doc)?;
    graph.set_directed(settings.directed_or(document_directed));

    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = graph.is_directed(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );
    Ok(graph)
}

fn parse_document(path: &Path, text: &str) -> Result<GraphDocument, CliError> {
    serde_json::from_str(text).map_err(|source| CliError::Document {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExitCode;
    use std::io::Write;

    fn write_doc(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_with_override() {
        let f = write_doc(
            r#"{"directed": true,
                "nodes": [{"id": 1, "label": "A"}, {"id": "B", "label": "B"}],
                "edges": [{"id": "e1", "from": 1, "to": "B", "weight": "2.5"}]}"#,
        );
        let g = load_graph(f.path(), &Settings::default()).unwrap();
        assert!(g.is_directed());
        assert_eq!(g.node_count(), 2);
        assert!(g.node("1").is_some());
        assert_eq!(g.edges()[0].weight, 2.5);

        let undirected = Settings {
            directed: Some(false),
            ..Settings::default()
        };
        assert!(!load_graph(f.path(), &undirected).unwrap().is_directed());
    }

    #[test]
    fn test_duplicate_node_is_data_error() {
        let f = write_doc(r#"{"nodes": [{"id": "A", "label": "A"}, {"id": "A", "label": "A2"}]}"#);
        let err = load_graph(f.path(), &Settings::default()).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::Data);
    }

    #[test]
    fn test_malformed_json() {
        let f = write_doc("{ not json");
        let err = load_graph(f.path(), &Settings::default()).unwrap_err();
        assert!(matches!(err, CliError::Document { .. }));
        assert_eq!(err.exit_code(), ExitCode::Data);
    }

    #[test]
    fn test_missing_file() {
        let err = load_graph(Path::new("/nonexistent/graph.json"), &Settings::default()).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
