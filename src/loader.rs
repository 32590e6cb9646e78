//! JSON graph descriptions
//!
//! The on-disk format is an object with a `nodes` array and an `edges` array
//! of `[u, v, weight]` triples:
//!
//! ```json
//! { "nodes": [0, 1, 2], "edges": [[0, 1, 4], [1, 2, 1]] }
//! ```
//!
//! Only the length of `nodes` matters; its entries may be any JSON values.
//! A malformed file never yields a partial graph.

use crate::graph::{GraphBuilder, GraphError, WeightedGraph};
use crate::traits::{Vertex, Weight};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading or saving a graph description.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened, read or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The contents are not a valid graph description.
    #[error("malformed graph description: {0}")]
    Parse(#[from] serde_json::Error),

    /// An edge refers to a vertex that is not listed in `nodes`.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Serialized form of a graph: node list plus `[u, v, weight]` edge records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// One entry per vertex; the values themselves are not interpreted.
    pub nodes: Vec<serde_json::Value>,
    /// Undirected weighted edges.
    pub edges: Vec<(Vertex, Vertex, Weight)>,
}

impl GraphDescription {
    /// Builds the described graph with one `add_edge` per record.
    pub fn to_graph(&self) -> Result<WeightedGraph, GraphError> {
        let mut builder = GraphBuilder::new(self.nodes.len());
        for &(u, v, w) in &self.edges {
            builder.add_edge(u, v, w)?;
        }
        Ok(builder.build())
    }
}

/// Parses a graph description from a JSON string.
pub fn from_json_str(json: &str) -> Result<WeightedGraph, LoadError> {
    let description: GraphDescription = serde_json::from_str(json)?;
    Ok(description.to_graph()?)
}

/// Loads a graph from a JSON file.
pub fn load_json(path: impl AsRef<Path>) -> Result<WeightedGraph, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let description: GraphDescription = serde_json::from_reader(BufReader::new(file))?;
    let graph = description.to_graph()?;
    info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Writes a graph description to a JSON file.
pub fn save_json(description: &GraphDescription, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, description).map_err(|e| {
        if e.is_io() {
            io_error(e.into())
        } else {
            LoadError::Parse(e)
        }
    })?;
    writer.flush().map_err(io_error)?;
    info!(path = %path.display(), edges = description.edges.len(), "saved graph");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nodes_and_edges() {
        let graph =
            from_json_str(r#"{"nodes": [0, 1, 2], "edges": [[0, 1, 4], [1, 2, 1]]}"#).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(1), &[(0, 4), (2, 1)]);
    }

    #[test]
    fn node_values_are_not_interpreted() {
        let graph = from_json_str(r#"{"nodes": ["a", {"x": 1}, null], "edges": []}"#).unwrap();
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn rejects_malformed_descriptions() {
        // Missing field
        assert!(matches!(
            from_json_str(r#"{"nodes": [0]}"#),
            Err(LoadError::Parse(_))
        ));
        // Non-integer and negative weights
        assert!(matches!(
            from_json_str(r#"{"nodes": [0, 1], "edges": [[0, 1, 1.5]]}"#),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            from_json_str(r#"{"nodes": [0, 1], "edges": [[0, 1, -2]]}"#),
            Err(LoadError::Parse(_))
        ));
        // Wrong arity
        assert!(matches!(
            from_json_str(r#"{"nodes": [0, 1], "edges": [[0, 1]]}"#),
            Err(LoadError::Parse(_))
        ));
        // Unknown vertex
        assert!(matches!(
            from_json_str(r#"{"nodes": [0, 1], "edges": [[0, 5, 1]]}"#),
            Err(LoadError::Graph(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn save_then_load() {
        let description = GraphDescription {
            nodes: (0..4).map(serde_json::Value::from).collect(),
            edges: vec![(0, 1, 2), (2, 3, 9)],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.json");
        save_json(&description, &path).unwrap();

        let graph = load_json(&path).unwrap();
        assert_eq!(graph, description.to_graph().unwrap());
    }

    #[test]
    fn load_from_handwritten_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"nodes": [0, 1], "edges": [[1, 0, 3]]}}"#).unwrap();
        let graph = load_json(file.path()).unwrap();
        assert_eq!(graph.neighbors(0), &[(1, 3)]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn write_failure_is_an_io_error() {
        // Larger than the writer's buffer, so serialization itself hits the device
        let description = GraphDescription {
            nodes: (0..2_000).map(serde_json::Value::from).collect(),
            edges: (0..2_000).map(|i| (i, (i + 1) % 2_000, 7)).collect(),
        };
        let err = save_json(&description, "/dev/full").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }), "{err:?}");
        assert!(err.to_string().contains("/dev/full"));
    }
}
