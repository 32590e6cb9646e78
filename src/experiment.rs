//! Batch timing over a directory of graph files
//!
//! Every `*.json` graph in a directory is loaded and run through
//! [`compare`]; each graph becomes one [`ExperimentRow`] with the mean time
//! of every queue. Rows can be written out as CSV.

use crate::harness::{compare, ComparisonReport, HarnessConfig, QueueKind};
use crate::loader::{load_json, LoadError};
use crate::shortest_path::PathError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors from a batch experiment.
#[derive(Debug, Error)]
pub enum ExperimentError {
    /// The dataset directory could not be listed.
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A graph file failed to load.
    #[error("{path}: {source}")]
    Load {
        /// Graph file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: LoadError,
    },

    /// A shortest-path run failed on one graph.
    #[error("{path}: {source}")]
    Run {
        /// Graph file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: PathError,
    },

    /// The CSV output could not be written.
    #[error("cannot write {path}: {source}")]
    Csv {
        /// Output file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },
}

/// Timings for one graph; the CSV columns are the field names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentRow {
    /// File name of the graph.
    pub graph: String,
    /// Vertices.
    pub vertices: usize,
    /// Undirected edges.
    pub edges: usize,
    /// Branching factor used for the d-ary heap.
    pub arity: usize,
    /// Mean binary heap time.
    pub binary_ms: f64,
    /// Mean d-ary heap time.
    pub d_ary_ms: f64,
    /// Mean Fibonacci heap time.
    pub fibonacci_ms: f64,
    /// Mean radix heap time.
    pub radix_ms: f64,
    /// Whether all four queues agreed.
    pub consistent: bool,
}

impl ExperimentRow {
    /// Flattens a comparison into a row.
    pub fn from_report(graph: impl Into<String>, report: &ComparisonReport) -> Self {
        let mean = |kind| report.get(kind).map_or(0.0, |r| r.timings.mean_ms);
        ExperimentRow {
            graph: graph.into(),
            vertices: report.vertices,
            edges: report.edges,
            arity: report
                .get(QueueKind::DAry)
                .and_then(|r| r.arity)
                .unwrap_or_default(),
            binary_ms: mean(QueueKind::Binary),
            d_ary_ms: mean(QueueKind::DAry),
            fibonacci_ms: mean(QueueKind::Fibonacci),
            radix_ms: mean(QueueKind::Radix),
            consistent: report.consistent,
        }
    }
}

/// `*.json` files directly inside `dir`, sorted by path.
pub fn dataset_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExperimentError> {
    let dir = dir.as_ref();
    let read_dir_error = |source: std::io::Error| ExperimentError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Times every queue on every graph in `dir`.
///
/// Stops at the first graph that fails to load or run.
pub fn run_experiment(
    dir: impl AsRef<Path>,
    config: &HarnessConfig,
) -> Result<Vec<ExperimentRow>, ExperimentError> {
    let files = dataset_files(dir)?;
    let mut rows = Vec::with_capacity(files.len());

    for path in files {
        let graph = load_json(&path).map_err(|source| ExperimentError::Load {
            path: path.clone(),
            source,
        })?;
        let report = compare(&graph, config).map_err(|source| ExperimentError::Run {
            path: path.clone(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!(graph = %name, consistent = report.consistent, "experiment graph done");
        rows.push(ExperimentRow::from_report(name, &report));
    }

    Ok(rows)
}

/// Writes `rows` as CSV with a header line.
pub fn write_csv(rows: &[ExperimentRow], path: impl AsRef<Path>) -> Result<(), ExperimentError> {
    let path = path.as_ref();
    let csv_error = |source: csv::Error| ExperimentError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush().map_err(|e| csv_error(e.into()))?;
    info!(path = %path.display(), rows = rows.len(), "wrote experiment results");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{random_graph, Density, GeneratorConfig};
    use crate::loader::save_json;

    fn quick() -> HarnessConfig {
        HarnessConfig {
            warmup: 0,
            iterations: 1,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn only_json_files_are_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), r#"{"nodes": [0], "edges": []}"#).unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = dataset_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[test]
    fn missing_directory() {
        assert!(matches!(
            dataset_files("/definitely/not/a/dir"),
            Err(ExperimentError::ReadDir { .. })
        ));
    }

    #[test]
    fn one_row_per_graph() {
        let dir = tempfile::tempdir().unwrap();
        for (i, density) in [Density::Sparse, Density::Dense].into_iter().enumerate() {
            let description = random_graph(&GeneratorConfig::with_density(30, density, i as u64))
                .unwrap();
            save_json(&description, dir.path().join(format!("g{i}.json"))).unwrap();
        }

        let rows = run_experiment(dir.path(), &quick()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].graph, "g0.json");
        assert_eq!(rows[0].edges, 60);
        assert_eq!(rows[1].edges, 435);
        // 2 * 435 / 30 = 29
        assert_eq!(rows[1].arity, 29);
        assert!(rows.iter().all(|r| r.consistent && r.vertices == 30));
    }

    #[test]
    fn malformed_graph_fails_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), r#"{"nodes": [0]}"#).unwrap();
        let err = run_experiment(dir.path(), &quick()).unwrap_err();
        assert!(matches!(
            err,
            ExperimentError::Load {
                source: LoadError::Parse(_),
                ..
            }
        ));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn empty_graph_fails_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.json"), r#"{"nodes": [], "edges": []}"#).unwrap();
        let err = run_experiment(dir.path(), &quick()).unwrap_err();
        assert!(matches!(err, ExperimentError::Run { .. }));
        assert!(err.to_string().contains("empty.json"));
    }

    #[test]
    fn csv_has_header_and_rows() {
        let row = ExperimentRow {
            graph: "g.json".to_string(),
            vertices: 3,
            edges: 2,
            arity: 2,
            binary_ms: 0.5,
            d_ary_ms: 0.25,
            fibonacci_ms: 1.0,
            radix_ms: 0.125,
            consistent: true,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_csv(&[row.clone(), row], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "graph,vertices,edges,arity,binary_ms,d_ary_ms,fibonacci_ms,radix_ms,consistent"
        );
        assert_eq!(lines[1], "g.json,3,2,2,0.5,0.25,1.0,0.125,true");
        assert_eq!(lines.len(), 3);
    }
}
