//! End-to-end tests for the shortest-path bindings
//!
//! Tests cover:
//! - The reference scenarios every binding must reproduce
//! - Edge cases (single vertex, isolated vertices, zero weights, large weights)
//! - Loading graphs from JSON files and from the generator
//! - The comparison harness and directory experiments

use dijkstra_heaps::experiment::{run_experiment, write_csv};
use dijkstra_heaps::generate::{random_graph, Density, GeneratorConfig};
use dijkstra_heaps::graph::{GraphBuilder, WeightedGraph};
use dijkstra_heaps::harness::{compare, HarnessConfig, QueueKind};
use dijkstra_heaps::loader::{from_json_str, load_json, save_json, LoadError};
use dijkstra_heaps::shortest_path::{
    dijkstra_binary, dijkstra_d_ary, dijkstra_fibonacci, dijkstra_radix, reachable_count,
    PathError,
};
use dijkstra_heaps::{Key, Vertex, INFINITY};
use std::io::Write;

// ============================================================================
// Helpers
// ============================================================================

fn all_bindings(graph: &WeightedGraph, source: Vertex) -> [Vec<Key>; 4] {
    [
        dijkstra_binary(graph, source).unwrap(),
        dijkstra_d_ary(graph, source, graph.recommended_arity()).unwrap(),
        dijkstra_fibonacci(graph, source).unwrap(),
        dijkstra_radix(graph, source).unwrap(),
    ]
}

fn assert_all(graph: &WeightedGraph, source: Vertex, expected: &[Key]) {
    for (i, dist) in all_bindings(graph, source).iter().enumerate() {
        assert_eq!(dist, expected, "binding {:?}", QueueKind::ALL[i]);
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_five_vertex_scenario() {
    let graph = WeightedGraph::from_edges(
        5,
        &[
            (0, 1, 4),
            (0, 2, 1),
            (2, 1, 2),
            (1, 3, 1),
            (2, 3, 5),
            (3, 4, 3),
        ],
    )
    .unwrap();
    assert_all(&graph, 0, &[0, 3, 1, 4, 7]);
}

#[test]
fn test_single_vertex() {
    let graph = GraphBuilder::new(1).build();
    assert_all(&graph, 0, &[0]);
}

#[test]
fn test_disconnected_vertex() {
    let graph = WeightedGraph::from_edges(3, &[(0, 1, 2)]).unwrap();
    assert_all(&graph, 0, &[0, 2, INFINITY]);
    assert_all(&graph, 2, &[INFINITY, INFINITY, 0]);
}

#[test]
fn test_two_components() {
    let graph = WeightedGraph::from_edges(6, &[(0, 1, 1), (1, 2, 1), (3, 4, 1), (4, 5, 1)]).unwrap();
    for dist in all_bindings(&graph, 4) {
        assert_eq!(reachable_count(&dist), 3);
        assert_eq!(&dist[3..], &[1, 0, 1]);
    }
}

#[test]
fn test_long_path_needs_many_decreases() {
    // Hub 0 reaches every vertex directly at a high cost; the chain is cheaper.
    let n = 200;
    let mut builder = GraphBuilder::new(n);
    for v in 1..n {
        builder.add_edge(0, v, 10_000).unwrap();
        builder.add_edge(v - 1, v, 1).unwrap();
    }
    let graph = builder.build();
    let expected: Vec<Key> = (0..n as Key).collect();
    assert_all(&graph, 0, &expected);
}

#[test]
fn test_large_weights_do_not_overflow() {
    let w = u32::MAX;
    let graph = WeightedGraph::from_edges(4, &[(0, 1, w), (1, 2, w), (2, 3, w)]).unwrap();
    let w = Key::from(w);
    assert_all(&graph, 0, &[0, w, 2 * w, 3 * w]);
}

#[test]
fn test_grid() {
    let (width, height) = (12, 9);
    let mut builder = GraphBuilder::new(width * height);
    for y in 0..height {
        for x in 0..width {
            let v = y * width + x;
            if x + 1 < width {
                builder.add_edge(v, v + 1, 1).unwrap();
            }
            if y + 1 < height {
                builder.add_edge(v, v + width, 1).unwrap();
            }
        }
    }
    let graph = builder.build();
    let expected: Vec<Key> = (0..width * height)
        .map(|v| ((v % width) + (v / width)) as Key)
        .collect();
    assert_all(&graph, 0, &expected);
}

#[test]
fn test_invalid_source() {
    let graph = WeightedGraph::from_edges(2, &[(0, 1, 1)]).unwrap();
    let expected = PathError::SourceOutOfRange {
        vertex: 2,
        vertex_count: 2,
    };
    assert_eq!(dijkstra_binary(&graph, 2), Err(expected.clone()));
    assert_eq!(dijkstra_d_ary(&graph, 2, 4), Err(expected.clone()));
    assert_eq!(dijkstra_fibonacci(&graph, 2), Err(expected.clone()));
    assert_eq!(dijkstra_radix(&graph, 2), Err(expected));
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_scenario_from_json() {
    let graph = from_json_str(
        r#"{
            "nodes": ["a", "b", "c", "d", "e"],
            "edges": [[0, 1, 4], [0, 2, 1], [2, 1, 2], [1, 3, 1], [2, 3, 5], [3, 4, 3]]
        }"#,
    )
    .unwrap();
    assert_all(&graph, 0, &[0, 3, 1, 4, 7]);
}

#[test]
fn test_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"nodes": [0, 1, 2], "edges": [[0, 2, 5], [2, 1, 1]]}}"#).unwrap();
    let graph = load_json(file.path()).unwrap();
    assert_all(&graph, 1, &[6, 0, 1]);
}

#[test]
fn test_malformed_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"nodes": [0, 1], "edges": [[0, 1, "heavy"]]}}"#).unwrap();
    assert!(matches!(load_json(file.path()), Err(LoadError::Parse(_))));
}

#[test]
fn test_generated_graph_round_trip() {
    let config = GeneratorConfig {
        nodes: 300,
        edges: 1_200,
        seed: 2024,
        ..GeneratorConfig::default()
    };
    let description = random_graph(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated.json");
    save_json(&description, &path).unwrap();

    let graph = load_json(&path).unwrap();
    assert_eq!(graph.vertex_count(), 300);
    assert_eq!(graph.edge_count(), 1_200);

    let [binary, d_ary, fibonacci, radix] = all_bindings(&graph, 0);
    assert_eq!(binary, d_ary);
    assert_eq!(binary, fibonacci);
    assert_eq!(binary, radix);
}

// ============================================================================
// Harness
// ============================================================================

#[test]
fn test_compare_generated_graph() {
    let description = random_graph(&GeneratorConfig {
        nodes: 150,
        edges: 600,
        seed: 9,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let graph = description.to_graph().unwrap();

    let config = HarnessConfig {
        source: 3,
        arity: None,
        warmup: 1,
        iterations: 2,
    };
    let report = compare(&graph, &config).unwrap();
    assert!(report.consistent);
    assert_eq!(report.vertices, 150);
    assert_eq!(report.edges, 600);
    assert_eq!(
        report.get(QueueKind::DAry).unwrap().arity,
        Some(graph.recommended_arity())
    );
    assert_eq!(
        report.get(QueueKind::Fibonacci).unwrap().distances,
        dijkstra_binary(&graph, 3).unwrap()
    );
}

// ============================================================================
// Density presets and experiments
// ============================================================================

#[test]
fn test_density_presets_through_generator() {
    let nodes = 60;
    let mut previous = 0;
    for density in Density::ALL {
        let graph = random_graph(&GeneratorConfig::with_density(nodes, density, 4))
            .unwrap()
            .to_graph()
            .unwrap();
        assert_eq!(graph.edge_count(), density.edge_count(nodes), "{density}");
        assert!(graph.edge_count() >= previous, "{density} is not denser");
        previous = graph.edge_count();
        assert_all(&graph, 0, &dijkstra_binary(&graph, 0).unwrap());
    }
    assert_eq!(previous, 60 * 59 / 2);
}

#[test]
fn test_experiment_writes_csv() {
    let data = tempfile::tempdir().unwrap();
    for (i, density) in [Density::Sparse, Density::Middle, Density::Dense]
        .into_iter()
        .enumerate()
    {
        let description =
            random_graph(&GeneratorConfig::with_density(25, density, i as u64)).unwrap();
        let name = format!("graph_n25_e{}_{density}.json", description.edges.len());
        save_json(&description, data.path().join(name)).unwrap();
    }
    std::fs::write(data.path().join("README.txt"), "not a graph").unwrap();

    let config = HarnessConfig {
        warmup: 0,
        iterations: 1,
        ..HarnessConfig::default()
    };
    let rows = run_experiment(data.path(), &config).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.consistent));
    // Sorted by file name: e175 (middle) < e300 (dense) < e50 (sparse)
    let edges: Vec<_> = rows.iter().map(|r| r.edges).collect();
    assert_eq!(edges, [175, 300, 50]);

    let out = tempfile::tempdir().unwrap();
    let csv_path = out.path().join("results.csv");
    write_csv(&rows, &csv_path).unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("graph,vertices,edges,arity,"));
    assert!(lines[2].starts_with("graph_n25_e300_dense.json,25,300,24,"));
    assert!(lines.iter().skip(1).all(|l| l.ends_with(",true")));
}

#[test]
fn test_experiment_on_empty_directory() {
    let data = tempfile::tempdir().unwrap();
    let rows = run_experiment(data.path(), &HarnessConfig::default()).unwrap();
    assert!(rows.is_empty());
}
