//! Wall-clock comparison of the four queue bindings
//!
//! Each [`QueueKind`] is run a few times untimed to warm caches, then timed
//! over a fixed number of iterations. [`compare`] runs all four on the same
//! graph, checks that their distance vectors agree and reports speed
//! relative to the binary heap.

use crate::graph::WeightedGraph;
use crate::shortest_path::{
    dijkstra_binary, dijkstra_d_ary, dijkstra_fibonacci, dijkstra_radix, PathError,
};
use crate::traits::{Key, Vertex};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{info, warn};

/// One of the four shortest-path bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// [`crate::binary::BinaryHeap`]
    Binary,
    /// [`crate::d_ary::DAryHeap`]
    DAry,
    /// [`crate::fibonacci::FibonacciHeap`]
    Fibonacci,
    /// [`crate::radix::RadixHeap`]
    Radix,
}

impl QueueKind {
    /// Every kind, binary heap first.
    pub const ALL: [QueueKind; 4] = [
        QueueKind::Binary,
        QueueKind::DAry,
        QueueKind::Fibonacci,
        QueueKind::Radix,
    ];

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            QueueKind::Binary => "Binary Heap",
            QueueKind::DAry => "D-ary Heap",
            QueueKind::Fibonacci => "Fibonacci Heap",
            QueueKind::Radix => "Radix Heap",
        }
    }

    /// Runs this binding once. `arity` only matters for [`QueueKind::DAry`].
    pub fn run(
        self,
        graph: &WeightedGraph,
        source: Vertex,
        arity: usize,
    ) -> Result<Vec<Key>, PathError> {
        match self {
            QueueKind::Binary => dijkstra_binary(graph, source),
            QueueKind::DAry => dijkstra_d_ary(graph, source, arity),
            QueueKind::Fibonacci => dijkstra_fibonacci(graph, source),
            QueueKind::Radix => dijkstra_radix(graph, source),
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settings for a timing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Source vertex.
    pub source: Vertex,
    /// d-ary branching factor; `None` uses [`WeightedGraph::recommended_arity`].
    pub arity: Option<usize>,
    /// Untimed runs before measuring.
    pub warmup: usize,
    /// Timed runs; 0 is treated as 1.
    pub iterations: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            source: 0,
            arity: None,
            warmup: 3,
            iterations: 5,
        }
    }
}

impl HarnessConfig {
    /// Branching factor actually used on `graph`.
    pub fn arity_for(&self, graph: &WeightedGraph) -> usize {
        self.arity.unwrap_or_else(|| graph.recommended_arity())
    }
}

/// Summary of the timed iterations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TimingStats {
    /// Arithmetic mean.
    pub mean_ms: f64,
    /// Fastest iteration.
    pub min_ms: f64,
    /// Slowest iteration.
    pub max_ms: f64,
    /// Population standard deviation.
    pub std_dev_ms: f64,
}

impl TimingStats {
    /// Summarizes a set of samples; all zeros when `samples` is empty.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return TimingStats::default();
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        TimingStats {
            mean_ms: mean,
            min_ms: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max_ms: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std_dev_ms: variance.sqrt(),
        }
    }
}

/// Result of timing one binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindReport {
    /// Which binding.
    pub kind: QueueKind,
    /// Branching factor, for the d-ary heap only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arity: Option<usize>,
    /// Timing summary.
    pub timings: TimingStats,
    /// Distances from the last timed run.
    #[serde(skip)]
    pub distances: Vec<Key>,
}

/// Times a single binding on `graph`.
pub fn run_kind(
    kind: QueueKind,
    graph: &WeightedGraph,
    config: &HarnessConfig,
) -> Result<KindReport, PathError> {
    let arity = config.arity_for(graph);
    for _ in 0..config.warmup {
        kind.run(graph, config.source, arity)?;
    }

    let iterations = config.iterations.max(1);
    let mut samples = Vec::with_capacity(iterations);
    let mut distances = Vec::new();
    for _ in 0..iterations {
        let start = Instant::now();
        distances = kind.run(graph, config.source, arity)?;
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    let timings = TimingStats::from_samples(&samples);
    info!(
        queue = kind.label(),
        mean_ms = timings.mean_ms,
        iterations,
        "timed shortest paths"
    );
    Ok(KindReport {
        kind,
        arity: (kind == QueueKind::DAry).then_some(arity),
        timings,
        distances,
    })
}

/// Mean time of the binary heap divided by the mean time of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedRatio {
    /// Binding compared against the binary heap.
    pub kind: QueueKind,
    /// Above 1 means `kind` was faster. `None` if `kind` measured zero time.
    pub ratio: Option<f64>,
}

/// All four bindings timed on one graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Vertices in the graph.
    pub vertices: usize,
    /// Undirected edges in the graph.
    pub edges: usize,
    /// Source vertex.
    pub source: Vertex,
    /// One entry per [`QueueKind::ALL`], in that order.
    pub reports: Vec<KindReport>,
    /// Whether every binding produced the same distance vector.
    pub consistent: bool,
    /// Speed of the non-binary bindings relative to the binary heap.
    pub speed_ratios: Vec<SpeedRatio>,
}

impl ComparisonReport {
    /// Report for `kind`, if it was run.
    pub fn get(&self, kind: QueueKind) -> Option<&KindReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    /// Serializes the report to pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Times every binding on `graph` and checks that they agree.
pub fn compare(
    graph: &WeightedGraph,
    config: &HarnessConfig,
) -> Result<ComparisonReport, PathError> {
    let reports = QueueKind::ALL
        .iter()
        .map(|&kind| run_kind(kind, graph, config))
        .collect::<Result<Vec<_>, _>>()?;

    let consistent = reports
        .windows(2)
        .all(|pair| pair[0].distances == pair[1].distances);
    if !consistent {
        warn!(source = config.source, "distance vectors disagree between queues");
    }

    let baseline = reports[0].timings.mean_ms;
    let speed_ratios = reports[1..]
        .iter()
        .map(|r| SpeedRatio {
            kind: r.kind,
            ratio: (r.timings.mean_ms > 0.0).then(|| baseline / r.timings.mean_ms),
        })
        .collect();

    Ok(ComparisonReport {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        source: config.source,
        reports,
        consistent,
        speed_ratios,
    })
}
