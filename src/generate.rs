//! Seeded random graph generation
//!
//! Produces [`GraphDescription`]s with a fixed number of distinct undirected
//! edges and uniformly drawn weights, for benchmarking the queues on graphs
//! of controlled size and density.

use crate::loader::GraphDescription;
use crate::traits::{Vertex, Weight};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Errors for generator requests that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// More distinct non-loop edges were requested than the vertex set allows.
    #[error("{requested} edges requested but {nodes} vertices allow at most {max}")]
    TooManyEdges {
        /// Requested edge count.
        requested: usize,
        /// Vertex count.
        nodes: usize,
        /// `nodes * (nodes - 1) / 2`.
        max: usize,
    },
    /// `min_weight > max_weight`.
    #[error("empty weight range {min}..={max}")]
    EmptyWeightRange {
        /// Lower bound.
        min: Weight,
        /// Upper bound.
        max: Weight,
    },
    /// A density name other than `sparse`, `typical`, `middle` or `dense`.
    #[error("unknown density {0:?}, expected sparse, typical, middle or dense")]
    UnknownDensity(String),
}

/// Most distinct undirected non-loop edges on `nodes` vertices.
pub fn max_edges(nodes: usize) -> usize {
    nodes.saturating_mul(nodes.saturating_sub(1)) / 2
}

/// Edge-count presets relative to the vertex count `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Density {
    /// `2n` edges.
    Sparse,
    /// `5n` edges.
    #[default]
    Typical,
    /// Halfway between sparse and dense.
    Middle,
    /// Every pair connected, `n(n - 1) / 2` edges.
    Dense,
}

impl Density {
    /// Every preset, sparsest first.
    pub const ALL: [Density; 4] = [
        Density::Sparse,
        Density::Typical,
        Density::Middle,
        Density::Dense,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            Density::Sparse => "sparse",
            Density::Typical => "typical",
            Density::Middle => "middle",
            Density::Dense => "dense",
        }
    }

    /// Edge count for `nodes` vertices, capped at [`max_edges`].
    pub fn edge_count(self, nodes: usize) -> usize {
        let max = max_edges(nodes);
        let sparse = nodes.saturating_mul(2);
        let preset = match self {
            Density::Sparse => sparse,
            Density::Typical => nodes.saturating_mul(5),
            Density::Middle => sparse / 2 + max / 2,
            Density::Dense => max,
        };
        preset.min(max)
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Density {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Density::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| GenerateError::UnknownDensity(s.to_string()))
    }
}

/// Parameters of a random graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of vertices.
    pub nodes: usize,
    /// Number of distinct undirected edges.
    pub edges: usize,
    /// Smallest edge weight (inclusive).
    pub min_weight: Weight,
    /// Largest edge weight (inclusive).
    pub max_weight: Weight,
    /// PRNG seed; equal configs produce equal graphs.
    pub seed: u64,
}

impl GeneratorConfig {
    /// Config for `nodes` vertices with the edge count of a [`Density`] preset.
    pub fn with_density(nodes: usize, density: Density, seed: u64) -> Self {
        GeneratorConfig {
            nodes,
            edges: density.edge_count(nodes),
            seed,
            ..GeneratorConfig::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            nodes: 100,
            edges: 500,
            min_weight: 1,
            max_weight: 10,
            seed: 0,
        }
    }
}

/// Generates a random undirected graph without self-loops or parallel edges.
pub fn random_graph(config: &GeneratorConfig) -> Result<GraphDescription, GenerateError> {
    let nodes = config.nodes;
    let max = max_edges(nodes);
    if config.edges > max {
        return Err(GenerateError::TooManyEdges {
            requested: config.edges,
            nodes,
            max,
        });
    }
    if config.min_weight > config.max_weight {
        return Err(GenerateError::EmptyWeightRange {
            min: config.min_weight,
            max: config.max_weight,
        });
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut used: FxHashSet<(Vertex, Vertex)> = FxHashSet::default();
    let mut edges = Vec::with_capacity(config.edges);

    while edges.len() < config.edges {
        let u = rng.random_range(0..nodes);
        let v = rng.random_range(0..nodes);
        if u == v {
            continue;
        }
        if used.insert((u.min(v), u.max(v))) {
            let weight = rng.random_range(config.min_weight..=config.max_weight);
            edges.push((u, v, weight));
        }
    }

    debug!(nodes, edges = edges.len(), seed = config.seed, "generated graph");
    Ok(GraphDescription {
        nodes: (0..nodes).map(serde_json::Value::from).collect(),
        edges,
    })
}
