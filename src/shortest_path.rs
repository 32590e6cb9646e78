//! Dijkstra's single-source shortest paths over any [`MinPriorityQueue`]
//!
//! One relaxation loop serves all four queues. The queue's
//! [`Discovery`] strategy decides how vertices enter it:
//!
//! - [`Discovery::Lazy`]: only the source is queued at first. A vertex is
//!   pushed the first time it is reached and decreased afterwards. Entries
//!   whose key exceeds the settled distance are skipped on `pop`.
//! - [`Discovery::Eager`]: every vertex is queued up front, the source at 0
//!   and everything else at [`INFINITY`]. Keys are only ever lowered and
//!   every pop is final.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::graph::WeightedGraph;
//! use dijkstra_heaps::shortest_path::{dijkstra_binary, dijkstra_fibonacci};
//! use dijkstra_heaps::INFINITY;
//!
//! let graph = WeightedGraph::from_edges(4, &[(0, 1, 2), (1, 2, 3)])?;
//! let dist = dijkstra_binary(&graph, 0)?;
//! assert_eq!(dist, vec![0, 2, 5, INFINITY]);
//! assert_eq!(dijkstra_fibonacci(&graph, 0)?, dist);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::binary::BinaryHeap;
use crate::d_ary::DAryHeap;
use crate::fibonacci::FibonacciHeap;
use crate::graph::WeightedGraph;
use crate::radix::RadixHeap;
use crate::traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex, INFINITY};
use thiserror::Error;
use tracing::debug;

/// Errors from a shortest-path run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The source is not a vertex of the graph.
    #[error("source vertex {vertex} is outside 0..{vertex_count}")]
    SourceOutOfRange {
        /// Requested source.
        vertex: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
    /// The queue rejected an operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Counters collected during one run.
#[derive(Debug, Default, Clone, Copy)]
struct RunStats {
    pops: usize,
    stale: usize,
    relaxations: usize,
}

/// Computes distances from `source` to every vertex using `queue`.
///
/// `queue` should be empty; it is drained by the time this returns, so a
/// caller can inspect its bookkeeping afterwards. Unreachable vertices get
/// [`INFINITY`].
pub fn shortest_paths_with<Q: MinPriorityQueue>(
    graph: &WeightedGraph,
    source: Vertex,
    queue: &mut Q,
) -> Result<Vec<Key>, PathError> {
    let vertex_count = graph.vertex_count();
    if source >= vertex_count {
        return Err(PathError::SourceOutOfRange {
            vertex: source,
            vertex_count,
        });
    }

    let mut dist = vec![INFINITY; vertex_count];
    dist[source] = 0;
    let mut stats = RunStats::default();

    match Q::DISCOVERY {
        Discovery::Lazy => queue.push(0, source)?,
        Discovery::Eager => {
            for (v, &d) in dist.iter().enumerate() {
                queue.push(d, v)?;
            }
        }
    }

    while !queue.is_empty() {
        let (d, u) = queue.pop()?;
        stats.pops += 1;
        if Q::DISCOVERY == Discovery::Lazy && d > dist[u] {
            stats.stale += 1;
            continue;
        }

        for &(v, w) in graph.neighbors(u) {
            let candidate = dist[u].saturating_add(Key::from(w));
            if candidate >= dist[v] {
                continue;
            }
            dist[v] = candidate;
            stats.relaxations += 1;
            match Q::DISCOVERY {
                Discovery::Lazy if !queue.contains(v) => queue.push(candidate, v)?,
                _ => {
                    queue.decrease_key(v, candidate);
                }
            }
        }
    }

    debug!(
        vertices = vertex_count,
        source,
        pops = stats.pops,
        stale = stats.stale,
        relaxations = stats.relaxations,
        "shortest paths computed"
    );
    Ok(dist)
}

/// Dijkstra with a [`BinaryHeap`].
pub fn dijkstra_binary(graph: &WeightedGraph, source: Vertex) -> Result<Vec<Key>, PathError> {
    let mut queue = BinaryHeap::with_capacity(graph.vertex_count());
    shortest_paths_with(graph, source, &mut queue)
}

/// Dijkstra with a [`DAryHeap`] of branching factor `d`.
///
/// `d < 2` is clamped to 2 with a warning.
pub fn dijkstra_d_ary(
    graph: &WeightedGraph,
    source: Vertex,
    d: usize,
) -> Result<Vec<Key>, PathError> {
    let mut queue = DAryHeap::with_arity_and_capacity(d, graph.vertex_count());
    shortest_paths_with(graph, source, &mut queue)
}

/// Dijkstra with a [`FibonacciHeap`].
pub fn dijkstra_fibonacci(graph: &WeightedGraph, source: Vertex) -> Result<Vec<Key>, PathError> {
    let mut queue = FibonacciHeap::with_capacity(graph.vertex_count());
    shortest_paths_with(graph, source, &mut queue)
}

/// Dijkstra with a [`RadixHeap`].
pub fn dijkstra_radix(graph: &WeightedGraph, source: Vertex) -> Result<Vec<Key>, PathError> {
    let mut queue = RadixHeap::with_capacity(graph.vertex_count());
    shortest_paths_with(graph, source, &mut queue)
}

/// Number of vertices with a finite distance.
pub fn reachable_count(dist: &[Key]) -> usize {
    dist.iter().filter(|&&d| d != INFINITY).count()
}
