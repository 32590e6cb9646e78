//! Undirected, non-negatively weighted graphs
//!
//! A [`WeightedGraph`] is built once through a [`GraphBuilder`] and is
//! read-only afterwards, so it can be shared by any number of sequential
//! shortest-path runs.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new(3);
//! builder.add_edge(0, 1, 4)?;
//! builder.add_edge(1, 2, 1)?;
//! let graph = builder.build();
//!
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(graph.neighbors(1), &[(0, 4), (2, 1)]);
//! # Ok::<(), dijkstra_heaps::graph::GraphError>(())
//! ```

use crate::traits::{Vertex, Weight};
use thiserror::Error;

/// Errors raised while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint is not a vertex of the graph.
    #[error("edge ({u}, {v}) references a vertex outside 0..{vertex_count}")]
    VertexOutOfRange {
        /// First endpoint.
        u: Vertex,
        /// Second endpoint.
        v: Vertex,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Accumulates undirected edges for a [`WeightedGraph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: Vec<Vec<(Vertex, Weight)>>,
    edge_count: usize,
}

impl GraphBuilder {
    /// Starts a graph on vertices `0..vertex_count` with no edges.
    pub fn new(vertex_count: usize) -> Self {
        GraphBuilder {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Adds the undirected edge `{u, v}` with weight `weight`.
    ///
    /// Both directions go into the adjacency lists; the edge counts once.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex, weight: Weight) -> GraphResult<&mut Self> {
        let vertex_count = self.adjacency.len();
        if u >= vertex_count || v >= vertex_count {
            return Err(GraphError::VertexOutOfRange { u, v, vertex_count });
        }
        self.adjacency[u].push((v, weight));
        self.adjacency[v].push((u, weight));
        self.edge_count += 1;
        Ok(self)
    }

    /// Freezes the graph.
    pub fn build(self) -> WeightedGraph {
        WeightedGraph {
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        }
    }
}

/// Immutable adjacency-list graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<(Vertex, Weight)>>,
    edge_count: usize,
}

impl WeightedGraph {
    /// Builds a graph from `(u, v, weight)` triples.
    pub fn from_edges(vertex_count: usize, edges: &[(Vertex, Vertex, Weight)]) -> GraphResult<Self> {
        let mut builder = GraphBuilder::new(vertex_count);
        for &(u, v, w) in edges {
            builder.add_edge(u, v, w)?;
        }
        Ok(builder.build())
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges added.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// `(neighbor, weight)` pairs of `v`, in insertion order.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex of the graph.
    #[inline]
    pub fn neighbors(&self, v: Vertex) -> &[(Vertex, Weight)] {
        &self.adjacency[v]
    }

    /// Average vertex degree, `2E / V` (0 for an empty graph).
    pub fn average_degree(&self) -> f64 {
        if self.adjacency.is_empty() {
            0.0
        } else {
            2.0 * self.edge_count as f64 / self.adjacency.len() as f64
        }
    }

    /// Branching factor for a d-ary heap on this graph: `max(2, 2E / V)`.
    pub fn recommended_arity(&self) -> usize {
        let v = self.adjacency.len();
        if v == 0 {
            return 2;
        }
        (2 * self.edge_count / v).max(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_undirected() {
        let graph = WeightedGraph::from_edges(3, &[(0, 1, 5), (1, 2, 7)]).unwrap();
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(0), &[(1, 5)]);
        assert_eq!(graph.neighbors(1), &[(0, 5), (2, 7)]);
        assert_eq!(graph.neighbors(2), &[(1, 7)]);
    }

    #[test]
    fn out_of_range_endpoint_is_rejected() {
        let err = WeightedGraph::from_edges(2, &[(0, 2, 1)]).unwrap_err();
        assert_eq!(
            err,
            GraphError::VertexOutOfRange {
                u: 0,
                v: 2,
                vertex_count: 2
            }
        );
        assert!(err.to_string().contains("0..2"));
    }

    #[test]
    fn self_loop_is_stored_twice() {
        let graph = WeightedGraph::from_edges(1, &[(0, 0, 3)]).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors(0), &[(0, 3), (0, 3)]);
    }

    #[test]
    fn recommended_arity() {
        assert_eq!(WeightedGraph::default().recommended_arity(), 2);

        let sparse = WeightedGraph::from_edges(4, &[(0, 1, 1)]).unwrap();
        assert_eq!(sparse.recommended_arity(), 2);

        // 10 edges over 4 vertices: 2E/V = 5
        let edges: Vec<_> = (0..10).map(|i| (i % 4, (i + 1) % 4, 1)).collect();
        let dense = WeightedGraph::from_edges(4, &edges).unwrap();
        assert_eq!(dense.recommended_arity(), 5);
        assert!((dense.average_degree() - 5.0).abs() < f64::EPSILON);
    }
}
