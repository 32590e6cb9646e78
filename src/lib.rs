//! Dijkstra's Algorithm over Interchangeable Priority Queues
//!
//! This crate computes single-source shortest paths on undirected,
//! non-negatively weighted graphs with one of four min-priority queues, so
//! their behavior and running time can be compared on the same input.
//!
//! # Queues
//!
//! - **Binary Heap**: O(log n) push, pop and decrease_key
//! - **D-ary Heap**: O(log_d n) push and decrease_key; O(d log_d n) pop
//! - **Fibonacci Heap**: O(1) amortized push and decrease_key; O(log n) amortized pop
//! - **Radix Heap**: O(1) push; O(log C) amortized pop for monotone workloads
//!
//! All four implement [`MinPriorityQueue`]. They differ in how duplicate
//! pushes are treated, see the [`traits`] module.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::graph::GraphBuilder;
//! use dijkstra_heaps::shortest_path::{dijkstra_d_ary, dijkstra_radix};
//!
//! let mut builder = GraphBuilder::new(3);
//! builder.add_edge(0, 1, 4)?.add_edge(1, 2, 1)?.add_edge(0, 2, 7)?;
//! let graph = builder.build();
//!
//! assert_eq!(dijkstra_radix(&graph, 0)?, vec![0, 4, 5]);
//! assert_eq!(dijkstra_d_ary(&graph, 0, graph.recommended_arity())?, vec![0, 4, 5]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod binary;
pub mod d_ary;
pub mod experiment;
pub mod fibonacci;
pub mod generate;
pub mod graph;
pub mod harness;
pub mod loader;
pub mod radix;
pub mod shortest_path;
pub mod traits;

// Re-export the queue contract for convenience
pub use traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex, Weight, INFINITY};
