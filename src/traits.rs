//! Common contract for the vertex-keyed priority queues
//!
//! Every queue in this crate stores `(key, vertex)` entries and tracks which
//! vertices are present, so `contains` and `decrease_key` never scan. The four
//! implementations deliberately disagree on what a duplicate `push` means:
//!
//! | Variant                                         | duplicate `push`                 | `decrease_key`                         | discovery |
//! |-------------------------------------------------|----------------------------------|----------------------------------------|-----------|
//! | [`BinaryHeap`](crate::binary::BinaryHeap)       | silent no-op                     | in place, sift up                      | lazy      |
//! | [`DAryHeap`](crate::d_ary::DAryHeap)            | silent no-op                     | in place, sift up                      | lazy      |
//! | [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) | [`QueueError::DuplicateVertex`] | in place, cut + cascading cut         | eager     |
//! | [`RadixHeap`](crate::radix::RadixHeap)          | appends another entry            | appends a fresher entry                | lazy      |
//!
//! The shortest-path engine reads [`MinPriorityQueue::DISCOVERY`] to decide
//! how to drive each queue.

use thiserror::Error;

/// Vertex identifier, an index into the graph's adjacency lists.
pub type Vertex = usize;

/// Priority of a queue entry (a tentative distance).
pub type Key = u64;

/// Non-negative edge weight.
pub type Weight = u32;

/// Sentinel distance for vertices that have not been reached.
pub const INFINITY: Key = Key::MAX;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `pop` was called on a queue with no entries
    #[error("pop from an empty priority queue")]
    EmptyQueue,
    /// The vertex is already present and the queue rejects duplicates
    #[error("vertex {0} is already present in the queue")]
    DuplicateVertex(Vertex),
    /// A d-ary heap was asked for a branching factor below 2
    #[error("branching factor {0} is invalid, a d-ary heap needs d >= 2")]
    InvalidArity(usize),
}

/// How the shortest-path engine feeds vertices into a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// Seed with the source only; push a vertex when it is first reached and
    /// tolerate stale entries on `pop`.
    Lazy,
    /// Insert every vertex up front (the source at 0, the rest at
    /// [`INFINITY`]) and only ever lower keys afterwards.
    Eager,
}

/// Minimum priority queue keyed by vertex
///
/// A vertex appears at most once in the set-semantics variants. Once a vertex
/// has been popped during a shortest-path run it is never pushed back into the
/// same queue instance.
///
/// # Example
///
/// ```rust
/// use dijkstra_heaps::MinPriorityQueue;
/// use dijkstra_heaps::binary::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.push(5, 0).unwrap();
/// heap.push(3, 1).unwrap();
/// assert!(heap.decrease_key(0, 1));
/// assert_eq!(heap.pop(), Ok((1, 0)));
/// assert_eq!(heap.pop(), Ok((3, 1)));
/// assert!(heap.pop().is_err());
/// ```
pub trait MinPriorityQueue {
    /// Discovery strategy the shortest-path engine must use with this queue.
    const DISCOVERY: Discovery;

    /// Returns true if the queue holds no entries
    fn is_empty(&self) -> bool;

    /// Returns the number of entries currently stored
    fn len(&self) -> usize;

    /// Returns true if `vertex` currently has an entry in the queue
    fn contains(&self, vertex: Vertex) -> bool;

    /// Inserts `vertex` with priority `key`
    ///
    /// What happens when the vertex is already present is variant specific,
    /// see the table in the `traits` module docs.
    fn push(&mut self, key: Key, vertex: Vertex) -> Result<(), QueueError>;

    /// Removes and returns the entry with the smallest key
    ///
    /// Ties are broken arbitrarily.
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if there is nothing to pop.
    fn pop(&mut self) -> Result<(Key, Vertex), QueueError>;

    /// Returns the entry `pop` would return, without removing it
    fn peek(&self) -> Option<(Key, Vertex)>;

    /// Lowers the key of `vertex` to `new_key`
    ///
    /// A no-op returning `false` when the vertex is absent or `new_key` is not
    /// strictly smaller than its current key; returns `true` otherwise.
    fn decrease_key(&mut self, vertex: Vertex, new_key: Key) -> bool;
}
