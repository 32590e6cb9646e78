//! Monotone Radix Heap implementation
//!
//! A monotone priority queue for Dijkstra's algorithm with integer edge weights.
//!
//! # Monotone Property
//!
//! A radix heap is a **monotone priority queue**: the keys returned by
//! successive `pop` calls never decrease, so nothing may be pushed with a key
//! below the last extracted one. Dijkstra with non-negative weights satisfies
//! this, since every relaxed distance is `>= d[u]` for the vertex `u` that was
//! just extracted.
//!
//! Entries live in [`BUCKETS`] FIFO buckets. An entry with key `k` sits in
//! bucket 0 if `k <= last`, otherwise in bucket `1 + floor(log2(k ^ last))`,
//! i.e. one past the highest bit in which `k` and `last` differ. When `last`
//! advances to the minimum of bucket `b`, it keeps every bit at or above
//! `b - 1` that the old `last` had, so entries in higher buckets stay put and
//! every entry of bucket `b` lands strictly lower. An entry's bucket index
//! therefore only ever shrinks, which bounds the redistribution work per entry
//! by the bucket count.
//!
//! # Duplicates
//!
//! The radix heap keeps a multiset: `push` always appends, and `decrease_key`
//! appends a fresher entry instead of moving the old one. Callers skip the
//! stale entries when they come out of `pop`.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity          |
//! |----------------|---------------------|
//! | `push`         | O(1)                |
//! | `pop`          | O(log C) amortized* |
//! | `decrease_key` | O(1)                |
//!
//! *Where C is the largest difference between a pushed key and `last`.
//!
//! # References
//!
//! - Ahuja, R. K., Mehlhorn, K., Orlin, J. B., & Tarjan, R. E. (1990).
//!   "Faster algorithms for the shortest path problem."
//!   *Journal of the ACM*, 37(2), 213-223.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::MinPriorityQueue;
//! use dijkstra_heaps::radix::RadixHeap;
//!
//! let mut heap = RadixHeap::new();
//! heap.push(10, 0).unwrap();
//! heap.push(5, 1).unwrap();
//!
//! assert_eq!(heap.pop(), Ok((5, 1)));
//! heap.push(7, 2).unwrap();
//! assert_eq!(heap.pop(), Ok((7, 2)));
//! assert_eq!(heap.pop(), Ok((10, 0)));
//! assert_eq!(heap.monotone_violations(), 0);
//! ```

use crate::traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex, INFINITY};
use std::collections::VecDeque;
use tracing::warn;

/// Number of buckets: one for keys equal to `last`, one per bit of [`Key`].
pub const BUCKETS: usize = Key::BITS as usize + 1;

/// A radix heap (monotone priority queue)
#[derive(Debug)]
pub struct RadixHeap {
    buckets: [VecDeque<(Key, Vertex)>; BUCKETS],
    /// The last extracted minimum (0 before the first pop)
    last: Key,
    len: usize,
    /// Number of queued entries per vertex
    pending: Vec<u32>,
    /// Smallest key queued for each vertex with pending entries
    best: Vec<Key>,
    violations: usize,
}

impl RadixHeap {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap whose vertex index covers `0..vertex_count`
    pub fn with_capacity(vertex_count: usize) -> Self {
        RadixHeap {
            buckets: std::array::from_fn(|_| VecDeque::new()),
            last: 0,
            len: 0,
            pending: vec![0; vertex_count],
            best: vec![INFINITY; vertex_count],
            violations: 0,
        }
    }

    /// The most recently extracted key
    pub fn last_extracted(&self) -> Key {
        self.last
    }

    /// How many pushes so far used a key below [`last_extracted`](Self::last_extracted)
    ///
    /// Such pushes break the monotone contract and their position in the pop
    /// order is unspecified. A shortest-path run never causes one.
    pub fn monotone_violations(&self) -> usize {
        self.violations
    }

    /// Compute the bucket index for a key relative to `last`
    #[inline]
    fn bucket_index(&self, key: Key) -> usize {
        if key <= self.last {
            0
        } else {
            (Key::BITS - (key ^ self.last).leading_zeros()) as usize
        }
    }

    fn first_non_empty(&self) -> Option<usize> {
        self.buckets.iter().position(|b| !b.is_empty())
    }

    fn append(&mut self, key: Key, vertex: Vertex) {
        if key < self.last {
            self.violations += 1;
            warn!(key, last = self.last, vertex, "radix heap monotone violation");
        }
        if vertex >= self.pending.len() {
            self.pending.resize(vertex + 1, 0);
            self.best.resize(vertex + 1, INFINITY);
        }
        let bucket = self.bucket_index(key);
        self.buckets[bucket].push_back((key, vertex));
        self.pending[vertex] += 1;
        self.best[vertex] = self.best[vertex].min(key);
        self.len += 1;
    }

    /// Advances `last` to the minimum of bucket `src` and spreads that
    /// bucket over strictly lower buckets
    fn redistribute(&mut self, src: usize) {
        let Some(min_key) = self.buckets[src].iter().map(|&(key, _)| key).min() else {
            return;
        };
        self.last = min_key;

        let entries = std::mem::take(&mut self.buckets[src]);
        for (key, vertex) in entries {
            let bucket = self.bucket_index(key);
            debug_assert!(bucket < src);
            self.buckets[bucket].push_back((key, vertex));
        }
    }
}

impl Default for RadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl MinPriorityQueue for RadixHeap {
    const DISCOVERY: Discovery = Discovery::Lazy;

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, vertex: Vertex) -> bool {
        self.pending.get(vertex).is_some_and(|&n| n > 0)
    }

    fn push(&mut self, key: Key, vertex: Vertex) -> Result<(), QueueError> {
        self.append(key, vertex);
        Ok(())
    }

    fn pop(&mut self) -> Result<(Key, Vertex), QueueError> {
        loop {
            match self.first_non_empty() {
                None => return Err(QueueError::EmptyQueue),
                Some(0) => break,
                Some(bucket) => self.redistribute(bucket),
            }
        }

        let (key, vertex) = self.buckets[0].pop_front().ok_or(QueueError::EmptyQueue)?;
        self.len -= 1;
        self.last = self.last.max(key);
        self.pending[vertex] -= 1;
        if self.pending[vertex] == 0 {
            self.best[vertex] = INFINITY;
        }
        Ok((key, vertex))
    }

    fn peek(&self) -> Option<(Key, Vertex)> {
        let bucket = self.first_non_empty()?;
        if bucket == 0 {
            return self.buckets[0].front().copied();
        }
        // Buckets cover disjoint, increasing key ranges, so the lowest
        // non-empty one holds the global minimum.
        self.buckets[bucket].iter().copied().min_by_key(|&(key, _)| key)
    }

    fn decrease_key(&mut self, vertex: Vertex, new_key: Key) -> bool {
        if !self.contains(vertex) || new_key >= self.best[vertex] {
            return false;
        }
        self.append(new_key, vertex);
        true
    }
}
