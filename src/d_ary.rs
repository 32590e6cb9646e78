//! Indexed d-ary Heap implementation
//!
//! Generalizes [`BinaryHeap`](crate::binary::BinaryHeap) to a configurable
//! fan-out `d`. A wider node makes the tree shallower, so `push` and
//! `decrease_key` do fewer swaps, while `pop` compares up to `d` children per
//! level. Shortest-path callers usually pick `d` from the average degree of
//! the graph, see [`WeightedGraph::recommended_arity`](crate::graph::WeightedGraph::recommended_arity).
//!
//! Parent of slot `i` is `(i - 1) / d`; its children start at `d * i + 1`.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity       |
//! |----------------|------------------|
//! | `push`         | O(log_d n)       |
//! | `pop`          | O(d · log_d n)   |
//! | `decrease_key` | O(log_d n)       |
//! | `contains`     | O(1)             |

use crate::traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex};
use tracing::warn;

/// Smallest branching factor a d-ary heap supports.
pub const MIN_ARITY: usize = 2;

/// A d-ary min-heap over `(key, vertex)` entries
#[derive(Debug)]
pub struct DAryHeap {
    d: usize,
    data: Vec<(Key, Vertex)>,
    /// Slot of each queued vertex in `data`
    position: Vec<Option<usize>>,
}

impl DAryHeap {
    /// Creates an empty heap with branching factor `d`
    ///
    /// A `d` below [`MIN_ARITY`] is clamped to 2 rather than rejected.
    pub fn with_arity(d: usize) -> Self {
        Self::with_arity_and_capacity(d, 0)
    }

    /// Like [`with_arity`](Self::with_arity), pre-sizing the vertex index
    pub fn with_arity_and_capacity(d: usize, vertex_count: usize) -> Self {
        let d = if d < MIN_ARITY {
            warn!(requested = d, used = MIN_ARITY, "clamping d-ary heap branching factor");
            MIN_ARITY
        } else {
            d
        };
        Self {
            d,
            data: Vec::with_capacity(vertex_count),
            position: vec![None; vertex_count],
        }
    }

    /// Creates an empty heap, refusing a branching factor below 2
    ///
    /// # Errors
    /// Returns [`QueueError::InvalidArity`] when `d < 2`.
    pub fn try_with_arity(d: usize) -> Result<Self, QueueError> {
        if d < MIN_ARITY {
            return Err(QueueError::InvalidArity(d));
        }
        Ok(Self::with_arity(d))
    }

    /// The branching factor in use
    pub fn arity(&self) -> usize {
        self.d
    }

    fn parent(&self, index: usize) -> usize {
        (index - 1) / self.d
    }

    fn first_child(&self, index: usize) -> usize {
        self.d * index + 1
    }

    fn slot(&self, vertex: Vertex) -> Option<usize> {
        self.position.get(vertex).copied().flatten()
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.position[self.data[a].1] = Some(a);
        self.position[self.data[b].1] = Some(b);
    }

    fn heapify_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = self.parent(index);
            if self.data[index].0 < self.data[parent].0 {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    fn heapify_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let first = self.first_child(index);
            if first >= len {
                break;
            }
            let last = first.saturating_add(self.d).min(len);

            let mut smallest = index;
            for child in first..last {
                if self.data[child].0 < self.data[smallest].0 {
                    smallest = child;
                }
            }

            if smallest == index {
                break;
            }
            self.swap(index, smallest);
            index = smallest;
        }
    }
}

impl Default for DAryHeap {
    fn default() -> Self {
        Self::with_arity(MIN_ARITY)
    }
}

impl MinPriorityQueue for DAryHeap {
    const DISCOVERY: Discovery = Discovery::Lazy;

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn contains(&self, vertex: Vertex) -> bool {
        self.slot(vertex).is_some()
    }

    fn push(&mut self, key: Key, vertex: Vertex) -> Result<(), QueueError> {
        if self.contains(vertex) {
            return Ok(());
        }
        if vertex >= self.position.len() {
            self.position.resize(vertex + 1, None);
        }
        let index = self.data.len();
        self.data.push((key, vertex));
        self.position[vertex] = Some(index);
        self.heapify_up(index);
        Ok(())
    }

    fn pop(&mut self) -> Result<(Key, Vertex), QueueError> {
        let last = self.data.len().checked_sub(1).ok_or(QueueError::EmptyQueue)?;
        self.swap(0, last);
        let (key, vertex) = self.data.pop().ok_or(QueueError::EmptyQueue)?;
        self.position[vertex] = None;
        if !self.data.is_empty() {
            self.heapify_down(0);
        }
        Ok((key, vertex))
    }

    fn peek(&self) -> Option<(Key, Vertex)> {
        self.data.first().copied()
    }

    fn decrease_key(&mut self, vertex: Vertex, new_key: Key) -> bool {
        match self.slot(vertex) {
            Some(index) if new_key < self.data[index].0 => {
                self.data[index].0 = new_key;
                self.heapify_up(index);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(heap: &mut DAryHeap) -> Vec<Key> {
        let mut keys = Vec::new();
        while let Ok((key, _)) = heap.pop() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn test_arity_is_clamped() {
        assert_eq!(DAryHeap::with_arity(0).arity(), 2);
        assert_eq!(DAryHeap::with_arity(1).arity(), 2);
        assert_eq!(DAryHeap::with_arity(5).arity(), 5);
    }

    #[test]
    fn test_strict_constructor_rejects_small_arity() {
        assert_eq!(
            DAryHeap::try_with_arity(1).unwrap_err(),
            QueueError::InvalidArity(1)
        );
        assert_eq!(DAryHeap::try_with_arity(3).unwrap().arity(), 3);
    }

    #[test]
    fn test_pop_order_for_several_arities() {
        for d in [2, 3, 4, 8, 17] {
            let mut heap = DAryHeap::with_arity(d);
            for (v, key) in [9u64, 4, 7, 1, 8, 2, 6, 3, 5, 0].into_iter().enumerate() {
                heap.push(key, v).unwrap();
            }
            assert_eq!(drain(&mut heap), (0..10).collect::<Vec<_>>(), "d = {d}");
        }
    }

    #[test]
    fn test_duplicate_push_and_decrease_key() {
        let mut heap = DAryHeap::with_arity_and_capacity(3, 8);
        heap.push(40, 1).unwrap();
        heap.push(30, 2).unwrap();
        heap.push(5, 1).unwrap();
        assert_eq!(heap.len(), 2);

        assert!(heap.decrease_key(1, 10));
        assert!(!heap.decrease_key(1, 10));
        assert!(!heap.decrease_key(6, 1));

        assert_eq!(heap.pop(), Ok((10, 1)));
        assert_eq!(heap.pop(), Ok((30, 2)));
        assert_eq!(heap.pop(), Err(QueueError::EmptyQueue));
    }

    #[test]
    fn test_index_consistent_after_pops() {
        let mut heap = DAryHeap::with_arity(4);
        for v in 0..50 {
            heap.push(((v * 37) % 50) as Key, v).unwrap();
        }
        for _ in 0..20 {
            heap.pop().unwrap();
            for (i, &(_, v)) in heap.data.iter().enumerate() {
                assert_eq!(heap.position[v], Some(i));
            }
        }
    }
}
