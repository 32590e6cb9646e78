//! Indexed Binary Heap implementation
//!
//! A classic array-backed binary min-heap extended with a vertex → slot index,
//! which is what makes `contains` O(1) and `decrease_key` O(log n).
//!
//! # Time Complexity
//!
//! | Operation      | Complexity |
//! |----------------|------------|
//! | `push`         | O(log n)   |
//! | `pop`          | O(log n)   |
//! | `peek`         | O(1)       |
//! | `decrease_key` | O(log n)   |
//! | `contains`     | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::MinPriorityQueue;
//! use dijkstra_heaps::binary::BinaryHeap;
//!
//! let mut heap = BinaryHeap::new();
//! heap.push(3, 30).unwrap();
//! heap.push(1, 10).unwrap();
//! heap.push(2, 20).unwrap();
//!
//! // A second push for a queued vertex is ignored.
//! heap.push(0, 30).unwrap();
//!
//! assert_eq!(heap.peek(), Some((1, 10)));
//! assert_eq!(heap.pop(), Ok((1, 10)));
//! assert_eq!(heap.pop(), Ok((2, 20)));
//! assert_eq!(heap.pop(), Ok((3, 30)));
//! ```

use crate::traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex};

/// A binary min-heap over `(key, vertex)` entries
///
/// `position[v]` is `Some(i)` exactly when `data[i].1 == v`. Every swap keeps
/// the two in step; it is the only way `decrease_key` can find a vertex.
#[derive(Debug, Default)]
pub struct BinaryHeap {
    /// The heap data stored as a vector of (key, vertex) pairs
    data: Vec<(Key, Vertex)>,
    /// Slot of each queued vertex in `data`
    position: Vec<Option<usize>>,
}

impl BinaryHeap {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap whose vertex index covers `0..vertex_count`
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            data: Vec::with_capacity(vertex_count),
            position: vec![None; vertex_count],
        }
    }

    fn slot(&self, vertex: Vertex) -> Option<usize> {
        self.position.get(vertex).copied().flatten()
    }

    fn set_slot(&mut self, vertex: Vertex, slot: Option<usize>) {
        if vertex >= self.position.len() {
            self.position.resize(vertex + 1, None);
        }
        self.position[vertex] = slot;
    }

    /// Swaps two slots and re-points both vertices at their new slots
    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.position[self.data[a].1] = Some(a);
        self.position[self.data[b].1] = Some(b);
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].0 < self.data[parent].0 {
                self.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < len && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }

            if smallest != index {
                self.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl MinPriorityQueue for BinaryHeap {
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
        let index = self.data.len();
        self.data.push((key, vertex));
        self.set_slot(vertex, Some(index));
        self.sift_up(index);
        Ok(())
    }

    fn pop(&mut self) -> Result<(Key, Vertex), QueueError> {
        if self.data.is_empty() {
            return Err(QueueError::EmptyQueue);
        }

        let last_idx = self.data.len() - 1;
        self.swap(0, last_idx);
        let (key, vertex) = self.data.pop().ok_or(QueueError::EmptyQueue)?;
        self.position[vertex] = None;

        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Ok((key, vertex))
    }

    fn peek(&self) -> Option<(Key, Vertex)> {
        self.data.first().copied()
    }

    fn decrease_key(&mut self, vertex: Vertex, new_key: Key) -> bool {
        let Some(index) = self.slot(vertex) else {
            return false;
        };
        if new_key >= self.data[index].0 {
            return false;
        }
        self.data[index].0 = new_key;
        self.sift_up(index);
        true
    }
}
