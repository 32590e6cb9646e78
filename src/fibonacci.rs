//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized delete_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list and the heap keeps the index of the minimum
//! root.
//!
//! Nodes live in an arena addressed by vertex id instead of behind raw pointers.
//! Sibling links are plain indices, so splicing lists in and out is still O(1),
//! while "no parent" and "no child" are `None` rather than null pointers.
//!
//! # Example
//!
//! ```rust
//! use dijkstra_heaps::MinPriorityQueue;
//! use dijkstra_heaps::fibonacci::FibonacciHeap;
//! use dijkstra_heaps::QueueError;
//!
//! let mut heap = FibonacciHeap::with_capacity(3);
//! heap.push(5, 0).unwrap();
//! heap.push(9, 1).unwrap();
//! assert_eq!(heap.push(1, 1), Err(QueueError::DuplicateVertex(1)));
//!
//! assert!(heap.decrease_key(1, 2));
//! assert_eq!(heap.pop(), Ok((2, 1)));
//! assert_eq!(heap.pop(), Ok((5, 0)));
//! ```

use crate::traits::{Discovery, Key, MinPriorityQueue, QueueError, Vertex};
use smallvec::{smallvec, SmallVec};

#[derive(Debug, Clone)]
struct Node {
    key: Key,
    parent: Option<Vertex>,
    child: Option<Vertex>,
    left: Vertex,
    right: Vertex,
    degree: usize,
    marked: bool,
}

impl Node {
    fn singleton(key: Key, vertex: Vertex) -> Self {
        Node {
            key,
            parent: None,
            child: None,
            left: vertex,
            right: vertex,
            degree: 0,
            marked: false,
        }
    }
}

/// Fibonacci Heap keyed by vertex
///
/// Unlike the array heaps, pushing a vertex that is already queued is an
/// error: the shortest-path engine inserts every vertex exactly once up front.
#[derive(Debug, Default)]
pub struct FibonacciHeap {
    /// Node pool; `nodes[v]` is `Some` while vertex `v` is queued
    nodes: Vec<Option<Node>>,
    min: Option<Vertex>,
    len: usize,
}

impl FibonacciHeap {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty heap with node slots for `0..vertex_count`
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            nodes: vec![None; vertex_count],
            min: None,
            len: 0,
        }
    }

    /// The live node of `v`
    ///
    /// # Panics
    /// Panics if `v` has no node. Every link followed inside the heap points
    /// at a live node, so this only fires on a corrupted arena.
    fn node(&self, v: Vertex) -> &Node {
        self.nodes[v]
            .as_ref()
            .expect("fibonacci heap link points at a released node")
    }

    /// Mutable counterpart of [`node`](Self::node)
    ///
    /// # Panics
    /// Same conditions as [`node`](Self::node).
    fn node_mut(&mut self, v: Vertex) -> &mut Node {
        self.nodes[v]
            .as_mut()
            .expect("fibonacci heap link points at a released node")
    }

    fn key(&self, v: Vertex) -> Key {
        self.node(v).key
    }

    /// Detaches `x` from whatever circular list it is in, leaving it a
    /// singleton list
    fn unlink(&mut self, x: Vertex) {
        let (left, right) = {
            let node = self.node(x);
            (node.left, node.right)
        };
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;
        let node = self.node_mut(x);
        node.left = x;
        node.right = x;
    }

    /// Splices the singleton `x` into the circular list right of `anchor`
    fn insert_after(&mut self, anchor: Vertex, x: Vertex) {
        let right = self.node(anchor).right;
        {
            let node = self.node_mut(x);
            node.left = anchor;
            node.right = right;
        }
        self.node_mut(right).left = x;
        self.node_mut(anchor).right = x;
    }

    /// Adds the singleton `x` to the root list, updating `min`
    fn add_root(&mut self, x: Vertex) {
        match self.min {
            Some(min) => {
                self.insert_after(min, x);
                if self.key(x) < self.key(min) {
                    self.min = Some(x);
                }
            }
            None => self.min = Some(x),
        }
    }

    /// Collects the members of the circular list containing `start`
    fn siblings(&self, start: Vertex) -> Vec<Vertex> {
        let mut members = vec![start];
        let mut current = self.node(start).right;
        while current != start {
            members.push(current);
            current = self.node(current).right;
        }
        members
    }

    /// Links root `y` as a child of root `x`
    fn link(&mut self, y: Vertex, x: Vertex) {
        self.unlink(y);
        {
            let node = self.node_mut(y);
            node.parent = Some(x);
            node.marked = false;
        }
        match self.node(x).child {
            Some(child) => self.insert_after(child, y),
            None => self.node_mut(x).child = Some(y),
        }
        self.node_mut(x).degree += 1;
    }

    /// Consolidates the root list so no two roots share a degree
    fn consolidate(&mut self, start: Vertex) {
        let roots = self.siblings(start);

        // ⌈log2(len)⌉ + 1 slots, grown below if a degree ever exceeds it
        let slots = (usize::BITS - self.len.saturating_sub(1).leading_zeros()) as usize + 1;
        let mut by_degree: SmallVec<[Option<Vertex>; 64]> = smallvec![None; slots];

        for root in roots {
            let mut x = root;
            let mut d = self.node(x).degree;
            loop {
                if d >= by_degree.len() {
                    by_degree.resize(d + 1, None);
                }
                let Some(mut y) = by_degree[d].take() else {
                    break;
                };
                if self.key(y) < self.key(x) {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }
            by_degree[d] = Some(x);
        }

        // Rebuild root list and find new min
        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.unlink(root);
            self.add_root(root);
        }
    }

    /// Cuts `x` from its parent `parent` and makes it an unmarked root
    fn cut(&mut self, x: Vertex, parent: Vertex) {
        let next = self.node(x).right;
        self.unlink(x);
        {
            let p = self.node_mut(parent);
            if p.child == Some(x) {
                p.child = if next == x { None } else { Some(next) };
            }
            p.degree -= 1;
        }
        {
            let node = self.node_mut(x);
            node.parent = None;
            node.marked = false;
        }
        self.add_root(x);
    }

    /// Marks `y`, or cuts it and continues upward if it was already marked
    fn cascading_cut(&mut self, mut y: Vertex) {
        while let Some(parent) = self.node(y).parent {
            if !self.node(y).marked {
                self.node_mut(y).marked = true;
                return;
            }
            self.cut(y, parent);
            y = parent;
        }
    }

    /// Releases every node of every tree exactly once
    ///
    /// Walks the root list and each child list iteratively, so arbitrarily deep
    /// trees are fine. Returns the number of nodes released, which always
    /// equals the `len()` before the call. The vertex index is left empty.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut pending: Vec<Vertex> = self.min.into_iter().collect();

        while let Some(start) = pending.pop() {
            for v in self.siblings(start) {
                if let Some(node) = self.nodes[v].take() {
                    if let Some(child) = node.child {
                        pending.push(child);
                    }
                    released += 1;
                }
            }
        }

        self.min = None;
        self.len = 0;
        released
    }

    /// Audits the whole forest
    ///
    /// Checks that every child's key is at least its parent's key, that parent
    /// back-links and degree counters match the child lists, that no root is
    /// keyed below `min`, and that exactly `len()` nodes are reachable.
    pub fn is_heap_ordered(&self) -> bool {
        let Some(min) = self.min else {
            return self.len == 0 && self.nodes.iter().all(Option::is_none);
        };
        if self.nodes.get(min).map_or(true, Option::is_none) {
            return false;
        }

        let mut reachable = 0;
        let mut lists: Vec<(Vertex, Option<Vertex>)> = vec![(min, None)];
        while let Some((start, parent)) = lists.pop() {
            let members = self.siblings(start);
            if let Some(p) = parent {
                if members.len() != self.node(p).degree {
                    return false;
                }
            }
            for v in members {
                let node = self.node(v);
                reachable += 1;
                if node.parent != parent {
                    return false;
                }
                match parent {
                    Some(p) if node.key < self.key(p) => return false,
                    None if node.key < self.key(min) => return false,
                    _ => {}
                }
                if let Some(child) = node.child {
                    lists.push((child, Some(v)));
                }
            }
        }

        let stored = self.nodes.iter().filter(|n| n.is_some()).count();
        reachable == self.len && stored == self.len
    }
}

impl Drop for FibonacciHeap {
    fn drop(&mut self) {
        self.clear();
    }
}

impl MinPriorityQueue for FibonacciHeap {
    const DISCOVERY: Discovery = Discovery::Eager;

    fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, vertex: Vertex) -> bool {
        matches!(self.nodes.get(vertex), Some(Some(_)))
    }

    fn push(&mut self, key: Key, vertex: Vertex) -> Result<(), QueueError> {
        if self.contains(vertex) {
            return Err(QueueError::DuplicateVertex(vertex));
        }
        if vertex >= self.nodes.len() {
            self.nodes.resize(vertex + 1, None);
        }
        self.nodes[vertex] = Some(Node::singleton(key, vertex));
        self.add_root(vertex);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Result<(Key, Vertex), QueueError> {
        let z = self.min.ok_or(QueueError::EmptyQueue)?;

        // Promote children to roots
        if let Some(child) = self.node(z).child {
            for c in self.siblings(child) {
                self.unlink(c);
                self.node_mut(c).parent = None;
                self.insert_after(z, c);
            }
        }

        let next = self.node(z).right;
        self.unlink(z);
        let node = self.nodes[z].take().ok_or(QueueError::EmptyQueue)?;
        self.len -= 1;

        if next == z {
            self.min = None;
        } else {
            self.min = Some(next);
            self.consolidate(next);
        }

        Ok((node.key, z))
    }

    fn peek(&self) -> Option<(Key, Vertex)> {
        self.min.map(|m| (self.key(m), m))
    }

    fn decrease_key(&mut self, vertex: Vertex, new_key: Key) -> bool {
        if !self.contains(vertex) || new_key >= self.key(vertex) {
            return false;
        }
        self.node_mut(vertex).key = new_key;

        match self.node(vertex).parent {
            Some(parent) if new_key < self.key(parent) => {
                self.cut(vertex, parent);
                self.cascading_cut(parent);
            }
            Some(_) => {}
            None => {
                if let Some(min) = self.min {
                    if new_key < self.key(min) {
                        self.min = Some(vertex);
                    }
                }
            }
        }
        true
    }
}
