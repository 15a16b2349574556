//! Fixed-capacity binary min-heap keyed by `f64` priority.
//!
//! The frontier of every search lives here.  Capacity is chosen once from the
//! grid size and never grows: a search pushes at most one entry for the
//! source plus one per (closed cell, neighbour) pair, so `4 * cells + 1`
//! always suffices on a 4-connected grid.  Exceeding it is reported as
//! [`RouteError::QueueFull`] rather than reallocating mid-search.
//!
//! Duplicate payloads are allowed.  The router pushes a cell again whenever
//! its tentative distance improves and discards stale entries on pop.

use crate::{RouteError, RouteResult};

#[derive(Clone, Copy, Debug)]
struct HeapNode<T> {
    priority: f64,
    payload:  T,
}

/// Array-backed min-heap with sift-up / sift-down maintenance.
#[derive(Clone, Debug)]
pub struct PriorityQueue<T> {
    nodes:    Vec<HeapNode<T>>,
    capacity: usize,
}

impl<T: Copy> PriorityQueue<T> {
    /// An empty queue that holds at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity), capacity }
    }

    /// Queue sized for one search over a 4-connected grid of `cells` cells.
    pub fn for_grid(cells: usize) -> Self {
        Self::with_capacity(4 * cells + 1)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest priority currently queued.
    #[inline]
    pub fn peek_priority(&self) -> Option<f64> {
        self.nodes.first().map(|n| n.priority)
    }

    /// Insert `payload` with `priority`.
    pub fn push(&mut self, priority: f64, payload: T) -> RouteResult<()> {
        if self.nodes.len() >= self.capacity {
            return Err(RouteError::QueueFull { capacity: self.capacity });
        }
        self.nodes.push(HeapNode { priority, payload });
        self.sift_up(self.nodes.len() - 1);
        Ok(())
    }

    /// Remove and return the entry with the smallest priority.
    ///
    /// Ties are broken by heap position, which is deterministic for a given
    /// push/pop sequence.
    pub fn pop(&mut self) -> RouteResult<(f64, T)> {
        if self.nodes.is_empty() {
            return Err(RouteError::QueueEmpty);
        }
        let top = self.nodes.swap_remove(0);
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Ok((top.priority, top.payload))
    }

    /// Discard every entry; returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.nodes.len();
        self.nodes.clear();
        n
    }

    // ── Heap maintenance ──────────────────────────────────────────────────

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.nodes[pos].priority < self.nodes[parent].priority {
                self.nodes.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.nodes.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && self.nodes[right].priority < self.nodes[left].priority {
                right
            } else {
                left
            };
            if self.nodes[smaller].priority < self.nodes[pos].priority {
                self.nodes.swap(pos, smaller);
                pos = smaller;
            } else {
                break;
            }
        }
    }
}
