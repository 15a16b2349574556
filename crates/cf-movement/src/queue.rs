//! `MovementQueue` — FIFO of pending requests.

use std::collections::VecDeque;

use crate::MovementRequest;

/// Requests in input order.  Popped from the front as they are processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovementQueue {
    inner: VecDeque<MovementRequest>,
}

impl MovementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the back; input order is preserved.
    pub fn push(&mut self, request: MovementRequest) {
        self.inner.push_back(request);
    }

    /// Remove the oldest request.
    pub fn pop(&mut self) -> Option<MovementRequest> {
        self.inner.pop_front()
    }

    pub fn front(&self) -> Option<&MovementRequest> {
        self.inner.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Agents over all pending requests.
    pub fn total_agents(&self) -> u64 {
        self.inner.iter().map(|r| r.count as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovementRequest> {
        self.inner.iter()
    }

    /// Scale every pending request down by `factor`.
    pub fn scale_down(&mut self, factor: u32) {
        for r in &mut self.inner {
            *r = r.scaled_down(factor);
        }
    }
}

impl FromIterator<MovementRequest> for MovementQueue {
    fn from_iter<I: IntoIterator<Item = MovementRequest>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}

impl IntoIterator for MovementQueue {
    type Item = MovementRequest;
    type IntoIter = std::collections::vec_deque::IntoIter<MovementRequest>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
