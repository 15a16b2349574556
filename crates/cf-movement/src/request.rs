//! A single movement request.

use std::fmt;

use cf_core::{Position, RequestId};

/// `count` agents walking from `start` to `target`.
///
/// Positions are in floor-plan coordinates when loaded through
/// [`load_movements`](crate::load_movements); [`scaled_down`](Self::scaled_down)
/// maps them onto a downscaled grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementRequest {
    /// Index in input order among the accepted lines.
    pub id:     RequestId,
    pub start:  Position,
    pub target: Position,
    /// Agents to route; may be 0.
    pub count:  u32,
}

impl MovementRequest {
    pub fn new(id: RequestId, start: Position, target: Position, count: u32) -> Self {
        Self { id, start, target, count }
    }

    /// Same request in a grid `factor` times coarser (`0` is treated as 1).
    pub fn scaled_down(self, factor: u32) -> Self {
        let factor = factor.max(1);
        Self {
            start: self.start.scaled_down(factor),
            target: self.target.scaled_down(factor),
            ..self
        }
    }

    /// `true` if start and target coincide.
    pub fn is_stationary(&self) -> bool {
        self.start == self.target
    }
}

impl fmt::Display for MovementRequest {
    /// Movement-file line syntax: `r:c,r:c,n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.start, self.target, self.count)
    }
}
