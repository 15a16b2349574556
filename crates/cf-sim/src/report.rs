//! Per-request and per-run summaries.

use std::fmt;

use cf_core::{Position, RequestId};

/// Why a request was not routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    StartOutOfBounds(Position),
    TargetOutOfBounds(Position),
    StartBlocked(Position),
    TargetBlocked(Position),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfBounds(p) => write!(f, "start {p} is outside the grid"),
            Self::TargetOutOfBounds(p) => write!(f, "target {p} is outside the grid"),
            Self::StartBlocked(p) => write!(f, "start {p} is an obstacle"),
            Self::TargetBlocked(p) => write!(f, "target {p} is an obstacle"),
        }
    }
}

/// Outcome of one processed request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestSummary {
    pub id:                 RequestId,
    /// Endpoints actually routed (after snapping).
    pub start:              Position,
    pub target:             Position,
    pub agents_routed:      u32,
    pub agents_unreachable: u32,
    pub refreshes:          u32,
    /// Sum of route costs of the routed agents.
    pub total_cost:         f64,
}

/// Totals over a whole run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimReport {
    /// Requests processed (routed or found unreachable).
    pub requests:           u64,
    pub skipped_requests:   u64,
    pub agents_routed:      u64,
    pub agents_unreachable: u64,
    pub refreshes:          u64,
    pub total_cost:         f64,
}

impl SimReport {
    pub fn record(&mut self, summary: &RequestSummary) {
        self.requests += 1;
        self.agents_routed += summary.agents_routed as u64;
        self.agents_unreachable += summary.agents_unreachable as u64;
        self.refreshes += summary.refreshes as u64;
        self.total_cost += summary.total_cost;
    }

    /// Mean route cost per routed agent (0 when nothing was routed).
    pub fn mean_cost(&self) -> f64 {
        if self.agents_routed == 0 { 0.0 } else { self.total_cost / self.agents_routed as f64 }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests ({} skipped), {} agents routed, {} unreachable, {} refreshes, mean cost {:.2}",
            self.requests,
            self.skipped_requests,
            self.agents_routed,
            self.agents_unreachable,
            self.refreshes,
            self.mean_cost()
        )
    }
}
