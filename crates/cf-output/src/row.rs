//! Plain data row types written by output backends.

use cf_core::CellId;
use cf_grid::Environment;

/// One routed (or unroutable) agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRow {
    pub request:   u32,
    /// Agent index within the request, from 0.
    pub agent:     u32,
    /// Route cost; `NaN` when the target was unreachable.
    pub cost:      f64,
    /// Cells on the route (0 when unreachable).
    pub length:    u32,
    /// A heuristic refresh ran before this agent.
    pub refreshed: bool,
}

/// One processed request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestRow {
    pub request:     u32,
    pub start_row:   u32,
    pub start_col:   u32,
    pub target_row:  u32,
    pub target_col:  u32,
    pub routed:      u32,
    pub unreachable: u32,
    pub refreshes:   u32,
    pub total_cost:  f64,
}

/// Traversal count of one free cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyRow {
    pub row:   u32,
    pub col:   u32,
    pub count: u32,
}

/// Every free cell of `env` with a non-zero count, row-major.
pub fn occupancy_rows(env: &Environment) -> Vec<OccupancyRow> {
    env.occupancy_slice()
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| {
            let pos = env.position(CellId(i as u32));
            OccupancyRow { row: pos.row, col: pos.col, count }
        })
        .collect()
}
