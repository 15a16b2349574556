//! The occupancy environment routed agents move through.
//!
//! # Data layout
//!
//! Two parallel row-major buffers indexed by `CellId = row * cols + col`:
//!
//! ```text
//! blocked[cell]    true → impassable, never changes after construction
//! occupancy[cell]  agents whose realized path crossed the cell
//! ```
//!
//! Occupancy only ever grows: [`Environment::apply_path`] is the single
//! mutation and it adds a non-negative increment.  `max_count` is kept equal
//! to the maximum over all cells so exports can normalize without a scan.

use cf_core::{CellId, Position};

use crate::ObstacleGrid;

/// Obstacle mask plus per-cell traversal counts.
///
/// Created once per routing session from an [`ObstacleGrid`], mutated by
/// every successful route, and read by the exporters at the end.
#[derive(Clone, Debug)]
pub struct Environment {
    rows:      u32,
    cols:      u32,
    blocked:   Vec<bool>,
    occupancy: Vec<u32>,
    max_count: u32,
}

impl Environment {
    /// Mirror the obstacles of `grid`; every free cell starts at 0.
    pub fn from_obstacle_grid(grid: &ObstacleGrid) -> Self {
        Self {
            rows:      grid.rows(),
            cols:      grid.cols(),
            blocked:   grid.as_slice().to_vec(),
            occupancy: vec![0; grid.cell_count()],
            max_count: 0,
        }
    }

    // ── Grid dimensions ───────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.blocked.len()
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Flat index of an in-bounds position.
    #[inline]
    pub fn cell(&self, pos: Position) -> CellId {
        debug_assert!(self.contains(pos), "{pos} outside {}x{}", self.rows, self.cols);
        pos.cell(self.cols)
    }

    #[inline]
    pub fn position(&self, cell: CellId) -> Position {
        Position::from_cell(cell, self.cols)
    }

    // ── Cell queries ──────────────────────────────────────────────────────

    #[inline]
    pub fn is_blocked(&self, cell: CellId) -> bool {
        self.blocked[cell.index()]
    }

    /// `true` if `pos` is in bounds and not an obstacle.
    #[inline]
    pub fn is_free(&self, pos: Position) -> bool {
        self.contains(pos) && !self.blocked[pos.cell(self.cols).index()]
    }

    /// Traversal count of a free cell; `None` for obstacles.
    #[inline]
    pub fn count(&self, cell: CellId) -> Option<u32> {
        (!self.blocked[cell.index()]).then(|| self.occupancy[cell.index()])
    }

    /// Traversal count without the obstacle check (obstacles read 0).
    #[inline]
    pub fn occupancy(&self, cell: CellId) -> u32 {
        self.occupancy[cell.index()]
    }

    /// Highest traversal count over all cells.
    #[inline]
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Row-major traversal counts (obstacles read 0).
    #[inline]
    pub fn occupancy_slice(&self) -> &[u32] {
        &self.occupancy
    }

    /// Row-major obstacle mask.
    #[inline]
    pub fn blocked_slice(&self) -> &[bool] {
        &self.blocked
    }

    /// Sum of all traversal counts (cells crossed by all agents combined).
    pub fn total_traversals(&self) -> u64 {
        self.occupancy.iter().map(|&c| c as u64).sum()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Add `increment` to every cell of `path`.
    ///
    /// `CellId::NONE` entries and obstacles are ignored; counts saturate at
    /// `u32::MAX`.
    pub fn apply_path(&mut self, path: &[CellId], increment: u32) {
        for &cell in path {
            if cell.is_none() || self.blocked[cell.index()] {
                continue;
            }
            let count = &mut self.occupancy[cell.index()];
            *count = count.saturating_add(increment);
            if *count > self.max_count {
                self.max_count = *count;
            }
        }
    }
}
