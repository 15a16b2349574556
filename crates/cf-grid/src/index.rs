//! Nearest-free-cell lookup.
//!
//! Request endpoints are given in photograph coordinates and downscaled; the
//! resulting cell can land on a wall.  `FreeCellIndex` bulk-loads every free
//! cell into an R-tree (via `rstar`) so such endpoints can be snapped to the
//! closest walkable cell.  Obstacles never change during a session, so the
//! index stays valid for the whole run.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use cf_core::{CellId, Position};

use crate::Environment;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[row, col]` point with its `CellId`.
#[derive(Clone)]
struct CellEntry {
    point: [i64; 2],
    cell:  CellId,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[i64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    /// Squared Euclidean distance in cell units.
    fn distance_2(&self, point: &[i64; 2]) -> i64 {
        let dr = self.point[0] - point[0];
        let dc = self.point[1] - point[1];
        dr * dr + dc * dc
    }
}

// ── FreeCellIndex ─────────────────────────────────────────────────────────────

/// Spatial index over the free cells of an [`Environment`].
pub struct FreeCellIndex {
    cols: u32,
    tree: RTree<CellEntry>,
}

impl FreeCellIndex {
    /// Bulk-load all free cells of `env` (O(N log N)).
    pub fn build(env: &Environment) -> Self {
        let entries: Vec<CellEntry> = env
            .blocked_slice()
            .iter()
            .enumerate()
            .filter(|&(_, &blocked)| !blocked)
            .map(|(i, _)| {
                let cell = CellId(i as u32);
                let pos = env.position(cell);
                CellEntry { point: [pos.row as i64, pos.col as i64], cell }
            })
            .collect();
        Self { cols: env.cols(), tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The free cell closest to `pos` (which may itself be out of bounds).
    ///
    /// Returns `None` only if the environment has no free cell at all.
    pub fn nearest(&self, pos: Position) -> Option<Position> {
        self.tree
            .nearest_neighbor(&[pos.row as i64, pos.col as i64])
            .map(|e| Position::from_cell(e.cell, self.cols))
    }
}
