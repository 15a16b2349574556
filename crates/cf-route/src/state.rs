//! Reusable per-cell search bookkeeping.
//!
//! Allocated once per routing session and shared by every forward and
//! reverse search.  Instead of clearing `rows * cols` entries before each
//! search, every entry carries the iteration number that last wrote it:
//!
//! ```text
//! stamp[cell]  == iteration  → distance / predecessor are valid this search
//! closed[cell] == iteration  → cell has been settled this search
//! ```
//!
//! Anything else reads as "unvisited" (infinite distance, no predecessor).
//! The iteration counter increases strictly across the whole session, so a
//! stale entry can never be mistaken for a fresh one.
//!
//! # Heuristic tables
//!
//! A reverse search from a target leaves exact distances-to-target in the
//! distance table.  [`SearchState::adopt_as_heuristic`] swaps that table (and
//! its closed stamps) into the heuristic slot in O(1); subsequent forward
//! searches read it through [`SearchState::heuristic`].  Cells the reverse
//! search never settled read the ceiling, the largest distance it did settle.

use cf_core::{CellId, Position};

#[derive(Clone, Debug)]
pub struct SearchState {
    rows:        u32,
    cols:        u32,
    iteration:   u32,

    distance:    Vec<f64>,
    predecessor: Vec<CellId>,
    stamp:       Vec<u32>,
    closed:      Vec<u32>,

    heuristic:        Vec<f64>,
    heuristic_closed: Vec<u32>,
    /// Iteration whose distances form the heuristic; 0 = no heuristic.
    heuristic_stamp:  u32,
    heuristic_ceiling: f64,

    /// Cell → grid coordinates, precomputed so the queue payload stays a
    /// plain `CellId`.
    cell_ref: Vec<Position>,
}

impl SearchState {
    pub fn new(rows: u32, cols: u32) -> Self {
        let n = rows as usize * cols as usize;
        let cell_ref = (0..n as u32).map(|i| Position::from_cell(CellId(i), cols)).collect();
        Self {
            rows,
            cols,
            iteration: 0,
            distance: vec![f64::INFINITY; n],
            predecessor: vec![CellId::NONE; n],
            stamp: vec![0; n],
            closed: vec![0; n],
            heuristic: vec![0.0; n],
            heuristic_closed: vec![0; n],
            heuristic_stamp: 0,
            heuristic_ceiling: 0.0,
            cell_ref,
        }
    }

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
        self.cell_ref.len()
    }

    /// Iteration number of the most recent search (0 before the first).
    #[inline]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    // ── Iteration lifecycle ───────────────────────────────────────────────

    /// Start a new search and return its iteration number.
    ///
    /// On counter exhaustion every stamp (heuristic included) is reset and
    /// numbering restarts at 1.
    pub fn begin_iteration(&mut self) -> u32 {
        if self.iteration == u32::MAX {
            self.stamp.fill(0);
            self.closed.fill(0);
            self.heuristic_closed.fill(0);
            self.heuristic_stamp = 0;
            self.iteration = 0;
            tracing::debug!("search iteration counter wrapped; stamps reset");
        }
        self.iteration += 1;
        self.iteration
    }

    // ── Current search ────────────────────────────────────────────────────

    /// Tentative distance of `cell` in the current search.
    #[inline]
    pub fn distance(&self, cell: CellId) -> f64 {
        let i = cell.index();
        if self.stamp[i] == self.iteration { self.distance[i] } else { f64::INFINITY }
    }

    /// Predecessor of `cell` in the current search.
    #[inline]
    pub fn predecessor(&self, cell: CellId) -> CellId {
        let i = cell.index();
        if self.stamp[i] == self.iteration { self.predecessor[i] } else { CellId::NONE }
    }

    #[inline]
    pub fn is_closed(&self, cell: CellId) -> bool {
        self.closed[cell.index()] == self.iteration
    }

    #[inline]
    pub(crate) fn relax(&mut self, cell: CellId, distance: f64, predecessor: CellId) {
        let i = cell.index();
        self.distance[i] = distance;
        self.predecessor[i] = predecessor;
        self.stamp[i] = self.iteration;
    }

    #[inline]
    pub(crate) fn close(&mut self, cell: CellId) {
        self.closed[cell.index()] = self.iteration;
    }

    #[inline]
    pub fn position(&self, cell: CellId) -> Position {
        self.cell_ref[cell.index()]
    }

    /// Walk the predecessor chain back from `stop`.
    ///
    /// Returns the cells from the search source to `stop`, both included, or
    /// an empty vector when `stop` was not settled by the current search.
    pub fn path_to(&self, stop: CellId) -> Vec<CellId> {
        if stop.is_none() || !self.is_closed(stop) {
            return Vec::new();
        }
        let mut cells = vec![stop];
        let mut cur = self.predecessor(stop);
        while !cur.is_none() {
            cells.push(cur);
            cur = self.predecessor(cur);
        }
        cells.reverse();
        cells
    }

    // ── Heuristic ─────────────────────────────────────────────────────────

    /// `true` once a reverse search has been adopted as heuristic.
    #[inline]
    pub fn has_heuristic(&self) -> bool {
        self.heuristic_stamp != 0
    }

    /// Estimated remaining cost from `cell` to the current landmark target.
    ///
    /// 0 when no heuristic has been adopted.
    #[inline]
    pub fn heuristic(&self, cell: CellId) -> f64 {
        if self.heuristic_stamp == 0 {
            return 0.0;
        }
        let i = cell.index();
        if self.heuristic_closed[i] == self.heuristic_stamp {
            self.heuristic[i]
        } else {
            self.heuristic_ceiling
        }
    }

    /// Promote the current search's distance table to heuristic.
    ///
    /// The two tables trade places, so afterwards the distance table holds
    /// garbage stamped with the current iteration; the next search must start
    /// with [`begin_iteration`](Self::begin_iteration), as every search does.
    pub fn adopt_as_heuristic(&mut self, ceiling: f64) {
        std::mem::swap(&mut self.distance, &mut self.heuristic);
        std::mem::swap(&mut self.closed, &mut self.heuristic_closed);
        self.heuristic_stamp = self.iteration;
        self.heuristic_ceiling = ceiling;
    }

    /// Forget the heuristic; forward searches fall back to plain Dijkstra.
    pub fn clear_heuristic(&mut self) {
        self.heuristic_stamp = 0;
        self.heuristic_ceiling = 0.0;
    }

    /// Heuristic value of every cell, row-major.
    pub fn heuristic_table(&self) -> Vec<f64> {
        (0..self.cell_count() as u32).map(|i| self.heuristic(CellId(i))).collect()
    }
}
