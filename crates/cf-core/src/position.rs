//! Grid positions.
//!
//! Positions are `(row, col)` pairs of unsigned integers.  Validity depends
//! on the grid they are used with, so bounds checks live on the grid types
//! (`Environment::contains`, `ObstacleGrid::contains`).

use std::fmt;

use crate::CellId;

/// 4-connected neighbourhood: up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A cell coordinate on a `rows × cols` grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Flat cell index on a grid with `cols` columns.
    #[inline]
    pub fn cell(self, cols: u32) -> CellId {
        CellId(self.row * cols + self.col)
    }

    /// Inverse of [`cell`](Self::cell).
    #[inline]
    pub fn from_cell(cell: CellId, cols: u32) -> Self {
        Self { row: cell.0 / cols, col: cell.0 % cols }
    }

    /// The position shifted by `(d_row, d_col)`, or `None` if the result
    /// falls outside `rows × cols`.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32, rows: u32, cols: u32) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < rows && col < cols).then_some(Position { row, col })
    }

    /// Integer division of both coordinates (downscaling input positions).
    #[inline]
    pub fn scaled_down(self, factor: u32) -> Position {
        Position { row: self.row / factor, col: self.col / factor }
    }

    /// Manhattan distance in cells.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}
