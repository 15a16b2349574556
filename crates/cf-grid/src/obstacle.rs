//! Binary obstacle grids.
//!
//! An `ObstacleGrid` is the hand-off from the floor-plan pipeline: a
//! `rows × cols` matrix of booleans stored row-major in one contiguous
//! buffer, `true` meaning impassable.
//!
//! # ASCII map format
//!
//! One text line per grid row.  Recognised cells:
//!
//! | Char                  | Meaning  |
//! |-----------------------|----------|
//! | `.` ` ` `G` `S`       | free     |
//! | `#` `@` `O` `T` `W`   | obstacle |
//!
//! An optional MovingAI-style header (`type …`, `height N`, `width M`,
//! `map`) is accepted and skipped; the dimensions are taken from the rows.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cf_core::Position;

use crate::{GridError, GridResult};

/// A rectangular obstacle mask.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleGrid {
    rows:    u32,
    cols:    u32,
    blocked: Vec<bool>,
}

impl ObstacleGrid {
    /// Build from a row-major buffer of `rows * cols` cells.
    pub fn new(rows: usize, cols: usize, blocked: Vec<bool>) -> GridResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        let cells = rows.checked_mul(cols).ok_or(GridError::TooLarge { rows, cols })?;
        if cells >= u32::MAX as usize {
            return Err(GridError::TooLarge { rows, cols });
        }
        if blocked.len() != cells {
            return Err(GridError::DimensionMismatch {
                line:     0,
                expected: cells,
                got:      blocked.len(),
            });
        }
        Ok(Self { rows: rows as u32, cols: cols as u32, blocked })
    }

    /// An obstacle-free grid.
    pub fn open(rows: usize, cols: usize) -> GridResult<Self> {
        Self::new(rows, cols, vec![false; rows * cols])
    }

    /// Build from a nested `Vec` (one inner `Vec` per row).
    pub fn from_rows(rows: Vec<Vec<bool>>) -> GridResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut blocked = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::DimensionMismatch { line: i + 1, expected: cols, got: row.len() });
            }
            blocked.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, blocked)
    }

    /// Build by evaluating `f(position)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Position) -> bool) -> GridResult<Self> {
        let mut blocked = Vec::with_capacity(rows * cols);
        for r in 0..rows as u32 {
            for c in 0..cols as u32 {
                blocked.push(f(Position::new(r, c)));
            }
        }
        Self::new(rows, cols, blocked)
    }

    /// Random grid where each cell is an obstacle with probability `density`.
    ///
    /// Deterministic for a given `seed`; backs the demo's random floor plans.
    pub fn random(rows: usize, cols: usize, density: f64, seed: u64) -> GridResult<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let p = density.clamp(0.0, 1.0);
        let blocked = (0..rows * cols).map(|_| rng.gen_bool(p)).collect();
        Self::new(rows, cols, blocked)
    }

    // ── Loading ───────────────────────────────────────────────────────────

    /// Load an ASCII map from a file.
    pub fn load(path: &Path) -> GridResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::parse_reader(file)
    }

    /// Parse an ASCII map from any `Read` source.
    pub fn parse_reader<R: Read>(reader: R) -> GridResult<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        let mut in_header = true;

        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            let line_no = i + 1;

            if in_header {
                let head = line.split_whitespace().next().unwrap_or("");
                match head {
                    "type" | "height" | "width" => continue,
                    "map" => {
                        in_header = false;
                        continue;
                    }
                    _ => in_header = false,
                }
            }
            if line.is_empty() {
                continue;
            }

            let row = line
                .chars()
                .map(|ch| match ch {
                    '.' | ' ' | 'G' | 'S' => Ok(false),
                    '#' | '@' | 'O' | 'T' | 'W' => Ok(true),
                    other => Err(GridError::Parse {
                        line: line_no,
                        msg:  format!("unexpected map character {other:?}"),
                    }),
                })
                .collect::<GridResult<Vec<bool>>>()?;

            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(GridError::DimensionMismatch {
                        line:     line_no,
                        expected: first.len(),
                        got:      row.len(),
                    });
                }
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    // ── Dimensions and access ─────────────────────────────────────────────

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

    /// `true` if `pos` is an obstacle.  Out-of-bounds positions count as
    /// obstacles.
    #[inline]
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.contains(pos) || self.blocked[pos.cell(self.cols).index()]
    }

    /// Row-major obstacle mask.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.blocked
    }

    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    // ── Transformations ───────────────────────────────────────────────────

    /// Reduce the grid by `factor`: each `factor × factor` block becomes one
    /// cell, blocked if any cell of the block is blocked.  Trailing rows and
    /// columns that do not fill a whole block are dropped.
    pub fn downscale(&self, factor: u32) -> GridResult<Self> {
        if factor == 0 {
            return Err(GridError::InvalidFactor(factor));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let new_rows = self.rows / factor;
        let new_cols = self.cols / factor;
        if new_rows == 0 || new_cols == 0 {
            return Err(GridError::EmptyGrid);
        }

        let mut blocked = vec![false; (new_rows * new_cols) as usize];
        for r in 0..new_rows * factor {
            let src_row = (r * self.cols) as usize;
            let dst_row = ((r / factor) * new_cols) as usize;
            for c in 0..new_cols * factor {
                if self.blocked[src_row + c as usize] {
                    blocked[dst_row + (c / factor) as usize] = true;
                }
            }
        }
        tracing::debug!(
            factor,
            from = %format!("{}x{}", self.rows, self.cols),
            to = %format!("{new_rows}x{new_cols}"),
            "downscaled obstacle grid"
        );
        Self::new(new_rows as usize, new_cols as usize, blocked)
    }

    /// Grow obstacles by `radius` cells (Chebyshev distance), closing gaps
    /// narrower than `2 * radius + 1` in walls.
    ///
    /// Separable dilation: one horizontal pass then one vertical pass.
    pub fn inflate(&self, radius: u32) -> Self {
        if radius == 0 {
            return self.clone();
        }
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let r = radius as usize;

        let mut horizontal = vec![false; self.blocked.len()];
        for row in 0..rows {
            let base = row * cols;
            for col in 0..cols {
                if self.blocked[base + col] {
                    let lo = col.saturating_sub(r);
                    let hi = (col + r).min(cols - 1);
                    horizontal[base + lo..=base + hi].fill(true);
                }
            }
        }

        let mut blocked = vec![false; self.blocked.len()];
        for row in 0..rows {
            for col in 0..cols {
                if horizontal[row * cols + col] {
                    let lo = row.saturating_sub(r);
                    let hi = (row + r).min(rows - 1);
                    for rr in lo..=hi {
                        blocked[rr * cols + col] = true;
                    }
                }
            }
        }

        Self { rows: self.rows, cols: self.cols, blocked }
    }
}
