//! Export views of an [`Environment`].
//!
//! Two renderings are produced for the visualization side:
//!
//! - [`IntensityGrid`] — one `f32 ∈ [0, 1]` per cell, `count / max_count`
//!   for free cells, rendered as an 8-bit [`GrayImage`].
//! - [`OverlayImage`] — an [`RgbImage`] canvas (usually the floor plan) with
//!   congested cells overwritten by [`overlay_red`].
//!
//! Both render at `n` pixels per cell so the output lines up with the
//! source floor plan: every cell becomes an `n × n` block.

use cf_core::{CellId, Position};
use image::{GrayImage, Luma, Rgb, RgbImage};

use crate::{Environment, ObstacleGrid};

/// Red channel for a cell with `count` traversals out of `max`:
/// `255 * (1 - count / max)^3`, truncated.
///
/// The cubic falloff keeps lightly used cells bright red and darkens the
/// heavily used ones.  `max == 0` yields 255.
#[inline]
pub fn overlay_red(count: u32, max: u32) -> u8 {
    if max == 0 {
        return 255;
    }
    let ratio = (count as f64 / max as f64).clamp(0.0, 1.0);
    (255.0 * (1.0 - ratio).powi(3)) as u8
}

// ── IntensityGrid ─────────────────────────────────────────────────────────────

/// Normalized grayscale occupancy map.
#[derive(Clone, Debug, PartialEq)]
pub struct IntensityGrid {
    pub rows:   u32,
    pub cols:   u32,
    /// Row-major intensities in `[0, 1]`.
    pub values: Vec<f32>,
}

impl IntensityGrid {
    /// `count / max_count` for every free cell (0 when nothing was routed);
    /// obstacle cells take `wall`.
    pub fn from_environment(env: &Environment, wall: f32) -> Self {
        let max = env.max_count();
        let values = (0..env.cell_count())
            .map(|i| {
                let cell = CellId(i as u32);
                match env.count(cell) {
                    None => wall,
                    Some(_) if max == 0 => 0.0,
                    Some(c) => c as f32 / max as f32,
                }
            })
            .collect();
        Self { rows: env.rows(), cols: env.cols(), values }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> f32 {
        self.values[pos.cell(self.cols).index()]
    }

    /// 8-bit gray rendering at `n` pixels per cell (`n = 0` is treated as 1).
    pub fn to_gray_image(&self, n: u32) -> GrayImage {
        let n = n.max(1);
        GrayImage::from_fn(self.cols * n, self.rows * n, |x, y| {
            let v = self.get(Position::new(y / n, x / n));
            Luma([(v.clamp(0.0, 1.0) * 255.0).round() as u8])
        })
    }
}

// ── OverlayImage ──────────────────────────────────────────────────────────────

/// RGB canvas drawn at a fixed number of pixels per grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayImage {
    scale:  u32,
    canvas: RgbImage,
}

impl OverlayImage {
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    /// `rows × cols` cells of one colour, `scale` pixels per cell.
    pub fn filled(rows: u32, cols: u32, scale: u32, color: Rgb<u8>) -> Self {
        let scale = scale.max(1);
        Self { scale, canvas: RgbImage::from_pixel(cols * scale, rows * scale, color) }
    }

    /// Floor plan at `scale` pixels per cell: walls black, free white.
    pub fn from_obstacles(grid: &ObstacleGrid, scale: u32) -> Self {
        let scale = scale.max(1);
        let canvas = RgbImage::from_fn(grid.cols() * scale, grid.rows() * scale, |x, y| {
            if grid.is_blocked(Position::new(y / scale, x / scale)) { Self::BLACK } else { Self::WHITE }
        });
        Self { scale, canvas }
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Pixel at image row `row`, column `col`.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> Rgb<u8> {
        *self.canvas.get_pixel(col, row)
    }

    /// Paint the block of grid cell `pos`, clipped to the canvas.
    pub fn paint_cell(&mut self, pos: Position, color: Rgb<u8>) {
        let (x0, y0) = (pos.col * self.scale, pos.row * self.scale);
        let x1 = (x0 + self.scale).min(self.canvas.width());
        let y1 = (y0 + self.scale).min(self.canvas.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.canvas.put_pixel(x, y, color);
            }
        }
    }

    /// Paint a sequence of cells (e.g. one route) in a fixed colour.
    pub fn paint_cells(&mut self, env: &Environment, cells: &[CellId], color: Rgb<u8>) {
        for &cell in cells {
            if !cell.is_none() {
                self.paint_cell(env.position(cell), color);
            }
        }
    }

    /// Overwrite every occupied cell with `(overlay_red(count, max), 0, 0)`.
    ///
    /// Does nothing when no agent has been routed.
    pub fn overlay_occupancy(&mut self, env: &Environment) {
        let max = env.max_count();
        if max == 0 {
            return;
        }
        for (i, &count) in env.occupancy_slice().iter().enumerate() {
            if count > 0 {
                let pos = env.position(CellId(i as u32));
                self.paint_cell(pos, Rgb([overlay_red(count, max), 0, 0]));
            }
        }
    }

    #[inline]
    pub fn as_image(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbImage {
        self.canvas
    }
}
