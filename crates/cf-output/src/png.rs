//! PNG writers for the occupancy views.
//!
//! | Function               | Source                           | Colour |
//! |------------------------|----------------------------------|--------|
//! | [`save_occupancy_png`] | [`IntensityGrid`] at `n` px/cell | `L8`   |
//! | [`save_overlay_png`]   | [`OverlayImage`]                 | `Rgb8` |

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cf_grid::{IntensityGrid, OverlayImage};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder, RgbImage};

use crate::OutputResult;

/// Encode an 8-bit gray image as PNG.
pub fn write_gray_png<W: Write>(out: W, image: &GrayImage) -> OutputResult<()> {
    PngEncoder::new(out).write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)?;
    Ok(())
}

/// Encode an RGB image as PNG.
pub fn write_rgb_png<W: Write>(out: W, image: &RgbImage) -> OutputResult<()> {
    PngEncoder::new(out).write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgb8)?;
    Ok(())
}

/// Render `grid` at `n` pixels per cell and write it to `path`.
pub fn save_occupancy_png(path: &Path, grid: &IntensityGrid, n: u32) -> OutputResult<()> {
    let image = grid.to_gray_image(n);
    let mut out = BufWriter::new(File::create(path)?);
    write_gray_png(&mut out, &image)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote occupancy PNG");
    Ok(())
}

/// Write `overlay` to `path`.
pub fn save_overlay_png(path: &Path, overlay: &OverlayImage) -> OutputResult<()> {
    let image = overlay.as_image();
    let mut out = BufWriter::new(File::create(path)?);
    write_rgb_png(&mut out, image)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "wrote overlay PNG");
    Ok(())
}
