//! Grid-subsystem error type.

use thiserror::Error;

/// Errors produced by `cf-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    EmptyGrid,

    #[error("line {line}: expected {expected} columns, got {got}")]
    DimensionMismatch { line: usize, expected: usize, got: usize },

    #[error("grid of {rows}×{cols} cells does not fit in a u32 cell index")]
    TooLarge { rows: usize, cols: usize },

    #[error("downscale factor must be at least 1, got {0}")]
    InvalidFactor(u32),

    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
