//! Random floor plans for load testing.
//!
//! The obstacle mask comes from [`ObstacleGrid::random`]; requests pair
//! uniformly drawn free cells and split the agent budget evenly.

use anyhow::{Result, bail};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use cf_core::{Position, RequestId};
use cf_grid::ObstacleGrid;
use cf_movement::{MovementQueue, MovementRequest};

/// `"ROWSxCOLS"` → `(rows, cols)`.
pub fn parse_dims(s: &str) -> Result<(usize, usize), String> {
    let (rows, cols) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected ROWSxCOLS, got {s:?}"))?;
    let rows = rows.trim().parse::<usize>().map_err(|e| format!("rows: {e}"))?;
    let cols = cols.trim().parse::<usize>().map_err(|e| format!("cols: {e}"))?;
    if rows == 0 || cols == 0 {
        return Err("grid dimensions must be positive".into());
    }
    Ok((rows, cols))
}

/// Random grid plus `requests` requests carrying `agents` agents in total.
pub fn generate(
    (rows, cols): (usize, usize),
    density: f64,
    seed: u64,
    requests: u32,
    agents: u32,
) -> Result<(ObstacleGrid, MovementQueue)> {
    let grid = ObstacleGrid::random(rows, cols, density, seed)?;
    let free: Vec<Position> = (0..grid.rows())
        .flat_map(|r| (0..grid.cols()).map(move |c| Position::new(r, c)))
        .filter(|&p| !grid.is_blocked(p))
        .collect();
    if free.is_empty() {
        bail!("random grid {rows}x{cols} at density {density} has no free cell");
    }

    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let n = requests.max(1);
    let queue = (0..n)
        .map(|i| {
            let start = free[rng.gen_range(0..free.len())];
            let target = free[rng.gen_range(0..free.len())];
            let count = agents / n + u32::from(i < agents % n);
            MovementRequest::new(RequestId(i), start, target, count)
        })
        .collect();
    Ok((grid, queue))
}
