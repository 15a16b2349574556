//! Movement-file loader.
//!
//! # File format
//!
//! A header line followed by one request per line, positions in the
//! coordinates of the full-resolution floor plan:
//!
//! ```text
//! start,target,count
//! 120:40,980:1210,25
//! 130:44,20:600,3
//! ```
//!
//! `start` and `target` are `row:col`, `count` a non-negative integer.
//! Positions are stored as read; `cf_sim::SimBuilder` divides them by the
//! downscale factor together with the grid.
//!
//! Lines with the wrong number of fields or unparsable numbers are skipped
//! and loading continues.  Only I/O failures abort the load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cf_core::{Position, RequestId};

use crate::{MovementQueue, MovementRequest, MovementResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MovementRecord(String, String, u32);

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a movement file.
pub fn load_movements(path: &Path) -> MovementResult<MovementQueue> {
    let file = std::fs::File::open(path)?;
    let queue = load_movements_reader(file)?;
    tracing::info!(
        path = %path.display(),
        requests = queue.len(),
        agents = queue.total_agents(),
        "loaded movements"
    );
    Ok(queue)
}

/// Like [`load_movements`] but accepts any `Read` source.
pub fn load_movements_reader<R: Read>(reader: R) -> MovementResult<MovementQueue> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut queue = MovementQueue::new();
    let mut skipped = 0usize;

    for result in csv_reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable movement line");
                skipped += 1;
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 3 {
            tracing::debug!(line, fields = record.len(), "skipping movement line: expected 3 fields");
            skipped += 1;
            continue;
        }
        let parsed = record
            .deserialize::<MovementRecord>(None)
            .ok()
            .and_then(|MovementRecord(start, target, count)| {
                Some((parse_position(&start)?, parse_position(&target)?, count))
            });
        let Some((start, target, count)) = parsed else {
            tracing::debug!(line, "skipping malformed movement line");
            skipped += 1;
            continue;
        };

        let id = RequestId(queue.len() as u32);
        queue.push(MovementRequest::new(id, start, target, count));
    }

    if skipped > 0 {
        tracing::warn!(skipped, accepted = queue.len(), "skipped malformed movement lines");
    }
    Ok(queue)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `"row:col"` → `Position`.
fn parse_position(s: &str) -> Option<Position> {
    let (row, col) = s.trim().split_once(':')?;
    Some(Position::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}
