//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OccupancyRow, OutputResult, RequestRow, RouteRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of per-agent route rows.
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// Write one request summary row.
    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()>;

    /// Write the final occupancy table.
    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<W: OutputWriter + ?Sized> OutputWriter for Box<W> {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        (**self).write_routes(rows)
    }

    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()> {
        (**self).write_request(row)
    }

    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()> {
        (**self).write_occupancy(rows)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}
