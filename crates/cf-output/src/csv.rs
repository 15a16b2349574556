//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `routes.csv`
//! - `requests.csv`
//! - `occupancy.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OccupancyRow, OutputResult, RequestRow, RouteRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    routes:    Writer<File>,
    requests:  Writer<File>,
    occupancy: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(["request", "agent", "cost", "length", "refreshed"])?;

        let mut requests = Writer::from_path(dir.join("requests.csv"))?;
        requests.write_record([
            "request",
            "start_row",
            "start_col",
            "target_row",
            "target_col",
            "routed",
            "unreachable",
            "refreshes",
            "total_cost",
        ])?;

        let mut occupancy = Writer::from_path(dir.join("occupancy.csv"))?;
        occupancy.write_record(["row", "col", "count"])?;

        Ok(Self { routes, requests, occupancy, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        for row in rows {
            let cost = if row.cost.is_nan() { String::new() } else { row.cost.to_string() };
            self.routes.write_record(&[
                row.request.to_string(),
                row.agent.to_string(),
                cost,
                row.length.to_string(),
                (row.refreshed as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()> {
        self.requests.write_record(&[
            row.request.to_string(),
            row.start_row.to_string(),
            row.start_col.to_string(),
            row.target_row.to_string(),
            row.target_col.to_string(),
            row.routed.to_string(),
            row.unreachable.to_string(),
            row.refreshes.to_string(),
            row.total_cost.to_string(),
        ])?;
        Ok(())
    }

    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()> {
        for row in rows {
            self.occupancy.write_record(&[
                row.row.to_string(),
                row.col.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        self.requests.flush()?;
        self.occupancy.flush()?;
        Ok(())
    }
}
