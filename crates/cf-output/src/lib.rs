//! `cf-output` — simulation output writers for the crowdflow simulator.
//!
//! Two tabular backends are provided, the second behind a Cargo feature:
//!
//! | Feature   | Backend | Files created                                      |
//! |-----------|---------|----------------------------------------------------|
//! | *(none)*  | CSV     | `routes.csv`, `requests.csv`, `occupancy.csv`      |
//! | `sqlite`  | SQLite  | `output.db`                                        |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `cf_sim::SimObserver`.
//!
//! The [`png`] module encodes the occupancy views of `cf_grid::export` with
//! the `image` crate: grayscale intensity and the overlay on the floor plan.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cf_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod png;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use png::{save_occupancy_png, save_overlay_png, write_gray_png, write_rgb_png};
pub use row::{OccupancyRow, RequestRow, RouteRow, occupancy_rows};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
