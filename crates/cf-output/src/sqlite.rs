//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `routes`, `requests`, and `occupancy`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OccupancyRow, OutputResult, RequestRow, RouteRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS routes (
                 request   INTEGER NOT NULL,
                 agent     INTEGER NOT NULL,
                 cost      REAL,
                 length    INTEGER NOT NULL,
                 refreshed INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS requests (
                 request     INTEGER PRIMARY KEY,
                 start_row   INTEGER NOT NULL,
                 start_col   INTEGER NOT NULL,
                 target_row  INTEGER NOT NULL,
                 target_col  INTEGER NOT NULL,
                 routed      INTEGER NOT NULL,
                 unreachable INTEGER NOT NULL,
                 refreshes   INTEGER NOT NULL,
                 total_cost  REAL NOT NULL
             );
             CREATE TABLE IF NOT EXISTS occupancy (
                 row   INTEGER NOT NULL,
                 col   INTEGER NOT NULL,
                 count INTEGER NOT NULL,
                 PRIMARY KEY (row, col)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO routes (request, agent, cost, length, refreshed) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                let cost = (!row.cost.is_nan()).then_some(row.cost);
                stmt.execute(rusqlite::params![
                    row.request,
                    row.agent,
                    cost,
                    row.length,
                    row.refreshed as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_request(&mut self, row: &RequestRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO requests \
             (request, start_row, start_col, target_row, target_col, routed, unreachable, refreshes, total_cost) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.request,
                row.start_row,
                row.start_col,
                row.target_row,
                row.target_col,
                row.routed,
                row.unreachable,
                row.refreshes,
                row.total_cost,
            ],
        )?;
        Ok(())
    }

    fn write_occupancy(&mut self, rows: &[OccupancyRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT OR REPLACE INTO occupancy (row, col, count) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.row, row.col, row.count])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
