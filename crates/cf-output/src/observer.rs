//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cf_core::RequestId;
use cf_grid::Environment;
use cf_route::AgentStep;
use cf_sim::{RequestSummary, SimObserver, SimReport};

use crate::row::{RequestRow, RouteRow, occupancy_rows};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes route rows, request summaries, and the
/// final occupancy table to any [`OutputWriter`] backend (CSV, SQLite).
///
/// Route rows are buffered per request and written as one batch when the
/// request ends.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<RouteRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::error!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_agent_routed(&mut self, request: RequestId, agent: u32, step: &AgentStep) {
        let (cost, length) = match &step.route {
            Some(route) => (route.cost, route.cells.len() as u32),
            None => (f64::NAN, 0),
        };
        self.pending.push(RouteRow { request: request.0, agent, cost, length, refreshed: step.refreshed });
    }

    fn on_request_end(&mut self, summary: &RequestSummary) {
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_routes(&rows);
        self.store_err(result);

        let row = RequestRow {
            request:     summary.id.0,
            start_row:   summary.start.row,
            start_col:   summary.start.col,
            target_row:  summary.target.row,
            target_col:  summary.target.col,
            routed:      summary.agents_routed,
            unreachable: summary.agents_unreachable,
            refreshes:   summary.refreshes,
            total_cost:  summary.total_cost,
        };
        let result = self.writer.write_request(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, env: &Environment, _report: &SimReport) {
        let result = self.writer.write_occupancy(&occupancy_rows(env));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
