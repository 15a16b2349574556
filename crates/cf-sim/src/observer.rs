//! Simulation observer trait for progress reporting and data collection.

use cf_core::RequestId;
use cf_grid::Environment;
use cf_movement::MovementRequest;
use cf_route::AgentStep;

use crate::{RequestSummary, SimReport, SkipReason};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] while requests are
/// processed.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_request_end(&mut self, summary: &RequestSummary) {
///         println!("{}: {} agents", summary.id, summary.agents_routed);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the first agent of a request is routed.
    fn on_request_start(&mut self, _request: &MovementRequest) {}

    /// Called instead of `on_request_start` for requests that cannot be
    /// routed on this grid.
    fn on_request_skipped(&mut self, _request: &MovementRequest, _reason: SkipReason) {}

    /// Called after every agent, `agent` counting from 0 within the request.
    ///
    /// The environment already includes the agent's path.
    fn on_agent_routed(&mut self, _request: RequestId, _agent: u32, _step: &AgentStep) {}

    /// Called once every agent of the request has been routed.
    fn on_request_end(&mut self, _summary: &RequestSummary) {}

    /// Called once after the queue is exhausted, with the final occupancy.
    fn on_sim_end(&mut self, _env: &Environment, _report: &SimReport) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
