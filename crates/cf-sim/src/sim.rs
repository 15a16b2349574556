//! The `Sim` struct and its request loop.

use cf_core::{Position, RoutingConfig};
use cf_grid::{Environment, FreeCellIndex};
use cf_movement::{MovementQueue, MovementRequest};
use cf_route::{CostModel, HeuristicScheduler, LinearCost, Router, SearchState};

use crate::{RequestSummary, SimObserver, SimReport, SimResult, SkipReason};

/// One routing session: a prepared environment, the pending requests, and
/// the search machinery reused by every agent.
///
/// Requests are processed front to back.  For each one the scheduler routes
/// exactly `count` agents, refreshing the heuristic at agent indices that
/// are multiples of `modulo`; every route is written into [`Sim::env`]
/// before the next agent starts.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C: CostModel = LinearCost> {
    /// Validated routing configuration.
    pub config: RoutingConfig,

    /// Downscale factor the grid and requests were divided by.
    pub factor: u32,

    /// Occupancy environment, mutated by every routed agent.
    pub env: Environment,

    /// Requests not yet processed, in grid coordinates.
    pub requests: MovementQueue,

    pub(crate) router:    Router<C>,
    pub(crate) state:     SearchState,
    pub(crate) scheduler: HeuristicScheduler,
    pub(crate) snap:      Option<FreeCellIndex>,
    pub(crate) report:    SimReport,
}

impl<C: CostModel> Sim<C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process every pending request and return the run totals.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        while let Some(request) = self.requests.pop() {
            self.process_request(request, observer)?;
        }
        tracing::info!(report = %self.report, "simulation finished");
        observer.on_sim_end(&self.env, &self.report);
        Ok(self.report.clone())
    }

    /// Process at most `n` pending requests.  Returns how many were taken.
    ///
    /// `on_sim_end` is not called.
    pub fn run_requests<O: SimObserver>(&mut self, n: usize, observer: &mut O) -> SimResult<usize> {
        let mut done = 0;
        while done < n {
            let Some(request) = self.requests.pop() else { break };
            self.process_request(request, observer)?;
            done += 1;
        }
        Ok(done)
    }

    /// Route every agent of one request.
    ///
    /// Returns `None` when the request was skipped.
    pub fn process_request<O: SimObserver>(
        &mut self,
        request: MovementRequest,
        observer: &mut O,
    ) -> SimResult<Option<RequestSummary>> {
        let (start, target) = match self.resolve(&request) {
            Ok(endpoints) => endpoints,
            Err(reason) => {
                tracing::warn!(request = %request.id, %reason, "skipping request");
                self.report.skipped_requests += 1;
                observer.on_request_skipped(&request, reason);
                return Ok(None);
            }
        };

        tracing::debug!(request = %request.id, %start, %target, agents = request.count, "request start");
        observer.on_request_start(&request);

        let mut summary = RequestSummary {
            id: request.id,
            start,
            target,
            agents_routed: 0,
            agents_unreachable: 0,
            refreshes: 0,
            total_cost: 0.0,
        };
        let (start_cell, target_cell) = (self.env.cell(start), self.env.cell(target));

        for agent in 0..request.count {
            let step = self.scheduler.step(
                &mut self.router,
                &mut self.env,
                &mut self.state,
                start_cell,
                target_cell,
                agent,
            )?;
            if step.refreshed {
                summary.refreshes += 1;
            }
            match &step.route {
                Some(route) => {
                    summary.agents_routed += 1;
                    summary.total_cost += route.cost;
                }
                None => summary.agents_unreachable += 1,
            }
            observer.on_agent_routed(request.id, agent, &step);
        }

        if summary.agents_unreachable > 0 {
            tracing::warn!(
                request = %request.id,
                %start,
                %target,
                agents = summary.agents_unreachable,
                "target unreachable"
            );
        }
        tracing::info!(
            request = %request.id,
            routed = summary.agents_routed,
            refreshes = summary.refreshes,
            max_count = self.env.max_count(),
            "request done"
        );
        self.report.record(&summary);
        observer.on_request_end(&summary);
        Ok(Some(summary))
    }

    /// Totals so far.
    pub fn report(&self) -> &SimReport {
        &self.report
    }

    /// Hand back the final environment.
    pub fn into_environment(self) -> Environment {
        self.env
    }

    // ── Endpoint validation ───────────────────────────────────────────────

    fn resolve(&self, request: &MovementRequest) -> Result<(Position, Position), SkipReason> {
        let start = self.resolve_endpoint(
            request.start,
            SkipReason::StartOutOfBounds,
            SkipReason::StartBlocked,
        )?;
        let target = self.resolve_endpoint(
            request.target,
            SkipReason::TargetOutOfBounds,
            SkipReason::TargetBlocked,
        )?;
        Ok((start, target))
    }

    fn resolve_endpoint(
        &self,
        pos: Position,
        out_of_bounds: fn(Position) -> SkipReason,
        blocked: fn(Position) -> SkipReason,
    ) -> Result<Position, SkipReason> {
        if self.env.is_free(pos) {
            return Ok(pos);
        }
        let reason = if self.env.contains(pos) { blocked(pos) } else { out_of_bounds(pos) };
        match self.snap.as_ref().and_then(|index| index.nearest(pos)) {
            Some(snapped) => {
                tracing::debug!(from = %pos, to = %snapped, "snapped endpoint to free cell");
                Ok(snapped)
            }
            None => Err(reason),
        }
    }
}
