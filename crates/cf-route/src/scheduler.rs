//! Periodic landmark-heuristic refresh.
//!
//! Within one movement request the agents are numbered `0..count`.  Agent
//! `i` is a refresh agent when `i % modulo == 0`: before it is routed, a
//! reverse search from the request's target to the agent's start computes
//! exact distances-to-target on the current occupancy and installs them as
//! the heuristic.  Every other agent is routed against the last installed
//! table, which only underestimates because occupancy never decreases.
//!
//! ```text
//! agent index   0        1      2     …  modulo   modulo+1  …
//! phase         Refresh  Route  Route    Refresh  Route
//! ```
//!
//! Agent 0 of every request is a refresh agent, so a heuristic is never
//! carried over from a request with a different target.

use cf_core::CellId;
use cf_grid::Environment;

use crate::{CostModel, Direction, Route, RouteError, RouteResult, Router, SearchOutcome, SearchState};

/// What the scheduler does for a given agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Refresh the heuristic, then route.
    Refresh,
    /// Route against the current heuristic.
    Route,
}

/// Result of routing one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentStep {
    /// `None` when the target is unreachable from the start.
    pub route:     Option<Route>,
    /// A heuristic refresh ran before this agent.
    pub refreshed: bool,
}

#[derive(Clone, Debug)]
pub struct HeuristicScheduler {
    modulo:    u32,
    refreshes: u64,
}

impl HeuristicScheduler {
    pub fn new(modulo: u32) -> RouteResult<Self> {
        if modulo == 0 {
            return Err(RouteError::Config(cf_core::CfError::Config(
                "modulo must be at least 1".into(),
            )));
        }
        Ok(Self { modulo, refreshes: 0 })
    }

    #[inline]
    pub fn modulo(&self) -> u32 {
        self.modulo
    }

    /// Refreshes performed so far.
    #[inline]
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    #[inline]
    pub fn phase(&self, agent_index: u32) -> Phase {
        if agent_index % self.modulo == 0 { Phase::Refresh } else { Phase::Route }
    }

    /// Reverse search from `target` towards `start`, adopted as heuristic.
    ///
    /// Cells the search did not settle read the largest settled distance,
    /// which never overestimates: every unsettled cell reachable from
    /// `start` is at least that far from `target`.
    pub fn refresh<C: CostModel>(
        &mut self,
        router: &mut Router<C>,
        env: &Environment,
        state: &mut SearchState,
        start: CellId,
        target: CellId,
    ) -> RouteResult<SearchOutcome> {
        let outcome = router.search(env, state, target, start, Direction::Reverse)?;
        state.adopt_as_heuristic(outcome.settled);
        self.refreshes += 1;
        tracing::debug!(
            iteration = outcome.iteration,
            start = %start,
            target = %target,
            expanded = outcome.expanded,
            ceiling = outcome.settled,
            "heuristic refreshed"
        );
        Ok(outcome)
    }

    /// Route agent `agent_index` of the current request, refreshing first if
    /// its phase says so.  The path is recorded in `env`.
    pub fn step<C: CostModel>(
        &mut self,
        router: &mut Router<C>,
        env: &mut Environment,
        state: &mut SearchState,
        start: CellId,
        target: CellId,
        agent_index: u32,
    ) -> RouteResult<AgentStep> {
        let refreshed = match self.phase(agent_index) {
            Phase::Refresh => {
                self.refresh(router, env, state, start, target)?;
                true
            }
            Phase::Route => false,
        };
        let route = router.route_agent(env, state, start, target)?;
        Ok(AgentStep { route, refreshed })
    }
}
