//! Closed-set Dijkstra / A* over the occupancy grid.
//!
//! # Directions
//!
//! | Direction   | Source → stop     | Step cost charged for `u → v`   | Priority          |
//! |-------------|-------------------|---------------------------------|-------------------|
//! | `Forward`   | agent start → target | `cost(occupancy[v])`         | `g(v) + h(v)`     |
//! | `Reverse`   | target → agent start | `cost(occupancy[u])`         | `g(v)`            |
//!
//! In a reverse search the relaxation of `v` from `u` stands for the forward
//! move `v → u`, which enters `u`.  The distance it settles at `v` is
//! therefore the exact forward cost of reaching the target from `v`, which is
//! what the landmark heuristic needs.
//!
//! # Search contract
//!
//! - Obstacles are never relaxed, pushed, or expanded.
//! - A popped cell already closed this iteration is a stale duplicate and is
//!   skipped.
//! - The search stops as soon as `stop` is popped; whatever is left in the
//!   queue is discarded.
//! - Path reconstruction only trusts a `stop` closed in the current
//!   iteration; anything else is "unreachable" and yields no route.

use cf_core::{CellId, NEIGHBOR_OFFSETS};
use cf_grid::Environment;

use crate::{CostModel, LinearCost, PriorityQueue, RouteError, RouteResult, SearchState};

// ── Route ─────────────────────────────────────────────────────────────────────

/// One agent's realized path.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Cells from start to target, both included.
    pub cells: Vec<CellId>,
    /// Sum of entry costs of every cell after the start, at routing time.
    pub cost:  f64,
}

impl Route {
    /// Number of moves (cells minus one).
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if start and target are the same cell.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() == 1
    }
}

/// Search direction; see the module table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Summary of one search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Iteration number the search ran under.
    pub iteration: u32,
    /// `stop` was popped.
    pub reached:   bool,
    /// Distance of `stop` when reached, otherwise infinity.
    pub cost:      f64,
    /// Distance of the last settled cell (the largest settled distance).
    pub settled:   f64,
    /// Cells closed.
    pub expanded:  usize,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// Grid search engine bound to one cost model and one reusable queue.
#[derive(Clone, Debug)]
pub struct Router<C: CostModel = LinearCost> {
    cost:  C,
    queue: PriorityQueue<CellId>,
}

impl<C: CostModel> Router<C> {
    /// Router whose queue is sized for `env`.
    pub fn new(cost: C, env: &Environment) -> Self {
        Self { cost, queue: PriorityQueue::for_grid(env.cell_count()) }
    }

    #[inline]
    pub fn cost_model(&self) -> &C {
        &self.cost
    }

    /// Run one search from `source` until `stop` is popped or the frontier
    /// is exhausted.
    ///
    /// Forward searches use whatever heuristic `state` currently holds.  The
    /// environment is only read.
    pub fn search(
        &mut self,
        env: &Environment,
        state: &mut SearchState,
        source: CellId,
        stop: CellId,
        direction: Direction,
    ) -> RouteResult<SearchOutcome> {
        if state.cell_count() != env.cell_count() {
            return Err(RouteError::StateMismatch {
                expected: state.cell_count(),
                got:      env.cell_count(),
            });
        }
        let (rows, cols) = (env.rows(), env.cols());
        let iteration = state.begin_iteration();
        let mut outcome = SearchOutcome {
            iteration,
            reached: false,
            cost: f64::INFINITY,
            settled: 0.0,
            expanded: 0,
        };
        if env.is_blocked(source) {
            return Ok(outcome);
        }

        state.relax(source, 0.0, CellId::NONE);
        let start_priority = match direction {
            Direction::Forward => state.heuristic(source),
            Direction::Reverse => 0.0,
        };
        self.queue.push(start_priority, source)?;

        while !self.queue.is_empty() {
            let (_, u) = self.queue.pop()?;
            if state.is_closed(u) {
                continue;
            }
            state.close(u);
            outcome.expanded += 1;

            let du = state.distance(u);
            outcome.settled = du;
            if u == stop {
                outcome.reached = true;
                outcome.cost = du;
                break;
            }

            let exit_cost = match direction {
                Direction::Forward => 0.0,
                Direction::Reverse => self.cost.cost(env.occupancy(u)),
            };
            let pos = state.position(u);
            for (d_row, d_col) in NEIGHBOR_OFFSETS {
                let Some(next) = pos.offset(d_row, d_col, rows, cols) else { continue };
                let v = next.cell(cols);
                if env.is_blocked(v) || state.is_closed(v) {
                    continue;
                }
                let step = match direction {
                    Direction::Forward => self.cost.cost(env.occupancy(v)),
                    Direction::Reverse => exit_cost,
                };
                let candidate = du + step;
                if candidate < state.distance(v) {
                    state.relax(v, candidate, u);
                    let priority = match direction {
                        Direction::Forward => candidate + state.heuristic(v),
                        Direction::Reverse => candidate,
                    };
                    self.queue.push(priority, v)?;
                }
            }
        }

        let discarded = self.queue.clear();
        tracing::trace!(
            iteration,
            ?direction,
            source = %source,
            stop = %stop,
            reached = outcome.reached,
            expanded = outcome.expanded,
            discarded,
            "search finished"
        );
        Ok(outcome)
    }

    /// Forward search without touching occupancy.
    ///
    /// Returns `None` when `target` is unreachable.
    pub fn find_route(
        &mut self,
        env: &Environment,
        state: &mut SearchState,
        start: CellId,
        target: CellId,
    ) -> RouteResult<Option<Route>> {
        let outcome = self.search(env, state, start, target, Direction::Forward)?;
        let cells = state.path_to(target);
        if cells.is_empty() {
            return Ok(None);
        }
        Ok(Some(Route { cells, cost: outcome.cost }))
    }

    /// Route one agent and record its path in the environment.
    ///
    /// Every cell of the path, start and target included, gains one
    /// traversal.  An unreachable target leaves the environment untouched
    /// and returns `None`.
    pub fn route_agent(
        &mut self,
        env: &mut Environment,
        state: &mut SearchState,
        start: CellId,
        target: CellId,
    ) -> RouteResult<Option<Route>> {
        let route = self.find_route(env, state, start, target)?;
        if let Some(route) = &route {
            env.apply_path(&route.cells, 1);
        }
        Ok(route)
    }
}
