//! Fluent builder for constructing a [`Sim`].

use cf_core::RoutingConfig;
use cf_grid::{Environment, FreeCellIndex, ObstacleGrid};
use cf_movement::MovementQueue;
use cf_route::{CostModel, HeuristicScheduler, LinearCost, Router, SearchState};

use crate::{Sim, SimReport, SimResult};

/// Fluent builder for [`Sim<C>`].
///
/// # Required inputs
///
/// - [`RoutingConfig`] — weights, refresh period, downscale factor
/// - [`ObstacleGrid`] — the floor plan at full resolution
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                        |
/// |----------------------|------------------------------------------------|
/// | `.requests(q)`       | empty queue                                    |
/// | `.inflate(r)`        | 0 (no obstacle growth)                         |
/// | `.snap_endpoints(b)` | `false` (blocked endpoints skip the request)   |
/// | `.cost_model(c)`     | `LinearCost` from the config weights           |
///
/// Request positions are given in full-resolution coordinates and are
/// divided by the resolved downscale factor along with the grid.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, grid)
///     .requests(load_movements(path)?)
///     .snap_endpoints(true)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<C: CostModel = LinearCost> {
    config:   RoutingConfig,
    grid:     ObstacleGrid,
    requests: MovementQueue,
    inflate:  u32,
    snap:     bool,
    cost:     C,
}

impl SimBuilder<LinearCost> {
    pub fn new(config: RoutingConfig, grid: ObstacleGrid) -> Self {
        let cost = LinearCost { weight0: config.weight0, alpha: config.alpha };
        Self {
            config,
            grid,
            requests: MovementQueue::new(),
            inflate: 0,
            snap: false,
            cost,
        }
    }
}

impl<C: CostModel> SimBuilder<C> {
    /// Requests to process, in full-resolution coordinates.
    pub fn requests(mut self, requests: MovementQueue) -> Self {
        self.requests = requests;
        self
    }

    /// Grow obstacles by `radius` cells after downscaling.
    pub fn inflate(mut self, radius: u32) -> Self {
        self.inflate = radius;
        self
    }

    /// Move endpoints that land on an obstacle or outside the grid to the
    /// nearest free cell instead of skipping the request.
    pub fn snap_endpoints(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Replace the congestion cost model.
    pub fn cost_model<D: CostModel>(self, cost: D) -> SimBuilder<D> {
        SimBuilder {
            config:   self.config,
            grid:     self.grid,
            requests: self.requests,
            inflate:  self.inflate,
            snap:     self.snap,
            cost,
        }
    }

    /// Validate the configuration, prepare the grid, and allocate the search
    /// buffers.
    pub fn build(self) -> SimResult<Sim<C>> {
        self.config.validate()?;

        // ── Grid preparation ──────────────────────────────────────────────
        let factor = self.config.downscale.resolve(self.grid.rows(), self.grid.cols());
        let grid = self.grid.downscale(factor)?.inflate(self.inflate);
        let env = Environment::from_obstacle_grid(&grid);

        let mut requests = self.requests;
        requests.scale_down(factor);

        let snap = self.snap.then(|| FreeCellIndex::build(&env));

        tracing::info!(
            rows = env.rows(),
            cols = env.cols(),
            factor,
            obstacles = grid.obstacle_count(),
            requests = requests.len(),
            agents = requests.total_agents(),
            "simulation ready"
        );

        Ok(Sim {
            router: Router::new(self.cost, &env),
            state: SearchState::new(env.rows(), env.cols()),
            scheduler: HeuristicScheduler::new(self.config.modulo)?,
            config: self.config,
            factor,
            env,
            requests,
            snap,
            report: SimReport::default(),
        })
    }
}
