//! Independent sessions over the same inputs.
//!
//! Each session gets its own environment, queue copy, and search buffers,
//! so sessions share nothing mutable.  With the `parallel` feature they run
//! on Rayon's thread pool; the agents inside a session are still routed one
//! at a time.

use cf_core::RoutingConfig;
use cf_grid::{Environment, ObstacleGrid};
use cf_movement::MovementQueue;

use crate::{NoopObserver, SimBuilder, SimReport, SimResult};

/// Final state of one session.
#[derive(Clone, Debug)]
pub struct SessionResult {
    pub config: RoutingConfig,
    pub report: SimReport,
    pub env:    Environment,
}

/// Run one full session per entry of `configs`.
///
/// Results come back in `configs` order.  A failing session does not stop
/// the others.
pub fn run_sessions(
    grid: &ObstacleGrid,
    requests: &MovementQueue,
    configs: &[RoutingConfig],
    inflate: u32,
    snap_endpoints: bool,
) -> Vec<SimResult<SessionResult>> {
    let run_one = |config: &RoutingConfig| -> SimResult<SessionResult> {
        let mut sim = SimBuilder::new(config.clone(), grid.clone())
            .requests(requests.clone())
            .inflate(inflate)
            .snap_endpoints(snap_endpoints)
            .build()?;
        let report = sim.run(&mut NoopObserver)?;
        Ok(SessionResult { config: sim.config.clone(), report, env: sim.into_environment() })
    };

    #[cfg(not(feature = "parallel"))]
    {
        configs.iter().map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        configs.par_iter().map(run_one).collect()
    }
}
