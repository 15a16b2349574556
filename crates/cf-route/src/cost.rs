//! Congestion cost models.
//!
//! The cost of stepping onto a cell depends only on how many agents have
//! already crossed it.  Any model must be non-decreasing in occupancy and
//! never negative, otherwise the landmark heuristic stops
//! being admissible and routes stop being optimal.

use cf_core::RoutingConfig;

use crate::RouteResult;

/// Cost of entering a cell given its current traversal count.
pub trait CostModel: Send + Sync {
    fn cost(&self, occupancy: u32) -> f64;
}

/// `occupancy * alpha + weight0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearCost {
    /// Base cost of entering an empty cell.
    pub weight0: f64,
    /// Extra cost per agent that already crossed the cell.
    pub alpha:   f64,
}

impl LinearCost {
    pub fn new(weight0: f64, alpha: f64) -> RouteResult<Self> {
        let config = RoutingConfig { weight0, alpha, ..RoutingConfig::default() };
        config.validate()?;
        Ok(Self { weight0, alpha })
    }

    /// Weights taken from a validated routing configuration.
    pub fn from_config(config: &RoutingConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self { weight0: config.weight0, alpha: config.alpha })
    }
}

impl Default for LinearCost {
    fn default() -> Self {
        let config = RoutingConfig::default();
        Self { weight0: config.weight0, alpha: config.alpha }
    }
}

impl CostModel for LinearCost {
    #[inline]
    fn cost(&self, occupancy: u32) -> f64 {
        occupancy as f64 * self.alpha + self.weight0
    }
}
