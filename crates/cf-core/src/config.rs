//! Routing configuration.
//!
//! # Cost model
//!
//! Entering a cell costs `occupancy * alpha + weight0`.  `weight0` is the
//! flat per-step cost, `alpha` the penalty per agent that already crossed
//! the cell.  Both must be non-negative and at least one must be positive,
//! otherwise every route costs zero and congestion has no effect.
//!
//! # Heuristic refresh
//!
//! `modulo` is the number of agents routed between two exact refreshes of
//! the landmark heuristic.  `1` refreshes before every agent (exact but
//! slow); large values amortize the refresh over many agents.

use std::fmt;
use std::str::FromStr;

use crate::{CfError, CfResult};

/// Largest grid routed without downscaling under [`Downscale::Auto`].
pub const FIT_MAX_ROWS: u32 = 720;
pub const FIT_MAX_COLS: u32 = 1_280;

// ── Downscale ─────────────────────────────────────────────────────────────────

/// How input coordinates and obstacle grids are reduced before routing.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Downscale {
    /// Pick the smallest factor that fits the grid into
    /// [`FIT_MAX_ROWS`] × [`FIT_MAX_COLS`].
    Auto,
    /// Fixed factor; must be ≥ 1.
    Factor(u32),
}

impl Downscale {
    /// Resolve to a concrete factor for a `rows × cols` source grid.
    pub fn resolve(self, rows: u32, cols: u32) -> u32 {
        match self {
            Downscale::Auto => fit_factor(rows, cols, FIT_MAX_ROWS, FIT_MAX_COLS),
            Downscale::Factor(n) => n,
        }
    }
}

impl Default for Downscale {
    fn default() -> Self {
        Downscale::Factor(1)
    }
}

impl fmt::Display for Downscale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Downscale::Auto => f.write_str("auto"),
            Downscale::Factor(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Downscale {
    type Err = CfError;

    fn from_str(s: &str) -> CfResult<Self> {
        match s.trim() {
            "auto" => Ok(Downscale::Auto),
            n => n
                .parse::<u32>()
                .map(Downscale::Factor)
                .map_err(|_| CfError::Parse(format!("invalid downscale {n:?}: expected \"auto\" or an integer"))),
        }
    }
}

impl TryFrom<String> for Downscale {
    type Error = CfError;

    fn try_from(s: String) -> CfResult<Self> {
        s.parse()
    }
}

impl From<Downscale> for String {
    fn from(d: Downscale) -> String {
        d.to_string()
    }
}

/// Smallest integer factor `n ≥ 1` such that the grid fits (approximately)
/// within `max_rows × max_cols`: `max(rows / max_rows, cols / max_cols)`.
pub fn fit_factor(rows: u32, cols: u32, max_rows: u32, max_cols: u32) -> u32 {
    let n1 = rows / max_rows.max(1);
    let n2 = cols / max_cols.max(1);
    n1.max(n2).max(1)
}

// ── RoutingConfig ─────────────────────────────────────────────────────────────

/// Parameters of one routing session.
///
/// Typically loaded from a TOML file by the application crate, overridden by
/// command-line flags, and validated once before any search runs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    /// Flat cost of entering any free cell.
    pub weight0: f64,

    /// Additional cost per agent that previously crossed the entered cell.
    pub alpha: f64,

    /// Heuristic refresh period in agents (≥ 1).
    pub modulo: u32,

    /// Downscale factor applied to the obstacle grid and request positions.
    pub downscale: Downscale,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weight0:   1.0,
            alpha:     1.0,
            modulo:    10,
            downscale: Downscale::default(),
        }
    }
}

impl RoutingConfig {
    /// Reject configurations the router cannot run with.
    pub fn validate(&self) -> CfResult<()> {
        if !self.weight0.is_finite() || self.weight0 < 0.0 {
            return Err(CfError::Config(format!(
                "weight0 must be a finite non-negative number, got {}",
                self.weight0
            )));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(CfError::Config(format!(
                "alpha must be a finite non-negative number, got {}",
                self.alpha
            )));
        }
        if self.weight0 == 0.0 && self.alpha == 0.0 {
            return Err(CfError::Config("weight0 and alpha cannot both be zero".into()));
        }
        if self.modulo == 0 {
            return Err(CfError::Config("modulo must be at least 1".into()));
        }
        if self.downscale == Downscale::Factor(0) {
            return Err(CfError::Config("downscale factor must be at least 1".into()));
        }
        Ok(())
    }
}
