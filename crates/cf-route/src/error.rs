//! Routing error type.
//!
//! Every variant is fatal for the routing session: they signal a violated
//! sizing invariant or an invalid configuration.  An unreachable target is
//! not an error; it surfaces as an empty route.

use thiserror::Error;

use cf_core::CfError;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("priority queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("pop from an empty priority queue")]
    QueueEmpty,

    #[error("search state covers {expected} cells but the environment has {got}")]
    StateMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Config(#[from] CfError),
}

pub type RouteResult<T> = Result<T, RouteError>;
