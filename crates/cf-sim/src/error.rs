use thiserror::Error;

use cf_core::CfError;
use cf_grid::GridError;
use cf_route::RouteError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CfError),

    #[error("grid preparation failed: {0}")]
    Grid(#[from] GridError),

    #[error("routing failed: {0}")]
    Route(#[from] RouteError),
}

pub type SimResult<T> = Result<T, SimError>;
