//! `cf-core` — foundational types for the `crowdflow` crowd simulator.
//!
//! This crate is a dependency of every other `cf-*` crate.  It has no `cf-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `CellId`, `RequestId`                                  |
//! | [`position`]   | `Position` (row/column), 4-neighbourhood offsets       |
//! | [`config`]     | `RoutingConfig`, `Downscale`                           |
//! | [`error`]      | `CfError`, `CfResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod position;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Downscale, RoutingConfig};
pub use error::{CfError, CfResult};
pub use ids::{CellId, RequestId};
pub use position::{NEIGHBOR_OFFSETS, Position};
