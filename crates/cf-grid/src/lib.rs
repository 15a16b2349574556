//! `cf-grid` — obstacle grids, the occupancy environment, and export views.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`obstacle`]    | `ObstacleGrid` — parse, downscale, inflate, random maps   |
//! | [`environment`] | `Environment` — obstacle mask + per-cell traversal counts |
//! | [`index`]       | `FreeCellIndex` — R-tree snapping to the nearest free cell |
//! | [`export`]      | `IntensityGrid`, `OverlayImage`, congestion overlay       |
//! | [`error`]       | `GridError`, `GridResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod environment;
pub mod error;
pub mod export;
pub mod index;
pub mod obstacle;


pub use environment::Environment;
pub use error::{GridError, GridResult};
pub use export::{IntensityGrid, OverlayImage, overlay_red};
pub use index::FreeCellIndex;
pub use obstacle::ObstacleGrid;
