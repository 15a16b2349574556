//! `cf-movement` — movement requests and their input file.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`request`] | `MovementRequest`                                     |
//! | [`queue`]   | `MovementQueue` (FIFO `VecDeque<MovementRequest>`)    |
//! | [`loader`]  | `load_movements`, `load_movements_reader`             |
//! | [`error`]   | `MovementError`, `MovementResult<T>`                  |
//!
//! # Processing order
//!
//! Requests are consumed front to back in file order.  Each one routes
//! `count` agents from `start` to `target` before the next request begins;
//! requests only interact through the occupancy they leave behind.

pub mod error;
pub mod loader;
pub mod queue;
pub mod request;


pub use error::{MovementError, MovementResult};
pub use loader::{load_movements, load_movements_reader};
pub use queue::MovementQueue;
pub use request::MovementRequest;
