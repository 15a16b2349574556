//! `cf-sim` — movement processing loop for the crowdflow simulator.
//!
//! # Request loop
//!
//! ```text
//! while let Some(request) = queue.pop():
//!   ① Resolve   — endpoints must be in bounds and free; otherwise snap them
//!                 to the nearest free cell (if enabled) or skip the request.
//!   ② Route     — for agent in 0..request.count:
//!                   agent % modulo == 0 → refresh heuristic (reverse search)
//!                   forward search on current occupancy
//!                   add the path to the occupancy grid
//!   ③ Report    — per-request summary, then run totals at the end.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | [`run_sessions`] runs sessions on Rayon's thread pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cf_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, grid).requests(queue).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{RequestSummary, SimReport, SkipReason};
pub use sim::Sim;
pub use sweep::{SessionResult, run_sessions};
