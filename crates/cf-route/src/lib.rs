//! `cf-route` — congestion-aware routing over an occupancy grid.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`queue`]     | `PriorityQueue<T>` — fixed-capacity binary min-heap          |
//! | [`state`]     | `SearchState` — stamped arrays reused by every search        |
//! | [`cost`]      | `CostModel` trait, `LinearCost` (`occupancy * alpha + weight0`) |
//! | [`router`]    | `Router<C>`, `Direction`, `Route`, `SearchOutcome`           |
//! | [`scheduler`] | `HeuristicScheduler` — periodic landmark refresh             |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                               |
//!
//! # One agent at a time
//!
//! Every agent is routed by one forward search from its start to its target
//! on the current occupancy, then its path is written back into the
//! [`Environment`](cf_grid::Environment).  Later agents therefore see the
//! congestion left by earlier ones.  Every `modulo` agents the
//! [`HeuristicScheduler`] runs one exact reverse search from the target and
//! swaps its distance table in as the A* potential for the following
//! forward searches.

pub mod cost;
pub mod error;
pub mod queue;
pub mod router;
pub mod scheduler;
pub mod state;


pub use cost::{CostModel, LinearCost};
pub use error::{RouteError, RouteResult};
pub use queue::PriorityQueue;
pub use router::{Direction, Route, Router, SearchOutcome};
pub use scheduler::{AgentStep, HeuristicScheduler, Phase};
pub use state::SearchState;
