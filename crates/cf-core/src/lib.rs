//! # cf-core: Cascading-cluster slot engine
//!
//! Resolves spins on a 7×7 board where groups of five or more connected,
//! identical symbols pay, explode, and are replaced by symbols falling from
//! above until the board settles.
//!
//! ## Architecture
//!
//! ```text
//! CascadeResolver
//!     │
//!     ├── SymbolSource (weighted regular draw + per-cell bonus chance)
//!     ├── board::{fill, collapse_and_refill}
//!     ├── find_clusters (row-major BFS, size ≥ 5)
//!     ├── MultiplierState (per-cell hits → x2 … x128)
//!     └── PayTable (base × size × avg multiplier × bet, capped)
//!           │
//!           v
//!     Resolution → Vec<CascadeStep>
//! ```
//!
//! Session bookkeeping (balance, free spins, multiplier persistence) lives in
//! `cf-session`; this crate is pure engine and holds no session state.

pub mod board;
pub mod cascade;
pub mod cluster;
pub mod config;
pub mod error;
pub mod grid;
pub mod multiplier;
pub mod paytable;
pub mod source;
pub mod symbols;

pub use cascade::*;
pub use cluster::{Cluster, MIN_CLUSTER_SIZE, find_clusters};
pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use grid::*;
pub use multiplier::*;
pub use paytable::*;
pub use source::*;
pub use symbols::*;
