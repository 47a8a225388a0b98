#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Pareto-front extraction and non-domination ranking for multi-objective
//! trials. Given evaluated trials and one [`Direction`] per objective, it
//! finds the non-dominated set or ranks every trial into successive fronts,
//! optionally pushing constraint-violating trials behind feasible ones.
//!
//! Every call is a pure, synchronous function of its inputs.
//!
//! # Getting Started
//!
//! ```
//! use pareto_rank::prelude::*;
//!
//! let dirs = [Direction::Minimize, Direction::Maximize];
//! let trials = vec![
//!     Trial::complete(0, [1.0, 1.0]),
//!     Trial::complete(1, [2.0, 3.0]),
//!     Trial::complete(2, [2.0, 0.5]), // dominated by 0
//!     Trial::new(3, TrialState::Failed, Vec::new()),
//! ];
//!
//! let front = pareto_front(&trials, &dirs).unwrap();
//! let ids: Vec<u64> = front.iter().map(|t| t.id).collect();
//! assert_eq!(ids, vec![0, 1]);
//!
//! let raw: Vec<_> = trials[..3].iter().map(|t| t.values.clone()).collect();
//! let matrix = normalize_matrix(&raw, &dirs).unwrap();
//! let ranks = rank(&matrix, None, None).unwrap();
//! assert_eq!(ranks.ranks, vec![Some(0), Some(0), Some(1)]);
//! ```
//!
//! # Core Concepts
//!
//! | Item | Role |
//! |------|------|
//! | [`Trial`] | One evaluated candidate: id, state, nullable objective values. |
//! | [`TrialSet`] | Validated snapshot of trials plus directions. |
//! | [`dominance`] | Normalization into minimize space and the dominance relation. |
//! | [`pareto`] | Front extraction (log-linear for two objectives, quadratic otherwise). |
//! | [`ranking`] | Front peeling with early stop and feasibility penalties. |
//!
//! # Missing values
//!
//! A `None` or NaN objective value is the worst possible value for its
//! objective under either direction. A `None` or NaN penalty means
//! feasibility is unknown.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on [`Direction`], [`TrialState`], [`Trial`] and [`RankResult`](ranking::RankResult) | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) for front extraction and ranking | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod dominance;
mod error;
pub mod pareto;
pub mod ranking;
mod trial;
mod types;

pub use error::{Error, Result, ShapeKind};
pub use trial::{Trial, TrialSet};
pub use types::{Direction, TrialState};

/// Convenient wildcard import for the most common items.
///
/// ```
/// use pareto_rank::prelude::*;
/// ```
pub mod prelude {
    pub use crate::dominance::{dominates, normalize_matrix, normalize_value, normalize_values};
    pub use crate::error::{Error, Result, ShapeKind};
    pub use crate::pareto::{pareto_front, pareto_front_2d, pareto_front_indices, pareto_front_nd};
    pub use crate::ranking::{
        NonDominatedSorter, RankResult, constrained_rank, fast_non_dominated_sort,
        nondomination_rank, rank,
    };
    pub use crate::trial::{Trial, TrialSet};
    pub use crate::types::{Direction, TrialState};
}
