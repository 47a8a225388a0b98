//! Core types shared by every dominance computation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The direction of optimization for one objective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Minimize the objective value.
    Minimize,
    /// Maximize the objective value.
    Maximize,
}

/// The state of a trial in its lifecycle.
///
/// Only [`TrialState::Complete`] trials take part in front extraction and
/// ranking. Any other state is dominated by every complete trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrialState {
    /// The trial is currently running.
    Running,
    /// The trial is queued and has not started.
    Waiting,
    /// The trial completed successfully.
    Complete,
    /// The trial was stopped early.
    Pruned,
    /// The trial failed with an error.
    Failed,
}

impl TrialState {
    /// Returns `true` for [`TrialState::Complete`].
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}
