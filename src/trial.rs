//! Trial records and immutable trial snapshots.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dominance::normalize_values;
use crate::error::{Error, Result, ShapeKind};
use crate::pareto;
use crate::ranking::{self, RankResult};
use crate::types::{Direction, TrialState};

/// One evaluated candidate.
///
/// `values` holds one entry per objective. A `None` marks a missing value,
/// which always compares as the worst possible value for its objective.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trial {
    /// Stable, unique ordering key (the trial number).
    pub id: u64,
    /// The lifecycle state. Only complete trials are compared.
    pub state: TrialState,
    /// The raw objective values, in the same order as the directions.
    pub values: Vec<Option<f64>>,
}

impl Trial {
    /// Creates a trial from its parts.
    #[must_use]
    pub fn new(id: u64, state: TrialState, values: Vec<Option<f64>>) -> Self {
        Self { id, state, values }
    }

    /// Creates a complete trial with every value present.
    #[must_use]
    pub fn complete(id: u64, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(id, TrialState::Complete, values.into_iter().map(Some).collect())
    }

    /// Returns `true` if this trial is eligible for comparison.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }
}

/// A read-only snapshot of trials and the directions they are judged by.
///
/// Construction validates every complete trial against the directions and
/// caches its normalized values, so the queries on a `TrialSet` cannot fail
/// on shape.
///
/// ```
/// use pareto_rank::{Direction, Trial, TrialSet};
///
/// let set = TrialSet::new(
///     vec![Direction::Minimize, Direction::Minimize],
///     vec![
///         Trial::complete(0, [1.0, 2.0]),
///         Trial::complete(1, [2.0, 1.0]),
///         Trial::complete(2, [1.0, 1.0]),
///         Trial::complete(3, [3.0, 3.0]),
///     ],
/// )
/// .unwrap();
///
/// let ids: Vec<u64> = set.pareto_front().iter().map(|t| t.id).collect();
/// assert_eq!(ids, vec![2]);
/// ```
#[derive(Clone, Debug)]
pub struct TrialSet {
    directions: Vec<Direction>,
    trials: Vec<Trial>,
    /// Positions in `trials` of the complete trials, in input order.
    complete: Vec<usize>,
    /// Normalized values of `complete`, row for row.
    normalized: Vec<Vec<f64>>,
}

impl TrialSet {
    /// Builds a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if a complete trial's value count
    /// differs from `directions.len()`.
    pub fn new(directions: Vec<Direction>, trials: Vec<Trial>) -> Result<Self> {
        let mut complete = Vec::new();
        let mut normalized = Vec::new();
        for (pos, trial) in trials.iter().enumerate() {
            if trial.is_complete() {
                normalized.push(normalize_values(&trial.values, &directions)?);
                complete.push(pos);
            }
        }
        Ok(Self {
            directions,
            trials,
            complete,
            normalized,
        })
    }

    /// The per-objective directions.
    #[must_use]
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of objectives.
    #[must_use]
    pub fn n_objectives(&self) -> usize {
        self.directions.len()
    }

    /// All trials, in input order.
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// The complete trials, in input order.
    pub fn complete_trials(&self) -> impl Iterator<Item = &Trial> {
        self.complete.iter().map(|&pos| &self.trials[pos])
    }

    /// Minimize-space objective rows of the complete trials, in input order.
    #[must_use]
    pub fn objective_matrix(&self) -> &[Vec<f64>] {
        &self.normalized
    }

    /// Returns the Pareto-optimal complete trials in ascending `id` order.
    ///
    /// Uses the log-linear sweep for two objectives and the quadratic scan
    /// otherwise.
    #[must_use]
    pub fn pareto_front(&self) -> Vec<&Trial> {
        let complete: Vec<&Trial> = self.complete_trials().collect();
        pareto::select_front(&complete, &self.normalized, self.n_objectives())
    }

    /// Ranks the complete trials by non-domination.
    ///
    /// The returned ranks are aligned with [`complete_trials`](Self::complete_trials).
    /// When given, `penalty` must hold one entry per complete trial.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if `penalty` has the wrong length.
    pub fn rank(
        &self,
        penalty: Option<&[Option<f64>]>,
        n_below: Option<usize>,
    ) -> Result<RankResult> {
        if let Some(p) = penalty.filter(|p| p.len() != self.complete.len()) {
            return Err(Error::shape(
                ShapeKind::Penalty,
                self.complete.len(),
                p.len(),
            ));
        }
        ranking::rank(&self.normalized, penalty, n_below)
    }
}
