//! Pareto front extraction over trials.
//!
//! In multi-objective optimization there is generally no single best
//! trial. The **Pareto front** is the set of complete trials that no other
//! complete trial dominates. Two algorithms compute it:
//!
//! | Function | Objectives | Complexity | Result order |
//! |---|---|---|---|
//! | [`pareto_front_2d`] | exactly 2 | O(n log n) | ascending `id` |
//! | [`pareto_front_nd`] | any | O(n²) | filtered input order |
//! | [`pareto_front`] | any (dispatches) | best of the above | ascending `id` |
//!
//! [`pareto_front_indices`] does the same for a raw value matrix.
//!
//! # Example
//!
//! ```
//! use pareto_rank::pareto::pareto_front;
//! use pareto_rank::{Direction, Trial};
//!
//! let trials = vec![
//!     Trial::complete(0, [1.0, 5.0]), // Pareto-optimal
//!     Trial::complete(1, [5.0, 1.0]), // Pareto-optimal
//!     Trial::complete(2, [3.0, 3.0]), // Pareto-optimal
//!     Trial::complete(3, [4.0, 4.0]), // Dominated by 2
//! ];
//! let dirs = [Direction::Minimize, Direction::Minimize];
//!
//! let ids: Vec<u64> = pareto_front(&trials, &dirs)
//!     .unwrap()
//!     .iter()
//!     .map(|t| t.id)
//!     .collect();
//! assert_eq!(ids, vec![0, 1, 2]);
//! ```

use core::cmp::Ordering;

use crate::dominance::{dominates_normalized, normalize_matrix, normalize_values};
use crate::error::{Error, Result, ShapeKind};
use crate::trial::Trial;
use crate::types::Direction;

/// Returns the Pareto-optimal complete trials in ascending `id` order.
///
/// Uses [`pareto_front_2d`] for two objectives (log-linear) and
/// [`pareto_front_nd`] otherwise (quadratic).
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if a complete trial's value count
/// differs from `directions.len()`.
pub fn pareto_front<'a>(trials: &'a [Trial], directions: &[Direction]) -> Result<Vec<&'a Trial>> {
    let (complete, keys) = normalize_complete(trials, directions)?;
    Ok(select_front(&complete, &keys, directions.len()))
}

/// Two-objective front extraction by sort-and-sweep.
///
/// Complete trials are sorted by their normalized `(first, second)`
/// objective pair (stable, so ties keep input order). A single sweep then
/// keeps each trial the most recently kept trial does not dominate. The
/// kept trials are returned in ascending `id` order.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `directions` does not hold exactly
/// two entries or a complete trial's value count differs from it.
pub fn pareto_front_2d<'a>(
    trials: &'a [Trial],
    directions: &[Direction],
) -> Result<Vec<&'a Trial>> {
    if directions.len() != 2 {
        return Err(Error::shape(ShapeKind::Directions, 2, directions.len()));
    }
    let (complete, keys) = normalize_complete(trials, directions)?;
    let mut front: Vec<&Trial> = sweep_2d(&keys).into_iter().map(|i| complete[i]).collect();
    trace_debug!(
        algorithm = "sweep_2d",
        n_trials = complete.len(),
        front_size = front.len(),
        "pareto front extracted"
    );
    front.sort_by_key(|t| t.id);
    Ok(front)
}

/// Front extraction by pairwise scan, for any number of objectives.
///
/// A complete trial is kept unless some other complete trial dominates it.
/// Kept trials are returned in the order they appear in `trials`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if a complete trial's value count
/// differs from `directions.len()`.
pub fn pareto_front_nd<'a>(
    trials: &'a [Trial],
    directions: &[Direction],
) -> Result<Vec<&'a Trial>> {
    let (complete, keys) = normalize_complete(trials, directions)?;
    let front: Vec<&Trial> = scan_nd(&keys).into_iter().map(|i| complete[i]).collect();
    trace_debug!(
        algorithm = "scan_nd",
        n_trials = complete.len(),
        front_size = front.len(),
        "pareto front extracted"
    );
    Ok(front)
}

/// Returns the row indices of the non-dominated rows of a raw value matrix,
/// in ascending order.
///
/// Every row is treated as a complete trial; missing values (`None` or NaN)
/// rank as the worst possible value.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if a row length differs from
/// `directions.len()`.
pub fn pareto_front_indices(
    values: &[Vec<Option<f64>>],
    directions: &[Direction],
) -> Result<Vec<usize>> {
    let keys = normalize_matrix(values, directions)?;
    let mut front = if directions.len() == 2 {
        sweep_2d(&keys)
    } else {
        scan_nd(&keys)
    };
    front.sort_unstable();
    Ok(front)
}

/// Picks the front of pre-normalized complete trials, sorted by `id`.
pub(crate) fn select_front<'a>(
    complete: &[&'a Trial],
    keys: &[Vec<f64>],
    n_objectives: usize,
) -> Vec<&'a Trial> {
    let positions = if n_objectives == 2 {
        sweep_2d(keys)
    } else {
        scan_nd(keys)
    };
    trace_debug!(
        algorithm = if n_objectives == 2 { "sweep_2d" } else { "scan_nd" },
        n_trials = complete.len(),
        n_objectives,
        front_size = positions.len(),
        "pareto front extracted"
    );

    let mut front: Vec<&Trial> = positions.into_iter().map(|i| complete[i]).collect();
    front.sort_by_key(|t| t.id);
    front
}

/// Filters to complete trials and normalizes their values.
fn normalize_complete<'a>(
    trials: &'a [Trial],
    directions: &[Direction],
) -> Result<(Vec<&'a Trial>, Vec<Vec<f64>>)> {
    let complete: Vec<&Trial> = trials.iter().filter(|t| t.is_complete()).collect();
    let keys = complete
        .iter()
        .map(|t| normalize_values(&t.values, directions))
        .collect::<Result<Vec<_>>>()?;
    Ok((complete, keys))
}

/// Lexicographic order over normalized keys. Keys never hold NaN.
fn lexicographic(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sort-and-sweep over two-column keys. Returns kept positions in sweep order.
///
/// After sorting, the last kept key holds the smallest second coordinate
/// seen so far, so it alone decides whether the next key is dominated.
fn sweep_2d(keys: &[Vec<f64>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| lexicographic(&keys[a], &keys[b]));

    let Some((&first, rest)) = order.split_first() else {
        return Vec::new();
    };

    let mut front = vec![first];
    let mut last = first;
    for &i in rest {
        if dominates_normalized(&keys[last], &keys[i]) {
            continue;
        }
        front.push(i);
        last = i;
    }
    front
}

/// Quadratic scan. Returns non-dominated positions in input order.
fn scan_nd(keys: &[Vec<f64>]) -> Vec<usize> {
    (0..keys.len())
        .filter(|&i| !keys.iter().any(|other| dominates_normalized(other, &keys[i])))
        .collect()
}
