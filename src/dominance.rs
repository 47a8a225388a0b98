//! Direction normalization and the Pareto dominance relation.
//!
//! Every comparison in this crate happens in *minimize-equivalent* space:
//! maximized objectives are negated and missing values become
//! `f64::INFINITY`, the worst possible value, regardless of direction.
//!
//! # Example
//!
//! ```
//! use pareto_rank::dominance::{dominates, normalize_value};
//! use pareto_rank::{Direction, Trial};
//!
//! assert_eq!(normalize_value(Some(3.0), Direction::Maximize), -3.0);
//! assert!(normalize_value(None, Direction::Maximize).is_infinite());
//!
//! let dirs = [Direction::Minimize, Direction::Maximize];
//! let a = Trial::complete(0, [1.0, 5.0]);
//! let b = Trial::complete(1, [2.0, 4.0]);
//! assert!(dominates(&a, &b, &dirs).unwrap());
//! assert!(!dominates(&b, &a, &dirs).unwrap());
//! ```

use crate::error::{Error, Result, ShapeKind};
use crate::trial::Trial;
use crate::types::Direction;

/// Maps NaN to `+inf` so a missing value never compares better than a real one.
pub(crate) fn missing_as_worst(value: f64) -> f64 {
    if value.is_nan() { f64::INFINITY } else { value }
}

/// Converts one raw objective value into its minimize-equivalent scalar.
///
/// A missing value (`None` or NaN) maps to `f64::INFINITY` under both
/// directions. A present value is returned as-is for
/// [`Direction::Minimize`] and negated for [`Direction::Maximize`].
#[must_use]
pub fn normalize_value(value: Option<f64>, direction: Direction) -> f64 {
    match value {
        Some(v) if !v.is_nan() => match direction {
            Direction::Minimize => v,
            Direction::Maximize => -v,
        },
        _ => f64::INFINITY,
    }
}

/// Normalizes a full value vector against its directions.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if `values` and `directions` differ in
/// length.
pub fn normalize_values(values: &[Option<f64>], directions: &[Direction]) -> Result<Vec<f64>> {
    if values.len() != directions.len() {
        return Err(Error::shape(
            ShapeKind::Directions,
            directions.len(),
            values.len(),
        ));
    }
    Ok(values
        .iter()
        .zip(directions)
        .map(|(&v, &d)| normalize_value(v, d))
        .collect())
}

/// Normalizes every row of a raw objective matrix.
///
/// The result is ready to be passed to
/// [`ranking::rank`](crate::ranking::rank) or
/// [`ranking::nondomination_rank`](crate::ranking::nondomination_rank).
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if any row length differs from
/// `directions.len()`.
pub fn normalize_matrix(
    rows: &[Vec<Option<f64>>],
    directions: &[Direction],
) -> Result<Vec<Vec<f64>>> {
    rows.iter()
        .map(|row| normalize_values(row, directions))
        .collect()
}

/// Returns `true` if trial `a` Pareto-dominates trial `b`.
///
/// An incomplete `a` dominates nothing, and a complete `a` dominates any
/// incomplete `b`. Between two complete trials, `a` dominates `b` when it
/// is at least as good in every objective and strictly better in at least
/// one, after normalization. Identical normalized vectors never dominate
/// each other.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if both trials are complete and their
/// value counts differ from each other or from `directions.len()`.
pub fn dominates(a: &Trial, b: &Trial, directions: &[Direction]) -> Result<bool> {
    if !a.is_complete() {
        return Ok(false);
    }
    if !b.is_complete() {
        return Ok(true);
    }
    if a.values.len() != b.values.len() {
        return Err(Error::shape(
            ShapeKind::Objectives,
            a.values.len(),
            b.values.len(),
        ));
    }

    let a_norm = normalize_values(&a.values, directions)?;
    let b_norm = normalize_values(&b.values, directions)?;
    Ok(dominates_normalized(&a_norm, &b_norm))
}

/// Strict dominance between two vectors already in minimize space.
///
/// Callers guarantee equal lengths and no NaN entries.
pub(crate) fn dominates_normalized(a: &[f64], b: &[f64]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    let mut strictly_better = false;
    for (&av, &bv) in a.iter().zip(b) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}
