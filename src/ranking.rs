//! Non-domination ranking with optional feasibility penalties.
//!
//! Rows are objective vectors in minimize space (see
//! [`normalize_matrix`](crate::dominance::normalize_matrix)). Ranking peels
//! successive Pareto fronts off the set: rank 0 is the Pareto front, rank 1
//! is the front of what remains, and so on.
//!
//! With a penalty vector, rows are split into three groups ranked
//! independently and then stacked in a fixed order:
//!
//! | Group | Penalty | Ranked by | Placed |
//! |---|---|---|---|
//! | feasible | `<= 0` | objectives | first |
//! | infeasible | `> 0` | the penalty alone | after every feasible rank |
//! | unknown | `None` or NaN | objectives | after every infeasible rank |
//!
//! # Example
//!
//! ```
//! use pareto_rank::ranking::rank;
//!
//! let values = vec![vec![1.0, 1.0], vec![0.0, 0.0], vec![5.0, 5.0]];
//!
//! let plain = rank(&values, None, None).unwrap();
//! assert_eq!(plain.ranks, vec![Some(1), Some(0), Some(2)]);
//!
//! // Row 1 is the best by objectives but violates its constraint.
//! let penalty = [Some(-1.0), Some(2.0), None];
//! let constrained = rank(&values, Some(&penalty), None).unwrap();
//! assert_eq!(constrained.ranks, vec![Some(0), Some(1), Some(2)]);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dominance::{dominates_normalized, missing_as_worst};
use crate::error::{Error, Result, ShapeKind};

/// Dense pairwise dominance relation over a set of rows.
///
/// Building it costs O(n² · k) time and O(n²) space for `n` rows of `k`
/// objectives.
#[derive(Clone, Debug)]
pub struct DominationMatrix {
    n: usize,
    /// Row-major; `cells[i * n + j]` is `true` iff row `i` dominates row `j`.
    cells: Vec<bool>,
}

impl DominationMatrix {
    /// Builds the matrix from minimize-space rows.
    ///
    /// NaN entries are treated as `+inf`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if rows differ in width.
    pub fn new(rows: &[Vec<f64>]) -> Result<Self> {
        check_widths(rows)?;
        let rows: Vec<Vec<f64>> = rows
            .iter()
            .map(|r| r.iter().map(|&v| missing_as_worst(v)).collect())
            .collect();
        let n = rows.len();
        let mut cells = vec![false; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                if dominates_normalized(&rows[i], &rows[j]) {
                    cells[i * n + j] = true;
                } else if dominates_normalized(&rows[j], &rows[i]) {
                    cells[j * n + i] = true;
                }
            }
        }
        Ok(Self { n, cells })
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Returns `true` if the matrix has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns whether row `i` dominates row `j`, or `None` if either index
    /// is out of range.
    #[must_use]
    pub fn dominates(&self, i: usize, j: usize) -> Option<bool> {
        (i < self.n && j < self.n).then(|| self.cells[i * self.n + j])
    }

    /// For each row, the number of rows that dominate it.
    #[must_use]
    pub fn dominated_counts(&self) -> Vec<usize> {
        (0..self.n)
            .map(|j| (0..self.n).filter(|&i| self.cells[i * self.n + j]).count())
            .collect()
    }

    /// For each row, the rows it dominates, in ascending order.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        (0..self.n)
            .map(|i| {
                let row = &self.cells[i * self.n..(i + 1) * self.n];
                row.iter()
                    .enumerate()
                    .filter_map(|(j, &d)| d.then_some(j))
                    .collect()
            })
            .collect()
    }
}

/// Result of a ranking call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankResult {
    /// One entry per input row. `None` marks a row left unranked because
    /// the search stopped early.
    pub ranks: Vec<Option<usize>>,
    /// The highest rank assigned, or `None` if nothing was ranked.
    pub max_rank: Option<usize>,
}

impl RankResult {
    /// Number of input rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    /// Returns `true` if there were no input rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Number of rows that received a rank.
    #[must_use]
    pub fn ranked_count(&self) -> usize {
        self.ranks.iter().flatten().count()
    }

    /// Groups row indices by rank: `fronts()[r]` lists the rows of rank `r`
    /// in ascending order. Unranked rows are omitted.
    ///
    /// With penalties, a partition that stopped early can leave a rank
    /// empty, so inner vectors may be empty.
    #[must_use]
    pub fn fronts(&self) -> Vec<Vec<usize>> {
        let Some(max_rank) = self.max_rank else {
            return Vec::new();
        };
        let mut fronts = vec![Vec::new(); max_rank + 1];
        for (row, rank) in self.ranks.iter().enumerate() {
            if let Some(r) = rank {
                fronts[*r].push(row);
            }
        }
        fronts
    }
}

/// Ranking configuration.
///
/// ```
/// use pareto_rank::ranking::NonDominatedSorter;
///
/// let sorter = NonDominatedSorter::builder().n_below(1).build();
/// let values = vec![vec![0.0], vec![1.0], vec![2.0]];
/// let result = sorter.rank(&values).unwrap();
/// assert_eq!(result.ranks, vec![Some(0), None, None]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct NonDominatedSorter {
    n_below: Option<usize>,
}

impl NonDominatedSorter {
    /// Creates a sorter that ranks every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for configuring a `NonDominatedSorter`.
    #[must_use]
    pub fn builder() -> NonDominatedSorterBuilder {
        NonDominatedSorterBuilder::default()
    }

    /// The configured early-stop threshold.
    #[must_use]
    pub fn n_below(&self) -> Option<usize> {
        self.n_below
    }

    /// Ranks rows by objectives only. See [`nondomination_rank`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if rows differ in width.
    pub fn rank(&self, values: &[Vec<f64>]) -> Result<RankResult> {
        nondomination_rank(values, self.n_below)
    }

    /// Ranks rows with feasibility penalties. See [`constrained_rank`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if rows differ in width or
    /// `penalty.len() != values.len()`.
    pub fn rank_constrained(
        &self,
        values: &[Vec<f64>],
        penalty: &[Option<f64>],
    ) -> Result<RankResult> {
        constrained_rank(values, penalty, self.n_below)
    }
}

/// Builder for [`NonDominatedSorter`].
#[derive(Debug, Clone, Default)]
pub struct NonDominatedSorterBuilder {
    n_below: Option<usize>,
}

impl NonDominatedSorterBuilder {
    /// Stops once at least `n` rows are ranked. Default: rank all rows.
    /// Zero means rank all rows.
    #[must_use]
    pub fn n_below(mut self, n: usize) -> Self {
        self.n_below = Some(n);
        self
    }

    /// Builds the configured [`NonDominatedSorter`].
    #[must_use]
    pub fn build(self) -> NonDominatedSorter {
        NonDominatedSorter {
            n_below: self.n_below,
        }
    }
}

/// Ranks rows by objectives, with or without penalties.
///
/// Dispatches to [`nondomination_rank`] when `penalty` is `None` and to
/// [`constrained_rank`] otherwise.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if rows differ in width or the penalty
/// length differs from the row count.
pub fn rank(
    values: &[Vec<f64>],
    penalty: Option<&[Option<f64>]>,
    n_below: Option<usize>,
) -> Result<RankResult> {
    match penalty {
        None => nondomination_rank(values, n_below),
        Some(p) => constrained_rank(values, p, n_below),
    }
}

/// Like [`rank`] but returns only the per-row ranks.
///
/// # Errors
///
/// Same as [`rank`].
pub fn fast_non_dominated_sort(
    values: &[Vec<f64>],
    penalty: Option<&[Option<f64>]>,
    n_below: Option<usize>,
) -> Result<Vec<Option<usize>>> {
    rank(values, penalty, n_below).map(|r| r.ranks)
}

/// Ranks minimize-space rows by iterative front peeling.
///
/// Peeling stops as soon as at least `n_below` rows hold a rank; the rest
/// stay `None`. `None`, zero, or a value above the row count ranks every
/// row. Rows with identical vectors always share a rank.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if rows differ in width.
pub fn nondomination_rank(values: &[Vec<f64>], n_below: Option<usize>) -> Result<RankResult> {
    let matrix = DominationMatrix::new(values)?;
    let n = matrix.len();
    if n == 0 {
        return Ok(RankResult::default());
    }

    let dominated = matrix.adjacency();
    // `None` once a row has been assigned to a front.
    let mut remaining: Vec<Option<usize>> =
        matrix.dominated_counts().into_iter().map(Some).collect();

    let target = n_below.filter(|&m| m > 0).unwrap_or(n).min(n);
    let mut ranks = vec![None; n];
    let mut max_rank = None;
    let mut ranked = 0;
    let mut rank = 0;

    while ranked < target {
        let front: Vec<usize> = (0..n).filter(|&i| remaining[i] == Some(0)).collect();
        if front.is_empty() {
            break;
        }

        for &i in &front {
            ranks[i] = Some(rank);
            remaining[i] = None;
        }
        for &i in &front {
            for &j in &dominated[i] {
                if let Some(count) = remaining[j].as_mut() {
                    *count -= 1;
                }
            }
        }

        ranked += front.len();
        max_rank = Some(rank);
        rank += 1;
    }

    trace_debug!(
        n_rows = n,
        n_ranked = ranked,
        n_fronts = rank,
        stopped_early = (ranked < n),
        "non-domination ranking done"
    );

    Ok(RankResult { ranks, max_rank })
}

/// Ranks rows with feasibility penalties.
///
/// Feasible rows (penalty `<= 0`) are ranked by objectives. Infeasible rows
/// (penalty `> 0`) are ranked by the penalty alone, lower first, and start
/// one past the highest feasible rank. Rows with an unknown penalty
/// (`None` or NaN) are ranked by objectives and start one past the highest
/// infeasible rank. Each group applies `n_below` on its own.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if rows differ in width or
/// `penalty.len() != values.len()`.
pub fn constrained_rank(
    values: &[Vec<f64>],
    penalty: &[Option<f64>],
    n_below: Option<usize>,
) -> Result<RankResult> {
    if penalty.len() != values.len() {
        return Err(Error::shape(
            ShapeKind::Penalty,
            values.len(),
            penalty.len(),
        ));
    }
    check_widths(values)?;

    let mut feasible = Vec::new();
    let mut infeasible = Vec::new();
    let mut unknown = Vec::new();
    for (row, p) in penalty.iter().enumerate() {
        match *p {
            Some(p) if p.is_nan() => unknown.push(row),
            Some(p) if p <= 0.0 => feasible.push(row),
            Some(_) => infeasible.push(row),
            None => unknown.push(row),
        }
    }
    trace_info!(
        feasible = feasible.len(),
        infeasible = infeasible.len(),
        unknown = unknown.len(),
        "partitioned rows by penalty"
    );

    let select = |rows: &[usize]| -> Vec<Vec<f64>> {
        rows.iter().map(|&r| values[r].clone()).collect()
    };
    let penalties: Vec<Vec<f64>> = infeasible
        .iter()
        .filter_map(|&r| penalty[r])
        .map(|p| vec![p])
        .collect();

    let feasible_ranks = nondomination_rank(&select(&feasible), n_below)?;
    let infeasible_ranks = nondomination_rank(&penalties, n_below)?;
    let unknown_ranks = nondomination_rank(&select(&unknown), n_below)?;

    let infeasible_offset = next_rank(feasible_ranks.max_rank);
    let unknown_offset = infeasible_offset + next_rank(infeasible_ranks.max_rank);

    let mut ranks = vec![None; values.len()];
    for (rows, local, offset) in [
        (&feasible, &feasible_ranks, 0),
        (&infeasible, &infeasible_ranks, infeasible_offset),
        (&unknown, &unknown_ranks, unknown_offset),
    ] {
        for (&row, r) in rows.iter().zip(&local.ranks) {
            ranks[row] = r.map(|r| r + offset);
        }
    }
    let max_rank = ranks.iter().flatten().max().copied();

    Ok(RankResult { ranks, max_rank })
}

/// First rank free after a group whose highest rank is `max_rank`.
fn next_rank(max_rank: Option<usize>) -> usize {
    max_rank.map_or(0, |r| r + 1)
}

fn check_widths(values: &[Vec<f64>]) -> Result<()> {
    let Some(first) = values.first() else {
        return Ok(());
    };
    let width = first.len();
    match values.iter().find(|row| row.len() != width) {
        Some(row) => Err(Error::shape(ShapeKind::Row, width, row.len())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_relation() {
        let rows = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![0.0, 3.0], vec![1.0, 1.0]];
        let m = DominationMatrix::new(&rows).unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(m.dominates(0, 1), Some(true));
        assert_eq!(m.dominates(1, 0), Some(false));
        assert_eq!(m.dominates(0, 2), Some(false));
        assert_eq!(m.dominates(0, 3), Some(false));
        assert_eq!(m.dominates(3, 0), Some(false));
        assert_eq!(m.dominates(0, 0), Some(false));
        assert_eq!(m.dominates(0, 4), None);
        assert_eq!(m.dominates(4, 0), None);
        assert_eq!(m.dominated_counts(), vec![0, 2, 0, 0]);
        assert_eq!(m.adjacency(), vec![vec![1], vec![], vec![], vec![1]]);
    }

    #[test]
    fn matrix_treats_nan_as_worst() {
        let rows = vec![vec![f64::NAN], vec![1.0]];
        let m = DominationMatrix::new(&rows).unwrap();
        assert_eq!(m.dominates(1, 0), Some(true));
        assert_eq!(m.dominates(0, 1), Some(false));
    }

    #[test]
    fn matrix_rejects_ragged_rows() {
        let err = DominationMatrix::new(&[vec![1.0], vec![2.0, 0.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                kind: ShapeKind::Row,
                expected: 1,
                got: 2
            }
        ));
        assert!(DominationMatrix::new(&[]).unwrap().is_empty());
    }

    #[test]
    fn rank_known_fronts() {
        let values = vec![
            vec![1.0, 5.0],
            vec![5.0, 1.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
            vec![6.0, 6.0],
        ];
        let result = nondomination_rank(&values, None).unwrap();
        assert_eq!(
            result.ranks,
            vec![Some(0), Some(0), Some(0), Some(1), Some(2)]
        );
        assert_eq!(result.max_rank, Some(2));
        assert_eq!(result.fronts(), vec![vec![0, 1, 2], vec![3], vec![4]]);
    }

    #[test]
    fn rank_empty() {
        let result = nondomination_rank(&[], None).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.max_rank, None);
        assert!(result.fronts().is_empty());
    }

    #[test]
    fn ties_share_a_front() {
        let values = vec![vec![2.0, 2.0], vec![1.0, 1.0], vec![2.0, 2.0]];
        let result = nondomination_rank(&values, None).unwrap();
        assert_eq!(result.ranks, vec![Some(1), Some(0), Some(1)]);
    }

    #[test]
    fn early_stop_leaves_rows_unranked() {
        let values = vec![vec![0.0], vec![1.0], vec![1.0], vec![2.0]];
        let result = nondomination_rank(&values, Some(2)).unwrap();
        assert_eq!(result.ranks, vec![Some(0), Some(1), Some(1), None]);
        assert_eq!(result.max_rank, Some(1));
        assert_eq!(result.ranked_count(), 3);
    }

    #[test]
    fn n_below_zero_or_oversized_ranks_everything() {
        let values = vec![vec![0.0], vec![1.0], vec![2.0]];
        let full = nondomination_rank(&values, None).unwrap();
        assert_eq!(nondomination_rank(&values, Some(0)).unwrap(), full);
        assert_eq!(nondomination_rank(&values, Some(100)).unwrap(), full);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let values = vec![vec![0.0, 1.0], vec![1.0]];
        let err = nondomination_rank(&values, None).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                kind: ShapeKind::Row,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn constrained_partitions_in_order() {
        let values = vec![vec![9.0, 9.0], vec![0.0, 0.0], vec![0.0, 0.0]];
        let result = constrained_rank(&values, &[Some(-1.0), Some(2.0), Some(f64::NAN)], None)
            .unwrap();
        assert_eq!(result.ranks, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(result.max_rank, Some(2));
    }

    #[test]
    fn infeasible_rows_ranked_by_penalty_only() {
        let values = vec![vec![0.0], vec![100.0], vec![50.0], vec![1.0]];
        let penalty = [Some(3.0), Some(1.0), Some(1.0), Some(0.0)];
        let result = constrained_rank(&values, &penalty, None).unwrap();
        // Row 3 is feasible; rows 1 and 2 tie on penalty; row 0 has the worst.
        assert_eq!(result.ranks, vec![Some(2), Some(1), Some(1), Some(0)]);
    }

    #[test]
    fn empty_partitions_do_not_leave_gaps() {
        let values = vec![vec![1.0], vec![0.0]];
        let result = constrained_rank(&values, &[None, None], None).unwrap();
        assert_eq!(result.ranks, vec![Some(1), Some(0)]);

        let result = constrained_rank(&values, &[Some(5.0), None], None).unwrap();
        assert_eq!(result.ranks, vec![Some(0), Some(1)]);
    }

    #[test]
    fn penalty_length_mismatch() {
        let values = vec![vec![1.0], vec![0.0]];
        let err = rank(&values, Some(&[Some(0.0)]), None).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                kind: ShapeKind::Penalty,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn sorter_builder_propagates_n_below() {
        let sorter = NonDominatedSorter::builder().n_below(1).build();
        assert_eq!(sorter.n_below(), Some(1));
        assert_eq!(NonDominatedSorter::new().n_below(), None);

        let values = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let penalty = [Some(0.0), Some(0.0), Some(1.0), Some(2.0)];
        let result = sorter.rank_constrained(&values, &penalty).unwrap();
        assert_eq!(result.ranks, vec![Some(0), None, Some(1), None]);
    }

    #[test]
    fn fast_sort_returns_ranks_only() {
        let values = vec![vec![1.0], vec![0.0]];
        assert_eq!(
            fast_non_dominated_sort(&values, None, None).unwrap(),
            vec![Some(1), Some(0)]
        );
    }
}
