//! Threshold-bounded greedy matching on a distance matrix
//!
//! The solver repeatedly picks the globally smallest remaining distance,
//! emits the pair and removes its row and column, until nothing at or below
//! the threshold is left.
//!
//! This is deliberately not a minimum total cost matching. An optimal solver
//! can respond to a single outlier by proposing a large set of simultaneous
//! reassignments; leaving that one drone unmatched is the better outcome for
//! the operator.

use super::matrix::DistanceMatrix;
use crate::types::{EngineError, Result};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use log::debug;
use serde::{Deserialize, Serialize};

/// Matching algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentAlgorithm {
    /// Repeated global minimum selection under a threshold
    Greedy,
    /// Minimum-cost matching; recognised but not implemented
    Hungarian,
}

impl AssignmentAlgorithm {
    /// Tag used in configuration files and UI state
    pub const fn tag(&self) -> &'static str {
        match self {
            AssignmentAlgorithm::Greedy => "greedy",
            AssignmentAlgorithm::Hungarian => "hungarian",
        }
    }
}

impl fmt::Display for AssignmentAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AssignmentAlgorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "greedy" => Ok(AssignmentAlgorithm::Greedy),
            "hungarian" => Ok(AssignmentAlgorithm::Hungarian),
            _ => Err(EngineError::UnsupportedAlgorithm),
        }
    }
}

/// Find `(source, target)` index pairs in `matrix`
///
/// Guarantees for the returned pairs:
/// - every row index and every column index appears at most once
/// - every pair's distance is at most `threshold`
/// - pairs come in selection order (ascending distance); equal distances
///   are resolved in row-major order
///
/// NaN cells and a NaN threshold never produce a pair.
pub fn find_assignment(
    matrix: &DistanceMatrix,
    threshold: f64,
    algorithm: AssignmentAlgorithm,
) -> Result<Vec<(usize, usize)>> {
    match algorithm {
        AssignmentAlgorithm::Greedy => Ok(greedy_assignment(matrix, threshold)),
        AssignmentAlgorithm::Hungarian => Err(EngineError::UnsupportedAlgorithm),
    }
}

fn greedy_assignment(matrix: &DistanceMatrix, threshold: f64) -> Vec<(usize, usize)> {
    // `d <= threshold` is false for NaN on either side
    let mut candidates: Vec<(usize, usize, f64)> = matrix
        .cells()
        .filter(|(_, _, distance)| *distance <= threshold)
        .collect();

    // Stable sort keeps row-major order among equal distances, so taking
    // candidates front to back is the same as repeatedly scanning for the
    // first global minimum.
    candidates.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

    let mut row_used = alloc::vec![false; matrix.rows()];
    let mut col_used = alloc::vec![false; matrix.cols()];
    let max_pairs = matrix.rows().min(matrix.cols());
    let mut pairs = Vec::with_capacity(max_pairs);

    for (row, col, _) in candidates {
        if pairs.len() == max_pairs {
            break;
        }
        if row_used[row] || col_used[col] {
            continue;
        }
        row_used[row] = true;
        col_used[col] = true;
        pairs.push((row, col));
    }

    debug!(
        "Greedy matching on {}x{} matrix produced {} pairs (threshold {})",
        matrix.rows(),
        matrix.cols(),
        pairs.len(),
        threshold
    );

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> DistanceMatrix {
        DistanceMatrix::from_row_major(rows, cols, data).unwrap()
    }

    #[test]
    fn test_picks_global_minimum_first() {
        // Row 0 prefers col 0 (2.0), but row 1 is closer to col 0 (1.0)
        let m = matrix(2, 2, vec![2.0, 3.0, 1.0, 10.0]);
        let pairs = find_assignment(&m, 5.0, AssignmentAlgorithm::Greedy).unwrap();
        assert_eq!(pairs, vec![(1, 0), (0, 1)]);
    }

    #[test]
    fn test_does_not_trade_one_outlier_for_global_optimum() {
        // An optimal matcher would pick (0,1),(1,0) for a total of 4.0
        // instead of 1.0 + 10.0; greedy keeps (0,0) and leaves row 1
        // unmatched under the threshold.
        let m = matrix(2, 2, vec![1.0, 2.0, 2.0, 10.0]);
        let pairs = find_assignment(&m, 5.0, AssignmentAlgorithm::Greedy).unwrap();
        assert_eq!(pairs, vec![(0, 0)]);
    }

    #[test]
    fn test_ties_broken_row_major() {
        let m = matrix(2, 2, vec![1.0, 1.0, 1.0, 1.0]);
        let pairs = find_assignment(&m, 5.0, AssignmentAlgorithm::Greedy).unwrap();
        assert_eq!(pairs, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_nan_is_never_selected() {
        let m = matrix(1, 2, vec![f64::NAN, 4.0]);
        let pairs = find_assignment(&m, 5.0, AssignmentAlgorithm::Greedy).unwrap();
        assert_eq!(pairs, vec![(0, 1)]);

        let pairs = find_assignment(&m, f64::NAN, AssignmentAlgorithm::Greedy).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = matrix(1, 1, vec![5.0]);
        assert_eq!(
            find_assignment(&m, 5.0, AssignmentAlgorithm::Greedy).unwrap(),
            vec![(0, 0)]
        );
    }

    #[test]
    fn test_hungarian_rejected() {
        let m = matrix(1, 1, vec![1.0]);
        assert_eq!(
            find_assignment(&m, 5.0, AssignmentAlgorithm::Hungarian),
            Err(EngineError::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_algorithm_tags() {
        assert_eq!("greedy".parse::<AssignmentAlgorithm>(), Ok(AssignmentAlgorithm::Greedy));
        assert_eq!("hungarian".parse::<AssignmentAlgorithm>(), Ok(AssignmentAlgorithm::Hungarian));
        assert_eq!(
            "optimal".parse::<AssignmentAlgorithm>(),
            Err(EngineError::UnsupportedAlgorithm)
        );
        assert_eq!(AssignmentAlgorithm::Greedy.to_string(), "greedy");
    }
}
