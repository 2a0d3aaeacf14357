//! Dense distance matrix between two point sets

use alloc::vec::Vec;

/// Row-major matrix of distances; rows are sources, columns are targets
///
/// Cells may be NaN when one of the coordinates was invalid. Consumers
/// must treat NaN as "infinitely far".
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from row-major data
    ///
    /// Returns `None` if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols)? != data.len() {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Number of sources
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of targets
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True if either dimension is zero
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distance between source `row` and target `col`
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col).copied()
    }

    /// All distances from source `row`
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.cols;
        self.data.get(start..start + self.cols)
    }

    /// Iterate over `(row, col, distance)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .map(move |(index, distance)| (index / cols, index % cols, *distance))
    }
}

/// Build the distance matrix between `sources` and `targets`
///
/// Cell `(i, j)` is `distance(&get_source(&sources[i]), &get_target(&targets[j]))`.
/// Coordinates are extracted once per element.
pub fn build_distance_matrix<S, T, P, GS, GT, D>(
    sources: &[S],
    targets: &[T],
    get_source: GS,
    get_target: GT,
    distance: D,
) -> DistanceMatrix
where
    GS: Fn(&S) -> P,
    GT: Fn(&T) -> P,
    D: Fn(&P, &P) -> f64,
{
    let target_points: Vec<P> = targets.iter().map(&get_target).collect();
    let mut data = Vec::with_capacity(sources.len() * targets.len());

    for source in sources {
        let source_point = get_source(source);
        for target_point in &target_points {
            data.push(distance(&source_point, target_point));
        }
    }

    DistanceMatrix {
        rows: sources.len(),
        cols: targets.len(),
        data,
    }
}
