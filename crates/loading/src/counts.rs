// external crates
use serde::{Deserialize, Serialize};

/// Crossing counts per `(phi, theta)` cell
///
/// Stored row-major with the toroidal index varying slowest, so that the
/// value of cell `(i, j)` lives at `i * theta_bins + j`.
///
/// ```rust
/// # use nwl_loading::CountMatrix;
/// let mut counts = CountMatrix::zeros(2, 3);
/// counts.increment(1, 2);
/// counts.increment(1, 2);
/// assert_eq!(counts.get(1, 2), 2.0);
/// assert_eq!(counts.total(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountMatrix {
    phi_bins: usize,
    theta_bins: usize,
    values: Vec<f64>,
}

impl CountMatrix {
    /// All-zero matrix of the given shape
    pub fn zeros(phi_bins: usize, theta_bins: usize) -> Self {
        Self {
            phi_bins,
            theta_bins,
            values: vec![0.0; phi_bins * theta_bins],
        }
    }

    /// Number of (toroidal, poloidal) bins
    pub fn shape(&self) -> (usize, usize) {
        (self.phi_bins, self.theta_bins)
    }

    /// Count in cell `(i, j)`
    ///
    /// Panics if the cell is outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[self.index(i, j)]
    }

    /// Add a single crossing to cell `(i, j)`
    pub fn increment(&mut self, i: usize, j: usize) {
        let index = self.index(i, j);
        self.values[index] += 1.0;
    }

    /// Add one to every listed cell
    pub fn apply(&mut self, cells: &[(usize, usize)]) {
        for &(i, j) in cells {
            self.increment(i, j);
        }
    }

    /// Element-wise sum of two partial matrices of the same shape
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.shape(), other.shape());
        for (a, b) in self.values.iter_mut().zip(other.values) {
            *a += b;
        }
        self
    }

    /// Sum over every cell
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Row-major view of the counts
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn index(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.phi_bins && j < self.theta_bins,
            "cell ({i}, {j}) outside {}x{} matrix",
            self.phi_bins,
            self.theta_bins
        );
        i * self.theta_bins + j
    }
}
