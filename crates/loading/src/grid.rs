// crate modules
use crate::config::NwlConfig;
use crate::error::{Error, Result};

// nwl modules
use nwl_utils::{linspace, SliceExt};

// external crates
use itertools::iproduct;
use serde::{Deserialize, Serialize};

/// Angular bin centres over the modelled sector of the wall
///
/// Toroidal centres are uniform over `[0, toroidal_extent]` and poloidal
/// centres uniform over `[-poloidal_extent/2, +poloidal_extent/2]`, both
/// including the end points. Each centre owns a window of one half-width
/// either side.
///
/// Membership is inclusive on both sides of the window. A crossing landing
/// exactly on the boundary between two neighbouring windows is counted in
/// both, and so is a crossing exactly on an outer edge of the grid.
///
/// ```rust
/// # use nwl_loading::BinGrid;
/// # use std::f64::consts::PI;
/// let grid = BinGrid::new(PI / 2.0, PI, 3, 5).unwrap();
/// assert_eq!(grid.shape(), (3, 5));
/// assert_eq!(grid.phi[1], PI / 4.0);
/// assert_eq!(grid.theta[0], -PI / 2.0);
/// assert_eq!(grid.half_theta, PI / 8.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinGrid {
    /// Toroidal bin centres (rad)
    pub phi: Vec<f64>,
    /// Poloidal bin centres (rad)
    pub theta: Vec<f64>,
    /// Half-width of every toroidal window (rad)
    pub half_phi: f64,
    /// Half-width of every poloidal window (rad)
    pub half_theta: f64,
    /// Poloidal extent used to shift angles into the grid (rad)
    pub poloidal_extent: f64,
}

impl BinGrid {
    /// Uniform grid over the given extents
    pub fn new(
        toroidal_extent: f64,
        poloidal_extent: f64,
        phi_bins: usize,
        theta_bins: usize,
    ) -> Result<Self> {
        for (name, value) in [
            ("toroidal extent", toroidal_extent),
            ("poloidal extent", poloidal_extent),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidExtent { name, value });
            }
        }

        for (name, count) in [("toroidal bins", phi_bins), ("poloidal bins", theta_bins)] {
            if count < 2 {
                return Err(Error::TooFewBins { name, count });
            }
        }

        Ok(Self {
            phi: linspace(0.0, toroidal_extent, phi_bins),
            theta: linspace(-poloidal_extent / 2.0, poloidal_extent / 2.0, theta_bins),
            half_phi: toroidal_extent / (phi_bins - 1) as f64 / 2.0,
            half_theta: poloidal_extent / (theta_bins - 1) as f64 / 2.0,
            poloidal_extent,
        })
    }

    /// Grid described by a configuration
    pub fn from_config(config: &NwlConfig) -> Result<Self> {
        Self::new(
            config.toroidal_extent,
            config.poloidal_extent,
            config.phi_bins,
            config.theta_bins,
        )
    }

    /// Number of (toroidal, poloidal) bins
    pub fn shape(&self) -> (usize, usize) {
        (self.phi.len(), self.theta.len())
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.phi.len() * self.theta.len()
    }

    /// Always false for a validated grid
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shift a poloidal angle in `[0, 2π)` towards the grid
    ///
    /// Angles above the upper edge of the grid have the poloidal extent
    /// subtracted. Nothing is added to angles below the lower edge, only the
    /// upper side wraps.
    ///
    /// ```rust
    /// # use nwl_loading::BinGrid;
    /// # use std::f64::consts::PI;
    /// let grid = BinGrid::new(1.0, PI, 2, 5).unwrap();
    /// assert_eq!(grid.shift_theta(0.25), 0.25);
    /// assert_eq!(grid.shift_theta(PI), 0.0);
    /// ```
    pub fn shift_theta(&self, theta: f64) -> f64 {
        if theta > self.poloidal_extent / 2.0 {
            theta - self.poloidal_extent
        } else {
            theta
        }
    }

    /// Toroidal bins whose window holds `phi`
    pub fn phi_bins(&self, phi: f64) -> Result<Vec<usize>> {
        Ok(self.phi.find_window(phi, self.half_phi)?)
    }

    /// Poloidal bins whose window holds an already shifted `theta`
    pub fn theta_bins(&self, theta: f64) -> Result<Vec<usize>> {
        Ok(self.theta.find_window(theta, self.half_theta)?)
    }

    /// Every `(i, j)` cell whose windows hold `(phi, theta)`
    ///
    /// The poloidal angle is expected to be shifted already, see
    /// [shift_theta()](BinGrid::shift_theta).
    ///
    /// ```rust
    /// # use nwl_loading::BinGrid;
    /// # use std::f64::consts::PI;
    /// let grid = BinGrid::new(PI / 6.0, PI, 3, 5).unwrap();
    ///
    /// // centre of a single cell
    /// assert_eq!(grid.cells(PI / 12.0, 0.0).unwrap(), vec![(1, 2)]);
    ///
    /// // toroidally outside the modelled sector
    /// assert!(grid.cells(-1.0, 0.0).unwrap().is_empty());
    /// ```
    pub fn cells(&self, phi: f64, theta: f64) -> Result<Vec<(usize, usize)>> {
        let rows = self.phi_bins(phi)?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let columns = self.theta_bins(theta)?;
        Ok(iproduct!(rows, columns).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn centres_and_half_widths() {
        let grid = BinGrid::new(PI / 6.0, PI, 4, 4).unwrap();
        assert_eq!(grid.phi[0], 0.0);
        assert_eq!(grid.phi[3], PI / 6.0);
        assert_eq!(grid.theta[0], -PI / 2.0);
        assert_eq!(grid.theta[3], PI / 2.0);
        assert!((grid.half_phi - PI / 36.0).abs() < 1e-15);
        assert!((grid.half_theta - PI / 6.0).abs() < 1e-15);
        assert_eq!(grid.len(), 16);
        assert!(!grid.is_empty());
    }

    #[test]
    fn invalid_grids() {
        assert!(matches!(
            BinGrid::new(0.0, PI, 4, 4),
            Err(Error::InvalidExtent { .. })
        ));
        assert!(matches!(
            BinGrid::new(1.0, PI, 4, 1),
            Err(Error::TooFewBins { name: "poloidal bins", count: 1 })
        ));
    }

    #[test]
    fn only_the_upper_side_wraps() {
        let grid = BinGrid::new(1.0, PI / 2.0, 2, 5).unwrap();

        // exactly on the edge stays
        assert_eq!(grid.shift_theta(PI / 4.0), PI / 4.0);

        // just past the edge lands near the lower edge
        let shifted = grid.shift_theta(PI / 4.0 + 1e-3);
        assert!((shifted - (-PI / 4.0 + 1e-3)).abs() < 1e-12);

        // the far side of the torus is still outside the grid after the shift
        let shifted = grid.shift_theta(PI);
        assert!(grid.theta_bins(shifted).unwrap().is_empty());
    }

    #[test]
    fn windows_are_inclusive() {
        let grid = BinGrid::new(1.0, 2.0, 3, 3).unwrap();

        // theta centres are -1, 0, 1 with half-width 0.5
        assert_eq!(grid.theta_bins(0.5).unwrap(), vec![1, 2]);
        assert_eq!(grid.theta_bins(-1.5).unwrap(), vec![0]);
        assert!(grid.theta_bins(-1.5001).unwrap().is_empty());
    }

    #[test]
    fn cells_are_the_product_of_windows() {
        let grid = BinGrid::new(1.0, 2.0, 3, 3).unwrap();
        // phi centres 0, 0.5, 1 with half-width 0.25
        let cells = grid.cells(0.25, 0.5).unwrap();
        assert_eq!(cells, vec![(0, 1), (0, 2), (1, 1), (1, 2)]);
    }
}
