// standard library
use std::fmt;

// crate modules
use crate::audit::FitAudit;
use crate::counts::CountMatrix;
use crate::error::{Error, Result};
use crate::grid::BinGrid;

// nwl modules
use nwl_utils::{SliceExt, ValueExt};

// external crates
use serde::{Deserialize, Serialize};

/// Neutron wall loading (MW) per `(phi, theta)` bin
///
/// Values are row-major in the same layout as the [CountMatrix] they came
/// from, `values[i * theta_bins + j]` for toroidal bin `i` and poloidal bin
/// `j`. Bin centres are in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NwlField {
    /// Bin grid the crossings were binned onto
    pub grid: BinGrid,
    /// Wall loading per bin (MW)
    pub values: Vec<f64>,
    /// Raw crossing counts per bin
    pub counts: CountMatrix,
    /// Power carried by a single crossing (MW)
    pub factor: f64,
    /// Quality of the flux coordinate inversions
    pub audit: FitAudit,
}

impl NwlField {
    /// Scale counts by the power per crossing
    pub fn new(grid: BinGrid, counts: CountMatrix, factor: f64, audit: FitAudit) -> Self {
        let values = counts.values().iter().map(|c| c * factor).collect();
        Self {
            grid,
            values,
            counts,
            factor,
            audit,
        }
    }

    /// Check that counts and values agree with the bin grid
    ///
    /// Always true for a field built by aggregation. Fields read back from
    /// file may have been edited or truncated.
    ///
    /// ```rust
    /// # use nwl_loading::{BinGrid, CountMatrix, FitAudit, NwlField};
    /// let grid = BinGrid::new(1.0, 2.0, 2, 3).unwrap();
    /// let mut field = NwlField::new(grid, CountMatrix::zeros(2, 3), 1.0, FitAudit::default());
    /// assert!(field.validate().is_ok());
    ///
    /// field.values.pop();
    /// assert!(field.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        for (name, count) in [
            ("toroidal bins", self.grid.phi.len()),
            ("poloidal bins", self.grid.theta.len()),
        ] {
            if count < 2 {
                return Err(Error::TooFewBins { name, count });
            }
        }

        let (phi_bins, theta_bins) = self.grid.shape();
        let expected = phi_bins * theta_bins;

        if self.counts.shape() != (phi_bins, theta_bins) {
            let (i, j) = self.counts.shape();
            return Err(Error::ShapeMismatch {
                name: "count matrix shape",
                expected,
                found: i * j,
            });
        }

        for (name, found) in [
            ("counts", self.counts.values().len()),
            ("values", self.values.len()),
        ] {
            if found != expected {
                return Err(Error::ShapeMismatch {
                    name,
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }

    /// Toroidal bin centres (rad)
    pub fn phi(&self) -> &[f64] {
        &self.grid.phi
    }

    /// Poloidal bin centres (rad)
    pub fn theta(&self) -> &[f64] {
        &self.grid.theta
    }

    /// Number of (toroidal, poloidal) bins
    pub fn shape(&self) -> (usize, usize) {
        self.counts.shape()
    }

    /// Wall loading in bin `(i, j)` (MW)
    ///
    /// Panics if the bin is outside the field.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        let (phi_bins, theta_bins) = self.shape();
        assert!(i < phi_bins && j < theta_bins, "bin ({i}, {j}) outside field");
        self.values[i * theta_bins + j]
    }

    /// Smallest value in the field
    pub fn min(&self) -> f64 {
        self.values.try_min().unwrap_or(0.0)
    }

    /// Largest value in the field
    pub fn max(&self) -> f64 {
        self.values.try_max().unwrap_or(0.0)
    }

    /// Total power over every bin (MW)
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Values transposed to poloidal-major rows, `rows[j][i]`
    ///
    /// This is the layout contouring tools expect, with the poloidal angle
    /// along the vertical axis.
    pub fn theta_major(&self) -> Vec<Vec<f64>> {
        let (phi_bins, theta_bins) = self.shape();
        (0..theta_bins)
            .map(|j| (0..phi_bins).map(|i| self.values[i * theta_bins + j]).collect())
            .collect()
    }
}

impl fmt::Display for NwlField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (phi_bins, theta_bins) = self.shape();
        writeln!(f, "Neutron wall loading")?;
        writeln!(f, " - bins          : {phi_bins} x {theta_bins}")?;
        writeln!(
            f,
            " - toroidal      : {:.2} to {:.2} deg",
            self.grid.phi[0].to_degrees(),
            self.grid.phi[phi_bins - 1].to_degrees()
        )?;
        writeln!(
            f,
            " - poloidal      : {:.2} to {:.2} deg",
            self.grid.theta[0].to_degrees(),
            self.grid.theta[theta_bins - 1].to_degrees()
        )?;
        writeln!(f, " - per crossing  : {} MW", self.factor.sci(4, 2))?;
        writeln!(f, " - max           : {} MW", self.max().sci(4, 2))?;
        writeln!(f, " - total         : {} MW", self.total().sci(4, 2))?;
        write!(f, "{}", self.audit)
    }
}
