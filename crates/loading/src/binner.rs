// crate modules
use crate::error::Result;
use crate::grid::BinGrid;

// nwl modules
use nwl_flux::{FluxCoordinate, FluxInverter};

// external crates
use nalgebra::Vector3;

/// Everything a single crossing adds to the count matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    /// Cells to increment by one
    pub increments: Vec<(usize, usize)>,
    /// Flux coordinates of the crossing, before any shift into the grid
    pub coordinate: FluxCoordinate,
}

impl Contribution {
    /// True if the crossing landed in at least one bin
    pub fn is_binned(&self) -> bool {
        !self.increments.is_empty()
    }
}

/// Maps one crossing to its cell increments
///
/// This is a pure function of the crossing, so any number of crossings can be
/// binned concurrently with the same binner. Merging the increments into a
/// [CountMatrix](crate::CountMatrix) is left to the caller.
///
/// ```rust
/// # use nwl_equilibrium::FourierEquilibrium;
/// # use nwl_flux::{Direct, FluxInverter};
/// # use nwl_loading::{BinGrid, PointBinner};
/// # use nalgebra::Vector3;
/// # use std::f64::consts::PI;
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// let direct = Direct::new();
/// let inverter = FluxInverter::new(&torus, &direct, 1.0);
/// let grid = BinGrid::new(PI / 6.0, PI, 3, 5).unwrap();
///
/// // Just above the outboard midplane at phi = π/12
/// let point = inverter.wall_point(0.3, PI / 12.0);
/// let contribution = PointBinner::new(inverter, &grid).bin(&point).unwrap();
/// assert_eq!(contribution.increments, vec![(1, 2)]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PointBinner<'a> {
    inverter: FluxInverter<'a>,
    grid: &'a BinGrid,
}

impl<'a> PointBinner<'a> {
    /// Bin crossings onto `grid` using `inverter` for the flux coordinates
    pub fn new(inverter: FluxInverter<'a>, grid: &'a BinGrid) -> Self {
        Self { inverter, grid }
    }

    /// The grid crossings are binned onto
    pub fn grid(&self) -> &BinGrid {
        self.grid
    }

    /// Invert a crossing and find every cell whose window holds it
    ///
    /// The poloidal angle is shifted down by the poloidal extent when above
    /// the upper edge of the grid, then every cell within half a bin width in
    /// both angles is incremented.
    pub fn bin(&self, point: &Vector3<f64>) -> Result<Contribution> {
        let coordinate = self.inverter.flux_coords(point);
        let theta = self.grid.shift_theta(coordinate.theta);

        Ok(Contribution {
            increments: self.grid.cells(coordinate.phi, theta)?,
            coordinate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nwl_equilibrium::FourierEquilibrium;
    use nwl_flux::Direct;
    use std::f64::consts::PI;

    #[test]
    fn far_side_is_unbinned() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);
        let grid = BinGrid::new(PI / 6.0, PI / 2.0, 3, 5).unwrap();
        let binner = PointBinner::new(inverter, &grid);

        // inboard midplane, theta = π is outside a ±π/4 poloidal sector
        let contribution = binner.bin(&inverter.wall_point(PI, 0.1)).unwrap();
        assert!(!contribution.is_binned());
        assert!((contribution.coordinate.theta - PI).abs() < 1e-4);
    }

    #[test]
    fn outboard_midplane_stays_in_the_grid() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);
        let grid = BinGrid::new(PI / 6.0, PI, 3, 5).unwrap();
        let binner = PointBinner::new(inverter, &grid);

        // theta = 0 is also 2π, which would wrap to π if taken from the top
        let contribution = binner.bin(&inverter.wall_point(0.0, PI / 12.0)).unwrap();
        assert_eq!(contribution.increments, vec![(1, 2)]);
    }

    #[test]
    fn wrapped_angles_are_binned_low() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);
        let grid = BinGrid::new(PI / 6.0, PI, 3, 5).unwrap();
        let binner = PointBinner::new(inverter, &grid);

        // just below the outboard midplane, theta close to 2π shifts to ~π
        // which is still above the grid
        let contribution = binner.bin(&inverter.wall_point(-0.01, 0.1)).unwrap();
        assert!(!contribution.is_binned());

        // just above the top edge of the poloidal sector wraps to the bottom
        let contribution = binner.bin(&inverter.wall_point(PI / 2.0 + 0.05, 0.1)).unwrap();
        assert_eq!(contribution.increments, vec![(0, 0)]);
    }
}
