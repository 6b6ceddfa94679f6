// standard library
use std::f64::consts::TAU;

// crate modules
use crate::direct::Direct;
use crate::minimizer::Minimizer;

// nwl modules
use nwl_equilibrium::Equilibrium;
use nwl_utils::fold_angle;

// external crates
use log::trace;
use nalgebra::Vector3;

/// Conversion from equilibrium metres to crossing centimetres
pub const M_TO_CM: f64 = 100.0;

/// Result of a poloidal angle search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Poloidal angle in `[0, 2π)`
    pub theta: f64,
    /// Distance from the point to the surface at `theta` (crossing units)
    pub residual: f64,
    /// Objective evaluations used by the minimiser
    pub evaluations: usize,
}

/// Flux coordinates of a single crossing point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxCoordinate {
    /// Toroidal angle in `(-π, π]`, exactly `atan2(y, x)`
    pub phi: f64,
    /// Poloidal angle in `[0, 2π)`
    pub theta: f64,
    /// Distance between the point and the recovered surface point
    pub residual: f64,
}

/// Inverts Cartesian points to `(phi, theta)` on a fixed flux surface
///
/// Borrows the equilibrium and minimiser, so a single inverter can be shared
/// freely between threads. Nothing is cached and every call is independent.
///
/// The equilibrium is evaluated in its own length unit and multiplied by the
/// `length_scale` (default [M_TO_CM]) to match the crossing points.
///
/// ```rust
/// # use nwl_equilibrium::FourierEquilibrium;
/// # use nwl_flux::{Direct, FluxInverter};
/// # use nalgebra::Vector3;
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// let direct = Direct::new();
/// let inverter = FluxInverter::new(&torus, &direct, 1.0);
///
/// // Top of the circular cross-section, in cm
/// let coordinate = inverter.flux_coords(&Vector3::new(500.0, 0.0, 100.0));
/// assert_eq!(coordinate.phi, 0.0);
/// assert!((coordinate.theta - std::f64::consts::FRAC_PI_2).abs() < 1e-4);
/// ```
#[derive(Clone, Copy)]
pub struct FluxInverter<'a> {
    equilibrium: &'a dyn Equilibrium,
    minimizer: &'a dyn Minimizer,
    wall_s: f64,
    length_scale: f64,
}

impl<'a> FluxInverter<'a> {
    /// Inverter for the surface `wall_s` with the default length scale
    pub fn new(
        equilibrium: &'a dyn Equilibrium,
        minimizer: &'a dyn Minimizer,
        wall_s: f64,
    ) -> Self {
        Self {
            equilibrium,
            minimizer,
            wall_s,
            length_scale: M_TO_CM,
        }
    }

    /// Set the factor from equilibrium units to crossing units
    pub fn with_length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    /// Flux surface label of the wall
    pub fn wall_s(&self) -> f64 {
        self.wall_s
    }

    /// Factor from equilibrium units to crossing units
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Point on the wall surface in crossing units
    pub fn wall_point(&self, theta: f64, phi: f64) -> Vector3<f64> {
        self.equilibrium.to_cartesian(self.wall_s, theta, phi) * self.length_scale
    }

    /// Euclidean distance from `point` to the wall at `(theta, phi)`
    pub fn distance(&self, theta: f64, phi: f64, point: &Vector3<f64>) -> f64 {
        (point - self.wall_point(theta, phi)).norm()
    }

    /// Poloidal angle of the wall point closest to `point` at fixed `phi`
    ///
    /// The search covers the full `[0, 2π]` interval. The returned angle is
    /// folded into `[0, 2π)`. A large residual is not an error, it is up to
    /// the caller to decide what counts as a poor fit.
    pub fn find_theta(&self, phi: f64, point: &Vector3<f64>) -> Fit {
        let objective = |theta: f64| self.distance(theta, phi, point);
        let minimum = self.minimizer.minimize(&objective, 0.0, TAU);

        Fit {
            theta: fold_angle(minimum.x),
            residual: minimum.value,
            evaluations: minimum.evaluations,
        }
    }

    /// Full `(phi, theta)` inversion of a crossing point
    pub fn flux_coords(&self, point: &Vector3<f64>) -> FluxCoordinate {
        let phi = point.y.atan2(point.x);
        let fit = self.find_theta(phi, point);

        trace!(
            "({:.3}, {:.3}, {:.3}) -> phi={:.6} theta={:.6} residual={:.3e}",
            point.x,
            point.y,
            point.z,
            phi,
            fit.theta,
            fit.residual
        );

        FluxCoordinate {
            phi,
            theta: fit.theta,
            residual: fit.residual,
        }
    }
}

impl std::fmt::Debug for FluxInverter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FluxInverter")
            .field("minimizer", &self.minimizer)
            .field("wall_s", &self.wall_s)
            .field("length_scale", &self.length_scale)
            .finish_non_exhaustive()
    }
}

/// Convenience inversion with the default [Direct] minimiser
///
/// Equivalent to building a [FluxInverter] with default settings for a single
/// point. Prefer a reused [FluxInverter] for many points.
///
/// ```rust
/// # use nwl_equilibrium::FourierEquilibrium;
/// # use nalgebra::Vector3;
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// let coordinate = nwl_flux::flux_coords(&torus, 1.0, &Vector3::new(0.0, 600.0, 0.0));
/// assert!((coordinate.phi - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// assert!(coordinate.theta < 1e-4 || coordinate.theta > 2.0 * std::f64::consts::PI - 1e-4);
/// ```
pub fn flux_coords(
    equilibrium: &dyn Equilibrium,
    wall_s: f64,
    point: &Vector3<f64>,
) -> FluxCoordinate {
    let minimizer = Direct::default();
    FluxInverter::new(equilibrium, &minimizer, wall_s).flux_coords(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScanRefine;
    use nwl_equilibrium::FourierEquilibrium;
    use nwl_utils::angular_distance;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn distance_is_zero_on_the_wall() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);

        let point = inverter.wall_point(0.4, 0.2);
        assert!(inverter.distance(0.4, 0.2, &point) < 1e-12);
        assert!((inverter.distance(0.4 + PI, 0.2, &point) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn length_scale_applies_to_the_surface() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0).with_length_scale(1.0);

        assert_eq!(inverter.length_scale(), 1.0);
        assert_eq!(inverter.wall_s(), 1.0);

        let fit = inverter.find_theta(0.0, &Vector3::new(4.0, 0.0, 0.0));
        assert!(angular_distance(fit.theta, PI) < 1e-4, "{fit:?}");
        assert!(fit.residual < 1e-4);
    }

    #[test]
    fn phi_is_exact() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);

        let point = Vector3::new(-300.0, -400.0, 20.0);
        let coordinate = inverter.flux_coords(&point);
        assert_eq!(coordinate.phi, (-400.0_f64).atan2(-300.0));
    }

    #[test]
    fn theta_folded_into_range() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let scan = ScanRefine::default();
        let inverter = FluxInverter::new(&torus, &scan, 1.0);

        // just below the outboard midplane, theta close to 2π
        let point = inverter.wall_point(-0.03, 0.0);
        let fit = inverter.find_theta(0.0, &point);
        assert!((0.0..TAU).contains(&fit.theta));
        assert!(angular_distance(fit.theta, -0.03) < 1e-6, "{fit:?}");
    }

    #[test]
    fn off_surface_points_report_residual() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);

        // 10 cm above the top of the wall
        let fit = inverter.find_theta(0.0, &Vector3::new(500.0, 0.0, 110.0));
        assert!(angular_distance(fit.theta, FRAC_PI_2) < 1e-4);
        assert!((fit.residual - 10.0).abs() < 1e-3, "{fit:?}");
        assert!(fit.evaluations > 0);
    }

    #[test]
    fn closures_are_equilibria() {
        // plain cylinder-like surface without the Fourier machinery
        let surface = |s: f64, theta: f64, phi: f64| {
            let r = 3.0 + s.sqrt() * theta.cos();
            Vector3::new(r * phi.cos(), r * phi.sin(), s.sqrt() * theta.sin())
        };

        let point = Vector3::new(300.0, 0.0, -100.0);
        let coordinate = flux_coords(&surface, 1.0, &point);
        assert!(angular_distance(coordinate.theta, 1.5 * PI) < 1e-4);
    }
}
