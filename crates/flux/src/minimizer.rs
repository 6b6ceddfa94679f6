/// Best point found by a [Minimizer]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimum {
    /// Argument of the lowest objective value found
    pub x: f64,
    /// Objective value at `x`
    pub value: f64,
    /// Number of objective evaluations used
    pub evaluations: usize,
}

/// Bounded, derivative-free, one-dimensional global minimisation
///
/// Implementors search `[lower, upper]` for the argument of the smallest
/// objective value using function values only. The returned [Minimum] is the
/// best point *found*; there is no failure case, a poor minimum is still
/// returned.
///
/// `NaN` objective values must never be reported as the minimum.
///
/// ```rust
/// # use nwl_flux::{Direct, Minimizer};
/// let minimizer = Direct::new();
/// let minimum = minimizer.minimize(&|x: f64| (x - 1.0).powi(2), 0.0, 4.0);
/// assert!((minimum.x - 1.0).abs() < 1e-4);
/// ```
pub trait Minimizer: Send + Sync + std::fmt::Debug {
    /// Minimise `objective` over `[lower, upper]`
    fn minimize(&self, objective: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Minimum;
}

/// Treat undefined objective values as infinitely bad
pub(crate) fn sanitise(value: f64) -> f64 {
    if value.is_nan() {
        f64::INFINITY
    } else {
        value
    }
}
