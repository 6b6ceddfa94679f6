// external crates
use nalgebra::Vector3;

/// Forward map from flux coordinates to Cartesian space
///
/// Implementors map a flux-surface label `s`, poloidal angle `theta`, and
/// toroidal angle `phi` (radians) to an `(x, y, z)` position in their own
/// native length unit. The map must be a pure function of its arguments
/// because it is evaluated concurrently for many crossing points.
///
/// Closures implement the trait directly:
///
/// ```rust
/// # use nwl_equilibrium::Equilibrium;
/// # use nalgebra::Vector3;
/// // Circular tokamak, R0 = 5 m, a = 1 m at s = 1
/// let torus = |s: f64, theta: f64, phi: f64| {
///     let r = 5.0 + s.sqrt() * theta.cos();
///     Vector3::new(r * phi.cos(), r * phi.sin(), s.sqrt() * theta.sin())
/// };
///
/// let outboard = torus.to_cartesian(1.0, 0.0, 0.0);
/// assert_eq!(outboard, Vector3::new(6.0, 0.0, 0.0));
/// ```
pub trait Equilibrium: Sync {
    /// Cartesian position of `(s, theta, phi)` in native length units
    fn to_cartesian(&self, s: f64, theta: f64, phi: f64) -> Vector3<f64>;
}

impl<F> Equilibrium for F
where
    F: Fn(f64, f64, f64) -> Vector3<f64> + Sync,
{
    fn to_cartesian(&self, s: f64, theta: f64, phi: f64) -> Vector3<f64> {
        self(s, theta, phi)
    }
}
