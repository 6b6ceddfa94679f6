// crate modules
use crate::equilibrium::Equilibrium;
use crate::error::{Error, Result};

// external crates
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Flux surfaces described by a truncated Fourier series
///
/// The boundary (`s = 1`) is given by stellarator-symmetric modes
///
/// ```text
/// R_b(theta, phi) = sum rmnc cos(m theta - n nfp phi)
/// Z_b(theta, phi) = sum zmns sin(m theta - n nfp phi)
/// ```
///
/// and the magnetic axis (`s = 0`) by
///
/// ```text
/// R_a(phi) = sum raxis cos(n nfp phi)
/// Z_a(phi) = sum zaxis sin(n nfp phi)
/// ```
///
/// Every other surface is a linear blend in `rho = sqrt(s)`:
///
/// ```text
/// R = R_a + rho (R_b - R_a)
/// Z = Z_a + rho (Z_b - Z_a)
/// ```
///
/// Labels above 1 extrapolate past the last closed flux surface. Negative
/// labels are treated as the axis.
///
/// If no axis modes are given the `m = 0` boundary modes are used instead,
/// which is exact for up-down symmetric tokamak-like shapes.
///
/// ```rust
/// # use nwl_equilibrium::{Equilibrium, FourierEquilibrium};
/// // Circular cross-section, R0 = 5 m and a = 1 m
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
///
/// // Top of the s = 1 surface at phi = 0
/// let top = torus.to_cartesian(1.0, std::f64::consts::FRAC_PI_2, 0.0);
/// assert!((top.x - 5.0).abs() < 1e-12);
/// assert!((top.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourierEquilibrium {
    /// Number of field periods
    #[serde(default = "default_nfp")]
    pub nfp: u32,
    /// Modes of the last closed flux surface
    pub boundary: Vec<FourierMode>,
    /// Modes of the magnetic axis, optional
    #[serde(default)]
    pub axis: Vec<AxisMode>,
}

fn default_nfp() -> u32 {
    1
}

/// A single `(m, n)` boundary mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourierMode {
    /// Poloidal mode number
    pub m: i32,
    /// Toroidal mode number, in units of field periods
    pub n: i32,
    /// Cosine amplitude of R (m)
    pub rmnc: f64,
    /// Sine amplitude of Z (m)
    #[serde(default)]
    pub zmns: f64,
}

/// A single toroidal mode of the magnetic axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisMode {
    /// Toroidal mode number, in units of field periods
    pub n: i32,
    /// Cosine amplitude of R (m)
    pub raxis: f64,
    /// Sine amplitude of Z (m)
    #[serde(default)]
    pub zaxis: f64,
}

impl FourierEquilibrium {
    /// Create a validated equilibrium from its modes
    pub fn new(nfp: u32, boundary: Vec<FourierMode>, axis: Vec<AxisMode>) -> Result<Self> {
        let equilibrium = Self {
            nfp,
            boundary,
            axis,
        };
        equilibrium.validate()?;
        Ok(equilibrium)
    }

    /// Axisymmetric torus with a circular cross-section
    ///
    /// Surfaces are concentric circles of radius `sqrt(s) * minor`.
    pub fn circular(major: f64, minor: f64) -> Self {
        Self::elliptical(major, minor, 1.0)
    }

    /// Axisymmetric torus with an elliptical cross-section
    ///
    /// The vertical semi-axis of the `s = 1` surface is `elongation * minor`.
    pub fn elliptical(major: f64, minor: f64, elongation: f64) -> Self {
        Self {
            nfp: 1,
            boundary: vec![
                FourierMode {
                    m: 0,
                    n: 0,
                    rmnc: major,
                    zmns: 0.0,
                },
                FourierMode {
                    m: 1,
                    n: 0,
                    rmnc: minor,
                    zmns: elongation * minor,
                },
            ],
            axis: Vec::new(),
        }
    }

    /// Check the modes describe something usable
    pub fn validate(&self) -> Result<()> {
        if self.nfp == 0 {
            return Err(Error::InvalidFieldPeriods(self.nfp));
        }

        if self.boundary.is_empty() {
            return Err(Error::NoBoundaryModes);
        }

        if let Some(mode) = self
            .boundary
            .iter()
            .find(|mode| !(mode.rmnc.is_finite() && mode.zmns.is_finite()))
        {
            return Err(Error::NonFiniteCoefficient {
                m: mode.m,
                n: mode.n,
            });
        }

        if let Some(mode) = self
            .axis
            .iter()
            .find(|mode| !(mode.raxis.is_finite() && mode.zaxis.is_finite()))
        {
            return Err(Error::NonFiniteCoefficient { m: 0, n: mode.n });
        }

        debug!(
            "Equilibrium with {} boundary modes, {} axis modes, nfp={}",
            self.boundary.len(),
            self.axis.len(),
            self.nfp
        );

        Ok(())
    }

    /// (R, Z) of the last closed flux surface
    pub fn boundary_rz(&self, theta: f64, phi: f64) -> (f64, f64) {
        let nfp = self.nfp as f64;
        self.boundary.iter().fold((0.0, 0.0), |(r, z), mode| {
            let angle = mode.m as f64 * theta - mode.n as f64 * nfp * phi;
            (r + mode.rmnc * angle.cos(), z + mode.zmns * angle.sin())
        })
    }

    /// (R, Z) of the magnetic axis
    pub fn axis_rz(&self, phi: f64) -> (f64, f64) {
        let nfp = self.nfp as f64;

        if self.axis.is_empty() {
            // the theta-independent part of the boundary
            return self
                .boundary
                .iter()
                .filter(|mode| mode.m == 0)
                .fold((0.0, 0.0), |(r, z), mode| {
                    let angle = -(mode.n as f64) * nfp * phi;
                    (r + mode.rmnc * angle.cos(), z + mode.zmns * angle.sin())
                });
        }

        self.axis.iter().fold((0.0, 0.0), |(r, z), mode| {
            let angle = mode.n as f64 * nfp * phi;
            (r + mode.raxis * angle.cos(), z + mode.zaxis * angle.sin())
        })
    }

    /// (R, Z) of any flux surface
    pub fn rz(&self, s: f64, theta: f64, phi: f64) -> (f64, f64) {
        let rho = s.max(0.0).sqrt();
        let (r_axis, z_axis) = self.axis_rz(phi);
        let (r_bound, z_bound) = self.boundary_rz(theta, phi);
        (
            r_axis + rho * (r_bound - r_axis),
            z_axis + rho * (z_bound - z_axis),
        )
    }
}

impl Equilibrium for FourierEquilibrium {
    fn to_cartesian(&self, s: f64, theta: f64, phi: f64) -> Vector3<f64> {
        let (r, z) = self.rz(s, theta, phi);
        Vector3::new(r * phi.cos(), r * phi.sin(), z)
    }
}
