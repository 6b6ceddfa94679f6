//! Conversion from crossing counts to power

/// Electron-volts to joules
pub const EV_TO_J: f64 = 1.60218e-19;

/// Joules to megajoules
pub const J_TO_MJ: f64 = 1e-6;

/// Power (MW) carried by a single crossing
///
/// Every source particle stands for an equal share of the total source
/// strength (n/s), each carrying `neutron_energy` (eV):
///
/// ```text
/// factor = neutron_energy * EV_TO_J * total_strength * J_TO_MJ / particles
/// ```
///
/// ```rust
/// # use nwl_loading::normalisation_factor;
/// let factor = normalisation_factor(14.1e6, 2.0, 1);
/// assert!((factor - 4.518e-18).abs() < 1e-21);
/// ```
///
/// The particle count must be non-zero, which aggregation guarantees before
/// getting here.
pub fn normalisation_factor(neutron_energy: f64, total_strength: f64, particles: usize) -> f64 {
    neutron_energy * EV_TO_J * total_strength * J_TO_MJ / particles as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_in_strength() {
        let a = normalisation_factor(14.1e6, 1e17, 1000);
        let b = normalisation_factor(14.1e6, 3e17, 1000);
        assert!((b / a - 3.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_in_particles() {
        let a = normalisation_factor(2.45e6, 5e16, 10);
        let b = normalisation_factor(2.45e6, 5e16, 40);
        assert!((a / b - 4.0).abs() < 1e-12);
    }
}
