// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// nwl modules
use nwl_flux::M_TO_CM;
use nwl_utils::OptionExt;

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// Default number of bins in either angle
pub const DEFAULT_BINS: usize = 101;

/// Fusion neutron energy (eV)
pub const DEFAULT_NEUTRON_ENERGY: f64 = 14.1e6;

/// Everything that controls a wall-loading calculation
///
/// The fields are public for direct use, but [NwlConfig::builder()] is the
/// recommended way to create one since [build()](NwlConfigBuilder::build)
/// validates the values.
///
/// | Option               | Default | Meaning                                       |
/// | -------------------- | ------- | --------------------------------------------- |
/// | `toroidal_extent`    | -       | toroidal extent of the model (rad)            |
/// | `poloidal_extent`    | -       | poloidal extent of the model (rad)            |
/// | `wall_s`             | -       | flux surface label of the first wall          |
/// | `phi_bins`           | 101     | number of toroidal bin centres                |
/// | `theta_bins`         | 101     | number of poloidal bin centres                |
/// | `length_scale`       | 100     | equilibrium length unit to cm                 |
/// | `neutron_energy`     | 14.1e6  | source neutron energy (eV)                    |
/// | `residual_tolerance` | none    | fits above this distance (cm) are poor fits   |
/// | `parallel`           | true    | bin crossings on the rayon thread pool        |
/// | `progress`           | false   | show a progress bar on stderr                 |
///
/// May also be loaded from JSON with [NwlConfig::from_json()], where any of
/// the optional values may be left out.
///
/// ```json
/// {
///     "toroidal_extent": 1.5707963,
///     "poloidal_extent": 6.2831853,
///     "wall_s": 1.08,
///     "phi_bins": 61
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NwlConfig {
    /// Toroidal extent of the model (rad)
    pub toroidal_extent: f64,
    /// Poloidal extent of the model (rad)
    pub poloidal_extent: f64,
    /// Flux surface label of the first wall
    pub wall_s: f64,
    /// Number of toroidal bin centres
    #[serde(default = "default_bins")]
    pub phi_bins: usize,
    /// Number of poloidal bin centres
    #[serde(default = "default_bins")]
    pub theta_bins: usize,
    /// Factor from equilibrium length units to crossing units (cm)
    #[serde(default = "default_length_scale")]
    pub length_scale: f64,
    /// Source neutron energy (eV)
    #[serde(default = "default_neutron_energy")]
    pub neutron_energy: f64,
    /// Residual distance (cm) above which an inversion is a poor fit
    #[serde(default)]
    pub residual_tolerance: Option<f64>,
    /// Bin crossings in parallel
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Show a progress bar
    #[serde(default)]
    pub progress: bool,
}

fn default_bins() -> usize {
    DEFAULT_BINS
}

fn default_length_scale() -> f64 {
    M_TO_CM
}

fn default_neutron_energy() -> f64 {
    DEFAULT_NEUTRON_ENERGY
}

fn default_true() -> bool {
    true
}

impl NwlConfig {
    /// Get an instance of the [NwlConfigBuilder]
    pub fn builder() -> NwlConfigBuilder {
        NwlConfigBuilder::default()
    }

    /// Read and validate a configuration from a JSON file
    ///
    /// ```rust, no_run
    /// # use nwl_loading::NwlConfig;
    /// let config = NwlConfig::from_json("nwl.json").unwrap();
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is usable
    ///
    /// Called by the builder and the JSON reader. Worth calling again after
    /// modifying the fields directly.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("toroidal extent", self.toroidal_extent),
            ("poloidal extent", self.poloidal_extent),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidExtent { name, value });
            }
        }

        for (name, count) in [
            ("toroidal bins", self.phi_bins),
            ("poloidal bins", self.theta_bins),
        ] {
            if count < 2 {
                return Err(Error::TooFewBins { name, count });
            }
        }

        if !self.wall_s.is_finite() {
            return Err(Error::InvalidParameter {
                name: "wall_s",
                value: self.wall_s,
            });
        }

        for (name, value) in [
            ("length_scale", self.length_scale),
            ("neutron_energy", self.neutron_energy),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParameter { name, value });
            }
        }

        if let Some(value) = self.residual_tolerance.filter(|t| t.is_nan() || *t < 0.0) {
            return Err(Error::InvalidParameter {
                name: "residual_tolerance",
                value,
            });
        }

        debug!(
            "Config: extents ({:.4}, {:.4}) rad, {}x{} bins, wall_s={}, tolerance={}",
            self.toroidal_extent,
            self.poloidal_extent,
            self.phi_bins,
            self.theta_bins,
            self.wall_s,
            self.residual_tolerance.display()
        );

        Ok(())
    }
}

/// Builder implementation for [NwlConfig]
///
/// The extents and wall surface label have no sensible defaults and must be
/// set. Everything else falls back to the defaults listed on [NwlConfig].
///
/// ```rust
/// # use nwl_loading::NwlConfig;
/// let config = NwlConfig::builder()
///     .toroidal_extent_degrees(90.0)
///     .poloidal_extent_degrees(360.0)
///     .wall_s(1.08)
///     .phi_bins(61)
///     .residual_tolerance(0.5)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.theta_bins, 101);
/// assert!((config.toroidal_extent - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
///
/// // a required value is missing
/// assert!(NwlConfig::builder().wall_s(1.0).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NwlConfigBuilder {
    toroidal_extent: Option<f64>,
    poloidal_extent: Option<f64>,
    wall_s: Option<f64>,
    phi_bins: usize,
    theta_bins: usize,
    length_scale: f64,
    neutron_energy: f64,
    residual_tolerance: Option<f64>,
    parallel: bool,
    progress: bool,
}

impl Default for NwlConfigBuilder {
    fn default() -> Self {
        Self {
            toroidal_extent: None,
            poloidal_extent: None,
            wall_s: None,
            phi_bins: DEFAULT_BINS,
            theta_bins: DEFAULT_BINS,
            length_scale: M_TO_CM,
            neutron_energy: DEFAULT_NEUTRON_ENERGY,
            residual_tolerance: None,
            parallel: true,
            progress: false,
        }
    }
}

impl NwlConfigBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and build the [NwlConfig]
    pub fn build(self) -> Result<NwlConfig> {
        let config = NwlConfig {
            toroidal_extent: self
                .toroidal_extent
                .ok_or(Error::MissingParameter("toroidal_extent"))?,
            poloidal_extent: self
                .poloidal_extent
                .ok_or(Error::MissingParameter("poloidal_extent"))?,
            wall_s: self.wall_s.ok_or(Error::MissingParameter("wall_s"))?,
            phi_bins: self.phi_bins,
            theta_bins: self.theta_bins,
            length_scale: self.length_scale,
            neutron_energy: self.neutron_energy,
            residual_tolerance: self.residual_tolerance,
            parallel: self.parallel,
            progress: self.progress,
        };

        config.validate()?;
        Ok(config)
    }

    /// Toroidal extent of the model (rad)
    pub fn toroidal_extent(mut self, radians: f64) -> Self {
        self.toroidal_extent = Some(radians);
        self
    }

    /// Toroidal extent of the model (degrees)
    pub fn toroidal_extent_degrees(self, degrees: f64) -> Self {
        self.toroidal_extent(degrees.to_radians())
    }

    /// Poloidal extent of the model (rad)
    pub fn poloidal_extent(mut self, radians: f64) -> Self {
        self.poloidal_extent = Some(radians);
        self
    }

    /// Poloidal extent of the model (degrees)
    pub fn poloidal_extent_degrees(self, degrees: f64) -> Self {
        self.poloidal_extent(degrees.to_radians())
    }

    /// Flux surface label of the first wall
    ///
    /// Usually a little above 1, i.e. an extrapolation of the last closed flux
    /// surface out to the wall.
    pub fn wall_s(mut self, wall_s: f64) -> Self {
        self.wall_s = Some(wall_s);
        self
    }

    /// Number of toroidal bin centres, at least 2
    pub fn phi_bins(mut self, count: usize) -> Self {
        self.phi_bins = count;
        self
    }

    /// Number of poloidal bin centres, at least 2
    pub fn theta_bins(mut self, count: usize) -> Self {
        self.theta_bins = count;
        self
    }

    /// Factor from equilibrium length units to cm
    pub fn length_scale(mut self, length_scale: f64) -> Self {
        self.length_scale = length_scale;
        self
    }

    /// Source neutron energy (eV)
    pub fn neutron_energy(mut self, energy: f64) -> Self {
        self.neutron_energy = energy;
        self
    }

    /// Flag inversions with a residual above `tolerance` (cm) as poor fits
    pub fn residual_tolerance(mut self, tolerance: f64) -> Self {
        self.residual_tolerance = Some(tolerance);
        self
    }

    /// Bin crossings on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Show a progress bar while binning
    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}
