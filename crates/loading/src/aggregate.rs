// crate modules
use crate::audit::AuditTally;
use crate::binner::{Contribution, PointBinner};
use crate::config::NwlConfig;
use crate::counts::CountMatrix;
use crate::error::{Error, Result};
use crate::field::NwlField;
use crate::grid::BinGrid;
use crate::normalise::normalisation_factor;
use crate::report::{LogReporter, Reporter};

// nwl modules
use nwl_equilibrium::Equilibrium;
use nwl_flux::{FluxInverter, Minimizer};
use nwl_source::total_strength;
use nwl_utils::{OptionExt, ValueExt};

// external crates
use kdam::{par_tqdm, BarBuilder, BarExt};
use log::debug;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Counts and audit totals for part of a crossing dataset
type Partial = (CountMatrix, AuditTally);

/// Neutron wall loading from a crossing dataset
///
/// Convenience wrapper around [Aggregator] using the default [LogReporter].
///
/// ```rust
/// # use nwl_equilibrium::FourierEquilibrium;
/// # use nwl_flux::{Direct, FluxInverter};
/// # use nwl_loading::{aggregate, NwlConfig};
/// # use std::f64::consts::PI;
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// let direct = Direct::new();
///
/// let config = NwlConfig::builder()
///     .toroidal_extent(PI / 6.0)
///     .poloidal_extent(PI)
///     .wall_s(1.0)
///     .phi_bins(3)
///     .theta_bins(5)
///     .build()
///     .unwrap();
///
/// // A single crossing just above the outboard midplane
/// let inverter = FluxInverter::new(&torus, &direct, 1.0);
/// let points = vec![inverter.wall_point(0.3, PI / 12.0)];
///
/// let field = aggregate(&points, &[1.0, 1.0], &config, &torus, &direct).unwrap();
/// assert!(field.get(1, 2) > 0.0);
/// assert_eq!(field.counts.total(), 1.0);
/// ```
pub fn aggregate(
    points: &[Vector3<f64>],
    strengths: &[f64],
    config: &NwlConfig,
    equilibrium: &dyn Equilibrium,
    minimizer: &dyn Minimizer,
) -> Result<NwlField> {
    Aggregator::new(config, equilibrium, minimizer).run(points, strengths)
}

/// Bins crossings onto the wall and normalises counts to power
///
/// Each crossing is inverted to `(phi, theta)` on the wall surface, the
/// poloidal angle is shifted into the grid, and every cell within half a bin
/// width in both angles is incremented. The counts are then scaled by the
/// power carried by each crossing (see
/// [normalisation_factor()](crate::normalisation_factor)).
///
/// Note that the bin windows are inclusive, so a crossing exactly on the
/// boundary between neighbouring cells is counted in all of them. The sum of
/// counts is then larger than the number of crossings.
///
/// Per-crossing work is independent. With `parallel` set in the config the
/// crossings are folded into per-thread partial matrices on the rayon pool and
/// the partials summed, otherwise they are applied in order.
///
/// ```rust, no_run
/// # use nwl_equilibrium::FourierEquilibrium;
/// # use nwl_flux::Direct;
/// # use nwl_loading::{Aggregator, NullReporter, NwlConfig};
/// # use nwl_source::{read_crossings, read_strengths};
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// let direct = Direct::new();
/// let config = NwlConfig::from_json("nwl.json").unwrap();
///
/// let points = read_crossings("crossings.csv").unwrap();
/// let strengths = read_strengths("strengths.txt").unwrap();
///
/// let field = Aggregator::new(&config, &torus, &direct)
///     .with_reporter(&NullReporter)
///     .run(&points, &strengths)
///     .unwrap();
///
/// println!("{field}");
/// ```
#[derive(Clone, Copy)]
pub struct Aggregator<'a> {
    config: &'a NwlConfig,
    equilibrium: &'a dyn Equilibrium,
    minimizer: &'a dyn Minimizer,
    reporter: &'a dyn Reporter,
}

impl<'a> Aggregator<'a> {
    /// New aggregator reporting through the `log` facade
    pub fn new(
        config: &'a NwlConfig,
        equilibrium: &'a dyn Equilibrium,
        minimizer: &'a dyn Minimizer,
    ) -> Self {
        Self {
            config,
            equilibrium,
            minimizer,
            reporter: &LogReporter,
        }
    }

    /// Replace the reporter
    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &NwlConfig {
        self.config
    }

    /// Bin the crossings and normalise to power in MW
    ///
    /// Fails before doing any work if the configuration is invalid, the
    /// strength profile is empty or holds an invalid value, or there are no
    /// crossings.
    pub fn run(&self, points: &[Vector3<f64>], strengths: &[f64]) -> Result<NwlField> {
        self.config.validate()?;
        let grid = BinGrid::from_config(self.config)?;
        let total = total_strength(strengths)?;

        if points.is_empty() {
            return Err(Error::NoParticles);
        }

        self.reporter.started(points.len(), &grid);
        debug!(
            "Residual tolerance {} cm",
            self.config.residual_tolerance.display()
        );

        let inverter = FluxInverter::new(self.equilibrium, self.minimizer, self.config.wall_s)
            .with_length_scale(self.config.length_scale);
        let binner = PointBinner::new(inverter, &grid);

        let (counts, tally) = if self.config.parallel {
            self.bin_parallel(&binner, points)?
        } else {
            self.bin_sequential(&binner, points)?
        };

        let audit = tally.finish();
        self.reporter.finished(&audit);

        let factor = normalisation_factor(self.config.neutron_energy, total, points.len());
        debug!("Normalisation factor {} MW per crossing", factor.sci(4, 2));

        Ok(NwlField::new(grid, counts, factor, audit))
    }

    /// Fold crossings into per-thread partial matrices and sum them
    fn bin_parallel(
        &self,
        binner: &PointBinner,
        points: &[Vector3<f64>],
    ) -> Result<Partial> {
        let (phi_bins, theta_bins) = binner.grid().shape();
        let empty = || -> Result<Partial> {
            Ok((CountMatrix::zeros(phi_bins, theta_bins), AuditTally::default()))
        };

        let accumulate = |partial: Result<Partial>,
                          (index, point): (usize, &Vector3<f64>)|
         -> Result<Partial> {
            let (mut counts, mut tally) = partial?;
            let contribution = binner.bin(point)?;
            self.record(index, point, &contribution, &mut counts, &mut tally);
            Ok((counts, tally))
        };

        let combine = |a: Result<Partial>, b: Result<Partial>| -> Result<Partial> {
            let (counts_a, tally_a) = a?;
            let (counts_b, tally_b) = b?;
            Ok((counts_a.merge(counts_b), tally_a.merge(tally_b)))
        };

        let result = if self.config.progress {
            par_tqdm!(
                points.par_iter().enumerate(),
                desc = "Binning crossings",
                unit = " pts"
            )
            .fold(empty, accumulate)
            .reduce(empty, combine)
        } else {
            points
                .par_iter()
                .enumerate()
                .fold(empty, accumulate)
                .reduce(empty, combine)
        };

        if self.config.progress {
            eprintln!();
        }

        result
    }

    /// Apply crossings one at a time, in order
    fn bin_sequential(
        &self,
        binner: &PointBinner,
        points: &[Vector3<f64>],
    ) -> Result<Partial> {
        let (phi_bins, theta_bins) = binner.grid().shape();
        let mut counts = CountMatrix::zeros(phi_bins, theta_bins);
        let mut tally = AuditTally::default();

        let mut progress_bar = BarBuilder::default()
            .total(points.len())
            .desc("Binning crossings")
            .unit(" pts")
            .disable(!self.config.progress)
            .build()
            .map_err(Error::ProgressBar)?;

        for (index, point) in points.iter().enumerate() {
            let contribution = binner.bin(point)?;
            self.record(index, point, &contribution, &mut counts, &mut tally);
            progress_bar.update(1)?;
        }

        if self.config.progress {
            eprintln!();
        }

        Ok((counts, tally))
    }

    /// Merge one contribution and report anything unusual
    fn record(
        &self,
        index: usize,
        point: &Vector3<f64>,
        contribution: &Contribution,
        counts: &mut CountMatrix,
        tally: &mut AuditTally,
    ) {
        let residual = contribution.coordinate.residual;
        let poor = self
            .config
            .residual_tolerance
            .is_some_and(|tolerance| !(residual <= tolerance));

        if poor {
            self.reporter.poor_fit(index, point, residual);
        }

        if !contribution.is_binned() {
            self.reporter.unbinned(index, point, &contribution.coordinate);
        }

        counts.apply(&contribution.increments);
        tally.record(residual, poor, contribution.is_binned());
    }
}

impl std::fmt::Debug for Aggregator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("config", &self.config)
            .field("minimizer", &self.minimizer)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::FitAudit;
    use crate::report::NullReporter;
    use nwl_equilibrium::FourierEquilibrium;
    use nwl_flux::Direct;
    use std::f64::consts::PI;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(parallel: bool) -> NwlConfig {
        NwlConfig::builder()
            .toroidal_extent(PI / 6.0)
            .poloidal_extent(PI)
            .wall_s(1.0)
            .phi_bins(3)
            .theta_bins(5)
            .parallel(parallel)
            .residual_tolerance(1.0)
            .build()
            .unwrap()
    }

    #[derive(Default)]
    struct Counter {
        started: AtomicUsize,
        poor: AtomicUsize,
        unbinned: AtomicUsize,
        finished: AtomicUsize,
    }

    impl Reporter for Counter {
        fn started(&self, _points: usize, _grid: &BinGrid) {
            self.started.fetch_add(1, Ordering::Relaxed);
        }

        fn poor_fit(&self, _index: usize, _point: &Vector3<f64>, _residual: f64) {
            self.poor.fetch_add(1, Ordering::Relaxed);
        }

        fn unbinned(&self, _: usize, _: &Vector3<f64>, _: &nwl_flux::FluxCoordinate) {
            self.unbinned.fetch_add(1, Ordering::Relaxed);
        }

        fn finished(&self, _audit: &FitAudit) {
            self.finished.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn reporter_sees_poor_fits_and_unbinned_points() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let inverter = FluxInverter::new(&torus, &direct, 1.0);

        let points = vec![
            inverter.wall_point(0.2, 0.25),
            // 5 cm off the wall
            inverter.wall_point(0.2, 0.25) * 1.01,
            // toroidally outside the modelled sector
            inverter.wall_point(0.2, 1.0),
        ];

        for parallel in [true, false] {
            let counter = Counter::default();
            let field = Aggregator::new(&config(parallel), &torus, &direct)
                .with_reporter(&counter)
                .run(&points, &[1.0])
                .unwrap();

            assert_eq!(counter.started.load(Ordering::Relaxed), 1);
            assert_eq!(counter.finished.load(Ordering::Relaxed), 1);
            assert_eq!(counter.poor.load(Ordering::Relaxed), 1);
            assert_eq!(counter.unbinned.load(Ordering::Relaxed), 1);

            assert_eq!(field.audit.points, 3);
            assert_eq!(field.audit.poor_fits, 1);
            assert_eq!(field.audit.unbinned, 1);
            assert_eq!(field.audit.binned, 2);
            assert!(field.audit.max_residual > 4.0);
        }
    }

    #[test]
    fn empty_inputs_are_rejected_first() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let config = config(true);
        let aggregator = Aggregator::new(&config, &torus, &direct).with_reporter(&NullReporter);

        assert!(matches!(aggregator.run(&[], &[1.0]), Err(Error::NoParticles)));
        assert!(matches!(
            aggregator.run(&[Vector3::new(500.0, 0.0, 0.0)], &[]),
            Err(Error::SourceError(nwl_source::Error::EmptyStrengths))
        ));

        // strengths passed in directly are held to the file rules
        let points = [Vector3::new(500.0, 0.0, 0.0)];
        for strengths in [[1.0, -1.0], [f64::NAN, 1.0]] {
            assert!(matches!(
                aggregator.run(&points, &strengths),
                Err(Error::SourceError(nwl_source::Error::InvalidStrength { .. }))
            ));
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let torus = FourierEquilibrium::circular(5.0, 1.0);
        let direct = Direct::new();
        let mut config = config(false);
        config.theta_bins = 1;

        let result = aggregate(&[Vector3::new(500.0, 0.0, 0.0)], &[1.0], &config, &torus, &direct);
        assert!(matches!(result, Err(Error::TooFewBins { .. })));
    }
}
