//! Observers for the progress and quality of an aggregation

// crate modules
use crate::audit::FitAudit;
use crate::grid::BinGrid;

// nwl modules
use nwl_flux::FluxCoordinate;
use nwl_utils::ValueExt;

// external crates
use log::{debug, info, warn};
use nalgebra::Vector3;

/// Hooks called during aggregation
///
/// All hooks default to doing nothing, so implementors only override what
/// they care about. Hooks for individual crossings may be called from several
/// threads at once and in any order.
///
/// ```rust
/// # use nwl_loading::{FitAudit, Reporter};
/// # use std::sync::atomic::{AtomicUsize, Ordering};
/// # use nalgebra::Vector3;
/// /// Count poor fits without logging anything
/// #[derive(Default)]
/// struct PoorFitCounter(AtomicUsize);
///
/// impl Reporter for PoorFitCounter {
///     fn poor_fit(&self, _index: usize, _point: &Vector3<f64>, _residual: f64) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait Reporter: Sync {
    /// Aggregation of `points` crossings onto `grid` is about to start
    fn started(&self, points: usize, grid: &BinGrid) {
        let _ = (points, grid);
    }

    /// Crossing `index` was inverted with a residual above tolerance
    fn poor_fit(&self, index: usize, point: &Vector3<f64>, residual: f64) {
        let _ = (index, point, residual);
    }

    /// Crossing `index` landed outside every bin
    fn unbinned(&self, index: usize, point: &Vector3<f64>, coordinate: &FluxCoordinate) {
        let _ = (index, point, coordinate);
    }

    /// Aggregation is complete
    fn finished(&self, audit: &FitAudit) {
        let _ = audit;
    }
}

/// Forward everything to the `log` facade
///
/// Nothing is printed unless the application has installed a logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn started(&self, points: usize, grid: &BinGrid) {
        let (phi_bins, theta_bins) = grid.shape();
        info!("Binning {points} crossings onto a {phi_bins}x{theta_bins} grid");
    }

    fn poor_fit(&self, index: usize, point: &Vector3<f64>, residual: f64) {
        warn!(
            "Poor fit for crossing {index} at ({:.2}, {:.2}, {:.2}), residual {} cm",
            point.x,
            point.y,
            point.z,
            residual.sci(3, 2)
        );
    }

    fn unbinned(&self, index: usize, _point: &Vector3<f64>, coordinate: &FluxCoordinate) {
        debug!(
            "Crossing {index} outside the grid (phi={:.4}, theta={:.4})",
            coordinate.phi, coordinate.theta
        );
    }

    fn finished(&self, audit: &FitAudit) {
        info!(
            "Binned {}/{} crossings, mean residual {} cm",
            audit.binned,
            audit.points,
            audit.mean_residual.sci(3, 2)
        );

        if audit.poor_fits > 0 {
            warn!("{} of {} crossings were poor fits", audit.poor_fits, audit.points);
        }
    }
}

/// Discard everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}
