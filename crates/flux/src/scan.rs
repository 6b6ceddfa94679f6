//! Brute-force scan with golden-section refinement

// crate modules
use crate::error::{Error, Result};
use crate::minimizer::{sanitise, Minimizer, Minimum};

// nwl modules
use nwl_utils::linspace;

/// Inverse of the golden ratio
const INV_PHI: f64 = 0.618_033_988_749_894_9;

/// Uniform scan followed by golden-section refinement
///
/// The objective is sampled at `samples` evenly spaced points including both
/// bounds. The bracket around the best sample is then narrowed by
/// golden-section search until it is smaller than `xtol`.
///
/// This is global only up to the scan resolution: a minimum narrower than the
/// sample spacing can be missed. It is cheap and predictable, which makes it a
/// useful cross-check for [Direct](crate::Direct).
///
/// ```rust
/// # use nwl_flux::{Minimizer, ScanRefine};
/// let scan = ScanRefine::new(32, 1e-9).unwrap();
/// let minimum = scan.minimize(&|x: f64| x.cos(), 0.0, 6.0);
/// assert!((minimum.x - std::f64::consts::PI).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRefine {
    /// Number of points in the initial scan
    pub samples: usize,
    /// Width of the final bracket
    pub xtol: f64,
}

impl ScanRefine {
    /// Validated scan resolution and tolerance
    pub fn new(samples: usize, xtol: f64) -> Result<Self> {
        if samples < 3 {
            return Err(Error::InvalidParameter {
                name: "samples",
                value: samples as f64,
            });
        }

        if !(xtol.is_finite() && xtol > 0.0) {
            return Err(Error::InvalidParameter {
                name: "xtol",
                value: xtol,
            });
        }

        Ok(Self { samples, xtol })
    }
}

impl Default for ScanRefine {
    fn default() -> Self {
        Self {
            samples: 64,
            xtol: 1e-10,
        }
    }
}

impl Minimizer for ScanRefine {
    fn minimize(&self, objective: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Minimum {
        let evaluate = |x: f64| sanitise(objective(x));

        let grid = linspace(lower, upper, self.samples.max(3));
        let values: Vec<f64> = grid.iter().map(|&x| evaluate(x)).collect();
        let mut evaluations = values.len();

        let (index, &value) = values
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .unwrap_or((0, &f64::INFINITY));

        let mut best = Minimum {
            x: grid[index],
            value,
            evaluations,
        };

        // bracket either side of the best sample
        let mut a = grid[index.saturating_sub(1)];
        let mut b = grid[(index + 1).min(grid.len() - 1)];

        let mut c = b - INV_PHI * (b - a);
        let mut d = a + INV_PHI * (b - a);
        let mut fc = evaluate(c);
        let mut fd = evaluate(d);
        evaluations += 2;

        while (b - a).abs() > self.xtol {
            if fc < fd {
                b = d;
                d = c;
                fd = fc;
                c = b - INV_PHI * (b - a);
                fc = evaluate(c);
            } else {
                a = c;
                c = d;
                fc = fd;
                d = a + INV_PHI * (b - a);
                fd = evaluate(d);
            }
            evaluations += 1;
        }

        let (x, value) = if fc < fd { (c, fc) } else { (d, fd) };
        if value < best.value {
            best.x = x;
            best.value = value;
        }
        best.evaluations = evaluations;
        best
    }
}
