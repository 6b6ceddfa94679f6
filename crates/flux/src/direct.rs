//! Locally biased DIviding RECTangles in one dimension

// standard library
use std::collections::BTreeMap;

// crate modules
use crate::error::{Error, Result};
use crate::minimizer::{sanitise, Minimizer, Minimum};

// external crates
use log::debug;

/// Locally biased DIRECT (DIRECT-L) global minimiser
///
/// The search interval is normalised to `[0, 1]` and repeatedly trisected.
/// Every iteration the "potentially optimal" intervals are divided: those on
/// the lower-right convex hull of (half-width, value) that could contain the
/// global minimum for *some* Lipschitz constant. Being locally biased, only
/// the best interval of each size is considered, which favours refinement
/// around the current best point.
///
/// No derivative information is needed and the objective does not have to be
/// convex or smooth, which is exactly the situation for point-to-surface
/// distances.
///
/// Defaults follow the usual reference values:
///
/// | Parameter         | Default | Meaning                                      |
/// | ----------------- | ------- | -------------------------------------------- |
/// | `eps`             | 1e-4    | minimum relative improvement for selection  |
/// | `max_evaluations` | 1000    | objective evaluation budget                  |
/// | `max_iterations`  | 1000    | iteration budget                             |
/// | `len_tol`         | 1e-6    | stop once the best half-width falls below    |
/// | `target`          | none    | stop once this objective value is reached    |
/// | `target_rtol`     | 1e-4    | relative tolerance on `target`               |
///
/// ```rust
/// # use nwl_flux::{Direct, Minimizer};
/// // Tighter budget and an early exit for a known minimum value of 0
/// let direct = Direct::builder()
///     .max_evaluations(400)
///     .target(0.0)
///     .build()
///     .unwrap();
///
/// let minimum = direct.minimize(&|x: f64| (x - 2.0).abs(), 0.0, 3.0);
/// assert!(minimum.evaluations <= 400);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Direct {
    /// Minimum relative improvement for an interval to be potentially optimal
    pub eps: f64,
    /// Maximum number of objective evaluations
    pub max_evaluations: usize,
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Normalised half-width of the best interval to stop at
    pub len_tol: f64,
    /// Known minimum objective value, if any
    pub target: Option<f64>,
    /// Relative tolerance for reaching `target`
    pub target_rtol: f64,
}

impl Direct {
    /// Start with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an instance of the [DirectBuilder]
    pub fn builder() -> DirectBuilder {
        DirectBuilder::default()
    }
}

impl Default for Direct {
    fn default() -> Self {
        Self {
            eps: 1e-4,
            max_evaluations: 1000,
            max_iterations: 1000,
            len_tol: 1e-6,
            target: None,
            target_rtol: 1e-4,
        }
    }
}

/// A trisected piece of the normalised search interval
#[derive(Debug, Clone, Copy)]
struct Interval {
    /// Centre in normalised coordinates
    centre: f64,
    /// Number of trisections, width is 3^-level
    level: i32,
    /// Objective at the centre
    value: f64,
}

impl Interval {
    fn half_width(&self) -> f64 {
        0.5 * 3f64.powi(-self.level)
    }
}

impl Minimizer for Direct {
    fn minimize(&self, objective: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Minimum {
        let span = upper - lower;
        let evaluate = |u: f64| sanitise(objective(lower + u * span));

        let mut intervals = vec![Interval {
            centre: 0.5,
            level: 0,
            value: evaluate(0.5),
        }];
        let mut evaluations = 1;
        let mut best = 0;

        for _ in 0..self.max_iterations {
            if self.is_converged(&intervals[best]) || evaluations + 2 > self.max_evaluations {
                break;
            }

            for index in self.potentially_optimal(&intervals, intervals[best].value) {
                if evaluations + 2 > self.max_evaluations {
                    break;
                }

                // trisect, the parent keeps the middle third
                let parent = intervals[index];
                let level = parent.level + 1;
                let offset = 3f64.powi(-level);
                for centre in [parent.centre - offset, parent.centre + offset] {
                    intervals.push(Interval {
                        centre,
                        level,
                        value: evaluate(centre),
                    });
                }
                intervals[index].level = level;
                evaluations += 2;
            }

            best = best_interval(&intervals);
        }

        let found = intervals[best];
        debug!(
            "DIRECT-L finished after {evaluations} evaluations (half-width {:.3e})",
            found.half_width()
        );

        Minimum {
            x: lower + found.centre * span,
            value: found.value,
            evaluations,
        }
    }
}

impl Direct {
    /// Termination on interval size or target value
    fn is_converged(&self, best: &Interval) -> bool {
        if best.half_width() < self.len_tol {
            return true;
        }

        match self.target {
            Some(target) => best.value - target <= self.target_rtol * target.abs().max(1.0),
            None => false,
        }
    }

    /// Indices of the intervals to divide this iteration
    fn potentially_optimal(&self, intervals: &[Interval], fmin: f64) -> Vec<usize> {
        // lowest value for every interval size, ties keep the oldest
        let mut by_level: BTreeMap<i32, usize> = BTreeMap::new();
        for (i, interval) in intervals.iter().enumerate() {
            by_level
                .entry(interval.level)
                .and_modify(|j| {
                    if interval.value < intervals[*j].value {
                        *j = i
                    }
                })
                .or_insert(i);
        }

        let candidates: Vec<usize> = by_level.into_values().collect();
        let threshold = fmin - self.eps * fmin.abs();

        candidates
            .iter()
            .copied()
            .filter(|&j| {
                let (dj, fj) = (intervals[j].half_width(), intervals[j].value);

                // admissible range of Lipschitz constants for this interval
                let mut k_low = 0.0_f64;
                let mut k_high = f64::INFINITY;
                for &i in &candidates {
                    let (di, fi) = (intervals[i].half_width(), intervals[i].value);
                    if di < dj {
                        k_low = k_low.max((fj - fi) / (dj - di));
                    } else if di > dj {
                        k_high = k_high.min((fi - fj) / (di - dj));
                    }
                }

                if k_low > k_high {
                    return false;
                }

                // the largest interval is always worth exploring
                k_high.is_infinite() || fj - k_high * dj <= threshold
            })
            .collect()
    }
}

/// Lowest value, preferring the smaller interval on ties
fn best_interval(intervals: &[Interval]) -> usize {
    let mut best = 0;
    for (i, interval) in intervals.iter().enumerate().skip(1) {
        let current = &intervals[best];
        if interval.value < current.value
            || (interval.value == current.value && interval.level > current.level)
        {
            best = i;
        }
    }
    best
}

/// Builder implementation for [Direct] configuration
///
/// Chain any number of setters and call [build()](DirectBuilder::build) to
/// validate the parameters.
///
/// ```rust
/// # use nwl_flux::Direct;
/// let direct = Direct::builder().len_tol(1e-8).build().unwrap();
/// assert_eq!(direct.len_tol, 1e-8);
///
/// // nonsense values are rejected
/// assert!(Direct::builder().eps(-1.0).build().is_err());
/// ```
#[derive(Debug, Default)]
pub struct DirectBuilder {
    direct: Direct,
}

impl DirectBuilder {
    /// Minimum relative improvement for selection
    pub fn eps(mut self, eps: f64) -> Self {
        self.direct.eps = eps;
        self
    }

    /// Objective evaluation budget
    pub fn max_evaluations(mut self, max_evaluations: usize) -> Self {
        self.direct.max_evaluations = max_evaluations;
        self
    }

    /// Iteration budget
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.direct.max_iterations = max_iterations;
        self
    }

    /// Normalised half-width of the best interval to stop at
    pub fn len_tol(mut self, len_tol: f64) -> Self {
        self.direct.len_tol = len_tol;
        self
    }

    /// Known minimum objective value for an early exit
    pub fn target(mut self, target: f64) -> Self {
        self.direct.target = Some(target);
        self
    }

    /// Relative tolerance on the target value
    pub fn target_rtol(mut self, target_rtol: f64) -> Self {
        self.direct.target_rtol = target_rtol;
        self
    }

    /// Validate and build the [Direct] minimiser
    pub fn build(self) -> Result<Direct> {
        let direct = self.direct;

        let checks = [
            ("eps", direct.eps),
            ("len_tol", direct.len_tol),
            ("target_rtol", direct.target_rtol),
        ];
        if let Some((name, value)) = checks
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(Error::InvalidParameter { name, value });
        }

        if direct.max_evaluations < 3 {
            return Err(Error::InvalidParameter {
                name: "max_evaluations",
                value: direct.max_evaluations as f64,
            });
        }

        if let Some(target) = direct.target.filter(|t| !t.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "target",
                value: target,
            });
        }

        Ok(direct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn finds_interior_minimum() {
        let minimum = Direct::new().minimize(&|x: f64| (x - 0.7).powi(2), -2.0, 3.0);
        assert!((minimum.x - 0.7).abs() < 1e-4, "{minimum:?}");
        assert!(minimum.value < 1e-8);
    }

    #[test]
    fn escapes_local_minimum() {
        // shallow local well near x = 1, deep global well near x = 5
        let f = |x: f64| -(-(x - 1.0).powi(2)).exp() - 2.0 * (-(x - 5.0).powi(2)).exp();
        let minimum = Direct::new().minimize(&f, 0.0, 6.0);
        assert!((minimum.x - 5.0).abs() < 0.05, "{minimum:?}");
    }

    #[test]
    fn minimum_on_the_bound() {
        let minimum = Direct::new().minimize(&|x: f64| x, 0.0, 1.0);
        assert!(minimum.x < 1e-5, "{minimum:?}");
    }

    #[test]
    fn respects_evaluation_budget() {
        let count = Cell::new(0);
        let f = |x: f64| {
            count.set(count.get() + 1);
            x.sin()
        };

        let direct = Direct::builder().max_evaluations(25).build().unwrap();
        let minimum = direct.minimize(&f, 0.0, 10.0);

        assert_eq!(count.get(), minimum.evaluations);
        assert!(minimum.evaluations <= 25);
    }

    #[test]
    fn target_stops_early() {
        let f = |x: f64| (x - 0.5).abs();
        let full = Direct::new().minimize(&f, 0.0, 1.0);
        let early = Direct::builder().target(0.0).build().unwrap().minimize(&f, 0.0, 1.0);

        // the very first centre is already on target
        assert_eq!(early.evaluations, 1);
        assert_eq!(early.x, 0.5);
        assert!(full.evaluations >= early.evaluations);
    }

    #[test]
    fn nan_is_never_the_minimum() {
        let f = |x: f64| if x < 0.5 { f64::NAN } else { x };
        let minimum = Direct::new().minimize(&f, 0.0, 1.0);
        assert!(minimum.value.is_finite());
        assert!((minimum.x - 0.5).abs() < 1e-4, "{minimum:?}");
    }

    #[test]
    fn builder_validation() {
        assert!(matches!(
            Direct::builder().len_tol(f64::NAN).build(),
            Err(Error::InvalidParameter { name: "len_tol", .. })
        ));
        assert_eq!(
            Direct::builder().eps(-1.0).build(),
            Err(Error::InvalidParameter {
                name: "eps",
                value: -1.0
            })
        );
        assert!(Direct::builder().max_evaluations(2).build().is_err());
        assert!(Direct::builder().target(f64::INFINITY).build().is_err());
        assert!(Direct::builder().eps(0.0).build().is_ok());
    }
}
