// standard library
use std::fmt;

// nwl modules
use nwl_utils::ValueExt;

// external crates
use serde::{Deserialize, Serialize};

/// Summary of inversion quality over a whole crossing dataset
///
/// Every crossing is inverted to flux coordinates by minimising a distance,
/// and the distance left over (the residual, in cm) says how well the point
/// actually sits on the wall surface. Poor fits and crossings that land in no
/// bin never abort a run, they are counted here instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FitAudit {
    /// Number of crossings processed
    pub points: usize,
    /// Crossings with a residual above the configured tolerance
    pub poor_fits: usize,
    /// Largest residual seen (cm)
    pub max_residual: f64,
    /// Mean residual (cm)
    pub mean_residual: f64,
    /// Crossings counted in at least one bin
    pub binned: usize,
    /// Crossings outside every bin
    pub unbinned: usize,
}

impl fmt::Display for FitAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fit audit")?;
        writeln!(f, " - crossings     : {}", self.points)?;
        writeln!(f, " - binned        : {}", self.binned)?;
        writeln!(f, " - unbinned      : {}", self.unbinned)?;
        writeln!(f, " - poor fits     : {}", self.poor_fits)?;
        writeln!(f, " - max residual  : {} cm", self.max_residual.sci(3, 2))?;
        write!(f, " - mean residual : {} cm", self.mean_residual.sci(3, 2))
    }
}

/// Running totals behind a [FitAudit], mergeable across threads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct AuditTally {
    points: usize,
    poor_fits: usize,
    max_residual: f64,
    sum_residual: f64,
    binned: usize,
    unbinned: usize,
}

impl AuditTally {
    /// Record one crossing
    pub(crate) fn record(&mut self, residual: f64, poor: bool, binned: bool) {
        self.points += 1;
        self.max_residual = self.max_residual.max(residual);
        self.sum_residual += residual;

        if poor {
            self.poor_fits += 1;
        }

        if binned {
            self.binned += 1;
        } else {
            self.unbinned += 1;
        }
    }

    /// Combine with a tally from another part of the dataset
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            points: self.points + other.points,
            poor_fits: self.poor_fits + other.poor_fits,
            max_residual: self.max_residual.max(other.max_residual),
            sum_residual: self.sum_residual + other.sum_residual,
            binned: self.binned + other.binned,
            unbinned: self.unbinned + other.unbinned,
        }
    }

    pub(crate) fn finish(self) -> FitAudit {
        let mean_residual = match self.points {
            0 => 0.0,
            n => self.sum_residual / n as f64,
        };

        FitAudit {
            points: self.points,
            poor_fits: self.poor_fits,
            max_residual: self.max_residual,
            mean_residual,
            binned: self.binned,
            unbinned: self.unbinned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_and_merge() {
        let mut a = AuditTally::default();
        a.record(0.5, false, true);
        a.record(3.0, true, false);

        let mut b = AuditTally::default();
        b.record(1.0, false, true);

        let audit = a.merge(b).finish();
        assert_eq!(audit.points, 3);
        assert_eq!(audit.poor_fits, 1);
        assert_eq!(audit.binned, 2);
        assert_eq!(audit.unbinned, 1);
        assert_eq!(audit.max_residual, 3.0);
        assert_eq!(audit.mean_residual, 1.5);
    }

    #[test]
    fn empty_tally() {
        let audit = AuditTally::default().finish();
        assert_eq!(audit, FitAudit::default());
    }

    #[test]
    fn display_summary() {
        let audit = FitAudit {
            points: 10,
            max_residual: 0.25,
            ..Default::default()
        };
        let text = audit.to_string();
        assert!(text.contains("crossings     : 10"));
        assert!(text.contains("2.500e-01 cm"));
    }
}
