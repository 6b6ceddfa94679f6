//! Hand-off of wall loading fields to plotting backends
//!
//! No plotting library is bundled. A [ContourPlot] holds everything needed to
//! draw the usual filled contour plot of a field, and anything implementing
//! [Plotter] can render it.

// crate modules
use crate::error::{Error, Result};
use crate::field::NwlField;

// nwl modules
use nwl_utils::linspace;

// external crates
use serde::{Deserialize, Serialize};

/// Default number of contour levels
pub const DEFAULT_LEVELS: usize = 10;

/// Everything needed to draw a filled contour plot of a field
///
/// Axes are in degrees. `z` is poloidal-major, `z[j][i]` being the value at
/// `(x[i], y[j])`, which is the layout most contouring routines expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourPlot {
    /// Toroidal bin centres (degrees)
    pub x: Vec<f64>,
    /// Poloidal bin centres (degrees)
    pub y: Vec<f64>,
    /// Wall loading (MW), one row per poloidal bin
    pub z: Vec<Vec<f64>>,
    /// Contour levels uniformly spaced from field minimum to maximum
    pub levels: Vec<f64>,
    /// Label for the horizontal axis
    pub x_label: String,
    /// Label for the vertical axis
    pub y_label: String,
    /// Label for the colour bar
    pub colorbar_label: String,
}

impl ContourPlot {
    /// Describe a contour plot of `field` with `num_levels` levels
    ///
    /// ```rust
    /// # use nwl_loading::{BinGrid, ContourPlot, CountMatrix, FitAudit, NwlField};
    /// let grid = BinGrid::new(1.0, 2.0, 3, 3).unwrap();
    /// let mut counts = CountMatrix::zeros(3, 3);
    /// counts.increment(1, 1);
    /// let field = NwlField::new(grid, counts, 2.0, FitAudit::default());
    ///
    /// let plot = ContourPlot::new(&field, 5).unwrap();
    /// assert_eq!(plot.levels, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    /// assert_eq!(plot.y_label, "Poloidal Angle (degrees)");
    ///
    /// // a single level is not a contour plot
    /// assert!(ContourPlot::new(&field, 1).is_err());
    /// ```
    pub fn new(field: &NwlField, num_levels: usize) -> Result<Self> {
        if num_levels < 2 {
            return Err(Error::TooFewLevels(num_levels));
        }

        Ok(Self {
            x: field.phi().iter().map(|phi| phi.to_degrees()).collect(),
            y: field.theta().iter().map(|theta| theta.to_degrees()).collect(),
            z: field.theta_major(),
            levels: linspace(field.min(), field.max(), num_levels),
            x_label: "Toroidal Angle (degrees)".to_string(),
            y_label: "Poloidal Angle (degrees)".to_string(),
            colorbar_label: "NWL (MW)".to_string(),
        })
    }
}

/// A plotting backend
///
/// Implement this to render wall loading with any plotting library, or to
/// capture plots in tests.
///
/// ```rust
/// # use nwl_loading::{ContourPlot, Plotter, Result};
/// /// Print the plot description rather than drawing anything
/// struct TextPlotter;
///
/// impl Plotter for TextPlotter {
///     fn plot(&mut self, plot: &ContourPlot) -> Result<()> {
///         println!("{} x {} grid, {} levels", plot.x.len(), plot.y.len(), plot.levels.len());
///         Ok(())
///     }
/// }
/// ```
pub trait Plotter {
    /// Render a contour plot
    fn plot(&mut self, plot: &ContourPlot) -> Result<()>;
}

/// Build the contour plot for `field` and pass it to `plotter`
pub fn plot_field(field: &NwlField, plotter: &mut dyn Plotter, num_levels: usize) -> Result<()> {
    let plot = ContourPlot::new(field, num_levels)?;
    plotter.plot(&plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinGrid, CountMatrix, FitAudit};

    #[derive(Default)]
    struct Capture(Vec<ContourPlot>);

    impl Plotter for Capture {
        fn plot(&mut self, plot: &ContourPlot) -> Result<()> {
            self.0.push(plot.clone());
            Ok(())
        }
    }

    struct Broken;

    impl Plotter for Broken {
        fn plot(&mut self, _plot: &ContourPlot) -> Result<()> {
            Err(Error::PlotterFailure("no display".to_string()))
        }
    }

    fn field() -> NwlField {
        let grid = BinGrid::new(std::f64::consts::FRAC_PI_2, std::f64::consts::PI, 2, 3).unwrap();
        let mut counts = CountMatrix::zeros(2, 3);
        counts.apply(&[(1, 0), (1, 0), (0, 2)]);
        NwlField::new(grid, counts, 1.0, FitAudit::default())
    }

    #[test]
    fn axes_in_degrees() {
        let mut capture = Capture::default();
        plot_field(&field(), &mut capture, DEFAULT_LEVELS).unwrap();

        let plot = &capture.0[0];
        assert_eq!(plot.x.len(), 2);
        assert!((plot.x[1] - 90.0).abs() < 1e-12);
        assert!((plot.y[0] + 90.0).abs() < 1e-12);
        assert_eq!(plot.levels.len(), 10);
        assert_eq!(plot.levels[0], 0.0);
        assert_eq!(plot.levels[9], 2.0);
        assert_eq!(plot.colorbar_label, "NWL (MW)");
        assert_eq!(plot.x_label, "Toroidal Angle (degrees)");
    }

    #[test]
    fn poloidal_major_values() {
        let plot = ContourPlot::new(&field(), 2).unwrap();
        assert_eq!(plot.z, vec![vec![0.0, 2.0], vec![0.0, 0.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn backend_failures_propagate() {
        let result = plot_field(&field(), &mut Broken, 3);
        assert!(matches!(result, Err(Error::PlotterFailure(_))));
    }
}
