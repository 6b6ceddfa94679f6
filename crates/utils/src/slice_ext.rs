use crate::error::{Error, Result};

/// Extends functionality for slices of float arrays
pub trait SliceExt {
    /// Find the minimum value in float arrays
    ///
    /// Only provides the minimum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nwl_utils::SliceExt;
    /// # use nwl_utils::Error;
    /// // Successful cases
    /// assert_eq!([1.1, 0.5, 2.2].try_min(), Ok(0.5));
    ///
    /// // Error cases
    /// assert_eq!([1.1, f64::NAN, 2.2].try_min(), Err(Error::SliceContainsUndefinedValues));
    /// assert_eq!(Vec::<f64>::new().try_min(), Err(Error::SliceContainsNoValues));
    /// ```
    ///
    /// Uses `total_cmp` so that an ordering is always defined once undefined
    /// values have been rejected.
    fn try_min(&self) -> Result<f64>;

    /// Find the maximum value in float arrays
    ///
    /// Only provides the maximum value from a collection of valid numbers. Any
    /// NAN values, infinite values, or empty slices will return an error.
    ///
    /// ```rust
    /// # use nwl_utils::SliceExt;
    /// # use nwl_utils::Error;
    /// assert_eq!([1.1, 0.5, 2.2].try_max(), Ok(2.2));
    /// assert_eq!([1.1, f64::INFINITY].try_max(), Err(Error::SliceContainsUndefinedValues));
    /// ```
    fn try_max(&self) -> Result<f64>;

    /// Find every bin centre within `half_width` of `value`
    ///
    /// The slice holds bin centres rather than bin edges. Any centre with
    /// `|value - centre| <= half_width` is a member, so a value exactly on the
    /// boundary between two bins belongs to both of them.
    ///
    /// Values outside every window simply return an empty list.
    ///
    /// ```rust
    /// # use nwl_utils::SliceExt;
    /// let centres = vec![0.0, 1.0, 2.0, 3.0];
    ///
    /// // Inside a single window
    /// assert_eq!(centres.find_window(1.2, 0.5), Ok(vec![1]));
    ///
    /// // On the shared boundary of two windows
    /// assert_eq!(centres.find_window(1.5, 0.5), Ok(vec![1, 2]));
    ///
    /// // Outside of the grid entirely
    /// assert_eq!(centres.find_window(4.0, 0.5), Ok(vec![]));
    /// ```
    fn find_window(&self, value: f64, half_width: f64) -> Result<Vec<usize>>;
}

impl SliceExt for [f64] {
    fn try_min(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .min_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn try_max(&self) -> Result<f64> {
        if self.iter().any(|v| !v.is_finite()) {
            return Err(Error::SliceContainsUndefinedValues);
        };

        self.iter()
            .max_by(|a, b| a.total_cmp(b))
            .copied()
            .ok_or(Error::SliceContainsNoValues)
    }

    fn find_window(&self, value: f64, half_width: f64) -> Result<Vec<usize>> {
        if !half_width.is_finite() || half_width < 0.0 {
            return Err(Error::InvalidHalfWidth { half_width });
        }

        // a window needs somewhere to be
        if self.is_empty() {
            return Err(Error::BelowMinimumSliceLength {
                length: 0,
                minimum_required: 1,
            });
        }

        // NaN never compares as within a window, so falls through to empty
        Ok(self
            .iter()
            .enumerate()
            .filter(|(_, centre)| (value - *centre).abs() <= half_width)
            .map(|(i, _)| i)
            .collect())
    }
}
