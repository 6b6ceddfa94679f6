//! Formatting helpers for summaries and log messages

use crate::f;

/// Extends numerical primitives with consistent scientific formatting
pub trait ValueExt {
    /// Scientific notation with a signed, zero-padded exponent
    ///
    /// The `LowerExp` output of the standard library drops the exponent sign
    /// and padding (`1e-6`), which makes columns of power densities hard to
    /// read. This always gives the same width for the same precision.
    ///
    /// ```rust
    /// # use nwl_utils::ValueExt;
    /// assert_eq!((4.518e-6).sci(3, 2), "4.518e-06".to_string());
    /// assert_eq!((-250.0).sci(2, 2), "-2.50e+02".to_string());
    /// assert_eq!((0.0).sci(1, 3), "0.0e+000".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::LowerExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let raw = f!("{:.precision$e}", self, precision = precision);
        // `LowerExp` output always contains exactly one 'e'
        let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        f!("{mantissa}e{sign}{digits:0>exp_pad$}")
    }
}

/// Extends Option for easy display formatting
pub trait OptionExt {
    /// The contained value, or "none"
    ///
    /// ```rust
    /// # use nwl_utils::OptionExt;
    /// assert_eq!(Some(0.5).display(), "0.5");
    /// assert_eq!(None::<f64>.display(), "none");
    /// ```
    fn display(&self) -> String;
}

impl<T: std::fmt::Display> OptionExt for Option<T> {
    fn display(&self) -> String {
        self.as_ref()
            .map_or_else(|| "none".to_string(), |value| f!("{value}"))
    }
}
