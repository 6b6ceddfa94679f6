/// Uniformly spaced values from `start` to `end` inclusive
///
/// Mirrors the usual `linspace` behaviour: the first and last values are
/// exactly `start` and `end`, and a single value returns just `start`.
///
/// ```rust
/// # use nwl_utils::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(-1.0, 1.0, 1), vec![-1.0]);
/// assert!(linspace(0.0, 1.0, 0).is_empty());
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // avoid accumulated rounding on the final value
            values[n - 1] = end;
            values
        }
    }
}
