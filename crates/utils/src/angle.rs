//! Angle conventions shared by the inverter and the aggregator

use std::f64::consts::TAU;

/// Fold any angle into `[0, 2π)`
///
/// `rem_euclid` can round up to exactly `2π` for tiny negative inputs, which
/// is folded back to zero so the half-open interval always holds.
///
/// ```rust
/// # use nwl_utils::fold_angle;
/// # use std::f64::consts::{PI, TAU};
/// assert_eq!(fold_angle(TAU), 0.0);
/// assert_eq!(fold_angle(-PI), PI);
/// assert!(fold_angle(-1e-20) < TAU);
/// ```
pub fn fold_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(TAU);
    if folded >= TAU {
        0.0
    } else {
        folded
    }
}

/// Smallest separation between two angles on the circle, in `[0, π]`
///
/// ```rust
/// # use nwl_utils::angular_distance;
/// # use std::f64::consts::TAU;
/// assert!((angular_distance(0.1, TAU - 0.1) - 0.2).abs() < 1e-12);
/// ```
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let delta = fold_angle(a - b);
    delta.min(TAU - delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn fold_keeps_values_in_range() {
        for angle in [-7.0 * PI, -PI, -0.0, 0.0, 1.0, TAU, 3.0 * TAU + 0.25] {
            let folded = fold_angle(angle);
            assert!((0.0..TAU).contains(&folded), "{angle} -> {folded}");
        }
        assert!((fold_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(angular_distance(1.0, 2.5), angular_distance(2.5, 1.0));
        assert!((angular_distance(0.0, PI) - PI).abs() < 1e-15);
    }
}
