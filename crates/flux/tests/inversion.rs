//! Integration tests for flux coordinate inversion

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;
use nwl_equilibrium::{FourierEquilibrium, FourierMode};
use nwl_flux::{Direct, FluxInverter, Minimizer, ScanRefine};
use nwl_utils::{angular_distance, linspace};
use rstest::{fixture, rstest};

#[fixture]
fn circular() -> FourierEquilibrium {
    FourierEquilibrium::circular(5.0, 1.0)
}

#[fixture]
fn elliptical() -> FourierEquilibrium {
    FourierEquilibrium::elliptical(6.0, 1.5, 1.6)
}

/// Mildly shaped three-period stellarator-like boundary
#[fixture]
fn shaped() -> FourierEquilibrium {
    let mode = |m, n, rmnc, zmns| FourierMode { m, n, rmnc, zmns };
    FourierEquilibrium::new(
        3,
        vec![
            mode(0, 0, 8.0, 0.0),
            mode(1, 0, 1.0, 1.1),
            mode(1, 1, 0.08, 0.08),
        ],
        vec![],
    )
    .unwrap()
}

/// Recover angles from points generated on the wall
fn round_trip(equilibrium: &FourierEquilibrium, minimizer: &dyn Minimizer, wall_s: f64) {
    let inverter = FluxInverter::new(equilibrium, minimizer, wall_s);

    for phi in linspace(-PI + 0.1, PI - 0.1, 7) {
        for theta in linspace(0.05, TAU - 0.05, 11) {
            let point = inverter.wall_point(theta, phi);
            let coordinate = inverter.flux_coords(&point);

            assert!((coordinate.phi - phi).abs() < 1e-12);
            assert!(
                angular_distance(coordinate.theta, theta) < 1e-4,
                "theta={theta} phi={phi} -> {coordinate:?}"
            );
            assert!(coordinate.residual < 1e-2);
        }
    }
}

#[rstest]
#[case(1.0)] // case 1
#[case(1.1)] // case 2
#[case(1.3)] // case 3
fn direct_round_trip_circular(circular: FourierEquilibrium, #[case] wall_s: f64) {
    round_trip(&circular, &Direct::new(), wall_s);
}

#[rstest]
fn direct_round_trip_elliptical(elliptical: FourierEquilibrium) {
    round_trip(&elliptical, &Direct::new(), 1.1);
}

#[rstest]
fn direct_round_trip_shaped(shaped: FourierEquilibrium) {
    round_trip(&shaped, &Direct::new(), 1.0);
}

#[rstest]
fn scan_round_trip_elliptical(elliptical: FourierEquilibrium) {
    round_trip(&elliptical, &ScanRefine::default(), 1.1);
}

#[rstest]
fn minimisers_agree(elliptical: FourierEquilibrium) {
    let direct = Direct::new();
    let scan = ScanRefine::default();
    let a = FluxInverter::new(&elliptical, &direct, 1.2);
    let b = FluxInverter::new(&elliptical, &scan, 1.2);

    // points slightly off the wall still have a well defined nearest angle
    let points = [
        Vector3::new(780.0, 10.0, 30.0),
        Vector3::new(-420.0, 200.0, -150.0),
        Vector3::new(0.0, -610.0, 210.0),
    ];

    for point in &points {
        let (ca, cb) = (a.flux_coords(point), b.flux_coords(point));
        assert_eq!(ca.phi, cb.phi);
        assert!(angular_distance(ca.theta, cb.theta) < 5e-4, "{ca:?} vs {cb:?}");
        assert!((ca.residual - cb.residual).abs() < 1e-3);
    }
}

#[rstest]
fn inverter_is_shared_between_threads(circular: FourierEquilibrium) {
    let direct = Direct::new();
    let inverter = FluxInverter::new(&circular, &direct, 1.0);

    let thetas = linspace(0.1, 6.0, 8);
    std::thread::scope(|scope| {
        for &theta in &thetas {
            scope.spawn(move || {
                let point = inverter.wall_point(theta, 0.3);
                let coordinate = inverter.flux_coords(&point);
                assert!(angular_distance(coordinate.theta, theta) < 1e-4);
            });
        }
    });
}
