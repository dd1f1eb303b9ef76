use odestep::{
    Float,
    methods::{
        implicit::{FixedPoint, Newton, Scheme},
        settings::{Settings, TOLERANCE},
    },
    prelude::*,
};

mod common;
use common::{Stiff, forced_decay, logistic};

const SCHEMES: [Scheme; 3] = [Scheme::BackwardEuler, Scheme::Trapezoidal, Scheme::Midpoint];

#[test]
fn fixed_point_and_newton_agree() {
    for scheme in SCHEMES {
        for (x0, t0) in [(0.2, 0.0), (0.9, 1.3), (0.5, -2.0)] {
            let mut fp = FixedPoint::new(scheme, 0.1, &logistic).unwrap();
            let mut nw = Newton::new(scheme, 0.1, &logistic).unwrap();
            let a = fp.next_step(x0, t0).unwrap().x;
            let b = nw.next_step(x0, t0).unwrap().x;
            assert!((a - b).abs() < 2.0 * TOLERANCE, "{:?} at {}", scheme, x0);
        }
    }
}

#[test]
fn agreement_holds_over_a_trajectory_on_the_grid() {
    for scheme in SCHEMES {
        let mut fp = FixedPoint::new(scheme, 0.05, &forced_decay).unwrap();
        let mut nw = Newton::new(scheme, 0.05, &forced_decay).unwrap();
        let mut a = vec![1.0, -0.5, 0.0];
        let mut b = a.clone();
        let mut t = 0.0;
        for _ in 0..20 {
            fp.next_step_on_grid(&mut a, t).unwrap();
            nw.next_step_on_grid(&mut b, t).unwrap();
            t += 0.05;
        }
        for (a, b) in a.iter().zip(&b) {
            // Per-step differences below 2 * tol accumulate with damping
            assert!((a - b).abs() < 20.0 * 2.0 * TOLERANCE, "{:?}", scheme);
        }
    }
}

#[test]
fn newton_handles_stiff_problem_fixed_point_cannot() {
    let stiff = Stiff { lambda: 1000.0 };
    let mut fp = FixedPoint::new(Scheme::BackwardEuler, 0.01, &stiff).unwrap();
    assert_eq!(fp.next_step(1.0, 0.0), Err(Error::NotConverged(20)));

    let mut nw = Newton::new(Scheme::BackwardEuler, 0.01, &stiff).unwrap();
    let mut x = 1.0;
    let mut t = 0.0;
    for _ in 0..10 {
        x = nw.next_step(x, t).unwrap().x;
        t += 0.01;
    }
    // x_n = (1 + 10)^-n, no blow-up
    assert!((x - (11.0 as Float).powi(-10)).abs() < 1e-9);
}

#[test]
fn singular_jacobian_is_detected() {
    // G'(y) = 1 - dt * f'(y) = 1 - 0.5 * 2 = 0
    let drive = |x: Float, _t: Float| 2.0 * x;
    let mut be = Newton::new(Scheme::BackwardEuler, 0.5, &drive).unwrap();
    match be.next_step(0.0, 0.0) {
        Err(Error::SingularJacobian { iteration, jacobian }) => {
            assert_eq!(iteration, 0);
            assert!(jacobian.abs() < 1e-10);
        }
        other => panic!("expected singular Jacobian, got {:?}", other),
    }

    // Trapezoidal weight is dt/2: f' = 4 makes it singular too
    let drive = |x: Float, _t: Float| 4.0 * x;
    let mut tr = Newton::new(Scheme::Trapezoidal, 0.5, &drive).unwrap();
    let mut xs = vec![0.0; 5];
    assert!(matches!(
        tr.next_step_on_grid(&mut xs, 0.0),
        Err(Error::SingularJacobian { .. })
    ));
    assert_eq!(xs, vec![0.0; 5]);
}

#[test]
fn settings_control_the_iteration() {
    let loose = Settings::builder().tolerance(1e-3).max_iter(2).build();
    let mut fp = FixedPoint::new(Scheme::Trapezoidal, 0.1, &logistic)
        .unwrap()
        .with_settings(loose)
        .unwrap();
    assert!(fp.next_step(0.5, 0.0).is_ok());

    let strict = Settings::builder().tolerance(1e-15).max_iter(1).build();
    let mut fp = FixedPoint::new(Scheme::Trapezoidal, 0.1, &logistic)
        .unwrap()
        .with_settings(strict)
        .unwrap();
    assert_eq!(fp.next_step(0.5, 0.0), Err(Error::NotConverged(1)));

    let invalid = Settings::builder().singular_threshold(-1.0).build();
    assert!(Newton::new(Scheme::Midpoint, 0.1, &logistic)
        .unwrap()
        .with_settings(invalid)
        .is_err());
}

#[test]
fn redefine_swaps_step_and_drive() {
    let slow = Stiff { lambda: 1.0 };
    let fast = Stiff { lambda: 2.0 };
    let mut nw = Newton::new(Scheme::BackwardEuler, 0.1, &slow).unwrap();
    nw.redefine(0.2, &fast).unwrap();
    assert_eq!(nw.dt(), 0.2);
    let x = nw.next_step(1.0, 0.0).unwrap().x;
    assert!((x - 1.0 / 1.4).abs() < 1e-7);
    assert!(nw.redefine(0.0, &slow).is_err());
    assert_eq!(nw.dt(), 0.2);
}
