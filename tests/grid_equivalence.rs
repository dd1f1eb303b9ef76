use odestep::{Float, prelude::*};

mod common;
use common::{Spring, forced_decay};

const N: usize = 5;

#[test]
fn every_stepper_matches_its_scalar_path() {
    for method in Method::ALL {
        let mut scalar = method.build(0.02, &forced_decay).unwrap();
        let mut grid = method.build(0.02, &forced_decay).unwrap();

        let mut x: Float = 0.4;
        let mut xs = vec![0.4; N];
        let mut t = 0.3;
        for _ in 0..25 {
            let dt = scalar.dt();
            let step = scalar.next_step(x, t).unwrap();
            let outcome = grid.next_step_on_grid(&mut xs, t).unwrap();
            assert_eq!(step.outcome, outcome, "{}", method.name());
            assert_eq!(scalar.dt(), grid.dt(), "{}", method.name());
            if step.is_accepted() {
                x = step.x;
                t += dt;
            }
            // Implicit iterations stop on the norm over the whole grid, so
            // they may take one more iteration than the scalar path
            for v in &xs {
                assert!((v - x).abs() < 1e-8, "{}: {} vs {}", method.name(), v, x);
            }
        }
    }
}

#[test]
fn grid_length_may_change_between_calls() {
    for method in Method::ALL {
        let mut stepper = method.build(0.01, &forced_decay).unwrap();
        for n in [3, 8, 1, 8, 0] {
            let mut xs = vec![0.25; n];
            stepper.next_step_on_grid(&mut xs, 0.0).unwrap();
            assert_eq!(xs.len(), n);
            if n > 1 {
                assert!(xs.iter().all(|&v| v == xs[0]), "{}", method.name());
            }
        }
    }
}

#[test]
fn symplectic_grid_matches_scalar() {
    let spring = Spring { k: 4.0 };
    for method in SymplecticMethod::ALL {
        let mut scalar = method.build(0.01, &spring).unwrap();
        let mut grid = method.build(0.01, &spring).unwrap();
        let (mut x, mut v): (Float, Float) = (0.5, -0.3);
        let (mut xs, mut vs) = (vec![0.5; N], vec![-0.3; N]);
        scalar.initiate(x, v, 0.0).unwrap();
        grid.initiate_on_grid(&xs, &vs, 0.0).unwrap();

        let mut t = 0.0;
        for _ in 0..100 {
            (x, v) = scalar.next_step(x, v, t).unwrap();
            grid.next_step_on_grid(&mut xs, &mut vs, t).unwrap();
            t += 0.01;
        }
        for i in 0..N {
            assert!((xs[i] - x).abs() < 1e-12, "{}", scalar.name());
            assert!((vs[i] - v).abs() < 1e-12, "{}", scalar.name());
        }
    }
}
