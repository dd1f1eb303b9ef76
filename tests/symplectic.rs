use odestep::{Float, methods::symplectic::VelocityVerlet, prelude::*};

mod common;
use common::{Spring, spring_energy};

#[test]
fn velocity_verlet_energy_stays_bounded() {
    let spring = Spring { k: 1.0 };
    let mut vv = VelocityVerlet::new(0.01, &spring).unwrap();
    let (mut x, mut v, mut t) = (1.0, 0.0, 0.0);
    let e0 = spring_energy(1.0, x, v);
    let mut worst: Float = 0.0;
    for _ in 0..10_000 {
        (x, v) = vv.next_step(x, v, t).unwrap();
        t += 0.01;
        worst = worst.max((spring_energy(1.0, x, v) - e0).abs() / e0);
    }
    assert!(worst < 0.01, "drift {}", worst);
}

#[test]
fn every_integrator_conserves_energy_over_many_periods() {
    let spring = Spring { k: 4.0 };
    let dt = 0.005;
    for method in SymplecticMethod::ALL {
        let mut integrator = method.build(dt, &spring).unwrap();
        let (mut x, mut v): (Float, Float) = (0.0, 2.0);
        let e0 = spring_energy(4.0, x, v);
        integrator.initiate(x, v, 0.0).unwrap();

        let mut worst: Float = 0.0;
        for i in 0..20_000 {
            let t = i as Float * dt;
            (x, v) = integrator.next_step(x, v, t).unwrap();
            worst = worst.max((spring_energy(4.0, x, v) - e0).abs() / e0);
        }
        assert!(worst < 0.01, "{}: drift {}", integrator.name(), worst);
    }
}

#[test]
fn stormer_verlet_requires_initiation() {
    let spring = Spring { k: 1.0 };
    let mut sv = SymplecticMethod::StormerVerlet.build(0.1, &spring).unwrap();
    assert_eq!(sv.next_step(1.0, 0.0, 0.0), Err(Error::NotInitiated));
    let (mut xs, mut vs) = (vec![1.0; 2], vec![0.0; 2]);
    assert_eq!(
        sv.next_step_on_grid(&mut xs, &mut vs, 0.0),
        Err(Error::NotInitiated)
    );
}

#[test]
fn built_stormer_verlet_steps_once_primed() {
    let spring = Autonomous(|x: Float| -x);
    let mut sv = SymplecticMethod::StormerVerlet.build(0.01, &spring).unwrap();
    sv.initiate(1.0, 0.0, 0.0).unwrap();
    let (mut x, mut v): (Float, Float) = (1.0, 0.0);
    let mut t = 0.0;
    for _ in 0..100 {
        (x, v) = sv.next_step(x, v, t).unwrap();
        t += 0.01;
    }
    assert!((x - t.cos()).abs() < 1e-4);
    assert!((v + t.sin()).abs() < 1e-3);

    let (mut xs, mut vs) = (vec![1.0; 3], vec![0.0; 3]);
    sv.initiate_on_grid(&xs, &vs, 0.0).unwrap();
    sv.next_step_on_grid(&mut xs, &mut vs, 0.0).unwrap();
    assert!(xs.iter().all(|&e| (e - Float::cos(0.01)).abs() < 1e-8));
}

#[test]
fn priming_is_a_no_op_without_history() {
    let spring = Spring { k: 1.0 };
    for method in SymplecticMethod::ALL {
        let mut integrator = method.build(0.1, &spring).unwrap();
        assert!(integrator.initiate(1.0, 0.0, 0.0).is_ok());
        assert_eq!(
            integrator.initiate_on_grid(&[1.0, 2.0], &[0.0], 0.0),
            Err(Error::LengthMismatch(2, 1)),
            "{}",
            integrator.name()
        );
    }
}

#[test]
fn time_dependent_force_is_honored() {
    // x'' = cos t from rest: x = 1 - cos t, v = sin t
    let push = |_x: Float, t: Float| t.cos();
    for method in [
        SymplecticMethod::VelocityVerlet,
        SymplecticMethod::Leapfrog,
        SymplecticMethod::Yoshida4,
        SymplecticMethod::Beeman,
    ] {
        let mut integrator = method.build(0.001, &push).unwrap();
        let (mut x, mut v): (Float, Float) = (0.0, 0.0);
        for i in 0..1000 {
            (x, v) = integrator.next_step(x, v, i as Float * 0.001).unwrap();
        }
        assert!((x - (1.0 - Float::cos(1.0))).abs() < 1e-5, "{}", integrator.name());
        assert!((v - Float::sin(1.0)).abs() < 1e-5, "{}", integrator.name());
    }
}

#[test]
fn non_finite_force_is_reported() {
    let broken = |x: Float, _t: Float| if x.abs() > 10.0 { Float::NAN } else { -x };
    for method in SymplecticMethod::ALL {
        let mut integrator = method.build(0.1, &broken).unwrap();
        integrator.initiate_on_grid(&[0.0, 5.0], &[0.0, 0.0], 0.0).unwrap();
        let (mut xs, mut vs) = (vec![0.0, 11.0], vec![0.0, 0.0]);
        assert!(matches!(
            integrator.next_step_on_grid(&mut xs, &mut vs, 0.0),
            Err(Error::InvalidDerivative { .. })
        ));
        assert_eq!(xs, vec![0.0, 11.0]);
        assert_eq!(vs, vec![0.0, 0.0]);
    }
}
