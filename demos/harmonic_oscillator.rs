//! # Example: Harmonic Oscillator
//!
//! Integrate `x'' = -x` for a thousand periods with each symplectic
//! integrator, on a grid of initial amplitudes, and report the worst
//! relative energy drift.

use odestep::prelude::*;
use std::f64::consts::PI;

fn energy(x: f64, v: f64) -> f64 {
    0.5 * (x * x + v * v)
}

fn main() {
    let spring = Autonomous(|x: f64| -x);
    let dt = 0.01;
    let nsteps = (1000.0 * 2.0 * PI / dt) as usize;
    let x0 = vec![0.5, 1.0, 2.0];
    let v0 = vec![0.0; 3];

    for method in SymplecticMethod::ALL {
        // Störmer-Verlet carries the previous positions; the others ignore priming
        let built = method.build(dt, &spring).and_then(|mut integrator| {
            integrator.initiate_on_grid(&x0, &v0, 0.0)?;
            Ok(integrator)
        });
        let mut integrator = match built {
            Ok(integrator) => integrator,
            Err(e) => {
                eprintln!("{:?}: {}", method, e);
                continue;
            }
        };

        let (mut xs, mut vs) = (x0.clone(), v0.clone());
        let mut t = 0.0;
        let mut worst: f64 = 0.0;
        for _ in 0..nsteps {
            if let Err(e) = integrator.next_step_on_grid(&mut xs, &mut vs, t) {
                eprintln!("{}: integration failed at t = {:.3}: {}", integrator.name(), t, e);
                break;
            }
            t += dt;
            for ((x, v), (x0, v0)) in xs.iter().zip(&vs).zip(x0.iter().zip(&v0)) {
                let e0 = energy(*x0, *v0);
                worst = worst.max((energy(*x, *v) - e0).abs() / e0);
            }
        }

        println!("{}", integrator.name());
        println!("  Final time: {:.5}", t);
        println!("  Final positions: {:?}", xs);
        println!("  Worst relative energy drift: {:.3e}", worst);
    }
}
