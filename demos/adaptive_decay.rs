//! # Example: Adaptive Decay
//!
//! Forced decay `dx/dt = -x + sin t` solved with the embedded pairs. The
//! stepper shrinks its step on rejection; the driver retries until the end
//! time is reached.
//!
//! Exact solution for `x(0) = 1`: `x(t) = 1.5 e^-t + (sin t - cos t) / 2`.

use odestep::prelude::*;

fn main() {
    let forced = |x: f64, t: f64| -x + t.sin();
    let exact = |t: f64| 1.5 * (-t).exp() + 0.5 * (t.sin() - t.cos());
    let t_end = 10.0;

    let settings = Settings::builder()
        .adaptive_tolerance(1e-6)
        .tolerance(1e-5)
        .build();

    for method in Method::ALL.into_iter().filter(|m| m.is_adaptive()) {
        let mut stepper = match method.build_with_settings(0.5, &forced, settings.clone()) {
            Ok(stepper) => stepper,
            Err(e) => {
                eprintln!("{}: {}", method.name(), e);
                continue;
            }
        };

        let mut xs = vec![1.0];
        match march_on_grid(&mut stepper, &mut xs, 0.0, t_end, 1_000_000) {
            Ok(sol) => {
                println!("{}", stepper.name());
                println!("  Final status: {:?}", sol.status);
                println!("  Final state: t = {:.5}, x = {:.8}", sol.t, xs[0]);
                println!("  Error: {:.3e}", (xs[0] - exact(sol.t)).abs());
                println!("  Final step size: {:.3e}", sol.dt);
                println!("  Number of steps taken: {}", sol.nstep);
                println!("  Number of accepted steps: {}", sol.naccpt);
                println!("  Number of rejected steps: {}", sol.nrejct);
            }
            Err(e) => eprintln!("{}: integration failed: {}", stepper.name(), e),
        }
    }
}
