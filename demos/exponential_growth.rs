//! # Example: Exponential Growth
//!
//! March `dx/dt = x` from `x(0) = 1` to `t = 1` with every fixed-step
//! method and compare against `e`.

use odestep::prelude::*;

fn main() {
    let growth = |x: f64, _t: f64| x;
    let exact = 1.0f64.exp();

    for method in Method::ALL {
        let mut stepper = match method.build(0.05, &growth) {
            Ok(stepper) => stepper,
            Err(e) => {
                eprintln!("{}: {}", method.name(), e);
                continue;
            }
        };

        let mut x = 1.0;
        match march(&mut stepper, &mut x, 0.0, 1.0, 10_000) {
            Ok(sol) => println!(
                "{:<32} x = {:.10}  error = {:.3e}  steps = {:>4} (rejected {})",
                stepper.name(),
                x,
                (x - exact).abs(),
                sol.naccpt,
                sol.nrejct
            ),
            Err(e) => eprintln!("{}: integration failed: {}", stepper.name(), e),
        }
    }
}
