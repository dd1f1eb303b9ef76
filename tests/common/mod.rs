#![allow(dead_code)]

use odestep::{Float, prelude::*};

/// dx/dt = x, x(t) = x0 e^t
pub fn growth(x: Float, _t: Float) -> Float {
    x
}

/// dx/dt = -x + sin t
pub fn forced_decay(x: Float, t: Float) -> Float {
    -x + t.sin()
}

/// Logistic growth dx/dt = x (1 - x)
pub fn logistic(x: Float, _t: Float) -> Float {
    x * (1.0 - x)
}

/// Linear spring force a(x) = -k x with a vectorized grid kernel.
pub struct Spring {
    pub k: Float,
}

impl DriveFunction for Spring {
    fn evaluate_at_time(&self, x: Float, _t: Float) -> Float {
        -self.k * x
    }

    fn evaluate_on_grid_time_in_place(&self, xs: &[Float], out: &mut [Float], _t: Float) {
        for (o, x) in out.iter_mut().zip(xs) {
            *o = -self.k * x;
        }
    }
}

/// Stiff linear decay dx/dt = -lambda x.
pub struct Stiff {
    pub lambda: Float,
}

impl DriveFunction for Stiff {
    fn evaluate_at_time(&self, x: Float, _t: Float) -> Float {
        -self.lambda * x
    }
}

/// Energy of a unit-mass particle on a spring of stiffness `k`.
pub fn spring_energy(k: Float, x: Float, v: Float) -> Float {
    0.5 * (v * v + k * x * x)
}

/// Runs `n` fixed steps of a non-adaptive stepper and returns the state.
pub fn run_fixed<S: Stepper + ?Sized>(stepper: &mut S, mut x: Float, t0: Float, n: usize) -> Float {
    let dt = stepper.dt();
    let mut t = t0;
    for _ in 0..n {
        x = stepper.next_step(x, t).unwrap().x;
        t += dt;
    }
    x
}
