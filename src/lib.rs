//! Single-step integrators for `dx/dt = f(x, t)` on a scalar state or on a
//! grid of independent states sharing one time value.
//!
//! - [`methods::rk`]: explicit Runge-Kutta methods from Euler to Nyström 5.
//! - [`methods::implicit`]: backward Euler, trapezoidal and implicit
//!   midpoint, solved by fixed-point or Newton iteration.
//! - [`methods::embedded`]: adaptive embedded pairs (Heun-Euler through
//!   Dormand-Prince) with accept/reject step-size control.
//! - [`methods::symplectic`]: Störmer-Verlet, velocity Verlet, leapfrog,
//!   Yoshida 4 and Beeman for `x'' = a(x, t)`.
//!
//! Every stepper borrows a [`DriveFunction`](core::drive::DriveFunction) and
//! advances one step per call; [`solve::march`] loops a stepper to an end
//! time.
//!
//! ```
//! use odestep::prelude::*;
//!
//! let decay = |x: f64, _t: f64| -x;
//! let mut stepper = Method::TrapezoidalNewton.build(0.1, &decay).unwrap();
//! let mut xs = vec![1.0, 2.0, 3.0];
//! stepper.next_step_on_grid(&mut xs, 0.0).unwrap();
//! assert!((xs[0] - 0.95 / 1.05).abs() < 1e-7);
//! ```

pub mod core;
pub mod error;
pub mod methods;
pub mod prelude;
pub mod solve;

pub use error::Error;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Floating point type of every state, time and coefficient.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
