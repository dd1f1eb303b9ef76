//! Implicit single-step schemes and their two solution strategies
//!
//! Each [`Scheme`] closes its last stage on the unknown end state `y`:
//!
//! | scheme          | `y = ...`                              |
//! |-----------------|----------------------------------------|
//! | backward Euler  | `x + dt f(y, t + dt)`                  |
//! | trapezoidal     | `x + dt/2 (f(x, t) + f(y, t + dt))`    |
//! | implicit midpoint | `x + dt f((x + y)/2, t + dt/2)`      |
//!
//! [`FixedPoint`] iterates the corrector by plain substitution, [`Newton`]
//! root-finds `G(y) = y - x - dt * combination(y)` with a finite-difference
//! Jacobian. Both are seeded with an explicit Euler predictor, give up after
//! `max_iter` iterations and leave the state untouched on failure.

mod fixed_point;
mod newton;

pub use fixed_point::FixedPoint;
pub use newton::Newton;

use crate::Float;

/// Implicit formula closed on the unknown end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// First order, L-stable
    BackwardEuler,
    /// Second order, implicit Heun / Crank-Nicolson
    Trapezoidal,
    /// Second order, symmetric
    Midpoint,
}

/// Step-size dependent view of a [`Scheme`]; rebuilt whenever `dt` changes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Formula {
    pub scheme: Scheme,
    pub dt: Float,
    pub half_dt: Float,
}

impl Formula {
    pub fn new(scheme: Scheme, dt: Float) -> Self {
        Self {
            scheme,
            dt,
            half_dt: 0.5 * dt,
        }
    }

    /// Point at which the implicit slope is evaluated for a guess `y`.
    pub fn eval_point(&self, x: Float, y: Float) -> Float {
        match self.scheme {
            Scheme::BackwardEuler | Scheme::Trapezoidal => y,
            Scheme::Midpoint => 0.5 * (x + y),
        }
    }

    pub fn eval_time(&self, t: Float) -> Float {
        match self.scheme {
            Scheme::BackwardEuler | Scheme::Trapezoidal => t + self.dt,
            Scheme::Midpoint => t + self.half_dt,
        }
    }

    /// Right-hand side of `y = corrector(...)` given the start slope `fx` and
    /// the implicit slope `fy`.
    pub fn corrector(&self, x: Float, fx: Float, fy: Float) -> Float {
        match self.scheme {
            Scheme::BackwardEuler | Scheme::Midpoint => x + self.dt * fy,
            Scheme::Trapezoidal => x + self.half_dt * (fx + fy),
        }
    }

    /// `d(corrector)/dy = weight * f'(eval_point)`.
    pub fn slope_weight(&self) -> Float {
        match self.scheme {
            Scheme::BackwardEuler => self.dt,
            Scheme::Trapezoidal | Scheme::Midpoint => self.half_dt,
        }
    }
}

/// Euclidean norm of `a - b`.
pub(crate) fn increment_norm(a: &[Float], b: &[Float]) -> Float {
    a.iter()
        .zip(b)
        .map(|(a, b)| (a - b) * (a - b))
        .sum::<Float>()
        .sqrt()
}

pub(crate) fn scheme_name(scheme: Scheme, newton: bool) -> &'static str {
    match (scheme, newton) {
        (Scheme::BackwardEuler, false) => "Backward Euler with Fix-Point Method",
        (Scheme::Trapezoidal, false) => "Trapezoidal (implicit Heun) with Fix-Point Method",
        (Scheme::Midpoint, false) => "MidPoint Implicit with Fix-Point Method",
        (Scheme::BackwardEuler, true) => "Backward Euler with Newton-Raphson Method",
        (Scheme::Trapezoidal, true) => "Trapezoidal (implicit Heun) with Newton-Raphson Method",
        (Scheme::Midpoint, true) => "MidPoint Implicit with Newton-Raphson Method",
    }
}
