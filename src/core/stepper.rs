//! The capability set shared by every one-step integrator.

use crate::{Float, error::Error};

/// Whether a call advanced the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The state was advanced by one step of the current `dt`.
    Accepted,
    /// The error estimate exceeded the budget: the state is returned
    /// untouched and the stepper's `dt` has been shrunk for the retry.
    Rejected,
}

/// Result of a scalar step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// New state on acceptance, the untouched input state on rejection.
    pub x: Float,
    pub outcome: Outcome,
}

impl Step {
    pub fn accepted(x: Float) -> Self {
        Self {
            x,
            outcome: Outcome::Accepted,
        }
    }

    pub fn rejected(x: Float) -> Self {
        Self {
            x,
            outcome: Outcome::Rejected,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }
}

/// One-step integrator for `dx/dt = f(x, t)`.
///
/// A stepper owns its step size and scratch buffers and borrows its
/// [`DriveFunction`](crate::core::drive::DriveFunction). Calls mutate the
/// stepper, so a single instance must not be driven concurrently; separate
/// instances are independent.
///
/// - Explicit and implicit steppers always report [`Outcome::Accepted`] on
///   success.
/// - Adaptive steppers may report [`Outcome::Rejected`]; the state is then
///   returned bit-identical and [`dt`](Stepper::dt) is strictly smaller, so
///   the caller simply calls again.
/// - On `Err` the state is untouched.
pub trait Stepper {
    /// Human readable method name.
    fn name(&self) -> &'static str;

    /// Step size that the next call will use.
    fn dt(&self) -> Float;

    /// Replaces the step size, recomputing every derived coefficient.
    fn redefine_step(&mut self, dt: Float) -> Result<(), Error>;

    /// Advances a scalar state from time `t`.
    fn next_step(&mut self, x: Float, t: Float) -> Result<Step, Error>;

    /// Advances every element of `xs` in place from the shared time `t`.
    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error>;
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn dt(&self) -> Float {
        (**self).dt()
    }

    fn redefine_step(&mut self, dt: Float) -> Result<(), Error> {
        (**self).redefine_step(dt)
    }

    fn next_step(&mut self, x: Float, t: Float) -> Result<Step, Error> {
        (**self).next_step(x, t)
    }

    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error> {
        (**self).next_step_on_grid(xs, t)
    }
}
