//! User-supplied right-hand side `dx/dt = f(x, t)`.

use crate::Float;

/// Right-hand side of the equation being integrated.
///
/// Implement this trait for your problem to provide `f(x, t)`. Steppers only
/// ever hold a shared reference and call it repeatedly, sometimes several
/// times at the same point inside implicit iterations, so evaluation must be
/// free of side effects.
///
/// Only [`evaluate_at_time`](DriveFunction::evaluate_at_time) is required. The
/// grid variants default to a pointwise loop; override
/// [`evaluate_on_grid_time_in_place`](DriveFunction::evaluate_on_grid_time_in_place)
/// when a vectorized kernel is available. Every element of a grid is an
/// independent state sharing the time `t`.
///
/// # Example
///
/// ```
/// use odestep::prelude::*;
///
/// struct Decay {
///     rate: f64,
/// }
///
/// impl DriveFunction for Decay {
///     fn evaluate_at_time(&self, x: f64, _t: f64) -> f64 {
///         -self.rate * x
///     }
/// }
///
/// let decay = Decay { rate: 2.0 };
/// assert_eq!(decay.evaluate_on_grid_time(&[1.0, 2.0], 0.0), vec![-2.0, -4.0]);
/// ```
pub trait DriveFunction {
    /// Pointwise evaluation `f(x, t)`.
    fn evaluate_at_time(&self, x: Float, t: Float) -> Float;

    /// Evaluates `f` over `xs` at time `t`, writing into `out`.
    ///
    /// `out.len() == xs.len()` is expected; no allocation takes place. `out`
    /// may hold stale values from a previous call, every element is
    /// overwritten.
    fn evaluate_on_grid_time_in_place(&self, xs: &[Float], out: &mut [Float], t: Float) {
        debug_assert_eq!(xs.len(), out.len());
        for (o, &x) in out.iter_mut().zip(xs) {
            *o = self.evaluate_at_time(x, t);
        }
    }

    /// Allocating variant of
    /// [`evaluate_on_grid_time_in_place`](DriveFunction::evaluate_on_grid_time_in_place).
    fn evaluate_on_grid_time(&self, xs: &[Float], t: Float) -> Vec<Float> {
        let mut out = vec![0.0; xs.len()];
        self.evaluate_on_grid_time_in_place(xs, &mut out, t);
        out
    }
}

impl<F> DriveFunction for F
where
    F: Fn(Float, Float) -> Float,
{
    fn evaluate_at_time(&self, x: Float, t: Float) -> Float {
        self(x, t)
    }
}

/// Adapter for time-independent laws such as a potential gradient or a
/// force `F(x)`; the time argument is ignored.
///
/// ```
/// use odestep::prelude::*;
///
/// let spring = Autonomous(|x: f64| -4.0 * x);
/// assert_eq!(spring.evaluate_at_time(0.5, 123.0), -2.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Autonomous<F>(pub F);

impl<F> DriveFunction for Autonomous<F>
where
    F: Fn(Float) -> Float,
{
    fn evaluate_at_time(&self, x: Float, _t: Float) -> Float {
        (self.0)(x)
    }
}
