//! Symplectic integrators for `x'' = a(x, t)`
//!
//! The [`DriveFunction`] is read as a force law returning the acceleration.
//! All integrators here are explicit and run at a fixed `dt`; position and
//! velocity advance together, scalar or over a grid of independent
//! particles.
//!
//! | integrator        | order | force evaluations per step |
//! |-------------------|-------|----------------------------|
//! | [`StormerVerlet`] | 2     | 1                          |
//! | [`VelocityVerlet`]| 2     | 1 when chained, else 2     |
//! | [`Leapfrog`]      | 2     | 1 when chained, else 2     |
//! | [`Yoshida4`]      | 4     | 3                          |
//! | [`Beeman`]        | 3     | 1 when chained, else 2     |
//!
//! "Chained" means the call starts exactly where the previous one ended:
//! same positions (bitwise) and `t` equal to the previous `t + dt`.

mod beeman;
mod stormer;
mod verlet;
mod yoshida;

pub use beeman::Beeman;
pub use stormer::StormerVerlet;
pub use verlet::{Leapfrog, VelocityVerlet};
pub use yoshida::Yoshida4;

use crate::{Float, core::drive::DriveFunction, error::Error};

/// Position/velocity stepper.
pub trait Symplectic {
    fn name(&self) -> &'static str;

    fn dt(&self) -> Float;

    /// Primes an integrator that carries position history from the initial
    /// `(x0, v0)` at time `t`. Integrators without history need no priming
    /// and accept the call as a no-op.
    fn initiate(&mut self, _x0: Float, _v0: Float, _t: Float) -> Result<(), Error> {
        Ok(())
    }

    /// Grid counterpart of [`initiate`](Symplectic::initiate).
    fn initiate_on_grid(&mut self, xs: &[Float], vs: &[Float], _t: Float) -> Result<(), Error> {
        check_lengths(xs, vs)
    }

    /// Advances `(x, v)` from time `t`, returning the new pair.
    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error>;

    /// Advances every `(xs[i], vs[i])` pair in place from time `t`.
    fn next_step_on_grid(
        &mut self,
        xs: &mut [Float],
        vs: &mut [Float],
        t: Float,
    ) -> Result<(), Error>;
}

impl<S: Symplectic + ?Sized> Symplectic for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn dt(&self) -> Float {
        (**self).dt()
    }

    fn initiate(&mut self, x0: Float, v0: Float, t: Float) -> Result<(), Error> {
        (**self).initiate(x0, v0, t)
    }

    fn initiate_on_grid(&mut self, xs: &[Float], vs: &[Float], t: Float) -> Result<(), Error> {
        (**self).initiate_on_grid(xs, vs, t)
    }

    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error> {
        (**self).next_step(x, v, t)
    }

    fn next_step_on_grid(
        &mut self,
        xs: &mut [Float],
        vs: &mut [Float],
        t: Float,
    ) -> Result<(), Error> {
        (**self).next_step_on_grid(xs, vs, t)
    }
}

pub(crate) fn check_lengths(xs: &[Float], vs: &[Float]) -> Result<(), Error> {
    if xs.len() != vs.len() {
        return Err(Error::LengthMismatch(xs.len(), vs.len()));
    }
    Ok(())
}

/// Acceleration at a scalar position; `stage` numbers the evaluation
/// within the step for error reporting.
pub(crate) fn accel<D>(drive: &D, x: Float, t: Float, stage: usize) -> Result<Float, Error>
where
    D: DriveFunction + ?Sized,
{
    let a = drive.evaluate_at_time(x, t);
    if !a.is_finite() {
        return Err(Error::InvalidDerivative { stage });
    }
    Ok(a)
}

pub(crate) fn accel_grid<D>(
    drive: &D,
    xs: &[Float],
    out: &mut [Float],
    t: Float,
    stage: usize,
) -> Result<(), Error>
where
    D: DriveFunction + ?Sized,
{
    drive.evaluate_on_grid_time_in_place(xs, out, t);
    if out.iter().any(|a| !a.is_finite()) {
        return Err(Error::InvalidDerivative { stage });
    }
    Ok(())
}

/// End-of-step accelerations of a scalar integrator.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Memo {
    pub x: Float,
    pub t: Float,
    pub a: Float,
    /// Acceleration one step earlier (Beeman only).
    pub a_prev: Float,
}

impl Memo {
    pub fn lookup(memo: &Option<Memo>, x: Float, t: Float) -> Option<Memo> {
        memo.filter(|m| m.x.to_bits() == x.to_bits() && same_time(m.t, t))
    }
}

/// Times equal up to the rounding of `t + dt` against `t0 + i * dt`.
fn same_time(a: Float, b: Float) -> bool {
    (a - b).abs() <= 8.0 * Float::EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Grid counterpart of [`Memo`].
#[derive(Clone, Debug, Default)]
pub(crate) struct GridMemo {
    valid: bool,
    t: Float,
    xs: Vec<Float>,
    pub a: Vec<Float>,
    pub a_prev: Vec<Float>,
}

impl GridMemo {
    pub fn hit(&self, xs: &[Float], t: Float) -> bool {
        self.valid
            && same_time(self.t, t)
            && self.xs.len() == xs.len()
            && self.xs.iter().zip(xs).all(|(a, b)| a.to_bits() == b.to_bits())
    }

    pub fn store(&mut self, xs: &[Float], t: Float, a: &[Float], a_prev: &[Float]) {
        self.xs.clear();
        self.xs.extend_from_slice(xs);
        self.a.clear();
        self.a.extend_from_slice(a);
        self.a_prev.clear();
        self.a_prev.extend_from_slice(a_prev);
        self.t = t;
        self.valid = true;
    }

    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_matches_bitwise() {
        let memo = Some(Memo {
            x: 0.1,
            t: 1.0,
            a: -0.1,
            a_prev: 0.0,
        });
        assert!(Memo::lookup(&memo, 0.1, 1.0).is_some());
        assert!(Memo::lookup(&memo, 0.10000000001, 1.0).is_none());
        assert!(Memo::lookup(&memo, 0.1, 1.5).is_none());
        assert!(Memo::lookup(&memo, 0.1, 0.9 + 0.1).is_some());
        assert!(Memo::lookup(&None, 0.1, 1.0).is_none());
    }

    #[test]
    fn grid_memo_tracks_shape() {
        let mut memo = GridMemo::default();
        assert!(!memo.hit(&[], 0.0));
        memo.store(&[1.0, 2.0], 0.5, &[3.0, 4.0], &[0.0, 0.0]);
        assert!(memo.hit(&[1.0, 2.0], 0.5));
        assert!(!memo.hit(&[1.0], 0.5));
        memo.invalidate();
        assert!(!memo.hit(&[1.0, 2.0], 0.5));
    }

    #[test]
    fn length_check() {
        assert!(check_lengths(&[1.0], &[2.0]).is_ok());
        assert_eq!(
            check_lengths(&[1.0, 2.0], &[2.0]),
            Err(Error::LengthMismatch(2, 1))
        );
    }
}
