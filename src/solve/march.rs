//! Fixed-horizon driver: call a stepper until `t_end` is reached.

use crate::{
    Float,
    core::{
        solution::Solution,
        status::Status,
        stepper::{Outcome, Stepper},
    },
    error::Error,
};

/// Default ceiling on stepper calls in one run.
pub const NMAX: usize = 100_000;

/// Marches a scalar state from `t0` to `t_end`.
///
/// Rejected adaptive steps are retried with the stepper's shrunken `dt`.
/// The final step is stretched or clipped through
/// [`redefine_step`](Stepper::redefine_step) so the run lands exactly on
/// `t_end`; the stepper keeps that `dt` afterwards. Stops early with
/// [`Status::NeedLargerNmax`] after `nmax` calls. On `Err` the state holds
/// the last accepted value.
///
/// # Example
///
/// ```
/// use odestep::prelude::*;
///
/// let growth = |x: f64, _t: f64| x;
/// let mut stepper = Method::RK4.build(0.01, &growth).unwrap();
/// let mut x = 1.0;
/// let sol = march(&mut stepper, &mut x, 0.0, 1.0, 1000).unwrap();
/// assert_eq!(sol.status, Status::Success);
/// assert_eq!(sol.t, 1.0);
/// assert!((x - 1.0f64.exp()).abs() < 1e-9);
/// ```
pub fn march<S>(
    stepper: &mut S,
    x: &mut Float,
    t0: Float,
    t_end: Float,
    nmax: usize,
) -> Result<Solution, Error>
where
    S: Stepper + ?Sized,
{
    run(stepper, t0, t_end, nmax, |s, t| {
        let step = s.next_step(*x, t)?;
        if step.is_accepted() {
            *x = step.x;
        }
        Ok(step.outcome)
    })
}

/// Grid counterpart of [`march`]; `xs` is advanced in place.
pub fn march_on_grid<S>(
    stepper: &mut S,
    xs: &mut [Float],
    t0: Float,
    t_end: Float,
    nmax: usize,
) -> Result<Solution, Error>
where
    S: Stepper + ?Sized,
{
    run(stepper, t0, t_end, nmax, |s, t| s.next_step_on_grid(xs, t))
}

fn run<S, F>(
    stepper: &mut S,
    t0: Float,
    t_end: Float,
    nmax: usize,
    mut advance: F,
) -> Result<Solution, Error>
where
    S: Stepper + ?Sized,
    F: FnMut(&mut S, Float) -> Result<Outcome, Error>,
{
    // --- Input Validation ---
    let h = stepper.dt();
    let direction = (t_end - t0).signum();
    if t_end != t0 && h.signum() != direction {
        return Err(Error::InvalidStepSize(h));
    }

    // --- Declarations ---
    let mut t = t0;
    let mut nstep = 0;
    let mut naccpt = 0;
    let mut nrejct = 0;
    let mut status = Status::Success;

    // --- Main loop ---
    while (t_end - t) * direction > 0.0 {
        if nstep >= nmax {
            log::debug!(
                "{}: stopped at t = {} after {} calls",
                stepper.name(),
                t,
                nstep
            );
            status = Status::NeedLargerNmax;
            break;
        }

        // Land exactly on t_end
        let mut last = false;
        if (t + 1.01 * stepper.dt() - t_end) * direction > 0.0 {
            stepper.redefine_step(t_end - t)?;
            last = true;
        }
        let h = stepper.dt();

        let outcome = advance(stepper, t)?;
        nstep += 1;
        match outcome {
            Outcome::Accepted => {
                naccpt += 1;
                t = if last { t_end } else { t + h };
            }
            Outcome::Rejected => nrejct += 1,
        }
    }

    Ok(Solution {
        t,
        dt: stepper.dt(),
        nstep,
        naccpt,
        nrejct,
        status,
    })
}
