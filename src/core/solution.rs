//! A struct representing the outcome of marching a stepper to an end time.

use crate::{Float, core::status::Status};

/// Counters and final position of a [`march`](crate::solve::march) run.
///
/// The state itself is advanced in place by the caller's buffer.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The time reached
    pub t: Float,
    /// The step size held by the stepper at the end of the run
    pub dt: Float,
    /// The number of stepper calls
    pub nstep: usize,
    /// The number of accepted steps
    pub naccpt: usize,
    /// The number of rejected steps
    pub nrejct: usize,
    /// The status of the integration process
    pub status: Status,
}
