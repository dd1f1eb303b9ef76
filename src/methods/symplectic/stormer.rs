//! Position-only Störmer-Verlet recurrence.

use crate::{
    Float,
    core::{drive::DriveFunction, workspace::Workspace},
    error::{Error, check_step_size},
};

use super::{Symplectic, accel, accel_grid, check_lengths};

/// Störmer-Verlet in its two-term form `x_next = 2x - x_prev + a(x) dt^2`.
///
/// The integrator keeps the previous position instead of a velocity, so it
/// has to be primed with [`initiate`](Symplectic::initiate) (or
/// [`initiate_on_grid`](Symplectic::initiate_on_grid)) before stepping;
/// otherwise calls fail with [`Error::NotInitiated`]. Scalar and grid
/// histories are independent.
///
/// Through the [`Symplectic`] trait the `v` argument is ignored and the
/// returned velocity is the second-order estimate
/// `(x_next - x) / dt + a(x) dt / 2`.
///
/// # Example
///
/// ```
/// use odestep::prelude::*;
/// use odestep::methods::symplectic::StormerVerlet;
///
/// let spring = Autonomous(|x: f64| -x);
/// let mut sv = StormerVerlet::new(0.01, &spring).unwrap();
/// sv.initiate(1.0, 0.0, 0.0).unwrap();
/// let mut x = 1.0;
/// for i in 0..100 {
///     x = sv.advance(x, i as f64 * 0.01).unwrap();
/// }
/// assert!((x - 1.0f64.cos()).abs() < 1e-4);
/// ```
pub struct StormerVerlet<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    dt: Float,
    dt2: Float,
    prev: Option<Float>,
    prev_grid: Option<Vec<Float>>,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> StormerVerlet<'a, D> {
    pub fn new(dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        Ok(Self {
            drive,
            dt,
            dt2: dt * dt,
            prev: None,
            prev_grid: None,
            work: Workspace::new(),
        })
    }

    /// Swaps step size and force law. The position history belongs to the
    /// old step size and is dropped.
    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.dt = dt;
        self.dt2 = dt * dt;
        self.drive = drive;
        self.prev = None;
        self.prev_grid = None;
        Ok(())
    }

    pub fn is_initiated(&self) -> bool {
        self.prev.is_some()
    }

    /// Advances the scalar recurrence from `x` at time `t`.
    pub fn advance(&mut self, x: Float, t: Float) -> Result<Float, Error> {
        let prev = self.prev.ok_or(Error::NotInitiated)?;
        let a = accel(self.drive, x, t, 1)?;
        let x_next = 2.0 * x - prev + a * self.dt2;
        self.prev = Some(x);
        Ok(x_next)
    }

    /// Advances the grid recurrence in place.
    pub fn advance_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<(), Error> {
        self.advance_grid(xs, t, None)
    }

    /// Shared grid step; with `vs` the velocity estimate is written too.
    fn advance_grid(
        &mut self,
        xs: &mut [Float],
        t: Float,
        vs: Option<&mut [Float]>,
    ) -> Result<(), Error> {
        let n = xs.len();
        let prev = match self.prev_grid.as_mut() {
            Some(prev) if prev.len() == n => prev,
            _ => return Err(Error::NotInitiated),
        };

        let bufs = self.work.prepare(2, n);
        let [a, x_next] = bufs else {
            unreachable!("workspace holds exactly two buffers")
        };
        accel_grid(self.drive, xs, a, t, 1)?;
        for i in 0..n {
            x_next[i] = 2.0 * xs[i] - prev[i] + a[i] * self.dt2;
        }

        if let Some(vs) = vs {
            for i in 0..n {
                vs[i] = (x_next[i] - xs[i]) / self.dt + 0.5 * a[i] * self.dt;
            }
        }
        prev.copy_from_slice(xs);
        xs.copy_from_slice(x_next);
        Ok(())
    }
}

impl<D: DriveFunction + ?Sized> Symplectic for StormerVerlet<'_, D> {
    fn name(&self) -> &'static str {
        "Stormer-Verlet"
    }

    fn dt(&self) -> Float {
        self.dt
    }

    /// Primes the scalar history with `x_prev = x0 - v0 dt + a(x0) dt^2 / 2`.
    fn initiate(&mut self, x0: Float, v0: Float, t: Float) -> Result<(), Error> {
        let a = accel(self.drive, x0, t, 1)?;
        self.prev = Some(x0 - v0 * self.dt + 0.5 * a * self.dt2);
        Ok(())
    }

    fn initiate_on_grid(&mut self, xs: &[Float], vs: &[Float], t: Float) -> Result<(), Error> {
        check_lengths(xs, vs)?;
        let mut a = vec![0.0; xs.len()];
        accel_grid(self.drive, xs, &mut a, t, 1)?;
        for i in 0..xs.len() {
            a[i] = xs[i] - vs[i] * self.dt + 0.5 * a[i] * self.dt2;
        }
        self.prev_grid = Some(a);
        Ok(())
    }

    fn next_step(&mut self, x: Float, _v: Float, t: Float) -> Result<(Float, Float), Error> {
        let prev = self.prev.ok_or(Error::NotInitiated)?;
        let a = accel(self.drive, x, t, 1)?;
        let x_next = 2.0 * x - prev + a * self.dt2;
        self.prev = Some(x);
        Ok((x_next, (x_next - x) / self.dt + 0.5 * a * self.dt))
    }

    fn next_step_on_grid(
        &mut self,
        xs: &mut [Float],
        vs: &mut [Float],
        t: Float,
    ) -> Result<(), Error> {
        check_lengths(xs, vs)?;
        self.advance_grid(xs, t, Some(vs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring(x: Float, _t: Float) -> Float {
        -x
    }

    #[test]
    fn must_be_initiated() {
        let mut sv = StormerVerlet::new(0.1, &spring).unwrap();
        assert_eq!(sv.advance(1.0, 0.0), Err(Error::NotInitiated));
        assert_eq!(sv.next_step(1.0, 0.0, 0.0), Err(Error::NotInitiated));

        // Scalar priming does not prime the grid
        sv.initiate(1.0, 0.0, 0.0).unwrap();
        assert!(sv.is_initiated());
        let mut xs = vec![1.0];
        assert_eq!(sv.advance_on_grid(&mut xs, 0.0), Err(Error::NotInitiated));
    }

    #[test]
    fn grid_length_change_needs_new_history() {
        let mut sv = StormerVerlet::new(0.1, &spring).unwrap();
        sv.initiate_on_grid(&[1.0, 2.0], &[0.0, 0.0], 0.0).unwrap();
        let mut xs = vec![1.0, 2.0, 3.0];
        assert_eq!(sv.advance_on_grid(&mut xs, 0.0), Err(Error::NotInitiated));
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn follows_harmonic_motion() {
        let dt = 0.01;
        let mut sv = StormerVerlet::new(dt, &spring).unwrap();
        sv.initiate(0.0, 1.0, 0.0).unwrap();
        let (mut x, mut v) = (0.0, 1.0);
        let mut t = 0.0;
        for _ in 0..314 {
            (x, v) = sv.next_step(x, v, t).unwrap();
            t += dt;
        }
        assert!((x - t.sin()).abs() < 1e-3);
        assert!((v - t.cos()).abs() < 1e-3);
    }

    #[test]
    fn grid_matches_scalar() {
        let dt = 0.05;
        let mut a = StormerVerlet::new(dt, &spring).unwrap();
        let mut b = StormerVerlet::new(dt, &spring).unwrap();
        a.initiate(0.7, -0.2, 0.0).unwrap();
        b.initiate_on_grid(&[0.7, 0.7], &[-0.2, -0.2], 0.0).unwrap();

        let mut x = 0.7;
        let (mut xs, mut vs) = (vec![0.7; 2], vec![0.0; 2]);
        for i in 0..50 {
            let t = i as Float * dt;
            let (xn, vn) = a.next_step(x, 0.0, t).unwrap();
            b.next_step_on_grid(&mut xs, &mut vs, t).unwrap();
            x = xn;
            assert!(xs.iter().all(|&v| v == xn));
            assert!(vs.iter().all(|&v| v == vn));
        }
    }

    #[test]
    fn invalid_force_keeps_history() {
        let cliff = |x: Float, _t: Float| if x > 1.0 { Float::INFINITY } else { -x };
        let mut sv = StormerVerlet::new(0.1, &cliff).unwrap();
        sv.initiate(0.5, 0.0, 0.0).unwrap();
        assert!(sv.advance(2.0, 0.0).is_err());
        // The failed call did not consume the history
        assert!(sv.advance(0.5, 0.0).is_ok());
    }
}
