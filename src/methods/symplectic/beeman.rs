//! Beeman's predictor with a three-term velocity update.

use crate::{
    Float,
    core::{drive::DriveFunction, workspace::Workspace},
    error::{Error, check_step_size},
};

use super::{GridMemo, Memo, Symplectic, accel, accel_grid, check_lengths};

/// Beeman's method:
///
/// ```text
/// x1 = x + v dt + (4 a - a_prev) dt^2 / 6
/// v1 = v + (2 a(x1) + 5 a - a_prev) dt / 6
/// ```
///
/// `a_prev` is the acceleration one step back. It is remembered across
/// chained calls; a call that does not continue the previous one starts
/// with `a_prev = a`.
pub struct Beeman<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    dt: Float,
    memo: Option<Memo>,
    grid: GridMemo,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> Beeman<'a, D> {
    pub fn new(dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        Ok(Self {
            drive,
            dt,
            memo: None,
            grid: GridMemo::default(),
            work: Workspace::new(),
        })
    }

    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.dt = dt;
        self.drive = drive;
        self.memo = None;
        self.grid.invalidate();
        Ok(())
    }
}

impl<D: DriveFunction + ?Sized> Symplectic for Beeman<'_, D> {
    fn name(&self) -> &'static str {
        "Beeman"
    }

    fn dt(&self) -> Float {
        self.dt
    }

    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error> {
        let dt = self.dt;
        let (a, a_prev) = match Memo::lookup(&self.memo, x, t) {
            Some(m) => (m.a, m.a_prev),
            None => {
                let a = accel(self.drive, x, t, 1)?;
                (a, a)
            }
        };

        let x1 = x + v * dt + (4.0 * a - a_prev) * dt * dt / 6.0;
        let a1 = accel(self.drive, x1, t + dt, 2)?;
        let v1 = v + (2.0 * a1 + 5.0 * a - a_prev) * dt / 6.0;

        self.memo = Some(Memo {
            x: x1,
            t: t + dt,
            a: a1,
            a_prev: a,
        });
        Ok((x1, v1))
    }

    fn next_step_on_grid(
        &mut self,
        xs: &mut [Float],
        vs: &mut [Float],
        t: Float,
    ) -> Result<(), Error> {
        check_lengths(xs, vs)?;
        let n = xs.len();
        let dt = self.dt;

        let bufs = self.work.prepare(4, n);
        let [a, a_prev, x1, a1] = bufs else {
            unreachable!("workspace holds exactly four buffers")
        };

        if self.grid.hit(xs, t) {
            a.copy_from_slice(&self.grid.a);
            a_prev.copy_from_slice(&self.grid.a_prev);
        } else {
            accel_grid(self.drive, xs, a, t, 1)?;
            a_prev.copy_from_slice(a);
        }

        for i in 0..n {
            x1[i] = xs[i] + vs[i] * dt + (4.0 * a[i] - a_prev[i]) * dt * dt / 6.0;
        }
        accel_grid(self.drive, x1, a1, t + dt, 2)?;

        for i in 0..n {
            vs[i] += (2.0 * a1[i] + 5.0 * a[i] - a_prev[i]) * dt / 6.0;
        }
        xs.copy_from_slice(x1);
        self.grid.store(xs, t + dt, a1, a);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spring(x: Float, _t: Float) -> Float {
        -x
    }

    #[test]
    fn first_step_is_velocity_verlet_like() {
        // With a_prev = a the position update is the Verlet one
        let mut bm = Beeman::new(0.1, &spring).unwrap();
        let (x1, _) = bm.next_step(1.0, 0.0, 0.0).unwrap();
        assert!((x1 - (1.0 - 0.5 * 0.01)).abs() < 1e-15);
    }

    #[test]
    fn tracks_harmonic_motion() {
        let dt = 0.01;
        let mut bm = Beeman::new(dt, &spring).unwrap();
        let (mut x, mut v, mut t) = (1.0, 0.0, 0.0);
        for _ in 0..628 {
            (x, v) = bm.next_step(x, v, t).unwrap();
            t += dt;
        }
        assert!((x - t.cos()).abs() < 5e-4);
        assert!((v + t.sin()).abs() < 5e-4);
        assert!((0.5 * (x * x + v * v) - 0.5).abs() < 5e-4);
    }

    #[test]
    fn grid_matches_scalar() {
        let mut a = Beeman::new(0.05, &spring).unwrap();
        let mut b = Beeman::new(0.05, &spring).unwrap();
        let (mut xs, mut vs) = (vec![0.2; 2], vec![1.0; 2]);
        let (mut x, mut v, mut t) = (0.2, 1.0, 0.0);
        for _ in 0..40 {
            (x, v) = a.next_step(x, v, t).unwrap();
            b.next_step_on_grid(&mut xs, &mut vs, t).unwrap();
            t += 0.05;
        }
        assert!(xs.iter().all(|&e| e == x));
        assert!(vs.iter().all(|&e| e == v));
    }

    #[test]
    fn mismatched_grids_are_rejected() {
        let mut bm = Beeman::new(0.05, &spring).unwrap();
        let (mut xs, mut vs) = (vec![0.0; 2], vec![0.0; 4]);
        assert_eq!(
            bm.next_step_on_grid(&mut xs, &mut vs, 0.0),
            Err(Error::LengthMismatch(2, 4))
        );
    }
}
