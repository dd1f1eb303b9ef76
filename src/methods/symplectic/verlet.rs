//! Velocity-Verlet and kick-drift-kick leapfrog.

use crate::{
    Float,
    core::{drive::DriveFunction, workspace::Workspace},
    error::{Error, check_step_size},
};

use super::{GridMemo, Memo, Symplectic, accel, accel_grid, check_lengths};

/// Velocity-Verlet:
///
/// ```text
/// x1 = x + v dt + a(x) dt^2 / 2
/// v1 = v + (a(x) + a(x1)) dt / 2
/// ```
///
/// The end-of-step acceleration is cached, so chained calls cost a single
/// force evaluation.
pub struct VelocityVerlet<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    dt: Float,
    memo: Option<Memo>,
    grid: GridMemo,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> VelocityVerlet<'a, D> {
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

    /// Swaps step size and force law; cached accelerations are dropped.
    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.dt = dt;
        self.drive = drive;
        self.memo = None;
        self.grid.invalidate();
        Ok(())
    }
}

impl<D: DriveFunction + ?Sized> Symplectic for VelocityVerlet<'_, D> {
    fn name(&self) -> &'static str {
        "Velocity Verlet"
    }

    fn dt(&self) -> Float {
        self.dt
    }

    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error> {
        let dt = self.dt;
        let a0 = match Memo::lookup(&self.memo, x, t) {
            Some(m) => m.a,
            None => accel(self.drive, x, t, 1)?,
        };

        let x1 = x + v * dt + 0.5 * a0 * dt * dt;
        let a1 = accel(self.drive, x1, t + dt, 2)?;
        let v1 = v + 0.5 * (a0 + a1) * dt;

        self.memo = Some(Memo {
            x: x1,
            t: t + dt,
            a: a1,
            a_prev: a0,
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

        let bufs = self.work.prepare(3, n);
        let [a0, x1, a1] = bufs else {
            unreachable!("workspace holds exactly three buffers")
        };

        if self.grid.hit(xs, t) {
            a0.copy_from_slice(&self.grid.a);
        } else {
            accel_grid(self.drive, xs, a0, t, 1)?;
        }
        for i in 0..n {
            x1[i] = xs[i] + vs[i] * dt + 0.5 * a0[i] * dt * dt;
        }
        accel_grid(self.drive, x1, a1, t + dt, 2)?;

        for i in 0..n {
            vs[i] += 0.5 * (a0[i] + a1[i]) * dt;
        }
        xs.copy_from_slice(x1);
        self.grid.store(xs, t + dt, a1, a0);
        Ok(())
    }
}

/// Kick-drift-kick leapfrog:
///
/// ```text
/// v_half = v + a(x) dt / 2
/// x1     = x + v_half dt
/// v1     = v_half + a(x1) dt / 2
/// ```
///
/// Algebraically the same map as [`VelocityVerlet`], evaluated through the
/// half-step velocity.
pub struct Leapfrog<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    dt: Float,
    half_dt: Float,
    memo: Option<Memo>,
    grid: GridMemo,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> Leapfrog<'a, D> {
    pub fn new(dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        Ok(Self {
            drive,
            dt,
            half_dt: 0.5 * dt,
            memo: None,
            grid: GridMemo::default(),
            work: Workspace::new(),
        })
    }

    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.dt = dt;
        self.half_dt = 0.5 * dt;
        self.drive = drive;
        self.memo = None;
        self.grid.invalidate();
        Ok(())
    }
}

impl<D: DriveFunction + ?Sized> Symplectic for Leapfrog<'_, D> {
    fn name(&self) -> &'static str {
        "Leapfrog (kick-drift-kick)"
    }

    fn dt(&self) -> Float {
        self.dt
    }

    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error> {
        let a0 = match Memo::lookup(&self.memo, x, t) {
            Some(m) => m.a,
            None => accel(self.drive, x, t, 1)?,
        };

        let v_half = v + a0 * self.half_dt;
        let x1 = x + v_half * self.dt;
        let a1 = accel(self.drive, x1, t + self.dt, 2)?;
        let v1 = v_half + a1 * self.half_dt;

        self.memo = Some(Memo {
            x: x1,
            t: t + self.dt,
            a: a1,
            a_prev: a0,
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
        let (dt, half_dt) = (self.dt, self.half_dt);

        let bufs = self.work.prepare(4, n);
        let [a0, v_half, x1, a1] = bufs else {
            unreachable!("workspace holds exactly four buffers")
        };

        if self.grid.hit(xs, t) {
            a0.copy_from_slice(&self.grid.a);
        } else {
            accel_grid(self.drive, xs, a0, t, 1)?;
        }
        for i in 0..n {
            v_half[i] = vs[i] + a0[i] * half_dt;
            x1[i] = xs[i] + v_half[i] * dt;
        }
        accel_grid(self.drive, x1, a1, t + dt, 2)?;

        for i in 0..n {
            vs[i] = v_half[i] + a1[i] * half_dt;
        }
        xs.copy_from_slice(x1);
        self.grid.store(xs, t + dt, a1, a0);
        Ok(())
    }
}
