//! Yoshida's fourth-order composition.

use crate::{
    Float,
    core::{drive::DriveFunction, workspace::Workspace},
    error::{Error, check_step_size},
};

use super::{Symplectic, accel, accel_grid, check_lengths};

/// Drift and kick weights, derived from `2^(1/3)`.
#[derive(Clone, Copy, Debug)]
struct Weights {
    /// Drift fractions c1..c4
    c: [Float; 4],
    /// Kick fractions d1..d3
    d: [Float; 3],
}

impl Weights {
    fn new() -> Self {
        let cbrt2 = Float::cbrt(2.0);
        let w1 = 1.0 / (2.0 - cbrt2);
        let w0 = -cbrt2 / (2.0 - cbrt2);
        Self {
            c: [0.5 * w1, 0.5 * (w0 + w1), 0.5 * (w0 + w1), 0.5 * w1],
            d: [w1, w0, w1],
        }
    }
}

/// Fourth-order symplectic integrator built from three velocity-Verlet
/// substeps of lengths `w1 dt`, `w0 dt`, `w1 dt` (`w0` is negative):
///
/// ```text
/// for i in 1..=4:
///     x += c_i v dt
///     if i < 4: v += d_i a(x) dt
/// ```
///
/// Three force evaluations per step, at times `t + (c_1 + .. + c_i) dt`.
pub struct Yoshida4<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    dt: Float,
    weights: Weights,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> Yoshida4<'a, D> {
    pub fn new(dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        Ok(Self {
            drive,
            dt,
            weights: Weights::new(),
            work: Workspace::new(),
        })
    }

    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.dt = dt;
        self.drive = drive;
        Ok(())
    }
}

impl<D: DriveFunction + ?Sized> Symplectic for Yoshida4<'_, D> {
    fn name(&self) -> &'static str {
        "Yoshida 4th order"
    }

    fn dt(&self) -> Float {
        self.dt
    }

    fn next_step(&mut self, x: Float, v: Float, t: Float) -> Result<(Float, Float), Error> {
        let Weights { c, d } = self.weights;
        let dt = self.dt;
        let (mut x, mut v, mut tau) = (x, v, t);

        for i in 0..3 {
            x += c[i] * v * dt;
            tau += c[i] * dt;
            v += d[i] * accel(self.drive, x, tau, i + 1)? * dt;
        }
        x += c[3] * v * dt;
        Ok((x, v))
    }

    fn next_step_on_grid(
        &mut self,
        xs: &mut [Float],
        vs: &mut [Float],
        t: Float,
    ) -> Result<(), Error> {
        check_lengths(xs, vs)?;
        let n = xs.len();
        let Weights { c, d } = self.weights;
        let dt = self.dt;

        let bufs = self.work.prepare(3, n);
        let [x, v, a] = bufs else {
            unreachable!("workspace holds exactly three buffers")
        };
        x.copy_from_slice(xs);
        v.copy_from_slice(vs);

        let mut tau = t;
        for i in 0..3 {
            for m in 0..n {
                x[m] += c[i] * v[m] * dt;
            }
            tau += c[i] * dt;
            accel_grid(self.drive, x, a, tau, i + 1)?;
            for m in 0..n {
                v[m] += d[i] * a[m] * dt;
            }
        }
        for m in 0..n {
            x[m] += c[3] * v[m] * dt;
        }

        xs.copy_from_slice(x);
        vs.copy_from_slice(v);
        Ok(())
    }
}
