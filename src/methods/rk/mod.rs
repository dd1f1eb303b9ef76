//! Explicit Runge-Kutta steppers driven by fixed Butcher tableaus
//!
//! Every method is data: a [`Tableau`] of node fractions `c`, stage matrix
//! `a` and weights `b`. One driver, [`ExplicitRk`], evaluates any of them in
//! scalar or grid mode. The stage helpers here are shared with the embedded
//! adaptive pairs.

mod explicit;
mod tableau;

pub use explicit::ExplicitRk;
pub use tableau::{
    EULER, HEUN, HEUN3, KUTTA3, MIDPOINT, NYSTROM5, RALSTON2, RALSTON3, RALSTON4, RK4, RK38,
    SSPRK3, Tableau, WRAY3,
};

use crate::{Float, core::drive::DriveFunction, error::Error};

/// Largest stage count among the bundled tableaus.
pub(crate) const MAX_STAGES: usize = 7;

/// Node fractions and stage matrix multiplied through by `dt`.
#[derive(Clone, Debug)]
pub(crate) struct Scaled {
    pub dt: Float,
    pub dc: Vec<Float>,
    pub da: Vec<Vec<Float>>,
}

impl Scaled {
    pub fn new(c: &[Float], a: &[&[Float]], dt: Float) -> Self {
        Self {
            dt,
            dc: scale(c, dt),
            da: a.iter().map(|row| scale(row, dt)).collect(),
        }
    }
}

pub(crate) fn scale(v: &[Float], dt: Float) -> Vec<Float> {
    v.iter().map(|&w| w * dt).collect()
}

/// Fills `k[..s.dc.len()]` with the stage slopes at a scalar state.
pub(crate) fn scalar_stages<D>(
    drive: &D,
    s: &Scaled,
    x: Float,
    t: Float,
    k: &mut [Float],
) -> Result<(), Error>
where
    D: DriveFunction + ?Sized,
{
    for i in 0..s.dc.len() {
        let mut xi = x;
        for (j, &a) in s.da[i].iter().enumerate() {
            xi += a * k[j];
        }
        let ki = drive.evaluate_at_time(xi, t + s.dc[i]);
        if !ki.is_finite() {
            return Err(Error::InvalidDerivative { stage: i + 1 });
        }
        k[i] = ki;
    }
    Ok(())
}

/// Fills the stage buffers `k` over a grid; `xt` is scratch of grid length.
pub(crate) fn grid_stages<D>(
    drive: &D,
    s: &Scaled,
    xs: &[Float],
    t: Float,
    k: &mut [Vec<Float>],
    xt: &mut [Float],
) -> Result<(), Error>
where
    D: DriveFunction + ?Sized,
{
    let n = xs.len();
    for i in 0..s.dc.len() {
        let (done, todo) = k.split_at_mut(i);
        let ki = &mut todo[0];

        if i == 0 {
            drive.evaluate_on_grid_time_in_place(xs, ki, t);
        } else {
            xt.copy_from_slice(xs);
            for (j, &a) in s.da[i].iter().enumerate() {
                if a == 0.0 {
                    continue;
                }
                let kj = &done[j];
                for m in 0..n {
                    xt[m] += a * kj[m];
                }
            }
            drive.evaluate_on_grid_time_in_place(xt, ki, t + s.dc[i]);
        }

        if ki.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidDerivative { stage: i + 1 });
        }
    }
    Ok(())
}

/// Weighted increment `sum_i w_i k_i` for a scalar state.
pub(crate) fn combine(w: &[Float], k: &[Float]) -> Float {
    w.iter().zip(k).map(|(w, k)| w * k).sum()
}

/// Weighted increment for every grid element, written into `out`.
pub(crate) fn combine_grid(w: &[Float], k: &[Vec<Float>], out: &mut [Float]) {
    for (m, o) in out.iter_mut().enumerate() {
        let mut dx = 0.0;
        for (i, &wi) in w.iter().enumerate() {
            dx += wi * k[i][m];
        }
        *o = dx;
    }
}
