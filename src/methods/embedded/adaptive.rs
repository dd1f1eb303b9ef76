//! Generic embedded-pair driver with accept/reject step-size control.

use crate::{
    Float,
    core::{
        drive::DriveFunction,
        stepper::{Outcome, Step, Stepper},
        workspace::Workspace,
    },
    error::{Error, check_step_size},
    methods::{
        rk::{MAX_STAGES, Scaled, combine, combine_grid, grid_stages, scale, scalar_stages},
        settings::Settings,
    },
};

use super::{EmbeddedTableau, Propagate};

/// Adaptive stepper for any [`EmbeddedTableau`].
///
/// One call makes one decision, it never loops:
/// - `E <= adaptive_tolerance`: the propagated solution is returned as
///   [`Outcome::Accepted`] and `dt` is kept for the next call.
/// - otherwise the input state comes back bit-identical as
///   [`Outcome::Rejected`] and `dt` becomes
///   `dt * min(safety * sqrt(tolerance / E), scale_max)`, floored at
///   `scale_min` only when that setting is given. With `scale_max < 1` the
///   new step is always strictly smaller.
///
/// # Example
///
/// ```
/// use odestep::prelude::*;
/// use odestep::methods::embedded::{Embedded, DORMAND_PRINCE};
///
/// let decay = |x: f64, _t: f64| -x;
/// let mut dp = Embedded::new(&DORMAND_PRINCE, 0.5, &decay).unwrap();
/// let x = loop {
///     let step = dp.next_step(1.0, 0.0).unwrap();
///     if step.is_accepted() {
///         break step.x;
///     }
/// };
/// assert!(dp.dt() < 0.5);
/// assert!((x - (-dp.dt()).exp()).abs() < 1e-9);
/// ```
pub struct Embedded<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    tableau: &'static EmbeddedTableau,
    propagate: Propagate,
    settings: Settings,
    coef: Coefficients,
    work: Workspace,
}

/// Everything derived from `dt`; replaced as a whole.
#[derive(Clone, Debug)]
struct Coefficients {
    scaled: Scaled,
    db_high: Vec<Float>,
    db_low: Vec<Float>,
}

impl Coefficients {
    fn new(tableau: &EmbeddedTableau, dt: Float) -> Self {
        Self {
            scaled: Scaled::new(tableau.c, tableau.a, dt),
            db_high: scale(tableau.b_high, dt),
            db_low: scale(tableau.b_low, dt),
        }
    }
}

impl<'a, D: DriveFunction + ?Sized> Embedded<'a, D> {
    pub fn new(tableau: &'static EmbeddedTableau, dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        if tableau.stages() > MAX_STAGES {
            return Err(Error::InvalidSetting {
                name: "stages",
                value: tableau.stages() as Float,
            });
        }
        Ok(Self {
            drive,
            tableau,
            propagate: tableau.propagate,
            settings: Settings::default(),
            coef: Coefficients::new(tableau, dt),
            work: Workspace::new(),
        })
    }

    pub fn with_settings(mut self, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Overrides which solution is propagated on acceptance.
    pub fn with_propagation(mut self, propagate: Propagate) -> Self {
        self.propagate = propagate;
        self
    }

    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.coef = Coefficients::new(self.tableau, dt);
        self.drive = drive;
        Ok(())
    }

    pub fn tableau(&self) -> &'static EmbeddedTableau {
        self.tableau
    }

    pub fn propagation(&self) -> Propagate {
        self.propagate
    }
}

/// Accept/reject on the error estimate `err`; a rejection replaces `coef`
/// with the shrunken step.
fn decide(
    settings: &Settings,
    tableau: &EmbeddedTableau,
    coef: &mut Coefficients,
    err: Float,
    t: Float,
) -> Result<Outcome, Error> {
    if err.is_nan() {
        return Err(Error::InvalidDerivative { stage: 0 });
    }
    if err <= settings.adaptive_tolerance {
        return Ok(Outcome::Accepted);
    }

    let dt = coef.scaled.dt;
    let mut fac = (settings.safety_factor * (settings.tolerance / err).sqrt())
        .min(settings.scale_max);
    if let Some(scale_min) = settings.scale_min {
        fac = fac.max(scale_min);
    }
    let dt_new = dt * fac;
    check_step_size(dt_new)?;

    log::debug!(
        "{}: step rejected at t = {} (E = {:e}), dt {:e} -> {:e}",
        tableau.name,
        t,
        err,
        dt,
        dt_new
    );
    *coef = Coefficients::new(tableau, dt_new);
    Ok(Outcome::Rejected)
}

impl<D: DriveFunction + ?Sized> Stepper for Embedded<'_, D> {
    fn name(&self) -> &'static str {
        self.tableau.name
    }

    fn dt(&self) -> Float {
        self.coef.scaled.dt
    }

    fn redefine_step(&mut self, dt: Float) -> Result<(), Error> {
        check_step_size(dt)?;
        self.coef = Coefficients::new(self.tableau, dt);
        Ok(())
    }

    fn next_step(&mut self, x: Float, t: Float) -> Result<Step, Error> {
        let mut k = [0.0; MAX_STAGES];
        scalar_stages(self.drive, &self.coef.scaled, x, t, &mut k)?;

        let dx_high = combine(&self.coef.db_high, &k);
        let dx_low = combine(&self.coef.db_low, &k);
        if !dx_high.is_finite() || !dx_low.is_finite() {
            return Err(Error::InvalidDerivative { stage: 0 });
        }
        let err = (dx_high - dx_low).abs() / self.coef.scaled.dt.abs();

        match decide(&self.settings, self.tableau, &mut self.coef, err, t)? {
            Outcome::Accepted => {
                let dx = match self.propagate {
                    Propagate::High => dx_high,
                    Propagate::Low => dx_low,
                };
                Ok(Step::accepted(x + dx))
            }
            Outcome::Rejected => Ok(Step::rejected(x)),
        }
    }

    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error> {
        let n = xs.len();
        let s = self.tableau.stages();
        let dt = self.coef.scaled.dt;

        let bufs = self.work.prepare(s + 3, n);
        let (k, rest) = bufs.split_at_mut(s);
        let [xt, dx_high, dx_low] = rest else {
            unreachable!("workspace holds three buffers past the stages")
        };

        grid_stages(self.drive, &self.coef.scaled, xs, t, k, xt)?;
        combine_grid(&self.coef.db_high, k, dx_high);
        combine_grid(&self.coef.db_low, k, dx_low);

        let mut err: Float = 0.0;
        for i in 0..n {
            if !dx_high[i].is_finite() || !dx_low[i].is_finite() {
                return Err(Error::InvalidDerivative { stage: 0 });
            }
            err = err.max((dx_high[i] - dx_low[i]).abs() / dt.abs());
        }

        let outcome = decide(&self.settings, self.tableau, &mut self.coef, err, t)?;
        if outcome == Outcome::Accepted {
            let dx = match self.propagate {
                Propagate::High => dx_high,
                Propagate::Low => dx_low,
            };
            for i in 0..n {
                xs[i] += dx[i];
            }
        }
        Ok(outcome)
    }
}
