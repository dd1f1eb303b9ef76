//! Generic explicit Runge-Kutta stepper.

use crate::{
    Float,
    core::{
        drive::DriveFunction,
        stepper::{Outcome, Step, Stepper},
        workspace::Workspace,
    },
    error::{Error, check_step_size},
};

use super::{MAX_STAGES, Scaled, Tableau, combine, combine_grid, grid_stages, scalar_stages};

/// Explicit Runge-Kutta stepper for any [`Tableau`].
///
/// Each call evaluates the stage slopes `k1..ks`, checks every one of them for
/// NaN/Inf and only then applies `x += dt * sum(b_i k_i)`. A failing call
/// returns [`Error::InvalidDerivative`] with the state untouched.
///
/// # Example
///
/// ```
/// use odestep::prelude::*;
/// use odestep::methods::rk::{ExplicitRk, RK4};
///
/// let growth = |x: f64, _t: f64| x;
/// let mut rk4 = ExplicitRk::new(&RK4, 0.1, &growth).unwrap();
/// let step = rk4.next_step(1.0, 0.0).unwrap();
/// assert!((step.x - 0.1f64.exp()).abs() < 1e-6);
/// ```
pub struct ExplicitRk<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    tableau: &'static Tableau,
    coef: Coefficients,
    work: Workspace,
}

/// Everything derived from `dt`; rebuilt as a whole on redefinition.
#[derive(Clone, Debug)]
struct Coefficients {
    scaled: Scaled,
    db: Vec<Float>,
}

impl Coefficients {
    fn new(tableau: &Tableau, dt: Float) -> Self {
        Self {
            scaled: Scaled::new(tableau.c, tableau.a, dt),
            db: super::scale(tableau.b, dt),
        }
    }
}

impl<'a, D: DriveFunction + ?Sized> ExplicitRk<'a, D> {
    pub fn new(tableau: &'static Tableau, dt: Float, drive: &'a D) -> Result<Self, Error> {
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
            coef: Coefficients::new(tableau, dt),
            work: Workspace::new(),
        })
    }

    /// Replaces the step size and drive function.
    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.coef = Coefficients::new(self.tableau, dt);
        self.drive = drive;
        Ok(())
    }

    pub fn tableau(&self) -> &'static Tableau {
        self.tableau
    }
}

impl<D: DriveFunction + ?Sized> Stepper for ExplicitRk<'_, D> {
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

        let dx = combine(&self.coef.db, &k);
        if !dx.is_finite() {
            return Err(Error::InvalidDerivative { stage: 0 });
        }
        Ok(Step::accepted(x + dx))
    }

    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error> {
        let n = xs.len();
        let s = self.tableau.stages();

        // Stage buffers followed by the stage state and the increment
        let bufs = self.work.prepare(s + 2, n);
        let (k, rest) = bufs.split_at_mut(s);
        let (xt, dx) = rest.split_at_mut(1);
        let (xt, dx) = (&mut xt[0], &mut dx[0]);

        grid_stages(self.drive, &self.coef.scaled, xs, t, k, xt)?;
        combine_grid(&self.coef.db, k, dx);
        if dx.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidDerivative { stage: 0 });
        }

        for i in 0..n {
            xs[i] += dx[i];
        }
        Ok(Outcome::Accepted)
    }
}
