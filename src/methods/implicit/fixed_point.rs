//! Picard (fixed-point) solution of the implicit schemes.

use crate::{
    Float,
    core::{
        drive::DriveFunction,
        stepper::{Outcome, Step, Stepper},
        workspace::Workspace,
    },
    error::{Error, check_step_size},
    methods::settings::Settings,
};

use super::{Formula, Scheme, increment_norm, scheme_name};

/// Implicit stepper solved by plain substitution `y <- corrector(y)`.
///
/// No damping or relaxation is applied, so convergence needs the corrector
/// to be a contraction (roughly `dt * |f'| < 1`). Iteration stops when the
/// increment (absolute value in scalar mode, Euclidean norm over the grid)
/// drops below `settings.tolerance`; after `settings.max_iter` attempts the
/// call fails with [`Error::NotConverged`].
pub struct FixedPoint<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    formula: Formula,
    settings: Settings,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> FixedPoint<'a, D> {
    pub fn new(scheme: Scheme, dt: Float, drive: &'a D) -> Result<Self, Error> {
        check_step_size(dt)?;
        Ok(Self {
            drive,
            formula: Formula::new(scheme, dt),
            settings: Settings::default(),
            work: Workspace::new(),
        })
    }

    pub fn with_settings(mut self, settings: Settings) -> Result<Self, Error> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    pub fn redefine(&mut self, dt: Float, drive: &'a D) -> Result<(), Error> {
        check_step_size(dt)?;
        self.formula = Formula::new(self.formula.scheme, dt);
        self.drive = drive;
        Ok(())
    }

    pub fn scheme(&self) -> Scheme {
        self.formula.scheme
    }
}

impl<D: DriveFunction + ?Sized> Stepper for FixedPoint<'_, D> {
    fn name(&self) -> &'static str {
        scheme_name(self.formula.scheme, false)
    }

    fn dt(&self) -> Float {
        self.formula.dt
    }

    fn redefine_step(&mut self, dt: Float) -> Result<(), Error> {
        check_step_size(dt)?;
        self.formula = Formula::new(self.formula.scheme, dt);
        Ok(())
    }

    fn next_step(&mut self, x: Float, t: Float) -> Result<Step, Error> {
        let form = self.formula;
        let te = form.eval_time(t);

        let fx = self.drive.evaluate_at_time(x, t);
        let mut y = x + form.dt * fx;

        for iter in 0..self.settings.max_iter {
            let fy = self.drive.evaluate_at_time(form.eval_point(x, y), te);
            let y_new = form.corrector(x, fx, fy);

            if (y_new - y).abs() < self.settings.tolerance {
                log::trace!("{}: converged after {} iterations", self.name(), iter + 1);
                return Ok(Step::accepted(y_new));
            }
            y = y_new;
        }

        log::debug!(
            "{}: no convergence after {} iterations at t = {}",
            self.name(),
            self.settings.max_iter,
            t
        );
        Err(Error::NotConverged(self.settings.max_iter))
    }

    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error> {
        let n = xs.len();
        let form = self.formula;
        let te = form.eval_time(t);
        let name = scheme_name(form.scheme, false);

        let bufs = self.work.prepare(5, n);
        let [fx, y, ep, fy, y_new] = bufs else {
            unreachable!("workspace holds exactly five buffers")
        };

        // Explicit Euler predictor
        self.drive.evaluate_on_grid_time_in_place(xs, fx, t);
        for i in 0..n {
            y[i] = xs[i] + form.dt * fx[i];
        }

        for iter in 0..self.settings.max_iter {
            for i in 0..n {
                ep[i] = form.eval_point(xs[i], y[i]);
            }
            self.drive.evaluate_on_grid_time_in_place(ep, fy, te);
            for i in 0..n {
                y_new[i] = form.corrector(xs[i], fx[i], fy[i]);
            }

            if increment_norm(y_new, y) < self.settings.tolerance {
                log::trace!("{}: converged after {} iterations", name, iter + 1);
                xs.copy_from_slice(y_new);
                return Ok(Outcome::Accepted);
            }
            std::mem::swap(y, y_new);
        }

        log::debug!(
            "{}: grid of {} points did not converge after {} iterations at t = {}",
            name,
            n,
            self.settings.max_iter,
            t
        );
        Err(Error::NotConverged(self.settings.max_iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decay(x: Float, _t: Float) -> Float {
        -x
    }

    #[test]
    fn backward_euler_matches_closed_form() {
        // x_{n+1} = x_n / (1 + dt) for dx/dt = -x
        let mut be = FixedPoint::new(Scheme::BackwardEuler, 0.1, &decay).unwrap();
        let step = be.next_step(1.0, 0.0).unwrap();
        assert!((step.x - 1.0 / 1.1).abs() < 1e-7);
    }

    #[test]
    fn trapezoidal_matches_closed_form() {
        // x_{n+1} = x_n (1 - dt/2) / (1 + dt/2)
        let mut tr = FixedPoint::new(Scheme::Trapezoidal, 0.1, &decay).unwrap();
        let step = tr.next_step(2.0, 0.0).unwrap();
        assert!((step.x - 2.0 * 0.95 / 1.05).abs() < 1e-7);

        let mut xs = vec![2.0, 1.0];
        tr.next_step_on_grid(&mut xs, 0.0).unwrap();
        assert!((xs[0] - 2.0 * 0.95 / 1.05).abs() < 1e-7);
        assert!((xs[1] - 0.95 / 1.05).abs() < 1e-7);
    }

    #[test]
    fn midpoint_matches_trapezoidal_on_linear_problem() {
        let mut mid = FixedPoint::new(Scheme::Midpoint, 0.1, &decay).unwrap();
        let step = mid.next_step(1.0, 0.0).unwrap();
        assert!((step.x - 0.95 / 1.05).abs() < 1e-7);
    }

    #[test]
    fn stiff_problem_does_not_converge() {
        // dt * |f'| = 5, substitution diverges
        let stiff = |x: Float, _t: Float| -50.0 * x;
        let mut be = FixedPoint::new(Scheme::BackwardEuler, 0.1, &stiff).unwrap();
        assert_eq!(be.next_step(1.0, 0.0), Err(Error::NotConverged(20)));

        let mut xs = vec![1.0, -1.0];
        assert_eq!(be.next_step_on_grid(&mut xs, 0.0), Err(Error::NotConverged(20)));
        assert_eq!(xs, vec![1.0, -1.0]);
    }

    #[test]
    fn iteration_ceiling_comes_from_settings() {
        let stiff = |x: Float, _t: Float| -50.0 * x;
        let mut be = FixedPoint::new(Scheme::BackwardEuler, 0.1, &stiff)
            .unwrap()
            .with_settings(Settings::builder().max_iter(3).build())
            .unwrap();
        assert_eq!(be.next_step(1.0, 0.0), Err(Error::NotConverged(3)));
    }
}
