//! Newton-Raphson solution of the implicit schemes.

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

/// Implicit stepper solving `G(y) = y - corrector(y) = 0` by Newton iteration.
///
/// The Jacobian `G'(y) = 1 - w * f'(p)` is approximated with a forward
/// difference of width `settings.delta`, where `p` is the scheme's evaluation
/// point and `w` its slope weight. On a grid every element is independent, so
/// the Jacobian is diagonal and computed from one extra vectorized evaluation.
///
/// Failures, all leaving the state untouched:
/// - `|G'| < settings.singular_threshold`: [`Error::SingularJacobian`]. On a
///   grid a single singular element fails the whole step.
/// - a non-finite update: [`Error::InvalidIterate`].
/// - no convergence within `settings.max_iter`: [`Error::NotConverged`].
pub struct Newton<'a, D: DriveFunction + ?Sized> {
    drive: &'a D,
    formula: Formula,
    settings: Settings,
    work: Workspace,
}

impl<'a, D: DriveFunction + ?Sized> Newton<'a, D> {
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

impl<D: DriveFunction + ?Sized> Stepper for Newton<'_, D> {
    fn name(&self) -> &'static str {
        scheme_name(self.formula.scheme, true)
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
        let w = form.slope_weight();
        let Settings {
            tolerance,
            delta,
            max_iter,
            singular_threshold,
            ..
        } = self.settings;

        let fx = self.drive.evaluate_at_time(x, t);
        let mut y = x + form.dt * fx;

        for iter in 0..max_iter {
            let p = form.eval_point(x, y);
            let fy = self.drive.evaluate_at_time(p, te);
            let g = y - form.corrector(x, fx, fy);

            let fp = self.drive.evaluate_at_time(p + delta, te);
            let jac = 1.0 - w * (fp - fy) / delta;
            if jac.abs() < singular_threshold {
                log::debug!("{}: singular Jacobian {:e} at iteration {}", self.name(), jac, iter);
                return Err(Error::SingularJacobian {
                    iteration: iter,
                    jacobian: jac,
                });
            }

            let y_new = y - g / jac;
            if !y_new.is_finite() {
                log::debug!("{}: invalid iterate at iteration {}", self.name(), iter);
                return Err(Error::InvalidIterate(iter));
            }

            if (y_new - y).abs() < tolerance {
                log::trace!("{}: converged after {} iterations", self.name(), iter + 1);
                return Ok(Step::accepted(y_new));
            }
            y = y_new;
        }

        log::debug!(
            "{}: no convergence after {} iterations at t = {}",
            self.name(),
            max_iter,
            t
        );
        Err(Error::NotConverged(max_iter))
    }

    fn next_step_on_grid(&mut self, xs: &mut [Float], t: Float) -> Result<Outcome, Error> {
        let n = xs.len();
        let form = self.formula;
        let te = form.eval_time(t);
        let w = form.slope_weight();
        let name = scheme_name(form.scheme, true);
        let Settings {
            tolerance,
            delta,
            max_iter,
            singular_threshold,
            ..
        } = self.settings;

        let bufs = self.work.prepare(7, n);
        let [fx, y, p, fy, pp, fp, y_new] = bufs else {
            unreachable!("workspace holds exactly seven buffers")
        };

        self.drive.evaluate_on_grid_time_in_place(xs, fx, t);
        for i in 0..n {
            y[i] = xs[i] + form.dt * fx[i];
        }

        for iter in 0..max_iter {
            for i in 0..n {
                p[i] = form.eval_point(xs[i], y[i]);
                pp[i] = p[i] + delta;
            }
            self.drive.evaluate_on_grid_time_in_place(p, fy, te);
            self.drive.evaluate_on_grid_time_in_place(pp, fp, te);

            // Diagonal Jacobian, checked in full before any update
            for i in 0..n {
                let jac = 1.0 - w * (fp[i] - fy[i]) / delta;
                if jac.abs() < singular_threshold {
                    log::debug!(
                        "{}: singular Jacobian {:e} at element {}, iteration {}",
                        name,
                        jac,
                        i,
                        iter
                    );
                    return Err(Error::SingularJacobian {
                        iteration: iter,
                        jacobian: jac,
                    });
                }
                fp[i] = jac;
            }

            for i in 0..n {
                let g = y[i] - form.corrector(xs[i], fx[i], fy[i]);
                y_new[i] = y[i] - g / fp[i];
            }
            if y_new.iter().any(|v| !v.is_finite()) {
                log::debug!("{}: invalid iterate at iteration {}", name, iter);
                return Err(Error::InvalidIterate(iter));
            }

            if increment_norm(y_new, y) < tolerance {
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
            max_iter,
            t
        );
        Err(Error::NotConverged(max_iter))
    }
}
