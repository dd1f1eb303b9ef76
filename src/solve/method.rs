//! Method selection by name.

use crate::{
    Float,
    core::{drive::DriveFunction, stepper::Stepper},
    error::Error,
    methods::{
        embedded::{self, Embedded, EmbeddedTableau},
        implicit::{FixedPoint, Newton, Scheme, scheme_name},
        rk::{self, ExplicitRk, Tableau},
        settings::Settings,
        symplectic::{Beeman, Leapfrog, StormerVerlet, Symplectic, VelocityVerlet, Yoshida4},
    },
};

/// Every [`Stepper`] for `dx/dt = f(x, t)` shipped with the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    // Explicit
    Euler,
    Heun,
    Midpoint,
    Ralston2,
    Heun3,
    Ralston3,
    Wray3,
    Ssprk3,
    Kutta3,
    RK4,
    RK38,
    Ralston4,
    Nystrom5,
    // Implicit, fixed-point iteration
    BackwardEulerFixedPoint,
    TrapezoidalFixedPoint,
    MidpointFixedPoint,
    // Implicit, Newton iteration
    BackwardEulerNewton,
    TrapezoidalNewton,
    MidpointNewton,
    // Adaptive embedded pairs
    HeunEuler,
    Fehlberg12,
    BogackiShampine,
    RKF45,
    CashKarp,
    DormandPrince,
}

enum Family {
    Explicit(&'static Tableau),
    FixedPoint(Scheme),
    Newton(Scheme),
    Embedded(&'static EmbeddedTableau),
}

impl Method {
    pub const ALL: [Method; 25] = [
        Method::Euler,
        Method::Heun,
        Method::Midpoint,
        Method::Ralston2,
        Method::Heun3,
        Method::Ralston3,
        Method::Wray3,
        Method::Ssprk3,
        Method::Kutta3,
        Method::RK4,
        Method::RK38,
        Method::Ralston4,
        Method::Nystrom5,
        Method::BackwardEulerFixedPoint,
        Method::TrapezoidalFixedPoint,
        Method::MidpointFixedPoint,
        Method::BackwardEulerNewton,
        Method::TrapezoidalNewton,
        Method::MidpointNewton,
        Method::HeunEuler,
        Method::Fehlberg12,
        Method::BogackiShampine,
        Method::RKF45,
        Method::CashKarp,
        Method::DormandPrince,
    ];

    fn family(self) -> Family {
        match self {
            Method::Euler => Family::Explicit(&rk::EULER),
            Method::Heun => Family::Explicit(&rk::HEUN),
            Method::Midpoint => Family::Explicit(&rk::MIDPOINT),
            Method::Ralston2 => Family::Explicit(&rk::RALSTON2),
            Method::Heun3 => Family::Explicit(&rk::HEUN3),
            Method::Ralston3 => Family::Explicit(&rk::RALSTON3),
            Method::Wray3 => Family::Explicit(&rk::WRAY3),
            Method::Ssprk3 => Family::Explicit(&rk::SSPRK3),
            Method::Kutta3 => Family::Explicit(&rk::KUTTA3),
            Method::RK4 => Family::Explicit(&rk::RK4),
            Method::RK38 => Family::Explicit(&rk::RK38),
            Method::Ralston4 => Family::Explicit(&rk::RALSTON4),
            Method::Nystrom5 => Family::Explicit(&rk::NYSTROM5),
            Method::BackwardEulerFixedPoint => Family::FixedPoint(Scheme::BackwardEuler),
            Method::TrapezoidalFixedPoint => Family::FixedPoint(Scheme::Trapezoidal),
            Method::MidpointFixedPoint => Family::FixedPoint(Scheme::Midpoint),
            Method::BackwardEulerNewton => Family::Newton(Scheme::BackwardEuler),
            Method::TrapezoidalNewton => Family::Newton(Scheme::Trapezoidal),
            Method::MidpointNewton => Family::Newton(Scheme::Midpoint),
            Method::HeunEuler => Family::Embedded(&embedded::HEUN_EULER),
            Method::Fehlberg12 => Family::Embedded(&embedded::FEHLBERG12),
            Method::BogackiShampine => Family::Embedded(&embedded::BOGACKI_SHAMPINE),
            Method::RKF45 => Family::Embedded(&embedded::FEHLBERG45),
            Method::CashKarp => Family::Embedded(&embedded::CASH_KARP),
            Method::DormandPrince => Family::Embedded(&embedded::DORMAND_PRINCE),
        }
    }

    /// Name reported by the built stepper.
    pub fn name(self) -> &'static str {
        match self.family() {
            Family::Explicit(t) => t.name,
            Family::FixedPoint(s) => scheme_name(s, false),
            Family::Newton(s) => scheme_name(s, true),
            Family::Embedded(t) => t.name,
        }
    }

    /// Whether the stepper may reject steps and change its own `dt`.
    pub fn is_adaptive(self) -> bool {
        matches!(self.family(), Family::Embedded(_))
    }

    /// Builds the stepper with default [`Settings`].
    pub fn build<'a, D>(self, dt: Float, drive: &'a D) -> Result<Box<dyn Stepper + 'a>, Error>
    where
        D: DriveFunction + ?Sized,
    {
        self.build_with_settings(dt, drive, Settings::default())
    }

    /// Builds the stepper; explicit methods have no tunables and ignore
    /// `settings` (it is still validated).
    pub fn build_with_settings<'a, D>(
        self,
        dt: Float,
        drive: &'a D,
        settings: Settings,
    ) -> Result<Box<dyn Stepper + 'a>, Error>
    where
        D: DriveFunction + ?Sized,
    {
        settings.validate()?;
        let stepper: Box<dyn Stepper + 'a> = match self.family() {
            Family::Explicit(t) => Box::new(ExplicitRk::new(t, dt, drive)?),
            Family::FixedPoint(s) => {
                Box::new(FixedPoint::new(s, dt, drive)?.with_settings(settings)?)
            }
            Family::Newton(s) => Box::new(Newton::new(s, dt, drive)?.with_settings(settings)?),
            Family::Embedded(t) => Box::new(Embedded::new(t, dt, drive)?.with_settings(settings)?),
        };
        Ok(stepper)
    }
}

/// Every symplectic integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymplecticMethod {
    /// Needs priming through [`Symplectic::initiate`] before stepping.
    StormerVerlet,
    VelocityVerlet,
    Leapfrog,
    Yoshida4,
    Beeman,
}

impl SymplecticMethod {
    pub const ALL: [SymplecticMethod; 5] = [
        SymplecticMethod::StormerVerlet,
        SymplecticMethod::VelocityVerlet,
        SymplecticMethod::Leapfrog,
        SymplecticMethod::Yoshida4,
        SymplecticMethod::Beeman,
    ];

    pub fn build<'a, D>(self, dt: Float, drive: &'a D) -> Result<Box<dyn Symplectic + 'a>, Error>
    where
        D: DriveFunction + ?Sized,
    {
        let integrator: Box<dyn Symplectic + 'a> = match self {
            SymplecticMethod::StormerVerlet => Box::new(StormerVerlet::new(dt, drive)?),
            SymplecticMethod::VelocityVerlet => Box::new(VelocityVerlet::new(dt, drive)?),
            SymplecticMethod::Leapfrog => Box::new(Leapfrog::new(dt, drive)?),
            SymplecticMethod::Yoshida4 => Box::new(Yoshida4::new(dt, drive)?),
            SymplecticMethod::Beeman => Box::new(Beeman::new(dt, drive)?),
        };
        Ok(integrator)
    }
}
