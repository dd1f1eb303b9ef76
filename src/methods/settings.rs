//! Settings for numerical integrators

use bon::Builder;

use crate::{Float, error::Error};

/// Convergence tolerance of implicit iterations and error budget used when
/// shrinking a rejected adaptive step.
pub const TOLERANCE: Float = 1e-7;
/// Adaptive acceptance threshold on the error estimate.
pub const ADAPTIVE_TOLERANCE: Float = 1e-8;
/// Finite-difference perturbation of the Newton Jacobian.
pub const DELTA: Float = 1e-6;
/// Implicit iteration ceiling.
pub const MAX_ITER: usize = 20;
/// Newton Jacobian magnitudes below this are treated as singular.
pub const SINGULAR_THRESHOLD: Float = 1e-10;

#[derive(Builder, Clone, Debug, PartialEq)]
/// Settings for the implicit and adaptive steppers. Explicit and symplectic
/// steppers carry none.
///
/// ```
/// use odestep::methods::settings::Settings;
///
/// let settings = Settings::builder().max_iter(50).tolerance(1e-9).build();
/// assert_eq!(settings.delta, 1e-6);
/// assert!(settings.validate().is_ok());
/// ```
pub struct Settings {
    /// Implicit convergence threshold on the increment norm; also the error
    /// budget in the adaptive shrink formula.
    #[builder(default = TOLERANCE)]
    pub tolerance: Float,
    /// Adaptive steps are accepted when the error estimate is `<=` this.
    #[builder(default = ADAPTIVE_TOLERANCE)]
    pub adaptive_tolerance: Float,
    /// Perturbation for the one-sided finite-difference Jacobian.
    #[builder(default = DELTA)]
    pub delta: Float,
    /// Max number of iterations in fixed-point and Newton solvers.
    #[builder(default = MAX_ITER)]
    pub max_iter: usize,
    /// Jacobian magnitude below which Newton gives up.
    #[builder(default = SINGULAR_THRESHOLD)]
    pub singular_threshold: Float,
    /// safety factor in step-size prediction.
    #[builder(default = 0.9)]
    pub safety_factor: Float,
    /// Optional floor on dt_new/dt_old after a rejection. Unset by default,
    /// so a large error estimate shrinks the step as far as the formula says.
    pub scale_min: Option<Float>,
    /// Cap on dt_new/dt_old after a rejection. Must stay below one so a
    /// rejection always shrinks the step.
    #[builder(default = 0.9)]
    pub scale_max: Float,
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Settings {
    /// Checks every tunable, returning the first offending one.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("tolerance", self.tolerance),
            ("adaptive_tolerance", self.adaptive_tolerance),
            ("delta", self.delta),
            ("singular_threshold", self.singular_threshold),
            ("safety_factor", self.safety_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(Error::InvalidSetting { name, value });
            }
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidSetting {
                name: "max_iter",
                value: 0.0,
            });
        }
        if let Some(scale_min) = self.scale_min {
            if !(scale_min > 0.0 && scale_min <= self.scale_max) {
                return Err(Error::InvalidSetting {
                    name: "scale_min",
                    value: scale_min,
                });
            }
        }
        if !(self.scale_max > 0.0 && self.scale_max < 1.0) {
            return Err(Error::InvalidSetting {
                name: "scale_max",
                value: self.scale_max,
            });
        }
        Ok(())
    }
}
