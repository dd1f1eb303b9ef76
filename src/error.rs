//! Errors for integration methods

use crate::Float;

/// Failures reported by the steppers.
///
/// On every variant the caller's state is left exactly as it was passed in.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The step size is zero, NaN or infinite, or points away from the
    /// requested end time.
    #[error("step size must be finite and nonzero (got {0})")]
    InvalidStepSize(Float),
    /// A stage slope (or an acceleration) evaluated to NaN or Inf.
    #[error("invalid derivative: NaN or Inf encountered at stage {stage}")]
    InvalidDerivative { stage: usize },
    /// Implicit iteration exhausted its budget.
    #[error("implicit step did not converge after {0} iterations")]
    NotConverged(usize),
    /// Newton Jacobian magnitude dropped below the singularity threshold.
    #[error("singular Jacobian at iteration {iteration} (|J| = {jacobian:e})")]
    SingularJacobian { iteration: usize, jacobian: Float },
    /// Newton update produced NaN or Inf.
    #[error("newton iteration produced invalid value at iteration {0}")]
    InvalidIterate(usize),
    /// Störmer-Verlet was stepped without a primed position history.
    #[error("position history is not primed; call initiate first")]
    NotInitiated,
    /// Position and velocity grids have different lengths.
    #[error("position and velocity grids differ in length ({0} vs {1})")]
    LengthMismatch(usize, usize),
    /// A tunable in [`Settings`](crate::methods::settings::Settings) is out of range.
    #[error("{name} out of range (got {value})")]
    InvalidSetting { name: &'static str, value: Float },
}

/// Rejects step sizes that are zero or not finite.
pub(crate) fn check_step_size(dt: Float) -> Result<(), Error> {
    if dt == 0.0 || !dt.is_finite() {
        return Err(Error::InvalidStepSize(dt));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_size_validation() {
        assert!(check_step_size(0.1).is_ok());
        assert!(check_step_size(-0.1).is_ok());
        assert_eq!(check_step_size(0.0), Err(Error::InvalidStepSize(0.0)));
        assert!(matches!(
            check_step_size(Float::NAN),
            Err(Error::InvalidStepSize(_))
        ));
        assert!(check_step_size(Float::INFINITY).is_err());
    }

    #[test]
    fn messages_name_the_failure() {
        let e = Error::NotConverged(20);
        assert_eq!(e.to_string(), "implicit step did not converge after 20 iterations");
        let e = Error::SingularJacobian {
            iteration: 0,
            jacobian: 0.0,
        };
        assert!(e.to_string().starts_with("singular Jacobian at iteration 0"));
    }
}
