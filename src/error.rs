use thiserror::Error;

/// Failure modes of the Laplace-space models and the inversion engine.
///
/// Domain and instability failures mark a rejected trial: the fitting
/// application discards the parameter vector and continues with another.
/// Configuration failures are fatal at setup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WellTestError {
    /// A physical parameter is outside its admissible range.
    #[error("parameter {name} = {value} is outside its physical range")]
    NonPhysicalParameter { name: &'static str, value: f64 },

    /// The Laplace-space response is not finite at this node, e.g. the
    /// outer boundary degenerates onto the effective wellbore radius.
    #[error("Laplace-space response is not finite at u = {u}")]
    DegenerateResponse { u: f64 },

    /// The Stehfest order is odd or outside the supported range.
    #[error("Stehfest order {n} is invalid: {reason}")]
    StehfestOrder { n: usize, reason: &'static str },

    /// The weight vector does not match the configured Stehfest order.
    #[error("expected {expected} Stehfest weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    /// The inversion sum lost significance or diverged.
    #[error("Laplace inversion produced a non-finite sum at t = {t}")]
    InversionDiverged { t: f64 },
}

impl WellTestError {
    /// Whether this error is a setup problem rather than a rejected trial.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            WellTestError::StehfestOrder { .. } | WellTestError::WeightCount { .. }
        )
    }
}

/// Surface a non-finite Laplace-space value as a domain failure instead of
/// letting it masquerade as a usable number.
pub(crate) fn ensure_finite(value: f64, u: f64) -> Result<f64, WellTestError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WellTestError::DegenerateResponse { u })
    }
}
