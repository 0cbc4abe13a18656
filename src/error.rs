use glam::Vec2;
use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors reported by construction-time operations.
///
/// The per-step hot path never fails; these only surface while a simulation
/// is being set up or reconfigured.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// A scalar or count parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Bounds whose minimum corner is not strictly below-left of the maximum.
    #[error("invalid bounds: min {min} must be strictly below max {max} on both axes")]
    InvalidBounds { min: Vec2, max: Vec2 },

    /// A [`SimulationConfig`](crate::config::SimulationConfig) failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SimError {
    pub(crate) fn param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}

/// Returns an error unless `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::param(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}
