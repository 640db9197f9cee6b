/// Errors raised while validating tuning configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },

    #[error("max_jump_force ({max}) is below min_jump_force ({min})")]
    InvertedJumpRange { min: f32, max: f32 },

    #[error("pitch range {low}..{high} is inverted")]
    InvertedPitchRange { low: f32, high: f32 },

    #[error("launch sound pool is empty")]
    EmptySoundPool,
}

impl ConfigError {
    /// Check that `value` is finite, reporting `field` otherwise
    pub fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NotFinite { field, value })
        }
    }

    /// Check that `value` is finite and strictly positive
    pub fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
        Self::check_finite(field, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NotPositive { field, value })
        }
    }
}
