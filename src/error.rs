use thiserror::Error;

/// Rejected world configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f32),

    #[error("{field} must be non-negative and finite, got {value}")]
    InvalidConstant { field: &'static str, value: f32 },

    #[error("orbit altitude must be positive, got {0}")]
    InvalidOrbitAltitude(f32),

    #[error("{lower} ({lower_value}) must be below {upper} ({upper_value})")]
    ThresholdOrder {
        lower: &'static str,
        lower_value: f32,
        upper: &'static str,
        upper_value: f32,
    },
}
