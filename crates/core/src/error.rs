use thiserror::Error;

/// Errors raised by the scaling and classification functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("invalid unit {0:?}: expected \"percent\" or \"pixel\"")]
    InvalidUnit(String),
    #[error("invalid dimension {0}: width must be a non-negative number")]
    InvalidDimension(f64),
}

/// Errors raised while loading or validating a [`ScaleConfig`](crate::ScaleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be a finite positive number, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("breakpoint table is empty")]
    EmptyBreakpoints,
    #[error("breakpoint {name:?} starts at {found} but must start at {expected}")]
    BreakpointGap {
        name: String,
        expected: f64,
        found: f64,
    },
    #[error("breakpoint {name:?} has an empty or inverted range")]
    InvalidRange { name: String },
    #[error("breakpoint {name:?} is open-ended but is not the last entry")]
    OpenRangeNotLast { name: String },
}
