//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Tracing initialisation failed: {0}")]
    TracingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Default freeze cap must be at least one day")]
    InvalidFreezeCap,

    #[error("UTC offset must be within +/-14 hours, got {0} minutes")]
    InvalidUtcOffset(i32),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
