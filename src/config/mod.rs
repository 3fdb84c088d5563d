//! Application configuration module
//!
//! Configuration is read from environment variables through the `config` and
//! `dotenvy` crates. Variables use the `CLUB_SUBSCRIPTIONS` prefix and `__`
//! between nested keys. A TOML file can be layered underneath with
//! [`AppConfig::load_from_file`].
//!
//! # Example
//!
//! ```no_run
//! use club_subscriptions::config::{init_tracing, AppConfig};
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Failed to install tracing");
//! ```

mod error;
mod lifecycle;
mod logging;

pub use error::{ConfigError, ValidationError};
pub use lifecycle::LifecycleConfig;
pub use logging::{init_tracing, LogFormat, LoggingConfig};

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "CLUB_SUBSCRIPTIONS";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Refund policy, freeze cap and business-day offset
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLUB_SUBSCRIPTIONS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CLUB_SUBSCRIPTIONS__LIFECYCLE__REFUND_POLICY=pro_rata`
    /// - `CLUB_SUBSCRIPTIONS__LOGGING__FORMAT=json`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load a TOML file with environment variables layered on top.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).format(config::FileFormat::Toml))
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.lifecycle.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

fn environment() -> config::Environment {
    config::Environment::default()
        .prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}
