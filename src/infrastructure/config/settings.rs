//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! the service URL can be overridden with `MARKOWITZ_SERVICE_URL`.
//!
//! # Example
//!
//! ```no_run
//! use markowitz::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::allocation::AllocationConfig;
use super::logging::LoggingConfig;
use super::risk_free::RiskFreeConfig;
use super::service::{ServiceConfig, SERVICE_URL_ENV};
use crate::application::session::SessionSettings;
use crate::domain::liquidity::LiquidityFactor;
use crate::domain::RiskFreeKind;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Remote optimizer endpoint and timeouts.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Weight stepping and selection limits.
    #[serde(default)]
    pub allocation: AllocationConfig,

    /// Benchmark rates offered as presets.
    #[serde(default)]
    pub risk_free: RiskFreeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies the `MARKOWITZ_SERVICE_URL` override, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(std::env::var(SERVICE_URL_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists; otherwise only
    /// validation of the overridden defaults can fail.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "Config file not found, using defaults");
        Self::parse_toml("")
    }

    fn apply_overrides(&mut self, service_url: Option<String>) {
        if let Some(url) = service_url.filter(|u| !u.trim().is_empty()) {
            self.service.base_url = url;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for an empty service URL and
    /// [`ConfigError::InvalidValue`] for anything out of range.
    pub fn validate(&self) -> Result<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let url = Url::parse(&self.service.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        if self.service.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.service.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.allocation.step_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "step_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.allocation.max_selected_assets == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_selected_assets",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.allocation.initial_liquidity_factor > u32::from(LiquidityFactor::MAX.value()) {
            return Err(ConfigError::InvalidValue {
                field: "initial_liquidity_factor",
                reason: "must be between 0 and 100".to_string(),
            }
            .into());
        }

        for (field, rate) in [
            ("usd_rate", self.risk_free.usd_rate),
            ("str_rate", self.risk_free.str_rate),
        ] {
            if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be a decimal fraction between 0 and 1".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Session settings derived from this configuration.
    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            engine: (&self.allocation).into(),
            max_selected_assets: self.allocation.max_selected_assets,
            risk_free: self.risk_free.rate(RiskFreeKind::Usd, 0.0),
        }
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
