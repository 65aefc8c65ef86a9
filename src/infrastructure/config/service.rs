//! Portfolio service connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Environment variable that overrides [`ServiceConfig::base_url`].
pub const SERVICE_URL_ENV: &str = "MARKOWITZ_SERVICE_URL";

/// Where the optimizer lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL; request paths such as `/securities/all` are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api".to_string()
}

// Frontier computation can take a while for ten assets.
const fn default_timeout_ms() -> u64 {
    60_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl ServiceConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}
