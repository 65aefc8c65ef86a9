//! Risk-free benchmark presets.

use serde::{Deserialize, Serialize};

use crate::domain::portfolio::{ESTR_RATE, US10Y_RATE};
use crate::domain::{RiskFreeKind, RiskFreeRate};

/// Preset rates as decimal fractions (0.04 = 4 %).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct RiskFreeConfig {
    #[serde(default = "default_usd_rate")]
    pub usd_rate: f64,
    #[serde(default = "default_str_rate")]
    pub str_rate: f64,
}

const fn default_usd_rate() -> f64 {
    US10Y_RATE
}

const fn default_str_rate() -> f64 {
    ESTR_RATE
}

impl RiskFreeConfig {
    /// The configured rate for a preset benchmark, or `custom` for
    /// [`RiskFreeKind::Custom`].
    #[must_use]
    pub fn rate(&self, kind: RiskFreeKind, custom: f64) -> RiskFreeRate {
        match kind {
            RiskFreeKind::Usd => RiskFreeRate::new(kind, self.usd_rate),
            RiskFreeKind::Str => RiskFreeRate::new(kind, self.str_rate),
            RiskFreeKind::Custom => RiskFreeRate::custom(custom),
        }
    }
}

impl Default for RiskFreeConfig {
    fn default() -> Self {
        Self {
            usd_rate: default_usd_rate(),
            str_rate: default_str_rate(),
        }
    }
}
