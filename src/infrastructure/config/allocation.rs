//! Allocation engine and selection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::allocation::EngineSettings;
use crate::domain::LiquidityFactor;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AllocationConfig {
    /// Delay between repeated steps while a weight control is held.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
    /// Maximum number of assets in one portfolio.
    #[serde(default = "default_max_selected_assets")]
    pub max_selected_assets: usize,
    /// Liquidity target at startup, in percent.
    #[serde(default)]
    pub initial_liquidity_factor: u32,
}

const fn default_step_interval_ms() -> u64 {
    150
}

const fn default_max_selected_assets() -> usize {
    10
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            step_interval_ms: default_step_interval_ms(),
            max_selected_assets: default_max_selected_assets(),
            initial_liquidity_factor: 0,
        }
    }
}

impl From<&AllocationConfig> for EngineSettings {
    fn from(config: &AllocationConfig) -> Self {
        Self {
            step_interval: Duration::from_millis(config.step_interval_ms),
            initial_liquidity: LiquidityFactor::saturating(config.initial_liquidity_factor),
        }
    }
}
