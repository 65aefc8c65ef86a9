//! Canonical test configurations.
//!
//! Single source of truth for config values used across tests.

use std::time::Duration;

use crate::application::allocation::EngineSettings;
use crate::application::session::SessionSettings;
use crate::domain::LiquidityFactor;

/// Engine settings with the production step interval.
pub fn engine() -> EngineSettings {
    EngineSettings::default()
}

/// Engine settings with a custom step interval.
pub fn engine_with_interval(millis: u64) -> EngineSettings {
    EngineSettings {
        step_interval: Duration::from_millis(millis),
        initial_liquidity: LiquidityFactor::MIN,
    }
}

/// Session settings with a selection cap of `max_selected_assets`.
pub fn session(max_selected_assets: usize) -> SessionSettings {
    SessionSettings {
        max_selected_assets,
        ..SessionSettings::default()
    }
}

/// A minimal valid TOML document pointing at `base_url`.
pub fn toml_with_service(base_url: &str) -> String {
    format!("[service]\nbase_url = \"{base_url}\"\n")
}
