//! Handlers for the `config` command group.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(config: &Config) {
    if output::is_json() {
        output::json_output(json!({ "command": "config.show", "config": config }));
        return;
    }

    output::section("Effective Configuration");

    output::section("Service");
    output::field("Base URL", &config.service.base_url);
    output::field("Timeout", format!("{} ms", config.service.timeout_ms));
    output::field(
        "Connect timeout",
        format!("{} ms", config.service.connect_timeout_ms),
    );

    output::section("Allocation");
    output::field(
        "Step interval",
        format!("{} ms", config.allocation.step_interval_ms),
    );
    output::field("Max assets", config.allocation.max_selected_assets);
    output::field(
        "Liquidity",
        format!("{}%", config.allocation.initial_liquidity_factor),
    );

    output::section("Risk-free");
    output::field("US10Y", format!("{:.3}%", config.risk_free.usd_rate * 100.0));
    output::field("€STR", format!("{:.3}%", config.risk_free.str_rate * 100.0));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
}

/// Execute `config validate`.
///
/// Unlike the other commands this requires the file to exist.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::success("Configuration is valid");
    output::field("Path", path.display());
    Ok(())
}
