//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use support::config::write_temp_config;

fn markowitz() -> Command {
    let mut cmd = cargo_bin_cmd!("markowitz");
    cmd.env_remove("MARKOWITZ_SERVICE_URL");
    cmd
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}/api")
}

#[test]
fn test_help() {
    markowitz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("securities"))
        .stdout(predicate::str::contains("stats"))
        .stdout(predicate::str::contains("matrices"))
        .stdout(predicate::str::contains("optimize"));
}

#[test]
fn test_version() {
    markowitz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("markowitz"));
}

#[test]
fn test_optimize_help_lists_risk_free_choices() {
    markowitz()
        .args(["optimize", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--risk-free"))
        .stdout(predicate::str::contains("custom"))
        .stdout(predicate::str::contains("--liquidity"));
}

#[test]
fn test_stats_requires_tickers() {
    markowitz()
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_custom_risk_free_requires_rate() {
    markowitz()
        .args(["optimize", "-t", "AAPL", "--risk-free", "custom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--custom-rate"));
}

#[test]
fn test_liquidity_out_of_range_is_rejected() {
    markowitz()
        .args(["optimize", "-t", "AAPL", "--liquidity", "101"])
        .assert()
        .failure();
}

#[test]
fn test_config_validate_accepts_valid_file() {
    let file = write_temp_config("[service]\nbase_url = \"http://127.0.0.1:5000/api\"\n");
    markowitz()
        .args(["config", "validate", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_rejects_invalid_value() {
    let file = write_temp_config("[allocation]\nmax_selected_assets = 0\n");
    markowitz()
        .args(["config", "validate", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_selected_assets"));
}

#[test]
fn test_config_validate_requires_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    markowitz()
        .args(["config", "validate", "--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read config file"));
}

#[test]
fn test_config_show_json_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    markowitz()
        .args(["--json", "config", "show", "--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""command":"config.show""#))
        .stdout(predicate::str::contains("http://127.0.0.1:5000/api"));
}

#[test]
fn test_service_url_env_overrides_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    markowitz()
        .env("MARKOWITZ_SERVICE_URL", "https://optimizer.example.com/api")
        .args(["--json", "config", "show", "--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("https://optimizer.example.com/api"));
}

#[test]
fn test_unreachable_service_fails_optimize() {
    let dir = tempfile::tempdir().expect("tempdir");
    markowitz()
        .env("MARKOWITZ_SERVICE_URL", closed_port_url())
        .args(["--json", "optimize", "-t", "AAPL", "-t", "KO", "--config"])
        .arg(dir.path().join("missing.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(r#""type":"error""#))
        .stderr(predicate::str::contains("transport failure"));
}
