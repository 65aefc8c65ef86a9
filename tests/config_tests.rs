//! Loading and validating configuration files.

mod support;

use markowitz::domain::RiskFreeKind;
use markowitz::error::{ConfigError, Error};
use markowitz::infrastructure::config::settings::Config;
use markowitz::testkit::config::toml_with_service;
use support::config::write_temp_config;

#[test]
fn loads_full_document() {
    let file = write_temp_config(
        r#"
[service]
base_url = "https://optimizer.example.com/api"
timeout_ms = 30000
connect_timeout_ms = 2000

[allocation]
step_interval_ms = 100
max_selected_assets = 5
initial_liquidity_factor = 25

[risk_free]
usd_rate = 0.045
str_rate = 0.031

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.service.base_url, "https://optimizer.example.com/api");
    assert_eq!(config.service.timeout().as_secs(), 30);
    assert_eq!(config.allocation.max_selected_assets, 5);
    assert_eq!(config.logging.format, "json");

    let settings = config.session_settings();
    assert_eq!(settings.max_selected_assets, 5);
    assert_eq!(settings.engine.step_interval.as_millis(), 100);
    assert_eq!(settings.engine.initial_liquidity.value(), 25);
    assert_eq!(settings.risk_free.kind, RiskFreeKind::Usd);
    assert_eq!(settings.risk_free.rate, 0.045);
    assert_eq!(config.risk_free.rate(RiskFreeKind::Str, 0.0).rate, 0.031);
    assert_eq!(config.risk_free.rate(RiskFreeKind::Custom, 0.02).rate, 0.02);
}

#[test]
fn partial_document_keeps_defaults() {
    let file = write_temp_config(&toml_with_service("http://10.0.0.5:5000/api"));

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.service.base_url, "http://10.0.0.5:5000/api");
    assert_eq!(config.service.timeout_ms, 60_000);
    assert_eq!(config.allocation.step_interval_ms, 150);
    assert_eq!(config.allocation.initial_liquidity_factor, 0);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))), "got {err:?}");
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");
    assert_eq!(config.allocation.max_selected_assets, 10);
}

#[test]
fn malformed_toml_is_parse_error() {
    let file = write_temp_config("[service\nbase_url = ");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))), "got {err:?}");
}

#[test]
fn empty_base_url_is_missing() {
    let file = write_temp_config("[service]\nbase_url = \"\"\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "base_url" })
    ));
}

#[test]
fn out_of_range_values_are_rejected() {
    let cases = [
        ("[service]\nbase_url = \"not a url\"\n", "base_url"),
        ("[service]\ntimeout_ms = 0\n", "timeout_ms"),
        ("[service]\nconnect_timeout_ms = 0\n", "connect_timeout_ms"),
        ("[allocation]\nstep_interval_ms = 0\n", "step_interval_ms"),
        ("[allocation]\nmax_selected_assets = 0\n", "max_selected_assets"),
        ("[allocation]\ninitial_liquidity_factor = 101\n", "initial_liquidity_factor"),
        ("[risk_free]\nusd_rate = 4.0\n", "usd_rate"),
        ("[risk_free]\nstr_rate = -0.01\n", "str_rate"),
    ];

    for (document, expected) in cases {
        let file = write_temp_config(document);
        match Config::load(file.path()) {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, expected, "document: {document}");
            }
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }
}
