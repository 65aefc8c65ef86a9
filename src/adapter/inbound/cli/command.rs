//! Command-line interface definitions.
//!
//! Defines the CLI structure for the markowitz application using `clap`:
//! browsing the securities catalog, inspecting per-asset statistics and
//! covariance, running an optimization, and managing configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{RiskFreeKind, Ticker};

/// Mean-variance portfolio builder backed by a remote optimizer
#[derive(Parser, Debug)]
#[command(name = "markowitz")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the markowitz CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse and extend the securities catalog
    #[command(subcommand)]
    Securities(SecuritiesCommand),

    /// Show annualized statistics for one or more securities
    Stats(TickersArgs),

    /// Show covariance and correlation matrices
    Matrices(TickersArgs),

    /// Compute the efficient frontier and optimal portfolio
    Optimize(OptimizeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `markowitz securities`.
#[derive(Subcommand, Debug)]
pub enum SecuritiesCommand {
    /// List every selectable security.
    List(ListArgs),
    /// Ask the service to fetch and store a new security.
    Add(AddArgs),
}

/// Subcommands for `markowitz config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Group by parent and child category
    #[arg(long)]
    pub grouped: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Ticker symbol to add
    pub ticker: Ticker,
}

#[derive(Args, Debug)]
pub struct TickersArgs {
    /// Ticker symbols
    #[arg(required = true, num_args = 1..)]
    pub tickers: Vec<Ticker>,
}

/// Risk-free benchmark choices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RiskFreeChoice {
    /// 10-year US Treasury
    #[default]
    Usd,
    /// Euro short-term rate
    Str,
    /// Rate given with --custom-rate
    Custom,
}

impl From<RiskFreeChoice> for RiskFreeKind {
    fn from(choice: RiskFreeChoice) -> Self {
        match choice {
            RiskFreeChoice::Usd => Self::Usd,
            RiskFreeChoice::Str => Self::Str,
            RiskFreeChoice::Custom => Self::Custom,
        }
    }
}

/// Arguments for `markowitz optimize`.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Asset to include (repeatable)
    #[arg(short, long = "ticker", required = true)]
    pub tickers: Vec<Ticker>,

    /// Starting weight in whole percent, as TICKER=N (repeatable)
    #[arg(short, long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(Ticker, u32)>,

    /// Risk-free benchmark
    #[arg(long, value_enum, default_value_t = RiskFreeChoice::Usd)]
    pub risk_free: RiskFreeChoice,

    /// Custom risk-free rate as a decimal fraction (0.035 = 3.5%)
    #[arg(long, required_if_eq("risk_free", "custom"))]
    pub custom_rate: Option<f64>,

    /// Liquidity target in percent
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub liquidity: Option<u8>,

    /// Write the efficient frontier as CSV to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

fn parse_weight(raw: &str) -> Result<(Ticker, u32), String> {
    let (ticker, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TICKER=N, got '{raw}'"))?;
    let ticker = ticker.trim();
    if ticker.is_empty() {
        return Err(format!("missing ticker in '{raw}'"));
    }
    let weight = weight
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid weight in '{raw}': {e}"))?;
    Ok((Ticker::from(ticker), weight))
}
