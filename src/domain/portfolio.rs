//! Optimization request and result types.

use std::fmt;

use serde::Serialize;

use super::frontier::FrontierRecord;
use super::id::Ticker;
use super::liquidity::LiquidityFactor;
use super::weights::WeightsMap;

/// Yield of the 10-year US Treasury used as the USD benchmark.
pub const US10Y_RATE: f64 = 0.04014;
/// Euro short-term rate used as the EUR benchmark.
pub const ESTR_RATE: f64 = 0.03413;

/// Which benchmark the risk-free rate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskFreeKind {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "STR")]
    Str,
    Custom,
}

impl RiskFreeKind {
    /// Wire name sent to the optimizer.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Str => "STR",
            Self::Custom => "Custom",
        }
    }
}

/// Risk-free rate as a decimal fraction (0.04 = 4 %).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskFreeRate {
    pub kind: RiskFreeKind,
    pub rate: f64,
}

impl RiskFreeRate {
    #[must_use]
    pub const fn new(kind: RiskFreeKind, rate: f64) -> Self {
        Self { kind, rate }
    }

    /// US10Y benchmark at its default rate.
    #[must_use]
    pub const fn usd() -> Self {
        Self::new(RiskFreeKind::Usd, US10Y_RATE)
    }

    /// €STR benchmark at its default rate.
    #[must_use]
    pub const fn estr() -> Self {
        Self::new(RiskFreeKind::Str, ESTR_RATE)
    }

    #[must_use]
    pub const fn custom(rate: f64) -> Self {
        Self::new(RiskFreeKind::Custom, rate)
    }
}

impl Default for RiskFreeRate {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for RiskFreeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}%)", self.kind.as_str(), self.rate * 100.0)
    }
}

/// Everything the optimizer needs to compute a frontier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRequest {
    pub tickers: Vec<Ticker>,
    /// Starting weights in percent; every ticker has an entry.
    pub weights: WeightsMap,
    pub risk_free: RiskFreeRate,
    pub liquidity_factor: LiquidityFactor,
}

/// The optimizer's answer, passed through unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptimalPortfolio {
    pub optimal_weights: WeightsMap,
    pub optimal_return: f64,
    pub optimal_risk: f64,
    /// Absent when the optimal risk is zero.
    pub optimal_sharpe: Option<f64>,
    pub efficient_frontier: Vec<FrontierRecord>,
    pub liquidity_target: Option<f64>,
    pub liquidity_achieved: Option<f64>,
    /// Rate the optimizer actually used, for the chart's reference line.
    pub risk_free: Option<f64>,
}
