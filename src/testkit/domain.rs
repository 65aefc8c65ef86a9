//! Builders for domain values used across tests.

use crate::domain::{
    AssetStatistics, FrontierPoint, FrontierRecord, OptimalPortfolio, Security, Ticker,
};

/// Create a [`Ticker`] from a string.
pub fn ticker(symbol: &str) -> Ticker {
    Ticker::from(symbol)
}

/// Catalog entry with an optional `parent/child` category.
pub fn security(symbol: &str, category: Option<&str>) -> Security {
    Security {
        ticker: ticker(symbol),
        long_name: format!("{symbol} Corp"),
        proxy_category: category.map(str::to_string),
    }
}

/// Statistics with the variance derived from `std_dev`.
pub fn statistics(symbol: &str, expected_return: f64, std_dev: f64) -> AssetStatistics {
    AssetStatistics {
        ticker: ticker(symbol),
        long_name: format!("{symbol} Corp"),
        expected_return,
        variance_pct: std_dev * std_dev / 100.0,
        std_dev,
        liquidity_label: None,
        proxy_category: None,
    }
}

/// Frontier records holding only `Risk` and `Return`.
pub fn frontier(points: &[(f64, f64)]) -> Vec<FrontierRecord> {
    points
        .iter()
        .map(|&(risk, ret)| FrontierRecord::from_point(FrontierPoint::new(risk, ret)))
        .collect()
}

/// An optimizer result with the given weights and frontier.
pub fn optimal(weights: &[(&str, f64)], points: &[(f64, f64)]) -> OptimalPortfolio {
    OptimalPortfolio {
        optimal_weights: weights.iter().copied().collect(),
        optimal_return: 0.08,
        optimal_risk: 0.15,
        optimal_sharpe: Some(0.26),
        efficient_frontier: frontier(points),
        ..OptimalPortfolio::default()
    }
}
