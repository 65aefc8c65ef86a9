//! Wire types for the portfolio service's JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AllocationRequest, AssetMatrices, FrontierRecord, LabeledMatrix, OptimalPortfolio, Security,
    Ticker, WeightsMap,
};
use crate::error::ServiceError;

/// Body of a non-success response.
///
/// Most routes answer `{"error": "..."}`; the catalog route uses
/// `{"status": "error", "message": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.is_empty())
    }
}

/// `GET /securities/all`
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Vec<Security>,
}

/// `GET /securities/Covariance&Correlation`
///
/// Both matrices arrive as JSON-encoded strings in split orientation.
#[derive(Debug, Deserialize)]
pub struct MatricesResponse {
    #[serde(default)]
    pub tickers: Vec<Ticker>,
    pub covariance_matrix: String,
    pub correlation_matrix: String,
}

impl MatricesResponse {
    /// Decode the embedded matrices.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MalformedResponse`] if either string is not a
    /// split-orientation matrix.
    pub fn into_domain(self) -> Result<AssetMatrices, ServiceError> {
        Ok(AssetMatrices {
            tickers: self.tickers,
            covariance: parse_matrix("covariance_matrix", &self.covariance_matrix)?,
            correlation: parse_matrix("correlation_matrix", &self.correlation_matrix)?,
        })
    }
}

fn parse_matrix(field: &str, raw: &str) -> Result<LabeledMatrix, ServiceError> {
    serde_json::from_str(raw)
        .map_err(|e| ServiceError::MalformedResponse(format!("{field}: {e}")))
}

/// `POST /securities` request.
#[derive(Debug, Serialize)]
pub struct AddSecurityRequest<'a> {
    pub ticker: &'a Ticker,
}

/// `POST /securities` response.
#[derive(Debug, Deserialize)]
pub struct AddSecurityResponse {
    #[serde(default)]
    pub message: String,
}

/// `POST /securities/optimal_portfolio` request.
#[derive(Debug, Serialize)]
pub struct OptimizeRequest<'a> {
    pub tickers: &'a [Ticker],
    pub weights: &'a WeightsMap,
    #[serde(rename = "riskFree")]
    pub risk_free: f64,
    #[serde(rename = "riskFree_Type")]
    pub risk_free_type: &'static str,
    #[serde(rename = "liquidityFactor")]
    pub liquidity_factor: u8,
}

impl<'a> From<&'a AllocationRequest> for OptimizeRequest<'a> {
    fn from(request: &'a AllocationRequest) -> Self {
        Self {
            tickers: &request.tickers,
            weights: &request.weights,
            risk_free: request.risk_free.rate,
            risk_free_type: request.risk_free.kind.as_str(),
            liquidity_factor: request.liquidity_factor.value(),
        }
    }
}

/// Optimal weights as sent by the service: keyed by ticker, or positional in
/// request order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireWeights {
    Keyed(WeightsMap),
    Positional(Vec<f64>),
}

impl WireWeights {
    fn into_weights(self, tickers: &[Ticker]) -> Result<WeightsMap, ServiceError> {
        match self {
            Self::Keyed(weights) => Ok(weights),
            Self::Positional(values) if values.len() == tickers.len() => {
                Ok(tickers.iter().cloned().zip(values).collect())
            }
            Self::Positional(values) => Err(ServiceError::MalformedResponse(format!(
                "optimal_weights has {} entries for {} tickers",
                values.len(),
                tickers.len()
            ))),
        }
    }
}

/// `POST /securities/optimal_portfolio` response.
#[derive(Debug, Deserialize)]
pub struct OptimizeResponse {
    #[serde(rename = "riskFree", default)]
    pub risk_free: Option<f64>,
    pub optimal_weights: WireWeights,
    pub optimal_return: f64,
    pub optimal_risk: f64,
    #[serde(default)]
    pub optimal_sharpe: Option<f64>,
    #[serde(default)]
    pub efficient_frontier: Vec<FrontierRecord>,
    #[serde(default)]
    pub liquid_target_min: Option<f64>,
    #[serde(default)]
    pub liquid_share_achieved: Option<f64>,
}

impl OptimizeResponse {
    /// Convert to the domain result. Positional weights are matched to
    /// `tickers` in order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MalformedResponse`] when positional weights do
    /// not line up with the requested tickers.
    pub fn into_domain(self, tickers: &[Ticker]) -> Result<OptimalPortfolio, ServiceError> {
        Ok(OptimalPortfolio {
            optimal_weights: self.optimal_weights.into_weights(tickers)?,
            optimal_return: self.optimal_return,
            optimal_risk: self.optimal_risk,
            optimal_sharpe: self.optimal_sharpe,
            efficient_frontier: self.efficient_frontier,
            liquidity_target: self.liquid_target_min,
            liquidity_achieved: self.liquid_share_achieved,
            risk_free: self.risk_free,
        })
    }
}
