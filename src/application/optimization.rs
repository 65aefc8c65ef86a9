//! Optimization request assembly and result unpacking.

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::{
    compose, AllocationRequest, ClassifiedFrontier, Composition, FrontierPoint, LiquidityFactor,
    OptimalPortfolio, RiskFreeRate, Ticker, WeightsMap,
};
use crate::error::ServiceError;

/// Builder for [`AllocationRequest`].
///
/// ```
/// use markowitz::application::optimization::OptimizationRequestBuilder;
/// use markowitz::domain::{RiskFreeRate, WeightsMap};
///
/// let request = OptimizationRequestBuilder::new()
///     .tickers(["AAPL", "MSFT"])
///     .weights([("AAPL", 60.0)].into_iter().collect::<WeightsMap>())
///     .risk_free(RiskFreeRate::estr())
///     .build()
///     .unwrap();
///
/// assert_eq!(request.weights.get(&"MSFT".into()), Some(0.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptimizationRequestBuilder {
    tickers: Vec<Ticker>,
    weights: WeightsMap,
    risk_free: RiskFreeRate,
    liquidity_factor: LiquidityFactor,
}

impl OptimizationRequestBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tickers<I, T>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Ticker>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn weights(mut self, weights: WeightsMap) -> Self {
        self.weights = weights;
        self
    }

    #[must_use]
    pub fn risk_free(mut self, risk_free: RiskFreeRate) -> Self {
        self.risk_free = risk_free;
        self
    }

    #[must_use]
    pub fn liquidity_factor(mut self, factor: LiquidityFactor) -> Self {
        self.liquidity_factor = factor;
        self
    }

    /// Produce the request. Tickers without a weight get 0; weights for
    /// tickers outside the list are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoTickers`] when no tickers were given.
    pub fn build(self) -> Result<AllocationRequest, DomainError> {
        if self.tickers.is_empty() {
            return Err(DomainError::NoTickers);
        }

        let weights = self
            .tickers
            .iter()
            .map(|t| (t.clone(), self.weights.get(t).unwrap_or(0.0)))
            .collect();

        Ok(AllocationRequest {
            tickers: self.tickers,
            weights,
            risk_free: self.risk_free,
            liquidity_factor: self.liquidity_factor,
        })
    }
}

/// An optimizer result, unpacked for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationOutcome {
    pub frontier: ClassifiedFrontier,
    pub composition: Composition,
    pub result: OptimalPortfolio,
}

impl OptimizationOutcome {
    /// Classify the frontier and lay out the optimal weights.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::MalformedResponse`] if any frontier record
    /// lacks a risk or return column.
    pub fn from_result(result: OptimalPortfolio) -> Result<Self, ServiceError> {
        let points = result
            .efficient_frontier
            .iter()
            .enumerate()
            .map(|(i, record)| record.point(i))
            .collect::<Result<Vec<FrontierPoint>, _>>()
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        let frontier = ClassifiedFrontier::new(&points);
        let composition = compose(&result.optimal_weights);
        debug!(
            frontier_points = frontier.len(),
            segments = composition.segments().len(),
            optimal_return = result.optimal_return,
            optimal_risk = result.optimal_risk,
            "Optimization outcome unpacked"
        );

        Ok(Self {
            frontier,
            composition,
            result,
        })
    }

    #[must_use]
    pub fn optimal_return(&self) -> f64 {
        self.result.optimal_return
    }

    #[must_use]
    pub fn optimal_risk(&self) -> f64 {
        self.result.optimal_risk
    }

    #[must_use]
    pub fn optimal_sharpe(&self) -> Option<f64> {
        self.result.optimal_sharpe
    }

    #[must_use]
    pub fn optimal_weights(&self) -> &WeightsMap {
        &self.result.optimal_weights
    }
}
