//! Portfolio builder session.
//!
//! Ties asset selection, the allocation engine and the remote service
//! together. Each request type keeps its own [`RequestState`]; requests of
//! the same type are not sequenced, so when two overlap the response that
//! arrives last is the one kept.

use std::sync::Arc;

use futures_util::future::try_join_all;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::allocation::{AllocationEngine, EngineSettings};
use super::export::frontier_csv;
use super::optimization::{OptimizationOutcome, OptimizationRequestBuilder};
use super::request::RequestState;
use crate::domain::error::DomainError;
use crate::domain::{
    AssetMatrices, AssetSelection, AssetStatistics, Catalog, RiskFreeRate, Ticker,
};
use crate::port::outbound::service::PortfolioService;

/// Default cap on the number of selected assets.
pub const DEFAULT_MAX_SELECTED_ASSETS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub engine: EngineSettings,
    pub max_selected_assets: usize,
    pub risk_free: RiskFreeRate,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            max_selected_assets: DEFAULT_MAX_SELECTED_ASSETS,
            risk_free: RiskFreeRate::default(),
        }
    }
}

pub struct PortfolioSession {
    service: Arc<dyn PortfolioService>,
    engine: AllocationEngine,
    selection: Mutex<AssetSelection>,
    risk_free: Mutex<RiskFreeRate>,
    catalog: Mutex<RequestState<Catalog>>,
    statistics: Mutex<RequestState<Vec<AssetStatistics>>>,
    matrices: Mutex<RequestState<AssetMatrices>>,
    optimization: Mutex<RequestState<OptimizationOutcome>>,
    added: Mutex<RequestState<String>>,
}

impl PortfolioSession {
    pub fn new(service: Arc<dyn PortfolioService>, settings: SessionSettings) -> Self {
        Self {
            service,
            engine: AllocationEngine::new(settings.engine),
            selection: Mutex::new(AssetSelection::new(settings.max_selected_assets)),
            risk_free: Mutex::new(settings.risk_free),
            catalog: Mutex::default(),
            statistics: Mutex::default(),
            matrices: Mutex::default(),
            optimization: Mutex::default(),
            added: Mutex::default(),
        }
    }

    /// The allocation engine holding the starting weights.
    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    pub fn selected(&self) -> Vec<Ticker> {
        self.selection.lock().tickers().to_vec()
    }

    /// Select `ticker`, or deselect it if already selected.
    ///
    /// Any change resets the starting weights to zero for the new asset set.
    /// Returns whether the ticker is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SelectionLimitReached`] when selecting past the
    /// cap; the selection is left unchanged.
    pub fn toggle_asset(&self, ticker: Ticker) -> Result<bool, DomainError> {
        let mut selection = self.selection.lock();
        let selected = if selection.deselect(&ticker) {
            false
        } else {
            selection.select(ticker.clone())?;
            true
        };
        self.engine.initialize(selection.tickers().iter().cloned());
        debug!(
            ticker = %ticker,
            selected,
            count = selection.tickers().len(),
            "Selection changed"
        );
        Ok(selected)
    }

    /// Ensure every ticker in `tickers` is selected, then reset the weights.
    ///
    /// All or nothing: the batch is staged and committed only if it fits.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SelectionLimitReached`] when the cap is hit;
    /// the selection and the weights are left unchanged.
    pub fn select_all<I>(&self, tickers: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = Ticker>,
    {
        let mut selection = self.selection.lock();
        let mut staged = selection.clone();
        for ticker in tickers {
            staged.select(ticker)?;
        }
        *selection = staged;
        self.engine.initialize(selection.tickers().iter().cloned());
        debug!(count = selection.tickers().len(), "Selection replaced");
        Ok(())
    }

    pub fn risk_free(&self) -> RiskFreeRate {
        *self.risk_free.lock()
    }

    pub fn set_risk_free(&self, rate: RiskFreeRate) {
        debug!(risk_free = %rate, "Risk-free rate changed");
        *self.risk_free.lock() = rate;
    }

    pub async fn load_catalog(&self) {
        *self.catalog.lock() = RequestState::Loading;
        let outcome = self.service.list_securities().await;
        match &outcome {
            Ok(catalog) => debug!(securities = catalog.len(), "Catalog loaded"),
            Err(e) => warn!(error = %e, "Catalog request failed"),
        }
        self.catalog.lock().settle(outcome);
    }

    /// Fetch statistics for every selected asset concurrently.
    ///
    /// All or nothing: one failed ticker fails the whole request.
    pub async fn load_statistics(&self) {
        let tickers = self.selected();
        *self.statistics.lock() = RequestState::Loading;

        let service = &self.service;
        let outcome = try_join_all(tickers.iter().map(|t| service.security_statistics(t))).await;
        if let Err(e) = &outcome {
            warn!(error = %e, assets = tickers.len(), "Statistics request failed");
        }
        self.statistics.lock().settle(outcome);
    }

    pub async fn load_matrices(&self) {
        let tickers = self.selected();
        *self.matrices.lock() = RequestState::Loading;
        let outcome = self.service.matrices(&tickers).await;
        if let Err(e) = &outcome {
            warn!(error = %e, assets = tickers.len(), "Matrices request failed");
        }
        self.matrices.lock().settle(outcome);
    }

    /// Send the current selection, weights, rate and liquidity target to the
    /// optimizer.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoTickers`] when nothing is selected; no request
    /// is sent and the optimization state is left untouched. Service failures
    /// are recorded in [`optimization`](Self::optimization) instead.
    pub async fn optimize(&self) -> Result<(), DomainError> {
        let request = OptimizationRequestBuilder::new()
            .tickers(self.selected())
            .weights(self.engine.weights())
            .risk_free(self.risk_free())
            .liquidity_factor(self.engine.liquidity_factor())
            .build()?;

        *self.optimization.lock() = RequestState::Loading;
        info!(
            service = self.service.name(),
            assets = request.tickers.len(),
            risk_free = %request.risk_free,
            liquidity = %request.liquidity_factor,
            "Requesting optimal portfolio"
        );

        let outcome = self
            .service
            .optimize(&request)
            .await
            .and_then(OptimizationOutcome::from_result);
        match &outcome {
            Ok(o) => info!(
                frontier_points = o.frontier.len(),
                optimal_return = o.optimal_return(),
                optimal_risk = o.optimal_risk(),
                "Optimal portfolio received"
            ),
            Err(e) => warn!(error = %e, "Optimization failed"),
        }
        self.optimization.lock().settle(outcome);
        Ok(())
    }

    pub async fn add_security(&self, ticker: &Ticker) {
        *self.added.lock() = RequestState::Loading;
        let outcome = self.service.add_security(ticker).await;
        match &outcome {
            Ok(message) => info!(ticker = %ticker, message = %message, "Security added"),
            Err(e) => warn!(ticker = %ticker, error = %e, "Adding security failed"),
        }
        self.added.lock().settle(outcome);
    }

    pub fn catalog(&self) -> RequestState<Catalog> {
        self.catalog.lock().clone()
    }

    pub fn statistics(&self) -> RequestState<Vec<AssetStatistics>> {
        self.statistics.lock().clone()
    }

    pub fn matrices(&self) -> RequestState<AssetMatrices> {
        self.matrices.lock().clone()
    }

    pub fn optimization(&self) -> RequestState<OptimizationOutcome> {
        self.optimization.lock().clone()
    }

    pub fn added(&self) -> RequestState<String> {
        self.added.lock().clone()
    }

    /// CSV of the last received frontier, if any.
    pub fn export_frontier(&self) -> Option<String> {
        self.optimization
            .lock()
            .value()
            .map(|o| frontier_csv(&o.result.efficient_frontier))
    }
}
