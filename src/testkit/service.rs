//! Scripted [`PortfolioService`] for tests.
//!
//! Responses are preloaded per method. Optimize responses are queued and
//! may carry a delay, which lets tests overlap requests and control which
//! one lands last.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    AllocationRequest, AssetMatrices, AssetStatistics, Catalog, OptimalPortfolio, Ticker,
};
use crate::error::ServiceError;
use crate::port::outbound::service::{PortfolioService, ServiceResult};

type Scripted<T> = (Duration, ServiceResult<T>);

/// A mock service with canned answers.
///
/// - `list_securities` returns the configured catalog (empty by default).
/// - `security_statistics` looks the ticker up in the configured list and
///   answers 404 when it is missing.
/// - `optimize` pops the next scripted result, defaulting to an empty
///   `OptimalPortfolio` when the queue is exhausted.
pub struct ScriptedService {
    catalog: ServiceResult<Catalog>,
    statistics: Vec<AssetStatistics>,
    matrices: ServiceResult<AssetMatrices>,
    optimize_results: Mutex<VecDeque<Scripted<OptimalPortfolio>>>,
    add_result: ServiceResult<String>,
    optimize_calls: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<AllocationRequest>>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            catalog: Ok(Catalog::default()),
            statistics: Vec::new(),
            matrices: Ok(AssetMatrices::default()),
            optimize_results: Mutex::new(VecDeque::new()),
            add_result: Ok("Security added successfully".to_string()),
            optimize_calls: Arc::new(AtomicU32::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_catalog(mut self, catalog: ServiceResult<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_statistics(mut self, statistics: Vec<AssetStatistics>) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_matrices(mut self, matrices: ServiceResult<AssetMatrices>) -> Self {
        self.matrices = matrices;
        self
    }

    pub fn with_add_result(mut self, result: ServiceResult<String>) -> Self {
        self.add_result = result;
        self
    }

    /// Queue an immediate optimize result.
    pub fn push_optimize(self, result: ServiceResult<OptimalPortfolio>) -> Self {
        self.push_optimize_delayed(Duration::ZERO, result)
    }

    /// Queue an optimize result that is returned after `delay`.
    pub fn push_optimize_delayed(
        self,
        delay: Duration,
        result: ServiceResult<OptimalPortfolio>,
    ) -> Self {
        self.optimize_results.lock().push_back((delay, result));
        self
    }

    /// Shared counter of optimize calls.
    pub fn optimize_calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.optimize_calls)
    }

    /// Shared log of every optimize request received.
    pub fn requests(&self) -> Arc<Mutex<Vec<AllocationRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortfolioService for ScriptedService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn list_securities(&self) -> ServiceResult<Catalog> {
        self.catalog.clone()
    }

    async fn security_statistics(&self, ticker: &Ticker) -> ServiceResult<AssetStatistics> {
        self.statistics
            .iter()
            .find(|s| &s.ticker == ticker)
            .cloned()
            .ok_or_else(|| ServiceError::Rejected {
                status: 404,
                message: format!("Security {ticker} not found"),
            })
    }

    async fn matrices(&self, _tickers: &[Ticker]) -> ServiceResult<AssetMatrices> {
        self.matrices.clone()
    }

    async fn optimize(&self, request: &AllocationRequest) -> ServiceResult<OptimalPortfolio> {
        self.optimize_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request.clone());

        let next = self.optimize_results.lock().pop_front();
        let (delay, result) = next.unwrap_or((Duration::ZERO, Ok(OptimalPortfolio::default())));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn add_security(&self, _ticker: &Ticker) -> ServiceResult<String> {
        self.add_result.clone()
    }
}
