//! Portfolio service port.
//!
//! The remote service owns the securities database and the quadratic
//! optimizer. Everything this crate knows about it goes through
//! [`PortfolioService`].

use async_trait::async_trait;

use crate::domain::{
    AllocationRequest, AssetMatrices, AssetStatistics, Catalog, OptimalPortfolio, Ticker,
};
use crate::error::ServiceError;

/// Result type for service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Remote catalog, statistics and optimizer.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the session shares one instance
/// across concurrent requests.
///
/// # Retries
///
/// Implementations must not retry. A failed call is reported once and the
/// user decides whether to re-trigger it.
#[async_trait]
pub trait PortfolioService: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// List every selectable security.
    async fn list_securities(&self) -> ServiceResult<Catalog>;

    /// Annualized statistics for one security.
    async fn security_statistics(&self, ticker: &Ticker) -> ServiceResult<AssetStatistics>;

    /// Covariance and correlation matrices for `tickers`.
    async fn matrices(&self, tickers: &[Ticker]) -> ServiceResult<AssetMatrices>;

    /// Compute the efficient frontier and optimal portfolio.
    async fn optimize(&self, request: &AllocationRequest) -> ServiceResult<OptimalPortfolio>;

    /// Register a new security; returns the service's confirmation message.
    async fn add_security(&self, ticker: &Ticker) -> ServiceResult<String>;
}
