//! HTTP client for the portfolio service.
//!
//! One request per call: failures are reported to the caller as-is and never
//! retried here. Non-success responses are turned into
//! [`ServiceError::Rejected`] carrying the server's own message.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::dto::{
    AddSecurityRequest, AddSecurityResponse, CatalogResponse, ErrorBody, MatricesResponse,
    OptimizeRequest, OptimizeResponse,
};
use crate::domain::{
    AllocationRequest, AssetMatrices, AssetStatistics, Catalog, OptimalPortfolio, Ticker,
};
use crate::error::{Result, ServiceError};
use crate::infrastructure::config::service::ServiceConfig;
use crate::port::outbound::service::{PortfolioService, ServiceResult};

const MATRICES_ROUTE: &str = "Covariance&Correlation";
const OPTIMIZE_ROUTE: &str = "optimal_portfolio";

/// [`PortfolioService`] backed by the service's REST API.
pub struct HttpPortfolioService {
    http: HttpClient,
    base_url: Url,
}

impl HttpPortfolioService {
    /// Client with reqwest's default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Client with the configured base URL and timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be built with the configured timeouts.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|err| {
                ServiceError::Transport(format!("failed to build HTTP client: {err}"))
            })?;
        debug!(
            timeout_ms = config.timeout_ms,
            connect_timeout_ms = config.connect_timeout_ms,
            "HTTP client configured"
        );

        Ok(Self {
            http,
            base_url: Url::parse(&config.base_url)?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> ServiceResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ServiceError::Transport(format!("base URL cannot take a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(rejection(status, &body));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ServiceError::MalformedResponse(e.to_string()))
    }
}

/// Build the error for a non-success response.
///
/// Uses the body's `error` (or `message`) field when present, otherwise the
/// status line.
fn rejection(status: StatusCode, body: &str) -> ServiceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    ServiceError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PortfolioService for HttpPortfolioService {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn list_securities(&self) -> ServiceResult<Catalog> {
        let url = self.endpoint(&["securities", "all"])?;
        debug!(url = %url, "Fetching securities catalog");

        let response: CatalogResponse = Self::read(self.http.get(url).send().await?).await?;
        if response.status.as_deref() == Some("error") {
            return Err(ServiceError::Rejected {
                status: StatusCode::OK.as_u16(),
                message: response
                    .message
                    .unwrap_or_else(|| "catalog unavailable".to_string()),
            });
        }

        debug!(count = response.data.len(), "Fetched securities catalog");
        Ok(Catalog::new(response.data))
    }

    async fn security_statistics(&self, ticker: &Ticker) -> ServiceResult<AssetStatistics> {
        let url = self.endpoint(&["securities", ticker.as_str()])?;
        debug!(url = %url, "Fetching security statistics");
        Self::read(self.http.get(url).send().await?).await
    }

    async fn matrices(&self, tickers: &[Ticker]) -> ServiceResult<AssetMatrices> {
        let url = self.endpoint(&["securities", MATRICES_ROUTE])?;
        let query: Vec<(&str, &str)> = tickers.iter().map(|t| ("tickers", t.as_str())).collect();
        debug!(url = %url, assets = tickers.len(), "Fetching covariance and correlation");

        let response: MatricesResponse =
            Self::read(self.http.get(url).query(&query).send().await?).await?;
        response.into_domain()
    }

    async fn optimize(&self, request: &AllocationRequest) -> ServiceResult<OptimalPortfolio> {
        let url = self.endpoint(&["securities", OPTIMIZE_ROUTE])?;
        info!(url = %url, assets = request.tickers.len(), "Requesting optimization");

        let body = OptimizeRequest::from(request);
        let response: OptimizeResponse =
            Self::read(self.http.post(url).json(&body).send().await?).await?;
        response.into_domain(&request.tickers)
    }

    async fn add_security(&self, ticker: &Ticker) -> ServiceResult<String> {
        let url = self.endpoint(&["securities"])?;
        info!(url = %url, ticker = %ticker, "Adding security");

        let response: AddSecurityResponse = Self::read(
            self.http
                .post(url)
                .json(&AddSecurityRequest { ticker })
                .send()
                .await?,
        )
        .await?;
        Ok(response.message)
    }
}
