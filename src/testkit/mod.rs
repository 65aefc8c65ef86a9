//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`service`] - `ScriptedService`, a canned [`PortfolioService`](crate::port::outbound::service::PortfolioService)
//! - [`domain`] - builders for tickers, securities, statistics and frontiers
//! - [`config`] - canonical test configurations

pub mod config;
pub mod domain;
pub mod service;
