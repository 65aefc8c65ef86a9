//! Markowitz - mean-variance portfolio builder.
//!
//! A client for a remote portfolio optimizer: pick up to ten securities, set
//! starting weights with bounded controls, choose a risk-free benchmark and a
//! liquidity target, then have the service compute the efficient frontier and
//! the maximum-Sharpe portfolio.
//!
//! # Architecture
//!
//! - **`domain`** - Service-agnostic types and pure logic: frontier
//!   classification, weights, liquidity steps, composition colors
//! - **`port`** - The [`PortfolioService`](port::outbound::service::PortfolioService) trait
//! - **`application`** - The bounded allocation engine, request builder and
//!   portfolio session
//! - **`adapter`** - CLI (inbound) and HTTP client (outbound)
//! - **`infrastructure`** - Configuration and logging
//!
//! # Features
//!
//! - `testkit` - Scripted service and builders for integration tests
//!
//! # Example
//!
//! ```
//! use markowitz::domain::{classify, FrontierCategory, FrontierPoint};
//!
//! let points = [
//!     FrontierPoint::new(0.1, 0.05),
//!     FrontierPoint::new(0.2, 0.08),
//!     FrontierPoint::new(0.3, 0.07),
//! ];
//! let classified = classify(&points);
//! assert_eq!(classified[0].category, FrontierCategory::MinRisk);
//! assert_eq!(classified[2].category, FrontierCategory::Dominated);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
