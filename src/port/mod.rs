//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems, here the remote portfolio service.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌─────────┐                                          ┌────────────┐
//! │  CLI    │                                          │ HTTP       │
//! │ Adapter │                                          │ Service    │
//! └─────────┘                                          └────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::service::PortfolioService`] - catalog, statistics, matrices
//!   and optimization calls

pub mod outbound;
