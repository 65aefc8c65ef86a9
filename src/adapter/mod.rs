//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - driving side: the command-line interface
//! - [`outbound`] - driven side: the HTTP client for the portfolio service

pub mod inbound;
pub mod outbound;
