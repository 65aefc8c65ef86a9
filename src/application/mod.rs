//! Application services (use cases).
//!
//! These services orchestrate domain logic and the service port:
//!
//! - [`allocation`] - bounded, timer-driven starting weights and liquidity
//! - [`optimization`] - request assembly and result unpacking
//! - [`session`] - selection, per-request state and the optimizer round trip
//! - [`export`] - frontier CSV

pub mod allocation;
pub mod export;
pub mod optimization;
pub mod request;
pub mod session;
