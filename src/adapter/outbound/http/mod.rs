//! REST adapter for the remote portfolio service.

pub mod client;
pub mod dto;

pub use client::HttpPortfolioService;
