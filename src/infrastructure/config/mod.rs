//! Infrastructure configuration modules.

pub mod allocation;
pub mod logging;
pub mod risk_free;
pub mod service;
pub mod settings;
