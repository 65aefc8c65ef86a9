//! Infrastructure layer.
//!
//! Technical concerns that support the application without containing
//! business logic: configuration loading, validation and logging setup.

pub mod config;
