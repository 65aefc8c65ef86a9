//! Domain validation errors for core domain types.
//!
//! Guarded allocation steps never produce errors: an out-of-bounds step is
//! simply a no-op. The errors here cover inputs that cannot be expressed at
//! all, such as a liquidity step of `+7` or an optimization with no tickers.
//!
//! # Examples
//!
//! ```
//! use markowitz::domain::error::DomainError;
//! use markowitz::domain::liquidity::LiquidityStep;
//!
//! let result = LiquidityStep::try_from(7);
//! assert!(matches!(result, Err(DomainError::InvalidLiquidityStep { delta: 7 })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Liquidity can only move by ±1, ±5 or ±10.
    #[error("liquidity step must be one of ±1, ±5, ±10, got {delta}")]
    InvalidLiquidityStep {
        /// The rejected delta.
        delta: i32,
    },

    /// An optimization request needs at least one ticker.
    #[error("at least one ticker is required")]
    NoTickers,

    /// The asset selection is already at its cap.
    #[error("a maximum of {limit} securities can be selected")]
    SelectionLimitReached {
        /// Configured selection cap.
        limit: usize,
    },

    /// A frontier record lacks one of the coordinates.
    #[error("frontier record {index} has no `{field}` value")]
    MalformedFrontierRecord {
        /// Position of the record in the received array.
        index: usize,
        /// The missing key.
        field: &'static str,
    },
}
