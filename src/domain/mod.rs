//! Service-agnostic portfolio domain logic.

pub mod allocation;
pub mod composition;
pub mod error;
pub mod frontier;
pub mod id;
pub mod liquidity;
pub mod portfolio;
pub mod security;
pub mod weights;

mod ordered;

pub use allocation::{Allocation, MAX_TOTAL};
pub use composition::{compose, Composition, CompositionSegment, Hsl};
pub use frontier::{
    classify, ClassifiedFrontier, ClassifiedPoint, FrontierCategory, FrontierPoint, FrontierRecord,
};
pub use id::Ticker;
pub use liquidity::{LiquidityFactor, LiquidityStep};
pub use portfolio::{AllocationRequest, OptimalPortfolio, RiskFreeKind, RiskFreeRate};
pub use security::{
    AssetMatrices, AssetSelection, AssetStatistics, Catalog, CategoryGroup, CategoryPath,
    LabeledMatrix, Security,
};
pub use weights::WeightsMap;
