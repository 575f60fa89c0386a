//! Core data types for the dispatch ledger
//!
//! ## Types
//!
//! - [`DeliveryOrder`]: an outstanding order with derived priority and ETA
//! - [`OrderSnapshot`]: plain-data view returned to callers
//! - [`priority`]: pluggable priority scoring (`PriorityScorer`, `WeightedScorer`)
//!
//! ## Scores
//!
//! Priority scores are exact `rust_decimal::Decimal` values so that two
//! orders with the same inputs always compare equal.

mod order;
mod snapshot;
pub mod priority;

// Re-export all types at module level
pub use order::DeliveryOrder;
pub use snapshot::OrderSnapshot;
pub use priority::{PriorityScorer, WeightedScorer};
