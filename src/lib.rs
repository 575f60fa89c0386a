//! # Glide Dispatch
//!
//! Delivery dispatch ledger for a single delivery agent.
//!
//! ## Architecture
//!
//! - **Index**: generic AVL tree with pluggable key ordering
//! - **Types**: `DeliveryOrder`, `OrderSnapshot`, priority scoring
//! - **Ledger**: orders held once in a slab, indexed twice (by priority
//!   and by ETA) through lightweight keys
//!
//! ## Design Principles
//!
//! 1. **Determinism**: priority scores are exact decimals, so identical
//!    inputs produce identical orderings and ETAs
//! 2. **One record, two orderings**: indexes reference orders by slab
//!    slot instead of copying them
//! 3. **Synchronous Execution**: single-threaded, every operation runs to
//!    completion before returning

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Balanced order index (AVL tree)
pub mod index;

/// Core data types: DeliveryOrder, OrderSnapshot, scoring
pub mod types;

/// Dispatch ledger: dual-indexed outstanding orders
pub mod ledger;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{DispatchError, Result};
pub use index::{BalancedOrderIndex, KeyOrder, NaturalOrder};
pub use ledger::{DispatchLedger, LedgerConfig};
pub use types::{DeliveryOrder, OrderSnapshot, PriorityScorer, WeightedScorer};
