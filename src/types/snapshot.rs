//! Plain-data view of an outstanding order.
//!
//! Snapshots are what the ledger hands to its callers (lookup, cancel,
//! delivery sweeps). They derive `SimpleSerialize` so the ledger can hash a
//! deterministic encoding of its state.

use ssz_rs::prelude::*;

/// Order fields plus assigned ETA.
///
/// ## SSZ Layout
///
/// Fixed-size container of five `u64` fields: 40 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct OrderSnapshot {
    /// Order identifier
    pub id: u64,

    /// System time at creation
    pub placed_at: u64,

    /// Monetary amount
    pub value: u64,

    /// One-way delivery duration
    pub travel_time: u64,

    /// Estimated delivery time
    pub eta: u64,
}

impl OrderSnapshot {
    /// Create a snapshot from raw fields
    pub fn new(id: u64, placed_at: u64, value: u64, travel_time: u64, eta: u64) -> Self {
        Self {
            id,
            placed_at,
            value,
            travel_time,
            eta,
        }
    }

    /// `[id, placed_at, value, travel_time, eta]`, the row layout used by
    /// presentation layers
    pub fn as_row(&self) -> [u64; 5] {
        [self.id, self.placed_at, self.value, self.travel_time, self.eta]
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
