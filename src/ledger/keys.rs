//! Index keys referencing orders stored in the ledger's slab.
//!
//! ## Design
//!
//! Both indexes hold lightweight keys instead of copies of the order. Each
//! key carries the field its index sorts by plus the order's slab slot:
//!
//! ```text
//! priority index:  PriorityKey { score, slot } --+
//!                                                +--> Slab<DeliveryOrder>[slot]
//! ETA index:       EtaKey { eta, slot }       --+
//! ```
//!
//! The comparators only read the sort field. `PartialEq` compares the slot
//! too, so it acts as identity when several orders share a score or ETA.
//!
//! Slots are unique among outstanding orders; slab may reuse a slot only
//! after its keys have left both indexes.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::index::KeyOrder;

/// Key of the priority index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityKey {
    /// Priority score of the order
    pub score: Decimal,

    /// Slab slot of the order
    pub slot: usize,
}

/// Key of the ETA index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EtaKey {
    /// Assigned ETA of the order
    pub eta: u64,

    /// Slab slot of the order
    pub slot: usize,
}

impl EtaKey {
    /// Bound key for range scans; only `eta` takes part in comparisons
    #[inline]
    pub fn bound(eta: u64) -> Self {
        Self { eta, slot: usize::MAX }
    }
}

/// Ascending priority score (lowest priority first)
#[derive(Debug, Clone, Copy, Default)]
pub struct ByPriority;

impl KeyOrder<PriorityKey> for ByPriority {
    #[inline]
    fn compare(&self, a: &PriorityKey, b: &PriorityKey) -> Ordering {
        a.score.cmp(&b.score)
    }
}

/// Ascending ETA (earliest delivery first)
#[derive(Debug, Clone, Copy, Default)]
pub struct ByEta;

impl KeyOrder<EtaKey> for ByEta {
    #[inline]
    fn compare(&self, a: &EtaKey, b: &EtaKey) -> Ordering {
        a.eta.cmp(&b.eta)
    }
}
