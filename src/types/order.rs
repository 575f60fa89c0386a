//! Delivery order record.
//!
//! ## Lifecycle
//!
//! An order is built once from trusted caller inputs. Its priority score is
//! derived at construction and never changes. Its ETA starts unassigned and
//! is fixed exactly once by the ledger, before the order enters either
//! index. The ETA only depends on priority scores already indexed, never on
//! the new order's own position.

use rust_decimal::Decimal;

use crate::types::priority::{PriorityScorer, WeightedScorer};
use crate::types::OrderSnapshot;

/// An outstanding delivery for the single delivery agent.
///
/// ## Example
///
/// ```
/// use glide_dispatch::types::DeliveryOrder;
/// use rust_decimal::Decimal;
///
/// let order = DeliveryOrder::new(
///     1,      // id
///     0,      // placed_at
///     50,     // value
///     10,     // travel_time
/// ).unwrap();
///
/// assert_eq!(order.priority, Decimal::new(3, 1));
/// assert_eq!(order.eta(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOrder {
    /// Caller-assigned unique identifier
    pub id: u64,

    /// System time at creation (clock units)
    pub placed_at: u64,

    /// Monetary amount of the order
    pub value: u64,

    /// One-way delivery duration (clock units)
    pub travel_time: u64,

    /// Derived priority score (higher is served first)
    pub priority: Decimal,

    /// Estimated delivery time, `None` until the ledger assigns it
    eta: Option<u64>,
}

impl DeliveryOrder {
    /// Build an order scored with the default [`WeightedScorer`]
    ///
    /// # Returns
    ///
    /// `None` if the priority score cannot be computed
    pub fn new(id: u64, placed_at: u64, value: u64, travel_time: u64) -> Option<Self> {
        Self::with_scorer(id, placed_at, value, travel_time, &WeightedScorer::default())
    }

    /// Build an order scored by a caller-supplied scorer
    ///
    /// # Returns
    ///
    /// `None` if `scorer` cannot score these inputs
    pub fn with_scorer<S: PriorityScorer + ?Sized>(
        id: u64,
        placed_at: u64,
        value: u64,
        travel_time: u64,
        scorer: &S,
    ) -> Option<Self> {
        let priority = scorer.score(placed_at, value)?;
        Some(Self::with_priority(id, placed_at, value, travel_time, priority))
    }

    /// Build an order with an already computed priority score
    pub fn with_priority(
        id: u64,
        placed_at: u64,
        value: u64,
        travel_time: u64,
        priority: Decimal,
    ) -> Self {
        Self {
            id,
            placed_at,
            value,
            travel_time,
            priority,
            eta: None,
        }
    }

    /// Assigned ETA, if any
    #[inline]
    pub fn eta(&self) -> Option<u64> {
        self.eta
    }

    /// Fix the ETA. Must happen once, before the order enters the ETA index.
    pub(crate) fn assign_eta(&mut self, eta: u64) {
        debug_assert!(self.eta.is_none(), "ETA of order {} assigned twice", self.id);
        self.eta = Some(eta);
    }

    /// Plain-data view of the order (ETA 0 while unassigned)
    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::new(
            self.id,
            self.placed_at,
            self.value,
            self.travel_time,
            self.eta.unwrap_or(0),
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
