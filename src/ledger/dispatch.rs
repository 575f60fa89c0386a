//! Dispatch ledger: outstanding orders indexed by priority and by ETA.
//!
//! ## Architecture
//!
//! - **Slab**: owns every outstanding `DeliveryOrder`, addressed by slot
//! - **Priority index**: AVL tree of `PriorityKey`, ascending score
//! - **ETA index**: AVL tree of `EtaKey`, ascending ETA
//! - **HashMap**: order id to slot, for O(1) lookup and cancel
//!
//! Both indexes always hold keys for exactly the same set of slots. Every
//! mutation touches them back to back and nothing between the two steps can
//! fail, so each ledger operation is atomic from the caller's side.
//!
//! ## ETA Chaining
//!
//! A new order queues behind the nearest outstanding order with a strictly
//! higher priority score:
//!
//! ```text
//! eta = successor.eta + travel_time     (higher-priority order exists)
//! eta = placed_at + travel_time         (new order has the top score)
//! ```
//!
//! The successor lookup only reads priority scores, so the new order's ETA
//! can be fixed before its key enters either index.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use slab::Slab;

use crate::error::{DispatchError, Result};
use crate::index::BalancedOrderIndex;
use crate::ledger::config::LedgerConfig;
use crate::ledger::keys::{ByEta, ByPriority, EtaKey, PriorityKey};
use crate::types::{DeliveryOrder, OrderSnapshot, PriorityScorer, WeightedScorer};

/// Ledger of outstanding deliveries for a single delivery agent.
///
/// ## Example
///
/// ```
/// use glide_dispatch::ledger::DispatchLedger;
///
/// let mut ledger = DispatchLedger::new();
///
/// // Highest priority: ETA = placed_at + travel_time
/// assert_eq!(ledger.create_order(1, 0, 50, 10).unwrap(), 10);
/// // Lower priority: queued behind order 1
/// assert_eq!(ledger.create_order(2, 0, 10, 5).unwrap(), 15);
///
/// assert_eq!(ledger.orders_due_between(0, 12), vec![1]);
/// assert_eq!(ledger.rank_by_id(2), Some(1));
///
/// ledger.cancel_order(1);
/// assert!(ledger.lookup_by_id(1).is_none());
/// ```
#[derive(Debug)]
pub struct DispatchLedger<S = WeightedScorer> {
    /// Outstanding order storage
    orders: Slab<DeliveryOrder>,

    /// Orders by ascending priority score
    by_priority: BalancedOrderIndex<PriorityKey, ByPriority>,

    /// Orders by ascending ETA
    by_eta: BalancedOrderIndex<EtaKey, ByEta>,

    /// Order ID to slab slot mapping
    order_index: HashMap<u64, usize>,

    /// Priority scoring function
    scorer: S,
}

impl Default for DispatchLedger<WeightedScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchLedger<WeightedScorer> {
    /// Create an empty ledger with the default configuration
    pub fn new() -> Self {
        Self::with_capacity(LedgerConfig::default().capacity)
    }

    /// Create an empty ledger with pre-allocated order slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_scorer(WeightedScorer::default(), capacity)
    }

    /// Create an empty ledger from a validated configuration
    pub fn with_config(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_scorer(config.scorer, config.capacity))
    }
}

impl<S: PriorityScorer> DispatchLedger<S> {
    /// Create an empty ledger scoring orders with `scorer`
    pub fn with_scorer(scorer: S, capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(capacity),
            by_priority: BalancedOrderIndex::with_order(ByPriority),
            by_eta: BalancedOrderIndex::with_order(ByEta),
            order_index: HashMap::with_capacity(capacity),
            scorer,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of outstanding orders
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if no orders are outstanding
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Pre-allocated order slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Create an order and return its assigned ETA.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::DuplicateOrder`] if `id` is already outstanding
    /// - [`DispatchError::ScoreOverflow`] if the scorer cannot score the inputs
    /// - [`DispatchError::EtaOverflow`] if the ETA does not fit in `u64`
    ///
    /// The ledger is left untouched on error.
    pub fn create_order(
        &mut self,
        id: u64,
        placed_at: u64,
        value: u64,
        travel_time: u64,
    ) -> Result<u64> {
        if self.order_index.contains_key(&id) {
            return Err(DispatchError::DuplicateOrder(id));
        }

        let priority = self
            .scorer
            .score(placed_at, value)
            .ok_or(DispatchError::ScoreOverflow { id })?;
        let mut order = DeliveryOrder::with_priority(id, placed_at, value, travel_time, priority);
        let priority_key = PriorityKey {
            score: order.priority,
            slot: self.orders.vacant_key(),
        };

        // Every indexed order already carries its ETA.
        let base = self
            .by_priority
            .successor(&priority_key)
            .and_then(|next| self.orders.get(next.slot))
            .and_then(DeliveryOrder::eta)
            .unwrap_or(placed_at);

        let eta = base
            .checked_add(travel_time)
            .ok_or(DispatchError::EtaOverflow {
                id,
                base,
                travel_time,
            })?;

        order.assign_eta(eta);
        let slot = self.orders.insert(order);
        debug_assert_eq!(slot, priority_key.slot);

        self.by_priority.insert(priority_key);
        self.by_eta.insert(EtaKey { eta, slot });
        self.order_index.insert(id, slot);

        tracing::debug!(order_id = id, placed_at, value, travel_time, eta, "order created");
        self.debug_check_lockstep();
        Ok(eta)
    }

    /// Cancel an outstanding order by id.
    ///
    /// Returns the removed order, or `None` (and changes nothing) if no
    /// order with this id is outstanding.
    pub fn cancel_order(&mut self, id: u64) -> Option<OrderSnapshot> {
        let slot = *self.order_index.get(&id)?;
        let order = self.remove_slot(slot)?;

        tracing::debug!(order_id = id, eta = order.eta, "order cancelled");
        Some(order)
    }

    /// Remove every order due at or before `now`, in ascending ETA order
    pub fn deliver_through(&mut self, now: u64) -> Vec<OrderSnapshot> {
        let due: Vec<usize> = self
            .by_eta
            .range_scan(&EtaKey::bound(0), &EtaKey::bound(now))
            .into_iter()
            .map(|key| key.slot)
            .collect();

        let delivered: Vec<OrderSnapshot> = due
            .into_iter()
            .filter_map(|slot| self.remove_slot(slot))
            .collect();

        if !delivered.is_empty() {
            tracing::info!(now, delivered = delivered.len(), "orders delivered");
        }
        delivered
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Order fields and ETA for an outstanding order
    pub fn lookup_by_id(&self, id: u64) -> Option<OrderSnapshot> {
        self.get(id).map(DeliveryOrder::snapshot)
    }

    /// Outstanding order by id
    pub fn get(&self, id: u64) -> Option<&DeliveryOrder> {
        let slot = *self.order_index.get(&id)?;
        self.orders.get(slot)
    }

    /// Ids of orders whose ETA falls in `[t1, t2]`, ascending by ETA
    pub fn orders_due_between(&self, t1: u64, t2: u64) -> Vec<u64> {
        self.by_eta
            .range_scan(&EtaKey::bound(t1), &EtaKey::bound(t2))
            .into_iter()
            .filter_map(|key| self.orders.get(key.slot))
            .map(|order| order.id)
            .collect()
    }

    /// How many orders are delivered before order `id`.
    ///
    /// Returns `None` if `id` is not outstanding.
    pub fn rank_by_id(&self, id: u64) -> Option<usize> {
        let key = self.eta_key(id)?;
        self.by_eta.rank(&key)
    }

    /// Snapshots of every outstanding order, ascending by ETA
    pub fn outstanding(&self) -> Vec<OrderSnapshot> {
        self.by_eta
            .iter()
            .filter_map(|key| self.orders.get(key.slot))
            .map(DeliveryOrder::snapshot)
            .collect()
    }

    /// Ids of outstanding orders, highest priority first
    pub fn priority_order(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .by_priority
            .iter()
            .filter_map(|key| self.orders.get(key.slot))
            .map(|order| order.id)
            .collect();
        ids.reverse();
        ids
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over the SSZ encoding of every outstanding snapshot in ETA
    /// order. Equal outstanding state yields an equal root.
    pub fn state_root(&self) -> Result<[u8; 32]> {
        let mut hasher = Sha256::new();
        for snapshot in self.outstanding() {
            let bytes = ssz_rs::serialize(&snapshot)
                .map_err(|e| DispatchError::Encoding(format!("{:?}", e)))?;
            hasher.update(&bytes);
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }

    /// State root as a hex string
    pub fn state_root_hex(&self) -> Result<String> {
        self.state_root().map(hex::encode)
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Check both indexes are balanced and reference exactly the
    /// outstanding orders
    pub fn is_consistent(&self) -> bool {
        let sizes_match = self.by_priority.len() == self.orders.len()
            && self.by_eta.len() == self.orders.len()
            && self.order_index.len() == self.orders.len();
        if !sizes_match || !self.by_priority.is_balanced() || !self.by_eta.is_balanced() {
            return false;
        }

        self.orders.iter().all(|(slot, order)| {
            let priority_key = PriorityKey {
                score: order.priority,
                slot,
            };
            let eta_indexed = order
                .eta()
                .map_or(false, |eta| self.by_eta.contains(&EtaKey { eta, slot }));
            self.order_index.get(&order.id) == Some(&slot)
                && self.by_priority.contains(&priority_key)
                && eta_indexed
        })
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn eta_key(&self, id: u64) -> Option<EtaKey> {
        let slot = *self.order_index.get(&id)?;
        let eta = self.orders.get(slot)?.eta()?;
        Some(EtaKey { eta, slot })
    }

    /// Drop an order from the slab, both indexes and the id map
    fn remove_slot(&mut self, slot: usize) -> Option<OrderSnapshot> {
        let order = self.orders.try_remove(slot)?;

        self.by_priority.delete(&PriorityKey {
            score: order.priority,
            slot,
        });
        if let Some(eta) = order.eta() {
            self.by_eta.delete(&EtaKey { eta, slot });
        }
        self.order_index.remove(&order.id);

        self.debug_check_lockstep();
        Some(order.snapshot())
    }

    #[inline]
    fn debug_check_lockstep(&self) {
        debug_assert_eq!(self.by_priority.len(), self.orders.len());
        debug_assert_eq!(self.by_eta.len(), self.orders.len());
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
