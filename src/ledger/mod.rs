//! Dispatch ledger module.
//!
//! ## Components
//!
//! - [`DispatchLedger`]: owns the orders and keeps both indexes in lockstep
//! - [`PriorityKey`] / [`EtaKey`]: index keys pointing at slab slots
//! - [`LedgerConfig`]: capacity and scoring weights
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | create_order | O(log n) |
//! | cancel_order | O(log n) |
//! | lookup_by_id | O(1) |
//! | orders_due_between | O(log n + k) |
//! | rank_by_id | O(n) |
//! | deliver_through | O(k log n) |

pub mod config;
pub mod dispatch;
pub mod keys;

pub use config::LedgerConfig;
pub use dispatch::DispatchLedger;
pub use keys::{ByEta, ByPriority, EtaKey, PriorityKey};
