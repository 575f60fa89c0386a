//! Configuration for the dispatch ledger

use crate::error::{DispatchError, Result};
use crate::types::WeightedScorer;

/// Default number of order slots pre-allocated by the ledger
pub const DEFAULT_CAPACITY: usize = 1024;

/// Ledger configuration
///
/// ## Example
///
/// ```
/// use glide_dispatch::ledger::{DispatchLedger, LedgerConfig};
///
/// let config = LedgerConfig::default().with_capacity(10_000);
/// let ledger = DispatchLedger::with_config(config).unwrap();
/// assert!(ledger.capacity() >= 10_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Order slots to pre-allocate
    pub capacity: usize,

    /// Priority scoring weights
    pub scorer: WeightedScorer,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            scorer: WeightedScorer::default(),
        }
    }
}

impl LedgerConfig {
    /// Set the pre-allocated capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the priority scoring weights
    pub fn with_scorer(mut self, scorer: WeightedScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Reject settings the ledger cannot run with
    pub fn validate(&self) -> Result<()> {
        if !self.scorer.is_valid() {
            return Err(DispatchError::Config(
                "scorer value_normalizer must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
