//! Error types for the dispatch ledger
//!
//! Lookups that miss are not errors: they return `None` or an empty
//! vector. Errors are reserved for inputs the ledger refuses to index.

use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, DispatchError>;

/// Ledger errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// An outstanding order already uses this id
    #[error("Order {0} already exists")]
    DuplicateOrder(u64),

    /// The priority score could not be computed (overflow or zero divisor)
    #[error("Priority score overflow for order {id}")]
    ScoreOverflow {
        /// Order being created
        id: u64,
    },

    /// The computed ETA does not fit in the clock type
    #[error("ETA overflow for order {id}: {base} + {travel_time}")]
    EtaOverflow {
        /// Order being created
        id: u64,
        /// ETA (or placement time) the new order queues behind
        base: u64,
        /// Travel time of the new order
        travel_time: u64,
    },

    /// SSZ encoding of a snapshot failed
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
