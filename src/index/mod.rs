//! Ordered index for the dispatch ledger.
//!
//! ## Architecture
//!
//! The index is an AVL tree (height-balanced binary search tree):
//!
//! - **Owned nodes**: each node owns its children through `Box`, no parent pointers
//! - **Pluggable ordering**: a [`KeyOrder`] decides placement, so one record
//!   type can be indexed several ways
//! - **Bottom-up rebalancing**: heights are cached and fixed on the return path
//!
//! ## Components
//!
//! - [`KeyOrder`] / [`NaturalOrder`]: comparator abstraction
//! - [`BalancedOrderIndex`]: the tree itself
//!
//! ## Example
//!
//! ```
//! use glide_dispatch::index::BalancedOrderIndex;
//!
//! let mut index = BalancedOrderIndex::new();
//! for key in 1..=100u32 {
//!     index.insert(key);
//! }
//!
//! // ascending inserts are the worst case for a plain BST
//! assert!(index.height() <= 7);
//! assert_eq!(index.range_scan(&10, &12), vec![&10, &11, &12]);
//! ```

mod compare;
mod node;
mod tree;

pub use compare::{KeyOrder, NaturalOrder};
pub use tree::{BalancedOrderIndex, Iter};
