//! Pluggable key orderings for the AVL index.
//!
//! The same logical record can be indexed under several orderings (by
//! priority, by ETA) so the index never relies on `K: Ord` directly. It
//! asks a `KeyOrder<K>` instead.

use std::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// Implemented for [`NaturalOrder`] (delegates to `Ord`) and for any
/// `Fn(&K, &K) -> Ordering`, so closures and fn pointers work as
/// comparators.
///
/// ## Example
///
/// ```
/// use glide_dispatch::index::{BalancedOrderIndex, KeyOrder};
/// use std::cmp::Ordering;
///
/// let descending = |a: &u32, b: &u32| b.cmp(a);
/// assert_eq!(descending.compare(&1, &2), Ordering::Greater);
///
/// let mut index = BalancedOrderIndex::with_order(descending);
/// index.insert(1);
/// index.insert(3);
/// assert_eq!(index.iter().copied().collect::<Vec<_>>(), vec![3, 1]);
/// ```
pub trait KeyOrder<K: ?Sized> {
    /// Compare two keys
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Ordering given by the key type's own `Ord` implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> KeyOrder<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized, F> KeyOrder<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
