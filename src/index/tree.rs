//! Height-balanced (AVL) binary search tree used as the dispatch index.
//!
//! ## Ordering
//!
//! Keys are ordered by a [`KeyOrder`] rather than `Ord`, so one record type
//! can be indexed under several orderings. Keys that compare equal are
//! accepted: insertion routes ties to the right, so among equal keys the
//! in-order position follows insertion order.
//!
//! ## Identity vs. order
//!
//! The comparator decides *where* a key lives; `PartialEq` decides *which*
//! key it is. [`BalancedOrderIndex::delete`] and [`BalancedOrderIndex::rank`]
//! use both, so a caller holding many keys with the same score can still
//! remove or rank exactly one of them.
//!
//! ## Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | insert | O(log n) |
//! | delete | O(log n) (+ equal-key fan out) |
//! | search / successor | O(log n) |
//! | range_scan | O(log n + k) |
//! | rank | O(n) |

use std::cmp::Ordering;

use crate::index::compare::{KeyOrder, NaturalOrder};
use crate::index::node::{self, AvlNode, Link};

/// Self-balancing binary search tree generic over key and ordering.
///
/// ## Example
///
/// ```
/// use glide_dispatch::index::BalancedOrderIndex;
///
/// let mut index = BalancedOrderIndex::new();
/// for key in [50, 20, 80, 10, 30] {
///     index.insert(key);
/// }
///
/// assert_eq!(index.search(&30), Some(&30));
/// assert_eq!(index.successor(&30), Some(&50));
/// assert_eq!(index.range_scan(&15, &50), vec![&20, &30, &50]);
/// assert_eq!(index.rank(&80), Some(4));
/// assert_eq!(index.delete(&20), Some(20));
/// assert!(index.is_balanced());
/// ```
#[derive(Debug, Clone)]
pub struct BalancedOrderIndex<K, C = NaturalOrder> {
    root: Link<K>,
    len: usize,
    order: C,
}

impl<K: Ord> BalancedOrderIndex<K, NaturalOrder> {
    /// Create an empty index ordered by `K: Ord`
    pub fn new() -> Self {
        Self::with_order(NaturalOrder)
    }
}

impl<K: Ord> Default for BalancedOrderIndex<K, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, C: KeyOrder<K>> BalancedOrderIndex<K, C> {
    /// Create an empty index ordered by an explicit comparator
    pub fn with_order(order: C) -> Self {
        Self {
            root: None,
            len: 0,
            order,
        }
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of stored keys
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index holds no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: -1 when empty, 0 for a single key
    #[inline]
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// Remove every key
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a key, rebalancing every ancestor on the way back up.
    ///
    /// Duplicates are accepted and placed to the right of existing equal
    /// keys. Never fails.
    pub fn insert(&mut self, key: K) {
        let root = self.root.take();
        self.root = Some(insert_node(root, key, &self.order));
        self.len += 1;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Find a stored key that compares equal to `key`
    pub fn search(&self, key: &K) -> Option<&K> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match self.order.compare(key, &node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.key),
            };
        }
        None
    }

    /// All keys in `[low, high]` (inclusive) in ascending order.
    ///
    /// Returns an empty vector when nothing matches or when `low > high`.
    pub fn range_scan(&self, low: &K, high: &K) -> Vec<&K> {
        let mut out = Vec::new();
        if self.order.compare(low, high) != Ordering::Greater {
            collect_range(&self.root, low, high, &self.order, &mut out);
        }
        out
    }

    /// Smallest stored key strictly greater than `key`
    pub fn successor(&self, key: &K) -> Option<&K> {
        let mut current = self.root.as_deref();
        let mut best = None;
        while let Some(node) = current {
            if self.order.compare(&node.key, key) == Ordering::Greater {
                best = Some(&node.key);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }
        best
    }

    /// Smallest key in comparator order
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Largest key in comparator order
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// In-order iterator over the stored keys
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height().max(0) as usize + 1),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Audit the tree: cached heights are exact, every node's balance
    /// factor is within [-1, 1], the in-order sequence never decreases and
    /// the key count matches `len()`.
    pub fn is_balanced(&self) -> bool {
        if audit_heights(&self.root).is_none() {
            return false;
        }
        let mut count = 0usize;
        let mut previous: Option<&K> = None;
        for key in self.iter() {
            if let Some(prev) = previous {
                if self.order.compare(prev, key) == Ordering::Greater {
                    return false;
                }
            }
            previous = Some(key);
            count += 1;
        }
        count == self.len
    }
}

impl<K: PartialEq, C: KeyOrder<K>> BalancedOrderIndex<K, C> {
    /// Remove the stored key that is `==` to `key`.
    ///
    /// The comparator routes the descent; among keys that compare equal,
    /// only the one equal by `PartialEq` is removed. Absent keys are a
    /// no-op and return `None`.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let mut removed = None;
        let root = self.root.take();
        self.root = delete_node(root, key, &self.order, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Check whether this exact key (by `PartialEq`) is stored
    pub fn contains(&self, key: &K) -> bool {
        self.search_exact(key).is_some()
    }

    /// Number of keys visited before `key` in an in-order walk.
    ///
    /// Returns `None` when `key` is not stored.
    pub fn rank(&self, key: &K) -> Option<usize> {
        self.iter().position(|stored| stored == key)
    }

    fn search_exact(&self, key: &K) -> Option<&K> {
        find_exact(self.root.as_deref(), key, &self.order)
    }
}

impl<'a, K, C: KeyOrder<K>> IntoIterator for &'a BalancedOrderIndex<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`BalancedOrderIndex`]
#[derive(Debug)]
pub struct Iter<'a, K> {
    stack: Vec<&'a AvlNode<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut current: Option<&'a AvlNode<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

// ============================================================================
// Recursive helpers
// ============================================================================

/// Restore the AVL invariant at `node`, assuming both subtrees are valid.
///
/// The single vs. double rotation is chosen from the heavy child's own
/// balance factor. A child balance of 0 (only possible after a delete)
/// takes the single rotation.
fn rebalance<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    node.update_height();
    let balance = node.balance();

    if balance > 1 {
        if node::balance(&node.left) < 0 {
            // left-right
            node.left = node.left.take().map(node::rotate_left);
        }
        return node::rotate_right(node);
    }

    if balance < -1 {
        if node::balance(&node.right) > 0 {
            // right-left
            node.right = node.right.take().map(node::rotate_right);
        }
        return node::rotate_left(node);
    }

    node
}

fn insert_node<K, C: KeyOrder<K>>(link: Link<K>, key: K, order: &C) -> Box<AvlNode<K>> {
    let mut node = match link {
        Some(node) => node,
        None => return AvlNode::leaf(key),
    };

    if order.compare(&key, &node.key) == Ordering::Less {
        node.left = Some(insert_node(node.left.take(), key, order));
    } else {
        node.right = Some(insert_node(node.right.take(), key, order));
    }

    rebalance(node)
}

fn delete_node<K: PartialEq, C: KeyOrder<K>>(
    link: Link<K>,
    key: &K,
    order: &C,
    removed: &mut Option<K>,
) -> Link<K> {
    let mut node = link?;

    match order.compare(key, &node.key) {
        Ordering::Less => {
            node.left = delete_node(node.left.take(), key, order, removed);
        }
        Ordering::Greater => {
            node.right = delete_node(node.right.take(), key, order, removed);
        }
        Ordering::Equal if node.key == *key => {
            return detach(node, removed);
        }
        Ordering::Equal => {
            // Rotations can leave equal keys on either side.
            node.left = delete_node(node.left.take(), key, order, removed);
            if removed.is_none() {
                node.right = delete_node(node.right.take(), key, order, removed);
            }
        }
    }

    Some(rebalance(node))
}

/// Unlink `node` from the tree, handing its key to `removed`.
///
/// A node with two children is replaced by the minimum of its right
/// subtree, which is detached directly rather than searched for again.
fn detach<K>(node: Box<AvlNode<K>>, removed: &mut Option<K>) -> Link<K> {
    let AvlNode {
        key, left, right, ..
    } = *node;
    *removed = Some(key);

    match (left, right) {
        (None, child) | (child, None) => child,
        (Some(left), Some(right)) => {
            let (rest, successor) = take_min(right);
            let mut replacement = AvlNode::leaf(successor);
            replacement.left = Some(left);
            replacement.right = rest;
            Some(rebalance(replacement))
        }
    }
}

/// Remove the leftmost node of a subtree, returning the rebalanced
/// remainder and the removed key.
fn take_min<K>(mut node: Box<AvlNode<K>>) -> (Link<K>, K) {
    match node.left.take() {
        None => {
            let AvlNode { key, right, .. } = *node;
            (right, key)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn find_exact<'a, K: PartialEq, C: KeyOrder<K>>(
    link: Option<&'a AvlNode<K>>,
    key: &K,
    order: &C,
) -> Option<&'a K> {
    let node = link?;
    match order.compare(key, &node.key) {
        Ordering::Less => find_exact(node.left.as_deref(), key, order),
        Ordering::Greater => find_exact(node.right.as_deref(), key, order),
        Ordering::Equal if node.key == *key => Some(&node.key),
        Ordering::Equal => find_exact(node.left.as_deref(), key, order)
            .or_else(|| find_exact(node.right.as_deref(), key, order)),
    }
}

fn collect_range<'a, K, C: KeyOrder<K>>(
    link: &'a Link<K>,
    low: &K,
    high: &K,
    order: &C,
    out: &mut Vec<&'a K>,
) {
    let node = match link {
        Some(node) => node,
        None => return,
    };

    let at_or_above_low = order.compare(&node.key, low) != Ordering::Less;
    let at_or_below_high = order.compare(&node.key, high) != Ordering::Greater;

    if at_or_above_low {
        collect_range(&node.left, low, high, order, out);
    }
    if at_or_above_low && at_or_below_high {
        out.push(&node.key);
    }
    if at_or_below_high {
        collect_range(&node.right, low, high, order, out);
    }
}

/// Verify cached heights and balance factors, returning the real height
fn audit_heights<K>(link: &Link<K>) -> Option<i32> {
    let node = match link {
        Some(node) => node,
        None => return Some(-1),
    };
    let left = audit_heights(&node.left)?;
    let right = audit_heights(&node.right)?;
    let height = 1 + left.max(right);
    if height != node.height || (left - right).abs() > 1 {
        return None;
    }
    Some(height)
}

// ============================================================================
// Unit Tests
// ============================================================================
