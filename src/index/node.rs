//! Tree node and rotation primitives for the AVL index.
//!
//! ## Design
//!
//! `AvlNode` owns its key and both child subtrees through `Box`. There are
//! no parent pointers: rebalancing happens on the recursive return path,
//! each level handing a (possibly new) subtree root back to its caller.
//!
//! ## Heights
//!
//! A leaf has height 0 and an empty subtree has height -1, so for every node
//! `height = 1 + max(height(left), height(right))`.
//!
//! ```text
//!        y                      x
//!       / \    rotate_right    / \
//!      x   C   ----------->   A   y
//!     / \      <-----------      / \
//!    A   B     rotate_left      B   C
//! ```

/// Owned link to a subtree (`None` for an empty subtree)
pub(crate) type Link<K> = Option<Box<AvlNode<K>>>;

/// A single node of the AVL index.
#[derive(Debug, Clone)]
pub(crate) struct AvlNode<K> {
    /// Stored key
    pub key: K,

    /// Cached subtree height (leaf = 0)
    pub height: i32,

    /// Left subtree (keys ordered before `key`)
    pub left: Link<K>,

    /// Right subtree (keys ordered at or after `key`)
    pub right: Link<K>,
}

impl<K> AvlNode<K> {
    /// Create a detached leaf node
    #[inline]
    pub fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            height: 0,
            left: None,
            right: None,
        })
    }

    /// Recompute the cached height from the children's cached heights
    #[inline]
    pub fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    /// `height(left) - height(right)`
    #[inline]
    pub fn balance(&self) -> i32 {
        height(&self.left) - height(&self.right)
    }
}

/// Height of a possibly empty subtree (-1 when empty)
#[inline]
pub(crate) fn height<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// Balance factor of a possibly empty subtree (0 when empty)
#[inline]
pub(crate) fn balance<K>(link: &Link<K>) -> i32 {
    link.as_ref().map_or(0, |node| node.balance())
}

/// Rotate `node` right, promoting its left child.
///
/// The left child must exist; callers only rotate when the left side is
/// at least two levels taller.
pub(crate) fn rotate_right<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let mut pivot = match node.left.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Rotate `node` left, promoting its right child.
pub(crate) fn rotate_left<K>(mut node: Box<AvlNode<K>>) -> Box<AvlNode<K>> {
    let mut pivot = match node.right.take() {
        Some(pivot) => pivot,
        None => return node,
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

// ============================================================================
// Unit Tests
// ============================================================================
