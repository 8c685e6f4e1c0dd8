//! An ordered container backed by a red-black tree.
//!
//! Insertion, lookup and deletion run in `O(log n)` worst case. Absent children
//! and parents are all represented by one shared sentinel node, and the tree can
//! be read back with a swappable traversal strategy (pre, in or post order).
//!
//! ```
//! use sentinel_rbtree::{RedBlackTree, TraversalStrategy};
//!
//! let mut tree = RedBlackTree::new();
//! for key in vec![10, 20, 30] {
//!     tree.insert(key);
//! }
//! assert!(tree.find(&20));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
//!
//! tree.set_traversal_strategy(TraversalStrategy::PreOrder);
//! let root = tree.traverse().next().unwrap();
//! assert_eq!((*root.key, root.parent), (20, None));
//!
//! assert!(tree.delete(&20));
//! assert!(!tree.delete(&20));
//! ```
#[cfg(test)]
mod tests;

pub mod console;

#[cfg(any(test, feature = "key-generator"))]
pub mod key_generator;

pub mod rbtree;

pub use rbtree::{Color, InvariantViolation, NodeRecord, RedBlackTree, TraversalStrategy};
