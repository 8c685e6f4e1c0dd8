use super::node::{NodeId, Nodes};
use super::traversal::{Iter, Traverse, TraversalStrategy};
use super::{Color, Side};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// An ordered container backed by a red-black tree.
///
/// Every absent child or parent is represented by a single sentinel node, always
/// BLACK. Equal keys are routed to the right subtree on insertion, so the tree
/// can hold duplicates; `delete` removes one of them per call.
#[derive(Debug, Clone)]
pub struct RedBlackTree<T: Ord> {
    pub(super) nodes: Nodes<T>,
    pub(super) root: NodeId,
    len: usize,
    strategy: TraversalStrategy,
}

impl<T: Ord> RedBlackTree<T> {
    /// Create a new empty tree, using the in-order traversal strategy
    pub fn new() -> Self {
        RedBlackTree {
            nodes: Nodes::new(),
            root: NodeId::NIL,
            len: 0,
            strategy: TraversalStrategy::default(),
        }
    }

    /// Return the number of keys in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Insert a new key and rebalance the tree.
    /// Keys strictly smaller than a node go to its left, all others to its right
    pub fn insert(&mut self, key: T) {
        // Descend to the leaf position where the key belongs
        let mut parent = NodeId::NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while let Some(node) = self.nodes.get(current) {
            parent = current;
            if key < node.key {
                side = Side::Left;
                current = node.left;
            } else {
                side = Side::Right;
                current = node.right;
            }
        }

        self.len += 1;
        if parent.is_nil() {
            debug!("inserting first node, tree now has {} keys", self.len);
            self.root = self.nodes.alloc(key, Color::Black);
        } else {
            let id = self.nodes.alloc(key, Color::Red);
            self.nodes.set_parent(id, parent);
            self.nodes.set_child(parent, side, id);
            debug!("inserted red node on the {:?} side, tree now has {} keys", side, self.len);
            self.insert_fixup(id);
        }
    }

    /// Restore the red-black properties after inserting the red node `n`
    fn insert_fixup(&mut self, mut n: NodeId) {
        while self.nodes.is_red(self.nodes.parent(n)) {
            let parent = self.nodes.parent(n);
            // A red parent is never the root, so the grandparent is a real node
            let grandparent = self.nodes.parent(parent);
            let side = self.nodes.side_of(parent).unwrap_or(Side::Left);
            let uncle = self.nodes.child(grandparent, side.opposite());

            if self.nodes.is_red(uncle) {
                trace!("insert fixup: red uncle, recoloring");
                self.nodes.set_color(parent, Color::Black);
                self.nodes.set_color(uncle, Color::Black);
                self.nodes.set_color(grandparent, Color::Red);
                n = grandparent;
                continue;
            }

            if n == self.nodes.child(parent, side.opposite()) {
                trace!("insert fixup: inner grandchild, rotating parent {:?}", side);
                n = parent;
                self.rotate(n, side);
            }

            trace!("insert fixup: outer grandchild, rotating grandparent {:?}", side.opposite());
            let parent = self.nodes.parent(n);
            let grandparent = self.nodes.parent(parent);
            self.nodes.set_color(parent, Color::Black);
            self.nodes.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }
        self.nodes.set_color(self.root, Color::Black);
    }

    /// Rotate `n` down towards `side`, promoting its child on the other side into its place.
    /// The in-order sequence of keys is preserved
    fn rotate(&mut self, n: NodeId, side: Side) {
        let pivot = self.nodes.child(n, side.opposite());
        if pivot.is_nil() {
            return;
        }

        // The inner subtree of the pivot moves under `n`
        let inner = self.nodes.child(pivot, side);
        self.nodes.set_child(n, side.opposite(), inner);
        self.nodes.set_parent(inner, n);

        // The pivot takes the place of `n` below its parent (or as the root)
        let parent = self.nodes.parent(n);
        self.replace_child(parent, n, pivot);
        self.nodes.set_parent(pivot, parent);

        self.nodes.set_child(pivot, side, n);
        self.nodes.set_parent(n, pivot);
    }

    /// Point the link of `parent` that currently holds `old` at `new` instead.
    /// When `parent` is the sentinel, `old` was the root
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            self.root = new;
        } else if self.nodes.left(parent) == old {
            self.nodes.set_left(parent, new);
        } else {
            self.nodes.set_right(parent, new);
        }
    }

    /// Attach `replacement` where `target` hangs, detaching the `target` subtree.
    /// The sentinel never records a parent, so callers track it themselves
    fn transplant(&mut self, target: NodeId, replacement: NodeId) {
        let parent = self.nodes.parent(target);
        self.replace_child(parent, target, replacement);
        self.nodes.set_parent(replacement, parent);
    }

    /// Return the node holding `key`, or the sentinel if it is absent
    fn find_node<Q>(&self, key: &Q) -> NodeId
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node) = self.nodes.get(current) {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return current,
            };
        }
        NodeId::NIL
    }

    /// Check whether the key is present
    pub fn find<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find_node(key).is_nil()
    }

    /// Return the stored key that compares equal to `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.nodes.key(self.find_node(key))
    }

    /// Remove one occurrence of `key`.
    /// Return false, without touching the tree, if it is not present
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find_node(key);
        if target.is_nil() {
            return false;
        }

        // `removed_color` is the color of the node physically leaving its position.
        // `x` moves into that position and `x_parent` is where it now hangs
        let mut removed_color = self.nodes.color(target);
        let x;
        let x_parent;
        let left = self.nodes.left(target);
        let right = self.nodes.right(target);

        if left.is_nil() {
            x = right;
            x_parent = self.nodes.parent(target);
            self.transplant(target, right);
        } else if right.is_nil() {
            x = left;
            x_parent = self.nodes.parent(target);
            self.transplant(target, left);
        } else {
            let successor = self.tree_minimum(right);
            removed_color = self.nodes.color(successor);
            x = self.nodes.right(successor);
            if self.nodes.parent(successor) == target {
                x_parent = successor;
            } else {
                x_parent = self.nodes.parent(successor);
                self.transplant(successor, x);
                self.nodes.set_right(successor, right);
                self.nodes.set_parent(right, successor);
            }
            self.transplant(target, successor);
            self.nodes.set_left(successor, left);
            self.nodes.set_parent(left, successor);
            self.nodes.set_color(successor, self.nodes.color(target));
        }

        if removed_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        self.nodes.release(target);
        self.len -= 1;
        debug!("deleted node, tree now has {} keys", self.len);
        true
    }

    /// Restore the black height after a BLACK node left the position now held by `x`,
    /// whose parent is `parent` (`x` may be the sentinel)
    fn delete_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && self.nodes.is_black(x) {
            let side = if self.nodes.left(parent) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();
            let mut sibling = self.nodes.child(parent, far);

            if self.nodes.is_red(sibling) {
                trace!("delete fixup: red sibling, rotating parent {:?}", side);
                self.nodes.set_color(sibling, Color::Black);
                self.nodes.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.nodes.child(parent, far);
            }

            let near_child = self.nodes.child(sibling, side);
            let far_child = self.nodes.child(sibling, far);
            if self.nodes.is_black(near_child) && self.nodes.is_black(far_child) {
                trace!("delete fixup: black nephews, moving deficiency up");
                self.nodes.set_color(sibling, Color::Red);
                x = parent;
                parent = self.nodes.parent(x);
                continue;
            }

            if self.nodes.is_black(far_child) {
                trace!("delete fixup: black far nephew, rotating sibling {:?}", far);
                self.nodes.set_color(near_child, Color::Black);
                self.nodes.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.nodes.child(parent, far);
            }

            trace!("delete fixup: red far nephew, rotating parent {:?}", side);
            self.nodes.set_color(sibling, self.nodes.color(parent));
            self.nodes.set_color(parent, Color::Black);
            self.nodes.set_color(self.nodes.child(sibling, far), Color::Black);
            self.rotate(parent, side);
            x = self.root;
        }
        self.nodes.set_color(x, Color::Black);
    }

    /// Return the leftmost node of the subtree rooted at `subtree`
    fn tree_minimum(&self, mut subtree: NodeId) -> NodeId {
        while !self.nodes.left(subtree).is_nil() {
            subtree = self.nodes.left(subtree);
        }
        subtree
    }

    fn tree_maximum(&self, mut subtree: NodeId) -> NodeId {
        while !self.nodes.right(subtree).is_nil() {
            subtree = self.nodes.right(subtree);
        }
        subtree
    }

    /// Return the smallest key
    pub fn min(&self) -> Option<&T> {
        self.nodes.key(self.tree_minimum(self.root))
    }

    /// Return the largest key
    pub fn max(&self) -> Option<&T> {
        self.nodes.key(self.tree_maximum(self.root))
    }

    /// Detach the root, dropping every node
    pub fn clear(&mut self) {
        debug!("clearing tree with {} keys", self.len);
        self.nodes.clear();
        self.root = NodeId::NIL;
        self.len = 0;
    }

    /// Number of edges on the longest path from the root to a leaf.
    /// Both an empty tree and a single node have height 0
    pub fn height(&self) -> usize {
        fn levels<T>(nodes: &Nodes<T>, id: NodeId) -> usize {
            match nodes.get(id) {
                None => 0,
                Some(node) => 1 + levels(nodes, node.left).max(levels(nodes, node.right)),
            }
        }
        levels(&self.nodes, self.root).saturating_sub(1)
    }

    /// Number of BLACK nodes on the path from the root down to the leftmost sentinel
    pub fn black_height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node) = self.nodes.get(current) {
            if node.color == Color::Black {
                height += 1;
            }
            current = node.left;
        }
        height
    }

    pub fn traversal_strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    /// Swap the algorithm used by `traverse`. The tree structure is not affected
    pub fn set_traversal_strategy(&mut self, strategy: TraversalStrategy) {
        self.strategy = strategy;
    }

    /// Walk the tree with the active traversal strategy
    pub fn traverse(&self) -> Traverse<T> {
        self.traverse_with(self.strategy)
    }

    /// Walk the tree with the given strategy, ignoring the active one
    pub fn traverse_with(&self, strategy: TraversalStrategy) -> Traverse<T> {
        Traverse::new(&self.nodes, self.root, self.len, strategy)
    }

    /// Return a sorted iterator over references to the keys
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.traverse_with(TraversalStrategy::InOrder))
    }
}

impl<T: Ord> Default for RedBlackTree<T> {
    fn default() -> Self {
        RedBlackTree::new()
    }
}

impl<T: Ord> std::iter::FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, T: Ord> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
