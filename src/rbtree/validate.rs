use super::node::NodeId;
use super::tree::RedBlackTree;
use super::Color;
use thiserror::Error;

/// A broken red-black tree property, as reported by `check_invariants`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("keys are out of order at in-order position {position}")]
    OutOfOrder { position: usize },

    #[error("the root is red")]
    RedRoot,

    #[error("red node at depth {depth} has a red child")]
    DoubleRed { depth: usize },

    #[error("black height differs below depth {depth}: {left} on the left, {right} on the right")]
    BlackHeight {
        depth: usize,
        left: usize,
        right: usize,
    },

    #[error("node at depth {depth} does not point back to its parent")]
    BrokenParentLink { depth: usize },

    #[error("tree reports {expected} keys but holds {actual}")]
    Length { expected: usize, actual: usize },
}

impl<T: Ord> RedBlackTree<T> {
    /// Verify every red-black property and the consistency of parent links.
    /// Return the black height of the tree: the number of BLACK nodes on any
    /// path from the root down to the sentinel
    pub fn check_invariants(&self) -> Result<usize, InvariantViolation> {
        if self.nodes.is_red(self.root) {
            return Err(InvariantViolation::RedRoot);
        }
        if !self.nodes.parent(self.root).is_nil() {
            return Err(InvariantViolation::BrokenParentLink { depth: 0 });
        }

        let black_height = self.check_subtree(self.root, 0)?;

        // Equal keys may end up on either side after rotations, so ordering
        // is checked on the whole in-order sequence
        let mut count = 0;
        let mut previous: Option<&T> = None;
        for key in self.iter() {
            if previous.map_or(false, |previous| previous > key) {
                return Err(InvariantViolation::OutOfOrder { position: count });
            }
            previous = Some(key);
            count += 1;
        }
        if count != self.len() {
            return Err(InvariantViolation::Length {
                expected: self.len(),
                actual: count,
            });
        }

        Ok(black_height)
    }

    /// Return the black height of the subtree rooted at `id`
    fn check_subtree(&self, id: NodeId, depth: usize) -> Result<usize, InvariantViolation> {
        let node = match self.nodes.get(id) {
            None => return Ok(0),
            Some(node) => node,
        };

        for &child in &[node.left, node.right] {
            if child.is_nil() {
                continue;
            }
            if self.nodes.parent(child) != id {
                return Err(InvariantViolation::BrokenParentLink { depth: depth + 1 });
            }
            if node.color == Color::Red && self.nodes.is_red(child) {
                return Err(InvariantViolation::DoubleRed { depth });
            }
        }

        let left = self.check_subtree(node.left, depth + 1)?;
        let right = self.check_subtree(node.right, depth + 1)?;
        if left != right {
            return Err(InvariantViolation::BlackHeight { depth, left, right });
        }

        Ok(left + if node.color == Color::Black { 1 } else { 0 })
    }
}
