use super::node::{NodeId, Nodes};
use super::Color;
use arrayvec::ArrayVec;
use std::fmt;
use std::iter::{ExactSizeIterator, FusedIterator};
use std::str::FromStr;
use thiserror::Error;

/// A red-black tree of `n` nodes is at most `2 * log2(n + 1)` levels deep,
/// so twice the pointer width bounds the depth of any tree that fits in memory
const MAX_DEPTH: usize = 128;

/// Order in which a traversal reports each node relative to its subtrees
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TraversalStrategy {
    /// Node, then left subtree, then right subtree
    PreOrder,
    /// Left subtree, then node, then right subtree. Yields keys in sorted order
    InOrder,
    /// Left subtree, then right subtree, then node
    PostOrder,
}

impl Default for TraversalStrategy {
    fn default() -> Self {
        TraversalStrategy::InOrder
    }
}

impl fmt::Display for TraversalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalStrategy::PreOrder => f.write_str("Pre Order"),
            TraversalStrategy::InOrder => f.write_str("In Order"),
            TraversalStrategy::PostOrder => f.write_str("Post Order"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown traversal order {0:?}, expected one of: pre, in, post")]
pub struct ParseStrategyError(pub String);

impl FromStr for TraversalStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pre" | "preorder" | "pre-order" => Ok(TraversalStrategy::PreOrder),
            "in" | "inorder" | "in-order" => Ok(TraversalStrategy::InOrder),
            "post" | "postorder" | "post-order" => Ok(TraversalStrategy::PostOrder),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// What a traversal reports for each visited node
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeRecord<'a, T> {
    pub color: Color,
    pub key: &'a T,
    /// Key of the parent node, `None` for the root
    pub parent: Option<&'a T>,
}

impl<'a, T: fmt::Display> fmt::Display for NodeRecord<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color: {} Key: {} Parent: ", self.color, self.key)?;
        match self.parent {
            Some(parent) => write!(f, "{}", parent),
            None => f.write_str("nil"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Stage {
    /// Nothing visited yet
    Enter,
    /// Left subtree done
    Left,
    /// Both subtrees done
    Right,
}

#[derive(Debug, Copy, Clone)]
struct Frame {
    node: NodeId,
    stage: Stage,
}

/// Iterator over the records of a tree, in the order given by its strategy.
/// Never mutates the tree; create a new one to walk it again
#[derive(Clone)]
pub struct Traverse<'a, T> {
    nodes: &'a Nodes<T>,
    strategy: TraversalStrategy,
    /// Path from the root down to the node being walked
    stack: ArrayVec<[Frame; MAX_DEPTH]>,
    len: usize,
}

impl<'a, T> Traverse<'a, T> {
    pub(super) fn new(
        nodes: &'a Nodes<T>,
        root: NodeId,
        len: usize,
        strategy: TraversalStrategy,
    ) -> Self {
        let mut stack = ArrayVec::new();
        if !root.is_nil() {
            stack.push(Frame {
                node: root,
                stage: Stage::Enter,
            });
        }
        Traverse {
            nodes,
            strategy,
            stack,
            len,
        }
    }

    pub fn strategy(&self) -> TraversalStrategy {
        self.strategy
    }

    fn descend(&mut self, node: NodeId) {
        if !node.is_nil() {
            self.stack.push(Frame {
                node,
                stage: Stage::Enter,
            });
        }
    }

    fn record(&mut self, id: NodeId) -> Option<NodeRecord<'a, T>> {
        let nodes = self.nodes;
        let node = nodes.get(id)?;
        self.len -= 1;
        Some(NodeRecord {
            color: node.color,
            key: &node.key,
            parent: nodes.key(node.parent),
        })
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = NodeRecord<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let id = frame.node;
            match frame.stage {
                Stage::Enter => {
                    frame.stage = Stage::Left;
                    self.descend(self.nodes.left(id));
                    if self.strategy == TraversalStrategy::PreOrder {
                        return self.record(id);
                    }
                }
                Stage::Left => {
                    frame.stage = Stage::Right;
                    self.descend(self.nodes.right(id));
                    if self.strategy == TraversalStrategy::InOrder {
                        return self.record(id);
                    }
                }
                Stage::Right => {
                    self.stack.pop();
                    if self.strategy == TraversalStrategy::PostOrder {
                        return self.record(id);
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Traverse<'a, T> {}
impl<'a, T> FusedIterator for Traverse<'a, T> {}

/// Sorted iterator over the keys of a tree
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: Traverse<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(inner: Traverse<'a, T>) -> Self {
        Iter { inner }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|record| record.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> FusedIterator for Iter<'a, T> {}
