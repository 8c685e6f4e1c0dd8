mod node;
mod traversal;
mod tree;
mod validate;

pub use traversal::{Iter, NodeRecord, ParseStrategyError, Traverse, TraversalStrategy};
pub use tree::RedBlackTree;
pub use validate::InvariantViolation;

use std::fmt;

/// Color bit of a node. The sentinel is always `Black`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("Red"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// Child direction, used to write each rotation and fixup case once
/// and get the mirrored case through `opposite()`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}
