use super::{Color, Side};

/// Index of a node inside the arena.
/// Index 0 is reserved for the sentinel, which stands for every absent child or parent
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(super) struct NodeId(usize);

impl NodeId {
    pub(super) const NIL: NodeId = NodeId(0);

    pub(super) fn is_nil(self) -> bool {
        self == NodeId::NIL
    }
}

#[derive(Debug, Clone)]
pub(super) struct Node<T> {
    pub(super) key: T,
    pub(super) color: Color,
    pub(super) left: NodeId,
    pub(super) right: NodeId,
    pub(super) parent: NodeId,
}

/// Owns every node of a tree.
///
/// The sentinel never holds content: reading it gives a BLACK node with no key
/// and `NIL` links, and writing to it is a no-op. This makes it impossible to
/// dereference the sentinel as if it were a real node.
#[derive(Debug, Clone)]
pub(super) struct Nodes<T> {
    slots: Vec<Option<Node<T>>>,
    /// Released slots, reused by the next allocations
    vacant: Vec<NodeId>,
}

impl<T> Nodes<T> {
    pub(super) fn new() -> Self {
        Nodes {
            slots: vec![None],
            vacant: Vec::new(),
        }
    }

    /// Store a new detached node and return its id
    pub(super) fn alloc(&mut self, key: T, color: Color) -> NodeId {
        let node = Node {
            key,
            color,
            left: NodeId::NIL,
            right: NodeId::NIL,
            parent: NodeId::NIL,
        };
        match self.vacant.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Take a node out of the arena. The caller must have unlinked it already
    pub(super) fn release(&mut self, id: NodeId) -> Option<T> {
        if id.is_nil() {
            return None;
        }
        let node = self.slots.get_mut(id.0)?.take()?;
        self.vacant.push(id);
        Some(node.key)
    }

    /// Drop every node, keeping only the sentinel slot
    pub(super) fn clear(&mut self) {
        self.slots.truncate(1);
        self.vacant.clear();
    }

    pub(super) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        if id.is_nil() {
            return None;
        }
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.is_nil() {
            return None;
        }
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub(super) fn key(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|node| &node.key)
    }

    pub(super) fn color(&self, id: NodeId) -> Color {
        self.get(id).map_or(Color::Black, |node| node.color)
    }

    pub(super) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    pub(super) fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }

    pub(super) fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NIL, |node| node.parent)
    }

    pub(super) fn left(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Left)
    }

    pub(super) fn right(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Right)
    }

    pub(super) fn child(&self, id: NodeId, side: Side) -> NodeId {
        match (self.get(id), side) {
            (None, _) => NodeId::NIL,
            (Some(node), Side::Left) => node.left,
            (Some(node), Side::Right) => node.right,
        }
    }

    pub(super) fn set_color(&mut self, id: NodeId, color: Color) {
        if let Some(node) = self.get_mut(id) {
            node.color = color;
        }
    }

    pub(super) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(node) = self.get_mut(id) {
            node.parent = parent;
        }
    }

    pub(super) fn set_left(&mut self, id: NodeId, child: NodeId) {
        self.set_child(id, Side::Left, child)
    }

    pub(super) fn set_right(&mut self, id: NodeId, child: NodeId) {
        self.set_child(id, Side::Right, child)
    }

    pub(super) fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        if let Some(node) = self.get_mut(id) {
            match side {
                Side::Left => node.left = child,
                Side::Right => node.right = child,
            }
        }
    }

    /// Which side of its parent `id` hangs from. `None` for the root and the sentinel
    pub(super) fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent(id);
        if id.is_nil() || parent.is_nil() {
            None
        } else if self.left(parent) == id {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sentinel_reads_as_black_leaf() {
        let nodes: Nodes<i32> = Nodes::new();
        assert_eq!(nodes.key(NodeId::NIL), None);
        assert_eq!(nodes.color(NodeId::NIL), Color::Black);
        assert_eq!(nodes.left(NodeId::NIL), NodeId::NIL);
        assert_eq!(nodes.right(NodeId::NIL), NodeId::NIL);
        assert_eq!(nodes.parent(NodeId::NIL), NodeId::NIL);
        assert_eq!(nodes.side_of(NodeId::NIL), None);
    }

    #[test]
    fn sentinel_ignores_writes() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc(1, Color::Red);
        nodes.set_color(NodeId::NIL, Color::Red);
        nodes.set_parent(NodeId::NIL, a);
        nodes.set_left(NodeId::NIL, a);
        nodes.set_right(NodeId::NIL, a);
        assert!(nodes.is_black(NodeId::NIL));
        assert_eq!(nodes.parent(NodeId::NIL), NodeId::NIL);
        assert_eq!(nodes.left(NodeId::NIL), NodeId::NIL);
        assert_eq!(nodes.right(NodeId::NIL), NodeId::NIL);
    }

    #[test]
    fn links() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc("a", Color::Black);
        let b = nodes.alloc("b", Color::Red);
        assert_ne!(a, NodeId::NIL);
        assert_ne!(a, b);

        nodes.set_right(a, b);
        nodes.set_parent(b, a);
        assert_eq!(nodes.child(a, Side::Right), b);
        assert_eq!(nodes.child(a, Side::Left), NodeId::NIL);
        assert_eq!(nodes.side_of(b), Some(Side::Right));
        assert_eq!(nodes.side_of(a), None);
        assert!(nodes.is_red(b));
        assert_eq!(nodes.key(b), Some(&"b"));
    }

    #[test]
    fn release_recycles_slots() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc(10, Color::Black);
        let b = nodes.alloc(20, Color::Red);

        assert_eq!(nodes.release(a), Some(10));
        assert_eq!(nodes.key(a), None);
        assert_eq!(nodes.release(a), None);
        assert_eq!(nodes.release(NodeId::NIL), None);

        let c = nodes.alloc(30, Color::Red);
        assert_eq!(c, a);
        assert_eq!(nodes.key(c), Some(&30));
        assert_eq!(nodes.key(b), Some(&20));
    }

    #[test]
    fn clear_keeps_sentinel() {
        let mut nodes = Nodes::new();
        let a = nodes.alloc(1, Color::Black);
        nodes.alloc(2, Color::Red);
        nodes.clear();
        assert_eq!(nodes.key(a), None);
        assert!(nodes.is_black(NodeId::NIL));
        assert_eq!(nodes.alloc(3, Color::Black), a);
    }
}
