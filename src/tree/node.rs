use alloc::vec::Vec;

/// Sentinel index for an absent node (no child, no parent, end of the thread).
pub(crate) const NIL: usize = usize::MAX;

/// A node in the counted AVL tree.
///
/// Owning edges are `left` and `right`; `parent`, `next` and `prev` are plain indices into the
/// same arena and never keep a slot alive.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    /// The stored value
    pub(crate) value: T,

    /// Number of occurrences of `value` (multiset behavior), at least one while linked
    pub(crate) count: usize,

    /// Height of the subtree rooted here, with leaves at zero
    pub(crate) height: i32,

    /// Index of the parent node (NIL for the root)
    pub(crate) parent: usize,

    /// Index of the left child (NIL if none)
    pub(crate) left: usize,

    /// Index of the right child (NIL if none)
    pub(crate) right: usize,

    /// Index of the in-order successor (NIL for the maximum)
    pub(crate) next: usize,

    /// Index of the in-order predecessor (NIL for the minimum)
    pub(crate) prev: usize,
}

impl<T> Node<T> {
    pub(crate) const fn new(value: T, count: usize, parent: usize) -> Self {
        Self {
            value,
            count,
            height: 0,
            parent,
            left: NIL,
            right: NIL,
            next: NIL,
            prev: NIL,
        }
    }
}

/// Slot storage for nodes, addressed by stable indices.
///
/// Released slots are recycled through a LIFO free list, so an index stays valid for exactly as
/// long as its node is linked into the tree.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub(crate) fn allocate(&mut self, node: Node<T>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                debug_assert!(self.slots[idx].is_none());
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    pub(crate) fn release(&mut self, idx: usize) -> Node<T> {
        match self.slots.get_mut(idx).and_then(Option::take) {
            Some(node) => {
                self.free_list.push(idx);
                node
            }
            None => panic!("released node index {idx} is not live"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }

    #[inline]
    pub(crate) fn node_at(&self, idx: usize) -> &Node<T> {
        match self.slots.get(idx) {
            Some(Some(node)) => node,
            _ => panic!("node index {idx} is stale or out of range"),
        }
    }

    #[inline]
    pub(crate) fn node_at_mut(&mut self, idx: usize) -> &mut Node<T> {
        match self.slots.get_mut(idx) {
            Some(Some(node)) => node,
            _ => panic!("node index {idx} is stale or out of range"),
        }
    }

    /// Height of the subtree at `idx`, or -1 for an absent subtree.
    #[inline]
    pub(crate) fn height(&self, idx: usize) -> i32 {
        if idx == NIL {
            -1
        } else {
            self.node_at(idx).height
        }
    }

    #[inline]
    pub(crate) fn count(&self, idx: usize) -> usize {
        self.node_at(idx).count
    }

    #[inline]
    pub(crate) fn value(&self, idx: usize) -> &T {
        &self.node_at(idx).value
    }

    #[inline]
    pub(crate) fn parent(&self, idx: usize) -> usize {
        self.node_at(idx).parent
    }

    #[inline]
    pub(crate) fn left(&self, idx: usize) -> usize {
        self.node_at(idx).left
    }

    #[inline]
    pub(crate) fn right(&self, idx: usize) -> usize {
        self.node_at(idx).right
    }

    #[inline]
    pub(crate) fn next(&self, idx: usize) -> usize {
        self.node_at(idx).next
    }

    #[inline]
    pub(crate) fn prev(&self, idx: usize) -> usize {
        self.node_at(idx).prev
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, idx: usize, parent: usize) {
        if idx != NIL {
            self.node_at_mut(idx).parent = parent;
        }
    }

    #[inline]
    pub(crate) fn set_next(&mut self, idx: usize, next: usize) {
        if idx != NIL {
            self.node_at_mut(idx).next = next;
        }
    }

    #[inline]
    pub(crate) fn set_prev(&mut self, idx: usize, prev: usize) {
        if idx != NIL {
            self.node_at_mut(idx).prev = prev;
        }
    }

    /// Recomputes the height of `idx` from its children, returning the new height.
    #[inline]
    pub(crate) fn update_height(&mut self, idx: usize) -> i32 {
        let node = self.node_at(idx);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.node_at_mut(idx).height = height;
        height
    }

    /// Left height minus right height.
    #[inline]
    pub(crate) fn balance_factor(&self, idx: usize) -> i32 {
        let node = self.node_at(idx);
        self.height(node.left) - self.height(node.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_allocate_release_reuse() {
        let mut arena = Arena::new();

        let a = arena.allocate(Node::new(1, 1, NIL));
        let b = arena.allocate(Node::new(2, 1, a));
        assert_eq!(arena.live(), 2);
        assert_eq!(arena.parent(b), a);

        let released = arena.release(a);
        assert_eq!(released.value, 1);
        assert_eq!(arena.live(), 1);

        let c = arena.allocate(Node::new(3, 2, NIL));
        assert_eq!(c, a);
        assert_eq!(*arena.value(c), 3);
        assert_eq!(arena.count(c), 2);
    }

    #[test]
    #[should_panic(expected = "is stale or out of range")]
    fn test_arena_stale_index_panics() {
        let mut arena = Arena::new();
        let a = arena.allocate(Node::new(1, 1, NIL));
        arena.release(a);
        arena.node_at(a);
    }

    #[test]
    #[should_panic(expected = "is not live")]
    fn test_arena_double_release_panics() {
        let mut arena = Arena::new();
        let a = arena.allocate(Node::new(1, 1, NIL));
        arena.release(a);
        arena.release(a);
    }

    #[test]
    fn test_arena_heights() {
        let mut arena = Arena::with_capacity(4);
        let root = arena.allocate(Node::new(2, 1, NIL));
        let left = arena.allocate(Node::new(1, 1, root));
        arena.node_at_mut(root).left = left;

        assert_eq!(arena.height(NIL), -1);
        assert_eq!(arena.update_height(root), 1);
        assert_eq!(arena.balance_factor(root), 1);
        assert_eq!(arena.balance_factor(left), 0);

        arena.clear();
        assert_eq!(arena.live(), 0);
    }
}
