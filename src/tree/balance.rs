use super::CountedTree;
use super::node::NIL;

impl<T, C> CountedTree<T, C> {
    /// Points whatever referenced `old` (its parent's child slot, or the root) at `new`.
    ///
    /// The parent link of `new` is left to the caller.
    pub(super) fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if parent == NIL {
            self.root = new;
            return;
        }

        let node = self.arena.node_at_mut(parent);
        if node.left == old {
            node.left = new;
        } else {
            debug_assert_eq!(node.right, old, "node {old} is not a child of {parent}");
            node.right = new;
        }
    }

    /// Rotates the subtree at `node` to the left, returning its new root.
    ///
    /// When the right child leans left it is rotated right first, so the result is a double
    /// rotation.
    pub(super) fn rotate_left(&mut self, node: usize) -> usize {
        let pivot = self.arena.right(node);
        debug_assert_ne!(pivot, NIL, "rotate_left requires a right child");

        if self.arena.balance_factor(pivot) > 0 {
            self.single_rotate_right(pivot);
        }
        self.single_rotate_left(node)
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    pub(super) fn rotate_right(&mut self, node: usize) -> usize {
        let pivot = self.arena.left(node);
        debug_assert_ne!(pivot, NIL, "rotate_right requires a left child");

        if self.arena.balance_factor(pivot) < 0 {
            self.single_rotate_left(pivot);
        }
        self.single_rotate_right(node)
    }

    fn single_rotate_left(&mut self, node: usize) -> usize {
        let parent = self.arena.parent(node);
        let pivot = self.arena.right(node);
        let inner = self.arena.left(pivot);

        self.arena.node_at_mut(node).right = inner;
        self.arena.set_parent(inner, node);

        let pivot_node = self.arena.node_at_mut(pivot);
        pivot_node.left = node;
        pivot_node.parent = parent;
        self.arena.node_at_mut(node).parent = pivot;
        self.replace_child(parent, node, pivot);

        self.arena.update_height(node);
        self.arena.update_height(pivot);

        log::trace!("rotated left at node {node}, subtree root is now {pivot}");
        pivot
    }

    fn single_rotate_right(&mut self, node: usize) -> usize {
        let parent = self.arena.parent(node);
        let pivot = self.arena.left(node);
        let inner = self.arena.right(pivot);

        self.arena.node_at_mut(node).left = inner;
        self.arena.set_parent(inner, node);

        let pivot_node = self.arena.node_at_mut(pivot);
        pivot_node.right = node;
        pivot_node.parent = parent;
        self.arena.node_at_mut(node).parent = pivot;
        self.replace_child(parent, node, pivot);

        self.arena.update_height(node);
        self.arena.update_height(pivot);

        log::trace!("rotated right at node {node}, subtree root is now {pivot}");
        pivot
    }

    /// Restores the AVL balance on the path from `idx` to the root.
    ///
    /// Stops early once a node needs no rotation and keeps its height, since nothing above it can
    /// have changed.
    pub(super) fn rebalance_from(&mut self, mut idx: usize) {
        while idx != NIL {
            let old_height = self.arena.height(idx);
            let balance = self.arena.balance_factor(idx);

            let top = if balance > 1 {
                self.rotate_right(idx)
            } else if balance < -1 {
                self.rotate_left(idx)
            } else {
                self.arena.update_height(idx);
                idx
            };

            if top == idx && self.arena.height(idx) == old_height {
                break;
            }
            idx = self.arena.parent(top);
        }
    }
}
