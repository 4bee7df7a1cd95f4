use super::CountedTree;
use super::node::{NIL, Node};

impl<T, C> CountedTree<T, C> {
    /// Unlinks `idx` from the tree and the thread, releases its slot and rebalances.
    ///
    /// The caller must already have moved the median cursor off `idx`.
    pub(super) fn unlink_node(&mut self, idx: usize) -> Node<T> {
        let (left, right) = (self.arena.left(idx), self.arena.right(idx));

        if left != NIL && right != NIL {
            let donor = if self.arena.height(left) > self.arena.height(right) {
                self.arena.prev(idx)
            } else {
                self.arena.next(idx)
            };
            log::trace!("swapping node {idx} with donor {donor} before unlinking");
            self.swap_positions(idx, donor);
        }

        let child = match self.arena.left(idx) {
            NIL => self.arena.right(idx),
            only => only,
        };
        let parent = self.arena.parent(idx);
        self.replace_child(parent, idx, child);
        self.arena.set_parent(child, parent);

        let (prev, next) = (self.arena.prev(idx), self.arena.next(idx));
        self.arena.set_next(prev, next);
        self.arena.set_prev(next, prev);
        if self.first == idx {
            self.first = next;
        }
        if self.last == idx {
            self.last = prev;
        }

        log::trace!("unlinked node {idx}");
        let node = self.arena.release(idx);
        self.rebalance_from(parent);
        node
    }

    /// Exchanges the tree positions of `a` and its in-order neighbour `b`, where `b` lies in the
    /// subtree of `a`.
    ///
    /// Parent/child links and heights move; values stay in their slots, so every index held
    /// elsewhere keeps pointing at the same value.
    fn swap_positions(&mut self, a: usize, b: usize) {
        let (a_parent, a_left, a_right, a_height) = {
            let node = self.arena.node_at(a);
            (node.parent, node.left, node.right, node.height)
        };
        let (b_parent, b_left, b_right, b_height) = {
            let node = self.arena.node_at(b);
            (node.parent, node.left, node.right, node.height)
        };

        self.replace_child(a_parent, a, b);

        if b_parent == a {
            let sibling = if a_left == b { a_right } else { a_left };
            let node = self.arena.node_at_mut(b);
            if a_left == b {
                node.left = a;
                node.right = a_right;
            } else {
                node.left = a_left;
                node.right = a;
            }
            node.parent = a_parent;
            self.arena.set_parent(sibling, b);
            self.arena.node_at_mut(a).parent = b;
        } else {
            self.replace_child(b_parent, b, a);
            let node = self.arena.node_at_mut(b);
            node.left = a_left;
            node.right = a_right;
            node.parent = a_parent;
            self.arena.set_parent(a_left, b);
            self.arena.set_parent(a_right, b);
            self.arena.node_at_mut(a).parent = b_parent;
        }

        let node = self.arena.node_at_mut(a);
        node.left = b_left;
        node.right = b_right;
        node.height = b_height;
        self.arena.set_parent(b_left, a);
        self.arena.set_parent(b_right, a);
        self.arena.node_at_mut(b).height = a_height;
    }
}

#[cfg(test)]
mod tests {
    use crate::CountedTree;
    use alloc::vec::Vec;

    fn values(tree: &CountedTree<i32>) -> Vec<i32> {
        tree.iter().map(|(v, _)| *v).collect()
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree: CountedTree<i32> = [2, 1, 3].into_iter().collect();

        assert!(tree.remove(&1));
        assert_eq!(values(&tree), vec![2, 3]);
        assert_eq!(tree.first(), Some(&2));
        assert!(tree.is_valid());
    }

    #[test]
    fn test_remove_node_with_one_child() {
        let mut tree: CountedTree<i32> = [2, 1, 3, 4].into_iter().collect();

        assert!(tree.remove(&3));
        assert_eq!(values(&tree), vec![1, 2, 4]);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_remove_node_with_two_children() {
        let mut tree: CountedTree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

        // Root whose successor is a leaf two levels down.
        assert!(tree.remove(&4));
        assert!(tree.is_valid());
        assert_eq!(values(&tree), vec![1, 2, 3, 5, 6, 7]);

        // Inner node whose donor is a direct child.
        assert!(tree.remove(&2));
        assert!(tree.is_valid());
        assert_eq!(values(&tree), vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn test_remove_swaps_with_distant_donor() {
        let mut tree: CountedTree<i32> = (1..=15).collect();

        // The successor of 8 is the leftmost leaf of its right subtree.
        assert!(tree.remove(&8));
        assert!(tree.is_valid());
        assert_eq!(values(&tree), (1..=15).filter(|v| *v != 8).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_many_partial_and_full() {
        let mut tree = CountedTree::new();
        tree.insert_many(7, 5);
        tree.insert(3);

        assert_eq!(tree.remove_many(&7, 2), 2);
        assert_eq!(tree.count(&7), 3);
        assert_eq!(tree.len(), 2);

        assert_eq!(tree.remove_many(&7, 10), 3);
        assert!(!tree.contains(&7));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.total_count(), 1);
        assert_eq!(tree.last(), Some(&3));
        assert!(tree.is_valid());
    }

    #[test]
    fn test_remove_absent_and_zero() {
        let mut tree: CountedTree<i32> = [1, 2].into_iter().collect();

        assert!(!tree.remove(&9));
        assert_eq!(tree.remove_many(&1, 0), 0);
        assert_eq!(tree.remove_all(&9), 0);
        assert_eq!(tree.total_count(), 2);
    }

    #[test]
    fn test_remove_until_empty() {
        let mut tree = CountedTree::new();
        tree.insert(2);
        tree.insert(2);

        assert!(tree.remove(&2));
        assert!(tree.remove(&2));
        assert!(!tree.remove(&2));

        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        assert!(tree.median_values().is_empty());
        assert!(tree.is_valid());
    }

    #[test]
    fn test_slots_are_reused() {
        let mut tree = CountedTree::with_capacity(4);
        for round in 0..100 {
            tree.insert(round);
            tree.insert(round + 1000);
            tree.remove_all(&round);
            tree.remove_all(&(round + 1000));
        }

        assert!(tree.is_empty());
        assert!(tree.is_valid());
    }
}
