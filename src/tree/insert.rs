use core::cmp::Ordering;

use super::CountedTree;
use super::node::{NIL, Node};
use crate::Comparator;

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<T, C: Comparator<T>> CountedTree<T, C> {
    /// Adds `n` occurrences of `value`, returning the node that holds it and whether that node is
    /// new.
    ///
    /// Only the node graph is touched; cached aggregates are the caller's job.
    pub(super) fn insert_node(&mut self, value: T, n: usize) -> (usize, bool) {
        if self.root == NIL {
            let idx = self.arena.allocate(Node::new(value, n, NIL));
            self.root = idx;
            return (idx, true);
        }

        let mut cur = self.root;
        loop {
            let (ordering, left, right) = {
                let node = self.arena.node_at(cur);
                (self.cmp.compare(&value, &node.value), node.left, node.right)
            };

            match ordering {
                Ordering::Equal => {
                    self.arena.node_at_mut(cur).count += n;
                    return (cur, false);
                }
                Ordering::Less if left != NIL => cur = left,
                Ordering::Greater if right != NIL => cur = right,
                Ordering::Less => return (self.attach(cur, Side::Left, value, n), true),
                Ordering::Greater => return (self.attach(cur, Side::Right, value, n), true),
            }
        }
    }

    /// Hangs a new leaf under `parent` and splices it into the thread next to it.
    fn attach(&mut self, parent: usize, side: Side, value: T, n: usize) -> usize {
        let idx = self.arena.allocate(Node::new(value, n, parent));

        let (prev, next) = match side {
            Side::Left => {
                self.arena.node_at_mut(parent).left = idx;
                (self.arena.prev(parent), parent)
            }
            Side::Right => {
                self.arena.node_at_mut(parent).right = idx;
                (parent, self.arena.next(parent))
            }
        };

        let node = self.arena.node_at_mut(idx);
        node.prev = prev;
        node.next = next;
        self.arena.set_next(prev, idx);
        self.arena.set_prev(next, idx);

        self.rebalance_from(parent);
        idx
    }
}
