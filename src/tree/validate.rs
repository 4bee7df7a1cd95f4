use alloc::vec::Vec;
use core::cmp::Ordering;

use super::CountedTree;
use super::median::span;
use super::node::NIL;
use crate::{Comparator, InvariantError};

impl<T, C: Comparator<T>> CountedTree<T, C> {
    /// Checks every structural invariant, returning the first violation found.
    ///
    /// Covers ordering, AVL balance, cached heights, parent links, the next/prev thread, node
    /// counts, the cached first and last nodes, and the median cursor. Runs in O(N).
    pub fn validate(&self) -> Result<(), InvariantError> {
        let mut in_order = Vec::with_capacity(self.len);

        if self.root != NIL {
            let found = self.arena.parent(self.root);
            if found != NIL {
                return Err(InvariantError::Parent {
                    node: self.root,
                    expected: NIL,
                    found,
                });
            }
            self.validate_subtree(self.root, NIL, NIL, &mut in_order)?;
        }

        self.validate_counts(&in_order)?;
        self.validate_thread(&in_order)?;
        self.validate_median(&in_order)
    }

    /// Returns true if [`validate`](Self::validate) finds nothing wrong.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validates the subtree at `idx` against the exclusive bounds `low` and `high` (NIL for
    /// unbounded), appending its nodes in order. Returns the subtree height.
    fn validate_subtree(
        &self,
        idx: usize,
        low: usize,
        high: usize,
        in_order: &mut Vec<usize>,
    ) -> Result<i32, InvariantError> {
        let node = self.arena.node_at(idx);

        if node.count == 0 {
            return Err(InvariantError::ZeroCount { node: idx });
        }
        if low != NIL && self.cmp.compare(self.arena.value(low), &node.value) != Ordering::Less {
            return Err(InvariantError::Order { node: idx });
        }
        if high != NIL && self.cmp.compare(&node.value, self.arena.value(high)) != Ordering::Less
        {
            return Err(InvariantError::Order { node: idx });
        }

        let left = self.validate_child(idx, node.left, low, idx, in_order)?;
        in_order.push(idx);
        let right = self.validate_child(idx, node.right, idx, high, in_order)?;

        if (left - right).abs() > 1 {
            return Err(InvariantError::Unbalanced {
                node: idx,
                left,
                right,
            });
        }

        let actual = 1 + left.max(right);
        if node.height != actual {
            return Err(InvariantError::Height {
                node: idx,
                cached: node.height,
                actual,
            });
        }

        Ok(actual)
    }

    fn validate_child(
        &self,
        parent: usize,
        child: usize,
        low: usize,
        high: usize,
        in_order: &mut Vec<usize>,
    ) -> Result<i32, InvariantError> {
        if child == NIL {
            return Ok(-1);
        }

        let found = self.arena.parent(child);
        if found != parent {
            return Err(InvariantError::Parent {
                node: child,
                expected: parent,
                found,
            });
        }
        self.validate_subtree(child, low, high, in_order)
    }

    fn validate_counts(&self, in_order: &[usize]) -> Result<(), InvariantError> {
        if self.len != in_order.len() {
            return Err(InvariantError::Count {
                what: "distinct values",
                cached: self.len,
                actual: in_order.len(),
            });
        }

        let live = self.arena.live();
        if live != in_order.len() {
            return Err(InvariantError::Count {
                what: "live slots",
                cached: live,
                actual: in_order.len(),
            });
        }

        let total: usize = in_order.iter().map(|&idx| self.arena.count(idx)).sum();
        if self.total_count != total {
            return Err(InvariantError::Count {
                what: "total count",
                cached: self.total_count,
                actual: total,
            });
        }

        Ok(())
    }

    fn validate_thread(&self, in_order: &[usize]) -> Result<(), InvariantError> {
        if self.first != in_order.first().copied().unwrap_or(NIL) {
            return Err(InvariantError::Boundary { end: "first" });
        }
        if self.last != in_order.last().copied().unwrap_or(NIL) {
            return Err(InvariantError::Boundary { end: "last" });
        }

        let mut cur = self.first;
        let mut prev = NIL;
        for (position, &idx) in in_order.iter().enumerate() {
            if cur != idx || self.arena.prev(idx) != prev {
                return Err(InvariantError::Thread { position });
            }
            prev = idx;
            cur = self.arena.next(idx);
        }

        if cur != NIL {
            return Err(InvariantError::Thread {
                position: in_order.len(),
            });
        }
        Ok(())
    }

    fn validate_median(&self, in_order: &[usize]) -> Result<(), InvariantError> {
        let expected = self.total_count.checked_sub(1);

        let mut found = None;
        if !self.median.is_clear() {
            let mut before = 0;
            for &idx in in_order {
                let count = self.arena.count(idx);
                if idx == self.median.node() {
                    let offset = self.median.offset();
                    if (0..span(count)).contains(&offset) {
                        found = usize::try_from(span(before) + offset).ok();
                    }
                    break;
                }
                before += count;
            }
        }

        if found != expected {
            return Err(InvariantError::Median { expected, found });
        }
        Ok(())
    }

    /// Returns true if every node's subtrees differ in height by at most one.
    ///
    /// Heights are recomputed from the node graph rather than read from the cache.
    pub fn is_balanced(&self) -> bool {
        self.balanced_height(self.root).is_some()
    }

    fn balanced_height(&self, idx: usize) -> Option<i32> {
        if idx == NIL {
            return Some(-1);
        }

        let node = self.arena.node_at(idx);
        let left = self.balanced_height(node.left)?;
        let right = self.balanced_height(node.right)?;
        ((left - right).abs() <= 1).then_some(1 + left.max(right))
    }
}

#[cfg(test)]
mod tests {
    use crate::{CountedTree, InvariantError};

    #[test]
    fn test_validate_accepts_built_trees() {
        let mut tree: CountedTree<i32> = (0..50).collect();
        for value in (0..50).step_by(3) {
            tree.remove(&value);
        }
        tree.insert_many(7, 4);

        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_validate_empty_tree() {
        let tree = CountedTree::<i32>::new();
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_validate_detects_stale_total() {
        let mut tree: CountedTree<i32> = (1..=3).collect();
        tree.total_count += 1;

        assert!(matches!(
            tree.validate(),
            Err(InvariantError::Count {
                what: "total count",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_detects_bad_height() {
        let mut tree: CountedTree<i32> = (1..=3).collect();
        let root = tree.root;
        tree.arena.node_at_mut(root).height = 5;

        assert_eq!(
            tree.validate(),
            Err(InvariantError::Height {
                node: root,
                cached: 5,
                actual: 1,
            })
        );
        // Only cached heights are wrong; the shape is still balanced.
        assert!(tree.is_balanced());
    }

    #[test]
    fn test_validate_detects_broken_thread() {
        let mut tree: CountedTree<i32> = (1..=3).collect();
        let first = tree.first;
        tree.arena.node_at_mut(first).next = super::NIL;

        assert_eq!(
            tree.validate(),
            Err(InvariantError::Thread { position: 1 })
        );
    }

    #[test]
    fn test_validate_detects_misplaced_median() {
        let mut tree: CountedTree<i32> = (1..=3).collect();
        tree.median.clear();

        assert_eq!(
            tree.validate(),
            Err(InvariantError::Median {
                expected: Some(2),
                found: None,
            })
        );
    }

    #[test]
    fn test_validate_detects_order_violation() {
        let mut tree: CountedTree<i32> = (1..=3).collect();
        let last = tree.last;
        tree.arena.node_at_mut(last).value = 0;

        assert!(matches!(
            tree.validate(),
            Err(InvariantError::Order { .. })
        ));
    }
}
