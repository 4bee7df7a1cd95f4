use core::cmp::Ordering;

use super::CountedTree;
use super::node::NIL;
use crate::Comparator;

impl<T, C: Comparator<T>> CountedTree<T, C> {
    /// Index of the node holding `value`, or NIL.
    pub(super) fn find_node(&self, value: &T) -> usize {
        let mut cur = self.root;
        while cur != NIL {
            let node = self.arena.node_at(cur);
            cur = match self.cmp.compare(value, &node.value) {
                Ordering::Equal => return cur,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        NIL
    }

    /// Index of the smallest node not less than `value`, or NIL.
    fn find_ceiling(&self, value: &T) -> usize {
        let mut candidate = NIL;
        let mut cur = self.root;
        while cur != NIL {
            let node = self.arena.node_at(cur);
            cur = match self.cmp.compare(value, &node.value) {
                Ordering::Equal => return cur,
                Ordering::Less => {
                    candidate = cur;
                    node.left
                }
                Ordering::Greater => node.right,
            };
        }
        candidate
    }

    #[inline]
    fn value_of(&self, idx: usize) -> Option<&T> {
        (idx != NIL).then(|| self.arena.value(idx))
    }

    #[inline]
    fn holds(&self, idx: usize, value: &T) -> bool {
        self.cmp.compare(self.arena.value(idx), value) == Ordering::Equal
    }

    /// Returns the stored value equal to `value`, if any.
    ///
    /// With a comparator coarser than equality this may differ from `value`: the tree keeps the
    /// first value it saw for each equivalence class.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.value_of(self.find_node(value))
    }

    /// Returns true if at least one occurrence of `value` is stored.
    pub fn contains(&self, value: &T) -> bool {
        self.find_node(value) != NIL
    }

    /// Number of occurrences of `value`, zero if absent.
    pub fn count(&self, value: &T) -> usize {
        match self.find_node(value) {
            NIL => 0,
            idx => self.arena.count(idx),
        }
    }

    /// The smallest stored value greater than or equal to `value`.
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.value_of(self.find_ceiling(value))
    }

    /// The largest stored value less than or equal to `value`.
    pub fn floor(&self, value: &T) -> Option<&T> {
        match self.find_ceiling(value) {
            NIL => self.value_of(self.last),
            idx if self.holds(idx, value) => self.value_of(idx),
            idx => self.value_of(self.arena.prev(idx)),
        }
    }

    /// The smallest stored value strictly greater than `value`.
    pub fn higher(&self, value: &T) -> Option<&T> {
        match self.find_ceiling(value) {
            NIL => None,
            idx if self.holds(idx, value) => self.value_of(self.arena.next(idx)),
            idx => self.value_of(idx),
        }
    }

    /// The largest stored value strictly less than `value`.
    pub fn lower(&self, value: &T) -> Option<&T> {
        match self.find_ceiling(value) {
            NIL => self.value_of(self.last),
            idx => self.value_of(self.arena.prev(idx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CountedTree, FnComparator};

    fn sample() -> CountedTree<i32> {
        [1, 2, 4, 6, 9, 15, 22, -1].into_iter().collect()
    }

    #[test]
    fn test_neighbour_queries() {
        let tree = sample();

        assert_eq!(tree.ceiling(&5), Some(&6));
        assert_eq!(tree.floor(&5), Some(&4));
        assert_eq!(tree.higher(&15), Some(&22));
        assert_eq!(tree.lower(&-1), None);
    }

    #[test]
    fn test_neighbour_queries_on_exact_hits() {
        let tree = sample();

        assert_eq!(tree.ceiling(&9), Some(&9));
        assert_eq!(tree.floor(&9), Some(&9));
        assert_eq!(tree.higher(&9), Some(&15));
        assert_eq!(tree.lower(&9), Some(&6));
    }

    #[test]
    fn test_neighbour_queries_past_the_ends() {
        let tree = sample();

        assert_eq!(tree.ceiling(&100), None);
        assert_eq!(tree.higher(&22), None);
        assert_eq!(tree.floor(&100), Some(&22));
        assert_eq!(tree.lower(&100), Some(&22));

        assert_eq!(tree.floor(&-5), None);
        assert_eq!(tree.lower(&-5), None);
        assert_eq!(tree.ceiling(&-5), Some(&-1));
        assert_eq!(tree.higher(&-5), Some(&-1));
    }

    #[test]
    fn test_queries_on_empty_tree() {
        let tree = CountedTree::<i32>::new();

        assert_eq!(tree.ceiling(&0), None);
        assert_eq!(tree.floor(&0), None);
        assert_eq!(tree.higher(&0), None);
        assert_eq!(tree.lower(&0), None);
        assert_eq!(tree.count(&0), 0);
        assert!(!tree.contains(&0));
    }

    #[test]
    fn test_get_returns_stored_representative() {
        let by_abs = FnComparator::new(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        let mut tree = CountedTree::with_comparator(by_abs);
        tree.insert(-3);
        tree.insert(3);

        assert_eq!(tree.get(&3), Some(&-3));
        assert_eq!(tree.count(&-3), 2);
        assert_eq!(tree.get(&4), None);
    }
}
