use core::cmp::Ordering;

use super::node::{Arena, NIL};

/// The middle value(s) of a [`CountedTree`], counting every occurrence.
///
/// [`CountedTree`]: crate::CountedTree
#[derive(Debug, PartialEq, Eq)]
pub enum Median<'a, T> {
    /// The tree is empty.
    Empty,
    /// An odd number of occurrences, or an even number whose two middle occurrences are equal.
    Single(&'a T),
    /// An even number of occurrences straddling two distinct values, low then high.
    Pair(&'a T, &'a T),
}

impl<T> Clone for Median<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Median<'_, T> {}

impl<'a, T> Median<'a, T> {
    /// The lower median, `None` for an empty tree.
    pub fn low(&self) -> Option<&'a T> {
        match *self {
            Median::Empty => None,
            Median::Single(value) | Median::Pair(value, _) => Some(value),
        }
    }

    /// The upper median, `None` for an empty tree.
    pub fn high(&self) -> Option<&'a T> {
        match *self {
            Median::Empty => None,
            Median::Single(value) | Median::Pair(_, value) => Some(value),
        }
    }

    /// Number of distinct median values: 0, 1 or 2.
    pub fn len(&self) -> usize {
        match self {
            Median::Empty => 0,
            Median::Single(_) => 1,
            Median::Pair(..) => 2,
        }
    }

    /// Returns true for an empty tree.
    pub fn is_empty(&self) -> bool {
        matches!(self, Median::Empty)
    }

    /// Iterates over the distinct median values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + use<'a, T> {
        let (low, high) = match *self {
            Median::Empty => (None, None),
            Median::Single(value) => (Some(value), None),
            Median::Pair(low, high) => (Some(low), Some(high)),
        };
        low.into_iter().chain(high)
    }
}

/// Tracks the middle occurrence of the tree in half-steps.
///
/// Occurrence `i` in sorted order spans half-steps `2i` and `2i + 1`. For `N` occurrences the
/// cursor always sits on global half-step `N - 1`, stored as a node plus an offset in
/// `0..2 * count(node)`. Half-steps are kept in `i128` so that any legal `usize` count fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MedianCursor {
    node: usize,
    offset: i128,
}

impl MedianCursor {
    pub(crate) const fn new() -> Self {
        Self {
            node: NIL,
            offset: 0,
        }
    }

    #[inline]
    pub(crate) const fn node(&self) -> usize {
        self.node
    }

    #[inline]
    pub(crate) const fn offset(&self) -> i128 {
        self.offset
    }

    #[inline]
    pub(crate) const fn is_clear(&self) -> bool {
        self.node == NIL
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::new();
    }

    /// Accounts for `n` occurrences added at `inserted`, whose value compares to the cursor's
    /// value as `ordering`. Counts must already include the new occurrences.
    pub(crate) fn after_insert<T>(
        &mut self,
        arena: &Arena<T>,
        inserted: usize,
        ordering: Ordering,
        n: usize,
    ) {
        if self.is_clear() {
            self.node = inserted;
            self.offset = n as i128 - 1;
            return;
        }

        match ordering {
            Ordering::Less => self.offset -= n as i128,
            _ => self.offset += n as i128,
        }
        self.normalize(arena);
    }

    /// Accounts for `k` occurrences taken from a value comparing to the cursor's value as
    /// `ordering`. Counts must already exclude the removed occurrences, and the drained node (if
    /// any) must still be linked.
    pub(crate) fn after_remove<T>(
        &mut self,
        arena: &Arena<T>,
        ordering: Ordering,
        k: usize,
        remaining: usize,
    ) {
        if remaining == 0 {
            self.clear();
            return;
        }

        match ordering {
            Ordering::Less => self.offset += k as i128,
            _ => self.offset -= k as i128,
        }
        self.normalize(arena);
    }

    /// Walks the thread until the offset falls inside the cursor node.
    fn normalize<T>(&mut self, arena: &Arena<T>) {
        loop {
            if self.offset < 0 {
                self.node = arena.prev(self.node);
                self.offset += span(arena.count(self.node));
                continue;
            }

            let span = span(arena.count(self.node));
            if self.offset < span {
                break;
            }
            self.offset -= span;
            self.node = arena.next(self.node);
        }
    }

    /// Reads the median value(s) for a tree holding `total` occurrences.
    pub(crate) fn values<'a, T>(&self, arena: &'a Arena<T>, total: usize) -> Median<'a, T> {
        if self.is_clear() {
            return Median::Empty;
        }

        let low = arena.value(self.node);
        if total % 2 == 0 && self.offset == span(arena.count(self.node)) - 1 {
            Median::Pair(low, arena.value(arena.next(self.node)))
        } else {
            Median::Single(low)
        }
    }
}

/// Number of half-steps covered by a node holding `count` occurrences.
#[inline]
pub(crate) const fn span(count: usize) -> i128 {
    2 * count as i128
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CountedTree;
    use alloc::vec::Vec;

    /// Sorted flattened oracle: the middle occurrence(s), deduplicated.
    fn oracle(tree: &CountedTree<i32>) -> Vec<i32> {
        let flat: Vec<i32> = tree.occurrences().copied().collect();
        if flat.is_empty() {
            return Vec::new();
        }

        let n = flat.len();
        let (low, high) = (flat[(n - 1) / 2], flat[n / 2]);
        if low == high { vec![low] } else { vec![low, high] }
    }

    fn medians(tree: &CountedTree<i32>) -> Vec<i32> {
        tree.median_values().iter().copied().collect()
    }

    #[test]
    fn test_median_accessors() {
        let (a, b) = (1, 2);

        let pair = Median::Pair(&a, &b);
        assert_eq!(pair.low(), Some(&1));
        assert_eq!(pair.high(), Some(&2));
        assert_eq!(pair.len(), 2);

        let single = Median::Single(&a);
        assert_eq!(single.low(), single.high());
        assert_eq!(single.iter().count(), 1);

        let empty: Median<'_, i32> = Median::Empty;
        assert!(empty.is_empty());
        assert_eq!(empty.low(), None);
        assert_eq!(empty.iter().count(), 0);
    }

    #[test]
    fn test_median_odd_and_even() {
        let mut tree = CountedTree::new();
        tree.insert(10);
        assert_eq!(tree.median_values(), Median::Single(&10));

        tree.insert(20);
        assert_eq!(tree.median_values(), Median::Pair(&10, &20));

        tree.insert(30);
        assert_eq!(tree.median_values(), Median::Single(&20));

        tree.insert(20);
        assert_eq!(tree.median_values(), Median::Single(&20));
    }

    #[test]
    fn test_median_bulk_insert_below_cursor() {
        let mut tree = CountedTree::new();
        tree.insert(1);
        tree.insert_many(5, 2);
        assert_eq!(medians(&tree), vec![5]);

        tree.insert_many(1, 3);
        assert_eq!(medians(&tree), oracle(&tree));
        assert_eq!(medians(&tree), vec![1]);

        tree.insert_many(5, 2);
        assert_eq!(medians(&tree), vec![1, 5]);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_median_scenario_with_remove_all() {
        let mut tree = CountedTree::new();
        for value in [14, -2, 32, 14] {
            tree.insert(value);
        }
        tree.insert_many(42, 2);
        assert_eq!(medians(&tree), vec![14, 32]);

        assert_eq!(tree.remove_all(&14), 2);
        assert_eq!(tree.median_values(), Median::Pair(&32, &42));
        assert!(tree.is_valid());
    }

    #[test]
    fn test_median_removing_cursor_node() {
        let mut tree: CountedTree<i32> = (1..=5).collect();
        assert_eq!(medians(&tree), vec![3]);

        tree.remove(&3);
        assert_eq!(medians(&tree), vec![2, 4]);

        tree.remove(&2);
        assert_eq!(medians(&tree), vec![4]);

        tree.remove_all(&4);
        assert_eq!(medians(&tree), vec![1, 5]);
        assert!(tree.is_valid());
    }

    #[test]
    fn test_median_with_huge_counts() {
        let half = usize::MAX / 2;
        let mut tree = CountedTree::new();

        tree.insert_many(1, half);
        tree.insert(2);
        assert_eq!(tree.median_values(), Median::Single(&1));

        tree.insert_many(3, half);
        assert_eq!(tree.total_count(), usize::MAX);
        assert_eq!(tree.median_values(), Median::Single(&2));

        tree.remove(&2);
        assert_eq!(tree.median_values(), Median::Pair(&1, &3));
        assert!(tree.is_valid());
    }

    #[test]
    #[should_panic(expected = "occurrence count overflow")]
    fn test_insert_past_usize_max_panics() {
        let mut tree = CountedTree::new();
        tree.insert_many(1, usize::MAX);
        tree.insert(2);
    }

    #[test]
    fn test_median_tracks_oracle_through_churn() {
        let mut tree = CountedTree::new();
        let script = [
            (7, 3, true),
            (2, 1, true),
            (9, 4, true),
            (7, 2, false),
            (4, 5, true),
            (9, 9, false),
            (1, 2, true),
            (4, 1, false),
            (7, 1, false),
            (12, 6, true),
            (2, 1, false),
        ];

        for (value, n, insert) in script {
            if insert {
                tree.insert_many(value, n);
            } else {
                tree.remove_many(&value, n);
            }
            assert_eq!(medians(&tree), oracle(&tree), "after touching {value} x{n}");
            assert!(tree.is_valid());
        }
    }
}
