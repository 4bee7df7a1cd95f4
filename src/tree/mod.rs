use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

use alloc::string::{String, ToString};

use crate::{Comparator, Multiset, Natural};

mod balance;
mod insert;
mod iter;
mod median;
mod node;
mod query;
mod remove;
mod render;
mod validate;


pub use iter::{Iter, LevelOrder, PostOrder, PreOrder};
pub use median::Median;
pub use render::Diagram;

use median::MedianCursor;
use node::{Arena, NIL};

/// A self-balancing (AVL) multiset that keeps its order statistics current.
///
/// Every distinct value is stored once together with its occurrence count. Besides the usual
/// ordered-set queries the tree maintains, in amortized O(1) per occurrence added or removed:
///
/// * the minimum and maximum, through cached ends of an in-order thread
/// * the median value(s), through a cursor that moves along the thread
///
/// Values are ordered by a [`Comparator`], [`Natural`] ordering by default. For a running sum of
/// numeric values wrap the tree in a [`SummedTree`](crate::SummedTree).
///
/// # Examples
///
/// ```
/// use counted_tree::{CountedTree, Median};
///
/// let mut tree = CountedTree::new();
/// for value in [14, -2, 32, 14] {
///     tree.insert(value);
/// }
/// tree.insert_many(42, 2);
/// tree.remove_all(&14);
///
/// assert_eq!(tree.first(), Some(&-2));
/// assert_eq!(tree.last(), Some(&42));
/// assert_eq!(tree.median_values(), Median::Pair(&32, &42));
/// assert_eq!(tree.total_count(), 4);
/// ```
pub struct CountedTree<T, C = Natural> {
    /// Node storage
    arena: Arena<T>,
    /// Index of the root node
    root: usize,
    /// Index of the smallest node
    first: usize,
    /// Index of the largest node
    last: usize,
    /// Number of distinct values
    len: usize,
    /// Number of occurrences across all values
    total_count: usize,
    /// Position of the middle occurrence
    median: MedianCursor,
    /// Ordering used by every descent
    cmp: C,
}

impl<T: Ord> CountedTree<T> {
    /// Creates an empty tree ordered by [`Ord`].
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Creates an empty tree with room for `capacity` distinct values before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }

    /// Builds a tree holding exactly the contents of `bag`.
    ///
    /// # Arguments
    ///
    /// * `bag` - The values and their occurrence counts
    ///
    /// # Returns
    ///
    /// * `Self` - The loaded tree
    pub fn from_multiset(bag: Multiset<T>) -> Self {
        Self::from_multiset_with_comparator(bag, Natural)
    }
}

impl<T, C> CountedTree<T, C> {
    /// Creates an empty tree ordered by `cmp`.
    ///
    /// # Arguments
    ///
    /// * `cmp` - The comparator, fixed for the lifetime of the tree
    ///
    /// # Returns
    ///
    /// * `Self` - The empty tree
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            arena: Arena::new(),
            root: NIL,
            first: NIL,
            last: NIL,
            len: 0,
            total_count: 0,
            median: MedianCursor::new(),
            cmp,
        }
    }

    /// Creates an empty tree ordered by `cmp` with room for `capacity` distinct values.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            ..Self::with_comparator(cmp)
        }
    }

    /// Number of distinct values.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of occurrences across all values.
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns true if the tree holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree, zero when empty.
    pub fn height(&self) -> usize {
        (self.arena.height(self.root) + 1) as usize
    }

    /// The comparator ordering this tree.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// The smallest value, in O(1).
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The minimum, or `None` if the tree is empty
    #[inline]
    pub fn first(&self) -> Option<&T> {
        (self.first != NIL).then(|| self.arena.value(self.first))
    }

    /// The largest value, in O(1).
    ///
    /// # Returns
    ///
    /// * `Option<&T>` - The maximum, or `None` if the tree is empty
    #[inline]
    pub fn last(&self) -> Option<&T> {
        (self.last != NIL).then(|| self.arena.value(self.last))
    }

    /// The middle value(s) over all occurrences, in O(1).
    ///
    /// With an odd number of occurrences this is the middle one. With an even number it is the
    /// pair straddling the middle, collapsed to a single value when both are equal.
    ///
    /// # Returns
    ///
    /// * `Median<'_, T>` - Empty, a single value, or a low/high pair
    #[inline]
    pub fn median_values(&self) -> Median<'_, T> {
        self.median.values(&self.arena, self.total_count)
    }

    /// Iterates over `(value, count)` pairs in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.arena, self.first, self.last, self.len)
    }

    /// Iterates over `(value, count)` pairs in pre-order (node, left, right).
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder::new(&self.arena, self.root)
    }

    /// Iterates over `(value, count)` pairs in post-order (left, right, node).
    pub fn post_order(&self) -> PostOrder<'_, T> {
        PostOrder::new(&self.arena, self.root)
    }

    /// Iterates over `(value, count)` pairs level by level from the root.
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(&self.arena, self.root, self.len)
    }

    /// Iterates over every occurrence in ascending order, repeating each value `count` times.
    pub fn occurrences(&self) -> impl Iterator<Item = &T> {
        self.iter()
            .flat_map(|(value, count)| core::iter::repeat_n(value, count))
    }

    /// Removes every value, keeping the allocated capacity.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing tree of {} values ({} occurrences)",
            self.len,
            self.total_count
        );

        self.arena.clear();
        self.root = NIL;
        self.first = NIL;
        self.last = NIL;
        self.len = 0;
        self.total_count = 0;
        self.median.clear();
    }

    /// Exports the contents as an unordered value to count bag.
    pub fn to_multiset(&self) -> Multiset<T>
    where
        T: Hash + Eq + Clone,
    {
        let mut bag = Multiset::with_capacity(self.len);
        for (value, count) in self.iter() {
            bag.insert_many(value.clone(), count);
        }
        bag
    }

    /// A [`Display`](fmt::Display) adaptor drawing the tree as an ASCII diagram.
    pub fn diagram(&self) -> Diagram<'_, T> {
        Diagram::new(&self.arena, self.root)
    }

    /// Draws the tree as an ASCII diagram, one line per row, without a trailing newline.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_tree::CountedTree;
    ///
    /// let tree: CountedTree<i32> = [1, 2, 3, 3].into_iter().collect();
    /// assert_eq!(tree.render(), " 2_\n/  \\\n1 3:2");
    /// ```
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        self.diagram().to_string()
    }
}

impl<T, C: Comparator<T>> CountedTree<T, C> {
    /// Builds a tree ordered by `cmp` holding exactly the contents of `bag`.
    pub fn from_multiset_with_comparator(bag: Multiset<T>, cmp: C) -> Self {
        let mut tree = Self::with_capacity_and_comparator(bag.len(), cmp);
        for (value, count) in bag {
            tree.insert_many(value, count);
        }

        log::debug!(
            "loaded {} values ({} occurrences) from a multiset",
            tree.len,
            tree.total_count
        );
        tree
    }

    /// Adds one occurrence of `value`.
    ///
    /// # Returns
    ///
    /// * `bool` - True if `value` was not present before
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_many(value, 1)
    }

    /// Adds `n` occurrences of `value` in O(log N + n).
    ///
    /// Inserting zero occurrences is a no-op.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to add
    /// * `n` - How many occurrences to add
    ///
    /// # Returns
    ///
    /// * `bool` - True if `value` was not present before
    ///
    /// # Panics
    ///
    /// Panics if the total number of occurrences would exceed `usize::MAX`.
    pub fn insert_many(&mut self, value: T, n: usize) -> bool {
        if n == 0 {
            return false;
        }
        let Some(total_count) = self.total_count.checked_add(n) else {
            panic!("occurrence count overflow");
        };

        let (idx, is_new) = self.insert_node(value, n);
        if is_new {
            self.len += 1;
            if self.arena.prev(idx) == NIL {
                self.first = idx;
            }
            if self.arena.next(idx) == NIL {
                self.last = idx;
            }
        }
        self.total_count = total_count;

        let ordering = self.ordering_to_median(idx);
        self.median.after_insert(&self.arena, idx, ordering, n);

        self.check_invariants();
        is_new
    }

    /// Removes one occurrence of `value`.
    ///
    /// # Returns
    ///
    /// * `bool` - True if an occurrence was removed
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.remove_many(value, 1) == 1
    }

    /// Removes up to `n` occurrences of `value` in O(log N + n).
    ///
    /// The node holding `value` is unlinked once its count reaches zero.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to remove
    /// * `n` - The maximum number of occurrences to remove
    ///
    /// # Returns
    ///
    /// * `usize` - How many occurrences were actually removed
    pub fn remove_many(&mut self, value: &T, n: usize) -> usize {
        if n == 0 {
            return 0;
        }

        let idx = self.find_node(value);
        if idx == NIL {
            return 0;
        }

        let count = self.arena.count(idx);
        let removed = n.min(count);
        let ordering = self.ordering_to_median(idx);

        self.arena.node_at_mut(idx).count = count - removed;
        self.total_count -= removed;
        self.median
            .after_remove(&self.arena, ordering, removed, self.total_count);

        if removed == count {
            self.unlink_node(idx);
            self.len -= 1;
        }

        self.check_invariants();
        removed
    }

    /// Removes every occurrence of `value`, returning how many there were.
    #[inline]
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.remove_many(value, usize::MAX)
    }

    /// How the value at `idx` compares to the value under the median cursor.
    fn ordering_to_median(&self, idx: usize) -> Ordering {
        let cursor = self.median.node();
        if cursor == NIL || cursor == idx {
            Ordering::Equal
        } else {
            self.cmp
                .compare(self.arena.value(idx), self.arena.value(cursor))
        }
    }

    #[inline]
    fn check_invariants(&self) {
        #[cfg(all(debug_assertions, feature = "debug-invariants"))]
        debug_assert_eq!(self.validate(), Ok(()), "tree invariants violated");
    }
}

impl<T, C: Default> Default for CountedTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Clone for CountedTree<T, C> {
    /// Rebuilds an independent tree from the sorted `(value, count)` sequence.
    ///
    /// The copy compares equal to `self` but need not share its shape.
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity_and_comparator(self.len, self.cmp.clone());
        for (value, count) in self.iter() {
            tree.insert_many(value.clone(), count);
        }

        log::debug!("cloned tree of {} values", tree.len);
        tree
    }
}

impl<T: fmt::Debug, C> fmt::Debug for CountedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for CountedTree<T, C> {
    /// Two trees are equal when they hold the same values with the same counts, whatever their
    /// shape.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self.total_count == other.total_count
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for CountedTree<T, C> {}

impl<T, C: Comparator<T> + Default> FromIterator<T> for CountedTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<(T, usize)> for CountedTree<T, C> {
    fn from_iter<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for CountedTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, C: Comparator<T>> Extend<(T, usize)> for CountedTree<T, C> {
    fn extend<I: IntoIterator<Item = (T, usize)>>(&mut self, iter: I) {
        for (value, count) in iter {
            self.insert_many(value, count);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a CountedTree<T, C> {
    type Item = (&'a T, usize);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
