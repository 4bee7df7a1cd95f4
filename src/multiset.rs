use core::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;
use hashbrown::hash_map::{IntoIter, Iter};

/// An unordered bag of values with occurrence counts.
///
/// This is the bulk exchange format of [`CountedTree`]: see
/// [`CountedTree::from_multiset`] and [`CountedTree::to_multiset`]. Values with a zero count are
/// never stored.
///
/// [`CountedTree`]: crate::CountedTree
/// [`CountedTree::from_multiset`]: crate::CountedTree::from_multiset
/// [`CountedTree::to_multiset`]: crate::CountedTree::to_multiset
#[derive(Debug, Clone)]
pub struct Multiset<T> {
    /// Occurrence count per value
    counts: HashMap<T, usize, RandomState>,
    /// Sum of all counts
    total: usize,
}

impl<T: Hash + Eq> Multiset<T> {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty bag with room for `capacity` distinct values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::default()),
            total: 0,
        }
    }

    /// Adds one occurrence of `value`.
    #[inline]
    pub fn insert(&mut self, value: T) {
        self.insert_many(value, 1);
    }

    /// Adds `n` occurrences of `value`; a zero `n` is a no-op.
    pub fn insert_many(&mut self, value: T, n: usize) {
        if n == 0 {
            return;
        }
        *self.counts.entry(value).or_insert(0) += n;
        self.total += n;
    }

    /// Removes up to `n` occurrences of `value`.
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
        let Some(count) = self.counts.get_mut(value) else {
            return 0;
        };

        let removed = n.min(*count);
        *count -= removed;
        if *count == 0 {
            self.counts.remove(value);
        }
        self.total -= removed;
        removed
    }

    /// Removes one occurrence of `value`, returning true if there was one.
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.remove_many(value, 1) == 1
    }

    /// Number of occurrences of `value`, zero if absent.
    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns true if `value` occurs at least once.
    pub fn contains(&self, value: &T) -> bool {
        self.counts.contains_key(value)
    }
}

impl<T> Multiset<T> {
    /// Number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Number of occurrences across all values.
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total
    }

    /// Returns true if the bag holds nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(value, count)| (value, *count))
    }

    /// Removes everything.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }
}

impl<T: Hash + Eq> Default for Multiset<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> PartialEq for Multiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.counts == other.counts
    }
}

impl<T: Hash + Eq> Eq for Multiset<T> {}

impl<T: Hash + Eq> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.extend(iter);
        bag
    }
}

impl<T: Hash + Eq> FromIterator<(T, usize)> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = (T, usize)>>(iter: I) -> Self {
        let mut bag = Self::new();
        bag.extend(iter);
        bag
    }
}

impl<T: Hash + Eq> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq> Extend<(T, usize)> for Multiset<T> {
    fn extend<I: IntoIterator<Item = (T, usize)>>(&mut self, iter: I) {
        for (value, n) in iter {
            self.insert_many(value, n);
        }
    }
}

impl<T> IntoIterator for Multiset<T> {
    type Item = (T, usize);
    type IntoIter = IntoIter<T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Multiset<T> {
    type Item = (&'a T, &'a usize);
    type IntoIter = Iter<'a, T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_insert_and_count() {
        let mut bag = Multiset::new();
        bag.insert('a');
        bag.insert_many('b', 3);
        bag.insert_many('c', 0);

        assert_eq!(bag.count(&'a'), 1);
        assert_eq!(bag.count(&'b'), 3);
        assert_eq!(bag.count(&'c'), 0);
        assert!(!bag.contains(&'c'));
        assert_eq!(bag.len(), 2);
        assert_eq!(bag.total_count(), 4);
    }

    #[test]
    fn test_remove_drops_empty_entries() {
        let mut bag: Multiset<i32> = [1, 1, 2].into_iter().collect();

        assert_eq!(bag.remove_many(&1, 5), 2);
        assert!(!bag.contains(&1));
        assert!(bag.remove(&2));
        assert!(!bag.remove(&2));
        assert!(bag.is_empty());
        assert_eq!(bag.total_count(), 0);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a: Multiset<i32> = [(3, 2), (1, 1)].into_iter().collect();
        let b: Multiset<i32> = [1, 3, 3].into_iter().collect();
        assert_eq!(a, b);

        let c: Multiset<i32> = [1, 3].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_into_iter_yields_counts() {
        let bag: Multiset<&str> = ["x", "y", "x"].into_iter().collect();

        let mut pairs: Vec<(&str, usize)> = bag.clone().into_iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("x", 2), ("y", 1)]);

        let total: usize = (&bag).into_iter().map(|(_, count)| *count).sum();
        assert_eq!(total, bag.total_count());
        assert_eq!(bag.iter().count(), 2);

        let mut bag = bag;
        bag.clear();
        assert!(bag.is_empty());
    }
}
