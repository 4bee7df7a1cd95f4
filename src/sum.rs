use core::fmt;
use core::ops::Deref;

use num_traits::NumCast;
use ordered_float::OrderedFloat;

use crate::{Comparator, CountedTree, Kbn, Natural};

/// A value type whose occurrences can be totalled.
///
/// The running total lives in a separate [`Accumulator`](Summable::Accumulator) so that it can be
/// wider or more precise than the values themselves.
pub trait Summable: Sized {
    /// Storage for the running total.
    type Accumulator: Default + Clone + fmt::Debug;

    /// Adds `count` occurrences of `value` to `acc`.
    fn accumulate(acc: &mut Self::Accumulator, value: &Self, count: usize);

    /// Takes `count` occurrences of `value` out of `acc`.
    fn retract(acc: &mut Self::Accumulator, value: &Self, count: usize);

    /// Reads the total held by `acc`.
    fn total(acc: &Self::Accumulator) -> Self;
}

/// Integers are summed in 128 bits and saturate to their own range when read.
///
/// With at most `usize::MAX` occurrences the exact total of 64-bit values always fits.
macro_rules! impl_summable_int {
    ($wide:ty => $($t:ty),+) => {$(
        impl Summable for $t {
            type Accumulator = $wide;

            #[inline]
            fn accumulate(acc: &mut $wide, value: &$t, count: usize) {
                *acc += *value as $wide * count as $wide;
            }

            #[inline]
            fn retract(acc: &mut $wide, value: &$t, count: usize) {
                *acc -= *value as $wide * count as $wide;
            }

            fn total(acc: &$wide) -> $t {
                <$t as NumCast>::from(*acc).unwrap_or(if *acc > 0 { <$t>::MAX } else { <$t>::MIN })
            }
        }
    )+};
}

impl_summable_int!(i128 => i8, i16, i32, i64, isize);
impl_summable_int!(u128 => u8, u16, u32, u64, usize);

/// Floats are summed with Kahan-Babuska-Neumaier compensation.
macro_rules! impl_summable_float {
    ($($t:ty),+) => {$(
        impl Summable for $t {
            type Accumulator = Kbn<$t>;

            #[inline]
            fn accumulate(acc: &mut Kbn<$t>, value: &$t, count: usize) {
                *acc += *value * count as $t;
            }

            #[inline]
            fn retract(acc: &mut Kbn<$t>, value: &$t, count: usize) {
                *acc -= *value * count as $t;
            }

            fn total(acc: &Kbn<$t>) -> $t {
                acc.total()
            }
        }

        impl Summable for OrderedFloat<$t> {
            type Accumulator = Kbn<$t>;

            #[inline]
            fn accumulate(acc: &mut Kbn<$t>, value: &OrderedFloat<$t>, count: usize) {
                *acc += value.0 * count as $t;
            }

            #[inline]
            fn retract(acc: &mut Kbn<$t>, value: &OrderedFloat<$t>, count: usize) {
                *acc -= value.0 * count as $t;
            }

            fn total(acc: &Kbn<$t>) -> OrderedFloat<$t> {
                OrderedFloat(acc.total())
            }
        }
    )+};
}

impl_summable_float!(f32, f64);

/// A [`CountedTree`] that also keeps the sum of all occurrences.
///
/// Mutators mirror the tree's and update the sum in O(1); read-only queries go through
/// [`Deref`] to the inner tree.
///
/// # Examples
///
/// ```
/// use counted_tree::SummedTree;
///
/// let mut tree = SummedTree::new();
/// tree.insert(14);
/// tree.insert_many(42, 2);
/// tree.insert(-2);
/// tree.remove(&14);
///
/// assert_eq!(tree.sum(), 82);
/// assert_eq!(tree.first(), Some(&-2));
/// ```
pub struct SummedTree<T: Summable, C = Natural> {
    /// The ordered multiset
    tree: CountedTree<T, C>,
    /// Running sum of value times count
    sum: T::Accumulator,
}

impl<T: Summable + Ord> SummedTree<T> {
    /// Creates an empty tree ordered by [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T: Summable, C> SummedTree<T, C> {
    /// Creates an empty tree ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: CountedTree::with_comparator(cmp),
            sum: T::Accumulator::default(),
        }
    }

    /// The sum of every occurrence, in O(1).
    ///
    /// # Returns
    ///
    /// * `T` - The total, zero for an empty tree
    #[inline]
    pub fn sum(&self) -> T {
        T::total(&self.sum)
    }

    /// The wrapped tree.
    #[inline]
    pub fn tree(&self) -> &CountedTree<T, C> {
        &self.tree
    }

    /// Unwraps the tree, discarding the sum.
    pub fn into_inner(self) -> CountedTree<T, C> {
        self.tree
    }

    /// Removes every value and resets the sum.
    pub fn clear(&mut self) {
        self.tree.clear();
        self.sum = T::Accumulator::default();
    }
}

impl<T: Summable, C: Comparator<T>> SummedTree<T, C> {
    /// Adds one occurrence of `value`, returning true if it was not present before.
    #[inline]
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_many(value, 1)
    }

    /// Adds `n` occurrences of `value`, returning true if it was not present before.
    ///
    /// When an equal value is already stored, the stored value is what gets summed.
    pub fn insert_many(&mut self, value: T, n: usize) -> bool {
        if n == 0 {
            return false;
        }

        match self.tree.get(&value) {
            Some(stored) => T::accumulate(&mut self.sum, stored, n),
            None => T::accumulate(&mut self.sum, &value, n),
        }
        self.tree.insert_many(value, n)
    }

    /// Removes one occurrence of `value`, returning true if one was removed.
    #[inline]
    pub fn remove(&mut self, value: &T) -> bool {
        self.remove_many(value, 1) == 1
    }

    /// Removes up to `n` occurrences of `value`, returning how many were removed.
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
        let removed = n.min(self.tree.count(value));
        if removed == 0 {
            return 0;
        }

        if let Some(stored) = self.tree.get(value) {
            T::retract(&mut self.sum, stored, removed);
        }
        self.tree.remove_many(value, removed)
    }

    /// Removes every occurrence of `value`, returning how many there were.
    #[inline]
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.remove_many(value, usize::MAX)
    }
}

impl<T: Summable + Ord> Default for SummedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Summable, C> Deref for SummedTree<T, C> {
    type Target = CountedTree<T, C>;

    fn deref(&self) -> &Self::Target {
        &self.tree
    }
}

impl<T: Summable, C> From<CountedTree<T, C>> for SummedTree<T, C> {
    /// Wraps `tree`, totalling its contents once.
    fn from(tree: CountedTree<T, C>) -> Self {
        let mut sum = T::Accumulator::default();
        for (value, count) in tree.iter() {
            T::accumulate(&mut sum, value, count);
        }
        Self { tree, sum }
    }
}

impl<T: Summable, C: Comparator<T> + Default> FromIterator<T> for SummedTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::with_comparator(C::default());
        for value in iter {
            tree.insert(value);
        }
        tree
    }
}

impl<T, C> Clone for SummedTree<T, C>
where
    T: Summable + Clone,
    C: Comparator<T> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            sum: self.sum.clone(),
        }
    }
}

impl<T: Summable + fmt::Debug, C> fmt::Debug for SummedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummedTree")
            .field("tree", &self.tree)
            .field("sum", &self.sum)
            .finish()
    }
}

impl<T: Summable + PartialEq, C> PartialEq for SummedTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}
