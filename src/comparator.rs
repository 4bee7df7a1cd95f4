use core::cmp::Ordering;

/// A three-way ordering used by every descent through a [`CountedTree`].
///
/// Implementations must describe a strict total order, and that order must not change while the
/// tree holds values. A comparator that changes its answers after insertion leaves the tree in an
/// unspecified (but memory-safe) state.
///
/// [`CountedTree`]: crate::CountedTree
pub trait Comparator<T: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders values with a closure.
///
/// # Examples
///
/// ```
/// use counted_tree::{CountedTree, FnComparator};
///
/// let by_len = FnComparator::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut tree = CountedTree::with_comparator(by_len);
/// tree.insert("ccc");
/// tree.insert("a");
/// tree.insert("bb");
///
/// assert_eq!(tree.first(), Some(&"a"));
/// assert_eq!(tree.last(), Some(&"ccc"));
/// ```
#[derive(Clone, Copy)]
pub struct FnComparator<F>(F);

impl<F> FnComparator<F> {
    /// Wraps `f` as a comparator.
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> core::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnComparator")
    }
}

/// Inverts another comparator, producing a descending tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}
