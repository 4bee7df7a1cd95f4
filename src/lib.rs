#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::just_underscores_and_digits, clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub(crate) type Kbn<T> = compensated_summation::KahanBabuskaNeumaier<T>;

mod utils;

mod comparator;
pub use comparator::{Comparator, FnComparator, Natural, Reversed};

mod error;
pub use error::InvariantError;

mod multiset;
pub use multiset::Multiset;

mod tree;
pub use tree::{CountedTree, Diagram, Iter, LevelOrder, Median, PostOrder, PreOrder};

mod sum;
pub use sum::{Summable, SummedTree};

pub use ordered_float::OrderedFloat;
