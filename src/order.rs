//! Ordering rules used to place keys in the tree.
//!
//! An ordering rule is chosen per tree type and never changes for the life of
//! the tree. It only decides left/right placement: matching during find and
//! remove uses the key's own `Eq`.

use std::cmp::Ordering;

/// A strict "orders before" predicate over keys.
///
/// Implementations must describe a total preorder: `less` is irreflexive and
/// transitive, and keys that are equal under `Eq` never order before each
/// other. Keys that are neither less nor greater than one another are "ties"
/// and are placed in the right subtree.
pub trait KeyOrder<K: ?Sized> {
    fn less(a: &K, b: &K) -> bool;

    #[inline]
    fn compare(a: &K, b: &K) -> Ordering {
        if Self::less(a, b) {
            Ordering::Less
        } else if Self::less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Orders keys by byte length: shorter keys go left.
///
/// Keys of equal length are ties regardless of their contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByLength;

impl<K: AsRef<[u8]> + ?Sized> KeyOrder<K> for ByLength {
    #[inline]
    fn less(a: &K, b: &K) -> bool {
        a.as_ref().len() < b.as_ref().len()
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> KeyOrder<K> for Natural {
    #[inline]
    fn less(a: &K, b: &K) -> bool {
        a < b
    }

    #[inline]
    fn compare(a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}
