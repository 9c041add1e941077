//! Immutable tuple values.
//!
//! This module provides the value objects stored in a
//! [`PairList`](crate::PairList):
//!
//! - [`Pair`]: an immutable two-slot value
//! - [`Triple`]: an immutable three-slot value
//! - [`Tuple`]: arity-generic, dynamically typed slot access
//!
//! # Identity and Equality
//!
//! Tuples compare and hash structurally, slot by slot. Their slots live
//! behind a shared reference counter, so cloning a tuple is O(1) and the
//! clone is *identical* to the original: [`Pair::ptr_eq`] reports whether
//! two pairs share the same allocation. A [`PairList`](crate::PairList) uses
//! identity to recognise assignments that change nothing.
//!
//! # Examples
//!
//! ```rust
//! use pairlist::{Pair, Tuple};
//!
//! let pair = Pair::new("a", 1);
//! let same = pair.clone();
//! let equal = Pair::new("a", 1);
//!
//! assert_eq!(pair, equal);
//! assert!(pair.ptr_eq(&same));
//! assert!(!pair.ptr_eq(&equal));
//!
//! assert_eq!(pair.arity(), 2);
//! assert!(pair.contains(&1));
//! ```

use std::any::Any;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type holding tuple slots.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`, so tuples of
/// `Send + Sync` values are themselves `Send + Sync`.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod pair;
mod triple;

pub use pair::Pair;
pub use triple::Triple;

/// Dynamically typed access to the slots of a fixed-arity tuple.
///
/// # Examples
///
/// ```rust
/// use pairlist::{Triple, Tuple};
///
/// let triple = Triple::new('x', 2_u8, "z");
/// assert_eq!(triple.arity(), 3);
/// assert_eq!(triple.slot(1).and_then(|slot| slot.downcast_ref::<u8>()), Some(&2));
/// assert!(triple.slot(3).is_none());
/// assert!(triple.contains(&"z"));
/// assert!(!triple.contains(&"y"));
/// ```
pub trait Tuple {
    /// The number of slots.
    fn arity(&self) -> usize;

    /// Returns the slot at `index`, or `None` if `index >= arity()`.
    fn slot(&self, index: usize) -> Option<&dyn Any>;

    /// Returns `true` if any slot holds a value of type `T` equal to `value`.
    fn contains<T: PartialEq + 'static>(&self, value: &T) -> bool
    where
        Self: Sized,
    {
        (0..self.arity())
            .filter_map(|index| self.slot(index))
            .filter_map(|slot| slot.downcast_ref::<T>())
            .any(|slot| slot == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    struct CloneCounter(Rc<Cell<usize>>);

    impl Clone for CloneCounter {
        fn clone(&self) -> Self {
            self.0.set(self.0.get() + 1);
            Self(Rc::clone(&self.0))
        }
    }

    #[rstest]
    fn test_clone_shares_slots_without_cloning_them() {
        let clones = Rc::new(Cell::new(0));
        let pair = Pair::new(CloneCounter(Rc::clone(&clones)), 1);
        let shared = pair.clone();
        assert!(pair.ptr_eq(&shared));
        assert_eq!(clones.get(), 0);
    }

    #[rstest]
    #[case(false, 0)]
    #[case(true, 1)]
    fn test_into_inner_clones_only_when_shared(#[case] shared: bool, #[case] expected: usize) {
        let clones = Rc::new(Cell::new(0));
        let pair = Pair::new(CloneCounter(Rc::clone(&clones)), 1);
        let other = shared.then(|| pair.clone());
        let (_, second) = pair.into_inner();
        assert_eq!(second, 1);
        assert_eq!(clones.get(), expected);
        drop(other);
    }
}
