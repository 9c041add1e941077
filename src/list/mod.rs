//! Pair lists and their live views.
//!
//! This module provides:
//!
//! - [`PairList`]: the owning, versioned sequence of pairs
//! - [`PairView`]: a live window over a list or over another view
//! - [`ViewCursor`]: a cursor over a view that can remove as it goes
//! - [`ReadOnly`]: a wrapper rejecting every mutation
//! - [`PairSequence`]: the interface all of the above implement
//!
//! # Fail-Fast Views
//!
//! Every structural change to a list moves its [`Version`] forward. A view
//! remembers the version of its parent from its own last successful
//! operation and refuses to work once the two differ:
//!
//! ```rust
//! use pairlist::prelude::*;
//!
//! let mut list: PairList<&str, i32> = PairList::of();
//! list.zip(["a", "b", "c"], [1, 2, 3])?;
//!
//! let outer = list.view(0, 3)?;
//! let inner = outer.subview(1, 2)?;
//! assert_eq!(inner.get(0)?, Pair::new("b", 2));
//!
//! list.remove(0)?;
//! let error = inner.get(0).unwrap_err();
//! assert_eq!(error.kind(), ErrorKind::StructuralConflict);
//! # Ok::<(), PairListError>(())
//! ```
//!
//! # Thread Safety
//!
//! Lists and views are single-threaded: neither is `Send` nor `Sync`.

mod container;
mod cursor;
mod element_type;
mod read_only;
mod sequence;
mod storage;
mod version;
mod view;

pub use container::PairList;
pub use cursor::ViewCursor;
pub use element_type::ElementType;
pub use read_only::{ReadOnly, empty};
pub use sequence::{NestedPair, PairSequence};
pub use version::Version;
pub use view::PairView;

static_assertions::assert_not_impl_any!(PairList<i32, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(PairView<i32, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(ReadOnly<PairList<i32, i32>>: Send, Sync);

/// Creates an empty list for pairs of `A` and `B`.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let list = pairlist::of::<&str, i32>();
/// assert_eq!(list.element_types(), (ElementType::of::<&str>(), ElementType::of::<i32>()));
/// ```
#[must_use]
pub fn of<A: 'static, B: 'static>() -> PairList<A, B> {
    PairList::of()
}

/// Creates an empty list whose slots share the type `T`.
#[must_use]
pub fn of_same<T: 'static>() -> PairList<T, T> {
    PairList::of()
}

/// Wraps `sequence` in a [`ReadOnly`].
#[must_use]
pub const fn read_only<S: PairSequence>(sequence: S) -> ReadOnly<S> {
    ReadOnly::new(sequence)
}
