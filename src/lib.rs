//! # pairlist
//!
//! Ordered lists of typed pairs with live, fail-fast sub-range views.
//!
//! ## Overview
//!
//! - **Tuples**: immutable [`Pair`] and [`Triple`] values and the
//!   arity-generic [`Tuple`] trait
//! - **Pair lists**: the owning [`PairList`] with typed bulk ingestion,
//!   `zip`, and projections to maps, flat and nested forms
//! - **Views**: [`PairView`] windows that alias a range of a list (or of
//!   another view) without copying, and detect when anything above them
//!   changed
//! - **Cursors**: [`ViewCursor`], which can remove the pair it just yielded
//! - **Read-only access**: [`ReadOnly`] and the canonical [`empty`] list
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for tuples and `PairList`
//! - `arc`: tuples share their slots through `Arc` instead of `Rc`
//!
//! ## Example
//!
//! ```rust
//! use pairlist::prelude::*;
//!
//! let mut scores: PairList<&str, u32> = PairList::of();
//! scores.zip(["ann", "bob", "cid", "dee"], [7, 3, 9, 4])?;
//!
//! let mut middle = scores.view(1, 3)?;
//! middle.set_slots(0, "bea", 5)?;
//! middle.remove(1)?;
//!
//! assert_eq!(scores.firsts()?, vec!["ann", "bea", "dee"]);
//! assert_eq!(scores.to_map()?.get("bea"), Some(&5));
//! # Ok::<(), PairListError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use pairlist::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorKind, PairListError};
    pub use crate::list::{ElementType, PairList, PairSequence, PairView, ReadOnly, Version};
    pub use crate::tuple::{Pair, Triple, Tuple};
}

pub mod error;
pub mod list;
pub mod tuple;

pub use error::{ErrorKind, PairListError};
pub use list::{
    ElementType, NestedPair, PairList, PairSequence, PairView, ReadOnly, Version, ViewCursor,
    empty, of, of_same, read_only,
};
pub use tuple::{Pair, Triple, Tuple};

/// Builds a flat, dynamically typed sequence for
/// [`slurp`](PairSequence::slurp) and [`load`](PairSequence::load).
///
/// # Examples
///
/// ```rust
/// use pairlist::{flat, prelude::*};
///
/// let mut list: PairList<&str, i32> = PairList::of();
/// list.slurp(flat!["a", 1, "b", 2])?;
/// assert_eq!(list.len()?, 2);
///
/// let error = list.slurp(flat!["c", "oops"]).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(list.len()?, 2);
/// # Ok::<(), PairListError>(())
/// ```
#[macro_export]
macro_rules! flat {
    () => {
        ::std::vec::Vec::<::std::boxed::Box<dyn ::std::any::Any>>::new()
    };
    ($($value:expr),+ $(,)?) => {
        <[_]>::into_vec(::std::boxed::Box::new([
            $(::std::boxed::Box::new($value) as ::std::boxed::Box<dyn ::std::any::Any>),+
        ]))
    };
}
