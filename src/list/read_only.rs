//! Read-only access to a pair sequence.
//!
//! [`ReadOnly`] wraps any [`PairSequence`] and forwards every read to it
//! while every mutator fails with [`PairListError::PermissionDenied`]. The
//! wrapper owns the sequence; only views taken from a list before it was
//! wrapped can still change it.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::PairList;
use super::element_type::ElementType;
use super::sequence::PairSequence;
use super::version::Version;
use super::view::PairView;
use crate::error::PairListError;
use crate::tuple::Pair;

/// A wrapper that rejects every mutation of the wrapped sequence.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let mut list: PairList<&str, i32> = PairList::of();
/// list.put("a", 1)?;
///
/// let mut frozen = ReadOnly::new(list);
/// assert_eq!(frozen.get(0)?, Pair::new("a", 1));
/// assert_eq!(
///     frozen.put("b", 2).unwrap_err().kind(),
///     ErrorKind::PermissionDenied
/// );
/// # Ok::<(), PairListError>(())
/// ```
pub struct ReadOnly<S> {
    inner: S,
}

impl<S: PairSequence> ReadOnly<S> {
    /// Wraps `sequence`.
    #[inline]
    #[must_use]
    pub const fn new(sequence: S) -> Self {
        Self { inner: sequence }
    }

    /// Unwraps the sequence, handing write access back to the caller.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<A, B> ReadOnly<PairList<A, B>> {
    /// Returns a read-only view of `from..to`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] unless
    /// `from <= to <= len()`.
    pub fn subview(&self, from: usize, to: usize) -> Result<ReadOnly<PairView<A, B>>, PairListError> {
        Ok(ReadOnly {
            inner: self.inner.view(from, to)?,
        })
    }
}

impl<A, B> ReadOnly<PairView<A, B>> {
    /// Returns a read-only view of `from..to` of the wrapped view.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] unless
    /// `from <= to <= len()`, or a structural conflict if the wrapped view
    /// is stale.
    pub fn subview(&self, from: usize, to: usize) -> Result<Self, PairListError> {
        Ok(Self {
            inner: self.inner.subview(from, to)?,
        })
    }
}

const fn denied<T>(operation: &'static str) -> Result<T, PairListError> {
    Err(PairListError::PermissionDenied { operation })
}

impl<S: PairSequence> PairSequence for ReadOnly<S> {
    type First = S::First;
    type Second = S::Second;

    fn len(&self) -> Result<usize, PairListError> {
        self.inner.len()
    }

    fn get(&self, index: usize) -> Result<Pair<S::First, S::Second>, PairListError> {
        self.inner.get(index)
    }

    fn set(
        &mut self,
        _index: usize,
        _pair: Pair<S::First, S::Second>,
    ) -> Result<Pair<S::First, S::Second>, PairListError> {
        denied("set")
    }

    fn insert(
        &mut self,
        _index: usize,
        _pair: Pair<S::First, S::Second>,
    ) -> Result<(), PairListError> {
        denied("insert")
    }

    fn remove(&mut self, _index: usize) -> Result<Pair<S::First, S::Second>, PairListError> {
        denied("remove")
    }

    fn insert_all<I>(&mut self, _index: usize, _pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<S::First, S::Second>>,
    {
        denied("insert_all")
    }

    fn clear(&mut self) -> Result<(), PairListError> {
        denied("clear")
    }

    fn version(&self) -> Result<Version, PairListError> {
        self.inner.version()
    }

    fn element_types(&self) -> (ElementType, ElementType) {
        self.inner.element_types()
    }

    fn alike(&self) -> PairList<S::First, S::Second> {
        self.inner.alike()
    }

    fn slurp<I>(&mut self, _values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        denied("slurp")
    }

    fn load<I>(&mut self, _values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        denied("load")
    }

    fn zip<I, J>(&mut self, _firsts: I, _seconds: J) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = S::First>,
        J: IntoIterator<Item = S::Second>,
    {
        denied("zip")
    }

    fn put_all<M>(&mut self, _entries: M) -> Result<(), PairListError>
    where
        M: IntoIterator<Item = (S::First, S::Second)>,
    {
        denied("put_all")
    }

    fn push(&mut self, _pair: Pair<S::First, S::Second>) -> Result<(), PairListError> {
        denied("push")
    }

    fn put(&mut self, _first: S::First, _second: S::Second) -> Result<(), PairListError> {
        denied("put")
    }

    fn put_at(
        &mut self,
        _index: usize,
        _first: S::First,
        _second: S::Second,
    ) -> Result<(), PairListError> {
        denied("put_at")
    }

    fn set_slots(
        &mut self,
        _index: usize,
        _first: S::First,
        _second: S::Second,
    ) -> Result<Pair<S::First, S::Second>, PairListError> {
        denied("set_slots")
    }

    fn append_all<I>(&mut self, _pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<S::First, S::Second>>,
    {
        denied("append_all")
    }

    fn replace_firsts(&mut self, _values: Vec<S::First>) -> Result<(), PairListError>
    where
        S::Second: Clone,
    {
        denied("replace_firsts")
    }

    fn replace_seconds(&mut self, _values: Vec<S::Second>) -> Result<(), PairListError>
    where
        S::First: Clone,
    {
        denied("replace_seconds")
    }

    fn pairs(&self) -> Result<Vec<Pair<S::First, S::Second>>, PairListError> {
        self.inner.pairs()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<S: PartialEq> PartialEq for ReadOnly<S> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<S: Eq> Eq for ReadOnly<S> {}

impl<A: PartialEq, B: PartialEq> PartialEq<PairList<A, B>> for ReadOnly<PairList<A, B>> {
    fn eq(&self, other: &PairList<A, B>) -> bool {
        self.inner == *other
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq<ReadOnly<PairList<A, B>>> for PairList<A, B> {
    fn eq(&self, other: &ReadOnly<Self>) -> bool {
        *self == other.inner
    }
}

impl<S: Hash> Hash for ReadOnly<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl<S: fmt::Debug> fmt::Debug for ReadOnly<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("ReadOnly").field(&self.inner).finish()
    }
}

impl<S: fmt::Display> fmt::Display for ReadOnly<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ReadOnly({})", self.inner)
    }
}

// =============================================================================
// Empty Singletons
// =============================================================================

thread_local! {
    static EMPTY: RefCell<HashMap<TypeId, &'static dyn Any>> = RefCell::new(HashMap::new());
}

/// Returns the canonical empty read-only list for `A` and `B`.
///
/// Every call on the same thread with the same slot types returns the same
/// instance. Each instance is allocated once per thread and type pair and
/// never freed.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let first = pairlist::empty::<&str, i32>();
/// let second = pairlist::empty::<&str, i32>();
/// assert!(std::ptr::eq(first, second));
/// assert!(first.is_empty()?);
/// # Ok::<(), PairListError>(())
/// ```
#[must_use]
pub fn empty<A: 'static, B: 'static>() -> &'static ReadOnly<PairList<A, B>> {
    EMPTY.with(|registry| {
        let key = TypeId::of::<ReadOnly<PairList<A, B>>>();
        let existing = registry
            .borrow()
            .get(&key)
            .copied()
            .and_then(|entry: &'static dyn Any| entry.downcast_ref::<ReadOnly<PairList<A, B>>>());
        existing.unwrap_or_else(|| {
            let created: &'static ReadOnly<PairList<A, B>> =
                Box::leak(Box::new(ReadOnly::new(PairList::of())));
            registry.borrow_mut().insert(key, created);
            created
        })
    })
}
