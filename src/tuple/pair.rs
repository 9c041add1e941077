//! The two-slot tuple stored in a pair list.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{ReferenceCounter, Tuple};

/// An immutable value holding a `first` and a `second` slot.
///
/// Equality and hashing are structural. Cloning is O(1) and yields an
/// identical pair (see [`Pair::ptr_eq`]).
///
/// # Examples
///
/// ```rust
/// use pairlist::Pair;
///
/// let pair = Pair::new("answer", 42);
/// assert_eq!(pair.first(), &"answer");
/// assert_eq!(pair.second(), &42);
/// assert_eq!(pair.to_string(), "(answer, 42)");
///
/// let from_tuple: Pair<&str, i32> = ("answer", 42).into();
/// assert_eq!(pair, from_tuple);
/// ```
pub struct Pair<A, B> {
    slots: ReferenceCounter<(A, B)>,
}

impl<A, B> Pair<A, B> {
    /// Creates a new pair.
    #[inline]
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self {
            slots: ReferenceCounter::new((first, second)),
        }
    }

    /// Returns the first slot.
    #[inline]
    #[must_use]
    pub fn first(&self) -> &A {
        &self.slots.0
    }

    /// Returns the second slot.
    #[inline]
    #[must_use]
    pub fn second(&self) -> &B {
        &self.slots.1
    }

    /// Returns `true` if both pairs share the same allocation.
    ///
    /// Identical pairs are always equal; equal pairs need not be identical.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pairlist::Pair;
    ///
    /// let pair = Pair::new(1, 2);
    /// assert!(pair.ptr_eq(&pair.clone()));
    /// assert!(!pair.ptr_eq(&Pair::new(1, 2)));
    /// ```
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.slots, &other.slots)
    }
}

impl<A: Clone, B: Clone> Pair<A, B> {
    /// Returns a new pair with the first slot replaced.
    #[must_use]
    pub fn with_first(&self, first: A) -> Self {
        Self::new(first, self.second().clone())
    }

    /// Returns a new pair with the second slot replaced.
    #[must_use]
    pub fn with_second(&self, second: B) -> Self {
        Self::new(self.first().clone(), second)
    }

    /// Returns both slots, cloning them only if the pair is shared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pairlist::Pair;
    ///
    /// let (first, second) = Pair::new("a".to_string(), 1).into_inner();
    /// assert_eq!(first, "a");
    /// assert_eq!(second, 1);
    /// ```
    #[must_use]
    pub fn into_inner(self) -> (A, B) {
        ReferenceCounter::try_unwrap(self.slots).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<A, B> Clone for Pair<A, B> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slots: ReferenceCounter::clone(&self.slots),
        }
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    #[inline]
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for Pair<A, B> {
    fn eq(&self, other: &Self) -> bool {
        *self.slots == *other.slots
    }
}

impl<A: Eq, B: Eq> Eq for Pair<A, B> {}

impl<A: Hash, B: Hash> Hash for Pair<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for Pair<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Pair")
            .field(self.first())
            .field(self.second())
            .finish()
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for Pair<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.first(), self.second())
    }
}

impl<A: Any, B: Any> Tuple for Pair<A, B> {
    #[inline]
    fn arity(&self) -> usize {
        2
    }

    fn slot(&self, index: usize) -> Option<&dyn Any> {
        match index {
            0 => Some(self.first() as &dyn Any),
            1 => Some(self.second()),
            _ => None,
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<A: serde::Serialize, B: serde::Serialize> serde::Serialize for Pair<A, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&(self.first(), self.second()), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, A, B> serde::Deserialize<'de> for Pair<A, B>
where
    A: serde::Deserialize<'de>,
    B: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <(A, B) as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
