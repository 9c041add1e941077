//! The three-slot tuple.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{ReferenceCounter, Tuple};

/// An immutable value holding a `first`, a `second` and a `third` slot.
///
/// # Examples
///
/// ```rust
/// use pairlist::Triple;
///
/// let triple = Triple::new("x", 1, 2.5);
/// assert_eq!(triple.third(), &2.5);
/// assert_eq!(triple.to_string(), "(x, 1, 2.5)");
/// ```
pub struct Triple<A, B, C> {
    slots: ReferenceCounter<(A, B, C)>,
}

impl<A, B, C> Triple<A, B, C> {
    /// Creates a new triple.
    #[inline]
    #[must_use]
    pub fn new(first: A, second: B, third: C) -> Self {
        Self {
            slots: ReferenceCounter::new((first, second, third)),
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

    /// Returns the third slot.
    #[inline]
    #[must_use]
    pub fn third(&self) -> &C {
        &self.slots.2
    }

    /// Returns `true` if both triples share the same allocation.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.slots, &other.slots)
    }
}

impl<A, B, C> Clone for Triple<A, B, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            slots: ReferenceCounter::clone(&self.slots),
        }
    }
}

impl<A, B, C> From<(A, B, C)> for Triple<A, B, C> {
    #[inline]
    fn from((first, second, third): (A, B, C)) -> Self {
        Self::new(first, second, third)
    }
}

impl<A: PartialEq, B: PartialEq, C: PartialEq> PartialEq for Triple<A, B, C> {
    fn eq(&self, other: &Self) -> bool {
        *self.slots == *other.slots
    }
}

impl<A: Eq, B: Eq, C: Eq> Eq for Triple<A, B, C> {}

impl<A: Hash, B: Hash, C: Hash> Hash for Triple<A, B, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

impl<A: fmt::Debug, B: fmt::Debug, C: fmt::Debug> fmt::Debug for Triple<A, B, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Triple")
            .field(self.first())
            .field(self.second())
            .field(self.third())
            .finish()
    }
}

impl<A: fmt::Display, B: fmt::Display, C: fmt::Display> fmt::Display for Triple<A, B, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "({}, {}, {})",
            self.first(),
            self.second(),
            self.third()
        )
    }
}

impl<A: Any, B: Any, C: Any> Tuple for Triple<A, B, C> {
    #[inline]
    fn arity(&self) -> usize {
        3
    }

    fn slot(&self, index: usize) -> Option<&dyn Any> {
        match index {
            0 => Some(self.first() as &dyn Any),
            1 => Some(self.second()),
            2 => Some(self.third()),
            _ => None,
        }
    }
}

#[cfg(feature = "serde")]
impl<A, B, C> serde::Serialize for Triple<A, B, C>
where
    A: serde::Serialize,
    B: serde::Serialize,
    C: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&(self.first(), self.second(), self.third()), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, A, B, C> serde::Deserialize<'de> for Triple<A, B, C>
where
    A: serde::Deserialize<'de>,
    B: serde::Deserialize<'de>,
    C: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <(A, B, C) as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}
