//! Runtime descriptors for the slot types of a pair list.
//!
//! A [`PairList`](crate::PairList) records one [`ElementType`] per slot when
//! it is created. The descriptors are what flat, dynamically typed input is
//! cast against during [`slurp`](crate::PairSequence::slurp) and
//! [`load`](crate::PairSequence::load), and they take part in hashing and
//! in the textual representation of a list.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::PairListError;
use crate::tuple::Pair;

/// Describes the type of one slot of a pair list.
///
/// # Examples
///
/// ```rust
/// use pairlist::ElementType;
///
/// let descriptor = ElementType::of::<i32>();
/// assert_eq!(descriptor.name(), "i32");
/// assert!(descriptor.describes::<i32>());
/// assert!(!descriptor.describes::<u32>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
}

impl ElementType {
    /// Returns the descriptor of `T`.
    #[inline]
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the name of the described type.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if this descriptor describes `T`.
    #[inline]
    #[must_use]
    pub fn describes<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Casts a dynamically typed value to the described type.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] when `value` is not a `T`
    /// or when this descriptor does not describe `T`.
    pub fn cast<T: 'static>(
        &self,
        value: Box<dyn Any>,
        operation: &'static str,
        position: usize,
    ) -> Result<T, PairListError> {
        if !self.describes::<T>() {
            return Err(PairListError::invalid_argument(
                operation,
                format!("descriptor {} cannot produce values of another type", self.name),
            ));
        }
        value.downcast::<T>().map(|value| *value).map_err(|_| {
            PairListError::invalid_argument(
                operation,
                format!("element {position} is not of type {}", self.name),
            )
        })
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// Casts a flat sequence of alternating first/second values into pairs.
///
/// Nothing is produced unless the whole input is valid.
pub(super) fn cast_flat<A: 'static, B: 'static, I>(
    first_type: ElementType,
    second_type: ElementType,
    values: I,
    operation: &'static str,
) -> Result<Vec<Pair<A, B>>, PairListError>
where
    I: IntoIterator<Item = Box<dyn Any>>,
{
    let mut values = values.into_iter().enumerate();
    let mut pairs = Vec::with_capacity(values.size_hint().0 / 2);
    while let Some((position, first)) = values.next() {
        let Some((second_position, second)) = values.next() else {
            return Err(PairListError::invalid_argument(
                operation,
                format!("expected an even number of elements, got {}", position + 1),
            ));
        };
        let first = first_type.cast::<A>(first, operation, position)?;
        let second = second_type.cast::<B>(second, operation, second_position)?;
        pairs.push(Pair::new(first, second));
    }
    Ok(pairs)
}
