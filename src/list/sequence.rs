//! The capability interface shared by every pair sequence.
//!
//! [`PairSequence`] is implemented by the three sequence variants:
//!
//! - [`PairList`]: the owning container
//! - [`PairView`](super::PairView): a live window over a list or a view
//! - [`ReadOnly`](super::ReadOnly): a wrapper that rejects every mutator
//!
//! Operations that a variant does not support return an error of kind
//! [`ErrorKind::Unsupported`](crate::ErrorKind::Unsupported) or
//! [`ErrorKind::PermissionDenied`](crate::ErrorKind::PermissionDenied)
//! instead of panicking. Every operation is fallible because a view may find
//! out that it went stale.

use std::any::Any;
use std::collections::HashMap;
use std::hash::Hash;

use smallvec::{SmallVec, smallvec};

use super::PairList;
use super::element_type::ElementType;
use super::version::Version;
use crate::error::PairListError;
use crate::tuple::Pair;

/// One pair rendered as a two-element, dynamically typed sequence.
pub type NestedPair = SmallVec<[Box<dyn Any>; 2]>;

/// An ordered, index-addressable sequence of [`Pair`]s.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// fn total<S: PairSequence<Second = i32>>(sequence: &S) -> Result<i32, PairListError> {
///     Ok(sequence.seconds()?.into_iter().sum())
/// }
///
/// let mut list: PairList<&str, i32> = PairList::of();
/// list.zip(["a", "b", "c"], [1, 2, 3])?;
/// let view = list.view(1, 3)?;
///
/// assert_eq!(total(&list)?, 6);
/// assert_eq!(total(&view)?, 5);
/// # Ok::<(), PairListError>(())
/// ```
pub trait PairSequence {
    /// The type of the first slot.
    type First: 'static;
    /// The type of the second slot.
    type Second: 'static;

    /// Returns the number of pairs.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn len(&self) -> Result<usize, PairListError>;

    /// Returns the pair at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] if `index >= len()`.
    fn get(&self, index: usize) -> Result<Pair<Self::First, Self::Second>, PairListError>;

    /// Replaces the pair at `index` and returns the previous one.
    ///
    /// Assigning the pair that is already stored there (the same
    /// allocation, see [`Pair::ptr_eq`]) changes nothing and leaves the
    /// version untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] if `index >= len()`.
    fn set(
        &mut self,
        index: usize,
        pair: Pair<Self::First, Self::Second>,
    ) -> Result<Pair<Self::First, Self::Second>, PairListError>;

    /// Inserts `pair` at `index`, shifting later pairs up.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] if `index > len()`.
    fn insert(
        &mut self,
        index: usize,
        pair: Pair<Self::First, Self::Second>,
    ) -> Result<(), PairListError>;

    /// Removes and returns the pair at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] if `index >= len()`.
    fn remove(&mut self, index: usize) -> Result<Pair<Self::First, Self::Second>, PairListError>;

    /// Inserts every pair of `pairs` at `index`, in order.
    ///
    /// Returns `false` without touching anything if `pairs` is empty.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] if `index > len()`.
    fn insert_all<I>(&mut self, index: usize, pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<Self::First, Self::Second>>;

    /// Removes every pair.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn clear(&mut self) -> Result<(), PairListError>;

    /// Returns the structural version as observed by views of this sequence.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn version(&self) -> Result<Version, PairListError>;

    /// Returns the descriptors of the first and the second slot.
    fn element_types(&self) -> (ElementType, ElementType);

    /// Returns a new, empty [`PairList`] with the same slot types.
    fn alike(&self) -> PairList<Self::First, Self::Second>;

    /// Appends pairs cast from a flat sequence of alternating first/second
    /// values.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if `values` has an odd
    /// length or an element has the wrong type; nothing is appended then.
    fn slurp<I>(&mut self, values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>;

    /// Loads pairs from a flat sequence into an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::AlreadyPopulated`] if the sequence already
    /// holds pairs, and the errors of [`slurp`](Self::slurp) otherwise.
    fn load<I>(&mut self, values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>;

    /// Appends one pair per aligned element of `firsts` and `seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if the inputs have
    /// different lengths; every pair appended during the call is removed
    /// again before the error is returned.
    fn zip<I, J>(&mut self, firsts: I, seconds: J) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Self::First>,
        J: IntoIterator<Item = Self::Second>;

    /// Appends one pair per `(first, second)` entry, typically of a map.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence does not accept ingestion.
    fn put_all<M>(&mut self, entries: M) -> Result<(), PairListError>
    where
        M: IntoIterator<Item = (Self::First, Self::Second)>;

    /// Returns `true` if the sequence holds no pairs.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn is_empty(&self) -> Result<bool, PairListError> {
        Ok(self.len()? == 0)
    }

    /// Appends `pair`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`insert`](Self::insert).
    fn push(&mut self, pair: Pair<Self::First, Self::Second>) -> Result<(), PairListError> {
        let length = self.len()?;
        self.insert(length, pair)
    }

    /// Appends a pair built from `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`insert`](Self::insert).
    fn put(&mut self, first: Self::First, second: Self::Second) -> Result<(), PairListError> {
        self.push(Pair::new(first, second))
    }

    /// Inserts a pair built from `first` and `second` at `index`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`insert`](Self::insert).
    fn put_at(
        &mut self,
        index: usize,
        first: Self::First,
        second: Self::Second,
    ) -> Result<(), PairListError> {
        self.insert(index, Pair::new(first, second))
    }

    /// Replaces the pair at `index` with one built from `first` and `second`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`set`](Self::set).
    fn set_slots(
        &mut self,
        index: usize,
        first: Self::First,
        second: Self::Second,
    ) -> Result<Pair<Self::First, Self::Second>, PairListError> {
        self.set(index, Pair::new(first, second))
    }

    /// Appends every pair of `pairs`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`insert_all`](Self::insert_all).
    fn append_all<I>(&mut self, pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<Self::First, Self::Second>>,
    {
        let length = self.len()?;
        self.insert_all(length, pairs)
    }

    /// Replaces the first slot of every pair, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if `values` does not hold
    /// exactly one value per pair.
    fn replace_firsts(&mut self, values: Vec<Self::First>) -> Result<(), PairListError>
    where
        Self::Second: Clone,
    {
        let length = self.len()?;
        check_replacement_length("replace_firsts", values.len(), length)?;
        for (index, value) in values.into_iter().enumerate() {
            let second = self.get(index)?.second().clone();
            self.set(index, Pair::new(value, second))?;
        }
        Ok(())
    }

    /// Replaces the second slot of every pair, in order.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if `values` does not hold
    /// exactly one value per pair.
    fn replace_seconds(&mut self, values: Vec<Self::Second>) -> Result<(), PairListError>
    where
        Self::First: Clone,
    {
        let length = self.len()?;
        check_replacement_length("replace_seconds", values.len(), length)?;
        for (index, value) in values.into_iter().enumerate() {
            let first = self.get(index)?.first().clone();
            self.set(index, Pair::new(first, value))?;
        }
        Ok(())
    }

    /// Returns the pairs as a fresh vector.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn pairs(&self) -> Result<Vec<Pair<Self::First, Self::Second>>, PairListError> {
        (0..self.len()?).map(|index| self.get(index)).collect()
    }

    /// Returns the first slot of every pair.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn firsts(&self) -> Result<Vec<Self::First>, PairListError>
    where
        Self::First: Clone,
    {
        Ok(self
            .pairs()?
            .iter()
            .map(|pair| pair.first().clone())
            .collect())
    }

    /// Returns the second slot of every pair.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn seconds(&self) -> Result<Vec<Self::Second>, PairListError>
    where
        Self::Second: Clone,
    {
        Ok(self
            .pairs()?
            .iter()
            .map(|pair| pair.second().clone())
            .collect())
    }

    /// Returns the pairs as a map from first to second slot.
    ///
    /// When several pairs share a first slot, the one with the highest
    /// index wins.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn to_map(&self) -> Result<HashMap<Self::First, Self::Second>, PairListError>
    where
        Self::First: Clone + Hash + Eq,
        Self::Second: Clone,
    {
        Ok(self
            .pairs()?
            .iter()
            .map(|pair| (pair.first().clone(), pair.second().clone()))
            .collect())
    }

    /// Returns the slots of every pair interleaved as dynamically typed
    /// values: `first0, second0, first1, second1, ...`.
    ///
    /// The result can be fed back into [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn to_flat(&self) -> Result<Vec<Box<dyn Any>>, PairListError>
    where
        Self::First: Clone,
        Self::Second: Clone,
    {
        let pairs = self.pairs()?;
        let mut flat: Vec<Box<dyn Any>> = Vec::with_capacity(pairs.len() * 2);
        for pair in &pairs {
            flat.push(Box::new(pair.first().clone()));
            flat.push(Box::new(pair.second().clone()));
        }
        Ok(flat)
    }

    /// Returns every pair as a two-element, dynamically typed sequence.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if the sequence is a stale view.
    fn to_nested(&self) -> Result<Vec<NestedPair>, PairListError>
    where
        Self::First: Clone,
        Self::Second: Clone,
    {
        Ok(self
            .pairs()?
            .iter()
            .map(|pair| -> NestedPair {
                smallvec![
                    Box::new(pair.first().clone()) as Box<dyn Any>,
                    Box::new(pair.second().clone()) as Box<dyn Any>,
                ]
            })
            .collect())
    }

    /// Compares the content of two sequences pair by pair.
    ///
    /// Slot descriptors are not compared.
    ///
    /// # Errors
    ///
    /// Returns a structural conflict if either sequence is a stale view.
    fn content_eq<O>(&self, other: &O) -> Result<bool, PairListError>
    where
        O: PairSequence<First = Self::First, Second = Self::Second>,
        Self::First: PartialEq,
        Self::Second: PartialEq,
    {
        let length = self.len()?;
        if length != other.len()? {
            return Ok(false);
        }
        for index in 0..length {
            if self.get(index)? != other.get(index)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

pub(super) fn check_replacement_length(
    operation: &'static str,
    given: usize,
    length: usize,
) -> Result<(), PairListError> {
    if given == length {
        Ok(())
    } else {
        Err(PairListError::invalid_argument(
            operation,
            format!("expected {length} values, got {given}"),
        ))
    }
}
