//! The shared root state of a pair list.
//!
//! [`Storage`] owns the elements and the structural version. A
//! [`PairList`](super::PairList) holds the only strong reference to it;
//! views reach it through a weak reference. Every mutator here bumps the
//! version at most once and only when the content actually changed.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use super::element_type::ElementType;
use super::version::Version;
use crate::error::PairListError;
use crate::tuple::Pair;

/// The root storage as shared between a list and its views.
pub(super) type SharedStorage<A, B> = Rc<RefCell<Storage<A, B>>>;

pub(super) struct Storage<A, B> {
    pub(super) elements: Vec<Pair<A, B>>,
    pub(super) version: Version,
    pub(super) first_type: ElementType,
    pub(super) second_type: ElementType,
}

impl<A, B> Storage<A, B> {
    pub(super) const fn new(
        elements: Vec<Pair<A, B>>,
        first_type: ElementType,
        second_type: ElementType,
    ) -> Self {
        Self {
            elements,
            version: Version::INITIAL,
            first_type,
            second_type,
        }
    }

    fn bump(&mut self, operation: &'static str) {
        self.version = self.version.next();
        trace!(operation, version = %self.version, length = self.elements.len(), "pair list mutated");
    }

    pub(super) const fn check_index(&self, index: usize) -> Result<(), PairListError> {
        check_index(index, self.elements.len())
    }

    pub(super) fn get(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.check_index(index)?;
        Ok(self.elements[index].clone())
    }

    /// Replaces the pair at `index`; assigning an identical pair is a no-op.
    pub(super) fn set(&mut self, index: usize, pair: Pair<A, B>) -> Result<Pair<A, B>, PairListError> {
        self.check_index(index)?;
        if self.elements[index].ptr_eq(&pair) {
            return Ok(pair);
        }
        let previous = std::mem::replace(&mut self.elements[index], pair);
        self.bump("set");
        Ok(previous)
    }

    pub(super) fn insert(&mut self, index: usize, pair: Pair<A, B>) -> Result<(), PairListError> {
        check_insert_index(index, self.elements.len())?;
        self.elements.insert(index, pair);
        self.bump("insert");
        Ok(())
    }

    pub(super) fn remove(&mut self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.check_index(index)?;
        let removed = self.elements.remove(index);
        self.bump("remove");
        Ok(removed)
    }

    pub(super) fn insert_all(
        &mut self,
        index: usize,
        pairs: Vec<Pair<A, B>>,
    ) -> Result<bool, PairListError> {
        check_insert_index(index, self.elements.len())?;
        if pairs.is_empty() {
            return Ok(false);
        }
        self.elements.splice(index..index, pairs);
        self.bump("insert_all");
        Ok(true)
    }

    pub(super) fn remove_range(&mut self, from: usize, to: usize) -> Result<(), PairListError> {
        check_range(from, to, self.elements.len())?;
        if from == to {
            return Ok(());
        }
        self.elements.drain(from..to);
        self.bump("remove_range");
        Ok(())
    }

    pub(super) fn clear(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        self.elements.clear();
        self.bump("clear");
    }

    /// Keeps the pairs matching `keep`; bumps only if something was dropped.
    pub(super) fn retain<F>(&mut self, operation: &'static str, keep: F) -> bool
    where
        F: FnMut(&Pair<A, B>) -> bool,
    {
        let initial_length = self.elements.len();
        self.elements.retain(keep);
        let changed = self.elements.len() != initial_length;
        if changed {
            self.bump(operation);
        }
        changed
    }

    /// Applies `transform` to every pair. Always bumps.
    pub(super) fn replace_all<F>(&mut self, mut transform: F)
    where
        F: FnMut(&Pair<A, B>) -> Pair<A, B>,
    {
        for element in &mut self.elements {
            *element = transform(element);
        }
        self.bump("replace_all");
    }

    /// Appends pairs in lockstep; all-or-nothing on unequal lengths.
    pub(super) fn zip<I, J>(&mut self, firsts: I, seconds: J) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = A>,
        J: IntoIterator<Item = B>,
    {
        let initial_length = self.elements.len();
        let mut firsts = firsts.into_iter();
        let mut seconds = seconds.into_iter();
        loop {
            match (firsts.next(), seconds.next()) {
                (Some(first), Some(second)) => self.elements.push(Pair::new(first, second)),
                (None, None) => break,
                _ => {
                    let inserted = self.elements.len() - initial_length;
                    self.elements.truncate(initial_length);
                    tracing::debug!(inserted, "zip rolled back on unequal input lengths");
                    return Err(PairListError::invalid_argument(
                        "zip",
                        "cannot zip sequences of different length",
                    ));
                }
            }
        }
        if self.elements.len() != initial_length {
            self.bump("zip");
        }
        Ok(())
    }
}

impl<A: Clone, B: Clone> Storage<A, B> {
    /// Returns an independent copy starting over at the initial version.
    pub(super) fn duplicate(&self) -> Self {
        Self::new(self.elements.clone(), self.first_type, self.second_type)
    }
}

pub(super) const fn check_index(index: usize, length: usize) -> Result<(), PairListError> {
    if index < length {
        Ok(())
    } else {
        Err(PairListError::IndexOutOfRange { index, length })
    }
}

pub(super) const fn check_insert_index(index: usize, length: usize) -> Result<(), PairListError> {
    if index <= length {
        Ok(())
    } else {
        Err(PairListError::IndexOutOfRange { index, length })
    }
}

pub(super) const fn check_range(from: usize, to: usize, length: usize) -> Result<(), PairListError> {
    if to > length {
        Err(PairListError::IndexOutOfRange { index: to, length })
    } else if from > to {
        Err(PairListError::IndexOutOfRange { index: from, length: to })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn storage() -> Storage<&'static str, i32> {
        Storage::new(
            vec![Pair::new("a", 1), Pair::new("b", 2), Pair::new("c", 3)],
            ElementType::of::<&str>(),
            ElementType::of::<i32>(),
        )
    }

    #[rstest]
    fn test_set_identical_pair_keeps_version(mut storage: Storage<&'static str, i32>) {
        let existing = storage.get(1).unwrap();
        storage.set(1, existing).unwrap();
        assert_eq!(storage.version, Version::INITIAL);
    }

    #[rstest]
    fn test_set_equal_but_distinct_pair_bumps(mut storage: Storage<&'static str, i32>) {
        storage.set(1, Pair::new("b", 2)).unwrap();
        assert_eq!(storage.version, Version::INITIAL.next());
    }

    #[rstest]
    fn test_remove_empty_range_keeps_version(mut storage: Storage<&'static str, i32>) {
        storage.remove_range(2, 2).unwrap();
        assert_eq!(storage.version, Version::INITIAL);
        storage.remove_range(0, 2).unwrap();
        assert_eq!(storage.version, Version::INITIAL.next());
        assert_eq!(storage.elements, vec![Pair::new("c", 3)]);
    }

    #[rstest]
    fn test_retain_without_change_keeps_version(mut storage: Storage<&'static str, i32>) {
        assert!(!storage.retain("remove_where", |_| true));
        assert_eq!(storage.version, Version::INITIAL);
    }

    #[rstest]
    fn test_zip_bumps_once(mut storage: Storage<&'static str, i32>) {
        storage.zip(["d", "e"], [4, 5]).unwrap();
        assert_eq!(storage.elements.len(), 5);
        assert_eq!(storage.version, Version::INITIAL.next());
    }

    #[rstest]
    #[case(0, 4)]
    #[case(3, 2)]
    fn test_check_range_rejects(#[case] from: usize, #[case] to: usize) {
        assert!(check_range(from, to, 3).is_err());
    }

    #[rstest]
    fn test_duplicate_restarts_version(mut storage: Storage<&'static str, i32>) {
        storage.clear();
        storage.insert(0, Pair::new("x", 9)).unwrap();
        let copy = storage.duplicate();
        assert_eq!(copy.version, Version::INITIAL);
        assert_eq!(copy.elements, storage.elements);
    }
}
