//! The owning pair list.

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::element_type::{ElementType, cast_flat};
use super::sequence::{PairSequence, check_replacement_length};
use super::storage::{SharedStorage, Storage, check_range};
use super::version::Version;
use super::view::{Parent, PairView};
use crate::error::PairListError;
use crate::tuple::Pair;

/// An ordered, mutable sequence of [`Pair`]s that supports live views.
///
/// A `PairList` owns its pairs and a structural [`Version`] that moves
/// forward on every call that changes the content. [`PairView`]s taken with
/// [`view`](Self::view) alias a window of the list without copying and fail
/// with a structural conflict once the list was changed behind their back.
///
/// # Time Complexity
///
/// | Operation        | Complexity |
/// |------------------|------------|
/// | `get` / `set`    | O(1)       |
/// | `push`           | O(1)*      |
/// | `insert`         | O(n)       |
/// | `remove`         | O(n)       |
/// | `view`           | O(1)       |
/// | `clone`          | O(n)       |
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let mut list: PairList<&str, i32> = PairList::of();
/// list.put("a", 1)?;
/// list.put("b", 2)?;
/// list.put("c", 3)?;
///
/// let mut view = list.view(0, 2)?;
/// view.remove(0)?;
/// assert_eq!(list.len()?, 2);
/// assert_eq!(view.get(0)?, Pair::new("b", 2));
///
/// list.put("d", 4)?;
/// assert_eq!(view.len().unwrap_err().kind(), ErrorKind::StructuralConflict);
/// # Ok::<(), PairListError>(())
/// ```
pub struct PairList<A, B> {
    storage: SharedStorage<A, B>,
}

impl<A: 'static, B: 'static> PairList<A, B> {
    /// Creates an empty list for pairs of `A` and `B`.
    #[must_use]
    pub fn of() -> Self {
        Self::from_pairs(Vec::new())
    }

    fn from_pairs(pairs: Vec<Pair<A, B>>) -> Self {
        Self {
            storage: Rc::new(RefCell::new(Storage::new(
                pairs,
                ElementType::of::<A>(),
                ElementType::of::<B>(),
            ))),
        }
    }

    /// Creates a list by loading a flat sequence of alternating values.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if `values` has an odd
    /// length or an element has the wrong type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pairlist::{flat, prelude::*};
    ///
    /// let list = PairList::<&str, i32>::from_flat(flat!["a", 1, "b", 2])?;
    /// assert_eq!(list.get(1)?, Pair::new("b", 2));
    /// # Ok::<(), PairListError>(())
    /// ```
    pub fn from_flat<I>(values: I) -> Result<Self, PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        let mut list = Self::of();
        list.load(values)?;
        Ok(list)
    }

    /// Creates a list by zipping two sequences.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::InvalidArgument`] if the sequences have
    /// different lengths.
    pub fn zipped<I, J>(firsts: I, seconds: J) -> Result<Self, PairListError>
    where
        I: IntoIterator<Item = A>,
        J: IntoIterator<Item = B>,
    {
        let mut list = Self::of();
        list.zip(firsts, seconds)?;
        Ok(list)
    }
}

impl<A, B> PairList<A, B> {
    fn storage(&self) -> Result<Ref<'_, Storage<A, B>>, PairListError> {
        self.storage
            .try_borrow()
            .map_err(|_| PairListError::ReentrantAccess)
    }

    fn storage_mut(&self) -> Result<RefMut<'_, Storage<A, B>>, PairListError> {
        self.storage
            .try_borrow_mut()
            .map_err(|_| PairListError::ReentrantAccess)
    }

    /// Returns a live view of the pairs in `from..to`.
    ///
    /// The bounds are validated now and never again; afterwards the view
    /// tracks its own length as it is mutated.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] unless
    /// `from <= to <= len()`.
    pub fn view(&self, from: usize, to: usize) -> Result<PairView<A, B>, PairListError> {
        let storage = self.storage()?;
        check_range(from, to, storage.elements.len())?;
        Ok(PairView::new(
            Parent::Root(Rc::downgrade(&self.storage)),
            from,
            to - from,
            storage.version,
        ))
    }

    /// Removes every pair matching `predicate`.
    ///
    /// Returns `true` if anything was removed; the version moves only then.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::ReentrantAccess`] if called while the list
    /// is already being mutated.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Result<bool, PairListError>
    where
        F: FnMut(&Pair<A, B>) -> bool,
    {
        Ok(self
            .storage_mut()?
            .retain("remove_where", |pair| !predicate(pair)))
    }

    /// Replaces every pair with the result of `transform`.
    ///
    /// Always moves the version, even if `transform` is the identity.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::ReentrantAccess`] if called while the list
    /// is already being mutated.
    pub fn replace_all<F>(&mut self, transform: F) -> Result<(), PairListError>
    where
        F: FnMut(&Pair<A, B>) -> Pair<A, B>,
    {
        self.storage_mut()?.replace_all(transform);
        Ok(())
    }
}

impl<A: PartialEq, B: PartialEq> PairList<A, B> {
    /// Removes every pair equal to one of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::ReentrantAccess`] if called while the list
    /// is already being mutated.
    pub fn remove_all(&mut self, values: &[Pair<A, B>]) -> Result<bool, PairListError> {
        Ok(self
            .storage_mut()?
            .retain("remove_all", |pair| !values.contains(pair)))
    }

    /// Keeps only the pairs equal to one of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::ReentrantAccess`] if called while the list
    /// is already being mutated.
    pub fn retain_all(&mut self, values: &[Pair<A, B>]) -> Result<bool, PairListError> {
        Ok(self
            .storage_mut()?
            .retain("retain_all", |pair| values.contains(pair)))
    }
}

impl<A: 'static, B: 'static> PairSequence for PairList<A, B> {
    type First = A;
    type Second = B;

    fn len(&self) -> Result<usize, PairListError> {
        Ok(self.storage()?.elements.len())
    }

    fn get(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.storage()?.get(index)
    }

    fn set(&mut self, index: usize, pair: Pair<A, B>) -> Result<Pair<A, B>, PairListError> {
        self.storage_mut()?.set(index, pair)
    }

    fn insert(&mut self, index: usize, pair: Pair<A, B>) -> Result<(), PairListError> {
        self.storage_mut()?.insert(index, pair)
    }

    fn remove(&mut self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.storage_mut()?.remove(index)
    }

    fn insert_all<I>(&mut self, index: usize, pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<A, B>>,
    {
        let pairs: Vec<_> = pairs.into_iter().collect();
        self.storage_mut()?.insert_all(index, pairs)
    }

    fn clear(&mut self) -> Result<(), PairListError> {
        self.storage_mut()?.clear();
        Ok(())
    }

    fn version(&self) -> Result<Version, PairListError> {
        Ok(self.storage()?.version)
    }

    fn element_types(&self) -> (ElementType, ElementType) {
        (ElementType::of::<A>(), ElementType::of::<B>())
    }

    fn alike(&self) -> Self {
        Self::of()
    }

    fn slurp<I>(&mut self, values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        let (first_type, second_type) = self.element_types();
        let pairs = cast_flat(first_type, second_type, values, "slurp")?;
        let mut storage = self.storage_mut()?;
        let length = storage.elements.len();
        storage.insert_all(length, pairs)?;
        Ok(())
    }

    fn load<I>(&mut self, values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        let length = self.len()?;
        if length > 0 {
            return Err(PairListError::AlreadyPopulated { length });
        }
        let (first_type, second_type) = self.element_types();
        let pairs = cast_flat(first_type, second_type, values, "load")?;
        self.storage_mut()?.insert_all(0, pairs)?;
        Ok(())
    }

    fn zip<I, J>(&mut self, firsts: I, seconds: J) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = A>,
        J: IntoIterator<Item = B>,
    {
        self.storage_mut()?.zip(firsts, seconds)
    }

    fn put_all<M>(&mut self, entries: M) -> Result<(), PairListError>
    where
        M: IntoIterator<Item = (A, B)>,
    {
        self.append_all(entries.into_iter().map(Pair::from))?;
        Ok(())
    }

    fn replace_firsts(&mut self, values: Vec<A>) -> Result<(), PairListError>
    where
        Self::Second: Clone,
    {
        let mut storage = self.storage_mut()?;
        check_replacement_length("replace_firsts", values.len(), storage.elements.len())?;
        for (index, value) in values.into_iter().enumerate() {
            let replacement = Pair::new(value, storage.get(index)?.second().clone());
            storage.set(index, replacement)?;
        }
        Ok(())
    }

    fn replace_seconds(&mut self, values: Vec<B>) -> Result<(), PairListError>
    where
        Self::First: Clone,
    {
        let mut storage = self.storage_mut()?;
        check_replacement_length("replace_seconds", values.len(), storage.elements.len())?;
        for (index, value) in values.into_iter().enumerate() {
            let replacement = Pair::new(storage.get(index)?.first().clone(), value);
            storage.set(index, replacement)?;
        }
        Ok(())
    }

    fn pairs(&self) -> Result<Vec<Pair<A, B>>, PairListError> {
        Ok(self.storage()?.elements.clone())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<A: 'static, B: 'static> Default for PairList<A, B> {
    #[inline]
    fn default() -> Self {
        Self::of()
    }
}

/// Creates an independent copy with its own version history.
///
/// Views of the original are not views of the copy.
impl<A: Clone, B: Clone> Clone for PairList<A, B> {
    fn clone(&self) -> Self {
        let storage = self.storage.borrow().duplicate();
        Self {
            storage: Rc::new(RefCell::new(storage)),
        }
    }
}

impl<A: 'static, B: 'static> FromIterator<Pair<A, B>> for PairList<A, B> {
    fn from_iter<I: IntoIterator<Item = Pair<A, B>>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().collect())
    }
}

impl<A: 'static, B: 'static> FromIterator<(A, B)> for PairList<A, B> {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        Self::from_pairs(iter.into_iter().map(Pair::from).collect())
    }
}

impl<A: Clone, B: Clone> IntoIterator for PairList<A, B> {
    type Item = Pair<A, B>;
    type IntoIter = std::vec::IntoIter<Pair<A, B>>;

    fn into_iter(self) -> Self::IntoIter {
        match Rc::try_unwrap(self.storage) {
            Ok(storage) => storage.into_inner().elements.into_iter(),
            Err(shared) => shared.borrow().elements.clone().into_iter(),
        }
    }
}

/// Two lists are equal when they hold equal pairs in the same order.
impl<A: PartialEq, B: PartialEq> PartialEq for PairList<A, B> {
    fn eq(&self, other: &Self) -> bool {
        *self.storage.borrow().elements == *other.storage.borrow().elements
    }
}

impl<A: Eq, B: Eq> Eq for PairList<A, B> {}

/// Hashes the pairs in order, followed by both slot descriptors.
///
/// Equal lists always share their descriptors, since the descriptors are
/// determined by `A` and `B`.
impl<A: Hash, B: Hash> Hash for PairList<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let storage = self.storage.borrow();
        storage.elements.hash(state);
        storage.first_type.hash(state);
        storage.second_type.hash(state);
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for PairList<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.storage.try_borrow() {
            Ok(storage) => formatter
                .debug_struct("PairList")
                .field("version", &storage.version)
                .field("pairs", &storage.elements)
                .finish(),
            Err(_) => formatter.write_str("PairList { <borrowed> }"),
        }
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for PairList<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(storage) = self.storage.try_borrow() else {
            return formatter.write_str("PairList<borrowed>");
        };
        write!(
            formatter,
            "PairList<{}, {}>[",
            storage.first_type, storage.second_type
        )?;
        for (index, pair) in storage.elements.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{pair}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<A: serde::Serialize, B: serde::Serialize> serde::Serialize for PairList<A, B> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{Error, SerializeSeq};
        let storage = self
            .storage
            .try_borrow()
            .map_err(|_| S::Error::custom(PairListError::ReentrantAccess))?;
        let mut seq = serializer.serialize_seq(Some(storage.elements.len()))?;
        for pair in &storage.elements {
            seq.serialize_element(pair)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PairListVisitor<A, B> {
    marker: std::marker::PhantomData<(A, B)>,
}

#[cfg(feature = "serde")]
impl<A, B> PairListVisitor<A, B> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, A, B> serde::de::Visitor<'de> for PairListVisitor<A, B>
where
    A: serde::Deserialize<'de> + 'static,
    B: serde::Deserialize<'de> + 'static,
{
    type Value = PairList<A, B>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of two-element sequences")
    }

    fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
    where
        S: serde::de::SeqAccess<'de>,
    {
        const MAX_PREALLOCATE: usize = 4096;
        let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE);
        let mut pairs = Vec::with_capacity(capacity);
        while let Some(pair) = seq.next_element::<Pair<A, B>>()? {
            pairs.push(pair);
        }
        Ok(PairList::from_pairs(pairs))
    }
}

#[cfg(feature = "serde")]
impl<'de, A, B> serde::Deserialize<'de> for PairList<A, B>
where
    A: serde::Deserialize<'de> + 'static,
    B: serde::Deserialize<'de> + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PairListVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn list() -> PairList<&'static str, i32> {
        [("a", 1), ("b", 2), ("c", 3)].into_iter().collect()
    }

    #[rstest]
    fn test_replace_firsts_bumps_once_per_changed_slot(mut list: PairList<&'static str, i32>) {
        list.replace_firsts(vec!["x", "y", "z"]).unwrap();
        assert_eq!(list.firsts().unwrap(), vec!["x", "y", "z"]);
        assert_eq!(list.seconds().unwrap(), vec![1, 2, 3]);
        assert_eq!(list.version().unwrap().get(), 3);
    }

    #[rstest]
    fn test_replace_seconds_rejects_wrong_length(mut list: PairList<&'static str, i32>) {
        let error = list.replace_seconds(vec![1, 2]).unwrap_err();
        assert_eq!(
            format!("{error}"),
            "replace_seconds: expected 3 values, got 2"
        );
        assert_eq!(list.version().unwrap(), Version::INITIAL);
    }

    #[rstest]
    fn test_clone_is_independent(list: PairList<&'static str, i32>) {
        let mut copy = list.clone();
        copy.put("d", 4).unwrap();
        assert_eq!(list.len().unwrap(), 3);
        assert_eq!(copy.len().unwrap(), 4);
        assert_eq!(copy.version().unwrap(), Version::INITIAL.next());
    }

    #[rstest]
    fn test_into_iter_yields_pairs_in_order(list: PairList<&'static str, i32>) {
        let pairs: Vec<_> = list.into_iter().map(Pair::into_inner).collect();
        assert_eq!(pairs, vec![("a", 1), ("b", 2), ("c", 3)]);
    }

    #[rstest]
    fn test_into_iter_with_outstanding_view(list: PairList<&'static str, i32>) {
        let view = list.view(0, 1).unwrap();
        assert_eq!(list.into_iter().count(), 3);
        assert_eq!(view.len().unwrap_err(), PairListError::Detached);
    }

    #[rstest]
    fn test_display(list: PairList<&'static str, i32>) {
        assert_eq!(
            list.to_string(),
            "PairList<&str, i32>[(a, 1), (b, 2), (c, 3)]"
        );
    }

    #[rstest]
    fn test_remove_where_inside_view_callback_is_reentrant(mut list: PairList<&'static str, i32>) {
        let view = list.view(0, 2).unwrap();
        let mut observed = None;
        list.remove_where(|_| {
            observed.get_or_insert_with(|| view.len());
            false
        })
        .unwrap();
        assert_eq!(observed, Some(Err(PairListError::ReentrantAccess)));
        assert_eq!(view.len().unwrap(), 2);
    }

    #[rstest]
    fn test_equality_compares_elements_not_identity() {
        let list: PairList<f64, i32> = [(f64::NAN, 0)].into_iter().collect();
        assert!(!list.eq(&list));
        assert!(!list.eq(&list.clone()));
    }
}
