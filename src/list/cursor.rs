//! A removing cursor over a [`PairView`].

use super::sequence::PairSequence;
use super::view::PairView;
use crate::error::PairListError;
use crate::tuple::Pair;

/// A single-pass cursor over a [`PairView`].
///
/// The cursor yields `Result`s: once the view turns out to be stale the
/// conflict is yielded once and the cursor is exhausted afterwards.
/// [`remove`](Self::remove) deletes the pair most recently yielded and may be
/// called at most once per advancement.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let list: PairList<&str, i32> = [("a", 1), ("b", 2), ("c", 3), ("d", 4)]
///     .into_iter()
///     .collect();
/// let mut view = list.view(0, 3)?;
///
/// let mut cursor = view.cursor();
/// while let Some(pair) = cursor.next() {
///     if pair?.second() % 2 == 0 {
///         cursor.remove()?;
///     }
/// }
///
/// assert_eq!(list.firsts()?, vec!["a", "c", "d"]);
/// # Ok::<(), PairListError>(())
/// ```
pub struct ViewCursor<'a, A, B> {
    view: &'a mut PairView<A, B>,
    position: usize,
    removable: bool,
    exhausted: bool,
}

impl<'a, A: 'static, B: 'static> ViewCursor<'a, A, B> {
    pub(super) const fn new(view: &'a mut PairView<A, B>) -> Self {
        Self {
            view,
            position: 0,
            removable: false,
            exhausted: false,
        }
    }

    /// Returns `true` if [`next`](Iterator::next) would yield another item.
    ///
    /// Compares against the length the view recorded last, without checking
    /// freshness; a stale view is reported by `next`.
    #[must_use]
    pub fn has_next(&self) -> bool {
        if self.exhausted {
            return false;
        }
        match self.view.recorded_len() {
            Ok(length) => self.position < length,
            Err(_) => true,
        }
    }

    /// Returns the index of the pair the next call to `next` yields.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Removes the pair most recently yielded by `next`.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IllegalIteratorState`] if `next` has not
    /// yielded a pair since the last removal, and the errors of
    /// [`PairView::remove`](PairSequence::remove) otherwise.
    pub fn remove(&mut self) -> Result<Pair<A, B>, PairListError> {
        if !self.removable {
            return Err(PairListError::IllegalIteratorState);
        }
        let removed = self.view.remove(self.position - 1)?;
        self.position -= 1;
        self.removable = false;
        Ok(removed)
    }
}

impl<A: 'static, B: 'static> Iterator for ViewCursor<'_, A, B> {
    type Item = Result<Pair<A, B>, PairListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        match self.view.get(self.position) {
            Ok(pair) => {
                self.position += 1;
                self.removable = true;
                Some(Ok(pair))
            }
            Err(error) => {
                self.exhausted = true;
                self.removable = false;
                Some(Err(error))
            }
        }
    }
}

impl<A, B> std::fmt::Debug for ViewCursor<'_, A, B> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ViewCursor")
            .field("position", &self.position)
            .field("removable", &self.removable)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
