//! Live sub-range views.
//!
//! A [`PairView`] is a window `(offset, length)` over its parent, which is
//! either the storage of a [`PairList`] or the window of another view. The
//! window caches the parent's version; every operation first walks up the
//! parent chain and compares each cached version with the actual one, so a
//! mutation anywhere above invalidates every descendant, including views
//! that were never touched in between.
//!
//! # Ownership
//!
//! ```text
//!   PairList ──Rc──▶ Storage ◀──Weak── Window ◀──Rc── Window ◀──Rc── PairView
//!                                        ▲
//!                                        └──Rc── PairView
//! ```
//!
//! Views never keep the root storage alive. Once the list is dropped every
//! view reports [`PairListError::Detached`].

use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use super::PairList;
use super::cursor::ViewCursor;
use super::element_type::ElementType;
use super::sequence::PairSequence;
use super::storage::{
    SharedStorage, Storage, check_index, check_insert_index, check_range,
};
use super::version::Version;
use crate::error::PairListError;
use crate::tuple::Pair;

// =============================================================================
// Parent
// =============================================================================

/// What a window is laid over.
pub(super) enum Parent<A, B> {
    Root(Weak<RefCell<Storage<A, B>>>),
    Window(Rc<RefCell<Window<A, B>>>),
}

fn upgrade<A, B>(
    storage: &Weak<RefCell<Storage<A, B>>>,
) -> Result<SharedStorage<A, B>, PairListError> {
    storage.upgrade().ok_or(PairListError::Detached)
}

fn read<T>(cell: &RefCell<T>) -> Result<Ref<'_, T>, PairListError> {
    cell.try_borrow().map_err(|_| PairListError::ReentrantAccess)
}

fn write<T>(cell: &RefCell<T>) -> Result<RefMut<'_, T>, PairListError> {
    cell.try_borrow_mut()
        .map_err(|_| PairListError::ReentrantAccess)
}

impl<A, B> Parent<A, B> {
    /// The parent's current version; a window parent must be fresh itself.
    fn version(&self) -> Result<Version, PairListError> {
        match self {
            Self::Root(storage) => Ok(read(&*upgrade(storage)?)?.version),
            Self::Window(window) => read(window)?.fresh_version(),
        }
    }

    fn get(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        match self {
            Self::Root(storage) => read(&*upgrade(storage)?)?.get(index),
            Self::Window(window) => read(window)?.get(index),
        }
    }

    fn set(&self, index: usize, pair: Pair<A, B>) -> Result<Pair<A, B>, PairListError> {
        match self {
            Self::Root(storage) => write(&*upgrade(storage)?)?.set(index, pair),
            Self::Window(window) => write(window)?.set(index, pair),
        }
    }

    fn insert(&self, index: usize, pair: Pair<A, B>) -> Result<(), PairListError> {
        match self {
            Self::Root(storage) => write(&*upgrade(storage)?)?.insert(index, pair),
            Self::Window(window) => write(window)?.insert(index, pair),
        }
    }

    fn remove(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        match self {
            Self::Root(storage) => write(&*upgrade(storage)?)?.remove(index),
            Self::Window(window) => write(window)?.remove(index),
        }
    }

    fn insert_all(&self, index: usize, pairs: Vec<Pair<A, B>>) -> Result<bool, PairListError> {
        match self {
            Self::Root(storage) => write(&*upgrade(storage)?)?.insert_all(index, pairs),
            Self::Window(window) => write(window)?.insert_all(index, pairs),
        }
    }

    fn remove_range(&self, from: usize, to: usize) -> Result<(), PairListError> {
        match self {
            Self::Root(storage) => write(&*upgrade(storage)?)?.remove_range(from, to),
            Self::Window(window) => write(window)?.remove_range(from, to),
        }
    }
}

// =============================================================================
// Window
// =============================================================================

/// The shared state of one view: where it sits in its parent and which
/// parent version it last agreed with.
pub(super) struct Window<A, B> {
    parent: Parent<A, B>,
    offset: usize,
    length: usize,
    cached_version: Version,
}

impl<A, B> Window<A, B> {
    fn check_fresh(&self) -> Result<(), PairListError> {
        let actual = self.parent.version()?;
        if actual == self.cached_version {
            Ok(())
        } else {
            debug!(
                expected = %self.cached_version,
                %actual,
                offset = self.offset,
                length = self.length,
                "stale view rejected"
            );
            Err(PairListError::StructuralConflict {
                expected: self.cached_version,
                actual,
            })
        }
    }

    /// The version children of this window compare against.
    fn fresh_version(&self) -> Result<Version, PairListError> {
        self.check_fresh()?;
        Ok(self.cached_version)
    }

    fn refresh(&mut self) -> Result<(), PairListError> {
        self.cached_version = self.parent.version()?;
        Ok(())
    }

    fn len(&self) -> Result<usize, PairListError> {
        self.check_fresh()?;
        Ok(self.length)
    }

    fn get(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.check_fresh()?;
        check_index(index, self.length)?;
        self.parent.get(self.offset + index)
    }

    fn set(&mut self, index: usize, pair: Pair<A, B>) -> Result<Pair<A, B>, PairListError> {
        self.check_fresh()?;
        check_index(index, self.length)?;
        let previous = self.parent.set(self.offset + index, pair)?;
        self.refresh()?;
        Ok(previous)
    }

    fn insert(&mut self, index: usize, pair: Pair<A, B>) -> Result<(), PairListError> {
        self.check_fresh()?;
        check_insert_index(index, self.length)?;
        self.parent.insert(self.offset + index, pair)?;
        self.length += 1;
        self.refresh()
    }

    fn remove(&mut self, index: usize) -> Result<Pair<A, B>, PairListError> {
        self.check_fresh()?;
        check_index(index, self.length)?;
        let removed = self.parent.remove(self.offset + index)?;
        self.length -= 1;
        self.refresh()?;
        Ok(removed)
    }

    fn insert_all(&mut self, index: usize, pairs: Vec<Pair<A, B>>) -> Result<bool, PairListError> {
        check_insert_index(index, self.length)?;
        if pairs.is_empty() {
            return Ok(false);
        }
        self.check_fresh()?;
        let count = pairs.len();
        self.parent.insert_all(self.offset + index, pairs)?;
        self.length += count;
        self.refresh()?;
        Ok(true)
    }

    fn remove_range(&mut self, from: usize, to: usize) -> Result<(), PairListError> {
        self.check_fresh()?;
        check_range(from, to, self.length)?;
        self.parent
            .remove_range(self.offset + from, self.offset + to)?;
        self.length -= to - from;
        self.refresh()
    }
}

// =============================================================================
// PairView
// =============================================================================

/// A live, non-copying window over a [`PairList`] or another `PairView`.
///
/// Reads and writes go straight through to the backing list. A view fails
/// with [`PairListError::StructuralConflict`] as soon as anything above it
/// was changed by someone else, and with [`PairListError::Detached`] once
/// the list is gone.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let list: PairList<char, u8> = "abcdef".chars().zip(0..).collect();
///
/// let mut outer = list.view(1, 5)?;
/// let mut inner = outer.subview(1, 3)?;
/// inner.clear()?;
///
/// assert_eq!(inner.len()?, 0);
/// assert_eq!(outer.firsts()?, vec!['b', 'e']);
/// assert_eq!(list.firsts()?, vec!['a', 'b', 'e', 'f']);
///
/// outer.put('x', 9)?;
/// assert_eq!(list.firsts()?, vec!['a', 'b', 'e', 'x', 'f']);
/// assert!(inner.len().is_err());
/// # Ok::<(), PairListError>(())
/// ```
pub struct PairView<A, B> {
    window: Rc<RefCell<Window<A, B>>>,
}

impl<A, B> PairView<A, B> {
    pub(super) fn new(
        parent: Parent<A, B>,
        offset: usize,
        length: usize,
        cached_version: Version,
    ) -> Self {
        Self {
            window: Rc::new(RefCell::new(Window {
                parent,
                offset,
                length,
                cached_version,
            })),
        }
    }

    /// Returns a view of `from..to` of this view.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] unless
    /// `from <= to <= len()`, or a structural conflict if this view is
    /// stale.
    pub fn subview(&self, from: usize, to: usize) -> Result<Self, PairListError> {
        let window = read(&self.window)?;
        let version = window.fresh_version()?;
        check_range(from, to, window.length)?;
        Ok(Self::new(
            Parent::Window(Rc::clone(&self.window)),
            from,
            to - from,
            version,
        ))
    }

    /// Removes the pairs in `from..to` with a single removal in the parent.
    ///
    /// # Errors
    ///
    /// Returns [`PairListError::IndexOutOfRange`] unless
    /// `from <= to <= len()`, or a structural conflict if this view is
    /// stale.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<(), PairListError> {
        write(&self.window)?.remove_range(from, to)
    }

    /// The length as last recorded, without checking freshness.
    pub(super) fn recorded_len(&self) -> Result<usize, PairListError> {
        Ok(read(&self.window)?.length)
    }
}

impl<A: 'static, B: 'static> PairView<A, B> {
    /// Returns a cursor over this view that can remove what it just
    /// returned.
    pub fn cursor(&mut self) -> ViewCursor<'_, A, B> {
        ViewCursor::new(self)
    }
}

impl<A: 'static, B: 'static> PairSequence for PairView<A, B> {
    type First = A;
    type Second = B;

    fn len(&self) -> Result<usize, PairListError> {
        read(&self.window)?.len()
    }

    fn get(&self, index: usize) -> Result<Pair<A, B>, PairListError> {
        read(&self.window)?.get(index)
    }

    fn set(&mut self, index: usize, pair: Pair<A, B>) -> Result<Pair<A, B>, PairListError> {
        write(&self.window)?.set(index, pair)
    }

    fn insert(&mut self, index: usize, pair: Pair<A, B>) -> Result<(), PairListError> {
        write(&self.window)?.insert(index, pair)
    }

    fn remove(&mut self, index: usize) -> Result<Pair<A, B>, PairListError> {
        write(&self.window)?.remove(index)
    }

    fn insert_all<I>(&mut self, index: usize, pairs: I) -> Result<bool, PairListError>
    where
        I: IntoIterator<Item = Pair<A, B>>,
    {
        let pairs: Vec<_> = pairs.into_iter().collect();
        write(&self.window)?.insert_all(index, pairs)
    }

    fn clear(&mut self) -> Result<(), PairListError> {
        let mut window = write(&self.window)?;
        let length = window.len()?;
        window.remove_range(0, length)
    }

    fn version(&self) -> Result<Version, PairListError> {
        read(&self.window)?.fresh_version()
    }

    fn element_types(&self) -> (ElementType, ElementType) {
        (ElementType::of::<A>(), ElementType::of::<B>())
    }

    fn alike(&self) -> PairList<A, B> {
        PairList::of()
    }

    fn slurp<I>(&mut self, _values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        Err(PairListError::Unsupported { operation: "slurp" })
    }

    fn load<I>(&mut self, _values: I) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = Box<dyn Any>>,
    {
        Err(PairListError::Unsupported { operation: "load" })
    }

    fn zip<I, J>(&mut self, _firsts: I, _seconds: J) -> Result<(), PairListError>
    where
        I: IntoIterator<Item = A>,
        J: IntoIterator<Item = B>,
    {
        Err(PairListError::Unsupported { operation: "zip" })
    }

    fn put_all<M>(&mut self, _entries: M) -> Result<(), PairListError>
    where
        M: IntoIterator<Item = (A, B)>,
    {
        Err(PairListError::Unsupported {
            operation: "put_all",
        })
    }
}

impl<A, B> fmt::Debug for PairView<A, B> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.window.try_borrow() {
            Ok(window) => formatter
                .debug_struct("PairView")
                .field("offset", &window.offset)
                .field("length", &window.length)
                .field("cached_version", &window.cached_version)
                .field("nested", &matches!(window.parent, Parent::Window(_)))
                .finish(),
            Err(_) => formatter.write_str("PairView { <borrowed> }"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
