//! Structural version numbers.

use std::fmt;

/// The structural version of a pair list.
///
/// A [`PairList`](crate::PairList) starts at [`Version::INITIAL`] and moves
/// to the [next](Version::next) version on every call that changes its
/// content. Versions never decrease and never repeat within one list.
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let mut list: PairList<&str, i32> = PairList::of();
/// let before = list.version()?;
/// list.put("a", 1)?;
/// assert!(list.version()? > before);
///
/// list.clear()?;
/// let cleared = list.version()?;
/// list.clear()?;
/// assert_eq!(list.version()?, cleared);
/// # Ok::<(), PairListError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u64);

impl Version {
    /// The version of a freshly created list.
    pub const INITIAL: Self = Self(0);

    /// Returns the version following this one.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Default for Version {
    #[inline]
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Version {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
