//! Error types for pair lists and their views.
//!
//! Every fallible operation in this crate returns [`PairListError`]. The
//! variants are grouped into coarse [`ErrorKind`]s so that callers can
//! branch on the category of failure without matching on every detail.

use std::fmt;

use crate::list::Version;

/// The category of a [`PairListError`].
///
/// # Examples
///
/// ```rust
/// use pairlist::{ErrorKind, PairListError};
///
/// let error = PairListError::IllegalIteratorState;
/// assert_eq!(error.kind(), ErrorKind::IllegalIteratorState);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or a view bound was outside the valid range.
    IndexOutOfRange,
    /// An argument was malformed (odd flat input, wrong element type,
    /// mismatched lengths).
    InvalidArgument,
    /// A one-shot operation was attempted on a container in the wrong state.
    StateConflict,
    /// A view no longer agrees with the structure of its parent.
    StructuralConflict,
    /// A cursor was asked to remove without a preceding advance.
    IllegalIteratorState,
    /// A mutator was invoked on a read-only sequence.
    PermissionDenied,
    /// The operation is not available for this kind of sequence.
    Unsupported,
}

/// Errors produced by [`PairList`](crate::PairList),
/// [`PairView`](crate::PairView), [`ViewCursor`](crate::ViewCursor) and
/// [`ReadOnly`](crate::ReadOnly).
///
/// # Examples
///
/// ```rust
/// use pairlist::prelude::*;
///
/// let list: PairList<&str, i32> = PairList::of();
/// let error = list.get(3).unwrap_err();
/// assert_eq!(error, PairListError::IndexOutOfRange { index: 3, length: 0 });
/// assert_eq!(format!("{error}"), "index 3 out of range for length 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairListError {
    /// `index` is outside the valid range of a sequence of `length` pairs.
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The length the index was checked against.
        length: usize,
    },
    /// An argument passed to `operation` was rejected.
    InvalidArgument {
        /// The operation that rejected the argument.
        operation: &'static str,
        /// Why the argument was rejected.
        reason: String,
    },
    /// A one-shot load was attempted on a container that already holds pairs.
    AlreadyPopulated {
        /// The number of pairs already present.
        length: usize,
    },
    /// A view's cached parent version differs from the parent's actual one.
    StructuralConflict {
        /// The version the view last observed.
        expected: Version,
        /// The version the parent reports now.
        actual: Version,
    },
    /// The container a view was taken from no longer exists.
    Detached,
    /// A view was used while its container was in the middle of a mutation.
    ReentrantAccess,
    /// `remove` was called on a cursor that has nothing to remove.
    IllegalIteratorState,
    /// `operation` was invoked on a read-only sequence.
    PermissionDenied {
        /// The rejected mutator.
        operation: &'static str,
    },
    /// `operation` is not available for this sequence.
    Unsupported {
        /// The unavailable operation.
        operation: &'static str,
    },
}

impl PairListError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::AlreadyPopulated { .. } => ErrorKind::StateConflict,
            Self::StructuralConflict { .. } | Self::Detached | Self::ReentrantAccess => {
                ErrorKind::StructuralConflict
            }
            Self::IllegalIteratorState => ErrorKind::IllegalIteratorState,
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::Unsupported { .. } => ErrorKind::Unsupported,
        }
    }

    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PairListError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => {
                write!(formatter, "index {index} out of range for length {length}")
            }
            Self::InvalidArgument { operation, reason } => {
                write!(formatter, "{operation}: {reason}")
            }
            Self::AlreadyPopulated { length } => write!(
                formatter,
                "load expects an empty pair list, found {length} pairs"
            ),
            Self::StructuralConflict { expected, actual } => write!(
                formatter,
                "view is stale: expected parent version {expected}, found {actual}"
            ),
            Self::Detached => write!(formatter, "the pair list backing this view was dropped"),
            Self::ReentrantAccess => write!(
                formatter,
                "pair list accessed while it is being mutated"
            ),
            Self::IllegalIteratorState => {
                write!(formatter, "remove called before next, or called twice")
            }
            Self::PermissionDenied { operation } => {
                write!(formatter, "{operation}: sequence is read-only")
            }
            Self::Unsupported { operation } => write!(
                formatter,
                "{operation}: not supported by this sequence"
            ),
        }
    }
}

impl std::error::Error for PairListError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PairListError::IndexOutOfRange { index: 1, length: 0 }, ErrorKind::IndexOutOfRange)]
    #[case(PairListError::invalid_argument("zip", "lengths differ"), ErrorKind::InvalidArgument)]
    #[case(PairListError::AlreadyPopulated { length: 2 }, ErrorKind::StateConflict)]
    #[case(PairListError::Detached, ErrorKind::StructuralConflict)]
    #[case(PairListError::ReentrantAccess, ErrorKind::StructuralConflict)]
    #[case(PairListError::IllegalIteratorState, ErrorKind::IllegalIteratorState)]
    #[case(PairListError::PermissionDenied { operation: "set" }, ErrorKind::PermissionDenied)]
    #[case(PairListError::Unsupported { operation: "zip" }, ErrorKind::Unsupported)]
    fn test_kind(#[case] error: PairListError, #[case] expected: ErrorKind) {
        assert_eq!(error.kind(), expected);
    }

    #[rstest]
    fn test_structural_conflict_display() {
        let error = PairListError::StructuralConflict {
            expected: Version::INITIAL.next(),
            actual: Version::INITIAL.next().next(),
        };
        assert_eq!(
            format!("{error}"),
            "view is stale: expected parent version 1, found 2"
        );
        assert_eq!(error.kind(), ErrorKind::StructuralConflict);
    }

    #[rstest]
    fn test_invalid_argument_display() {
        let error = PairListError::invalid_argument("slurp", "odd number of elements");
        assert_eq!(format!("{error}"), "slurp: odd number of elements");
    }

    #[rstest]
    fn test_error_source_is_none() {
        use std::error::Error;

        let error = PairListError::PermissionDenied { operation: "clear" };
        assert!(error.source().is_none());
    }
}
