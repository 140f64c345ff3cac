//! Static error-kind selectors used by kind-filtered recovery.
//!
//! [`ErrorKind`] picks a node kind out of a [`ResultError`], [`LeafKind`]
//! out of a single [`LeafError`]. Both are sealed: the set of kinds is fixed
//! by the error model.

use super::{ErrorComposite, ErrorException, ErrorKeyNotFound, ErrorMessage, LeafError, ResultError};

mod sealed {
    pub trait Sealed {}
}

/// A node kind that can be selected from a top-level error.
///
/// # Examples
///
/// ```
/// use faultline::error::{ErrorKeyNotFound, ErrorKind, ErrorMessage, ResultError};
///
/// let error = ResultError::key_not_found("id", "cache");
/// assert!(ErrorKeyNotFound::select(&error).is_some());
/// assert!(ErrorMessage::select(&error).is_none());
/// ```
pub trait ErrorKind: sealed::Sealed + Sized {
    /// Borrow `error` as this kind, if it is one.
    fn select(error: &ResultError) -> Option<&Self>;
}

/// A leaf kind, selectable from any leaf reached while flattening.
pub trait LeafKind: ErrorKind {
    /// Borrow `leaf` as this kind, if it is one.
    fn select_leaf(leaf: &LeafError) -> Option<&Self>;
}

macro_rules! impl_leaf_kind {
    ($kind:ident => $variant:ident) => {
        impl sealed::Sealed for $kind {}

        impl ErrorKind for $kind {
            #[inline]
            fn select(error: &ResultError) -> Option<&Self> {
                error.as_leaf().and_then(Self::select_leaf)
            }
        }

        impl LeafKind for $kind {
            #[inline]
            fn select_leaf(leaf: &LeafError) -> Option<&Self> {
                match leaf {
                    LeafError::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_leaf_kind!(ErrorMessage => Message);
impl_leaf_kind!(ErrorException => Exception);
impl_leaf_kind!(ErrorKeyNotFound => KeyNotFound);

impl sealed::Sealed for ErrorComposite {}

impl ErrorKind for ErrorComposite {
    #[inline]
    fn select(error: &ResultError) -> Option<&Self> {
        error.as_composite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_select_each_kind() {
        let message = ResultError::message("m");
        let exception = ResultError::exception(io::Error::other("e"));
        let missing = ResultError::key_not_found("k", "s");
        let composite = ResultError::aggregate(vec![message.clone()]);

        assert!(ErrorMessage::select(&message).is_some());
        assert!(ErrorException::select(&exception).is_some());
        assert!(ErrorKeyNotFound::select(&missing).is_some());
        assert!(ErrorComposite::select(&composite).is_some());

        assert!(ErrorMessage::select(&exception).is_none());
        assert!(ErrorMessage::select(&composite).is_none());
        assert!(ErrorComposite::select(&message).is_none());
    }

    #[test]
    fn test_select_leaf_ignores_empty() {
        assert!(ErrorMessage::select_leaf(&LeafError::Empty).is_none());
    }
}
