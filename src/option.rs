//! Bridging `Option` into the outcome algebra.
//!
//! The algebra only needs a handful of things from an optional value: ask
//! whether it is present, read it, and turn absence into a failure. Rust's
//! `Option` already has all of that, so this module is a thin extension
//! trait over it.

use crate::error::{LeafError, ResultError};
use crate::Outcome;

/// Outcome-flavoured methods on [`Option`].
///
/// # Examples
///
/// ```
/// use faultline::{OptionExt, Outcome};
///
/// let present = Some(3);
/// assert!(present.has_value());
/// assert_eq!(present.to_outcome("missing"), Outcome::ok(3));
///
/// let absent: Option<i32> = None;
/// assert_eq!(absent.to_outcome("missing").unwrap_error().to_safe_string(), "missing");
/// ```
pub trait OptionExt<T> {
    /// True when a value is present.
    fn has_value(&self) -> bool;

    /// True when no value is present.
    fn has_no_value(&self) -> bool;

    /// Borrow the value.
    ///
    /// # Panics
    ///
    /// Panics when no value is present.
    fn value(&self) -> &T;

    /// Succeed with the value, or fail with `error` when absent.
    ///
    /// # Panics
    ///
    /// Panics when the value is absent and `error` is empty.
    fn to_outcome(self, error: impl Into<LeafError>) -> Outcome<T>;

    /// Like [`to_outcome`](Self::to_outcome), building the error only when needed.
    fn to_outcome_with<E, F>(self, make_error: F) -> Outcome<T>
    where
        F: FnOnce() -> E,
        E: Into<ResultError>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline]
    fn has_value(&self) -> bool {
        self.is_some()
    }

    #[inline]
    fn has_no_value(&self) -> bool {
        self.is_none()
    }

    #[track_caller]
    fn value(&self) -> &T {
        match self {
            Some(value) => value,
            None => panic!("called `OptionExt::value()` on a `None` value"),
        }
    }

    #[track_caller]
    fn to_outcome(self, error: impl Into<LeafError>) -> Outcome<T> {
        match self {
            Some(value) => Outcome::ok(value),
            None => Outcome::fail(ResultError::Leaf(error.into())),
        }
    }

    #[track_caller]
    fn to_outcome_with<E, F>(self, make_error: F) -> Outcome<T>
    where
        F: FnOnce() -> E,
        E: Into<ResultError>,
    {
        match self {
            Some(value) => Outcome::ok(value),
            None => Outcome::fail(make_error()),
        }
    }
}
