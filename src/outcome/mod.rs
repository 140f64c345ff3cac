//! The `Outcome` type: success with a value, or failure with an error tree.
//!
//! `Outcome<T>` is like `Result<T, ResultError>` with two extra guarantees:
//! a failure never carries an empty error, and aggregation keeps every cause.
//! `Outcome<()>` plays the role of a payload-free result.
//!
//! # Examples
//!
//! ## Chaining
//!
//! ```
//! use faultline::Outcome;
//!
//! fn parse_port(text: &str) -> Outcome<u16> {
//!     Outcome::from_result(text.parse::<u16>().map_err(|e| e.to_string()))
//! }
//!
//! let port = parse_port("8080")
//!     .ensure(|port| *port >= 1024, "port must not be privileged")
//!     .map(|port| port + 1);
//! assert_eq!(port, Outcome::ok(8081));
//!
//! let port = parse_port("80").ensure(|port| *port >= 1024, "port must not be privileged");
//! assert_eq!(port.unwrap_error().to_safe_string(), "port must not be privileged");
//! ```
//!
//! ## Aggregating
//!
//! ```
//! use faultline::{CombineAll, Outcome};
//!
//! let result = (
//!     Outcome::ok("ada"),
//!     Outcome::<u8>::fail("age is required"),
//!     Outcome::<String>::fail("email is required"),
//! )
//!     .combine_all();
//!
//! assert_eq!(
//!     result.unwrap_error().to_safe_string(),
//!     "age is required;email is required"
//! );
//! ```

mod attempt;
mod combinators;
mod combine;
mod compensate;

pub(crate) use attempt::panicked;
pub use combine::CombineAll;

use crate::error::ResultError;
use crate::hook;

/// Either a success holding `T` or a failure holding a non-empty [`ResultError`].
///
/// Immutable: every combinator consumes the outcome and returns a new one.
#[must_use = "this `Outcome` may be a failure, which should be handled"]
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    inner: Result<T, ResultError>,
}

impl<T> Outcome<T> {
    /// Create a success.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::ok(42);
    /// assert!(outcome.is_success());
    /// ```
    #[inline]
    pub fn ok(value: T) -> Self {
        Outcome { inner: Ok(value) }
    }

    /// Create a failure.
    ///
    /// Strings are lifted to message leaves. The installed failure hook, if
    /// any, sees the error first.
    ///
    /// # Panics
    ///
    /// Panics if the error is empty (an empty message, the empty marker, or
    /// a composite with nothing in it). That is a bug in the caller, not a
    /// domain failure.
    ///
    /// ```should_panic
    /// use faultline::Outcome;
    ///
    /// let _ = Outcome::<i32>::fail("");
    /// ```
    #[track_caller]
    pub fn fail(error: impl Into<ResultError>) -> Self {
        let error = error.into();
        if error.is_empty() {
            panic!("cannot construct a failed Outcome from an empty error");
        }
        hook::notify(&error);
        Outcome { inner: Err(error) }
    }

    /// Carry an error that already backs a failure into a new outcome.
    #[inline]
    pub(crate) fn propagate(error: ResultError) -> Self {
        Outcome { inner: Err(error) }
    }

    /// Convert a standard `Result`, lifting the error.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::from_result(Err::<i32, _>("not a number"));
    /// assert_eq!(outcome.unwrap_error().to_safe_string(), "not a number");
    /// ```
    #[track_caller]
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<ResultError>,
    {
        match result {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::fail(error),
        }
    }

    /// True for a success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.inner.is_ok()
    }

    /// True for a failure.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.inner.is_err()
    }

    /// Borrow the success value.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// Borrow the failure's error.
    #[inline]
    pub fn error(&self) -> Option<&ResultError> {
        self.inner.as_ref().err()
    }

    /// Borrow the success value, cloning the error of a failure.
    pub fn as_ref(&self) -> Outcome<&T> {
        match &self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::propagate(error.clone()),
        }
    }

    /// Convert into a standard `Result`.
    #[inline]
    pub fn into_result(self) -> Result<T, ResultError> {
        self.inner
    }

    /// Keep the success value, dropping any error.
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.inner.ok()
    }

    /// The success value, or `default` for a failure.
    #[inline]
    pub fn value_or(self, default: T) -> T {
        self.inner.unwrap_or(default)
    }

    /// The success value, or one computed from the error.
    #[inline]
    pub fn value_or_else<F>(self, f: F) -> T
    where
        F: FnOnce(ResultError) -> T,
    {
        self.inner.unwrap_or_else(f)
    }

    /// Leave the algebra: the success value, or a panic for a failure.
    ///
    /// The panic message carries the full, unsafe rendering of the error
    /// tree. Meant for boundaries such as tests and top-level handlers.
    ///
    /// ```should_panic
    /// use faultline::Outcome;
    ///
    /// Outcome::<i32>::fail("no config").unwrap();
    /// ```
    #[track_caller]
    pub fn unwrap(self) -> T {
        match self.inner {
            Ok(value) => value,
            Err(error) => panic!(
                "called `Outcome::unwrap()` on a failure: {}",
                error.to_unsafe_string()
            ),
        }
    }

    /// The failure's error, or a panic for a success.
    #[track_caller]
    pub fn unwrap_error(self) -> ResultError {
        match self.inner {
            Ok(_) => panic!("called `Outcome::unwrap_error()` on a success"),
            Err(error) => error,
        }
    }

    /// Drop the success value, keeping success or failure.
    #[inline]
    pub fn discard_value(self) -> Outcome<()> {
        match self.inner {
            Ok(_) => Outcome::success(),
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Swallow any failure, always succeeding.
    ///
    /// The one explicit "ignore and proceed" escape. Reach for it on
    /// purpose only.
    #[inline]
    pub fn ignore_failure(self) -> Outcome<()> {
        Outcome::success()
    }
}

impl Outcome<()> {
    /// A payload-free success.
    #[inline]
    pub fn success() -> Self {
        Outcome::ok(())
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<ResultError>,
{
    #[track_caller]
    fn from(result: Result<T, E>) -> Self {
        Outcome::from_result(result)
    }
}

impl<T> From<Outcome<T>> for Result<T, ResultError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_and_fail_states() {
        let success = Outcome::ok(1);
        assert!(success.is_success());
        assert!(!success.is_failure());
        assert_eq!(success.value(), Some(&1));
        assert!(success.error().is_none());

        let failure = Outcome::<i32>::fail("broken");
        assert!(failure.is_failure());
        assert!(failure.value().is_none());
        assert_eq!(failure.error(), Some(&ResultError::message("broken")));
    }

    #[test]
    #[should_panic(expected = "empty error")]
    fn test_fail_with_empty_message_panics() {
        let _ = Outcome::<()>::fail("");
    }

    #[test]
    #[should_panic(expected = "empty error")]
    fn test_fail_with_empty_marker_panics() {
        let _ = Outcome::<()>::fail(ResultError::empty());
    }

    #[test]
    #[should_panic(expected = "empty error")]
    fn test_fail_with_empty_composite_panics() {
        let _ = Outcome::<()>::fail(ResultError::aggregate(Vec::new()));
    }

    #[test]
    fn test_from_result() {
        assert_eq!(Outcome::from_result(Ok::<_, String>(3)), Outcome::ok(3));
        let failed: Outcome<i32> = Err("bad").into();
        assert_eq!(failed, Outcome::fail("bad"));
    }

    #[test]
    fn test_into_result_and_back() {
        let result: Result<i32, ResultError> = Outcome::ok(5).into();
        assert_eq!(result, Ok(5));
        assert_eq!(
            Outcome::<i32>::fail("x").into_result(),
            Err(ResultError::message("x"))
        );
    }

    #[test]
    fn test_value_or() {
        assert_eq!(Outcome::ok(1).value_or(9), 1);
        assert_eq!(Outcome::<i32>::fail("x").value_or(9), 9);
        assert_eq!(
            Outcome::<usize>::fail("four").value_or_else(|e| e.to_safe_string().len()),
            4
        );
        assert_eq!(Outcome::<i32>::fail("x").into_option(), None);
    }

    #[test]
    fn test_as_ref_keeps_original() {
        let outcome = Outcome::ok(String::from("kept"));
        assert_eq!(outcome.as_ref().map(|s| s.len()), Outcome::ok(4));
        assert_eq!(outcome.unwrap(), "kept");
    }

    #[test]
    #[should_panic(expected = "on a failure: outer;inner")]
    fn test_unwrap_failure_carries_rendering() {
        Outcome::<i32>::fail(ResultError::message("inner").enhance_with("outer")).unwrap();
    }

    #[test]
    fn test_unwrap_unit_success() {
        Outcome::success().unwrap();
    }

    #[test]
    #[should_panic(expected = "on a success")]
    fn test_unwrap_error_on_success_panics() {
        Outcome::ok(1).unwrap_error();
    }

    #[test]
    fn test_discard_value_and_ignore_failure() {
        assert_eq!(Outcome::ok(1).discard_value(), Outcome::success());
        assert_eq!(
            Outcome::<i32>::fail("x").discard_value(),
            Outcome::<()>::fail("x")
        );
        assert_eq!(Outcome::<i32>::fail("x").ignore_failure(), Outcome::success());
    }
}
