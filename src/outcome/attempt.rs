//! Capturing native failures.
//!
//! A native failure is either an `Err` of some `std::error::Error` type or a
//! panic. The `attempt*` constructors turn both into an
//! [`ErrorException`](crate::error::ErrorException) leaf under the
//! caller's context, after which it behaves like any other failure.
//!
//! Panics are only catchable with `panic = "unwind"` (the default). The
//! panic hook still runs, so the message is printed as usual.

use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

use super::Outcome;
use crate::error::{ErrorException, LeafError, ResultError};

impl<T> Outcome<T> {
    /// Run a fallible function, capturing its error or panic.
    ///
    /// On failure the native error becomes a child of a composite whose
    /// parent is `context`.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let parsed = Outcome::attempt("parsing retry count", || "3".parse::<u8>());
    /// assert_eq!(parsed, Outcome::ok(3));
    ///
    /// let failed = Outcome::attempt("parsing retry count", || "many".parse::<u8>());
    /// assert_eq!(
    ///     failed.unwrap_error().to_safe_string(),
    ///     "parsing retry count;invalid digit found in string"
    /// );
    /// ```
    #[track_caller]
    pub fn attempt<E, F>(context: impl Into<LeafError>, f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: StdError + Send + Sync + 'static,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => Outcome::ok(value),
            Ok(Err(error)) => Outcome::fail(ResultError::exception(error).enhance_with(context)),
            Err(payload) => Outcome::fail(panicked(payload, context)),
        }
    }

    /// Run a function returning an outcome, capturing panics.
    ///
    /// A failure returned by `f` is enhanced with `context` rather than
    /// replaced.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::<()>::attempt_outcome("saving draft", || Outcome::fail("quota exceeded"));
    /// assert_eq!(outcome.unwrap_error().to_safe_string(), "saving draft;quota exceeded");
    /// ```
    #[track_caller]
    pub fn attempt_outcome<F>(context: impl Into<LeafError>, f: F) -> Self
    where
        F: FnOnce() -> Outcome<T>,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(outcome) => outcome.with_context(context),
            Err(payload) => Outcome::fail(panicked(payload, context)),
        }
    }

    /// Run an infallible-looking function, capturing a panic.
    #[track_caller]
    pub fn catch_unwind<F>(context: impl Into<LeafError>, f: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Outcome::ok(value),
            Err(payload) => Outcome::fail(panicked(payload, context)),
        }
    }
}

pub(crate) fn panicked(
    payload: Box<dyn std::any::Any + Send + 'static>,
    context: impl Into<LeafError>,
) -> ResultError {
    ResultError::from(ErrorException::from_panic(payload)).enhance_with(context)
}
