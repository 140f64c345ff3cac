//! Entering the outcome algebra from a standard `Result`, with context.
//!
//! This module provides the [`ResultExt`] trait. It converts a
//! `Result<T, E>` whose error is a native `std::error::Error` into an
//! [`Outcome`], wrapping the error in an
//! [`ErrorException`](crate::error::ErrorException) leaf. Context added on
//! the way up becomes a chain of composites, outermost first, so the trail
//! of what was being attempted stays attached to the cause.
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use faultline::ResultExt;
//!
//! let outcome = "eight".parse::<u8>()
//!     .context("reading worker count")
//!     .with_context("loading configuration");
//!
//! assert_eq!(
//!     outcome.unwrap_error().to_safe_string(),
//!     "loading configuration;reading worker count;invalid digit found in string"
//! );
//! ```
//!
//! ## Recovering the native error
//!
//! ```
//! use faultline::{Outcome, ResultExt};
//! use std::io;
//!
//! let outcome = Err::<String, _>(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
//!     .context("opening journal")
//!     .compensate_when_exception(|e: &io::Error| {
//!         if e.kind() == io::ErrorKind::PermissionDenied {
//!             Outcome::ok(String::new())
//!         } else {
//!             Outcome::fail(e.to_string())
//!         }
//!     });
//!
//! assert_eq!(outcome, Outcome::ok(String::new()));
//! ```

use std::error::Error as StdError;

use crate::error::{LeafError, ResultError};
use crate::Outcome;

/// Outcome conversions for a standard `Result` with a native error.
pub trait ResultExt<T, E> {
    /// Convert into an outcome, wrapping the error as an exception leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline::ResultExt;
    /// use faultline::error::ErrorException;
    /// use faultline::error::ErrorKind;
    ///
    /// let error = "-1".parse::<u32>().into_outcome().unwrap_error();
    /// assert!(ErrorException::select(&error).is_some());
    /// ```
    fn into_outcome(self) -> Outcome<T>;

    /// Convert into an outcome, wrapping the error under `context`.
    ///
    /// An empty context leaves the exception leaf bare.
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline::ResultExt;
    ///
    /// let outcome = "x".parse::<f64>().context("parsing threshold");
    /// assert_eq!(
    ///     outcome.unwrap_error().to_safe_string(),
    ///     "parsing threshold;invalid float literal"
    /// );
    /// ```
    fn context(self, context: impl Into<LeafError>) -> Outcome<T>;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    fn into_outcome(self) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::fail(ResultError::exception(error)),
        }
    }

    #[track_caller]
    fn context(self, context: impl Into<LeafError>) -> Outcome<T> {
        match self {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::fail(ResultError::exception(error).enhance_with(context)),
        }
    }
}
