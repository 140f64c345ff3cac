//! Sequencing, side effects and elimination.

use super::Outcome;
use crate::error::{LeafError, ResultError};

impl<T> Outcome<T> {
    /// Transform the success value.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// assert_eq!(Outcome::ok(5).map(|x| x * 2), Outcome::ok(10));
    /// assert_eq!(Outcome::<i32>::fail("e").map(|x| x * 2), Outcome::fail("e"));
    /// ```
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.inner {
            Ok(value) => Outcome::ok(f(value)),
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Rewrite the error of a failure.
    ///
    /// # Panics
    ///
    /// Panics if `f` returns an empty error.
    #[track_caller]
    pub fn map_error<F>(self, f: F) -> Self
    where
        F: FnOnce(ResultError) -> ResultError,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => Outcome::fail(f(error)),
        }
    }

    /// Chain a dependent step (bind).
    ///
    /// A failure short-circuits: `f` is not called and the original error
    /// is carried unchanged.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let halve = |x: i32| {
    ///     if x % 2 == 0 {
    ///         Outcome::ok(x / 2)
    ///     } else {
    ///         Outcome::fail(format!("{} is odd", x))
    ///     }
    /// };
    ///
    /// assert_eq!(Outcome::ok(8).and_then(halve).and_then(halve), Outcome::ok(2));
    /// assert_eq!(
    ///     Outcome::ok(6).and_then(halve).and_then(halve).unwrap_error().to_safe_string(),
    ///     "3 is odd"
    /// );
    /// ```
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.inner {
            Ok(value) => f(value),
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Run a validation step, keeping the value on success.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// fn not_blank(name: &String) -> Outcome<()> {
    ///     if name.trim().is_empty() {
    ///         Outcome::fail("name is blank")
    ///     } else {
    ///         Outcome::success()
    ///     }
    /// }
    ///
    /// assert_eq!(Outcome::ok("ada".to_string()).check(not_blank), Outcome::ok("ada".to_string()));
    /// assert!(Outcome::ok("  ".to_string()).check(not_blank).is_failure());
    /// ```
    #[inline]
    pub fn check<F>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> Outcome<()>,
    {
        match self.inner {
            Ok(value) => match f(&value).inner {
                Ok(()) => Outcome::ok(value),
                Err(error) => Outcome::propagate(error),
            },
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Fail with `message` unless `predicate` holds for the value.
    ///
    /// # Panics
    ///
    /// Panics if the predicate fails and `message` is empty.
    #[track_caller]
    pub fn ensure<P>(self, predicate: P, message: impl Into<LeafError>) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self.inner {
            Ok(value) => {
                if predicate(&value) {
                    Outcome::ok(value)
                } else {
                    Outcome::fail(ResultError::Leaf(message.into()))
                }
            }
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Like [`ensure`](Self::ensure), building the error from the value.
    #[track_caller]
    pub fn ensure_with<P, F, E>(self, predicate: P, make_error: F) -> Self
    where
        P: FnOnce(&T) -> bool,
        F: FnOnce(&T) -> E,
        E: Into<ResultError>,
    {
        match self.inner {
            Ok(value) => {
                if predicate(&value) {
                    Outcome::ok(value)
                } else {
                    Outcome::fail(make_error(&value))
                }
            }
            Err(error) => Outcome::propagate(error),
        }
    }

    /// Add context on top of a failure's error.
    ///
    /// The previous error becomes the only child of a composite whose
    /// parent is `context`. Successes pass through.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::<()>::fail("timeout").with_context("syncing inbox");
    /// assert_eq!(outcome.unwrap_error().to_safe_string(), "syncing inbox;timeout");
    /// ```
    #[track_caller]
    pub fn with_context(self, context: impl Into<LeafError>) -> Self {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let context = context.into();
                if context.is_empty() {
                    Outcome::propagate(error)
                } else {
                    Outcome::fail(error.enhance_with(context))
                }
            }
        }
    }

    /// Run a side effect on the success value.
    #[inline]
    pub fn tap<F>(self, f: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Ok(value) = &self.inner {
            f(value);
        }
        self
    }

    /// Run a side effect on the failure's error.
    #[inline]
    pub fn tap_error<F>(self, f: F) -> Self
    where
        F: FnOnce(&ResultError),
    {
        if let Err(error) = &self.inner {
            f(error);
        }
        self
    }

    /// Run one of two side effects depending on the state.
    #[inline]
    pub fn tap_both<S, E>(self, on_success: S, on_failure: E) -> Self
    where
        S: FnOnce(&T),
        E: FnOnce(&ResultError),
    {
        match &self.inner {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
        self
    }

    /// Eliminate the outcome, handling both states.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let text = Outcome::<u32>::fail("offline").fold(
    ///     |count| format!("{} new messages", count),
    ///     |error| format!("unavailable: {}", error),
    /// );
    /// assert_eq!(text, "unavailable: offline");
    /// ```
    #[inline]
    pub fn fold<R, S, E>(self, on_success: S, on_failure: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce(ResultError) -> R,
    {
        match self.inner {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }

    /// Eliminate the outcome without looking at the error.
    #[inline]
    pub fn fold_ignoring_error<R, S, E>(self, on_success: S, on_failure: E) -> R
    where
        S: FnOnce(T) -> R,
        E: FnOnce() -> R,
    {
        match self.inner {
            Ok(value) => on_success(value),
            Err(_) => on_failure(),
        }
    }
}
