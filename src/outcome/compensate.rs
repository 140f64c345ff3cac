//! Failure recovery.
//!
//! `compensate` recovers from any failure. The `compensate_when*` family
//! only recovers when the error is of a chosen kind, passing every other
//! failure through untouched:
//!
//! | method | looks at |
//! |---|---|
//! | [`compensate_when`](Outcome::compensate_when) | the top-level error only |
//! | [`compensate_when_any`](Outcome::compensate_when_any) | every leaf of the tree, first match in flatten order |
//! | [`compensate_when_exception`](Outcome::compensate_when_exception) | every wrapped native error of type `E` |

use std::error::Error as StdError;

use super::Outcome;
use crate::error::{ErrorKind, LeafError, LeafKind, ResultError};

impl<T> Outcome<T> {
    /// Replace a failure with the outcome of `f`.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::<u32>::fail("cache miss").compensate(|_| Outcome::ok(0));
    /// assert_eq!(outcome, Outcome::ok(0));
    /// ```
    #[inline]
    pub fn compensate<F>(self, f: F) -> Self
    where
        F: FnOnce(ResultError) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => f(error),
        }
    }

    /// Recover only when the top-level error is of kind `K`.
    ///
    /// `f` is called at most once, with the typed error. Any other failure
    /// is returned unchanged.
    ///
    /// ```
    /// use faultline::error::ErrorKeyNotFound;
    /// use faultline::Outcome;
    ///
    /// let outcome = Outcome::<&str>::fail(ErrorKeyNotFound::create("theme", "prefs"))
    ///     .compensate_when(|_: &ErrorKeyNotFound| Outcome::ok("light"));
    /// assert_eq!(outcome, Outcome::ok("light"));
    /// ```
    pub fn compensate_when<K, F>(self, f: F) -> Self
    where
        K: ErrorKind,
        F: FnOnce(&K) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let recovered = K::select(&error).map(f);
                recovered.unwrap_or_else(|| Outcome::propagate(error))
            }
        }
    }

    /// Recover only when the top-level error is of kind `K` and `predicate`
    /// accepts it.
    pub fn compensate_when_matching<K, P, F>(self, predicate: P, f: F) -> Self
    where
        K: ErrorKind,
        P: FnOnce(&K) -> bool,
        F: FnOnce(&K) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let recovered = K::select(&error).filter(|kind| predicate(kind)).map(f);
                recovered.unwrap_or_else(|| Outcome::propagate(error))
            }
        }
    }

    /// Recover when any leaf of the error tree is of kind `K`.
    ///
    /// The tree is searched depth-first (see
    /// [`ResultError::flatten`]); `f` receives the first matching leaf.
    ///
    /// ```
    /// use faultline::error::{ErrorKeyNotFound, ResultError};
    /// use faultline::Outcome;
    ///
    /// let error = ResultError::aggregate(vec![
    ///     ResultError::message("unrelated"),
    ///     ResultError::key_not_found("id", "index").enhance_with("resolving user"),
    /// ]);
    ///
    /// let outcome = Outcome::<String>::fail(error)
    ///     .compensate_when_any(|missing: &ErrorKeyNotFound| Outcome::ok(missing.key().to_string()));
    /// assert_eq!(outcome, Outcome::ok("id".to_string()));
    /// ```
    pub fn compensate_when_any<K, F>(self, f: F) -> Self
    where
        K: LeafKind,
        F: FnOnce(&K) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let recovered = error.flatten().find_map(K::select_leaf).map(f);
                recovered.unwrap_or_else(|| Outcome::propagate(error))
            }
        }
    }

    /// Recover using the first leaf of kind `K` that `predicate` accepts.
    pub fn compensate_when_any_matching<K, P, F>(self, mut predicate: P, f: F) -> Self
    where
        K: LeafKind,
        P: FnMut(&K) -> bool,
        F: FnOnce(&K) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let recovered = error
                    .flatten()
                    .filter_map(K::select_leaf)
                    .find(|kind| predicate(kind))
                    .map(f);
                recovered.unwrap_or_else(|| Outcome::propagate(error))
            }
        }
    }

    /// Recover when the tree holds a wrapped native error of type `E`.
    ///
    /// ```
    /// use faultline::{Outcome, ResultExt};
    /// use std::io;
    ///
    /// let outcome = Err::<u64, _>(io::Error::new(io::ErrorKind::NotFound, "no file"))
    ///     .context("reading counter")
    ///     .compensate_when_exception(|e: &io::Error| match e.kind() {
    ///         io::ErrorKind::NotFound => Outcome::ok(0),
    ///         _ => Outcome::fail(e.to_string()),
    ///     });
    /// assert_eq!(outcome, Outcome::ok(0));
    /// ```
    pub fn compensate_when_exception<E, F>(self, f: F) -> Self
    where
        E: StdError + 'static,
        F: FnOnce(&E) -> Outcome<T>,
    {
        match self.inner {
            Ok(value) => Outcome::ok(value),
            Err(error) => {
                let recovered = error
                    .flatten()
                    .find_map(|leaf| match leaf {
                        LeafError::Exception(exception) => exception.downcast_ref::<E>(),
                        _ => None,
                    })
                    .map(f);
                recovered.unwrap_or_else(|| Outcome::propagate(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorComposite, ErrorException, ErrorKeyNotFound, ErrorMessage};
    use std::cell::Cell;
    use std::io;

    #[test]
    fn test_compensate_replaces_failure_only() {
        assert_eq!(
            Outcome::<i32>::fail("x").compensate(|_| Outcome::ok(1)),
            Outcome::ok(1)
        );
        assert_eq!(
            Outcome::ok(5).compensate(|_| Outcome::ok(1)),
            Outcome::ok(5)
        );
        assert_eq!(
            Outcome::<i32>::fail("x").compensate(|e| Outcome::fail(e.enhance_with("retry failed"))),
            Outcome::fail(ResultError::message("x").enhance_with("retry failed"))
        );
    }

    #[test]
    fn test_compensate_when_other_kind_passes_through() {
        let calls = Cell::new(0);
        let original = ResultError::message("plain message");
        let outcome = Outcome::<i32>::fail(original.clone()).compensate_when(|_: &ErrorKeyNotFound| {
            calls.set(calls.get() + 1);
            Outcome::ok(0)
        });

        assert_eq!(calls.get(), 0);
        assert_eq!(outcome.unwrap_error(), original);
    }

    #[test]
    fn test_compensate_when_matching_kind_called_once() {
        let calls = Cell::new(0);
        let outcome = Outcome::<String>::fail("plain message").compensate_when(|m: &ErrorMessage| {
            calls.set(calls.get() + 1);
            Outcome::ok(m.message().to_uppercase())
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(outcome, Outcome::ok("PLAIN MESSAGE".to_string()));
    }

    #[test]
    fn test_compensate_when_does_not_look_inside_composites() {
        let error = ResultError::aggregate(vec![ResultError::message("inner")]);
        let outcome =
            Outcome::<i32>::fail(error.clone()).compensate_when(|_: &ErrorMessage| Outcome::ok(1));
        assert_eq!(outcome.unwrap_error(), error);
    }

    #[test]
    fn test_compensate_when_composite_kind() {
        let error = ResultError::aggregate(vec![
            ResultError::message("a"),
            ResultError::message("b"),
        ]);
        let outcome = Outcome::<usize>::fail(error)
            .compensate_when(|c: &ErrorComposite| Outcome::ok(c.children().len()));
        assert_eq!(outcome, Outcome::ok(2));
    }

    #[test]
    fn test_compensate_when_matching_predicate() {
        let recover = |outcome: Outcome<i32>| {
            outcome.compensate_when_matching(
                |m: &ErrorMessage| m.message().starts_with("retryable"),
                |_| Outcome::ok(0),
            )
        };

        assert_eq!(recover(Outcome::fail("retryable: busy")), Outcome::ok(0));
        assert_eq!(recover(Outcome::fail("fatal")), Outcome::fail("fatal"));
    }

    #[test]
    fn test_compensate_when_any_finds_deep_leaf() {
        let error = ResultError::aggregate(vec![
            ResultError::message("sibling 1"),
            ResultError::composite(
                "level 1",
                vec![
                    ResultError::message("sibling 2"),
                    ResultError::composite(
                        "level 2",
                        vec![ResultError::composite(
                            "level 3",
                            vec![ResultError::key_not_found("deep", "vault")],
                        )],
                    ),
                ],
            ),
            ResultError::message("sibling 3"),
        ]);

        let calls = Cell::new(0);
        let outcome = Outcome::<String>::fail(error).compensate_when_any(|k: &ErrorKeyNotFound| {
            calls.set(calls.get() + 1);
            Outcome::ok(k.key().to_string())
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(outcome, Outcome::ok("deep".to_string()));
    }

    #[test]
    fn test_compensate_when_any_uses_first_match() {
        let error = ResultError::aggregate(vec![
            ResultError::key_not_found("first", "a"),
            ResultError::key_not_found("second", "b"),
        ]);
        let outcome = Outcome::<String>::fail(error)
            .compensate_when_any(|k: &ErrorKeyNotFound| Outcome::ok(k.key().to_string()));
        assert_eq!(outcome, Outcome::ok("first".to_string()));
    }

    #[test]
    fn test_compensate_when_any_on_leaf_and_no_match() {
        let outcome = Outcome::<i32>::fail("just a leaf")
            .compensate_when_any(|_: &ErrorMessage| Outcome::ok(7));
        assert_eq!(outcome, Outcome::ok(7));

        let error = ResultError::aggregate(vec![ResultError::message("m")]);
        let outcome = Outcome::<i32>::fail(error.clone())
            .compensate_when_any(|_: &ErrorException| Outcome::ok(7));
        assert_eq!(outcome.unwrap_error(), error);
    }

    #[test]
    fn test_compensate_when_any_matching_skips_rejected() {
        let error = ResultError::aggregate(vec![
            ResultError::message("ignore me"),
            ResultError::message("take me"),
        ]);
        let outcome = Outcome::<String>::fail(error).compensate_when_any_matching(
            |m: &ErrorMessage| m.message().starts_with("take"),
            |m| Outcome::ok(m.message().to_string()),
        );
        assert_eq!(outcome, Outcome::ok("take me".to_string()));
    }

    #[test]
    fn test_compensate_when_exception_downcasts() {
        let error = ResultError::aggregate(vec![
            ResultError::exception(std::fmt::Error),
            ResultError::exception(io::Error::new(io::ErrorKind::TimedOut, "slow")),
        ]);

        let outcome = Outcome::<&str>::fail(error.clone())
            .compensate_when_exception(|e: &io::Error| {
                assert_eq!(e.kind(), io::ErrorKind::TimedOut);
                Outcome::ok("fallback")
            });
        assert_eq!(outcome, Outcome::ok("fallback"));

        let untouched = Outcome::<&str>::fail(ResultError::message("no exceptions"))
            .compensate_when_exception(|_: &io::Error| Outcome::ok("fallback"));
        assert_eq!(untouched, Outcome::fail("no exceptions"));
    }

    #[test]
    fn test_successes_pass_every_compensator() {
        assert_eq!(
            Outcome::ok(1).compensate_when(|_: &ErrorMessage| Outcome::ok(2)),
            Outcome::ok(1)
        );
        assert_eq!(
            Outcome::ok(1).compensate_when_any(|_: &ErrorMessage| Outcome::ok(2)),
            Outcome::ok(1)
        );
        assert_eq!(
            Outcome::ok(1).compensate_when_exception(|_: &io::Error| Outcome::ok(2)),
            Outcome::ok(1)
        );
    }
}
