//! Async adapters.
//!
//! [`OutcomeFutureExt`] gives every `Future<Output = Outcome<T>>` the
//! outcome combinators, with async callbacks where that makes sense. The
//! branching is the same as the synchronous version; the only suspension
//! points are awaiting the source future and awaiting the callback.
//! Nothing here spawns tasks, so the adapters work on any executor.
//!
//! The sequence adapters [`flat_map_async`], [`flat_map_concurrent`] and
//! [`flat_map_until_failure_async`] mirror [`crate::traverse`].
//!
//! # Examples
//!
//! ```
//! use faultline::future::OutcomeFutureExt;
//! use faultline::Outcome;
//!
//! async fn fetch_balance(account: &str) -> Outcome<i64> {
//!     if account == "main" {
//!         Outcome::ok(120)
//!     } else {
//!         Outcome::fail(format!("unknown account {}", account))
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! let doubled = fetch_balance("main").map_async(|b| b * 2).await;
//! assert_eq!(doubled, Outcome::ok(240));
//!
//! let recovered = fetch_balance("savings")
//!     .with_context_async("loading dashboard")
//!     .compensate_async(|_| async { Outcome::ok(0) })
//!     .await;
//! assert_eq!(recovered, Outcome::ok(0));
//! # });
//! ```

mod traverse;

pub use traverse::{flat_map_async, flat_map_concurrent, flat_map_until_failure_async};

use std::error::Error as StdError;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::error::{ErrorKind, LeafError, LeafKind, ResultError};
use crate::outcome::panicked;
use crate::Outcome;

/// Outcome combinators for futures resolving to an [`Outcome`].
///
/// Implemented for every such future; you never implement it yourself.
pub trait OutcomeFutureExt<T>: Future<Output = Outcome<T>> + Sized {
    /// Transform the success value once the future resolves.
    fn map_async<U, F>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> U,
    {
        async move { self.await.map(f) }
    }

    /// Chain an async dependent step.
    ///
    /// On failure `f` is never called and its future never created.
    ///
    /// ```
    /// use faultline::future::OutcomeFutureExt;
    /// use faultline::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let total = async { Outcome::ok(2) }
    ///     .and_then_async(|x| async move { Outcome::ok(x + 40) })
    ///     .await;
    /// assert_eq!(total, Outcome::ok(42));
    /// # });
    /// ```
    fn and_then_async<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => f(value).await,
                Err(error) => Outcome::propagate(error),
            }
        }
    }

    /// Run an async validation on the value, keeping the value if it passes.
    ///
    /// ```
    /// use faultline::future::OutcomeFutureExt;
    /// use faultline::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let port = async { Outcome::ok(8080_u16) }
    ///     .check_async(|port| {
    ///         let privileged = *port < 1024;
    ///         async move {
    ///             if privileged { Outcome::fail("privileged port") } else { Outcome::success() }
    ///         }
    ///     })
    ///     .await;
    /// assert_eq!(port, Outcome::ok(8080));
    /// # });
    /// ```
    fn check_async<F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = Outcome<()>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => match f(&value).await.into_result() {
                    Ok(()) => Outcome::ok(value),
                    Err(error) => Outcome::propagate(error),
                },
                Err(error) => Outcome::propagate(error),
            }
        }
    }

    /// Replace a failure with the outcome of an async recovery.
    fn compensate_async<F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(ResultError) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => Outcome::ok(value),
                Err(error) => f(error).await,
            }
        }
    }

    /// Recover asynchronously when the top-level error is of kind `K`.
    fn compensate_when_async<K, F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        K: ErrorKind,
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => Outcome::ok(value),
                Err(error) => match K::select(&error).map(f) {
                    Some(recovery) => recovery.await,
                    None => Outcome::propagate(error),
                },
            }
        }
    }

    /// Recover asynchronously when any leaf of the error is of kind `K`.
    fn compensate_when_any_async<K, F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        K: LeafKind,
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => Outcome::ok(value),
                Err(error) => {
                    let recovery = error.flatten().find_map(K::select_leaf).map(f);
                    match recovery {
                        Some(recovery) => recovery.await,
                        None => Outcome::propagate(error),
                    }
                }
            }
        }
    }

    /// Like [`compensate_when_async`](Self::compensate_when_async), only when
    /// `predicate` accepts the typed error.
    fn compensate_when_matching_async<K, P, F, Fut>(
        self,
        predicate: P,
        f: F,
    ) -> impl Future<Output = Outcome<T>>
    where
        K: ErrorKind,
        P: FnOnce(&K) -> bool,
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => Outcome::ok(value),
                Err(error) => {
                    let recovery = K::select(&error).filter(|kind| predicate(kind)).map(f);
                    match recovery {
                        Some(recovery) => recovery.await,
                        None => Outcome::propagate(error),
                    }
                }
            }
        }
    }

    /// Recover asynchronously using the first leaf of kind `K` that
    /// `predicate` accepts.
    fn compensate_when_any_matching_async<K, P, F, Fut>(
        self,
        mut predicate: P,
        f: F,
    ) -> impl Future<Output = Outcome<T>>
    where
        K: LeafKind,
        P: FnMut(&K) -> bool,
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = Outcome<T>>,
    {
        async move {
            match self.await.into_result() {
                Ok(value) => Outcome::ok(value),
                Err(error) => {
                    let recovery = error
                        .flatten()
                        .filter_map(K::select_leaf)
                        .find(|kind| predicate(kind))
                        .map(f);
                    match recovery {
                        Some(recovery) => recovery.await,
                        None => Outcome::propagate(error),
                    }
                }
            }
        }
    }

    /// Fail with `message` unless the async `predicate` holds.
    ///
    /// # Panics
    ///
    /// Panics if the predicate fails and `message` is empty.
    fn ensure_async<P, Fut>(
        self,
        predicate: P,
        message: impl Into<LeafError>,
    ) -> impl Future<Output = Outcome<T>>
    where
        P: FnOnce(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        let message = message.into();
        async move {
            match self.await.into_result() {
                Ok(value) => {
                    if predicate(&value).await {
                        Outcome::ok(value)
                    } else {
                        Outcome::fail(ResultError::Leaf(message))
                    }
                }
                Err(error) => Outcome::propagate(error),
            }
        }
    }

    /// Run an async side effect on the success value.
    fn tap_async<F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = ()>,
    {
        async move {
            let outcome = self.await;
            if let Some(value) = outcome.value() {
                f(value).await;
            }
            outcome
        }
    }

    /// Run an async side effect on the failure's error.
    fn tap_error_async<F, Fut>(self, f: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&ResultError) -> Fut,
        Fut: Future<Output = ()>,
    {
        async move {
            let outcome = self.await;
            if let Some(error) = outcome.error() {
                f(error).await;
            }
            outcome
        }
    }

    /// Run one of two async side effects depending on the state.
    fn tap_both_async<S, SFut, E, EFut>(
        self,
        on_success: S,
        on_failure: E,
    ) -> impl Future<Output = Outcome<T>>
    where
        S: FnOnce(&T) -> SFut,
        SFut: Future<Output = ()>,
        E: FnOnce(&ResultError) -> EFut,
        EFut: Future<Output = ()>,
    {
        async move {
            let outcome = self.await;
            match (outcome.value(), outcome.error()) {
                (Some(value), _) => on_success(value).await,
                (None, Some(error)) => on_failure(error).await,
                (None, None) => {}
            }
            outcome
        }
    }

    /// Add context on top of a failure's error.
    fn with_context_async(self, context: impl Into<LeafError>) -> impl Future<Output = Outcome<T>> {
        let context = context.into();
        async move { self.await.with_context(context) }
    }

    /// Eliminate the outcome once the future resolves.
    fn fold_async<R, S, E>(self, on_success: S, on_failure: E) -> impl Future<Output = R>
    where
        S: FnOnce(T) -> R,
        E: FnOnce(ResultError) -> R,
    {
        async move { self.await.fold(on_success, on_failure) }
    }

    /// Drop the success value.
    fn discard_value_async(self) -> impl Future<Output = Outcome<()>> {
        async move { self.await.discard_value() }
    }

    /// Always succeed, whatever the future resolves to.
    ///
    /// A panic raised while polling the future is swallowed too.
    ///
    /// ```
    /// use faultline::future::OutcomeFutureExt;
    /// use faultline::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let outcome = async { Outcome::<u8>::fail("flaky") }.ignore_failure_async().await;
    /// assert_eq!(outcome, Outcome::success());
    /// # });
    /// ```
    fn ignore_failure_async(self) -> impl Future<Output = Outcome<()>> {
        async move {
            let _ = AssertUnwindSafe(self).catch_unwind().await;
            Outcome::success()
        }
    }
}

impl<T, Fut> OutcomeFutureExt<T> for Fut where Fut: Future<Output = Outcome<T>> {}

/// Await a fallible future, capturing its error or panic under `context`.
///
/// The async counterpart of [`Outcome::attempt`].
///
/// ```
/// use faultline::future::attempt_async;
/// use std::io;
///
/// # tokio_test::block_on(async {
/// let outcome = attempt_async("reading socket", async {
///     Err::<Vec<u8>, _>(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"))
/// })
/// .await;
/// assert_eq!(outcome.unwrap_error().to_safe_string(), "reading socket;reset by peer");
/// # });
/// ```
pub async fn attempt_async<T, E, Fut>(context: impl Into<LeafError>, fut: Fut) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: StdError + Send + Sync + 'static,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Outcome::ok(value),
        Ok(Err(error)) => Outcome::fail(ResultError::exception(error).enhance_with(context)),
        Err(payload) => Outcome::fail(panicked(payload, context)),
    }
}

/// Await a future resolving to an outcome, capturing panics.
///
/// A failure it resolves to is enhanced with `context`.
pub async fn attempt_outcome_async<T, Fut>(context: impl Into<LeafError>, fut: Fut) -> Outcome<T>
where
    Fut: Future<Output = Outcome<T>>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(outcome) => outcome.with_context(context),
        Err(payload) => Outcome::fail(panicked(payload, context)),
    }
}
