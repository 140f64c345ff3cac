//! Async sequence adapters.

use std::future::Future;

use futures::future::join_all;
use futures::stream::{self, StreamExt};

use crate::Outcome;

/// Drive `f` for every element concurrently, then combine.
///
/// All futures are created up front and polled together on the current
/// task. Values and errors keep input order.
///
/// # Examples
///
/// ```
/// use faultline::future::flat_map_async;
/// use faultline::Outcome;
///
/// # tokio_test::block_on(async {
/// let lengths = flat_map_async(vec!["a", "bb", "ccc"], |s| async move { Outcome::ok(s.len()) }).await;
/// assert_eq!(lengths, Outcome::ok(vec![1, 2, 3]));
/// # });
/// ```
pub async fn flat_map_async<T, U, F, Fut, I>(items: I, f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Outcome<U>>,
{
    let outcomes = join_all(items.into_iter().map(f)).await;
    Outcome::combine(outcomes)
}

/// Like [`flat_map_async`] with at most `limit` futures in flight.
///
/// A `limit` of zero is treated as one. Values and errors keep input order
/// even though completion order may differ.
///
/// # Examples
///
/// ```
/// use faultline::future::flat_map_concurrent;
/// use faultline::Outcome;
///
/// # tokio_test::block_on(async {
/// let result = flat_map_concurrent(1..=6, 2, |id| async move {
///     if id % 3 == 0 {
///         Outcome::fail(format!("job {} failed", id))
///     } else {
///         Outcome::ok(id)
///     }
/// })
/// .await;
///
/// assert_eq!(result.unwrap_error().to_safe_string(), "job 3 failed;job 6 failed");
/// # });
/// ```
pub async fn flat_map_concurrent<T, U, F, Fut, I>(items: I, limit: usize, f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Outcome<U>>,
{
    let outcomes: Vec<Outcome<U>> = stream::iter(items)
        .map(f)
        .buffered(limit.max(1))
        .collect()
        .await;
    Outcome::combine(outcomes)
}

/// Await `f` for each element in turn, stopping at the first failure.
///
/// The next future is only created once the previous one succeeded.
pub async fn flat_map_until_failure_async<T, U, F, Fut, I>(items: I, mut f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Outcome<U>>,
{
    let items = items.into_iter();
    let mut values = Vec::with_capacity(items.size_hint().0);

    for item in items {
        match f(item).await.into_result() {
            Ok(value) => values.push(value),
            Err(error) => return Outcome::propagate(error),
        }
    }

    Outcome::ok(values)
}
