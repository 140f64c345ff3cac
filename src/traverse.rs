//! Mapping a fallible function over a collection.
//!
//! Two contracts are on offer, and callers pick the one matching their need:
//!
//! - **Aggregate** ([`flat_map`], [`flat_map_parallel`]): every element is
//!   processed. The result succeeds with all values in input order, or fails
//!   with a parent-less composite holding every error in input order (the
//!   same semantics as [`Outcome::combine`]).
//! - **Short-circuit** ([`flat_map_until_failure`]): elements are processed
//!   left to right and the first failure is returned as is. Later elements
//!   are never touched.
//!
//! Async versions live in [`crate::future`].
//!
//! # Examples
//!
//! ```
//! use faultline::traverse::{flat_map, flat_map_until_failure};
//! use faultline::Outcome;
//!
//! fn parse_level(text: &str) -> Outcome<u8> {
//!     Outcome::from_result(text.parse::<u8>().map_err(|_| format!("bad level: {}", text)))
//! }
//!
//! let all = flat_map(vec!["1", "x", "3", "y"], parse_level);
//! assert_eq!(all.unwrap_error().to_safe_string(), "bad level: x;bad level: y");
//!
//! let first = flat_map_until_failure(vec!["1", "x", "3", "y"], parse_level);
//! assert_eq!(first.unwrap_error().to_safe_string(), "bad level: x");
//! ```

use crate::Outcome;

/// Apply `f` to every element and combine the outcomes.
///
/// # Examples
///
/// ```
/// use faultline::traverse::flat_map;
/// use faultline::Outcome;
///
/// let doubled = flat_map(1..=3, |x| Outcome::ok(x * 2));
/// assert_eq!(doubled, Outcome::ok(vec![2, 4, 6]));
/// ```
pub fn flat_map<T, U, F, I>(items: I, f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Outcome<U>,
{
    Outcome::combine(items.into_iter().map(f))
}

/// Apply `f` left to right, stopping at the first failure.
///
/// # Examples
///
/// ```
/// use faultline::traverse::flat_map_until_failure;
/// use faultline::Outcome;
///
/// let mut visited = Vec::new();
/// let result = flat_map_until_failure(vec![1, 2, 3], |x| {
///     visited.push(x);
///     if x == 2 { Outcome::fail("stop") } else { Outcome::ok(x) }
/// });
///
/// assert!(result.is_failure());
/// assert_eq!(visited, vec![1, 2]);
/// ```
pub fn flat_map_until_failure<T, U, F, I>(items: I, mut f: F) -> Outcome<Vec<U>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> Outcome<U>,
{
    let items = items.into_iter();
    let mut values = Vec::with_capacity(items.size_hint().0);

    for item in items {
        match f(item).into_result() {
            Ok(value) => values.push(value),
            Err(error) => return Outcome::propagate(error),
        }
    }

    Outcome::ok(values)
}

/// Apply `f` on a pool of at most `max_parallelism` worker threads, then
/// combine.
///
/// Values and errors keep input order whatever the parallelism. With
/// `max_parallelism <= 1` everything runs on the caller's thread.
///
/// Fails with an exception leaf under `"building worker pool"` if the
/// thread pool cannot be created.
///
/// # Examples
///
/// ```
/// use faultline::traverse::flat_map_parallel;
/// use faultline::Outcome;
///
/// let squares = flat_map_parallel((1..=100).collect(), 4, |x: u64| Outcome::ok(x * x));
/// assert_eq!(squares.unwrap()[9], 100);
/// ```
#[cfg(feature = "parallel")]
pub fn flat_map_parallel<T, U, F>(items: Vec<T>, max_parallelism: usize, f: F) -> Outcome<Vec<U>>
where
    T: Send,
    U: Send,
    F: Fn(T) -> Outcome<U> + Sync,
{
    use crate::context::ResultExt;
    use rayon::prelude::*;

    if max_parallelism <= 1 {
        return flat_map(items, f);
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(max_parallelism)
        .build()
        .context("building worker pool")
        .and_then(|pool| {
            let outcomes: Vec<Outcome<U>> =
                pool.install(|| items.into_par_iter().map(&f).collect());
            Outcome::combine(outcomes)
        })
}
