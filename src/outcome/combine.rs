//! Aggregating many outcomes into one.
//!
//! Aggregation succeeds only if every input succeeds. Otherwise the result
//! is a failure whose error is a parent-less composite holding the error of
//! every failed input, in input order. Nothing short-circuits: all inputs
//! are inspected.

use super::Outcome;
use crate::error::ResultError;

impl<T> Outcome<T> {
    /// Combine a sequence of outcomes.
    ///
    /// ```
    /// use faultline::Outcome;
    ///
    /// let all = Outcome::combine(vec![Outcome::ok(1), Outcome::ok(2), Outcome::ok(3)]);
    /// assert_eq!(all, Outcome::ok(vec![1, 2, 3]));
    ///
    /// let some = Outcome::combine(vec![
    ///     Outcome::ok(1),
    ///     Outcome::fail("second is bad"),
    ///     Outcome::fail("third is bad"),
    /// ]);
    /// assert_eq!(some.unwrap_error().to_safe_string(), "second is bad;third is bad");
    /// ```
    pub fn combine<I>(outcomes: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        let mut values = Vec::new();
        let mut errors = Vec::new();

        for outcome in outcomes {
            match outcome.inner {
                Ok(value) => values.push(value),
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Outcome::ok(values)
        } else {
            Outcome::fail(ResultError::aggregate(errors))
        }
    }
}

impl<T> FromIterator<Outcome<T>> for Outcome<Vec<T>> {
    /// Collect with [`Outcome::combine`] semantics: every failure is kept.
    ///
    /// This differs from `Result`'s `FromIterator`, which stops at the
    /// first error.
    fn from_iter<I: IntoIterator<Item = Outcome<T>>>(iter: I) -> Self {
        Outcome::combine(iter)
    }
}

/// Combine a tuple of outcomes with different value types.
///
/// Implemented for tuples of 2 to 8 outcomes.
///
/// # Examples
///
/// ```
/// use faultline::{CombineAll, Outcome};
///
/// #[derive(Debug, PartialEq)]
/// struct Signup {
///     name: String,
///     age: u8,
/// }
///
/// let signup = (Outcome::ok("ada".to_string()), Outcome::ok(36_u8))
///     .combine_with(|(name, age)| Signup { name, age });
/// assert_eq!(signup, Outcome::ok(Signup { name: "ada".to_string(), age: 36 }));
/// ```
pub trait CombineAll: Sized {
    /// The tuple of success values.
    type Output;

    /// Succeed with all values, or fail with every error.
    fn combine_all(self) -> Outcome<Self::Output>;

    /// Like [`combine_all`](Self::combine_all), then apply `selector` to the values.
    fn combine_with<U, F>(self, selector: F) -> Outcome<U>
    where
        F: FnOnce(Self::Output) -> U,
    {
        self.combine_all().map(selector)
    }
}

macro_rules! impl_combine_all {
    ($($T:ident $value:ident),+) => {
        impl<$($T),+> CombineAll for ($(Outcome<$T>,)+) {
            type Output = ($($T,)+);

            fn combine_all(self) -> Outcome<Self::Output> {
                let ($($value,)+) = self;
                let mut errors = Vec::new();
                $(
                    let $value = match $value.inner {
                        Ok(value) => Some(value),
                        Err(error) => {
                            errors.push(error);
                            None
                        }
                    };
                )+

                if let ($(Some($value),)+) = ($($value,)+) {
                    return Outcome::ok(($($value,)+));
                }
                Outcome::fail(ResultError::aggregate(errors))
            }
        }
    };
}

impl_combine_all!(T1 a, T2 b);
impl_combine_all!(T1 a, T2 b, T3 c);
impl_combine_all!(T1 a, T2 b, T3 c, T4 d);
impl_combine_all!(T1 a, T2 b, T3 c, T4 d, T5 e);
impl_combine_all!(T1 a, T2 b, T3 c, T4 d, T5 e, T6 f);
impl_combine_all!(T1 a, T2 b, T3 c, T4 d, T5 e, T6 f, T7 g);
impl_combine_all!(T1 a, T2 b, T3 c, T4 d, T5 e, T6 f, T7 g, T8 h);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LeafError, Safety};

    fn leaf_count(error: &ResultError) -> usize {
        error.flatten().count()
    }

    #[test]
    fn test_combine_empty_is_success() {
        let outcomes: Vec<Outcome<i32>> = vec![];
        assert_eq!(Outcome::combine(outcomes), Outcome::ok(vec![]));
    }

    #[test]
    fn test_combine_single_failure_is_still_aggregate() {
        let error = Outcome::combine(vec![Outcome::ok(1), Outcome::<i32>::fail("only")])
            .unwrap_error();

        let composite = error.as_composite().unwrap();
        assert!(composite.parent().is_none());
        assert_eq!(composite.children(), &[ResultError::message("only")]);
    }

    #[test]
    fn test_combine_keeps_nested_errors_intact() {
        let nested = ResultError::composite(
            "ctx",
            vec![ResultError::message("a"), ResultError::message("b")],
        );
        let error = Outcome::combine(vec![
            Outcome::<()>::fail(nested.clone()),
            Outcome::success(),
            Outcome::fail("c"),
        ])
        .unwrap_error();

        assert_eq!(leaf_count(&error), leaf_count(&nested) + 1);
        assert_eq!(error.render(Safety::Safe, "|"), "ctx|a|b|c");
    }

    #[test]
    fn test_collect_uses_aggregate_semantics() {
        let collected: Outcome<Vec<i32>> = ["1", "x", "3", "y"]
            .iter()
            .map(|s| Outcome::from_result(s.parse::<i32>().map_err(|_| format!("bad: {}", s))))
            .collect();

        assert_eq!(collected.unwrap_error().to_safe_string(), "bad: x;bad: y");
    }

    #[test]
    fn test_combine_all_success() {
        let result = (Outcome::ok(1), Outcome::ok("two"), Outcome::ok(3.0)).combine_all();
        assert_eq!(result, Outcome::ok((1, "two", 3.0)));
    }

    #[test]
    fn test_combine_all_collects_every_failure_in_order() {
        let result = (
            Outcome::<i32>::fail("first"),
            Outcome::ok("fine"),
            Outcome::<bool>::fail("third"),
            Outcome::<u8>::fail("fourth"),
        )
            .combine_all();

        let error = result.unwrap_error();
        let leaves: Vec<&LeafError> = error.flatten().collect();
        assert_eq!(leaves.len(), 3);
        assert_eq!(error.to_safe_string(), "first;third;fourth");
    }

    #[test]
    fn test_combine_with_skips_selector_on_failure() {
        let mut called = false;
        let result = (Outcome::ok(1), Outcome::<i32>::fail("no"))
            .combine_with(|(a, b)| {
                called = true;
                a + b
            });

        assert!(!called);
        assert!(result.is_failure());
    }

    #[test]
    fn test_combine_all_eight() {
        let result = (
            Outcome::ok(1),
            Outcome::ok(2),
            Outcome::ok(3),
            Outcome::ok(4),
            Outcome::ok(5),
            Outcome::ok(6),
            Outcome::ok(7),
            Outcome::ok(8),
        )
            .combine_with(|(a, b, c, d, e, f, g, h)| a + b + c + d + e + f + g + h);
        assert_eq!(result, Outcome::ok(36));
    }
}
