//! Testing utilities for code built on `Outcome`.
//!
//! This module provides assertion macros and, with the `proptest` feature,
//! `Arbitrary` implementations for [`ResultError`](crate::error::ResultError)
//! and [`Outcome`](crate::Outcome) so property tests can generate error
//! trees of any shape.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use faultline::{assert_failure, assert_failure_message, assert_success, Outcome};
//!
//! let value = assert_success!(Outcome::ok(42));
//! assert_eq!(value, 42);
//!
//! let error = assert_failure!(Outcome::<i32>::fail("boom"));
//! assert_eq!(error.to_safe_string(), "boom");
//!
//! assert_failure_message!(Outcome::<()>::fail("bad input").with_context("parsing"), "parsing;bad input");
//! ```

/// Assert that an outcome succeeds, evaluating to its value.
///
/// Panics with the unsafe rendering of the error on failure.
///
/// # Example
///
/// ```rust
/// use faultline::{assert_success, Outcome};
///
/// let value = assert_success!(Outcome::ok("ready"));
/// assert_eq!(value, "ready");
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $crate::Outcome::into_result($outcome) {
            Ok(value) => value,
            Err(error) => {
                panic!("Expected Success, got Failure: {:#}", error);
            }
        }
    };
}

/// Assert that an outcome fails, evaluating to its error.
///
/// # Example
///
/// ```rust
/// use faultline::{assert_failure, Outcome};
///
/// let error = assert_failure!(Outcome::<u8>::fail("overflow"));
/// assert!(error.is_leaf());
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $crate::Outcome::into_result($outcome) {
            Err(error) => error,
            Ok(value) => {
                panic!("Expected Failure, got Success: {:?}", value);
            }
        }
    };
}

/// Assert that an outcome fails with the given safe rendering.
///
/// The rendering uses the default `";"` separator.
///
/// # Example
///
/// ```rust
/// use faultline::{assert_failure_message, CombineAll, Outcome};
///
/// let outcome = (Outcome::<u8>::fail("M2"), Outcome::<u8>::fail("M3")).combine_all();
/// assert_failure_message!(outcome, "M2;M3");
/// ```
#[macro_export]
macro_rules! assert_failure_message {
    ($outcome:expr, $expected:expr) => {
        match $crate::Outcome::into_result($outcome) {
            Err(error) => {
                assert_eq!(error.to_safe_string(), $expected);
            }
            Ok(value) => {
                panic!(
                    "Expected Failure with message {:?}, got Success: {:?}",
                    $expected, value
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
mod arbitrary {
    use std::io;

    use proptest::collection::vec;
    use proptest::option;
    use proptest::prelude::*;

    use crate::error::ResultError;
    use crate::Outcome;

    fn leaf() -> impl Strategy<Value = ResultError> {
        let text = "[a-z]{1,8}";
        prop_oneof![
            3 => text.prop_map(|message| ResultError::message(message)),
            1 => (text, text).prop_map(|(key, source)| ResultError::key_not_found(key, source)),
            1 => text.prop_map(|message| ResultError::exception(io::Error::other(message))),
        ]
    }

    impl Arbitrary for ResultError {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        /// Non-empty trees up to four levels deep.
        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            leaf()
                .prop_recursive(4, 32, 4, |inner| {
                    (option::of("[a-z]{1,8}"), vec(inner, 1..4)).prop_map(|(parent, children)| {
                        match parent {
                            Some(parent) => ResultError::composite(parent, children),
                            None => ResultError::aggregate(children),
                        }
                    })
                })
                .boxed()
        }
    }

    impl<T> Arbitrary for Outcome<T>
    where
        T: Arbitrary + 'static,
    {
        type Parameters = T::Parameters;
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                any_with::<T>(args).prop_map(Outcome::ok),
                any::<ResultError>().prop_map(|error| Outcome::fail(error)),
            ]
            .boxed()
        }
    }
}
