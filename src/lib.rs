//! # Faultline
//!
//! Composable outcomes with structured error trees.
//!
//! An [`Outcome<T>`] is either a success holding a `T` or a failure holding a
//! [`ResultError`]: a tree of leaf errors (messages, wrapped native errors,
//! missing keys) and composites. Combinators chain steps with
//! short-circuiting, aggregate independent checks without losing any cause,
//! recover from failures of a chosen kind, and render the result safely for
//! end users or fully for diagnostics.
//!
//! ## Quick Example
//!
//! ```rust
//! use faultline::{CombineAll, Outcome};
//!
//! fn name(input: &str) -> Outcome<String> {
//!     Outcome::ok(input.trim().to_string()).ensure(|n| !n.is_empty(), "name is required")
//! }
//!
//! fn age(input: &str) -> Outcome<u8> {
//!     Outcome::from_result(input.parse::<u8>().map_err(|_| "age must be a number"))
//!         .ensure(|a| *a >= 18, "must be 18 or older")
//! }
//!
//! // Every independent check runs; every failure is kept.
//! let result = (name("ada"), age("16")).combine_with(|(name, age)| format!("{} ({})", name, age));
//! assert_eq!(result.unwrap_error().to_safe_string(), "must be 18 or older");
//!
//! let result = (name("  "), age("x")).combine_all();
//! assert_eq!(
//!     result.unwrap_error().to_safe_string(),
//!     "name is required;age must be a number"
//! );
//! ```
//!
//! ## Features
//!
//! - `serde`: serialize [`ResultErrorStructure`](error::ResultErrorStructure).
//! - `tracing`: [`hook::trace_failures`] forwards failures to `tracing`.
//! - `parallel`: [`traverse::flat_map_parallel`] on a `rayon` pool.
//! - `proptest`: `Arbitrary` for [`ResultError`] and [`Outcome`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod context;
pub mod error;
pub mod future;
pub mod hook;
pub mod lookup;
pub mod option;
pub mod outcome;
pub mod testing;
pub mod traverse;

// Re-exports
pub use context::ResultExt;
pub use error::ResultError;
pub use future::OutcomeFutureExt;
pub use lookup::KeyLookup;
pub use option::OptionExt;
pub use outcome::{CombineAll, Outcome};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::ResultExt;
    pub use crate::error::{
        ErrorComposite, ErrorException, ErrorKeyNotFound, ErrorMessage, LeafError, ResultError,
        Safety,
    };
    pub use crate::future::OutcomeFutureExt;
    pub use crate::lookup::KeyLookup;
    pub use crate::option::OptionExt;
    pub use crate::outcome::{CombineAll, Outcome};
}
