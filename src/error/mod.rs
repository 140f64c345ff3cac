//! The error model: a tree of leaf and composite error nodes.
//!
//! A failed [`Outcome`](crate::Outcome) carries exactly one [`ResultError`].
//! That error is either a [`LeafError`] (a message, a wrapped native error, a
//! missing key) or an [`ErrorComposite`] holding an optional leaf parent and
//! any number of children. Aggregation and added context both build
//! composites, so no cause is ever lost to string concatenation.
//!
//! # Examples
//!
//! ```
//! use faultline::error::{LeafError, ResultError};
//!
//! let error = ResultError::aggregate(vec![
//!     ResultError::message("name is required"),
//!     ResultError::key_not_found("country", "lookup table"),
//! ])
//! .enhance_with("validating signup form");
//!
//! let leaves: Vec<&LeafError> = error.flatten().collect();
//! assert_eq!(leaves.len(), 3);
//! assert_eq!(
//!     error.to_safe_string(),
//!     "validating signup form;name is required;Unable to find key 'country' in source 'lookup table'"
//! );
//! ```

mod composite;
mod kind;
mod leaf;
mod render;

use std::error::Error as StdError;
use std::fmt;

pub use composite::{ErrorComposite, Leaves};
pub use kind::{ErrorKind, LeafKind};
pub use leaf::{ErrorException, ErrorKeyNotFound, ErrorMessage, LeafError, PanicError};
pub use render::{ResultErrorStructure, Safety, DEFAULT_SEPARATOR};

/// Any node of an error tree.
///
/// The set of node kinds is closed, so recovery by kind
/// ([`Outcome::compensate_when`](crate::Outcome::compensate_when)) is a
/// static match rather than a runtime type test.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultError {
    /// A single leaf.
    Leaf(LeafError),
    /// A parent leaf with child errors.
    Composite(ErrorComposite),
}

impl ResultError {
    /// The empty marker. Never valid as a failure's error.
    pub fn empty() -> Self {
        ResultError::Leaf(LeafError::Empty)
    }

    /// A message leaf. Empty text gives the empty marker.
    pub fn message(message: impl Into<String>) -> Self {
        ResultError::Leaf(ErrorMessage::create(message))
    }

    /// A leaf wrapping a native error.
    pub fn exception<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ResultError::Leaf(LeafError::Exception(ErrorException::new(error)))
    }

    /// A key-not-found leaf.
    pub fn key_not_found(key: impl fmt::Display, source_description: impl Into<String>) -> Self {
        ResultError::Leaf(LeafError::KeyNotFound(ErrorKeyNotFound::create(
            key,
            source_description,
        )))
    }

    /// A composite with a parent leaf.
    pub fn composite<P, I>(parent: P, children: I) -> Self
    where
        P: Into<LeafError>,
        I: IntoIterator<Item = ResultError>,
    {
        ResultError::Composite(ErrorComposite::new(parent, children))
    }

    /// A parent-less composite aggregating sibling errors.
    pub fn aggregate<I>(children: I) -> Self
    where
        I: IntoIterator<Item = ResultError>,
    {
        ResultError::Composite(ErrorComposite::from_children(children))
    }

    /// True for the empty marker and for composites with nothing in them.
    pub fn is_empty(&self) -> bool {
        match self {
            ResultError::Leaf(leaf) => leaf.is_empty(),
            ResultError::Composite(composite) => composite.is_empty(),
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ResultError::Leaf(_))
    }

    /// True for composite nodes.
    pub fn is_composite(&self) -> bool {
        matches!(self, ResultError::Composite(_))
    }

    /// Borrow as a leaf.
    pub fn as_leaf(&self) -> Option<&LeafError> {
        match self {
            ResultError::Leaf(leaf) => Some(leaf),
            ResultError::Composite(_) => None,
        }
    }

    /// Borrow as a composite.
    pub fn as_composite(&self) -> Option<&ErrorComposite> {
        match self {
            ResultError::Composite(composite) => Some(composite),
            ResultError::Leaf(_) => None,
        }
    }

    /// Iterate over every leaf in the tree, depth-first.
    ///
    /// A composite contributes its parent (if any) before the leaves of its
    /// children. A leaf yields only itself.
    pub fn flatten(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    /// Wrap this error as the only child of a composite with `parent` on top.
    ///
    /// The original error stays reachable as a child, so adding context
    /// never loses the cause. An empty parent adds nothing and returns
    /// the error unchanged.
    ///
    /// ```
    /// use faultline::error::ResultError;
    ///
    /// let error = ResultError::message("connection refused").enhance_with("loading user");
    /// assert_eq!(error.to_safe_string(), "loading user;connection refused");
    ///
    /// let same = ResultError::message("x").enhance_with("");
    /// assert_eq!(same, ResultError::message("x"));
    /// ```
    pub fn enhance_with(self, parent: impl Into<LeafError>) -> Self {
        let parent = parent.into();
        if parent.is_empty() {
            return self;
        }
        ResultError::Composite(ErrorComposite::new(parent, [self]))
    }
}

impl Default for ResultError {
    fn default() -> Self {
        ResultError::empty()
    }
}

impl From<LeafError> for ResultError {
    fn from(leaf: LeafError) -> Self {
        ResultError::Leaf(leaf)
    }
}

impl From<ErrorMessage> for ResultError {
    fn from(message: ErrorMessage) -> Self {
        ResultError::Leaf(LeafError::Message(message))
    }
}

impl From<ErrorException> for ResultError {
    fn from(exception: ErrorException) -> Self {
        ResultError::Leaf(LeafError::Exception(exception))
    }
}

impl From<ErrorKeyNotFound> for ResultError {
    fn from(missing: ErrorKeyNotFound) -> Self {
        ResultError::Leaf(LeafError::KeyNotFound(missing))
    }
}

impl From<ErrorComposite> for ResultError {
    fn from(composite: ErrorComposite) -> Self {
        ResultError::Composite(composite)
    }
}

impl From<&str> for ResultError {
    fn from(message: &str) -> Self {
        ResultError::message(message)
    }
}

impl From<String> for ResultError {
    fn from(message: String) -> Self {
        ResultError::message(message)
    }
}

impl fmt::Display for ResultError {
    /// Safe rendering by default, unsafe rendering with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let safety = if f.alternate() {
            Safety::Unsafe
        } else {
            Safety::Safe
        };
        f.write_str(&self.render(safety, DEFAULT_SEPARATOR))
    }
}

impl StdError for ResultError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ResultError::Leaf(LeafError::Exception(exception)) => Some(exception.inner()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_enhance_keeps_original_as_child() {
        let original = ResultError::exception(io::Error::other("disk offline"));
        let enhanced = original.clone().enhance_with("writing report");

        let composite = enhanced.as_composite().unwrap();
        assert_eq!(composite.parent(), Some(&LeafError::from("writing report")));
        assert_eq!(composite.children(), &[original]);
    }

    #[test]
    fn test_enhance_twice_nests() {
        let error = ResultError::message("base")
            .enhance_with("layer 1")
            .enhance_with("layer 2");

        let leaves: Vec<String> = error
            .flatten()
            .map(|leaf| leaf.render(Safety::Safe))
            .collect();
        assert_eq!(leaves, vec!["layer 2", "layer 1", "base"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(ResultError::empty().is_empty());
        assert!(ResultError::message("").is_empty());
        assert!(ResultError::aggregate(vec![ResultError::empty()]).is_empty());
        assert!(!ResultError::message("x").is_empty());
        assert!(!ResultError::composite("ctx", Vec::new()).is_empty());
    }

    #[test]
    fn test_display_safe_and_alternate_unsafe() {
        let error = ResultError::exception(io::Error::other("timeout")).enhance_with("fetching");

        assert_eq!(format!("{}", error), "fetching;timeout");

        let full = format!("{:#}", error);
        assert!(full.starts_with("fetching;"));
        assert!(full.contains("Error: timeout"));
    }

    #[test]
    fn test_error_source_exposes_native_error() {
        let error = ResultError::exception(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let source = error.source().unwrap();
        assert_eq!(source.to_string(), "gone");

        assert!(ResultError::message("plain").source().is_none());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(ResultError::from("m"), ResultError::message("m"));
        assert_eq!(ResultError::from(String::from("m")), ResultError::message("m"));
        assert!(ResultError::from(ErrorComposite::default()).is_composite());
        assert!(ResultError::from(ErrorKeyNotFound::create("k", "s")).is_leaf());
    }
}
