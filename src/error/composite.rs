//! Composite error nodes and depth-first flattening.

use std::mem;

use super::leaf::LeafError;
use super::ResultError;

/// An error node with an optional leaf parent and ordered children.
///
/// The parent is the context ("while loading config"), the children are the
/// causes. Children may themselves be composites, so trees nest to any depth.
///
/// Empty children are dropped on construction and an empty parent becomes
/// "no parent".
///
/// # Examples
///
/// ```
/// use faultline::error::{ErrorComposite, ResultError};
///
/// let composite = ErrorComposite::new(
///     "saving profile",
///     vec![ResultError::message("name too long"), ResultError::message("")],
/// );
///
/// assert!(composite.parent().is_some());
/// assert_eq!(composite.children().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorComposite {
    parent: Option<LeafError>,
    children: Vec<ResultError>,
}

impl ErrorComposite {
    /// Build a composite with a parent leaf.
    pub fn new<P, I>(parent: P, children: I) -> Self
    where
        P: Into<LeafError>,
        I: IntoIterator<Item = ResultError>,
    {
        let parent = parent.into();
        ErrorComposite {
            parent: (!parent.is_empty()).then_some(parent),
            children: children
                .into_iter()
                .filter(|child| !child.is_empty())
                .collect(),
        }
    }

    /// Build a parent-less composite, a plain aggregation of siblings.
    pub fn from_children<I>(children: I) -> Self
    where
        I: IntoIterator<Item = ResultError>,
    {
        Self::new(LeafError::Empty, children)
    }

    /// The parent leaf, if any.
    pub fn parent(&self) -> Option<&LeafError> {
        self.parent.as_ref()
    }

    /// The children in insertion order.
    pub fn children(&self) -> &[ResultError] {
        &self.children
    }

    /// True when there is neither a parent nor any child.
    pub fn is_empty(&self) -> bool {
        self.parent.is_none() && self.children.is_empty()
    }

    /// Split into parent and children.
    pub fn into_parts(mut self) -> (Option<LeafError>, Vec<ResultError>) {
        (self.parent.take(), mem::take(&mut self.children))
    }
}

impl Drop for ErrorComposite {
    // Unlinks nested composites onto a heap stack so deep trees drop
    // without recursing.
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let ResultError::Composite(mut composite) = child {
                pending.append(&mut composite.children);
            }
        }
    }
}

/// Depth-first iterator over the leaves of an error tree.
///
/// Created by [`ResultError::flatten`]. A composite yields its parent
/// first, then the leaves of each child in order.
#[derive(Debug, Clone)]
pub struct Leaves<'a> {
    pending: Vec<&'a ResultError>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(root: &'a ResultError) -> Self {
        Leaves {
            pending: vec![root],
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a LeafError;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.pending.pop() {
            match node {
                ResultError::Leaf(leaf) => return Some(leaf),
                ResultError::Composite(composite) => {
                    // Reverse push so the first child is popped first.
                    self.pending.extend(composite.children.iter().rev());
                    if let Some(parent) = &composite.parent {
                        return Some(parent);
                    }
                }
            }
        }
        None
    }
}

impl std::iter::FusedIterator for Leaves<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Safety;

    fn texts(error: &ResultError) -> Vec<String> {
        error
            .flatten()
            .map(|leaf| leaf.render(Safety::Safe))
            .collect()
    }

    #[test]
    fn test_flatten_leaf_yields_itself() {
        let error = ResultError::message("only");
        assert_eq!(texts(&error), vec!["only"]);
    }

    #[test]
    fn test_flatten_parent_before_children_depth_first() {
        let error = ResultError::composite(
            "P",
            vec![
                ResultError::message("A"),
                ResultError::composite(
                    "B",
                    vec![ResultError::message("C"), ResultError::message("D")],
                ),
                ResultError::message("E"),
            ],
        );

        assert_eq!(texts(&error), vec!["P", "A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_flatten_without_parents() {
        let error = ResultError::aggregate(vec![
            ResultError::aggregate(vec![ResultError::message("x")]),
            ResultError::message("y"),
        ]);

        assert_eq!(texts(&error), vec!["x", "y"]);
    }

    #[test]
    fn test_new_drops_empty_children_and_parent() {
        let composite = ErrorComposite::new(
            "",
            vec![
                ResultError::message(""),
                ResultError::aggregate(Vec::new()),
                ResultError::message("kept"),
            ],
        );

        assert!(composite.parent().is_none());
        assert_eq!(composite.children(), &[ResultError::message("kept")]);
    }

    #[test]
    fn test_into_parts() {
        let composite = ErrorComposite::new("ctx", vec![ResultError::message("cause")]);
        let (parent, children) = composite.into_parts();
        assert_eq!(parent, Some(LeafError::from("ctx")));
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn test_empty_composite() {
        assert!(ErrorComposite::from_children(Vec::new()).is_empty());
        assert!(ErrorComposite::default().is_empty());
    }
}
