//! Text and structured renderings of error trees.
//!
//! Two modes exist. [`Safety::Safe`] leaves out diagnostic detail (a wrapped
//! native error shows only its message) and is meant for text that may leave
//! a trusted boundary. [`Safety::Unsafe`] includes type names, cause chains
//! and backtraces. Which one to surface is the caller's decision.

use super::ResultError;

/// Separator used by the convenience renderings.
pub const DEFAULT_SEPARATOR: &str = ";";

/// How much diagnostic detail a rendering may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Safety {
    /// Messages only.
    #[default]
    Safe,
    /// Full diagnostics, including backtraces of wrapped native errors.
    Unsafe,
}

/// A serializable snapshot of an error tree.
///
/// Leaves become nodes without children. A composite becomes a node whose
/// message is its parent's rendering (empty without a parent) and whose
/// children mirror its own.
///
/// # Examples
///
/// ```
/// use faultline::error::{ResultError, ResultErrorStructure, Safety};
///
/// let error = ResultError::composite("import failed", vec![ResultError::message("row 3")]);
/// assert_eq!(
///     error.to_structure(Safety::Safe),
///     ResultErrorStructure {
///         message: "import failed".to_string(),
///         children: vec![ResultErrorStructure {
///             message: "row 3".to_string(),
///             children: vec![],
///         }],
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultErrorStructure {
    /// This node's own text.
    pub message: String,
    /// Structures of the child errors, in order.
    pub children: Vec<ResultErrorStructure>,
}

impl ResultError {
    /// Render the tree, joining segments with `separator`.
    ///
    /// Segments follow [`flatten`](ResultError::flatten) order: a composite
    /// renders as its parent followed by each child's rendering. Leaves whose
    /// text is empty add no segment.
    ///
    /// ```
    /// use faultline::error::{ResultError, Safety};
    ///
    /// let error = ResultError::aggregate(vec![
    ///     ResultError::message("M2"),
    ///     ResultError::message("M3"),
    /// ]);
    /// assert_eq!(error.render(Safety::Safe, " | "), "M2 | M3");
    /// ```
    pub fn render(&self, safety: Safety, separator: &str) -> String {
        let mut out = String::new();
        for leaf in self.flatten() {
            let text = leaf.render(safety);
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push_str(separator);
            }
            out.push_str(&text);
        }
        out
    }

    /// Safe rendering with the default separator.
    pub fn to_safe_string(&self) -> String {
        self.render(Safety::Safe, DEFAULT_SEPARATOR)
    }

    /// Unsafe (diagnostic) rendering with the default separator.
    pub fn to_unsafe_string(&self) -> String {
        self.render(Safety::Unsafe, DEFAULT_SEPARATOR)
    }

    /// Project the tree into a [`ResultErrorStructure`].
    pub fn to_structure(&self, safety: Safety) -> ResultErrorStructure {
        match self {
            ResultError::Leaf(leaf) => ResultErrorStructure {
                message: leaf.render(safety),
                children: Vec::new(),
            },
            ResultError::Composite(composite) => ResultErrorStructure {
                message: composite
                    .parent()
                    .map(|parent| parent.render(safety))
                    .unwrap_or_default(),
                children: composite
                    .children()
                    .iter()
                    .map(|child| child.to_structure(safety))
                    .collect(),
            },
        }
    }
}
