//! Leaf (non-composite) error nodes.
//!
//! A leaf renders directly to text. There are four kinds:
//!
//! - [`LeafError::Empty`] - the "no message" marker, never carried by a failure
//! - [`ErrorMessage`] - a human readable message
//! - [`ErrorException`] - a wrapped native error (or caught panic)
//! - [`ErrorKeyNotFound`] - a failed lookup of a key in a named source

use std::any::{type_name, Any};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use super::render::Safety;

/// A non-composite node of an error tree.
///
/// Leaves are the only nodes that carry text of their own. A composite's
/// parent is always a leaf, which keeps "context on top of causes" a
/// one-level relation.
///
/// # Examples
///
/// ```
/// use faultline::error::{ErrorMessage, LeafError};
///
/// assert_eq!(ErrorMessage::create(""), LeafError::Empty);
/// assert!(matches!(ErrorMessage::create("boom"), LeafError::Message(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LeafError {
    /// No message at all. Collapses to "no parent" inside composites.
    #[default]
    Empty,
    /// A plain message.
    Message(ErrorMessage),
    /// A wrapped native error.
    Exception(ErrorException),
    /// A lookup that found nothing.
    KeyNotFound(ErrorKeyNotFound),
}

impl LeafError {
    /// Returns true for the empty marker.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, LeafError::Empty)
    }

    /// Render this leaf on its own.
    ///
    /// The empty marker renders as an empty string.
    pub fn render(&self, safety: Safety) -> String {
        match self {
            LeafError::Empty => String::new(),
            LeafError::Message(message) => message.message().to_owned(),
            LeafError::Exception(exception) => match safety {
                Safety::Safe => exception.message(),
                Safety::Unsafe => exception.diagnostic(),
            },
            LeafError::KeyNotFound(missing) => missing.message(),
        }
    }
}

impl From<ErrorMessage> for LeafError {
    fn from(message: ErrorMessage) -> Self {
        LeafError::Message(message)
    }
}

impl From<ErrorException> for LeafError {
    fn from(exception: ErrorException) -> Self {
        LeafError::Exception(exception)
    }
}

impl From<ErrorKeyNotFound> for LeafError {
    fn from(missing: ErrorKeyNotFound) -> Self {
        LeafError::KeyNotFound(missing)
    }
}

impl From<&str> for LeafError {
    fn from(message: &str) -> Self {
        ErrorMessage::create(message)
    }
}

impl From<String> for LeafError {
    fn from(message: String) -> Self {
        ErrorMessage::create(message)
    }
}

/// A leaf carrying a human readable message.
///
/// Always non-empty: [`ErrorMessage::create`] hands back
/// [`LeafError::Empty`] for empty text instead of building one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorMessage {
    message: String,
}

impl ErrorMessage {
    /// Build a message leaf, collapsing empty text to [`LeafError::Empty`].
    ///
    /// # Examples
    ///
    /// ```
    /// use faultline::error::{ErrorMessage, LeafError};
    ///
    /// match ErrorMessage::create("disk full") {
    ///     LeafError::Message(m) => assert_eq!(m.message(), "disk full"),
    ///     other => panic!("unexpected leaf {:?}", other),
    /// }
    /// ```
    pub fn create(message: impl Into<String>) -> LeafError {
        let message = message.into();
        if message.is_empty() {
            LeafError::Empty
        } else {
            LeafError::Message(ErrorMessage { message })
        }
    }

    /// The message text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A leaf wrapping a native error.
///
/// The safe rendering is the error's `Display` output. The unsafe rendering
/// adds the concrete type name, the `source()` chain and, when capture is
/// enabled through `RUST_BACKTRACE`, the backtrace taken at wrap time.
///
/// # Examples
///
/// ```
/// use faultline::error::{ErrorException, LeafError, Safety};
/// use std::io;
///
/// let leaf = LeafError::from(ErrorException::new(io::Error::other("socket closed")));
/// assert_eq!(leaf.render(Safety::Safe), "socket closed");
/// assert!(leaf.render(Safety::Unsafe).contains("Error: socket closed"));
/// ```
#[derive(Clone)]
pub struct ErrorException {
    error: Arc<dyn StdError + Send + Sync + 'static>,
    type_name: &'static str,
    backtrace: Arc<Backtrace>,
}

impl ErrorException {
    /// Wrap a native error, capturing a backtrace if enabled.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        ErrorException {
            error: Arc::new(error),
            type_name: type_name::<E>(),
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// Wrap an already boxed native error.
    ///
    /// The concrete type is erased, so the unsafe rendering reports it as
    /// `dyn Error`.
    pub fn from_boxed(error: Box<dyn StdError + Send + Sync + 'static>) -> Self {
        ErrorException {
            error: Arc::from(error),
            type_name: "dyn Error",
            backtrace: Arc::new(Backtrace::capture()),
        }
    }

    /// Wrap the payload of a caught panic.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self::new(PanicError::from_payload(payload))
    }

    /// The safe, short message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// The full diagnostic text: type, message, cause chain, backtrace.
    pub fn diagnostic(&self) -> String {
        let mut out = format!("{}: {}", self.type_name, self.error);
        let mut cause = self.error.source();
        while let Some(err) = cause {
            let _ = write!(out, "\n  caused by: {}", err);
            cause = err.source();
        }
        if self.backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(out, "\nstack backtrace:\n{}", self.backtrace);
        }
        out
    }

    /// The concrete type name of the wrapped error.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }

    /// Borrow the wrapped error as a concrete type, if it is one.
    ///
    /// ```
    /// use faultline::error::ErrorException;
    /// use std::io;
    ///
    /// let exception = ErrorException::new(io::Error::new(io::ErrorKind::TimedOut, "slow"));
    /// let io_error = exception.downcast_ref::<io::Error>().unwrap();
    /// assert_eq!(io_error.kind(), io::ErrorKind::TimedOut);
    /// assert!(exception.downcast_ref::<std::fmt::Error>().is_none());
    /// ```
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.error.downcast_ref::<E>()
    }
}

impl fmt::Debug for ErrorException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorException")
            .field("type_name", &self.type_name)
            .field("error", &self.error)
            .finish()
    }
}

impl PartialEq for ErrorException {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
            || (self.type_name == other.type_name && self.message() == other.message())
    }
}

/// A leaf reporting a key missing from a named source.
///
/// Both renderings are identical: the key and source description are not
/// considered sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorKeyNotFound {
    key: String,
    source: String,
}

impl ErrorKeyNotFound {
    /// Build a key-not-found leaf.
    ///
    /// ```
    /// use faultline::error::ErrorKeyNotFound;
    ///
    /// let missing = ErrorKeyNotFound::create(42, "user cache");
    /// assert_eq!(missing.message(), "Unable to find key '42' in source 'user cache'");
    /// ```
    pub fn create(key: impl fmt::Display, source_description: impl Into<String>) -> Self {
        ErrorKeyNotFound {
            key: key.to_string(),
            source: source_description.into(),
        }
    }

    /// The missing key, as text.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Description of where the key was looked up.
    pub fn source_description(&self) -> &str {
        &self.source
    }

    /// The rendered message.
    pub fn message(&self) -> String {
        format!(
            "Unable to find key '{}' in source '{}'",
            self.key, self.source
        )
    }
}

impl fmt::Display for ErrorKeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A caught panic, as a native error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanicError {
    message: String,
}

impl PanicError {
    /// Extract the message of a panic payload.
    ///
    /// `panic!` payloads are `&'static str` or `String`; anything else is
    /// reported generically.
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_owned(),
                Err(_) => "panic with a non-string payload".to_owned(),
            },
        };
        PanicError { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for PanicError {}
