//! Process-wide failure hook.
//!
//! Every failure built by this crate (through [`Outcome::fail`] and the
//! combinators that create new errors) is reported to the installed hook
//! before it is returned. Errors merely passed along a chain are not
//! reported again. No hook is installed by default.
//!
//! The hook is a development aid: set a breakpoint in it, count failures in
//! a test, or (with the `tracing` feature) forward them to a subscriber.
//!
//! # Examples
//!
//! ```
//! use faultline::{hook, Outcome};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! hook::set_failure_hook(move |_error| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let _ = Outcome::<i32>::fail("first");
//! hook::clear_failure_hook();
//! let _ = Outcome::<i32>::fail("second");
//!
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```
//!
//! [`Outcome::fail`]: crate::Outcome::fail

use std::sync::{Arc, RwLock};

use crate::error::ResultError;

type FailureHook = Arc<dyn Fn(&ResultError) + Send + Sync + 'static>;

static FAILURE_HOOK: RwLock<Option<FailureHook>> = RwLock::new(None);

/// Install `hook`, replacing any previous one.
pub fn set_failure_hook<F>(hook: F)
where
    F: Fn(&ResultError) + Send + Sync + 'static,
{
    let mut slot = FAILURE_HOOK
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(Arc::new(hook));
}

/// Remove the installed hook, if any.
pub fn clear_failure_hook() {
    let mut slot = FAILURE_HOOK
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = None;
}

/// True while a hook is installed.
pub fn has_failure_hook() -> bool {
    FAILURE_HOOK
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .is_some()
}

/// Install a hook that emits a `tracing` debug event per failure.
///
/// The event carries the safe rendering only.
#[cfg(feature = "tracing")]
pub fn trace_failures() {
    set_failure_hook(|error| {
        tracing::debug!(error = %error, leaves = error.flatten().count(), "failure constructed");
    });
}

pub(crate) fn notify(error: &ResultError) {
    // Clone out and release the lock first: hooks may build failures too.
    let hook = FAILURE_HOOK
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    if let Some(hook) = hook {
        hook(error);
    }
}
