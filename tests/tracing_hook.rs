//! Tests for forwarding failures to `tracing`

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use faultline::error::ResultError;
use faultline::{hook, Outcome, ResultExt};
use tracing_test::traced_test;

static HOOK_LOCK: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    HOOK_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[test]
#[traced_test]
fn trace_failures_emits_debug_event() {
    let _guard = exclusive();
    hook::trace_failures();

    let _ = Outcome::<()>::fail(ResultError::message("quota exceeded").enhance_with("uploading"));

    hook::clear_failure_hook();
    assert!(logs_contain("failure constructed"));
    assert!(logs_contain("uploading;quota exceeded"));
}

#[test]
fn trace_failures_logs_safe_rendering_only() {
    let _guard = exclusive();
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        hook::trace_failures();
        let _ = Err::<(), _>(io::Error::other("token abc123 rejected")).context("calling api");
        hook::clear_failure_hook();
    });

    let logs = capture.contents();
    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("calling api;token abc123 rejected"));
    assert!(logs.contains("leaves=2"));
    // The unsafe rendering would name the native type.
    assert!(!logs.contains("std::io::error::Error"));
}
