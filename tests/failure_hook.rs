//! Tests for the process-wide failure hook
//!
//! The hook is global, so every test takes `HOOK_LOCK` first.

use std::sync::{Arc, Mutex, MutexGuard};

use faultline::error::ResultError;
use faultline::{hook, CombineAll, Outcome};

static HOOK_LOCK: Mutex<()> = Mutex::new(());

fn exclusive() -> MutexGuard<'static, ()> {
    HOOK_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn recording_hook() -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    hook::set_failure_hook(move |error| {
        sink.lock().unwrap().push(error.to_safe_string());
    });
    seen
}

#[test]
fn no_hook_by_default() {
    let _guard = exclusive();
    hook::clear_failure_hook();
    assert!(!hook::has_failure_hook());

    let _ = Outcome::<()>::fail("unobserved");
}

#[test]
fn hook_sees_constructed_failures() {
    let _guard = exclusive();
    let seen = recording_hook();

    let _ = Outcome::<()>::fail("first");
    let _ = Outcome::<u8>::from_result(Err::<u8, _>("second"));

    hook::clear_failure_hook();
    assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn propagated_errors_are_not_reported_again() {
    let _guard = exclusive();
    let seen = recording_hook();

    let _ = Outcome::<i32>::fail("once")
        .map(|x| x + 1)
        .and_then(|x| Outcome::ok(x * 2))
        .ensure(|_| true, "unused")
        .discard_value();

    hook::clear_failure_hook();
    assert_eq!(*seen.lock().unwrap(), vec!["once"]);
}

#[test]
fn new_errors_built_by_combinators_are_reported() {
    let _guard = exclusive();
    let seen = recording_hook();

    let _ = (Outcome::<u8>::fail("a"), Outcome::<u8>::fail("b")).combine_all();
    let _ = Outcome::ok(1).ensure(|x| *x > 1, "too small");

    hook::clear_failure_hook();
    assert_eq!(*seen.lock().unwrap(), vec!["a", "b", "a;b", "too small"]);
}

#[test]
fn hook_may_build_failures_itself() {
    let _guard = exclusive();
    let seen = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&seen);
    hook::set_failure_hook(move |error: &ResultError| {
        let mut count = counter.lock().unwrap();
        *count += 1;
        if *count == 1 {
            drop(count);
            // Re-entrant construction must not deadlock.
            let _ = Outcome::<()>::fail(error.clone().enhance_with("observed"));
        }
    });

    let _ = Outcome::<()>::fail("outer");

    hook::clear_failure_hook();
    assert_eq!(*seen.lock().unwrap(), 2);
}

#[test]
fn replacing_the_hook() {
    let _guard = exclusive();
    let first = recording_hook();
    let second = recording_hook();

    let _ = Outcome::<()>::fail("after replace");

    hook::clear_failure_hook();
    assert!(first.lock().unwrap().is_empty());
    assert_eq!(*second.lock().unwrap(), vec!["after replace"]);
}
