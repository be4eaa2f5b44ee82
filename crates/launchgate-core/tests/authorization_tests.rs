//! Authorization property tests for the exec decision engine.
//!
//! These exercise the engine through the same [`Authorizer`] seam the FFI
//! adapter uses, so they cover exactly what the sensor observes: at most one
//! response per event, fail-open everywhere except the exact guarded match,
//! and content-only determinism under concurrent delivery.

use std::sync::Arc;
use std::thread;

use launchgate_core::{AuthEvent, AuthResult, Authorizer, ExecPolicy};

const HELPER: &[u8] = b"/usr/libexec/xpcproxy";
const GUARDED: &[u8] = b"/System/Applications/Music.app/Contents/MacOS/Music";

#[test]
fn non_subscribed_kind_produces_no_verdict() {
    let policy = ExecPolicy::default();
    assert!(policy.authorize(&AuthEvent::other(HELPER)).is_none());
    assert!(policy.authorize(&AuthEvent::other(b"/bin/ls")).is_none());
}

#[test]
fn every_non_helper_subject_is_allowed_cacheable() {
    let policy = ExecPolicy::default();
    let subjects: &[&[u8]] = &[
        b"/bin/ls",
        b"/usr/bin/ssh",
        b"/Applications/Safari.app/Contents/MacOS/Safari",
        b"",
        b"/usr/libexec/xpcproxy2",
    ];

    for &subject in subjects {
        let args: &[&[u8]] = &[GUARDED];
        let response = policy
            .authorize(&AuthEvent::auth_exec(subject, args))
            .expect("auth-exec events always get a verdict");
        assert_eq!(response.result, AuthResult::Allow, "subject {subject:?}");
        assert!(response.cacheable);
    }
}

#[test]
fn helper_with_no_args_is_allowed() {
    let policy = ExecPolicy::default();
    let response = policy
        .authorize(&AuthEvent::auth_exec(HELPER, &[]))
        .unwrap();
    assert_eq!(response.result, AuthResult::Allow);
    assert!(response.cacheable);
}

#[test]
fn exact_guarded_match_is_denied() {
    let policy = ExecPolicy::default();
    let args: &[&[u8]] = &[GUARDED];
    let response = policy
        .authorize(&AuthEvent::auth_exec(HELPER, args))
        .unwrap();
    assert_eq!(response.result, AuthResult::Deny);
    assert!(response.cacheable);
    assert!(!policy.deny_notice().is_empty());
}

#[test]
fn near_misses_of_the_guarded_path_are_allowed() {
    let policy = ExecPolicy::default();
    let near_misses: &[&[u8]] = &[
        b"/System/Applications/Music.app/Contents/MacOS/Musi",
        b"/System/Applications/Music.app/Contents/MacOS/MusicX",
        b"System/Applications/Music.app/Contents/MacOS/Music",
        b"/system/applications/music.app/contents/macos/music",
        b"",
    ];

    for &argv0 in near_misses {
        let args: &[&[u8]] = &[argv0];
        let response = policy
            .authorize(&AuthEvent::auth_exec(HELPER, args))
            .unwrap();
        assert_eq!(response.result, AuthResult::Allow, "argv0 {argv0:?}");
    }
}

#[test]
fn identical_events_yield_identical_verdicts() {
    let policy = ExecPolicy::default();
    let args: &[&[u8]] = &[GUARDED];
    let event = AuthEvent::auth_exec(HELPER, args);

    let first = policy.authorize(&event);
    for _ in 0..100 {
        assert_eq!(policy.authorize(&event), first);
    }
}

#[test]
fn concurrent_events_resolve_independently_by_content() {
    let policy = Arc::new(ExecPolicy::default());
    let threads = 16;
    let rounds = 250;

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let policy = Arc::clone(&policy);
            thread::spawn(move || {
                // Even threads deliver the guarded launch, odd threads a
                // distinct innocuous one; each must get its own verdict.
                let expect_deny = i % 2 == 0;
                let other = format!("/usr/local/bin/tool-{i}");
                for _ in 0..rounds {
                    let argv0: &[u8] = if expect_deny { GUARDED } else { other.as_bytes() };
                    let args: &[&[u8]] = &[argv0];
                    let response = policy
                        .authorize(&AuthEvent::auth_exec(HELPER, args))
                        .unwrap();
                    let expected = if expect_deny {
                        AuthResult::Deny
                    } else {
                        AuthResult::Allow
                    };
                    assert_eq!(response.result, expected);
                    assert!(response.cacheable);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("authorizer thread panicked");
    }
}

#[test]
fn decision_path_is_fast_enough_for_the_auth_deadline() {
    // ES deadlines are in the tens of seconds; a single evaluation is two
    // string comparisons and must stay orders of magnitude under that even
    // in debug builds.
    let policy = ExecPolicy::default();
    let args: &[&[u8]] = &[GUARDED];
    let event = AuthEvent::auth_exec(HELPER, args);

    let iterations = 10_000u32;
    let start = std::time::Instant::now();
    for _ in 0..iterations {
        let _ = policy.authorize(&event);
    }
    let per_eval_us = start.elapsed().as_micros() / iterations as u128;
    assert!(
        per_eval_us < 1_000,
        "authorization took {per_eval_us}us per event"
    );
}
