//! Property-based tests for wtf_errors
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use proptest::prelude::*;
use std::io;
use std::sync::{Arc, Mutex};
use wtf_errors::{
    CauseId, CauseKey, Classifier, Config, Failure, HookJournal, Subject, is_failure,
};

/// Every input shape the classifier can be handed.
fn any_subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        ("\\PC{1,64}", any::<i32>()).prop_map(|(m, c)| Subject::from(Failure::new(m, c))),
        "\\PC{0,64}".prop_map(|m| Subject::from(io::Error::other(m))),
        "\\PC{0,64}".prop_map(Subject::from),
        any::<i64>().prop_map(Subject::from),
        any::<f64>().prop_map(Subject::from),
        any::<bool>().prop_map(Subject::from),
        Just(Subject::nothing()),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Subject::from_value),
    ]
}

// ============================================================================
// WRAP PROPERTIES
// ============================================================================

proptest! {
    /// Wrap always yields a failure with a non-empty message
    #[test]
    fn wrap_is_total(subject in any_subject()) {
        let classifier = Classifier::new();
        let failure = classifier.wrap(subject);
        prop_assert!(!failure.message().is_empty());
        prop_assert!(is_failure(&failure));
    }

    /// Non-failure inputs never produce an empty message
    #[test]
    fn wrapped_non_failures_have_text(text in "\\PC{0,64}", code in any::<i32>()) {
        let classifier = Classifier::new();
        classifier.configure(Config::new(code, "fallback").unwrap());

        let from_text = classifier.wrap(text.clone());
        let from_error = classifier.wrap(io::Error::other(text));
        prop_assert!(!from_text.message().is_empty());
        prop_assert!(!from_error.message().is_empty());
        prop_assert_eq!(from_text.code(), code);
        prop_assert_eq!(from_error.code(), code);
    }

    /// Wrapping a wrapped value changes nothing
    #[test]
    fn wrap_is_idempotent(subject in any_subject()) {
        let classifier = Classifier::new();
        let once = classifier.wrap(subject);
        let twice = classifier.wrap(once.clone());
        prop_assert_eq!(twice, once);
    }

    /// Non-blank strings pass through with the configured code
    #[test]
    fn strings_pass_through(text in "[a-z]{1,32}", code in any::<i32>()) {
        let classifier = Classifier::with_config(Config::new(code, "unknown").unwrap());
        let failure = classifier.wrap(text.clone());
        prop_assert_eq!(failure.message(), text.as_str());
        prop_assert_eq!(failure.code(), code);
    }

    /// Values without text take the configured unknown message
    #[test]
    fn unknown_values_fall_back(value in any::<i64>(), code in any::<i32>(), msg in "[a-z]{1,16}") {
        let classifier = Classifier::with_config(Config::new(code, msg.clone()).unwrap());
        let failure = classifier.wrap(value);
        prop_assert_eq!(failure.message(), msg.as_str());
        prop_assert_eq!(failure.code(), code);
    }
}

// ============================================================================
// DEFAULT CASE PROPERTIES
// ============================================================================

proptest! {
    /// A registered cause is overridden; a token with the same label is not
    #[test]
    fn default_cases_match_identity_not_text(
        text in "[a-z]{1,32}",
        message in "[a-z]{1,32}",
        code in any::<i32>(),
    ) {
        let classifier = Classifier::new();
        let registered = CauseId::declare("case");
        let twin = CauseId::declare("case");
        classifier.add_default_case_failure(registered, message.clone(), code);

        let hit = classifier.wrap(Subject::caused_by(io::Error::other(text.clone()), registered));
        prop_assert_eq!(hit.code(), code);
        prop_assert_eq!(hit.message(), message.as_str());

        let miss = classifier.wrap(Subject::caused_by(io::Error::other(text.clone()), twin));
        prop_assert_eq!(miss.code(), 100);
        prop_assert_eq!(miss.message(), text.as_str());
    }

    /// A failure handed in under a registered cause is returned unchanged
    #[test]
    fn failures_ignore_cause_keys(message in "[a-z]{1,32}", code in any::<i32>()) {
        let classifier = Classifier::new();
        let cause = CauseId::declare("case");
        classifier.add_default_case_failure(cause, "registered", code.wrapping_add(1));

        let input = Failure::new(message, code);
        let failure = classifier.wrap(Subject::caused_by(input.clone(), cause));
        prop_assert_eq!(failure, input);
    }

    /// Std errors reached through value probing keep their text
    #[test]
    fn probed_errors_keep_their_text(text in "[a-z]{1,32}") {
        let classifier = Classifier::new();
        let failure = classifier.wrap(Subject::from_value(io::Error::other(text.clone())));
        prop_assert_eq!(failure.message(), text.as_str());
    }

    /// Type-keyed cases apply to every value of that type, whatever its text
    #[test]
    fn type_cases_ignore_error_text(text in "\\PC{0,64}", code in any::<i32>()) {
        let classifier = Classifier::new();
        classifier.add_default_case_failure(CauseKey::of::<io::Error>(), "io", code);
        let failure = classifier.wrap(io::Error::other(text));
        prop_assert_eq!(failure.code(), code);
        prop_assert_eq!(failure.message(), "io");
    }
}

// ============================================================================
// FAILURE PROPERTIES
// ============================================================================

proptest! {
    /// Decorators keep both texts in the rendering
    #[test]
    fn chaining_keeps_message_and_extra(
        message in "[a-z]{1,32}",
        extra in "[a-z]{1,32}",
        first in any::<i32>(),
        second in any::<i32>(),
    ) {
        let failure = Failure::new(message.clone(), first)
            .with_code(second)
            .with_message(extra.clone());
        prop_assert_eq!(failure.code(), second);
        let rendered = failure.message_string();
        prop_assert!(rendered.contains(&message));
        prop_assert!(rendered.contains(&extra));
    }

    /// Log lines are bounded however long the message is
    #[test]
    fn log_lines_are_bounded(message in "\\PC{0,5000}", extra in "\\PC{0,5000}") {
        let failure = Failure::new(message, 1).with_message(extra);
        let mut line = String::new();
        failure.log_entry().write_to(&mut line).unwrap();
        prop_assert!(std::str::from_utf8(line.as_bytes()).is_ok());
        prop_assert!(line.len() < 2 * 1024 + 64);
    }

    /// Every registered hook sees every hooked failure, in order
    #[test]
    fn hooks_run_in_order(hook_count in 1usize..8, code in any::<i32>()) {
        let classifier = Classifier::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        for i in 0..hook_count {
            let calls = Arc::clone(&calls);
            classifier.add_unknown_error_hook_failure(move |f| {
                calls.lock().unwrap().push((i, f.code()));
            });
        }

        let _ = classifier.hook(Failure::new("m", code));
        let expected: Vec<_> = (0..hook_count).map(|i| (i, code)).collect();
        let seen = calls.lock().unwrap().clone();
        prop_assert_eq!(seen, expected);
    }
}

// ============================================================================
// JOURNAL PROPERTIES
// ============================================================================

proptest! {
    /// Journal never exceeds capacity
    #[test]
    fn journal_respects_capacity(capacity in 1usize..64, records in 0usize..160) {
        let journal = HookJournal::new(capacity, 256);
        for i in 0..records {
            journal.record(&Failure::new(format!("failure {}", i), 1));
        }

        prop_assert!(journal.len() <= capacity);
        prop_assert_eq!(journal.len(), records.min(capacity));
        prop_assert_eq!(journal.eviction_count(), records.saturating_sub(capacity) as u64);
    }

    /// Journal entries never exceed the per-entry byte cap
    #[test]
    fn journal_entries_are_bounded(message in "\\PC{0,2000}", extra in "\\PC{0,2000}", cap in 16usize..512) {
        let journal = HookJournal::new(4, cap);
        journal.record(&Failure::new(message, 1).with_message(extra));
        let entry = &journal.get_recent(1)[0];
        prop_assert!(entry.size_bytes <= cap);
        prop_assert!(std::str::from_utf8(entry.message.as_bytes()).is_ok());
    }
}

// ============================================================================
// PANIC ROUND TRIP
// ============================================================================

#[test]
fn panic_payload_wraps_back_to_the_failure() {
    let classifier = Classifier::new();
    let payload = std::panic::catch_unwind(|| {
        Failure::new("fatal", 13).with_message("ctx").panic();
    })
    .unwrap_err();

    let recovered = classifier.wrap(Subject::from_any(payload));
    assert_eq!(recovered, Failure::new("fatal", 13).with_message("ctx"));
}

#[test]
fn foreign_panics_become_text_failures() {
    let classifier = Classifier::new();
    let payload = std::panic::catch_unwind(|| panic!("index {} out of range", 4)).unwrap_err();
    let failure = classifier.wrap(Subject::from_any(payload));
    assert_eq!(failure.message(), "index 4 out of range");
    assert_eq!(failure.code(), 100);
}
