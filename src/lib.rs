//! # WTF Errors
//!
//! Normalize heterogeneous failures into one coded [`Failure`] value.
//!
//! Code that receives errors from many places (library errors, hand-written
//! strings, panic payloads, arbitrary values) calls [`wrap`] and always gets
//! back a `Failure` with a numeric code, a message and optional extra context.
//!
//! ## Design
//!
//! 1. **One error kind**: `Failure { code, message }`; switch on the code, not
//!    the text
//! 2. **Wrap is total**: every input yields a failure with a non-empty message
//! 3. **Known causes, canonical shape**: default cases bind a cause identity
//!    (an error type or a declared token, never a message) to a template
//! 4. **No output channel**: the library classifies and decorates; hooks and
//!    [`HookJournal`] are opt-in
//!
//! ## Quick Start
//!
//! ```rust
//! use std::io;
//! use wtf_errors::{Classifier, Config, Failure};
//!
//! let classifier = Classifier::new();
//! classifier.add_default_case_for::<io::Error>("storage unavailable", 503);
//!
//! let f = classifier.wrap(io::Error::other("connection reset"));
//! assert_eq!(f.code(), 503);
//!
//! let f = classifier.wrap("bad header").with_message("while parsing request");
//! assert_eq!(f.message_string(), "bad header !extra[ while parsing request ]");
//!
//! classifier.configure(Config::new(500, "internal error").unwrap());
//! assert_eq!(classifier.wrap(42_u32).message(), "internal error");
//! ```
//!
//! ## Process-wide classifier
//!
//! The free functions in this crate ([`configure`], [`wrap`],
//! [`add_default_case_failure`], ...) operate on a single lazily created
//! [`Classifier`]. Prefer an explicit instance where isolation matters, such
//! as tests.
//!
//! ```rust
//! use wtf_errors as wtf;
//!
//! let f = wtf::wrap("boom");
//! assert!(wtf::is_failure(&f));
//! ```
//!
//! ## Features
//!
//! - `serde`: serialize `Failure` as `{code, message, details}` (origin is
//!   never serialized) and deserialize `Config` with validation

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::borrow::Cow;
use std::sync::LazyLock;

pub mod cause;
pub mod classifier;
pub mod config;
pub mod convenience;
pub mod failure;
pub mod journal;
pub mod logging;
pub mod subject;

pub use cause::*;
pub use classifier::*;
pub use config::*;
pub use failure::*;
pub use journal::*;
pub use logging::*;
pub use subject::*;

static GLOBAL: LazyLock<Classifier> = LazyLock::new(Classifier::new);

/// The process-wide classifier behind the free functions.
#[inline]
pub fn global() -> &'static Classifier {
    &GLOBAL
}

/// Replace the process-wide configuration.
pub fn configure(config: Config) {
    global().configure(config);
}

/// Create a failure with the given message and code.
#[inline]
pub fn new(message: impl Into<Cow<'static, str>>, code: i32) -> Failure {
    Failure::new(message, code)
}

/// Declare a reusable failure template.
#[inline]
pub const fn define(message: &'static str, code: i32) -> Failure {
    Failure::define(message, code)
}

/// The unknown-failure value for the process-wide configuration.
pub fn default_failure() -> Failure {
    global().default_failure()
}

/// Classify `input` with the process-wide classifier.
pub fn wrap(input: impl Into<Subject>) -> Failure {
    global().wrap(input)
}

/// Register a default case on the process-wide classifier.
pub fn add_default_case_failure(
    cause: impl Into<CauseKey>,
    message: impl Into<Cow<'static, str>>,
    code: i32,
) {
    global().add_default_case_failure(cause, message, code);
}

/// Append a hook to the process-wide classifier.
pub fn add_unknown_error_hook_failure<F>(hook: F)
where
    F: Fn(&Failure) + Send + Sync + 'static,
{
    global().add_unknown_error_hook_failure(hook);
}
