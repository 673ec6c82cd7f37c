//! Convenience macros for building and declaring failures.
//!
//! # Usage
//!
//! ```rust
//! use wtf_errors::{define_failures, failure};
//!
//! define_failures! {
//!     /// Storage layer is unreachable.
//!     pub STORAGE_DOWN = (503, "storage unavailable"),
//!     pub NOT_FOUND = (404, "record not found"),
//! }
//!
//! let id = 42;
//! let f = failure!(404, "record {} not found", id);
//! assert_eq!(f.message(), "record 42 not found");
//! assert_eq!(NOT_FOUND.code(), 404);
//! ```

/// Build a [`Failure`](crate::Failure) from a code and a format string.
///
/// ```rust
/// # use wtf_errors::failure;
/// let shard = 3;
/// let f = failure!(500, "shard {shard} rejected write");
/// assert_eq!(f.message(), "shard 3 rejected write");
/// assert_eq!(f.code(), 500);
/// ```
#[macro_export]
macro_rules! failure {
    ($code:expr, $($fmt:tt)+) => {
        $crate::Failure::new(::std::format!($($fmt)+), $code)
    };
}

/// Declare reusable failure templates as `const` items.
///
/// Each entry expands to `const NAME: Failure = Failure::define(message, code)`,
/// so templates can be registered as default cases or returned directly.
///
/// ```rust
/// # use wtf_errors::{define_failures, Classifier, CauseKey};
/// define_failures! {
///     IO_DOWN = (503, "storage unavailable"),
/// }
///
/// let classifier = Classifier::new();
/// classifier.add_default_case(CauseKey::of::<std::io::Error>(), IO_DOWN);
/// let f = classifier.wrap(std::io::Error::other("reset"));
/// assert_eq!(f, IO_DOWN);
/// ```
#[macro_export]
macro_rules! define_failures {
    ($($(#[$meta:meta])* $vis:vis $name:ident = ($code:expr, $message:literal)),* $(,)?) => {
        $(
            $(#[$meta])*
            $vis const $name: $crate::Failure = $crate::Failure::define($message, $code);
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::Failure;

    define_failures! {
        FIRST = (1, "first"),
        /// Documented template.
        pub(crate) SECOND = (2, "second"),
    }

    #[test]
    fn failure_macro_formats_message() {
        let value = 7;
        let f = failure!(9, "value {} out of range", value);
        assert_eq!(f.code(), 9);
        assert_eq!(f.message(), "value 7 out of range");
        assert!(f.extra_message().is_none());
    }

    #[test]
    fn failure_macro_accepts_plain_literal() {
        assert_eq!(failure!(1, "plain"), Failure::new("plain", 1));
    }

    #[test]
    fn define_failures_declares_consts() {
        assert_eq!(FIRST, Failure::new("first", 1));
        assert_eq!(SECOND.code(), 2);
        assert_eq!(SECOND.message(), "second");
    }

    #[test]
    fn templates_are_independent_values() {
        let decorated = FIRST.with_message("ctx");
        assert_eq!(decorated.extra_message(), Some("ctx"));
        assert!(FIRST.extra_message().is_none());
    }
}
