//! The shapes of value `wrap` knows how to classify.
//!
//! Rust has no "any value" parameter type, so callers hand
//! [`Classifier::wrap`](crate::Classifier::wrap) a [`Subject`], usually
//! through `Into<Subject>`. The variants are listed in the order the
//! classifier checks them, and the probing constructors ([`Subject::from_any`],
//! [`Subject::from_value`]) test shapes in that same order:
//!
//! 1. already a [`Failure`]
//! 2. an error value (carries its own text and a cause identity)
//! 3. a plain string
//! 4. anything else
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::Subject;
//!
//! assert_eq!(Subject::from("boom").kind(), "text");
//! assert_eq!(Subject::from(std::io::Error::other("x")).kind(), "error");
//! assert_eq!(Subject::from(42_i64).kind(), "unknown");
//! assert_eq!(Subject::from(None::<String>).kind(), "unknown");
//! ```

use crate::{CauseKey, Failure};
use std::any::Any;
use std::borrow::Cow;
use std::error::Error;
use std::sync::Arc;

/// Std error types that classify by their concrete type.
///
/// Invokes `$callback!` with any leading idents followed by the type list.
macro_rules! with_std_errors {
    ($callback:ident $(, $arg:ident)*) => {
        $callback!(
            $($arg,)*
            std::io::Error,
            std::fmt::Error,
            std::num::ParseIntError,
            std::num::ParseFloatError,
            std::num::TryFromIntError,
            std::str::Utf8Error,
            std::string::FromUtf8Error,
            std::str::ParseBoolError,
            std::char::ParseCharError,
            std::net::AddrParseError,
            std::time::SystemTimeError,
        );
    };
}

/// Return early from the enclosing constructor if `$boxed` holds one of the
/// listed error types; otherwise rebind `$boxed` to the untouched box.
macro_rules! probe_std_errors {
    ($boxed:ident, $($ty:ty),* $(,)?) => {
        $(
            let $boxed = match $boxed.downcast::<$ty>() {
                Ok(error) => return Self::error(*error),
                Err(other) => other,
            };
        )*
    };
}

/// Classified input to [`Classifier::wrap`](crate::Classifier::wrap).
#[derive(Clone)]
pub enum Subject {
    /// Already normalized; wrapping returns it unchanged.
    Failure(Failure),
    /// An error value and the identity used for default-case lookup.
    ///
    /// `key` is `None` for opaque boxed errors whose concrete type is not
    /// known; those never match a registered default case.
    Error {
        /// The error itself, kept as origin.
        error: Arc<dyn Error + Send + Sync>,
        /// Identity for default-case lookup.
        key: Option<CauseKey>,
    },
    /// A plain string.
    Text(Cow<'static, str>),
    /// Any other value, kept as origin when it can be shared.
    Unknown(Option<Arc<dyn Any + Send + Sync>>),
}

impl Subject {
    /// Classify an error by its concrete type.
    ///
    /// A `Failure` passed here is still recognized as a `Failure`.
    pub fn error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let key = CauseKey::of::<E>();
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        match boxed.downcast::<Failure>() {
            Ok(failure) => Self::Failure(*failure),
            Err(boxed) => Self::Error {
                error: Arc::from(boxed),
                key: Some(key),
            },
        }
    }

    /// Classify an error under an explicitly declared cause.
    ///
    /// A `Failure` passed here is still recognized as a `Failure`; the cause
    /// is ignored.
    pub fn caused_by<E>(error: E, cause: impl Into<CauseKey>) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(error);
        match boxed.downcast::<Failure>() {
            Ok(failure) => Self::Failure(*failure),
            Err(boxed) => Self::Error {
                error: Arc::from(boxed),
                key: Some(cause.into()),
            },
        }
    }

    /// Classify a boxed error whose concrete type is erased.
    pub fn boxed_error(error: Box<dyn Error + Send + Sync>) -> Self {
        match error.downcast::<Failure>() {
            Ok(failure) => Self::Failure(*failure),
            Err(error) => Self::Error {
                error: Arc::from(error),
                key: None,
            },
        }
    }

    /// Classify a plain string.
    #[inline]
    pub fn text(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(text.into())
    }

    /// The absent value (`None`, `()`).
    #[inline]
    pub const fn nothing() -> Self {
        Self::Unknown(None)
    }

    /// Probe an arbitrary shareable value.
    ///
    /// Recognizes `Failure`, `Box<dyn Error + Send + Sync>`, the std error
    /// types that convert into a subject, `String`, `&'static str` and
    /// `Cow<'static, str>`; everything else is unknown and kept as origin.
    pub fn from_value<T: Any + Send + Sync>(value: T) -> Self {
        let boxed: Box<dyn Any + Send + Sync> = Box::new(value);
        let boxed = match boxed.downcast::<Failure>() {
            Ok(failure) => return Self::Failure(*failure),
            Err(other) => other,
        };
        let boxed = match boxed.downcast::<Box<dyn Error + Send + Sync>>() {
            Ok(error) => return Self::boxed_error(*error),
            Err(other) => other,
        };
        with_std_errors!(probe_std_errors, boxed);
        let boxed = match boxed.downcast::<String>() {
            Ok(text) => return Self::text(*text),
            Err(other) => other,
        };
        let boxed = match boxed.downcast::<&'static str>() {
            Ok(text) => return Self::text(*text),
            Err(other) => other,
        };
        let boxed = match boxed.downcast::<Cow<'static, str>>() {
            Ok(text) => return Self::Text(*text),
            Err(other) => other,
        };
        Self::Unknown(Some(Arc::from(boxed)))
    }

    /// Probe a panic payload or other sendable boxed value.
    ///
    /// Same order as [`Subject::from_value`]. An unrecognized payload is not
    /// `Sync`, so it is classified as unknown without an origin.
    pub fn from_any(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Failure>() {
            Ok(failure) => return Self::Failure(*failure),
            Err(other) => other,
        };
        let payload = match payload.downcast::<Box<dyn Error + Send + Sync>>() {
            Ok(error) => return Self::boxed_error(*error),
            Err(other) => other,
        };
        with_std_errors!(probe_std_errors, payload);
        let payload = match payload.downcast::<String>() {
            Ok(text) => return Self::text(*text),
            Err(other) => other,
        };
        match payload.downcast::<&'static str>() {
            Ok(text) => Self::text(*text),
            Err(_) => Self::nothing(),
        }
    }

    /// True when this subject is already a [`Failure`].
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Short label of the classified shape.
    #[inline]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Failure(_) => "failure",
            Self::Error { .. } => "error",
            Self::Text(_) => "text",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Debug for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failure(failure) => f.debug_tuple("Failure").field(failure).finish(),
            Self::Error { error, key } => f
                .debug_struct("Error")
                .field("error", &error.to_string())
                .field("key", key)
                .finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Unknown(value) => f
                .debug_tuple("Unknown")
                .field(&value.as_ref().map(|_| "<opaque>"))
                .finish(),
        }
    }
}

impl From<Failure> for Subject {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl From<&'static str> for Subject {
    fn from(text: &'static str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Subject {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl From<Cow<'static, str>> for Subject {
    fn from(text: Cow<'static, str>) -> Self {
        Self::Text(text)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Subject {
    fn from(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::boxed_error(error)
    }
}

impl From<()> for Subject {
    fn from(_: ()) -> Self {
        Self::nothing()
    }
}

impl<T: Into<Subject>> From<Option<T>> for Subject {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::nothing, Into::into)
    }
}

/// `From` impls for the std error list.
macro_rules! impl_error_subject {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Subject {
                fn from(error: $ty) -> Self {
                    Self::error(error)
                }
            }
        )*
    };
}

with_std_errors!(impl_error_subject);

/// Plain values with no text of their own.
macro_rules! impl_unknown_subject {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Subject {
                fn from(value: $ty) -> Self {
                    Self::Unknown(Some(Arc::new(value)))
                }
            }
        )*
    };
}

impl_unknown_subject!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::io;

    #[derive(Debug)]
    struct Custom;

    impl fmt::Display for Custom {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("custom")
        }
    }

    impl Error for Custom {}

    #[test]
    fn error_constructor_keys_by_type() {
        match Subject::error(Custom) {
            Subject::Error { key, .. } => assert_eq!(key, Some(CauseKey::of::<Custom>())),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn failure_passed_as_error_stays_failure() {
        let subject = Subject::error(Failure::new("m", 1));
        assert!(subject.is_failure());
    }

    #[test]
    fn boxed_failure_is_recognized() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(Failure::new("m", 1));
        assert!(Subject::from(boxed).is_failure());
    }

    #[test]
    fn boxed_error_is_opaque() {
        let boxed: Box<dyn Error + Send + Sync> = Box::new(io::Error::other("x"));
        match Subject::from(boxed) {
            Subject::Error { key, error } => {
                assert!(key.is_none());
                assert_eq!(error.to_string(), "x");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn caused_by_uses_token() {
        let cause = crate::CauseId::declare("db");
        match Subject::caused_by(Custom, cause) {
            Subject::Error { key, .. } => assert_eq!(key, Some(CauseKey::Token(cause))),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn from_value_probes_in_order() {
        assert_eq!(Subject::from_value(Failure::new("m", 1)).kind(), "failure");
        assert_eq!(Subject::from_value(String::from("s")).kind(), "text");
        assert_eq!(Subject::from_value("s").kind(), "text");
        assert_eq!(Subject::from_value(Cow::Borrowed("s")).kind(), "text");
        let boxed: Box<dyn Error + Send + Sync> = Box::new(Custom);
        assert_eq!(Subject::from_value(boxed).kind(), "error");
        assert_eq!(Subject::from_value(vec![1, 2, 3]).kind(), "unknown");
    }

    #[test]
    fn caused_by_keeps_failures_unchanged() {
        let cause = crate::CauseId::declare("db");
        match Subject::caused_by(Failure::new("already normalized", 42), cause) {
            Subject::Failure(failure) => assert_eq!(failure, Failure::new("already normalized", 42)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn from_value_recognizes_std_errors() {
        match Subject::from_value(io::Error::other("disk on fire")) {
            Subject::Error { error, key } => {
                assert_eq!(error.to_string(), "disk on fire");
                assert_eq!(key, Some(CauseKey::of::<io::Error>()));
            }
            other => panic!("unexpected {:?}", other),
        }

        let parse = "x".parse::<i32>().unwrap_err();
        assert_eq!(Subject::from_value(parse).kind(), "error");
    }

    #[test]
    fn from_any_recognizes_std_errors() {
        let payload = std::panic::catch_unwind(|| {
            std::panic::panic_any(io::Error::other("disk on fire"));
        })
        .unwrap_err();
        match Subject::from_any(payload) {
            Subject::Error { error, key } => {
                assert_eq!(error.to_string(), "disk on fire");
                assert_eq!(key, Some(CauseKey::of::<io::Error>()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn subjects_clone() {
        let subject = Subject::from("boom");
        assert_eq!(subject.clone().kind(), subject.kind());
    }

    #[test]
    fn from_value_keeps_unknown_origin() {
        match Subject::from_value(7_u8) {
            Subject::Unknown(Some(value)) => assert_eq!(value.downcast_ref::<u8>(), Some(&7)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn from_any_handles_panic_payloads() {
        let payload = std::panic::catch_unwind(|| panic!("formatted {}", 1)).unwrap_err();
        match Subject::from_any(payload) {
            Subject::Text(text) => assert_eq!(text, "formatted 1"),
            other => panic!("unexpected {:?}", other),
        }

        let payload = std::panic::catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(Subject::from_any(payload).kind(), "text");

        let payload = std::panic::catch_unwind(|| {
            std::panic::panic_any(5_u32);
        })
        .unwrap_err();
        assert_eq!(Subject::from_any(payload).kind(), "unknown");
    }

    #[test]
    fn option_and_unit_map_to_nothing() {
        assert!(matches!(Subject::from(None::<&'static str>), Subject::Unknown(None)));
        assert!(matches!(Subject::from(()), Subject::Unknown(None)));
        assert_eq!(Subject::from(Some("x")).kind(), "text");
    }

    #[test]
    fn numbers_are_unknown() {
        assert_eq!(Subject::from(42_i32).kind(), "unknown");
        assert_eq!(Subject::from(1.5_f64).kind(), "unknown");
        assert_eq!(Subject::from(true).kind(), "unknown");
    }

    #[test]
    fn std_errors_are_errors() {
        let parse = "x".parse::<i32>().unwrap_err();
        match Subject::from(parse) {
            Subject::Error { key, .. } => {
                assert_eq!(key, Some(CauseKey::of::<std::num::ParseIntError>()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
