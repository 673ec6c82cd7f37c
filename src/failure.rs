//! The canonical failure value.
//!
//! Every error that passes through [`Classifier::wrap`](crate::Classifier::wrap)
//! comes out as a [`Failure`]: a numeric code applications switch on, a human
//! message, and optional extra context attached after construction.
//!
//! # Memory Model
//!
//! Text fields use `Cow<'static, str>` so that templates declared with
//! [`Failure::define`] cost nothing until decorated. Owned text is zeroized on
//! drop; borrowed text is static and left alone.
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::Failure;
//!
//! let failure = Failure::new("disk full", 1)
//!     .with_code(2)
//!     .with_message("while writing journal");
//!
//! assert_eq!(failure.code(), 2);
//! assert_eq!(failure.message_string(), "disk full !extra[ while writing journal ]");
//! ```

use crate::logging::FailureLog;
use std::any::Any;
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroize;

/// Type alias for Results carrying a [`Failure`].
pub type Result<T> = std::result::Result<T, Failure>;

/// The original value a [`Failure`] was produced from.
///
/// Kept for diagnostics only: it takes no part in equality and is never
/// serialized.
#[derive(Clone)]
pub enum Origin {
    /// A wrapped error value.
    Error(Arc<dyn Error + Send + Sync>),
    /// A wrapped plain string.
    Text(Arc<str>),
    /// Any other wrapped value.
    Value(Arc<dyn Any + Send + Sync>),
}

impl Origin {
    /// Short label naming the shape of the origin.
    #[inline]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Error(_) => "error",
            Self::Text(_) => "text",
            Self::Value(_) => "value",
        }
    }

    /// The origin as an error, if it was one.
    pub fn as_error(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Error(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// The origin as text, if it was a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_ref()),
            _ => None,
        }
    }

    /// Downcast an error origin to its concrete error type.
    pub fn downcast_error_ref<T: Error + 'static>(&self) -> Option<&T> {
        match self {
            Self::Error(err) => err.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Downcast a value origin to its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Value(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Value(_) => f.debug_tuple("Value").field(&"<opaque>").finish(),
        }
    }
}

/// Normalized failure: code, message and optional extra context.
#[must_use = "failures should be handled, hooked or escalated"]
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Failure {
    code: i32,
    message: Cow<'static, str>,
    #[cfg_attr(feature = "serde", serde(rename = "details", default))]
    extra_message: Option<Cow<'static, str>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    origin: Option<Origin>,
}

impl Failure {
    /// Create a failure with the given message and code.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>, code: i32) -> Self {
        Self {
            code,
            message: message.into(),
            extra_message: None,
            origin: None,
        }
    }

    /// Declare a reusable failure template.
    ///
    /// Same result as [`Failure::new`], but usable in `const` items:
    ///
    /// ```rust
    /// use wtf_errors::Failure;
    ///
    /// const NOT_FOUND: Failure = Failure::define("record not found", 404);
    /// assert_eq!(NOT_FOUND.code(), 404);
    /// ```
    #[inline]
    pub const fn define(message: &'static str, code: i32) -> Self {
        Self {
            code,
            message: Cow::Borrowed(message),
            extra_message: None,
            origin: None,
        }
    }

    /// Attach supplementary context, replacing any previous one.
    #[inline]
    pub fn with_message(mut self, extra: impl Into<Cow<'static, str>>) -> Self {
        if let Some(previous) = self.extra_message.as_mut() {
            zeroize_cow(previous);
        }
        self.extra_message = Some(extra.into());
        self
    }

    /// Overwrite the code.
    #[inline]
    pub fn with_code(mut self, code: i32) -> Self {
        self.code = code;
        self
    }

    #[inline]
    pub(crate) fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Application-defined code.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Primary message, without extra context.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Supplementary context, if any was attached.
    #[inline]
    pub fn extra_message(&self) -> Option<&str> {
        self.extra_message.as_deref()
    }

    /// The value this failure was wrapped from, if it was wrapped.
    #[inline]
    pub const fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// Render the message followed by `!extra[ .. ]` when extra context exists.
    pub fn message_string(&self) -> String {
        self.to_string()
    }

    /// Alias of [`Failure::message_string`].
    #[inline]
    pub fn error_text(&self) -> String {
        self.message_string()
    }

    /// Run every hook registered on the process-wide classifier.
    ///
    /// Hooks run in registration order; the failure is handed back unchanged.
    #[inline]
    pub fn hook(self) -> Self {
        crate::global().hook(self)
    }

    /// Abort the current thread with this failure as the panic payload.
    ///
    /// The payload downcasts back to `Failure`, so a `catch_unwind` boundary
    /// can recover it with [`Subject::from_any`](crate::Subject::from_any).
    pub fn panic(self) -> ! {
        std::panic::panic_any(self)
    }

    /// Borrowed structured view for log pipelines.
    ///
    /// The view cannot outlive the failure.
    #[inline]
    pub fn log_entry(&self) -> FailureLog<'_> {
        FailureLog {
            code: self.code,
            message: self.message(),
            extra_message: self.extra_message(),
            origin_kind: self.origin.as_ref().map(Origin::kind),
        }
    }

    /// Callback-style access to [`Failure::log_entry`].
    #[inline]
    pub fn with_log<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&FailureLog<'_>) -> R,
    {
        let log = self.log_entry();
        f(&log)
    }
}

/// True when `value` is a [`Failure`].
#[inline]
pub fn is_failure(value: &dyn Any) -> bool {
    value.is::<Failure>()
}

/// True when the error value is a [`Failure`].
#[inline]
pub fn is_failure_error(err: &(dyn Error + 'static)) -> bool {
    err.is::<Failure>()
}

fn zeroize_cow(value: &mut Cow<'static, str>) {
    if let Cow::Owned(s) = value {
        s.zeroize();
    }
}

impl Failure {
    fn wipe(&mut self) {
        zeroize_cow(&mut self.message);
        if let Some(extra) = self.extra_message.as_mut() {
            zeroize_cow(extra);
        }
        self.extra_message = None;
        self.origin = None;
    }
}

impl Drop for Failure {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.message == other.message
            && self.extra_message == other.extra_message
    }
}

impl Eq for Failure {}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("code", &self.code)
            .field("message", &self.message)
            .field("extra_message", &self.extra_message)
            .field("origin", &self.origin.as_ref().map(Origin::kind))
            .finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(extra) = &self.extra_message {
            write!(f, " !extra[ {} ]", extra)?;
        }
        Ok(())
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.origin {
            Some(Origin::Error(err)) => Some(err.as_ref() as &(dyn Error + 'static)),
            _ => None,
        }
    }
}
