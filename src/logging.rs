//! Structured log view of a [`Failure`](crate::Failure).
//!
//! The library never writes logs on its own. Callers that do log get a
//! borrowed view with an explicit lifetime: it cannot outlive the failure it
//! came from, and its writer bounds every field so a runaway message cannot
//! flood a log pipeline.
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::Failure;
//!
//! let failure = Failure::new("disk full", 507).with_message("journal");
//! let mut line = String::new();
//! failure.log_entry().write_to(&mut line).unwrap();
//!
//! assert_eq!(line, "[507] message='disk full' extra='journal'");
//! ```

use std::borrow::Cow;
use std::fmt;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings.
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Borrowed structured fields of a failure.
#[derive(Debug, Clone, Copy)]
pub struct FailureLog<'a> {
    /// Failure code
    pub code: i32,
    /// Primary message
    pub message: &'a str,
    /// Extra context, if attached
    pub extra_message: Option<&'a str>,
    /// Shape of the wrapped origin, if any
    pub origin_kind: Option<&'static str>,
}

impl FailureLog<'_> {
    /// Write a single bounded log line without intermediate allocation.
    ///
    /// Format: `[<code>] message='<m>'` followed by ` extra='<e>'` and
    /// ` origin=<kind>` when present.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "[{}] message='{}'",
            self.code,
            truncate_with_indicator(self.message)
        )?;

        if let Some(extra) = self.extra_message {
            write!(f, " extra='{}'", truncate_with_indicator(extra))?;
        }

        if let Some(kind) = self.origin_kind {
            write!(f, " origin={}", kind)?;
        }

        Ok(())
    }

    /// Failure code. Accessors return fields untruncated.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.code
    }

    /// Primary message.
    #[inline]
    pub const fn message(&self) -> &str {
        self.message
    }

    /// Extra context.
    #[inline]
    pub const fn extra_message(&self) -> Option<&str> {
        self.extra_message
    }

    /// Origin shape label.
    #[inline]
    pub const fn origin_kind(&self) -> Option<&'static str> {
        self.origin_kind
    }
}

impl fmt::Display for FailureLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Truncate a string to [`MAX_FIELD_OUTPUT_LEN`] on a UTF-8 boundary.
///
/// Borrows when no truncation is needed.
pub(crate) fn truncate_with_indicator(s: &str) -> Cow<'_, str> {
    if s.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(s);
    }

    let max_content_len = MAX_FIELD_OUTPUT_LEN.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
