//! Classifier configuration.
//!
//! A [`Config`] carries the two values every fallback path needs: the code
//! stamped on failures that have no better one, and the message used when the
//! wrapped value carries no text at all. It is replaced wholesale, never
//! patched field by field.
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::{Classifier, Config};
//!
//! let classifier = Classifier::new();
//! classifier.configure(Config::new(500, "oops").unwrap());
//!
//! let failure = classifier.default_failure();
//! assert_eq!(failure.code(), 500);
//! assert_eq!(failure.message(), "oops");
//! ```

use std::borrow::Cow;
use std::fmt;

/// Code used when no configuration has been supplied.
pub const DEFAULT_ERROR_CODE: i32 = 100;

/// Message used for unrecognized values when no configuration has been supplied.
pub const WRAP_UNKNOWN_MESSAGE: &str = "Unknown Failure";

/// Default code and fallback message for a [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConfig"))]
pub struct Config {
    default_error_code: i32,
    wrap_unknown_message: Cow<'static, str>,
}

impl Config {
    /// Build a configuration, rejecting a blank unknown message.
    ///
    /// A blank message would let `wrap` hand out failures with nothing to say,
    /// so it is refused here rather than patched later.
    pub fn new(
        default_error_code: i32,
        wrap_unknown_message: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ConfigError> {
        let wrap_unknown_message = wrap_unknown_message.into();
        if wrap_unknown_message.trim().is_empty() {
            return Err(ConfigError::EmptyUnknownMessage);
        }
        Ok(Self {
            default_error_code,
            wrap_unknown_message,
        })
    }

    /// Code stamped on failures built from errors, strings and unknown values.
    #[inline]
    pub const fn default_error_code(&self) -> i32 {
        self.default_error_code
    }

    /// Message used when the wrapped value has no usable text.
    #[inline]
    pub fn wrap_unknown_message(&self) -> &str {
        self.wrap_unknown_message.as_ref()
    }

    pub(crate) fn unknown_message(&self) -> Cow<'static, str> {
        self.wrap_unknown_message.clone()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_error_code: DEFAULT_ERROR_CODE,
            wrap_unknown_message: Cow::Borrowed(WRAP_UNKNOWN_MESSAGE),
        }
    }
}

/// Wire shape accepted by the `serde` feature before validation.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawConfig {
    #[serde(default = "raw_default_code")]
    default_error_code: i32,
    #[serde(default = "raw_default_message")]
    wrap_unknown_message: String,
}

#[cfg(feature = "serde")]
fn raw_default_code() -> i32 {
    DEFAULT_ERROR_CODE
}

#[cfg(feature = "serde")]
fn raw_default_message() -> String {
    WRAP_UNKNOWN_MESSAGE.to_owned()
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.default_error_code, raw.wrap_unknown_message)
    }
}

/// Configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `wrap_unknown_message` was empty or whitespace only.
    EmptyUnknownMessage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUnknownMessage => {
                write!(f, "wrap_unknown_message must not be empty")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
