//! The classifier: configuration, default cases, hooks and `wrap`.
//!
//! A [`Classifier`] owns its own copies of the three tables that drive
//! normalization. Independent instances share nothing, so tests and
//! subsystems can run side by side; the crate-level free functions operate on
//! one process-wide instance (see [`global`](crate::global)).
//!
//! # Concurrency
//!
//! Each table sits behind its own `RwLock`. `wrap` only takes read locks, so
//! concurrent wraps never block one another. A poisoned lock is recovered
//! rather than propagated: the tables hold plain data and stay consistent
//! across a panicking writer.
//!
//! Hooks are cloned out of the registry before they run, so a hook may itself
//! register cases, reconfigure, or wrap.
//!
//! # Example
//!
//! ```rust
//! use std::io;
//! use wtf_errors::{Classifier, Subject};
//!
//! let classifier = Classifier::new();
//! classifier.add_default_case_for::<io::Error>("storage unavailable", 503);
//!
//! let failure = classifier.wrap(io::Error::other("connection reset"));
//! assert_eq!(failure.code(), 503);
//! assert_eq!(failure.message(), "storage unavailable");
//!
//! let failure = classifier.wrap("plain text");
//! assert_eq!(failure.code(), 100);
//! ```

use crate::{CauseKey, Config, Failure, Origin, Subject};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Observer invoked by [`Classifier::hook`].
pub type Hook = Arc<dyn Fn(&Failure) + Send + Sync>;

type HookList = SmallVec<[Hook; 4]>;

#[inline]
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[inline]
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Normalizes arbitrary values into [`Failure`]s.
pub struct Classifier {
    config: RwLock<Config>,
    defaults: RwLock<HashMap<CauseKey, Failure>>,
    hooks: RwLock<HookList>,
}

impl Classifier {
    /// Create a classifier with the default configuration and empty registries.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a classifier with the given configuration and empty registries.
    pub fn with_config(config: Config) -> Self {
        Self {
            config: RwLock::new(config),
            defaults: RwLock::new(HashMap::new()),
            hooks: RwLock::new(SmallVec::new()),
        }
    }

    /// Replace the configuration wholesale.
    ///
    /// Affects later `default_failure` and `wrap` calls only; failures built
    /// before the call keep their code and message.
    pub fn configure(&self, config: Config) {
        *write(&self.config) = config;
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> Config {
        read(&self.config).clone()
    }

    /// The "don't know what happened" failure for the active configuration.
    pub fn default_failure(&self) -> Failure {
        let config = read(&self.config);
        Failure::new(config.unknown_message(), config.default_error_code())
    }

    /// Register, or overwrite, the failure presented for a known cause.
    pub fn add_default_case_failure(
        &self,
        cause: impl Into<CauseKey>,
        message: impl Into<Cow<'static, str>>,
        code: i32,
    ) {
        self.add_default_case(cause, Failure::new(message, code));
    }

    /// Register, or overwrite, a prebuilt template for a known cause.
    ///
    /// Templates typically come from [`Failure::define`]. Any origin on the
    /// template is replaced by the wrapped error when the case matches.
    pub fn add_default_case(&self, cause: impl Into<CauseKey>, template: Failure) {
        write(&self.defaults).insert(cause.into(), template);
    }

    /// Register a default case for every error of type `E`.
    pub fn add_default_case_for<E>(&self, message: impl Into<Cow<'static, str>>, code: i32)
    where
        E: Error + 'static,
    {
        self.add_default_case_failure(CauseKey::of::<E>(), message, code);
    }

    /// Append an observer run by [`Classifier::hook`]. Never deduplicates.
    pub fn add_unknown_error_hook_failure<F>(&self, hook: F)
    where
        F: Fn(&Failure) + Send + Sync + 'static,
    {
        write(&self.hooks).push(Arc::new(hook));
    }

    /// Number of registered default cases.
    pub fn default_case_count(&self) -> usize {
        read(&self.defaults).len()
    }

    /// Number of registered hooks.
    pub fn hook_count(&self) -> usize {
        read(&self.hooks).len()
    }

    /// Run every registered hook on `failure`, in registration order.
    ///
    /// The failure is handed back unchanged.
    pub fn hook(&self, failure: Failure) -> Failure {
        let hooks: HookList = read(&self.hooks).clone();
        for hook in &hooks {
            hook(&failure);
        }
        failure
    }

    /// Classify `input` and produce its canonical failure.
    ///
    /// Total: every input yields a failure with a non-empty message.
    ///
    /// 1. A `Failure` is returned unchanged.
    /// 2. An error whose cause is registered yields that case's failure;
    ///    otherwise its text under the default code.
    /// 3. A string yields itself under the default code.
    /// 4. Anything else yields the configured unknown message.
    ///
    /// Empty error or string text falls back to the unknown message.
    pub fn wrap(&self, input: impl Into<Subject>) -> Failure {
        match input.into() {
            Subject::Failure(failure) => failure,
            Subject::Error { error, key } => {
                if let Some(key) = key {
                    let defaults = read(&self.defaults);
                    if let Some(template) = defaults.get(&key) {
                        return template.clone().with_origin(Origin::Error(error));
                    }
                }
                let text = error.to_string();
                self.text_failure(text, Origin::Error(error))
            }
            Subject::Text(text) => {
                let origin = Origin::Text(Arc::<str>::from(&*text));
                self.text_failure(text, origin)
            }
            Subject::Unknown(value) => {
                let failure = self.default_failure();
                match value {
                    Some(value) => failure.with_origin(Origin::Value(value)),
                    None => failure,
                }
            }
        }
    }

    fn text_failure(&self, text: impl Into<Cow<'static, str>>, origin: Origin) -> Failure {
        let text = text.into();
        let config = read(&self.config);
        let message = if text.trim().is_empty() {
            config.unknown_message()
        } else {
            text
        };
        Failure::new(message, config.default_error_code()).with_origin(origin)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("config", &*read(&self.config))
            .field("default_cases", &self.default_case_count())
            .field("hooks", &self.hook_count())
            .finish()
    }
}
