//! Bounded journal of hooked failures.
//!
//! A [`HookJournal`] keeps the most recent failures passed to a hook, oldest
//! evicted first. Register it with [`HookJournal::as_hook`] to get an
//! in-memory record of every signaled failure without any output channel.
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::{Classifier, Failure, HookJournal};
//!
//! let classifier = Classifier::new();
//! let journal = HookJournal::new(100, 1024);
//! classifier.add_unknown_error_hook_failure(journal.as_hook());
//!
//! let _ = classifier.hook(Failure::new("disk full", 507));
//!
//! let recent = journal.get_recent(1);
//! assert_eq!(recent[0].code, 507);
//! assert_eq!(recent[0].message.as_ref(), "disk full");
//! ```

use crate::Failure;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

const TRUNCATION_INDICATOR: &str = "...[TRUNC]";

/// A single journal entry with bounded size.
#[derive(Clone, Debug)]
pub struct JournalEntry {
    /// Unix timestamp (seconds) at recording time
    pub timestamp: u64,
    /// Failure code
    pub code: i32,
    /// Primary message, possibly truncated
    pub message: Arc<str>,
    /// Extra message, possibly truncated or dropped when the budget is spent
    pub extra_message: Option<Arc<str>>,
    /// Shape of the wrapped origin, if any
    pub origin_kind: Option<&'static str>,
    /// Payload size in bytes
    pub size_bytes: usize,
}

/// Recently hooked failures. Clones share the same entries.
#[derive(Clone)]
pub struct HookJournal {
    entries: Arc<RwLock<VecDeque<JournalEntry>>>,
    max_entries: usize,
    max_entry_bytes: usize,
    eviction_count: Arc<AtomicU64>,
}

impl HookJournal {
    /// Create a journal holding at most `max_entries` entries of at most
    /// `max_entry_bytes` payload each. A zero capacity is raised to one.
    pub fn new(max_entries: usize, max_entry_bytes: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
            max_entry_bytes,
            eviction_count: Arc::new(AtomicU64::new(0)),
        }
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, VecDeque<JournalEntry>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, VecDeque<JournalEntry>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Hook callback recording into this journal.
    pub fn as_hook(&self) -> impl Fn(&Failure) + Send + Sync + 'static {
        let journal = self.clone();
        move |failure: &Failure| journal.record(failure)
    }

    /// Record a failure, evicting the oldest entry when full.
    pub fn record(&self, failure: &Failure) {
        let entry = self.create_entry(failure);

        let mut entries = self.write_entries();
        if entries.len() >= self.max_entries {
            entries.pop_front();
            self.eviction_count.fetch_add(1, Ordering::Relaxed);
        }
        entries.push_back(entry);
    }

    fn create_entry(&self, failure: &Failure) -> JournalEntry {
        failure.with_log(|log| {
            let message = truncate_to_bytes(log.message(), self.max_entry_bytes);
            let mut remaining = self.max_entry_bytes - message.len();

            let extra_message = log.extra_message().and_then(|extra| {
                if remaining == 0 {
                    return None;
                }
                let extra = truncate_to_bytes(extra, remaining);
                remaining -= extra.len();
                Some(Arc::<str>::from(extra.as_ref()))
            });

            JournalEntry {
                timestamp: SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| d.as_secs()),
                code: log.code(),
                message: Arc::from(message.as_ref()),
                extra_message,
                origin_kind: log.origin_kind(),
                size_bytes: self.max_entry_bytes - remaining,
            }
        })
    }

    /// The `count` most recent entries, newest first.
    pub fn get_recent(&self, count: usize) -> Vec<JournalEntry> {
        self.read_entries().iter().rev().take(count).cloned().collect()
    }

    /// All entries, newest first.
    pub fn get_all(&self) -> Vec<JournalEntry> {
        self.read_entries().iter().rev().cloned().collect()
    }

    /// Number of entries currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    /// True when nothing has been recorded since creation or the last clear.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries evicted since creation.
    #[inline]
    pub fn eviction_count(&self) -> u64 {
        self.eviction_count.load(Ordering::Relaxed)
    }

    /// Drop every entry. The eviction count is kept.
    pub fn clear(&self) {
        self.write_entries().clear();
    }

    /// Maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}

impl std::fmt::Debug for HookJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookJournal")
            .field("len", &self.len())
            .field("capacity", &self.max_entries)
            .field("max_entry_bytes", &self.max_entry_bytes)
            .field("evictions", &self.eviction_count())
            .finish()
    }
}

/// Truncate to at most `max_bytes`, respecting UTF-8 boundaries.
fn truncate_to_bytes(s: &str, max_bytes: usize) -> Cow<'_, str> {
    if s.len() <= max_bytes {
        return Cow::Borrowed(s);
    }
    if max_bytes <= TRUNCATION_INDICATOR.len() {
        return Cow::Borrowed(&TRUNCATION_INDICATOR[..max_bytes]);
    }

    let mut idx = max_bytes - TRUNCATION_INDICATOR.len();
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    let mut out = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    out.push_str(&s[..idx]);
    out.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(out)
}
