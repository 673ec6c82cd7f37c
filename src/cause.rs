//! Cause identity for the default-case registry.
//!
//! A registered default case is found by *who* the error is, never by what it
//! says. Two identities exist:
//!
//! - [`CauseKey::Type`]: the concrete Rust type of the error. Every value of
//!   `io::Error` shares one identity, and a different type printing the same
//!   text does not.
//! - [`CauseKey::Token`]: an explicitly declared [`CauseId`]. Each call to
//!   [`CauseId::declare`] yields a fresh identity, so two causes with the same
//!   label stay distinct.
//!
//! # Example
//!
//! ```rust
//! use wtf_errors::{CauseId, CauseKey};
//!
//! let timeout = CauseId::declare("upstream timeout");
//! let other = CauseId::declare("upstream timeout");
//!
//! assert_ne!(timeout, other);
//! assert_ne!(CauseKey::from(timeout), CauseKey::of::<std::io::Error>());
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique token ids. Zero is never handed out.
static NEXT_CAUSE_ID: AtomicU64 = AtomicU64::new(1);

/// Explicitly declared cause token.
///
/// Equality is by the numeric id alone; the label is for humans.
#[derive(Clone, Copy)]
pub struct CauseId {
    id: u64,
    label: &'static str,
}

impl CauseId {
    /// Declare a new, globally unique cause.
    #[inline]
    pub fn declare(label: &'static str) -> Self {
        Self {
            id: NEXT_CAUSE_ID.fetch_add(1, Ordering::Relaxed),
            label,
        }
    }

    /// Numeric identity of this cause.
    #[inline]
    pub const fn id(self) -> u64 {
        self.id
    }

    /// Human label given at declaration.
    #[inline]
    pub const fn label(self) -> &'static str {
        self.label
    }
}

impl PartialEq for CauseId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CauseId {}

impl std::hash::Hash for CauseId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CauseId({}, {:?})", self.id, self.label)
    }
}

impl fmt::Display for CauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

/// Key of the default-case registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CauseKey {
    /// Identity of a concrete error type.
    Type(TypeId),
    /// Identity of a declared cause token.
    Token(CauseId),
}

impl CauseKey {
    /// Key for every error of type `E`.
    #[inline]
    pub fn of<E: Any + ?Sized>() -> Self {
        Self::Type(TypeId::of::<E>())
    }

    /// Key for the concrete type of `value`.
    #[inline]
    pub fn of_val<E: Any>(_value: &E) -> Self {
        Self::of::<E>()
    }
}

impl From<CauseId> for CauseKey {
    fn from(id: CauseId) -> Self {
        Self::Token(id)
    }
}

impl From<&CauseId> for CauseKey {
    fn from(id: &CauseId) -> Self {
        Self::Token(*id)
    }
}
