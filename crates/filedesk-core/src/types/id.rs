//! Newtype wrappers around `u64` for record identifiers, plus the
//! monotonic sequences that allocate them.
//!
//! Using distinct types prevents accidentally passing a `FolderId` where a
//! `FileId` is expected. Ids are handed out by an [`IdSequence`] rather
//! than derived from the wall clock, so two records created in the same
//! tick never collide.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `u64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an identifier from a raw value.
            pub const fn from_raw(raw: u64) -> Self {
                Self(raw)
            }

            /// Return the inner value.
            pub const fn into_raw(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> u64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a file record.
    FileId
);

define_id!(
    /// Unique identifier for a folder.
    FolderId
);

define_id!(
    /// Unique identifier for a notification.
    NotificationId
);

/// Thread-safe monotonic id allocator.
///
/// Every call to [`IdSequence::next`] returns a value strictly greater than
/// the previous one, starting at the configured first value.
#[derive(Debug)]
pub struct IdSequence<T> {
    next: AtomicU64,
    _marker: PhantomData<fn() -> T>,
}

impl<T: From<u64>> IdSequence<T> {
    /// Create a sequence whose first id is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
            _marker: PhantomData,
        }
    }

    /// Allocate the next id.
    pub fn next(&self) -> T {
        T::from(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl<T: From<u64>> Default for IdSequence<T> {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
