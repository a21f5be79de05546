// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Monotonic integer identifiers for schemes and sets.
//!
//! Unlike `oj-core`'s nanoid-based IDs, scheme and set identifiers here are
//! small dense integers assigned by a per-process counter, per spec: "Scheme
//! ids and set ids are unique and never reused within a process." Negative
//! values (the `FAIL` sentinel, -1) are never produced by the counter.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Sentinel returned in place of an id when a `Create*` call fails.
pub const FAIL: i64 = -1;

/// Define a newtype wrapper around a monotonically increasing `i64`.
///
/// Generates `Display`, `From<i64>`, and `as_i64()` for the id type, plus a
/// paired `Counter` type that hands out values starting at 1.
///
/// ```ignore
/// crate::define_numeric_id! {
///     pub struct SchemeId;
/// }
/// ```
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i64);

        impl $name {
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }
    };
}

define_numeric_id! {
    /// Identifier for a registered redundancy scheme.
    pub struct SchemeId;
}

define_numeric_id! {
    /// Identifier for an in-flight encode/rebuild/remove set.
    pub struct SetId;
}

/// Hands out monotonically increasing ids starting at 1, never reusing a
/// value even after the id it named has been freed.
#[derive(Debug, Default)]
pub struct IdCounter(AtomicI64);

impl IdCounter {
    pub const fn new() -> Self {
        Self(AtomicI64::new(0))
    }

    /// Returns the next id in the sequence (1, 2, 3, ...).
    pub fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
