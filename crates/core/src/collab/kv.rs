// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable key/value serializer collaborator (spec §6), used by the state
//! file component to persist a single `STATE` integer per storage group.

use crate::config::ErConfig;
use crate::error::ErError;
use std::path::Path;

/// A small durable key/value file. The core only ever stores a single
/// integer key (`STATE`) through this trait, but the contract is general —
/// matching the real serializer's "typed get/set of integers, strings, and
/// opaque pointers keyed by string" (spec §6).
pub trait KvStore {
    /// Called once at `Init`.
    fn init(&self, _config: &ErConfig) -> Result<(), ErError> {
        Ok(())
    }

    /// Called once at `Finalize`, always, per spec §7
    /// `FinalizeWithLiveHandles`.
    fn finalize(&self) -> Result<(), ErError> {
        Ok(())
    }

    /// Overwrite `path` with the given integer key/value pairs.
    fn write_file(&self, path: &Path, entries: &[(&str, i64)]) -> Result<(), ErError>;

    /// Read integer key/value pairs from `path`. Per spec §4.A, a missing
    /// or unreadable file is reported as an empty set rather than an error
    /// — the caller treats "no STATE key" as NULL.
    fn read_file(&self, path: &Path) -> Vec<(String, i64)>;

    /// Remove `path` if present. Used by the REMOVE pipeline to unlink the
    /// state file once its storage-group leader has finished.
    fn remove_file(&self, path: &Path) -> Result<(), ErError>;
}
