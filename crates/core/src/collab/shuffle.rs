// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File-shuffle (process-to-file association and redistribution)
//! collaborator (spec §6).

use crate::config::ErConfig;
use crate::error::ErError;
use std::path::{Path, PathBuf};

use super::group::ProcessGroup;

/// Records which process owns which files, and redistributes files back to
/// their owning rank after a rank-to-node remapping.
///
/// As with [`Codec`](super::Codec), every method is collective and must
/// return a rank-consistent result.
pub trait Shuffle<G: ProcessGroup> {
    /// Called once at `Init`.
    fn init(&self, _config: &ErConfig) -> Result<(), ErError> {
        Ok(())
    }

    /// Called once at `Finalize`, always, per spec §7
    /// `FinalizeWithLiveHandles`.
    fn finalize(&self) -> Result<(), ErError> {
        Ok(())
    }

    /// Durably record that the calling process owns `files`, keyed by
    /// `world`/`storage` rank, at `path`.
    fn create(&self, world: &G, storage: &G, files: &[PathBuf], path: &Path) -> Result<(), ErError>;

    /// Redistribute surviving files back to the ranks that owned them at
    /// `create` time, even if the rank-to-node mapping has since changed.
    fn migrate(&self, world: &G, storage: &G, path: &Path) -> Result<(), ErError>;

    /// Delete the association record at `path`.
    fn remove(&self, world: &G, storage: &G, path: &Path) -> Result<(), ErError>;
}
