// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block-level erasure/replication codec collaborator (spec §6).

use crate::config::ErConfig;
use crate::error::ErError;
use std::path::{Path, PathBuf};

use super::group::ProcessGroup;

/// Redundancy scheme variant, derived from `(data_blocks, erasure_blocks)`
/// per spec §3: `SINGLE if E=0, PARTNER if E=D, XOR if E=1, else
/// unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecVariant {
    /// No redundancy: files are merely tracked, never duplicated.
    Single,
    /// Each block is fully duplicated onto a partner process.
    Partner,
    /// A single XOR parity block protects the whole group.
    Xor,
}

crate::simple_display! {
    CodecVariant {
        Single => "single",
        Partner => "partner",
        Xor => "xor",
    }
}

/// Opaque handle to a codec-owned descriptor (a redundancy scheme instance,
/// or a rebuilt-from-disk descriptor). The core never inspects its value;
/// it only threads it back into later codec calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecHandle(pub u64);

/// Block-level erasure/replication codec, applied across a scheme's
/// communicator.
///
/// Every method is collective: it must return the same success/failure
/// value on every participating rank (spec §5 "collaborators are required
/// to make their success/failure value rank-consistent").
pub trait Codec<G: ProcessGroup> {
    /// Called once at `Init`, before any scheme is created. The default
    /// no-op suits a collaborator with nothing to set up.
    fn init(&self, _config: &ErConfig) -> Result<(), ErError> {
        Ok(())
    }

    /// Called once at `Finalize`, regardless of whether live schemes/sets
    /// caused `Finalize` itself to report failure (spec §7
    /// `FinalizeWithLiveHandles`: "collaborators still finalized").
    fn finalize(&self) -> Result<(), ErError> {
        Ok(())
    }

    /// Allocate a descriptor for `variant` over `comm`, grouping processes
    /// that share `failure_domain` as a single point of failure.
    fn create(
        &self,
        variant: CodecVariant,
        comm: &G,
        failure_domain: &str,
    ) -> Result<CodecHandle, ErError>;

    /// Destroy a descriptor previously returned by `create` or `recover`.
    fn delete(&self, desc: CodecHandle) -> Result<(), ErError>;

    /// Apply redundancy across `files`, writing redundancy data under
    /// `redset_path` (plus any codec-internal sibling files).
    fn apply(&self, files: &[PathBuf], redset_path: &Path, desc: CodecHandle) -> Result<(), ErError>;

    /// List the redundancy files produced by a prior `apply` at
    /// `redset_path`.
    fn filelist(&self, redset_path: &Path, desc: CodecHandle) -> Result<Vec<PathBuf>, ErError>;

    /// Reconstruct a descriptor from on-disk redundancy data at
    /// `redset_path`, rebuilding any missing application or redundancy
    /// files from surviving data.
    fn recover(&self, comm: &G, redset_path: &Path) -> Result<CodecHandle, ErError>;

    /// Delete the redundancy files produced by `apply` at `redset_path`.
    fn unapply(&self, redset_path: &Path, desc: CodecHandle) -> Result<(), ErError>;
}
