// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference `Shuffle`: association metadata sharded one file per rank
//! under `<path>.<rank>`, since the trait carries no general gather
//! primitive to consolidate it into a single manifest.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use er_core::collab::{ProcessGroup, Shuffle};
use er_core::error::ErError;

#[derive(Debug, Serialize, Deserialize)]
struct RankManifest {
    rank: i32,
    files: Vec<PathBuf>,
}

fn shard_path(path: &Path, rank: i32) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(format!(".{rank}"));
    PathBuf::from(s)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceShuffle;

impl ReferenceShuffle {
    pub fn new() -> Self {
        Self
    }
}

impl<G: ProcessGroup> Shuffle<G> for ReferenceShuffle {
    fn create(&self, world: &G, _storage: &G, files: &[PathBuf], path: &Path) -> Result<(), ErError> {
        let shard = shard_path(path, world.rank());
        let manifest = RankManifest { rank: world.rank(), files: files.to_vec() };
        let body = serde_json::to_vec(&manifest)
            .map_err(|err| ErError::CollaboratorFailure(format!("serialize shuffle manifest: {err}")))?;
        std::fs::write(&shard, body)
            .map_err(|err| ErError::CollaboratorFailure(format!("write {}: {err}", shard.display())))?;
        world.barrier();
        Ok(())
    }

    fn migrate(&self, world: &G, _storage: &G, path: &Path) -> Result<(), ErError> {
        for rank in 0..world.size() {
            let shard = shard_path(path, rank);
            if !shard.exists() {
                tracing::warn!(path = %shard.display(), rank, "shuffle manifest shard missing at migrate time");
            }
        }
        Ok(())
    }

    fn remove(&self, world: &G, _storage: &G, path: &Path) -> Result<(), ErError> {
        let shard = shard_path(path, world.rank());
        match std::fs::remove_file(&shard) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ErError::CollaboratorFailure(format!("remove {}: {err}", shard.display()))),
        }
    }
}

#[cfg(test)]
#[path = "shuffle_tests.rs"]
mod tests;
