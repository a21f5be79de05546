// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Disk-backed `KvStore`, one JSON object per path, written through a
//! temp-file-then-rename so a crash mid-write never leaves a torn file
//! (the same durability idiom `oj-daemon`'s snapshot rotation relies on
//! `fs::rename` for).

use std::collections::BTreeMap;
use std::path::Path;

use er_core::collab::KvStore;
use er_core::error::ErError;

/// Each `path` maps to its own small JSON object of integer key/value pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonKvStore;

impl JsonKvStore {
    pub fn new() -> Self {
        Self
    }

    fn write_atomically(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let tmp = path.with_extension(match path.extension() {
            Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
            None => "tmp".to_string(),
        });
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, path)
    }
}

impl KvStore for JsonKvStore {
    fn write_file(&self, path: &Path, entries: &[(&str, i64)]) -> Result<(), ErError> {
        let map: BTreeMap<&str, i64> = entries.iter().copied().collect();
        let body = serde_json::to_vec_pretty(&map)
            .map_err(|err| ErError::CollaboratorFailure(format!("serialize {}: {err}", path.display())))?;
        self.write_atomically(path, &body)
            .map_err(|err| ErError::CollaboratorFailure(format!("write {}: {err}", path.display())))
    }

    fn read_file(&self, path: &Path) -> Vec<(String, i64)> {
        let Ok(text) = std::fs::read_to_string(path) else {
            return Vec::new();
        };
        match serde_json::from_str::<BTreeMap<String, i64>>(&text) {
            Ok(map) => map.into_iter().collect(),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "kv file not valid JSON, treating as empty");
                Vec::new()
            }
        }
    }

    fn remove_file(&self, path: &Path) -> Result<(), ErError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ErError::CollaboratorFailure(format!("remove {}: {err}", path.display()))),
        }
    }
}

#[cfg(test)]
#[path = "kv_tests.rs"]
mod tests;
