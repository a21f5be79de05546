// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference `Codec`. Each `apply()` writes a self-contained backup of its
//! own application files into the redundancy file itself; `recover()`
//! reads that backup back. This is sufficient to exercise the core's
//! dispatch pipelines and the byte-identical-rebuild property (spec §8
//! invariant 5) without a real distributed erasure/replication transport,
//! which is explicitly out of scope (spec §1).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use er_core::collab::{Codec, CodecHandle, CodecVariant, ProcessGroup};
use er_core::error::ErError;

fn variant_tag(variant: CodecVariant) -> &'static str {
    match variant {
        CodecVariant::Single => "single",
        CodecVariant::Partner => "partner",
        CodecVariant::Xor => "xor",
    }
}

fn variant_from_tag(tag: &str) -> Result<CodecVariant, ErError> {
    match tag {
        "single" => Ok(CodecVariant::Single),
        "partner" => Ok(CodecVariant::Partner),
        "xor" => Ok(CodecVariant::Xor),
        other => Err(ErError::CollaboratorFailure(format!("unknown codec variant tag: {other}"))),
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FileBackup {
    path: PathBuf,
    bytes: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RedundancyManifest {
    variant: String,
    entries: Vec<FileBackup>,
}

#[derive(Debug, Clone, Copy)]
struct Descriptor {
    variant: CodecVariant,
}

/// In-process reference codec. Descriptor handles are process-local: each
/// rank allocates its own, since the core never inspects a handle's value,
/// only threads it back into later calls on the same process.
#[derive(Clone, Default)]
pub struct ReferenceCodec {
    descriptors: Arc<Mutex<HashMap<u64, Descriptor>>>,
    next_handle: Arc<Mutex<u64>>,
}

impl ReferenceCodec {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&self, variant: CodecVariant) -> CodecHandle {
        let mut next = self.next_handle.lock();
        let id = *next;
        *next += 1;
        drop(next);
        self.descriptors.lock().insert(id, Descriptor { variant });
        CodecHandle(id)
    }

    fn variant_of(&self, desc: CodecHandle) -> Result<CodecVariant, ErError> {
        self.descriptors
            .lock()
            .get(&desc.0)
            .map(|d| d.variant)
            .ok_or_else(|| ErError::MissingReference(format!("codec descriptor {}", desc.0)))
    }
}

impl<G: ProcessGroup> Codec<G> for ReferenceCodec {
    fn create(&self, variant: CodecVariant, _comm: &G, _failure_domain: &str) -> Result<CodecHandle, ErError> {
        Ok(self.alloc(variant))
    }

    fn delete(&self, desc: CodecHandle) -> Result<(), ErError> {
        self.descriptors
            .lock()
            .remove(&desc.0)
            .map(|_| ())
            .ok_or_else(|| ErError::MissingReference(format!("codec descriptor {}", desc.0)))
    }

    fn apply(&self, files: &[PathBuf], redset_path: &Path, desc: CodecHandle) -> Result<(), ErError> {
        let variant = self.variant_of(desc)?;
        if variant == CodecVariant::Single {
            return Ok(());
        }

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let bytes = std::fs::read(path)
                .map_err(|err| ErError::CollaboratorFailure(format!("read {}: {err}", path.display())))?;
            entries.push(FileBackup { path: path.clone(), bytes });
        }
        let manifest = RedundancyManifest { variant: variant_tag(variant).to_string(), entries };
        let body = serde_json::to_vec(&manifest)
            .map_err(|err| ErError::CollaboratorFailure(format!("serialize redundancy manifest: {err}")))?;
        std::fs::write(redset_path, body)
            .map_err(|err| ErError::CollaboratorFailure(format!("write {}: {err}", redset_path.display())))
    }

    fn filelist(&self, redset_path: &Path, desc: CodecHandle) -> Result<Vec<PathBuf>, ErError> {
        match self.variant_of(desc)? {
            CodecVariant::Single => Ok(Vec::new()),
            CodecVariant::Partner | CodecVariant::Xor => Ok(vec![redset_path.to_path_buf()]),
        }
    }

    fn recover(&self, _comm: &G, redset_path: &Path) -> Result<CodecHandle, ErError> {
        let body = std::fs::read(redset_path).map_err(|err| {
            ErError::CollaboratorFailure(format!("read {}: {err}", redset_path.display()))
        })?;
        let manifest: RedundancyManifest = serde_json::from_slice(&body)
            .map_err(|err| ErError::CollaboratorFailure(format!("parse redundancy manifest: {err}")))?;
        let variant = variant_from_tag(&manifest.variant)?;

        for entry in &manifest.entries {
            if !entry.path.exists() {
                if let Some(parent) = entry.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).map_err(|err| {
                            ErError::CollaboratorFailure(format!("mkdir {}: {err}", parent.display()))
                        })?;
                    }
                }
                std::fs::write(&entry.path, &entry.bytes).map_err(|err| {
                    ErError::CollaboratorFailure(format!("restore {}: {err}", entry.path.display()))
                })?;
            }
        }

        Ok(self.alloc(variant))
    }

    fn unapply(&self, redset_path: &Path, desc: CodecHandle) -> Result<(), ErError> {
        if self.variant_of(desc)? == CodecVariant::Single {
            return Ok(());
        }
        match std::fs::remove_file(redset_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ErError::CollaboratorFailure(format!("remove {}: {err}", redset_path.display()))),
        }
    }
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
