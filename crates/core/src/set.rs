// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.C Set Registry — tracks in-flight named operations (encode / rebuild
//! / remove), their file lists, group communicators, and bound scheme.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::collab::ProcessGroup;
use crate::error::ErError;
use crate::id::{IdCounter, SchemeId, SetId};
use crate::scheme::SchemeRegistry;

/// Operation a set will perform on `Dispatch` (spec §6: stable wire values
/// ENCODE=1, REBUILD=2, REMOVE=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Direction {
    Encode = 1,
    Rebuild = 2,
    Remove = 3,
}

crate::simple_display! {
    Direction {
        Encode => "encode",
        Rebuild => "rebuild",
        Remove => "remove",
    }
}

/// Mutable in-flight handle for one encode/rebuild/remove operation
/// (spec §3).
pub struct Set<G: ProcessGroup> {
    pub(crate) name: String,
    pub(crate) direction: Direction,
    pub(crate) world: G,
    pub(crate) storage: G,
    pub(crate) files: Vec<PathBuf>,
    pub(crate) scheme_id: Option<SchemeId>,
    pub(crate) dispatched: bool,
}

impl<G: ProcessGroup> Set<G> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn world(&self) -> &G {
        &self.world
    }

    pub fn storage(&self) -> &G {
        &self.storage
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn scheme_id(&self) -> Option<SchemeId> {
        self.scheme_id
    }

    /// `<name>.er`: the metadata path prefix used by every pipeline
    /// (spec §4.D).
    pub fn metadata_prefix(&self) -> PathBuf {
        let mut s = std::ffi::OsString::from(&self.name);
        s.push(".er");
        PathBuf::from(s)
    }
}

pub struct SetRegistry<G: ProcessGroup> {
    counter: IdCounter,
    sets: HashMap<SetId, Set<G>>,
}

impl<G: ProcessGroup> Default for SetRegistry<G> {
    fn default() -> Self {
        Self { counter: IdCounter::new(), sets: HashMap::new() }
    }
}

impl<G: ProcessGroup> SetRegistry<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set. Rejects an empty name, an out-of-range direction wire
    /// value, or (for ENCODE) a `scheme_id` absent from `schemes`. REBUILD
    /// and REMOVE do not take a scheme — it is implied by on-disk metadata
    /// named by `name` (spec §4.C).
    pub fn create(
        &mut self,
        world: G,
        storage: G,
        name: &str,
        direction: Direction,
        scheme_id: Option<SchemeId>,
        schemes: &SchemeRegistry<G>,
    ) -> i64 {
        if name.is_empty() {
            tracing::debug!("rejecting set with empty name");
            return crate::id::FAIL;
        }

        if direction == Direction::Encode {
            let Some(scheme_id) = scheme_id else {
                tracing::debug!("ENCODE set requires a scheme id");
                return crate::id::FAIL;
            };
            if schemes.get(scheme_id).is_none() {
                tracing::debug!(%scheme_id, "ENCODE set references unknown scheme");
                return crate::id::FAIL;
            }
        }

        let id = SetId::from(self.counter.next());
        self.sets.insert(
            id,
            Set {
                name: name.to_string(),
                direction,
                world,
                storage,
                files: Vec::new(),
                scheme_id: if direction == Direction::Encode { scheme_id } else { None },
                dispatched: false,
            },
        );
        tracing::info!(set_id = %id, name, %direction, "set created");
        id.as_i64()
    }

    /// Append `path` to the set's ordered file list, resolving a relative
    /// path against the process's current working directory at call time
    /// (SPEC_FULL §4.C: `Dispatch` may run after the caller has changed
    /// directories, so a relative path must be anchored now rather than
    /// left to resolve against whatever directory happens to be current
    /// later). Only meaningful for ENCODE; other directions accept the call
    /// but ignore it, matching the original `ER_Add`'s unconditional
    /// success.
    pub fn add_file(&mut self, id: SetId, path: &str) -> Result<(), ErError> {
        if path.is_empty() {
            return Err(ErError::InvalidArgument("file path must not be empty".to_string()));
        }
        let set = self
            .sets
            .get_mut(&id)
            .ok_or_else(|| ErError::MissingReference(format!("set {id}")))?;

        if set.direction != Direction::Encode {
            return Ok(());
        }

        let as_path = std::path::Path::new(path);
        let resolved = if as_path.is_relative() {
            std::env::current_dir().map(|cwd| cwd.join(as_path)).unwrap_or_else(|_| as_path.to_path_buf())
        } else {
            as_path.to_path_buf()
        };
        set.files.push(resolved);
        Ok(())
    }

    /// Marks a set dispatched. Returns an error if it was already
    /// dispatched (spec §4.C: "Exactly one Dispatch per set id").
    pub fn mark_dispatched(&mut self, id: SetId) -> Result<(), ErError> {
        let set = self
            .sets
            .get_mut(&id)
            .ok_or_else(|| ErError::MissingReference(format!("set {id}")))?;
        if set.dispatched {
            return Err(ErError::InvalidArgument(format!("set {id} already dispatched")));
        }
        set.dispatched = true;
        Ok(())
    }

    pub fn get(&self, id: SetId) -> Option<&Set<G>> {
        self.sets.get(&id)
    }

    /// Release the record. Safe regardless of whether `Dispatch` succeeded
    /// (spec §4.C).
    pub fn free(&mut self, id: SetId) {
        self.sets.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
#[path = "set_tests.rs"]
mod tests;
