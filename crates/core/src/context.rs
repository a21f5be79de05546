// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §6 caller-facing surface: `Init`, `Finalize`, `CreateScheme`,
//! `FreeScheme`, `CreateSet`, `AddFile`, `Dispatch`, `Test`, `Wait`,
//! `FreeSet`. This is a thin layer over the typed registries and
//! dispatcher in the rest of the crate, the same way `oj-wire` wraps
//! `oj-core`'s typed results for its own protocol surface.

use std::path::Path;

use crate::collab::{Codec, KvStore, ProcessGroup, Shuffle};
use crate::config::ErConfig;
use crate::dispatch;
use crate::error::ErError;
use crate::id::{SchemeId, SetId};
use crate::scheme::SchemeRegistry;
use crate::set::{Direction, SetRegistry};

/// One process's handle onto the coordinator. Created by [`ErContext::init`],
/// torn down by [`ErContext::finalize`]; the registries it owns track every
/// scheme/set live in this process (spec §5 "shared resources").
pub struct ErContext<G: ProcessGroup> {
    #[allow(dead_code)]
    config: ErConfig,
    codec: Box<dyn Codec<G>>,
    shuffle: Box<dyn Shuffle<G>>,
    kv: Box<dyn KvStore>,
    schemes: SchemeRegistry<G>,
    sets: SetRegistry<G>,
}

impl<G: ProcessGroup> ErContext<G> {
    /// `Init(config_path)`. Loads configuration (tolerant of a missing or
    /// malformed file, spec §6) and hands it, unopened, to each
    /// collaborator's own `init`.
    pub fn init(
        config_path: Option<&Path>,
        codec: Box<dyn Codec<G>>,
        shuffle: Box<dyn Shuffle<G>>,
        kv: Box<dyn KvStore>,
    ) -> Result<Self, ErError> {
        let config = ErConfig::load(config_path);
        codec.init(&config)?;
        shuffle.init(&config)?;
        kv.init(&config)?;
        tracing::info!("er context initialized");
        Ok(Self { config, codec, shuffle, kv, schemes: SchemeRegistry::new(), sets: SetRegistry::new() })
    }

    /// `Finalize()`. Collaborators are torn down unconditionally; only
    /// afterward does a live scheme or set turn this into `FAIL` (spec §7
    /// `FinalizeWithLiveHandles`: "collaborators still finalized").
    pub fn finalize(self) -> Result<(), ErError> {
        let schemes_live = self.schemes.len();
        let sets_live = self.sets.len();

        for (name, result) in [
            ("codec", self.codec.finalize()),
            ("shuffle", self.shuffle.finalize()),
            ("kv", self.kv.finalize()),
        ] {
            if let Err(err) = result {
                tracing::warn!(collaborator = name, %err, "collaborator finalize failed");
            }
        }

        if schemes_live != 0 || sets_live != 0 {
            tracing::error!(schemes = schemes_live, sets = sets_live, "finalize called with live handles");
            return Err(ErError::FinalizeWithLiveHandles { schemes: schemes_live, sets: sets_live });
        }

        tracing::info!("er context finalized");
        Ok(())
    }

    /// `CreateScheme(comm, failure_domain, D, E) -> id | FAIL`.
    pub fn create_scheme(&mut self, comm: G, failure_domain: &str, data_blocks: i32, erasure_blocks: i32) -> i64 {
        self.schemes.create(comm, failure_domain, data_blocks, erasure_blocks, self.codec.as_ref())
    }

    /// `FreeScheme(id) -> OK | FAIL`.
    pub fn free_scheme(&mut self, id: SchemeId) -> Result<(), ErError> {
        self.schemes.free(id, self.codec.as_ref())
    }

    /// `CreateSet(world, storage, name, direction, scheme_id) -> id | FAIL`.
    pub fn create_set(
        &mut self,
        world: G,
        storage: G,
        name: &str,
        direction: Direction,
        scheme_id: Option<SchemeId>,
    ) -> i64 {
        self.sets.create(world, storage, name, direction, scheme_id, &self.schemes)
    }

    /// `AddFile(id, path) -> OK | FAIL`.
    pub fn add_file(&mut self, id: SetId, path: &str) -> Result<(), ErError> {
        self.sets.add_file(id, path)
    }

    /// `Dispatch(set_id)`.
    pub fn dispatch(&mut self, id: SetId) -> Result<(), ErError> {
        dispatch::dispatch(id, &mut self.sets, &self.schemes, self.codec.as_ref(), self.shuffle.as_ref(), self.kv.as_ref())
    }

    /// `Test(set_id)`. Dispatch is synchronous and collective, so this
    /// always reports done (spec §4.D Completion) — there is no background
    /// work to poll.
    pub fn test(&self, _id: SetId) -> bool {
        true
    }

    /// `Wait(set_id)`. Always succeeds, for the same reason as `test`.
    pub fn wait(&self, _id: SetId) -> Result<(), ErError> {
        Ok(())
    }

    /// `FreeSet(id) -> OK`. Safe regardless of whether `Dispatch` succeeded.
    pub fn free_set(&mut self, id: SetId) {
        self.sets.free(id);
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
