// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test doubles for the core's own unit tests.
//!
//! [`SimGroup`] is a real multi-threaded [`ProcessGroup`] — one OS thread
//! per simulated rank, synchronized with [`std::sync::Barrier`] — so that
//! collective algorithms (state reconciliation, dispatch ordering) run
//! under genuine concurrent rank semantics instead of a single-threaded
//! stand-in that could hide ordering bugs. The richer, disk-backed
//! collaborator fakes (a real XOR/partner codec, a real shuffle
//! association file) live in the sibling `er-collab` crate; these are
//! intentionally minimal, tracking only what `er-core`'s own orchestration
//! tests need to check (call order, error propagation, state transitions).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::collab::{Codec, CodecHandle, CodecVariant, KvStore, ProcessGroup, Shuffle};
use crate::error::ErError;

/// A simulated communicator: `size` OS threads rendezvousing through a
/// shared [`std::sync::Barrier`] and a scratch buffer for reductions.
#[derive(Clone)]
pub struct SimGroup {
    rank: i32,
    size: i32,
    barrier: Arc<std::sync::Barrier>,
    scratch: Arc<Mutex<Vec<i32>>>,
}

impl SimGroup {
    /// Build `size` handles, one per rank, sharing one barrier/scratch pair
    /// — i.e. one simulated communicator.
    pub fn world(size: i32) -> Vec<Self> {
        let barrier = Arc::new(std::sync::Barrier::new(size as usize));
        let scratch = Arc::new(Mutex::new(vec![0; size as usize]));
        (0..size)
            .map(|rank| Self { rank, size, barrier: barrier.clone(), scratch: scratch.clone() })
            .collect()
    }

    /// Build a storage-group communicator containing only `members` of a
    /// simulated world (by world rank), re-ranked 0..len within the group.
    pub fn subgroup(members: &[i32]) -> Vec<Self> {
        let barrier = Arc::new(std::sync::Barrier::new(members.len()));
        let scratch = Arc::new(Mutex::new(vec![0; members.len()]));
        members
            .iter()
            .map(|_| Self {
                rank: 0,
                size: members.len() as i32,
                barrier: barrier.clone(),
                scratch: scratch.clone(),
            })
            .enumerate()
            .map(|(local_rank, mut g)| {
                g.rank = local_rank as i32;
                g
            })
            .collect()
    }
}

impl ProcessGroup for SimGroup {
    fn rank(&self) -> i32 {
        self.rank
    }

    fn size(&self) -> i32 {
        self.size
    }

    fn barrier(&self) {
        self.barrier.wait();
    }

    fn allreduce_min(&self, value: i32) -> i32 {
        {
            let mut slots = self.scratch.lock();
            slots[self.rank as usize] = value;
        }
        self.barrier.wait();
        let result = *self.scratch.lock().iter().min().unwrap_or(&value);
        self.barrier.wait();
        result
    }

    fn broadcast_int(&self, value: i32, root_rank: i32) -> i32 {
        if self.rank == root_rank {
            self.scratch.lock()[root_rank as usize] = value;
        }
        self.barrier.wait();
        let result = self.scratch.lock()[root_rank as usize];
        self.barrier.wait();
        result
    }
}

/// In-memory [`KvStore`], shared across every simulated rank via `Arc`.
#[derive(Clone, Default)]
pub struct FakeKv(Arc<Mutex<HashMap<PathBuf, Vec<(String, i64)>>>>);

impl FakeKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directly inject a state value, bypassing `write_file`, to simulate
    /// a stale or corrupt replica planted before a test begins.
    pub fn poke(&self, path: &Path, key: &str, value: i64) {
        self.0.lock().entry(path.to_path_buf()).or_default().push((key.to_string(), value));
    }
}

impl KvStore for FakeKv {
    fn write_file(&self, path: &Path, entries: &[(&str, i64)]) -> Result<(), ErError> {
        let owned = entries.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        self.0.lock().insert(path.to_path_buf(), owned);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Vec<(String, i64)> {
        self.0.lock().get(path).cloned().unwrap_or_default()
    }

    fn remove_file(&self, path: &Path) -> Result<(), ErError> {
        self.0.lock().remove(path);
        Ok(())
    }
}

/// Behavior a [`FakeCollab`] call should exhibit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Succeed,
    Fail,
}

/// A combined fake `Codec`/`Shuffle` that records every call it receives
/// and can be configured (per named call) to fail, so orchestration tests
/// can assert exactly how the dispatch pipeline reacts.
#[derive(Clone, Default)]
pub struct FakeCollab {
    calls: Arc<Mutex<Vec<String>>>,
    outcomes: Arc<Mutex<HashMap<String, Outcome>>>,
    next_handle: Arc<Mutex<u64>>,
}

impl FakeCollab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, call: &str) {
        self.outcomes.lock().insert(call.to_string(), Outcome::Fail);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &str) -> Result<(), ErError> {
        self.calls.lock().push(call.to_string());
        match self.outcomes.lock().get(call).copied().unwrap_or(Outcome::Succeed) {
            Outcome::Succeed => Ok(()),
            Outcome::Fail => Err(ErError::CollaboratorFailure(call.to_string())),
        }
    }

    fn alloc_handle(&self) -> CodecHandle {
        let mut next = self.next_handle.lock();
        let handle = CodecHandle(*next);
        *next += 1;
        handle
    }
}

impl<G: ProcessGroup> Codec<G> for FakeCollab {
    fn create(&self, _variant: CodecVariant, _comm: &G, _failure_domain: &str) -> Result<CodecHandle, ErError> {
        self.record("codec.create")?;
        Ok(self.alloc_handle())
    }

    fn delete(&self, _desc: CodecHandle) -> Result<(), ErError> {
        self.record("codec.delete")
    }

    fn apply(&self, _files: &[PathBuf], _redset_path: &Path, _desc: CodecHandle) -> Result<(), ErError> {
        self.record("codec.apply")
    }

    fn filelist(&self, _redset_path: &Path, _desc: CodecHandle) -> Result<Vec<PathBuf>, ErError> {
        self.record("codec.filelist")?;
        Ok(Vec::new())
    }

    fn recover(&self, _comm: &G, _redset_path: &Path) -> Result<CodecHandle, ErError> {
        self.record("codec.recover")?;
        Ok(self.alloc_handle())
    }

    fn unapply(&self, _redset_path: &Path, _desc: CodecHandle) -> Result<(), ErError> {
        self.record("codec.unapply")
    }
}

impl<G: ProcessGroup> Shuffle<G> for FakeCollab {
    fn create(&self, _world: &G, _storage: &G, _files: &[PathBuf], _path: &Path) -> Result<(), ErError> {
        self.record("shuffle.create")
    }

    fn migrate(&self, _world: &G, _storage: &G, _path: &Path) -> Result<(), ErError> {
        self.record("shuffle.migrate")
    }

    fn remove(&self, _world: &G, _storage: &G, _path: &Path) -> Result<(), ErError> {
        self.record("shuffle.remove")
    }
}
