// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.A State File — durably records one of {NULL, CORRUPT, ENCODED} per
//! set, replicated one-per-storage-group, reconciled across the world
//! group.

use std::path::Path;

use crate::collab::{KvStore, ProcessGroup};

/// On-disk state value (spec §6: stable wire values NULL=0, CORRUPT=1,
/// ENCODED=2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum StateValue {
    Null = 0,
    Corrupt = 1,
    Encoded = 2,
}

impl StateValue {
    fn from_wire(v: i64) -> Self {
        match v {
            1 => StateValue::Corrupt,
            2 => StateValue::Encoded,
            _ => StateValue::Null,
        }
    }

    fn to_wire(self) -> i64 {
        self as i64
    }
}

crate::simple_display! {
    StateValue {
        Null => "null",
        Corrupt => "corrupt",
        Encoded => "encoded",
    }
}

const STATE_KEY: &str = "STATE";

/// Write `state` to `<path>.er`. Only the storage-group leader (lowest rank
/// within `storage`) writes; every process in `world` then synchronizes at
/// a barrier before returning, so "write completed" is visible everywhere
/// (spec §4.A Rationale).
pub fn write<G: ProcessGroup>(world: &G, storage: &G, kv: &dyn KvStore, path: &Path, state: StateValue) {
    if storage.rank() == 0 {
        let er_file = er_path(path);
        match kv.write_file(&er_file, &[(STATE_KEY, state.to_wire())]) {
            Ok(()) => tracing::debug!(path = %er_file.display(), %state, "wrote state file"),
            Err(err) => tracing::error!(path = %er_file.display(), %err, "failed to write state file"),
        }
    }

    world.barrier();
}

/// Read the state at `<path>.er`. Each storage-group leader reads its local
/// replica (defaulting to NULL if absent or unreadable); the world then
/// elects the lowest world rank whose local value is non-NULL and
/// broadcasts that value, per spec §4.A and the reconciliation rule in §3:
/// "if two replicas disagree, the replica held by the lowest world rank
/// wins."
pub fn read<G: ProcessGroup>(world: &G, storage: &G, kv: &dyn KvStore, path: &Path) -> StateValue {
    let mut local = StateValue::Null;
    if storage.rank() == 0 {
        let er_file = er_path(path);
        let entries = kv.read_file(&er_file);
        local = entries
            .iter()
            .find(|(k, _)| k == STATE_KEY)
            .map(|(_, v)| StateValue::from_wire(*v))
            .unwrap_or(StateValue::Null);
    }

    let ranks_world = world.size();
    let rank_world = world.rank();

    // Only a process holding a non-NULL value is eligible to win; others
    // report `ranks_world` (strictly larger than any real rank) so the
    // collective minimum ignores them.
    let valid_rank = if local != StateValue::Null { rank_world } else { ranks_world };
    let lowest_rank = world.allreduce_min(valid_rank);

    if lowest_rank >= ranks_world {
        // Nobody had a non-NULL value.
        return StateValue::Null;
    }

    let wire = world.broadcast_int(local.to_wire() as i32, lowest_rank) as i64;
    StateValue::from_wire(wire)
}

/// Remove `<path>.er`. Only the storage-group leader unlinks the file
/// (spec §4.D.3 REMOVE pipeline, step 4).
pub fn remove(storage: &impl ProcessGroup, kv: &dyn KvStore, path: &Path) {
    if storage.rank() == 0 {
        let er_file = er_path(path);
        if let Err(err) = kv.remove_file(&er_file) {
            tracing::warn!(path = %er_file.display(), %err, "failed to remove state file");
        }
    }
}

/// `<path>.er` per spec §6 filesystem layout (`N.er.er`, since `path` is
/// already the set's `<name>.er` metadata prefix).
pub fn er_path(path: &Path) -> std::path::PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".er");
    std::path::PathBuf::from(s)
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
