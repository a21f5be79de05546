// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.D Dispatch Orchestrator — executes the per-direction pipeline:
//! encode, rebuild, remove.

use std::path::PathBuf;

use crate::collab::{Codec, CodecHandle, KvStore, ProcessGroup, Shuffle};
use crate::error::ErError;
use crate::id::SetId;
use crate::scheme::SchemeRegistry;
use crate::set::{Direction, Set, SetRegistry};
use crate::state::{self, StateValue};

/// `<prefix>.<world_rank>` — the redundancy-file path for this process
/// (spec §4.D: "redset_path=`<prefix>.<world_rank>`").
fn redset_path(prefix: &std::path::Path, world_rank: i32) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(format!(".{world_rank}"));
    PathBuf::from(s)
}

/// `<prefix>.shuffile` (spec §6 filesystem layout).
fn shuffile_path(prefix: &std::path::Path) -> PathBuf {
    let mut s = prefix.as_os_str().to_owned();
    s.push(".shuffile");
    PathBuf::from(s)
}

/// Execute `Dispatch(set_id)` (spec §4.D). Collective and synchronous: it
/// blocks until every world-rank participant reaches the same point, and
/// the `Test`/`Wait` operations exposed to callers always report
/// done/success afterward (spec §4.D Completion) — there is no background
/// work left over once this returns.
pub fn dispatch<G: ProcessGroup>(
    set_id: SetId,
    sets: &mut SetRegistry<G>,
    schemes: &SchemeRegistry<G>,
    codec: &dyn Codec<G>,
    shuffle: &dyn Shuffle<G>,
    kv: &dyn KvStore,
) -> Result<(), ErError> {
    sets.mark_dispatched(set_id)?;
    let set = sets.get(set_id).ok_or_else(|| ErError::MissingReference(format!("set {set_id}")))?;

    let span = tracing::info_span!("dispatch", set_id = %set_id, name = set.name(), direction = %set.direction());
    let _enter = span.enter();

    match set.direction() {
        Direction::Encode => encode(set, schemes, codec, shuffle, kv),
        Direction::Rebuild => rebuild(set, codec, shuffle, kv),
        Direction::Remove => remove(set, codec, shuffle, kv),
    }
}

/// §4.D.1 ENCODE pipeline.
fn encode<G: ProcessGroup>(
    set: &Set<G>,
    schemes: &SchemeRegistry<G>,
    codec: &dyn Codec<G>,
    shuffle: &dyn Shuffle<G>,
    kv: &dyn KvStore,
) -> Result<(), ErError> {
    // 1. Resolve the bound scheme; abort if missing.
    let scheme_id = set
        .scheme_id()
        .ok_or_else(|| ErError::MissingReference("ENCODE set has no bound scheme".to_string()))?;
    let descriptor = schemes
        .descriptor(scheme_id)
        .ok_or_else(|| ErError::MissingReference(format!("scheme {scheme_id}")))?;

    let prefix = set.metadata_prefix();
    let world_rank = set.world().rank();

    // 2. State -> CORRUPT.
    state::write(set.world(), set.storage(), kv, &prefix, StateValue::Corrupt);

    // 3. Apply redundancy.
    let redset_path = redset_path(&prefix, world_rank);
    if let Err(err) = codec.apply(set.files(), &redset_path, descriptor) {
        tracing::error!(%err, "codec apply failed, leaving state CORRUPT");
        return Err(err);
    }

    // 4. Concatenate application files and redundancy files.
    let redundancy_files = codec.filelist(&redset_path, descriptor)?;
    let combined: Vec<PathBuf> = set.files().iter().cloned().chain(redundancy_files).collect();

    // 5. Record which-rank-owned-which-files.
    let shuffile = shuffile_path(&prefix);
    if let Err(err) = shuffle.create(set.world(), set.storage(), &combined, &shuffile) {
        tracing::error!(%err, "shuffle create failed, leaving state CORRUPT");
        return Err(err);
    }

    // 6. State -> ENCODED, only reached if both 3 and 5 succeeded.
    state::write(set.world(), set.storage(), kv, &prefix, StateValue::Encoded);
    tracing::info!("encode complete");
    Ok(())
}

/// §4.D.2 REBUILD pipeline.
fn rebuild<G: ProcessGroup>(
    set: &Set<G>,
    codec: &dyn Codec<G>,
    shuffle: &dyn Shuffle<G>,
    kv: &dyn KvStore,
) -> Result<(), ErError> {
    let prefix = set.metadata_prefix();

    // 1. Refuse to rebuild from unknown state.
    let state = state::read(set.world(), set.storage(), kv, &prefix);
    if state != StateValue::Encoded {
        tracing::warn!(%state, "refusing to rebuild: state is not ENCODED");
        return Err(ErError::CollaboratorFailure(format!(
            "cannot rebuild set '{}': on-disk state is {state}, not encoded",
            set.name()
        )));
    }

    // 2. State -> CORRUPT.
    state::write(set.world(), set.storage(), kv, &prefix, StateValue::Corrupt);

    // 3. Migrate surviving files back to the ranks that owned them.
    let shuffile = shuffile_path(&prefix);
    if let Err(err) = shuffle.migrate(set.world(), set.storage(), &shuffile) {
        tracing::error!(%err, "shuffle migrate failed, leaving state CORRUPT");
        return Err(err);
    }

    // 4. Reconstruct missing files from survivors.
    let world_rank = set.world().rank();
    let redset_path = redset_path(&prefix, world_rank);
    let recovered = codec.recover(set.world(), &redset_path);
    let recovered = match recovered {
        Ok(desc) => desc,
        Err(err) => {
            tracing::error!(%err, "codec recover failed, leaving state CORRUPT");
            return Err(err);
        }
    };
    let _: CodecHandle = recovered;

    // 5. On success, State -> ENCODED.
    state::write(set.world(), set.storage(), kv, &prefix, StateValue::Encoded);
    tracing::info!("rebuild complete");
    Ok(())
}

/// §4.D.3 REMOVE pipeline. Best-effort: every step is attempted even if an
/// earlier one failed, so a partially-encoded set can always be cleaned
/// up (mirrors the original `er_remove`, which never inspects the return
/// codes of the shuffle/codec calls it makes).
fn remove<G: ProcessGroup>(
    set: &Set<G>,
    codec: &dyn Codec<G>,
    shuffle: &dyn Shuffle<G>,
    kv: &dyn KvStore,
) -> Result<(), ErError> {
    let prefix = set.metadata_prefix();

    // 1. State -> CORRUPT (defensive).
    state::write(set.world(), set.storage(), kv, &prefix, StateValue::Corrupt);

    // 2. Delete association information.
    let shuffile = shuffile_path(&prefix);
    if let Err(err) = shuffle.remove(set.world(), set.storage(), &shuffile) {
        tracing::warn!(%err, "shuffle remove failed, continuing cleanup");
    }

    // 3. Materialize a descriptor from on-disk metadata, delete redundancy
    //    files, then destroy the descriptor.
    let world_rank = set.world().rank();
    let redset_path = redset_path(&prefix, world_rank);
    match codec.recover(set.world(), &redset_path) {
        Ok(desc) => {
            if let Err(err) = codec.unapply(&redset_path, desc) {
                tracing::warn!(%err, "codec unapply failed, continuing cleanup");
            }
            if let Err(err) = codec.delete(desc) {
                tracing::warn!(%err, "codec delete failed, continuing cleanup");
            }
        }
        Err(err) => tracing::warn!(%err, "codec recover failed during remove, continuing cleanup"),
    }

    // 4. The storage-group leader unlinks <prefix>.er.
    state::remove(set.storage(), kv, &prefix);
    tracing::info!("remove complete");
    Ok(())
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
