// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! §4.B Scheme Registry — validates scheme parameters, translates
//! `(data_blocks, erasure_blocks)` into a codec variant, and owns codec
//! descriptors.

use std::collections::HashMap;

use crate::collab::{Codec, CodecHandle, CodecVariant, ProcessGroup};
use crate::error::ErError;
use crate::id::{IdCounter, SchemeId};

/// A registered redundancy scheme. Immutable after creation (spec §3);
/// fields are `pub(crate)` so the dispatch orchestrator can read them
/// directly.
pub struct Scheme<G: ProcessGroup> {
    pub(crate) comm: G,
    pub(crate) failure_domain: String,
    pub(crate) variant: CodecVariant,
    pub(crate) descriptor: CodecHandle,
}

/// Maps scheme id to `(codec descriptor, owning communicator handle)`
/// (spec §4.B Invariants).
pub struct SchemeRegistry<G: ProcessGroup> {
    counter: IdCounter,
    schemes: HashMap<SchemeId, Scheme<G>>,
}

impl<G: ProcessGroup> Default for SchemeRegistry<G> {
    fn default() -> Self {
        Self { counter: IdCounter::new(), schemes: HashMap::new() }
    }
}

impl<G: ProcessGroup> SchemeRegistry<G> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `(data_blocks, erasure_blocks)` to a codec variant per spec §3:
    /// `SINGLE if E=0, PARTNER if E=D, XOR if E=1, else unsupported`.
    pub fn variant_for(data_blocks: i32, erasure_blocks: i32) -> Result<CodecVariant, ErError> {
        if data_blocks < 1 {
            return Err(ErError::InvalidArgument(format!(
                "data_blocks must be >= 1, got {data_blocks}"
            )));
        }
        if erasure_blocks == 0 {
            Ok(CodecVariant::Single)
        } else if erasure_blocks == data_blocks {
            Ok(CodecVariant::Partner)
        } else if erasure_blocks == 1 {
            Ok(CodecVariant::Xor)
        } else {
            Err(ErError::InvalidArgument(format!(
                "unsupported (data_blocks={data_blocks}, erasure_blocks={erasure_blocks}): \
                 only (D,0), (D,D), and (D,1) with D>=2 are supported"
            )))
        }
    }

    /// Validate, allocate a codec descriptor, and register a new scheme.
    /// Returns `FAIL` (-1) on any failure, leaking no resources.
    pub fn create(
        &mut self,
        comm: G,
        failure_domain: &str,
        data_blocks: i32,
        erasure_blocks: i32,
        codec: &dyn Codec<G>,
    ) -> i64 {
        let variant = match Self::variant_for(data_blocks, erasure_blocks) {
            Ok(v) => v,
            Err(err) => {
                tracing::debug!(%err, "rejecting unsupported scheme");
                return crate::id::FAIL;
            }
        };

        let descriptor = match codec.create(variant, &comm, failure_domain) {
            Ok(d) => d,
            Err(err) => {
                tracing::error!(%err, %variant, "codec failed to create scheme descriptor");
                return crate::id::FAIL;
            }
        };

        let id = SchemeId::from(self.counter.next());
        self.schemes.insert(
            id,
            Scheme { comm, failure_domain: failure_domain.to_string(), variant, descriptor },
        );
        tracing::info!(scheme_id = %id, %variant, "scheme created");
        id.as_i64()
    }

    /// Destroy a scheme, asking the codec collaborator to release its
    /// descriptor. `FreeScheme` must be called by every participating
    /// process (spec §4.B) — the codec's destruction is itself collective.
    pub fn free(&mut self, id: SchemeId, codec: &dyn Codec<G>) -> Result<(), ErError> {
        let scheme = self
            .schemes
            .remove(&id)
            .ok_or_else(|| ErError::MissingReference(format!("scheme {id}")))?;
        codec.delete(scheme.descriptor)
    }

    pub fn get(&self, id: SchemeId) -> Option<&Scheme<G>> {
        self.schemes.get(&id)
    }

    pub fn descriptor(&self, id: SchemeId) -> Option<CodecHandle> {
        self.schemes.get(&id).map(|s| s.descriptor)
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}

#[cfg(test)]
#[path = "scheme_tests.rs"]
mod tests;
