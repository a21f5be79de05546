// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the ER core.
//!
//! Every variant corresponds to a row in spec §7's error table. Callers
//! going through the stable caller-facing surface (`Init`, `CreateScheme`,
//! ...) only ever see a binary success/failure return; `ErError` is the
//! typed detail behind that collapse, and what gets logged via `tracing`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing reference: {0}")]
    MissingReference(String),

    #[error("collaborator failure: {0}")]
    CollaboratorFailure(String),

    #[error("finalize called with {schemes} live scheme(s) and {sets} live set(s)")]
    FinalizeWithLiveHandles { schemes: usize, sets: usize },
}
