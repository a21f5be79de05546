// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Core coordination logic for encoding and rebuilding checkpoint data
//! across a distributed-memory job.
//!
//! This crate is the collective algorithm only: scheme/set bookkeeping,
//! the crash-consistent on-disk state machine, and the three dispatch
//! pipelines (encode, rebuild, remove). It is generic over the collective
//! communication primitive ([`collab::ProcessGroup`]) and the collaborators
//! that do the actual I/O ([`collab::Codec`], [`collab::Shuffle`],
//! [`collab::KvStore`]) so that it never depends on a specific MPI binding
//! or on-disk format. Production implementations of those traits live in
//! `er-collab`.

pub mod collab;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod id;
mod macros;
pub mod scheme;
pub mod set;
pub mod state;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::ErConfig;
pub use context::ErContext;
pub use dispatch::dispatch;
pub use error::ErError;
pub use id::{SchemeId, SetId, FAIL};
pub use scheme::{Scheme, SchemeRegistry};
pub use set::{Direction, Set, SetRegistry};
pub use state::StateValue;
