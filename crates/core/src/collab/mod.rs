// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator contracts consumed by the core (spec §6).
//!
//! The core treats the block-level codec, the file-shuffle service, the
//! key/value state serializer, and the process-group messaging substrate as
//! external collaborators: it is generic over these traits and ships no
//! production implementation of any of them (spec §1 Out of scope). A
//! reference in-memory implementation of each lives in the sibling
//! `er-collab` crate, gated behind its `test-support` feature, the same way
//! `oj-adapters` gates `FakeAgentAdapter` behind its own `test-support`
//! feature.

mod codec;
mod group;
mod kv;
mod shuffle;

pub use codec::{Codec, CodecHandle, CodecVariant};
pub use group::ProcessGroup;
pub use kv::KvStore;
pub use shuffle::Shuffle;
