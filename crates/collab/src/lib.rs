// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference collaborator implementations for `er-core`'s four collaborator
//! traits (`ProcessGroup`, `Codec`, `Shuffle`, `KvStore`).
//!
//! The block-level codec and file-shuffle service are explicitly out of
//! scope for the core's production surface — real ones would bind to an
//! MPI-style substrate and a parallel filesystem. What lives here is a
//! reference implementation that is collectively correct (every rank sees
//! the same success/failure result, byte-identical rebuild after loss) but
//! runs in-process, the way `er-core`'s own `test_support` module does for
//! its unit tests — just richer, and shared across every crate's
//! integration tests instead of being private to one module. Gated behind
//! `test-support`, the same way `oj-adapters` gates its `Fake*` doubles.

#[cfg(any(test, feature = "test-support"))]
mod codec;
#[cfg(any(test, feature = "test-support"))]
mod group;
#[cfg(any(test, feature = "test-support"))]
mod kv;
#[cfg(any(test, feature = "test-support"))]
mod shuffle;

#[cfg(any(test, feature = "test-support"))]
pub use codec::ReferenceCodec;
#[cfg(any(test, feature = "test-support"))]
pub use group::LocalGroup;
#[cfg(any(test, feature = "test-support"))]
pub use kv::JsonKvStore;
#[cfg(any(test, feature = "test-support"))]
pub use shuffle::ReferenceShuffle;
