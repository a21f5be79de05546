// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process reference `ProcessGroup`: one OS thread per simulated rank,
//! synchronized through [`std::sync::Barrier`].

use parking_lot::Mutex;
use std::sync::Arc;

use er_core::collab::ProcessGroup;

/// A simulated communicator shared by every rank it was built for.
#[derive(Clone)]
pub struct LocalGroup {
    rank: i32,
    size: i32,
    barrier: Arc<std::sync::Barrier>,
    scratch: Arc<Mutex<Vec<i32>>>,
}

impl LocalGroup {
    /// Build `size` handles, one per rank, all belonging to the same
    /// communicator.
    pub fn world(size: i32) -> Vec<Self> {
        let barrier = Arc::new(std::sync::Barrier::new(size.max(1) as usize));
        let scratch = Arc::new(Mutex::new(vec![0; size.max(1) as usize]));
        (0..size)
            .map(|rank| Self { rank, size, barrier: barrier.clone(), scratch: scratch.clone() })
            .collect()
    }

    /// Build a sub-communicator over `members` (world ranks), re-ranked
    /// `0..members.len()` within the new group. Used to build the
    /// storage-group handles that sit alongside a world handle in the same
    /// test (spec §4.A: storage groups are a partition of the world group).
    pub fn subgroup(members: &[i32]) -> Vec<Self> {
        let size = members.len() as i32;
        let barrier = Arc::new(std::sync::Barrier::new(members.len().max(1)));
        let scratch = Arc::new(Mutex::new(vec![0; members.len().max(1)]));
        (0..size).map(|rank| Self { rank, size, barrier: barrier.clone(), scratch: scratch.clone() }).collect()
    }
}

impl ProcessGroup for LocalGroup {
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

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
