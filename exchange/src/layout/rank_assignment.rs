use std::ops::Range;

use crate::{Rank, Thread};

/// Splits the destination ranks among the threads of one process so that
/// every rank segment of a send buffer is written by exactly one thread.
///
/// Thread `t` owns `[t * n, min((t + 1) * n, num_ranks))` with
/// `n = ceil(num_ranks / num_threads)`; trailing threads may own nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankAssignment {
    num_ranks: usize,
    num_threads: usize,
    ranks_per_thread: usize,
}

impl RankAssignment {
    /// `num_ranks` and `num_threads` are expected to be non-zero
    pub fn new(num_ranks: usize, num_threads: usize) -> Self {
        let ranks_per_thread = num_ranks.div_ceil(num_threads.max(1));
        Self {
            num_ranks,
            num_threads,
            ranks_per_thread,
        }
    }

    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn ranks_per_thread(&self) -> usize {
        self.ranks_per_thread
    }

    pub fn ranks_for_thread(&self, tid: Thread) -> Range<Rank> {
        let start = (tid * self.ranks_per_thread).min(self.num_ranks);
        let end = (start + self.ranks_per_thread).min(self.num_ranks);
        start..end
    }
}
