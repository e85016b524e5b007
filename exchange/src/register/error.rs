use thiserror::Error;

use crate::{Rank, Thread};

/// Errors that can occur when recording an outgoing spike
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("Thread {tid} is out of range for a register with {num_threads} threads")]
    ThreadOutOfRange {
        tid: Thread,
        num_threads: usize,
    },

    /// A spike must be emitted within the current slice
    #[error("Lag {lag} is out of range for a slice of {min_delay} steps")]
    LagOutOfRange {
        lag: u16,
        min_delay: usize,
    },

    #[error("Target rank {rank} is out of range for {num_ranks} ranks")]
    RankOutOfRange {
        rank: Rank,
        num_ranks: usize,
    },
}
