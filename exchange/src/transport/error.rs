use std::time::Duration;

use thiserror::Error;

use crate::Rank;

/// Errors that can occur during a collective exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// A buffer does not hold one segment per process
    #[error("Rank {rank}: {buffer} buffer holds {actual} bytes, expected {expected} ({bytes_per_process} bytes for each of {num_processes} processes)")]
    BufferLength {
        rank: Rank,
        buffer: &'static str,
        actual: usize,
        expected: usize,
        bytes_per_process: usize,
        num_processes: usize,
    },

    /// Participants disagree on the per-process byte count
    #[error("Rank {rank} sent {bytes_per_process} bytes per process while the exchange uses {expected}")]
    CountMismatch {
        rank: Rank,
        bytes_per_process: usize,
        expected: usize,
    },

    /// Another participant failed or left the exchange
    #[error("Rank {rank}: a participant left the collective exchange")]
    Disconnected {
        rank: Rank,
    },

    /// Not every participant arrived in time
    #[error("Rank {rank}: collective exchange timed out after {timeout:?}")]
    Timeout {
        rank: Rank,
        timeout: Duration,
    },
}
