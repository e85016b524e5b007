use axon_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur when sizing or decoding an exchange buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// A buffer needs at least one rank segment
    #[error("Exchange buffer needs at least one rank segment")]
    ZeroRanks,

    /// A rank segment needs at least one slot
    #[error("Exchange buffer segments need at least one slot")]
    ZeroCapacity,

    /// The received byte count does not match the buffer layout
    #[error("Received {actual} bytes but the buffer layout expects {expected}")]
    ByteLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// A received record could not be decoded
    #[error("Failed to decode received record {slot}: {source}")]
    Decode {
        slot: usize,
        source: SerdeErr,
    },
}
