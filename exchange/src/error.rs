use thiserror::Error;

use crate::{
    BufferError, ModuliError, Rank, RegisterError, RoutingError, Thread, TransportError,
};

/// Errors in the static configuration of an exchange, detected before any round starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// At least one worker thread is required
    #[error("Number of threads must be at least 1")]
    ZeroThreads,

    /// At least one participating process is required
    #[error("Number of ranks must be at least 1")]
    ZeroRanks,

    /// A buffer segment must hold at least one record
    #[error("Per-rank capacity of the {buffer} buffer must be at least 1 record")]
    ZeroCapacity {
        buffer: &'static str,
    },

    /// The local rank is not one of the participating ranks
    #[error("Rank {rank} is out of range for {num_ranks} ranks")]
    RankOutOfRange {
        rank: Rank,
        num_ranks: usize,
    },

    /// A collaborator keeps per-thread state for a different number of threads
    #[error("The {collaborator} is set up for {threads} threads but the exchange runs {expected}")]
    ThreadCountMismatch {
        collaborator: &'static str,
        threads: usize,
        expected: usize,
    },

    /// The spike buffers were released by `finalize` and not reconfigured since
    #[error("Spike buffers were released. Reconfigure them before exchanging spikes")]
    BuffersReleased,
}

/// Errors that abort a spike or target data exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Moduli error: {0}")]
    Moduli(#[from] ModuliError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Register error: {0}")]
    Register(#[from] RegisterError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Buffers were sized for a different number of processes than the transport reports
    #[error("Exchange buffers are configured for {buffer_ranks} ranks but the transport has {transport_ranks}. Reconfigure the buffers after changing the process count")]
    RankCountMismatch {
        buffer_ranks: usize,
        transport_ranks: usize,
    },

    /// A source handed out a record for a rank the collocating thread does not own
    #[error("Thread {tid} received a record for rank {rank}, outside its assigned ranks {start}..{end}")]
    RankOutsideAssignment {
        tid: Thread,
        rank: Rank,
        start: Rank,
        end: Rank,
    },

    /// A received spike carries a lag that does not fit in one slice
    #[error("Thread {tid} received a spike with lag {lag}, but a slice only spans {min_delay} steps")]
    LagOutOfRange {
        tid: Thread,
        lag: u16,
        min_delay: usize,
    },

    /// Target data can only be gathered while the source table is still populated
    #[error("Source table was already cleared. Target data must be gathered before the source table is released")]
    SourceTableCleared,
}
