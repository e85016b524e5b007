use crate::types::{NodeId, SynIndex};

/// Marks a TargetData that carries no source node ("no more targets here")
pub const INVALID_INDEX: NodeId = NodeId::MAX;

pub const INVALID_SYNINDEX: SynIndex = SynIndex::MAX;

// Spike buffer sizing

/// Extra slots per rank segment on top of `num_threads * min_delay`
pub const SPIKE_BUFFER_HEADROOM: usize = 2;

/// Smallest per-rank spike segment ever configured
pub const MIN_SPIKE_RECORDS_PER_RANK: usize = 4;

pub const DEFAULT_TARGET_RECORDS_PER_RANK: usize = 128;
