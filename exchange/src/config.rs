use std::default::Default;

use crate::{
    constants::{DEFAULT_TARGET_RECORDS_PER_RANK, MIN_SPIKE_RECORDS_PER_RANK, SPIKE_BUFFER_HEADROOM},
    error::ConfigError,
    DelayWindow,
};

/// Contains Config properties which will be used by the EventDeliveryManager
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeConfig {
    /// Number of worker threads (virtual processes) per rank
    pub num_threads: usize,
    /// Capacity of one rank segment of the spike buffers. When None the
    /// capacity is derived from the delay window, see
    /// `spike_records_per_rank`.
    pub spike_records_per_rank: Option<usize>,
    /// Capacity of one rank segment of the buffers allocated for each
    /// target data exchange
    pub target_records_per_rank: usize,
}

impl ExchangeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.spike_records_per_rank == Some(0) {
            return Err(ConfigError::ZeroCapacity { buffer: "spike" });
        }
        if self.target_records_per_rank == 0 {
            return Err(ConfigError::ZeroCapacity { buffer: "target" });
        }
        Ok(())
    }

    /// Per-rank spike segment capacity for the given window.
    /// Enough to hold one spike per thread per step of a slice, plus headroom.
    pub fn spike_records_per_rank(&self, window: &DelayWindow) -> usize {
        self.spike_records_per_rank.unwrap_or_else(|| {
            let derived = self.num_threads * window.min_delay_steps() + SPIKE_BUFFER_HEADROOM;
            derived.max(MIN_SPIKE_RECORDS_PER_RANK)
        })
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            num_threads: 1,
            spike_records_per_rank: None,
            target_records_per_rank: DEFAULT_TARGET_RECORDS_PER_RANK,
        }
    }
}
