use std::ops::Range;

use crate::{Rank, SpikeData, Thread};

pub mod error;
pub mod spike_register_table;

/// Per-thread source of outgoing spikes with a resumable iteration position.
///
/// Thread `tid` iterates over all pending spikes whose destination rank
/// falls in the range it is given; positions are private to `tid`.
pub trait SpikeRegister: Sync {
    /// Number of threads with their own iteration position
    fn num_threads(&self) -> usize;

    /// Moves `tid`'s position back to the first pending spike
    fn reset_entry_point(&self, tid: Thread);

    /// Remembers the current position. The first save after a restore wins,
    /// and a position rejected with `reject_last` takes precedence over the
    /// current one.
    fn save_entry_point(&self, tid: Thread);

    /// Resumes from the last saved position
    fn restore_entry_point(&self, tid: Thread);

    /// Hands out the next unprocessed spike for a rank in `ranks` and marks it processed
    fn get_next(&self, tid: Thread, ranks: &Range<Rank>) -> Option<(Rank, SpikeData)>;

    /// Returns the spike handed out last to the pending set
    fn reject_last(&self, tid: Thread);

    /// Drops every spike emitted by thread `tid`
    fn clear(&self, tid: Thread);

    /// Flips the meaning of the processed flag of thread `tid`'s spikes
    fn toggle_processed_flags(&self, tid: Thread);
}
