use std::ops::Range;

use crate::{Lcid, NodeId, Rank, SpikeEvent, SynIndex, TargetData, Thread};

pub mod error;

use error::RoutingError;

/// The connection layer of the simulation kernel, as seen by the exchange.
///
/// Every method takes the calling thread's id and must only touch that
/// thread's state; the exchange calls them concurrently from all threads.
pub trait ConnectionLayer: Sync {
    /// Delivers a received spike to one connection of thread `tid`
    fn send(
        &self,
        tid: Thread,
        syn_index: SynIndex,
        lcid: Lcid,
        event: &SpikeEvent,
    ) -> Result<(), RoutingError>;

    /// True once the source table has been released after connection setup
    fn is_source_table_cleared(&self) -> bool;

    /// Readies thread `tid`'s target table for incoming `add_target` calls
    fn prepare_target_table(&self, tid: Thread);

    fn reset_source_table_entry_point(&self, tid: Thread);

    fn save_source_table_entry_point(&self, tid: Thread);

    fn restore_source_table_entry_point(&self, tid: Thread);

    /// Next TargetData whose source node lives on a rank in `ranks`, or
    /// `TargetData::invalid()` when there is none left
    fn get_next_target_data(&self, tid: Thread, ranks: &Range<Rank>) -> TargetData;

    /// Undoes the most recent `get_next_target_data` of thread `tid` so the
    /// same entry is handed out again after the next restore
    fn reject_last_target_data(&self, tid: Thread);

    /// Records that a local source node has a target described by `target_data`
    fn add_target(&self, tid: Thread, target_data: &TargetData) -> Result<(), RoutingError>;
}

/// Resolves where a node lives
pub trait NodeLocator: Sync {
    /// Number of threads per rank nodes are placed on
    fn num_threads(&self) -> usize;

    /// Rank hosting node `gid`
    fn process_id_of(&self, gid: NodeId) -> Rank;

    /// Thread hosting node `gid` if it lives on this rank
    fn local_thread_of(&self, gid: NodeId) -> Option<Thread>;
}
