use std::{
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;

use axon_exchange::{
    ConnectionLayer, Lcid, NodeLocator, Rank, RoutingError, SpikeEvent, Step, SynIndex,
    TargetData, Thread, VpLayout,
};

use super::SourceTable;

/// A spike as it reached the connection layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeliveredSpike {
    pub tid: Thread,
    pub syn_index: SynIndex,
    pub lcid: Lcid,
    pub stamp: Step,
}

/// Connection layer of one test rank: serves target data from a
/// `SourceTable` and records everything delivered to it
pub struct RecordingConnections {
    source_table: SourceTable,
    source_table_cleared: AtomicBool,
    num_synapse_models: SynIndex,
    spikes: Mutex<Vec<DeliveredSpike>>,
    targets: Mutex<Vec<(Thread, TargetData)>>,
}

impl RecordingConnections {
    pub fn new(layout: VpLayout) -> Self {
        Self {
            source_table: SourceTable::new(layout),
            source_table_cleared: AtomicBool::new(false),
            num_synapse_models: SynIndex::MAX,
            spikes: Mutex::new(Vec::new()),
            targets: Mutex::new(Vec::new()),
        }
    }

    /// Spikes for synapse models at or above `num_synapse_models` fail with `UnknownSynapse`
    pub fn with_synapse_models(mut self, num_synapse_models: SynIndex) -> Self {
        self.num_synapse_models = num_synapse_models;
        self
    }

    pub fn source_table(&self) -> &SourceTable {
        &self.source_table
    }

    pub fn clear_source_table(&self) {
        self.source_table.clear();
        self.source_table_cleared.store(true, Ordering::Release);
    }

    pub fn spikes(&self) -> Vec<DeliveredSpike> {
        self.spikes.lock().clone()
    }

    pub fn targets(&self) -> Vec<(Thread, TargetData)> {
        self.targets.lock().clone()
    }
}

impl ConnectionLayer for RecordingConnections {
    fn send(
        &self,
        tid: Thread,
        syn_index: SynIndex,
        lcid: Lcid,
        event: &SpikeEvent,
    ) -> Result<(), RoutingError> {
        if syn_index >= self.num_synapse_models {
            return Err(RoutingError::UnknownSynapse { tid, syn_index });
        }
        self.spikes.lock().push(DeliveredSpike {
            tid,
            syn_index,
            lcid,
            stamp: event.stamp,
        });
        Ok(())
    }

    fn is_source_table_cleared(&self) -> bool {
        self.source_table_cleared.load(Ordering::Acquire)
    }

    fn prepare_target_table(&self, _tid: Thread) {}

    fn reset_source_table_entry_point(&self, tid: Thread) {
        self.source_table.reset_entry_point(tid);
    }

    fn save_source_table_entry_point(&self, tid: Thread) {
        self.source_table.save_entry_point(tid);
    }

    fn restore_source_table_entry_point(&self, tid: Thread) {
        self.source_table.restore_entry_point(tid);
    }

    fn get_next_target_data(&self, tid: Thread, ranks: &Range<Rank>) -> TargetData {
        self.source_table.get_next(tid, ranks)
    }

    fn reject_last_target_data(&self, tid: Thread) {
        self.source_table.reject_last(tid);
    }

    fn add_target(&self, tid: Thread, target_data: &TargetData) -> Result<(), RoutingError> {
        if self.source_table.layout().local_thread_of(target_data.source_gid) != Some(tid) {
            return Err(RoutingError::UnresolvableTarget {
                tid,
                gid: target_data.source_gid,
            });
        }
        self.targets.lock().push((tid, *target_data));
        Ok(())
    }
}
