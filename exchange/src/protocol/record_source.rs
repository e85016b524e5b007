use std::ops::Range;

use crate::{
    ConnectionLayer, NodeLocator, Rank, SpikeData, SpikeRegister, TargetData, Thread,
};

/// One thread's view of the records it still has to send
pub(crate) trait RecordSource<R> {
    fn restore_entry_point(&self);

    fn save_entry_point(&self);

    /// Next pending record for a rank in `ranks`, with its destination rank
    fn next(&self, ranks: &Range<Rank>) -> Option<(Rank, R)>;

    fn reject_last(&self);
}

pub(crate) struct SpikeRegisterSource<'a, S: SpikeRegister + ?Sized> {
    register: &'a S,
    tid: Thread,
}

impl<'a, S: SpikeRegister + ?Sized> SpikeRegisterSource<'a, S> {
    pub fn new(register: &'a S, tid: Thread) -> Self {
        Self { register, tid }
    }
}

impl<S: SpikeRegister + ?Sized> RecordSource<SpikeData> for SpikeRegisterSource<'_, S> {
    fn restore_entry_point(&self) {
        self.register.restore_entry_point(self.tid);
    }

    fn save_entry_point(&self) {
        self.register.save_entry_point(self.tid);
    }

    fn next(&self, ranks: &Range<Rank>) -> Option<(Rank, SpikeData)> {
        self.register.get_next(self.tid, ranks)
    }

    fn reject_last(&self) {
        self.register.reject_last(self.tid);
    }
}

/// Walks a thread's source table. A record goes to the rank that hosts its source node.
pub(crate) struct TargetDataSource<'a, C: ConnectionLayer + ?Sized, L: NodeLocator + ?Sized> {
    connections: &'a C,
    locator: &'a L,
    tid: Thread,
}

impl<'a, C: ConnectionLayer + ?Sized, L: NodeLocator + ?Sized> TargetDataSource<'a, C, L> {
    pub fn new(connections: &'a C, locator: &'a L, tid: Thread) -> Self {
        Self {
            connections,
            locator,
            tid,
        }
    }
}

impl<C: ConnectionLayer + ?Sized, L: NodeLocator + ?Sized> RecordSource<TargetData>
    for TargetDataSource<'_, C, L>
{
    fn restore_entry_point(&self) {
        self.connections.restore_source_table_entry_point(self.tid);
    }

    fn save_entry_point(&self) {
        self.connections.save_source_table_entry_point(self.tid);
    }

    fn next(&self, ranks: &Range<Rank>) -> Option<(Rank, TargetData)> {
        let target_data = self.connections.get_next_target_data(self.tid, ranks);
        if target_data.is_invalid() {
            return None;
        }
        Some((self.locator.process_id_of(target_data.source_gid), target_data))
    }

    fn reject_last(&self) {
        self.connections.reject_last_target_data(self.tid);
    }
}
