use log::{trace, warn};

use crate::{
    parallel::{each_thread, each_thread_with, join_results, split_by_thread},
    protocol::{
        collocation::{collocate, CollocationOutcome},
        delivery::distribute_target_data,
        record_source::TargetDataSource,
        round_state::RoundState,
    },
    CollectiveTransport, ConnectionLayer, ExchangeBuffers, ExchangeError, ExchangeReport,
    NodeLocator, RankAssignment, SlotMarker, TargetData,
};

/// Everything a target data exchange needs besides the buffers
pub(crate) struct TargetExchange<'a, C: ?Sized, L: ?Sized, T: ?Sized> {
    pub assignment: RankAssignment,
    pub connections: &'a C,
    pub locator: &'a L,
    pub transport: &'a T,
}

impl<C, L, T> TargetExchange<'_, C, L, T>
where
    C: ConnectionLayer + ?Sized,
    L: NodeLocator + ?Sized,
    T: CollectiveTransport + ?Sized,
{
    /// Sends every source table entry to the rank hosting its source node
    /// and registers the entries received for local nodes
    pub fn run(
        &self,
        buffers: &mut ExchangeBuffers<TargetData>,
    ) -> Result<ExchangeReport, ExchangeError> {
        if self.connections.is_source_table_cleared() {
            return Err(ExchangeError::SourceTableCleared);
        }

        let num_threads = self.assignment.num_threads();
        let per_rank = buffers.per_rank();
        let connections = self.connections;
        let locator = self.locator;

        each_thread(num_threads, |tid| {
            connections.prepare_target_table(tid);
            connections.reset_source_table_entry_point(tid);
        });

        let mut report = ExchangeReport::default();
        let mut state = RoundState::default();
        loop {
            report.rounds += 1;

            let free_marker = SlotMarker::for_completion(state.me_completed);
            let parts = split_by_thread(buffers.send.slots_mut(), &self.assignment, per_rank);
            let outcomes = join_results(each_thread_with(parts, |tid, (ranks, slots)| {
                let source = TargetDataSource::new(connections, locator, tid);
                collocate(tid, &ranks, slots, per_rank, free_marker, &source)
            }))?;

            state.me_completed = !outcomes.iter().any(CollocationOutcome::touched);
            if state.me_completed {
                buffers.send.stamp(SlotMarker::Complete);
            }
            let written: usize = outcomes.iter().map(|outcome| outcome.written).sum();
            let deferred: usize = outcomes.iter().map(|outcome| outcome.deferred).sum();
            if deferred > 0 && report.records_deferred == 0 {
                warn!(
                    "rank {}: target buffers hold {} records per rank, {} entries deferred to the next round",
                    self.transport.rank(),
                    per_rank,
                    deferred
                );
            }
            report.records_sent += written;
            report.records_deferred += deferred;

            buffers.exchange(self.transport)?;
            state.others_completed = buffers.recv.all_complete();

            let received = buffers.recv.slots();
            let distributed = join_results(each_thread(num_threads, |tid| {
                distribute_target_data(tid, received, connections, locator)
            }))?;
            report.records_delivered += distributed.iter().sum::<usize>();

            trace!(
                "rank {}: target round {} sent {} records, me completed: {}, others completed: {}",
                self.transport.rank(),
                report.rounds,
                written,
                state.me_completed,
                state.others_completed
            );
            if state.is_finished() {
                break;
            }
        }

        Ok(report)
    }
}
