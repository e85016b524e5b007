use log::{trace, warn};

use crate::{
    parallel::{each_thread, each_thread_with, join_results, split_by_thread},
    protocol::{
        collocation::{collocate, CollocationOutcome},
        delivery::deliver_spike_data,
        record_source::SpikeRegisterSource,
        round_state::RoundState,
    },
    CollectiveTransport, ConnectionLayer, ExchangeBuffers, ExchangeError, ExchangeReport,
    RankAssignment, SliceClock, SlotMarker, SpikeData, SpikeRegister,
};

/// Everything a spike exchange needs besides the buffers
pub(crate) struct SpikeExchange<'a, S: ?Sized, C: ?Sized, T: ?Sized> {
    pub assignment: RankAssignment,
    pub clock: SliceClock,
    pub min_delay: usize,
    pub register: &'a S,
    pub connections: &'a C,
    pub transport: &'a T,
}

impl<S, C, T> SpikeExchange<'_, S, C, T>
where
    S: SpikeRegister + ?Sized,
    C: ConnectionLayer + ?Sized,
    T: CollectiveTransport + ?Sized,
{
    /// Runs rounds until this rank and every other rank have nothing left
    /// to send, then re-arms and empties the register for the next slice
    pub fn run(
        &self,
        buffers: &mut ExchangeBuffers<SpikeData>,
    ) -> Result<ExchangeReport, ExchangeError> {
        let num_threads = self.assignment.num_threads();
        let per_rank = buffers.per_rank();
        let timestamps = self.clock.prepared_timestamps(self.min_delay);
        let register = self.register;
        let connections = self.connections;

        each_thread(num_threads, |tid| register.reset_entry_point(tid));

        let mut report = ExchangeReport::default();
        let mut state = RoundState::default();
        loop {
            report.rounds += 1;

            let free_marker = SlotMarker::for_completion(state.me_completed);
            let parts = split_by_thread(buffers.send.slots_mut(), &self.assignment, per_rank);
            let outcomes = join_results(each_thread_with(parts, |tid, (ranks, slots)| {
                let source = SpikeRegisterSource::new(register, tid);
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
                    "rank {}: spike buffers hold {} records per rank, {} spikes deferred to the next round",
                    self.transport.rank(),
                    per_rank,
                    deferred
                );
            }
            report.records_sent += written;
            report.records_deferred += deferred;

            buffers.exchange(self.transport)?;
            state.others_completed = buffers.recv.all_complete();

            if self.clock.is_slice_start() {
                let received = buffers.recv.slots();
                let delivered = join_results(each_thread(num_threads, |tid| {
                    deliver_spike_data(tid, received, &timestamps, connections)
                }))?;
                report.records_delivered += delivered.iter().sum::<usize>();
            }

            trace!(
                "rank {}: spike round {} sent {} records, me completed: {}, others completed: {}",
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

        each_thread(num_threads, |tid| {
            register.toggle_processed_flags(tid);
            register.clear(tid);
        });
        Ok(report)
    }
}
