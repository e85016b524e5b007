use crate::{
    ConnectionLayer, ExchangeError, NodeLocator, SpikeData, SpikeEvent, Step, TargetData, Thread,
    WireRecord,
};

/// Hands every received spike addressed to thread `tid` to the connection
/// layer, stamped with `timestamps[lag]`. The whole receive buffer is
/// scanned since spikes for one thread arrive in every rank's segment.
pub(crate) fn deliver_spike_data<C: ConnectionLayer + ?Sized>(
    tid: Thread,
    received: &[SpikeData],
    timestamps: &[Step],
    connections: &C,
) -> Result<usize, ExchangeError> {
    let mut delivered = 0;
    for spike in received
        .iter()
        .filter(|spike| spike.is_data() && usize::from(spike.tid) == tid)
    {
        let Some(&stamp) = timestamps.get(usize::from(spike.lag)) else {
            return Err(ExchangeError::LagOutOfRange {
                tid,
                lag: spike.lag,
                min_delay: timestamps.len(),
            });
        };
        connections.send(tid, spike.syn_index, spike.lcid, &SpikeEvent::new(stamp))?;
        delivered += 1;
    }
    Ok(delivered)
}

/// Registers every received target whose source node is hosted by thread `tid` of this rank
pub(crate) fn distribute_target_data<C, L>(
    tid: Thread,
    received: &[TargetData],
    connections: &C,
    locator: &L,
) -> Result<usize, ExchangeError>
where
    C: ConnectionLayer + ?Sized,
    L: NodeLocator + ?Sized,
{
    let mut distributed = 0;
    for target_data in received.iter().filter(|record| record.is_data()) {
        if locator.local_thread_of(target_data.source_gid) != Some(tid) {
            continue;
        }
        connections.add_target(tid, target_data)?;
        distributed += 1;
    }
    Ok(distributed)
}
