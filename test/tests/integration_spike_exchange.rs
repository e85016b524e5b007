use axon_exchange::{
    CollectiveTransport, DelayWindow, EventDeliveryManager, ExchangeConfig, ExchangeError,
    RoutingError, SliceClock, SpikeData, SpikeRegisterTable, TransportError, VpLayout,
};
use axon_test::{run_cluster, DeliveredSpike, RecordingConnections};

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn config(num_threads: usize, spike_records_per_rank: Option<usize>) -> ExchangeConfig {
    ExchangeConfig {
        num_threads,
        spike_records_per_rank,
        ..Default::default()
    }
}

// ============================================================================
// Round counting
// ============================================================================

#[test]
fn three_spikes_for_one_peer_take_two_rounds() {
    init_logging();

    let results = run_cluster(2, |transport| {
        let rank = transport.rank();
        let window = DelayWindow::new(1, 1);
        let mut manager = EventDeliveryManager::new(config(1, Some(4)), window, 2, 0);
        let register = SpikeRegisterTable::new(1, 1, 2);
        let connections = RecordingConnections::new(VpLayout::try_new(2, 1, rank).unwrap());
        if rank == 0 {
            for lcid in 0..3 {
                register.add_spike(0, 1, SpikeData::new(0, 0, lcid, 0)).unwrap();
            }
        }

        let report = manager
            .gather_spike_data(&SliceClock::at_slice_start(20), &register, &connections, &transport)
            .unwrap();
        (report, connections.spikes())
    });

    let (report_0, spikes_0) = &results[0];
    let (report_1, spikes_1) = &results[1];
    assert_eq!(report_0.rounds, 2);
    assert_eq!(report_1.rounds, 2);
    assert_eq!(report_0.records_sent, 3);
    assert_eq!(report_0.records_deferred, 0);
    assert!(spikes_0.is_empty());
    assert_eq!(
        spikes_1,
        &(0..3)
            .map(|lcid| DeliveredSpike {
                tid: 0,
                syn_index: 0,
                lcid,
                stamp: 21
            })
            .collect::<Vec<_>>()
    );
}

#[test]
fn overflow_is_spread_over_more_rounds() {
    init_logging();

    let results = run_cluster(2, |transport| {
        let rank = transport.rank();
        let mut manager =
            EventDeliveryManager::new(config(1, Some(2)), DelayWindow::new(1, 1), 2, 0);
        let register = SpikeRegisterTable::new(1, 1, 2);
        let connections = RecordingConnections::new(VpLayout::try_new(2, 1, rank).unwrap());
        for lcid in 0..5 {
            register
                .add_spike(0, 1 - rank, SpikeData::new(0, 0, lcid, 0))
                .unwrap();
        }

        let report = manager
            .gather_spike_data(&SliceClock::at_slice_start(0), &register, &connections, &transport)
            .unwrap();
        let mut lcids: Vec<u32> = connections.spikes().iter().map(|spike| spike.lcid).collect();
        lcids.sort_unstable();
        (report, lcids)
    });

    for (report, lcids) in &results {
        // ceil(5 / 2) rounds with data plus one to agree on completion
        assert_eq!(report.rounds, 4);
        assert_eq!(report.records_sent, 5);
        assert_eq!(lcids, &vec![0, 1, 2, 3, 4]);
    }
}

// ============================================================================
// Several slices
// ============================================================================

#[test]
fn consecutive_slices_deliver_with_advancing_stamps() {
    init_logging();
    const SLICES: u64 = 3;
    let window = DelayWindow::new(2, 6);

    let results = run_cluster(2, |transport| {
        let rank = transport.rank();
        let peer = 1 - rank;
        let mut manager = EventDeliveryManager::new(config(2, None), window, 2, 0);
        let register = SpikeRegisterTable::new(2, 2, 2);
        let connections = RecordingConnections::new(VpLayout::try_new(2, 2, rank).unwrap());

        let mut steps = 0;
        for slice in 0..SLICES {
            for tid in 0..2u16 {
                let lcid = (slice * 100) as u32 + rank as u32 * 10 + u32::from(tid);
                let lag = (slice % 2) as u16;
                register
                    .add_spike(usize::from(tid), peer, SpikeData::new(tid, 0, lcid, lag))
                    .unwrap();
            }
            manager
                .gather_spike_data(&SliceClock::at_slice_start(steps), &register, &connections, &transport)
                .unwrap();
            manager.update_moduli();
            steps += 2;
        }
        (manager.moduli().origin(), connections.spikes())
    });

    for (rank, (origin, spikes)) in results.iter().enumerate() {
        let peer = 1 - rank as u32;
        assert_eq!(*origin, SLICES * 2);

        let mut expected: Vec<DeliveredSpike> = (0..SLICES)
            .flat_map(|slice| {
                (0..2u32).map(move |tid| DeliveredSpike {
                    tid: tid as usize,
                    syn_index: 0,
                    lcid: (slice * 100) as u32 + peer * 10 + tid,
                    stamp: slice * 2 + slice % 2 + 1,
                })
            })
            .collect();
        expected.sort();
        let mut spikes = spikes.clone();
        spikes.sort();
        assert_eq!(spikes, expected);
    }
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn routing_error_on_one_rank_does_not_hang_the_other() {
    init_logging();

    let results = run_cluster(2, |transport| {
        let rank = transport.rank();
        let mut manager = EventDeliveryManager::new(config(1, None), DelayWindow::new(1, 1), 2, 0);
        let register = SpikeRegisterTable::new(1, 1, 2);
        let connections = RecordingConnections::new(VpLayout::try_new(2, 1, rank).unwrap())
            .with_synapse_models(1);
        if rank == 0 {
            register.add_spike(0, 1, SpikeData::new(0, 5, 0, 0)).unwrap();
        }

        manager.gather_spike_data(
            &SliceClock::at_slice_start(0),
            &register,
            &connections,
            &transport,
        )
    });

    assert_eq!(
        results[0],
        Err(ExchangeError::Transport(TransportError::Disconnected { rank: 0 }))
    );
    assert_eq!(
        results[1],
        Err(ExchangeError::Routing(RoutingError::UnknownSynapse {
            tid: 0,
            syn_index: 5
        }))
    );
}
