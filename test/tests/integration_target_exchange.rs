use proptest::prelude::*;

use axon_exchange::{
    CollectiveTransport, DelayWindow, EventDeliveryManager, ExchangeConfig, ExchangeError,
    NodeId, NodeLocator, Target, TargetData, Thread, VpLayout,
};
use axon_test::{run_cluster, RecordingConnections};

fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

fn manager(
    num_threads: usize,
    num_ranks: usize,
    target_records_per_rank: usize,
) -> EventDeliveryManager {
    let config = ExchangeConfig {
        num_threads,
        target_records_per_rank,
        ..Default::default()
    };
    EventDeliveryManager::new(config, DelayWindow::new(1, 1), num_ranks, 0)
}

/// Every rank holds one connection from every node in `0..num_nodes`, with
/// the rank encoded in the connection id. Returns the targets registered
/// on each rank.
fn exchange_full_fan_in(
    num_ranks: usize,
    num_threads: usize,
    num_nodes: NodeId,
    capacity: usize,
) -> Vec<(usize, Vec<(Thread, TargetData)>)> {
    run_cluster(num_ranks, |transport| {
        let rank = transport.rank();
        let layout = VpLayout::try_new(num_ranks, num_threads, rank).unwrap();
        let connections = RecordingConnections::new(layout);
        for gid in 0..num_nodes {
            let target = Target::new(rank as u32, (gid % num_threads as NodeId) as u16, 0, gid as u32);
            connections.source_table().add(TargetData::new(gid, target));
        }

        let report = manager(num_threads, num_ranks, capacity)
            .gather_target_data(&connections, &layout, &transport)
            .unwrap();
        (report.rounds, connections.targets())
    })
}

#[test]
fn targets_reach_the_thread_of_their_source_node() {
    init_logging();
    let num_nodes = 12;

    let results = exchange_full_fan_in(3, 2, num_nodes, 128);

    for (rank, (rounds, targets)) in results.iter().enumerate() {
        let layout = VpLayout::try_new(3, 2, rank).unwrap();
        assert_eq!(*rounds, 2);

        let local_nodes = (0..num_nodes)
            .filter(|&gid| layout.local_thread_of(gid).is_some())
            .count();
        assert_eq!(targets.len(), local_nodes * 3);
        for (tid, target_data) in targets {
            assert_eq!(layout.local_thread_of(target_data.source_gid), Some(*tid));
            assert_eq!(u64::from(target_data.target.lcid), target_data.source_gid);
        }
    }
}

#[test]
fn small_buffers_take_more_rounds_but_lose_nothing() {
    init_logging();

    let results = exchange_full_fan_in(2, 1, 9, 2);

    for (rank, (rounds, targets)) in results.iter().enumerate() {
        // rank 0 hosts the five even nodes, so every sender needs three rounds for it
        assert_eq!(*rounds, 4);
        let expected_nodes: Vec<NodeId> = (0..9).filter(|gid| gid % 2 == rank as NodeId).collect();

        let mut received: Vec<(u32, NodeId)> = targets
            .iter()
            .map(|(_, target_data)| (target_data.target.rank, target_data.source_gid))
            .collect();
        received.sort_unstable();
        let expected: Vec<(u32, NodeId)> = (0..2u32)
            .flat_map(|sender| expected_nodes.iter().map(move |&gid| (sender, gid)))
            .collect();
        assert_eq!(received, expected);
    }
}

#[test]
fn cleared_source_table_is_refused_on_every_rank() {
    let results = run_cluster(2, |transport| {
        let layout = VpLayout::try_new(2, 1, transport.rank()).unwrap();
        let connections = RecordingConnections::new(layout);
        connections.source_table().add(TargetData::new(1, Target::default()));
        connections.clear_source_table();
        assert!(connections.source_table().is_empty());

        manager(1, 2, 8).gather_target_data(&connections, &layout, &transport)
    });

    for result in results {
        assert_eq!(result, Err(ExchangeError::SourceTableCleared));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_every_target_registered_once(
        num_ranks in 1usize..4,
        num_threads in 1usize..4,
        num_nodes in 0u64..30,
        capacity in 1usize..5,
    ) {
        let results = exchange_full_fan_in(num_ranks, num_threads, num_nodes, capacity);

        let mut registered = 0;
        for (rank, (_, targets)) in results.iter().enumerate() {
            let layout = VpLayout::try_new(num_ranks, num_threads, rank).unwrap();
            for (tid, target_data) in targets {
                prop_assert_eq!(layout.local_thread_of(target_data.source_gid), Some(*tid));
            }
            let mut keys: Vec<(u32, NodeId)> = targets
                .iter()
                .map(|(_, target_data)| (target_data.target.rank, target_data.source_gid))
                .collect();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(keys.len(), targets.len());
            registered += targets.len();
        }
        prop_assert_eq!(registered, num_ranks * num_nodes as usize);
    }
}
