//! Runs one phase of a round on every worker thread of this process and
//! joins them again. The join is the barrier between phases.

use std::ops::Range;

use log::warn;

use crate::{ExchangeError, Rank, RankAssignment, Thread};

cfg_if! {
    if #[cfg(feature = "parallel")] {
        use rayon::prelude::*;

        /// Calls `phase(tid)` for every thread and collects the results in thread order
        pub(crate) fn each_thread<T, F>(num_threads: usize, phase: F) -> Vec<T>
        where
            T: Send,
            F: Fn(Thread) -> T + Send + Sync,
        {
            (0..num_threads).into_par_iter().map(phase).collect()
        }

        /// Hands item `tid` to thread `tid`
        pub(crate) fn each_thread_with<I, T, F>(items: Vec<I>, phase: F) -> Vec<T>
        where
            I: Send,
            T: Send,
            F: Fn(Thread, I) -> T + Send + Sync,
        {
            items
                .into_par_iter()
                .enumerate()
                .map(|(tid, item)| phase(tid, item))
                .collect()
        }
    } else {
        pub(crate) fn each_thread<T, F>(num_threads: usize, phase: F) -> Vec<T>
        where
            T: Send,
            F: Fn(Thread) -> T + Send + Sync,
        {
            (0..num_threads).map(phase).collect()
        }

        pub(crate) fn each_thread_with<I, T, F>(items: Vec<I>, phase: F) -> Vec<T>
        where
            I: Send,
            T: Send,
            F: Fn(Thread, I) -> T + Send + Sync,
        {
            items
                .into_iter()
                .enumerate()
                .map(|(tid, item)| phase(tid, item))
                .collect()
        }
    }
}

/// Surfaces the first error raised by any thread once all of them have
/// returned. Later errors are only logged.
pub(crate) fn join_results<T>(
    results: Vec<Result<T, ExchangeError>>,
) -> Result<Vec<T>, ExchangeError> {
    let mut values = Vec::with_capacity(results.len());
    let mut first_error = None;
    for (tid, result) in results.into_iter().enumerate() {
        match result {
            Ok(value) => values.push(value),
            Err(error) if first_error.is_none() => first_error = Some(error),
            Err(error) => warn!("thread {}: further error in the same phase: {}", tid, error),
        }
    }
    match first_error {
        Some(error) => Err(error),
        None => Ok(values),
    }
}

/// Splits the slots of a send buffer into the disjoint, contiguous part
/// each thread writes to, together with the ranks that part covers.
/// Threads without ranks get an empty slice.
pub(crate) fn split_by_thread<'a, R>(
    mut slots: &'a mut [R],
    assignment: &RankAssignment,
    per_rank: usize,
) -> Vec<(Range<Rank>, &'a mut [R])> {
    let mut parts = Vec::with_capacity(assignment.num_threads());
    for tid in 0..assignment.num_threads() {
        let ranks = assignment.ranks_for_thread(tid);
        let (part, rest) = std::mem::take(&mut slots).split_at_mut(ranks.len() * per_rank);
        slots = rest;
        parts.push((ranks, part));
    }
    parts
}
