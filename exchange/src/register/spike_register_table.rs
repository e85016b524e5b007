use std::{
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::{Mutex, RwLock};

use crate::{register::error::RegisterError, Rank, SpikeData, SpikeRegister, Thread};

struct SpikeEntry {
    rank: Rank,
    data: SpikeData,
    // processed iff equal to the owning queue's marker
    processed: AtomicBool,
}

// Field order gives the iteration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
struct Position {
    source: Thread,
    lag: usize,
    index: usize,
}

#[derive(Default)]
struct EntryPoint {
    current: Position,
    last: Option<Position>,
    rejected: Option<Position>,
    saved: Option<Position>,
}

/// In-memory spike register: one queue per emitting thread and lag, and
/// one checkpointed entry point per collocating thread.
///
/// Entries carry a processed flag with per-queue polarity, so re-walking
/// the table from a restored entry point skips everything already sent,
/// and `toggle_processed_flags` re-arms a whole queue in O(1).
pub struct SpikeRegisterTable {
    num_ranks: usize,
    min_delay: usize,
    queues: Vec<RwLock<Vec<Vec<SpikeEntry>>>>,
    processed_marker: Vec<AtomicBool>,
    entry_points: Vec<Mutex<EntryPoint>>,
}

impl SpikeRegisterTable {
    pub fn new(num_threads: usize, min_delay: usize, num_ranks: usize) -> Self {
        let mut table = Self {
            num_ranks,
            min_delay,
            queues: Vec::new(),
            processed_marker: Vec::new(),
            entry_points: Vec::new(),
        };
        table.configure(num_threads, min_delay, num_ranks);
        table
    }

    /// Re-shapes the table, dropping all pending spikes
    pub fn configure(&mut self, num_threads: usize, min_delay: usize, num_ranks: usize) {
        self.num_ranks = num_ranks;
        self.min_delay = min_delay;
        self.queues = (0..num_threads)
            .map(|_| RwLock::new((0..min_delay).map(|_| Vec::new()).collect()))
            .collect();
        self.processed_marker = (0..num_threads).map(|_| AtomicBool::new(true)).collect();
        self.entry_points = (0..num_threads)
            .map(|_| Mutex::new(EntryPoint::default()))
            .collect();
    }

    /// Records a spike emitted by thread `tid` for a connection on `rank`
    pub fn add_spike(&self, tid: Thread, rank: Rank, data: SpikeData) -> Result<(), RegisterError> {
        if tid >= self.queues.len() {
            return Err(RegisterError::ThreadOutOfRange {
                tid,
                num_threads: self.queues.len(),
            });
        }
        if usize::from(data.lag) >= self.min_delay {
            return Err(RegisterError::LagOutOfRange {
                lag: data.lag,
                min_delay: self.min_delay,
            });
        }
        if rank >= self.num_ranks {
            return Err(RegisterError::RankOutOfRange {
                rank,
                num_ranks: self.num_ranks,
            });
        }

        let unprocessed = !self.processed_marker[tid].load(Ordering::Acquire);
        self.queues[tid].write()[usize::from(data.lag)].push(SpikeEntry {
            rank,
            data,
            processed: AtomicBool::new(unprocessed),
        });
        Ok(())
    }

    /// Number of spikes not yet handed out
    pub fn pending_count(&self) -> usize {
        self.queues
            .iter()
            .zip(&self.processed_marker)
            .map(|(queue, marker)| {
                let marker = marker.load(Ordering::Acquire);
                queue
                    .read()
                    .iter()
                    .flatten()
                    .filter(|entry| entry.processed.load(Ordering::Relaxed) != marker)
                    .count()
            })
            .sum()
    }

    /// Number of spikes held, processed or not
    pub fn len(&self) -> usize {
        self.queues
            .iter()
            .map(|queue| queue.read().iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_processed(&self, position: Position, processed: bool) {
        let marker = self.processed_marker[position.source].load(Ordering::Acquire);
        let queue = self.queues[position.source].read();
        if let Some(entry) = queue
            .get(position.lag)
            .and_then(|entries| entries.get(position.index))
        {
            let flag = if processed { marker } else { !marker };
            entry.processed.store(flag, Ordering::Relaxed);
        }
    }
}

impl SpikeRegister for SpikeRegisterTable {
    fn num_threads(&self) -> usize {
        self.queues.len()
    }

    fn reset_entry_point(&self, tid: Thread) {
        *self.entry_points[tid].lock() = EntryPoint::default();
    }

    fn save_entry_point(&self, tid: Thread) {
        let mut entry_point = self.entry_points[tid].lock();
        if entry_point.saved.is_none() {
            entry_point.saved = Some(entry_point.rejected.take().unwrap_or(entry_point.current));
        }
    }

    fn restore_entry_point(&self, tid: Thread) {
        let mut entry_point = self.entry_points[tid].lock();
        if let Some(saved) = entry_point.saved.take() {
            entry_point.current = saved;
        }
        entry_point.last = None;
        entry_point.rejected = None;
    }

    fn get_next(&self, tid: Thread, ranks: &Range<Rank>) -> Option<(Rank, SpikeData)> {
        let mut entry_point = self.entry_points[tid].lock();
        let mut position = entry_point.current;

        while position.source < self.queues.len() {
            let marker = self.processed_marker[position.source].load(Ordering::Acquire);
            let queue = self.queues[position.source].read();
            while position.lag < queue.len() {
                let entries = &queue[position.lag];
                while position.index < entries.len() {
                    let entry = &entries[position.index];
                    if ranks.contains(&entry.rank)
                        && entry.processed.load(Ordering::Relaxed) != marker
                    {
                        entry.processed.store(marker, Ordering::Relaxed);
                        entry_point.last = Some(position);
                        entry_point.current = Position {
                            index: position.index + 1,
                            ..position
                        };
                        return Some((entry.rank, entry.data));
                    }
                    position.index += 1;
                }
                position.lag += 1;
                position.index = 0;
            }
            position = Position {
                source: position.source + 1,
                lag: 0,
                index: 0,
            };
        }

        entry_point.current = position;
        entry_point.last = None;
        None
    }

    fn reject_last(&self, tid: Thread) {
        let mut entry_point = self.entry_points[tid].lock();
        let Some(last) = entry_point.last.take() else {
            return;
        };
        self.set_processed(last, false);
        entry_point.rejected = Some(match entry_point.rejected {
            Some(rejected) => rejected.min(last),
            None => last,
        });
    }

    fn clear(&self, tid: Thread) {
        for entries in self.queues[tid].write().iter_mut() {
            entries.clear();
        }
    }

    fn toggle_processed_flags(&self, tid: Thread) {
        self.processed_marker[tid].fetch_xor(true, Ordering::AcqRel);
    }
}
