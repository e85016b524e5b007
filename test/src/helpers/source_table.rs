use std::{
    ops::Range,
    sync::atomic::{AtomicBool, Ordering},
};

use parking_lot::{Mutex, RwLock};

use axon_exchange::{NodeLocator, Rank, TargetData, Thread, VpLayout};

struct SourceEntry {
    rank: Rank,
    target_data: TargetData,
    processed: AtomicBool,
}

#[derive(Default)]
struct Cursor {
    current: usize,
    last: Option<usize>,
    rejected: Option<usize>,
    saved: Option<usize>,
}

/// Source table of one rank: for every local connection, the source node
/// and where the connection lives.
///
/// Collocating threads walk all entries in insertion order, restricted to
/// entries whose source node lives on one of their ranks. Each entry is
/// handed out once over the table's lifetime; a rejected entry is handed
/// out again after the next restore.
pub struct SourceTable {
    layout: VpLayout,
    entries: RwLock<Vec<SourceEntry>>,
    cursors: Vec<Mutex<Cursor>>,
}

impl SourceTable {
    pub fn new(layout: VpLayout) -> Self {
        Self {
            layout,
            entries: RwLock::new(Vec::new()),
            cursors: (0..layout.num_threads())
                .map(|_| Mutex::new(Cursor::default()))
                .collect(),
        }
    }

    pub fn layout(&self) -> &VpLayout {
        &self.layout
    }

    pub fn add(&self, target_data: TargetData) {
        self.entries.write().push(SourceEntry {
            rank: self.layout.process_id_of(target_data.source_gid),
            target_data,
            processed: AtomicBool::new(false),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.write().clear();
        for cursor in &self.cursors {
            *cursor.lock() = Cursor::default();
        }
    }

    pub fn reset_entry_point(&self, tid: Thread) {
        *self.cursors[tid].lock() = Cursor::default();
    }

    pub fn save_entry_point(&self, tid: Thread) {
        let mut cursor = self.cursors[tid].lock();
        if cursor.saved.is_none() {
            cursor.saved = Some(cursor.rejected.take().unwrap_or(cursor.current));
        }
    }

    pub fn restore_entry_point(&self, tid: Thread) {
        let mut cursor = self.cursors[tid].lock();
        if let Some(saved) = cursor.saved.take() {
            cursor.current = saved;
        }
        cursor.last = None;
        cursor.rejected = None;
    }

    pub fn get_next(&self, tid: Thread, ranks: &Range<Rank>) -> TargetData {
        let mut cursor = self.cursors[tid].lock();
        let entries = self.entries.read();
        while let Some(entry) = entries.get(cursor.current) {
            let index = cursor.current;
            cursor.current += 1;
            if ranks.contains(&entry.rank) && !entry.processed.swap(true, Ordering::Relaxed) {
                cursor.last = Some(index);
                return entry.target_data;
            }
        }
        cursor.last = None;
        TargetData::invalid()
    }

    pub fn reject_last(&self, tid: Thread) {
        let mut cursor = self.cursors[tid].lock();
        let Some(last) = cursor.last.take() else {
            return;
        };
        if let Some(entry) = self.entries.read().get(last) {
            entry.processed.store(false, Ordering::Relaxed);
        }
        cursor.rejected = Some(cursor.rejected.map_or(last, |rejected| rejected.min(last)));
    }
}

#[cfg(test)]
mod tests {
    use axon_exchange::Target;

    use super::*;

    #[test]
    fn walks_only_the_requested_ranks() {
        // 2 ranks x 1 thread: even gids live on rank 0, odd on rank 1
        let table = SourceTable::new(VpLayout::try_new(2, 1, 0).unwrap());
        for gid in 0..4 {
            table.add(TargetData::new(gid, Target::default()));
        }

        assert_eq!(table.get_next(0, &(1..2)).source_gid, 1);
        assert_eq!(table.get_next(0, &(1..2)).source_gid, 3);
        assert!(table.get_next(0, &(1..2)).is_invalid());
    }

    #[test]
    fn rejected_entry_comes_back_after_restore() {
        let table = SourceTable::new(VpLayout::try_new(1, 1, 0).unwrap());
        for gid in 0..3 {
            table.add(TargetData::new(gid, Target::default()));
        }

        assert_eq!(table.get_next(0, &(0..1)).source_gid, 0);
        assert_eq!(table.get_next(0, &(0..1)).source_gid, 1);
        table.reject_last(0);
        table.save_entry_point(0);
        assert_eq!(table.get_next(0, &(0..1)).source_gid, 2);
        table.save_entry_point(0);

        table.restore_entry_point(0);
        assert_eq!(table.get_next(0, &(0..1)).source_gid, 1);
        assert!(table.get_next(0, &(0..1)).is_invalid());
    }
}
