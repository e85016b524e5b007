use std::ops::Range;

use log::trace;

use crate::{
    protocol::record_source::RecordSource, ExchangeError, Rank, SlotMarker, Thread, WireRecord,
};

/// What one thread achieved while filling its part of a send buffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CollocationOutcome {
    pub written: usize,
    pub deferred: usize,
    /// The source has nothing left for the thread's ranks
    pub exhausted: bool,
}

impl CollocationOutcome {
    pub fn touched(&self) -> bool {
        self.written > 0
    }
}

/// Fills `slots`, the segments of the ranks in `ranks`, from `source`.
///
/// Free slots are first stamped with `free_marker`. A record whose segment
/// is already full is rejected and the source checkpoint is saved right
/// away, so that record is the first one retried next round. Records for
/// other ranks keep flowing until every segment is full or the source runs
/// dry. If the source is drained without deferrals, the unused tail of
/// every segment written to is stamped complete.
pub(crate) fn collocate<R, S>(
    tid: Thread,
    ranks: &Range<Rank>,
    slots: &mut [R],
    per_rank: usize,
    free_marker: SlotMarker,
    source: &S,
) -> Result<CollocationOutcome, ExchangeError>
where
    R: WireRecord,
    S: RecordSource<R> + ?Sized,
{
    source.restore_entry_point();
    slots.fill(R::sentinel(free_marker));

    let mut offsets = vec![0usize; ranks.len()];
    let mut full_segments = 0;
    let mut drained = ranks.is_empty();
    let mut outcome = CollocationOutcome::default();

    while full_segments < ranks.len() {
        let Some((rank, mut record)) = source.next(ranks) else {
            drained = true;
            break;
        };
        if !ranks.contains(&rank) {
            return Err(ExchangeError::RankOutsideAssignment {
                tid,
                rank,
                start: ranks.start,
                end: ranks.end,
            });
        }

        let segment = rank - ranks.start;
        let offset = offsets[segment];
        if offset < per_rank {
            record.set_marker(SlotMarker::Data);
            slots[segment * per_rank + offset] = record;
            offsets[segment] += 1;
            outcome.written += 1;
            if offsets[segment] == per_rank {
                full_segments += 1;
            }
        } else {
            source.reject_last();
            source.save_entry_point();
            outcome.deferred += 1;
        }
    }

    outcome.exhausted = drained && outcome.deferred == 0;
    if outcome.exhausted && outcome.touched() {
        for (segment, &offset) in offsets
            .iter()
            .enumerate()
            .filter(|(_, offset)| **offset > 0)
        {
            slots[segment * per_rank + offset..(segment + 1) * per_rank]
                .fill(R::sentinel(SlotMarker::Complete));
        }
    }

    source.save_entry_point();
    trace!(
        "thread {}: collocated {} records for ranks {:?}, deferred {}, exhausted: {}",
        tid,
        outcome.written,
        ranks,
        outcome.deferred,
        outcome.exhausted
    );
    Ok(outcome)
}
