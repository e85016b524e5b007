use std::ops::Range;

use axon_serde::{ByteReader, ByteWrite};

use crate::{buffer::error::BufferError, Rank, SlotMarker, WireRecord};

/// Flat, fixed-capacity sequence of records split into one equally sized
/// segment per rank. Segment `r` holds the records exchanged with rank `r`.
///
/// The capacity never grows to absorb a backlog; records that do not fit
/// wait for the next round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeBuffer<R: WireRecord> {
    slots: Vec<R>,
    num_ranks: usize,
    per_rank: usize,
}

impl<R: WireRecord> ExchangeBuffer<R> {
    pub fn try_new(num_ranks: usize, per_rank: usize) -> Result<Self, BufferError> {
        let mut buffer = Self::released();
        buffer.resize(num_ranks, per_rank)?;
        Ok(buffer)
    }

    /// A buffer without any segments, as left behind by `release`
    pub fn released() -> Self {
        Self {
            slots: Vec::new(),
            num_ranks: 0,
            per_rank: 0,
        }
    }

    /// Re-shapes the buffer and stamps every slot empty
    pub fn resize(&mut self, num_ranks: usize, per_rank: usize) -> Result<(), BufferError> {
        if num_ranks == 0 {
            return Err(BufferError::ZeroRanks);
        }
        if per_rank == 0 {
            return Err(BufferError::ZeroCapacity);
        }
        self.num_ranks = num_ranks;
        self.per_rank = per_rank;
        self.slots.clear();
        self.slots
            .resize(num_ranks * per_rank, R::sentinel(SlotMarker::Empty));
        Ok(())
    }

    pub fn release(&mut self) {
        self.slots = Vec::new();
        self.num_ranks = 0;
        self.per_rank = 0;
    }

    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    /// Slots per rank segment
    pub fn per_rank(&self) -> usize {
        self.per_rank
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn bytes_per_rank(&self) -> usize {
        self.per_rank * R::const_byte_length()
    }

    pub fn byte_length(&self) -> usize {
        self.capacity() * R::const_byte_length()
    }

    pub fn slots(&self) -> &[R] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [R] {
        &mut self.slots
    }

    fn segment_range(&self, rank: Rank) -> Range<usize> {
        rank * self.per_rank..(rank + 1) * self.per_rank
    }

    pub fn segment(&self, rank: Rank) -> &[R] {
        &self.slots[self.segment_range(rank)]
    }

    pub fn segment_mut(&mut self, rank: Rank) -> &mut [R] {
        let range = self.segment_range(rank);
        &mut self.slots[range]
    }

    /// Overwrites every slot with a sentinel
    pub fn stamp(&mut self, marker: SlotMarker) {
        self.slots.fill(R::sentinel(marker));
    }

    /// True when every slot reports that its sender is done
    pub fn all_complete(&self) -> bool {
        self.slots.iter().all(WireRecord::is_complete)
    }

    pub fn data_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_data()).count()
    }

    pub fn encode(&self, writer: &mut dyn ByteWrite) {
        for slot in &self.slots {
            slot.ser(writer);
        }
    }

    pub fn decode(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let expected = self.byte_length();
        if bytes.len() != expected {
            return Err(BufferError::ByteLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let mut reader = ByteReader::new(bytes);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = R::de(&mut reader).map_err(|source| BufferError::Decode {
                slot: index,
                source,
            })?;
        }
        Ok(())
    }
}
