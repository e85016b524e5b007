use axon_serde::{ConstByteLength, Serde};

use crate::SlotMarker;

/// A fixed-size record that travels through an exchange buffer.
/// Every slot of a buffer is either a record or a sentinel.
pub trait WireRecord: Serde + ConstByteLength + Copy + Send + Sync + 'static {
    /// A record carrying no data, only the given marker
    fn sentinel(marker: SlotMarker) -> Self;

    fn marker(&self) -> SlotMarker;

    fn set_marker(&mut self, marker: SlotMarker);

    fn set_complete(&mut self) {
        self.set_marker(SlotMarker::Complete);
    }

    fn is_empty(&self) -> bool {
        self.marker() == SlotMarker::Empty
    }

    fn is_complete(&self) -> bool {
        self.marker() == SlotMarker::Complete
    }

    fn is_data(&self) -> bool {
        self.marker() == SlotMarker::Data
    }
}
