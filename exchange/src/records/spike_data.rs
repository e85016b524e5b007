use axon_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

use crate::{constants::INVALID_SYNINDEX, Lcid, SlotMarker, SynIndex, WireRecord};

/// One spike addressed to a connection on a remote thread.
///
/// Wire layout (11 bytes, little-endian):
/// `lcid: u32 | tid: u16 | syn_index: u16 | lag: u16 | marker: u8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpikeData {
    /// Thread on the receiving rank that owns the connection
    pub tid: u16,
    pub syn_index: SynIndex,
    pub lcid: Lcid,
    /// Step within the slice at which the spike was emitted
    pub lag: u16,
    marker: SlotMarker,
}

impl SpikeData {
    pub fn new(tid: u16, syn_index: SynIndex, lcid: Lcid, lag: u16) -> Self {
        Self {
            tid,
            syn_index,
            lcid,
            lag,
            marker: SlotMarker::Data,
        }
    }
}

impl Default for SpikeData {
    fn default() -> Self {
        Self::sentinel(SlotMarker::Empty)
    }
}

impl WireRecord for SpikeData {
    fn sentinel(marker: SlotMarker) -> Self {
        Self {
            tid: 0,
            syn_index: INVALID_SYNINDEX,
            lcid: 0,
            lag: 0,
            marker,
        }
    }

    fn marker(&self) -> SlotMarker {
        self.marker
    }

    fn set_marker(&mut self, marker: SlotMarker) {
        self.marker = marker;
    }
}

impl Serde for SpikeData {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.lcid.ser(writer);
        self.tid.ser(writer);
        self.syn_index.ser(writer);
        self.lag.ser(writer);
        self.marker.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let lcid = Lcid::de(reader)?;
        let tid = u16::de(reader)?;
        let syn_index = SynIndex::de(reader)?;
        let lag = u16::de(reader)?;
        let marker = SlotMarker::de(reader)?;
        Ok(Self {
            tid,
            syn_index,
            lcid,
            lag,
            marker,
        })
    }
}

impl ConstByteLength for SpikeData {
    fn const_byte_length() -> usize {
        Lcid::const_byte_length()
            + u16::const_byte_length()
            + SynIndex::const_byte_length()
            + u16::const_byte_length()
            + SlotMarker::const_byte_length()
    }
}
