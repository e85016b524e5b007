use axon_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

use crate::{constants::INVALID_INDEX, Lcid, NodeId, SlotMarker, SynIndex, WireRecord};

/// Location of a connection: the rank and thread hosting it, and its
/// address inside that thread's connection storage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Target {
    pub rank: u32,
    pub tid: u16,
    pub syn_index: SynIndex,
    pub lcid: Lcid,
}

impl Target {
    pub fn new(rank: u32, tid: u16, syn_index: SynIndex, lcid: Lcid) -> Self {
        Self {
            rank,
            tid,
            syn_index,
            lcid,
        }
    }
}

/// Tells the rank owning `source_gid` where one of the node's outgoing
/// connections lives.
///
/// A `source_gid` of `INVALID_INDEX` is the "no more targets" sentinel a
/// source table returns when iteration is exhausted; it never enters a
/// buffer.
///
/// Wire layout (21 bytes, little-endian):
/// `source_gid: u64 | rank: u32 | lcid: u32 | tid: u16 | syn_index: u16 | marker: u8`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetData {
    pub source_gid: NodeId,
    pub target: Target,
    marker: SlotMarker,
}

impl TargetData {
    pub fn new(source_gid: NodeId, target: Target) -> Self {
        Self {
            source_gid,
            target,
            marker: SlotMarker::Data,
        }
    }

    /// The "no more targets" sentinel
    pub fn invalid() -> Self {
        Self {
            source_gid: INVALID_INDEX,
            target: Target::default(),
            marker: SlotMarker::Empty,
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.source_gid == INVALID_INDEX
    }
}

impl Default for TargetData {
    fn default() -> Self {
        Self::sentinel(SlotMarker::Empty)
    }
}

impl WireRecord for TargetData {
    fn sentinel(marker: SlotMarker) -> Self {
        Self {
            source_gid: INVALID_INDEX,
            target: Target::default(),
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

impl Serde for TargetData {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.source_gid.ser(writer);
        self.target.rank.ser(writer);
        self.target.lcid.ser(writer);
        self.target.tid.ser(writer);
        self.target.syn_index.ser(writer);
        self.marker.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let source_gid = NodeId::de(reader)?;
        let rank = u32::de(reader)?;
        let lcid = Lcid::de(reader)?;
        let tid = u16::de(reader)?;
        let syn_index = SynIndex::de(reader)?;
        let marker = SlotMarker::de(reader)?;
        Ok(Self {
            source_gid,
            target: Target::new(rank, tid, syn_index, lcid),
            marker,
        })
    }
}

impl ConstByteLength for TargetData {
    fn const_byte_length() -> usize {
        NodeId::const_byte_length()
            + u32::const_byte_length()
            + Lcid::const_byte_length()
            + u16::const_byte_length()
            + SynIndex::const_byte_length()
            + SlotMarker::const_byte_length()
    }
}
