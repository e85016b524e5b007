use axon_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

/// State of one slot of an exchange buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SlotMarker {
    /// The slot carries a record
    Data,
    /// No record this round, the sender may have more in a later round
    #[default]
    Empty,
    /// The sender has nothing left to send for this exchange
    Complete,
}

impl SlotMarker {
    /// Marker written into free slots by a rank that has (`true`) or has not
    /// (`false`) run out of records
    pub fn for_completion(completed: bool) -> Self {
        if completed {
            SlotMarker::Complete
        } else {
            SlotMarker::Empty
        }
    }

    fn to_tag(self) -> u8 {
        match self {
            SlotMarker::Data => 0,
            SlotMarker::Empty => 1,
            SlotMarker::Complete => 2,
        }
    }
}

impl Serde for SlotMarker {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.to_tag());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(SlotMarker::Data),
            1 => Ok(SlotMarker::Empty),
            2 => Ok(SlotMarker::Complete),
            tag => Err(SerdeErr::InvalidTag {
                type_name: "SlotMarker",
                tag,
            }),
        }
    }
}

impl ConstByteLength for SlotMarker {
    fn const_byte_length() -> usize {
        1
    }
}
