use crate::{ByteReader, ByteWrite, SerdeErr};

/// A type that can be written to and read back from the exchange wire format
pub trait Serde: Sized {
    fn ser(&self, writer: &mut dyn ByteWrite);
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
}

/// Encoded size of a type whose layout never varies.
/// Exchange buffers rely on this to compute per-rank byte counts.
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}
