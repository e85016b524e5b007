use crate::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

// All integers are little-endian on the wire.
macro_rules! impl_serde_for_int {
    ($($int:ty),*) => {
        $(
            impl Serde for $int {
                fn ser(&self, writer: &mut dyn ByteWrite) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                    let bytes = reader.read_array::<{ std::mem::size_of::<$int>() }>()?;
                    Ok(<$int>::from_le_bytes(bytes))
                }
            }

            impl ConstByteLength for $int {
                fn const_byte_length() -> usize {
                    std::mem::size_of::<$int>()
                }
            }
        )*
    };
}

impl_serde_for_int!(u8, u16, u32, u64, i32, i64);

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(SerdeErr::InvalidTag {
                type_name: "bool",
                tag,
            }),
        }
    }
}

impl ConstByteLength for bool {
    fn const_byte_length() -> usize {
        1
    }
}
