use crate::SerdeErr;

/// Cursor over a received byte slice
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn bytes_read(&self) -> usize {
        self.cursor
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        if self.bytes_remaining() < N {
            return Err(SerdeErr::UnexpectedEnd {
                offset: self.cursor,
                needed: N,
                len: self.buffer.len(),
            });
        }
        let mut output = [0u8; N];
        output.copy_from_slice(&self.buffer[self.cursor..self.cursor + N]);
        self.cursor += N;
        Ok(output)
    }
}
