use axon_serde::ByteWriter;
use log::trace;

use crate::{
    buffer::{error::BufferError, exchange_buffer::ExchangeBuffer},
    CollectiveTransport, ExchangeError, WireRecord,
};

/// Send and receive buffers of one exchange protocol, plus the byte
/// staging areas handed to the transport
pub struct ExchangeBuffers<R: WireRecord> {
    pub send: ExchangeBuffer<R>,
    pub recv: ExchangeBuffer<R>,
    send_bytes: ByteWriter,
    recv_bytes: Vec<u8>,
}

impl<R: WireRecord> ExchangeBuffers<R> {
    pub fn try_new(num_ranks: usize, per_rank: usize) -> Result<Self, BufferError> {
        Ok(Self {
            send: ExchangeBuffer::try_new(num_ranks, per_rank)?,
            recv: ExchangeBuffer::try_new(num_ranks, per_rank)?,
            send_bytes: ByteWriter::new(),
            recv_bytes: Vec::new(),
        })
    }

    pub fn released() -> Self {
        Self {
            send: ExchangeBuffer::released(),
            recv: ExchangeBuffer::released(),
            send_bytes: ByteWriter::new(),
            recv_bytes: Vec::new(),
        }
    }

    pub fn resize(&mut self, num_ranks: usize, per_rank: usize) -> Result<(), BufferError> {
        self.send.resize(num_ranks, per_rank)?;
        self.recv.resize(num_ranks, per_rank)?;
        self.send_bytes = ByteWriter::with_capacity(self.send.byte_length());
        self.recv_bytes = vec![0; self.recv.byte_length()];
        Ok(())
    }

    pub fn release(&mut self) {
        *self = Self::released();
    }

    pub fn num_ranks(&self) -> usize {
        self.send.num_ranks()
    }

    pub fn per_rank(&self) -> usize {
        self.send.per_rank()
    }

    /// Serializes the send buffer, runs one all-to-all, and decodes the
    /// result into the receive buffer
    pub fn exchange<T: CollectiveTransport + ?Sized>(
        &mut self,
        transport: &T,
    ) -> Result<(), ExchangeError> {
        if transport.num_processes() != self.send.num_ranks() {
            return Err(ExchangeError::RankCountMismatch {
                buffer_ranks: self.send.num_ranks(),
                transport_ranks: transport.num_processes(),
            });
        }

        self.send_bytes.reset();
        self.send.encode(&mut self.send_bytes);
        self.recv_bytes.resize(self.recv.byte_length(), 0);

        let bytes_per_process = self.send.bytes_per_rank();
        trace!(
            "rank {}: all-to-all of {} bytes per process",
            transport.rank(),
            bytes_per_process
        );
        transport.all_to_all(
            self.send_bytes.as_slice(),
            &mut self.recv_bytes,
            bytes_per_process,
        )?;

        self.recv.decode(&self.recv_bytes)?;
        Ok(())
    }
}
