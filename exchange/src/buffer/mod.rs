pub mod error;
pub mod exchange_buffer;
pub mod exchange_buffers;
