//! # Axon Serde
//! Fixed-width, little-endian encoding of the records exchanged between
//! ranks. Every field is written explicitly so that two processes agree on
//! the byte layout regardless of host endianness or struct padding.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod integer;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use serde::{ConstByteLength, Serde};
