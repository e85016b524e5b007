//! # Axon Exchange
//! Moves spike events and connection routing data between the ranks of a
//! parallel, time-stepped simulation.
//!
//! Both exchanges pack per-destination records into fixed-capacity,
//! rank-segmented buffers and repeat a single blocking all-to-all until
//! every rank has drained its local backlog. Records that do not fit are
//! deferred through a checkpoint on their source and retried in the next
//! round, so memory stays bounded no matter how many events are pending.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

mod buffer;
mod clock;
mod config;
mod connection;
mod constants;
mod error;
mod event_delivery_manager;
mod layout;
mod moduli;
mod parallel;
mod protocol;
mod records;
mod register;
mod transport;
mod types;

pub use axon_serde::{ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr};

pub use buffer::{
    error::BufferError, exchange_buffer::ExchangeBuffer, exchange_buffers::ExchangeBuffers,
};
pub use clock::SliceClock;
pub use config::ExchangeConfig;
pub use connection::{error::RoutingError, ConnectionLayer, NodeLocator};
pub use constants::{
    DEFAULT_TARGET_RECORDS_PER_RANK, INVALID_INDEX, INVALID_SYNINDEX, MIN_SPIKE_RECORDS_PER_RANK,
    SPIKE_BUFFER_HEADROOM,
};
pub use error::{ConfigError, ExchangeError};
pub use event_delivery_manager::EventDeliveryManager;
pub use layout::{RankAssignment, VpLayout};
pub use moduli::{
    delay_window::DelayWindow, error::ModuliError, modulus_engine::ModulusEngine,
};
pub use protocol::report::ExchangeReport;
pub use records::{
    slot_marker::SlotMarker,
    spike_data::SpikeData,
    spike_event::SpikeEvent,
    target_data::{Target, TargetData},
    wire_record::WireRecord,
};
pub use register::{error::RegisterError, spike_register_table::SpikeRegisterTable, SpikeRegister};
pub use transport::{
    error::TransportError,
    local_hub::{LocalHub, LocalTransport},
    CollectiveTransport,
};
pub use types::{Delay, Lcid, NodeId, Rank, Step, SynIndex, Thread};
