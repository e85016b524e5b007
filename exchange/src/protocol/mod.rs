pub(crate) mod collocation;
pub(crate) mod delivery;
pub(crate) mod record_source;
pub mod report;
pub(crate) mod round_state;
pub(crate) mod spike_exchange;
pub(crate) mod target_exchange;
