pub mod slot_marker;
pub mod spike_data;
pub mod spike_event;
pub mod target_data;
pub mod wire_record;
