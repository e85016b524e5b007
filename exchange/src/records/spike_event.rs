use crate::Step;

/// A spike handed to the connection layer for local delivery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpikeEvent {
    /// Step at which the spike takes effect at the connection
    pub stamp: Step,
}

impl SpikeEvent {
    pub fn new(stamp: Step) -> Self {
        Self { stamp }
    }
}
