use crate::{Delay, Step};

/// Position of the simulation clock as seen by the exchange
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceClock {
    /// Step count at the start of the current slice
    pub steps: Step,
    /// Sub-step within the slice; spikes are only delivered at 0
    pub from_step: Delay,
}

impl SliceClock {
    pub fn new(steps: Step, from_step: Delay) -> Self {
        Self { steps, from_step }
    }

    pub fn at_slice_start(steps: Step) -> Self {
        Self::new(steps, 0)
    }

    pub fn is_slice_start(&self) -> bool {
        self.from_step == 0
    }

    /// Delivery stamp for every lag of a slice: `steps + lag + 1`
    pub fn prepared_timestamps(&self, min_delay: usize) -> Vec<Step> {
        (1..=min_delay as Step).map(|offset| self.steps + offset).collect()
    }
}
