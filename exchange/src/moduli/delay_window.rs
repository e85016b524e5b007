use crate::{moduli::error::ModuliError, Delay};

/// The span of delays present in the network.
/// One communication round covers exactly `min_delay` steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DelayWindow {
    min_delay: Delay,
    max_delay: Delay,
}

impl DelayWindow {
    pub fn try_new(min_delay: Delay, max_delay: Delay) -> Result<Self, ModuliError> {
        if min_delay == 0 {
            return Err(ModuliError::ZeroDelay { which: "min" });
        }
        if max_delay == 0 {
            return Err(ModuliError::ZeroDelay { which: "max" });
        }
        if min_delay > max_delay {
            return Err(ModuliError::InvertedWindow {
                min_delay,
                max_delay,
            });
        }
        Ok(Self {
            min_delay,
            max_delay,
        })
    }

    /// # Panics
    /// Panics if either delay is zero or min_delay > max_delay.
    /// For non-panicking version, use `try_new`.
    pub fn new(min_delay: Delay, max_delay: Delay) -> Self {
        Self::try_new(min_delay, max_delay).unwrap_or_else(|e| panic!("DelayWindow error: {}", e))
    }

    pub fn min_delay(&self) -> Delay {
        self.min_delay
    }

    pub fn max_delay(&self) -> Delay {
        self.max_delay
    }

    pub fn min_delay_steps(&self) -> usize {
        self.min_delay as usize
    }

    /// Length of the moduli tables, `min_delay + max_delay`
    pub fn len(&self) -> usize {
        self.min_delay as usize + self.max_delay as usize
    }

    /// Number of min_delay-wide bins needed to cover the window
    pub fn slice_buffer_count(&self) -> usize {
        self.len().div_ceil(self.min_delay_steps())
    }
}
