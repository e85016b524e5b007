use thiserror::Error;

use crate::Delay;

/// Errors that can occur when building a delay window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuliError {
    /// Ring buffer moduli are undefined for a zero delay
    #[error("{which} delay must be at least 1 step")]
    ZeroDelay {
        which: &'static str,
    },

    /// The minimum delay may not exceed the maximum delay
    #[error("min_delay {min_delay} exceeds max_delay {max_delay}")]
    InvertedWindow {
        min_delay: Delay,
        max_delay: Delay,
    },
}
