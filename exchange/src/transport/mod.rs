use crate::Rank;

pub mod error;
pub mod local_hub;

use error::TransportError;

/// Blocking collective communication between all participating processes
pub trait CollectiveTransport {
    fn num_processes(&self) -> usize;

    /// Rank of the calling process
    fn rank(&self) -> Rank;

    /// Sends `send[r * n..(r + 1) * n]` to every rank `r` and receives rank
    /// `r`'s contribution into `recv[r * n..(r + 1) * n]`, with
    /// `n = bytes_per_process`. Every process must call this with the same
    /// `bytes_per_process`; the call returns once all have contributed.
    fn all_to_all(
        &self,
        send: &[u8],
        recv: &mut [u8],
        bytes_per_process: usize,
    ) -> Result<(), TransportError>;
}
