use std::{sync::Arc, time::Duration};

use log::warn;
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::{transport::error::TransportError, CollectiveTransport, Rank};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Collecting,
    Draining,
}

struct HubState {
    generation: u64,
    phase: Phase,
    deposits: Vec<Option<Vec<u8>>>,
    bytes_per_process: Option<usize>,
    arrived: usize,
    departed: usize,
    disconnected: bool,
}

struct Hub {
    num_ranks: usize,
    state: Mutex<HubState>,
    condvar: Condvar,
}

/// Builds a set of in-process transports that exchange through shared
/// memory, one per simulated rank. Each transport is meant to be driven
/// from its own OS thread.
pub struct LocalHub;

impl LocalHub {
    pub fn new(num_ranks: usize) -> Vec<LocalTransport> {
        Self::build(num_ranks, None)
    }

    /// Like `new`, but a participant waiting longer than `timeout` for the
    /// others fails with `TransportError::Timeout` instead of blocking forever
    pub fn with_timeout(num_ranks: usize, timeout: Duration) -> Vec<LocalTransport> {
        Self::build(num_ranks, Some(timeout))
    }

    fn build(num_ranks: usize, timeout: Option<Duration>) -> Vec<LocalTransport> {
        let hub = Arc::new(Hub {
            num_ranks,
            state: Mutex::new(HubState {
                generation: 0,
                phase: Phase::Collecting,
                deposits: vec![None; num_ranks],
                bytes_per_process: None,
                arrived: 0,
                departed: 0,
                disconnected: false,
            }),
            condvar: Condvar::new(),
        });
        (0..num_ranks)
            .map(|rank| LocalTransport {
                rank,
                hub: hub.clone(),
                timeout,
            })
            .collect()
    }
}

/// One rank's handle on a LocalHub.
/// Dropping it tells the remaining ranks that this participant is gone.
pub struct LocalTransport {
    rank: Rank,
    hub: Arc<Hub>,
    timeout: Option<Duration>,
}

impl LocalTransport {
    fn wait(&self, state: &mut MutexGuard<'_, HubState>) -> Result<(), TransportError> {
        match self.timeout {
            Some(timeout) => {
                if self.hub.condvar.wait_for(state, timeout).timed_out() {
                    return Err(TransportError::Timeout {
                        rank: self.rank,
                        timeout,
                    });
                }
            }
            None => self.hub.condvar.wait(state),
        }
        Ok(())
    }

    fn abandon(&self, state: &mut MutexGuard<'_, HubState>, error: TransportError) -> TransportError {
        warn!("rank {} abandons the collective exchange: {}", self.rank, error);
        state.disconnected = true;
        self.hub.condvar.notify_all();
        error
    }

    fn check_length(
        &self,
        buffer: &'static str,
        actual: usize,
        bytes_per_process: usize,
    ) -> Result<(), TransportError> {
        let expected = bytes_per_process * self.hub.num_ranks;
        if actual != expected {
            return Err(TransportError::BufferLength {
                rank: self.rank,
                buffer,
                actual,
                expected,
                bytes_per_process,
                num_processes: self.hub.num_ranks,
            });
        }
        Ok(())
    }
}

impl CollectiveTransport for LocalTransport {
    fn num_processes(&self) -> usize {
        self.hub.num_ranks
    }

    fn rank(&self) -> Rank {
        self.rank
    }

    fn all_to_all(
        &self,
        send: &[u8],
        recv: &mut [u8],
        bytes_per_process: usize,
    ) -> Result<(), TransportError> {
        self.check_length("send", send.len(), bytes_per_process)?;
        self.check_length("recv", recv.len(), bytes_per_process)?;

        let num_ranks = self.hub.num_ranks;
        let mut state = self.hub.state.lock();

        // the previous exchange must be fully drained before a new one starts
        while state.phase == Phase::Draining {
            if state.disconnected {
                return Err(TransportError::Disconnected { rank: self.rank });
            }
            if let Err(error) = self.wait(&mut state) {
                return Err(self.abandon(&mut state, error));
            }
        }
        if state.disconnected {
            return Err(TransportError::Disconnected { rank: self.rank });
        }

        match state.bytes_per_process {
            Some(expected) if expected != bytes_per_process => {
                let error = TransportError::CountMismatch {
                    rank: self.rank,
                    bytes_per_process,
                    expected,
                };
                return Err(self.abandon(&mut state, error));
            }
            _ => state.bytes_per_process = Some(bytes_per_process),
        }

        state.deposits[self.rank] = Some(send.to_vec());
        state.arrived += 1;
        if state.arrived == num_ranks {
            state.phase = Phase::Draining;
            self.hub.condvar.notify_all();
        } else {
            let generation = state.generation;
            while state.phase == Phase::Collecting && state.generation == generation {
                if state.disconnected {
                    return Err(TransportError::Disconnected { rank: self.rank });
                }
                if let Err(error) = self.wait(&mut state) {
                    return Err(self.abandon(&mut state, error));
                }
            }
        }

        let own = self.rank * bytes_per_process..(self.rank + 1) * bytes_per_process;
        for source in 0..num_ranks {
            let Some(deposit) = state.deposits[source].as_ref() else {
                return Err(TransportError::Disconnected { rank: self.rank });
            };
            recv[source * bytes_per_process..(source + 1) * bytes_per_process]
                .copy_from_slice(&deposit[own.clone()]);
        }

        state.departed += 1;
        if state.departed == num_ranks {
            state.deposits.iter_mut().for_each(|deposit| *deposit = None);
            state.bytes_per_process = None;
            state.arrived = 0;
            state.departed = 0;
            state.phase = Phase::Collecting;
            state.generation += 1;
            self.hub.condvar.notify_all();
        }
        Ok(())
    }
}

impl Drop for LocalTransport {
    fn drop(&mut self) {
        let mut state = self.hub.state.lock();
        state.disconnected = true;
        self.hub.condvar.notify_all();
    }
}
