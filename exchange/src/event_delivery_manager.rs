use log::{debug, info};

use crate::{
    error::ConfigError,
    protocol::{spike_exchange::SpikeExchange, target_exchange::TargetExchange},
    CollectiveTransport, ConnectionLayer, DelayWindow, ExchangeBuffers, ExchangeConfig,
    ExchangeError, ExchangeReport, ModulusEngine, NodeLocator, RankAssignment, SliceClock,
    SpikeData, SpikeRegister, Step, TargetData,
};

/// Owns the ring buffer moduli and the persistent spike buffers of one
/// rank, and drives both exchange protocols.
pub struct EventDeliveryManager {
    config: ExchangeConfig,
    num_ranks: usize,
    moduli: ModulusEngine,
    spike_buffers: ExchangeBuffers<SpikeData>,
}

impl EventDeliveryManager {
    pub fn try_new(
        config: ExchangeConfig,
        window: DelayWindow,
        num_ranks: usize,
        steps: Step,
    ) -> Result<Self, ExchangeError> {
        config.validate()?;

        let mut manager = Self {
            config,
            num_ranks,
            moduli: ModulusEngine::new(window, steps),
            spike_buffers: ExchangeBuffers::released(),
        };
        manager.configure_spike_buffers(window, num_ranks)?;
        Ok(manager)
    }

    /// # Panics
    /// Panics if the configuration is invalid or `num_ranks` is zero.
    /// For non-panicking version, use `try_new`.
    pub fn new(config: ExchangeConfig, window: DelayWindow, num_ranks: usize, steps: Step) -> Self {
        Self::try_new(config, window, num_ranks, steps)
            .unwrap_or_else(|e| panic!("EventDeliveryManager error: {}", e))
    }

    /// Recomputes the moduli for a simulation (re)starting at `steps`
    pub fn initialize(&mut self, steps: Step) {
        let window = *self.moduli.window();
        self.moduli.init(window, steps);
        info!(
            "event delivery initialized at step {} for delays {}..={}",
            steps,
            window.min_delay(),
            window.max_delay()
        );
    }

    /// Releases the spike buffers. `configure_spike_buffers` must run before the next exchange.
    pub fn finalize(&mut self) {
        self.spike_buffers.release();
        info!("event delivery finalized, spike buffers released");
    }

    /// Sizes the spike buffers for `window` and `num_ranks`, dropping any
    /// spikes they hold. A changed window also resets the moduli.
    pub fn configure_spike_buffers(
        &mut self,
        window: DelayWindow,
        num_ranks: usize,
    ) -> Result<(), ExchangeError> {
        if num_ranks == 0 {
            return Err(ConfigError::ZeroRanks.into());
        }

        let per_rank = self.config.spike_records_per_rank(&window);
        self.spike_buffers.resize(num_ranks, per_rank)?;
        self.num_ranks = num_ranks;
        if window != *self.moduli.window() {
            let origin = self.moduli.origin();
            self.moduli.init(window, origin);
        }

        info!(
            "spike buffers sized to {} records per rank for {} ranks ({} bytes each way)",
            per_rank,
            num_ranks,
            self.spike_buffers.send.byte_length()
        );
        Ok(())
    }

    /// Drops every spike held by the exchange buffers
    pub fn clear_pending_spikes(&mut self) -> Result<(), ExchangeError> {
        let window = *self.moduli.window();
        self.configure_spike_buffers(window, self.num_ranks)
    }

    /// Advances the moduli by one slice
    pub fn update_moduli(&mut self) {
        self.moduli.advance_slice();
    }

    /// Ring buffer index for a spike arriving `offset` steps after the current slice start
    pub fn modulo(&self, offset: usize) -> usize {
        self.moduli.modulo(offset)
    }

    /// Slice-wide ring buffer index for `offset` steps after the current slice start
    pub fn slice_modulo(&self, offset: usize) -> usize {
        self.moduli.slice_modulo(offset)
    }

    pub fn moduli(&self) -> &ModulusEngine {
        &self.moduli
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    pub fn num_ranks(&self) -> usize {
        self.num_ranks
    }

    /// Current per-rank capacity of the spike buffers, 0 after `finalize`
    pub fn spike_records_per_rank(&self) -> usize {
        self.spike_buffers.per_rank()
    }

    fn rank_assignment(&self) -> RankAssignment {
        RankAssignment::new(self.num_ranks, self.config.num_threads)
    }

    fn check_thread_count(
        &self,
        collaborator: &'static str,
        threads: usize,
    ) -> Result<(), ConfigError> {
        if threads != self.config.num_threads {
            return Err(ConfigError::ThreadCountMismatch {
                collaborator,
                threads,
                expected: self.config.num_threads,
            });
        }
        Ok(())
    }

    /// Sends all spikes pending in `register` to their ranks and delivers
    /// the spikes received for local threads. Must be called collectively
    /// by every rank.
    pub fn gather_spike_data<S, C, T>(
        &mut self,
        clock: &SliceClock,
        register: &S,
        connections: &C,
        transport: &T,
    ) -> Result<ExchangeReport, ExchangeError>
    where
        S: SpikeRegister + ?Sized,
        C: ConnectionLayer + ?Sized,
        T: CollectiveTransport + ?Sized,
    {
        if self.spike_buffers.per_rank() == 0 {
            return Err(ConfigError::BuffersReleased.into());
        }
        self.check_thread_count("spike register", register.num_threads())?;

        let exchange = SpikeExchange {
            assignment: self.rank_assignment(),
            clock: *clock,
            min_delay: self.moduli.window().min_delay_steps(),
            register,
            connections,
            transport,
        };
        let report = exchange.run(&mut self.spike_buffers)?;
        debug!(
            "rank {}: spike exchange at step {} took {} rounds, sent {}, delivered {}",
            transport.rank(),
            clock.steps,
            report.rounds,
            report.records_sent,
            report.records_delivered
        );
        Ok(report)
    }

    /// Tells every rank which of its nodes have targets here, using
    /// buffers allocated for this call only. Must be called collectively
    /// by every rank, before the source table is cleared.
    pub fn gather_target_data<C, L, T>(
        &self,
        connections: &C,
        locator: &L,
        transport: &T,
    ) -> Result<ExchangeReport, ExchangeError>
    where
        C: ConnectionLayer + ?Sized,
        L: NodeLocator + ?Sized,
        T: CollectiveTransport + ?Sized,
    {
        self.check_thread_count("node locator", locator.num_threads())?;

        let mut buffers = ExchangeBuffers::<TargetData>::try_new(
            self.num_ranks,
            self.config.target_records_per_rank,
        )?;
        let exchange = TargetExchange {
            assignment: self.rank_assignment(),
            connections,
            locator,
            transport,
        };
        let report = exchange.run(&mut buffers)?;
        debug!(
            "rank {}: target exchange took {} rounds, sent {}, registered {}",
            transport.rank(),
            report.rounds,
            report.records_sent,
            report.records_delivered
        );
        Ok(report)
    }
}
