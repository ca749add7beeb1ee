use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::engine::{EngineFactory, GenerationStats};
use crate::error::{EngineError, Error};
use crate::simulation::SimulationHandle;
use crate::simulation_stats::{DisplayedStats, RunState, StatsAggregator};

/// Everything a tick touches: the live simulation, its bookkeeping and the
/// readouts shown to the user.
///
/// The handle and the stats are only ever created and replaced together.
pub struct RunContext<F: EngineFactory> {
    factory: F,
    handle: SimulationHandle<F::Engine>,
    stats: StatsAggregator,
    readout: DisplayedStats,
}

impl<F: EngineFactory> RunContext<F> {
    pub fn new(factory: F, config: SimulationConfig) -> Result<Self, Error> {
        let handle = SimulationHandle::create(&factory, config)?;
        Ok(Self {
            factory,
            handle,
            stats: StatsAggregator::new(),
            readout: DisplayedStats::default(),
        })
    }

    /// Swap in a simulation built from `config` and start over at
    /// generation 1.
    ///
    /// The new handle is fully built before anything is swapped, so a
    /// rejected config leaves the running simulation untouched.
    pub fn replace(&mut self, config: SimulationConfig) -> Result<(), Error> {
        let handle = match SimulationHandle::create(&self.factory, config) {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "keeping current simulation");
                return Err(err);
            }
        };
        info!(
            previous_steps = self.handle.steps(),
            generation = self.stats.state().generation_number,
            "simulation replaced"
        );
        self.handle = handle;
        self.stats.reset();
        self.publish();
        Ok(())
    }

    /// Rebuild from the current configuration.
    pub fn restart(&mut self) -> Result<(), Error> {
        self.replace(self.handle.config().clone())
    }

    pub fn handle(&self) -> &SimulationHandle<F::Engine> {
        &self.handle
    }

    pub fn state(&self) -> &RunState {
        self.stats.state()
    }

    pub fn readout(&self) -> &DisplayedStats {
        &self.readout
    }

    pub fn config(&self) -> &SimulationConfig {
        self.handle.config()
    }

    /// Step once and fold the result into the stats.
    pub(crate) fn advance(&mut self) -> Result<Option<GenerationStats>, EngineError> {
        let result = self.handle.step()?;
        self.stats.update(result.as_ref());
        Ok(result)
    }

    pub(crate) fn stats_mut(&mut self) -> &mut StatsAggregator {
        &mut self.stats
    }

    /// Refresh the readouts from the current state.
    pub(crate) fn publish(&mut self) {
        self.readout = DisplayedStats::from(self.stats.state());
    }
}
