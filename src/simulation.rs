use tracing::info;

use crate::config::SimulationConfig;
use crate::engine::{Engine, EngineFactory, GenerationStats, WorldSnapshot};
use crate::error::{EngineError, Error};

/// Owns one engine together with the configuration it was built from.
///
/// Handles are never reconfigured. A configuration change builds a new one,
/// see [`crate::context::RunContext::replace`].
pub struct SimulationHandle<E> {
    engine: E,
    config: SimulationConfig,
    steps: u64,
}

impl<E: Engine> SimulationHandle<E> {
    /// Validate `config` and build an engine from it.
    pub fn create<F>(factory: &F, config: SimulationConfig) -> Result<Self, Error>
    where
        F: EngineFactory<Engine = E>,
    {
        config.validate()?;
        let engine = factory.construct(&config)?;
        info!(
            animals = config.animal_count,
            food = config.food_count,
            mutation_rate = config.mutation_rate,
            mutation_coefficient = config.mutation_coefficient,
            steps_per_generation = config.steps_per_generation(),
            "simulation created"
        );
        Ok(Self {
            engine,
            config,
            steps: 0,
        })
    }

    pub fn world(&self) -> WorldSnapshot {
        self.engine.world()
    }

    pub fn step(&mut self) -> Result<Option<GenerationStats>, EngineError> {
        let result = self.engine.step()?;
        self.steps += 1;
        Ok(result)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Successful steps taken by this handle.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
