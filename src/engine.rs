//! The narrow interface the control loop consumes from a simulation engine.
//!
//! The loop never looks inside an engine. It constructs one from a
//! [`SimulationConfig`], asks it for snapshots and steps it; deciding where a
//! generation ends is entirely the engine's business.

use crate::config::SimulationConfig;
use crate::error::EngineError;

/// A position in normalised world space, both axes in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub x: f64,
    pub y: f64,
}

/// Point-in-time view of entity positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldSnapshot {
    pub animals: Vec<Entity>,
    pub food: Vec<Entity>,
}

/// Scores of the generation that just ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    pub min_score: u32,
    pub max_score: u32,
    pub avg_score: f64,
}

impl GenerationStats {
    /// Stats carrying only an average, for engines that track nothing else.
    pub const fn from_avg(avg_score: f64) -> Self {
        Self {
            min_score: 0,
            max_score: 0,
            avg_score,
        }
    }
}

/// A running simulation.
pub trait Engine {
    /// Current entity positions. Must not change engine state.
    fn world(&self) -> WorldSnapshot;

    /// Advance exactly one tick. Returns stats when the tick closed a
    /// generation.
    fn step(&mut self) -> Result<Option<GenerationStats>, EngineError>;
}

/// Builds engines from configuration.
pub trait EngineFactory {
    type Engine: Engine;

    /// Build a fresh engine. The configuration has already been validated.
    fn construct(&self, config: &SimulationConfig) -> Result<Self::Engine, EngineError>;
}
