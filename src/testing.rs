//! A deterministic engine double.
//!
//! [`ScriptedEngine`] replays a fixed sequence of step results, cycling when
//! it runs out, so the control loop can be exercised without the real
//! engine's randomness.

use crate::config::SimulationConfig;
use crate::engine::{Engine, EngineFactory, Entity, GenerationStats, WorldSnapshot};
use crate::error::EngineError;

/// Builds [`ScriptedEngine`]s that all follow the same script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFactory {
    script: Vec<Option<f64>>,
    failing_steps: Vec<u64>,
    refuse: bool,
    max_animals: Option<usize>,
}

impl ScriptedFactory {
    /// `Some(avg)` entries close a generation with that average score.
    /// An empty script never closes one.
    pub fn new(script: &[Option<f64>]) -> Self {
        Self {
            script: script.to_vec(),
            ..Self::default()
        }
    }

    /// A generation closes on every `n`th step.
    pub fn every(n: usize, avg_score: f64) -> Self {
        let mut script = vec![None; n.saturating_sub(1)];
        script.push(Some(avg_score));
        Self::new(&script)
    }

    /// Fail the step attempts with these zero-based indices.
    pub fn failing_at(mut self, attempts: &[u64]) -> Self {
        self.failing_steps = attempts.to_vec();
        self
    }

    /// Refuse configurations with more than `limit` animals.
    pub fn refusing_animals_above(mut self, limit: usize) -> Self {
        self.max_animals = Some(limit);
        self
    }

    /// Refuse to construct anything.
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }
}

impl EngineFactory for ScriptedFactory {
    type Engine = ScriptedEngine;

    fn construct(&self, config: &SimulationConfig) -> Result<ScriptedEngine, EngineError> {
        if self.refuse {
            return Err(EngineError::Construction {
                reason: "scripted refusal".to_owned(),
            });
        }
        if let Some(max) = self.max_animals.filter(|&max| config.animal_count > max) {
            return Err(EngineError::Construction {
                reason: format!("more than {max} animals"),
            });
        }
        Ok(ScriptedEngine {
            animals: spread(config.animal_count, 0.25),
            food: spread(config.food_count, 0.75),
            script: self.script.clone(),
            failing_steps: self.failing_steps.clone(),
            cursor: 0,
            attempts: 0,
        })
    }
}

#[derive(Debug)]
pub struct ScriptedEngine {
    animals: Vec<Entity>,
    food: Vec<Entity>,
    script: Vec<Option<f64>>,
    failing_steps: Vec<u64>,
    cursor: usize,
    attempts: u64,
}

impl ScriptedEngine {
    /// Step attempts so far, failed ones included.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }
}

impl Engine for ScriptedEngine {
    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            animals: self.animals.clone(),
            food: self.food.clone(),
        }
    }

    fn step(&mut self) -> Result<Option<GenerationStats>, EngineError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.failing_steps.contains(&attempt) {
            return Err(EngineError::Step {
                reason: format!("scripted failure at attempt {attempt}"),
            });
        }

        for animal in &mut self.animals {
            animal.x = (animal.x + 0.01).rem_euclid(1.0);
        }

        let result = if self.script.is_empty() {
            None
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        Ok(result.map(GenerationStats::from_avg))
    }
}

fn spread(count: usize, y: f64) -> Vec<Entity> {
    (0..count)
        .map(|i| Entity {
            x: (i as f64 + 0.5) / count as f64,
            y,
        })
        .collect()
}
