//! Built-in engine: animals forage for food and are bred on their score.
//!
//! Small by intent. It exists so the viewer has something to drive; the
//! control loop only ever sees it through [`Engine`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::animal::{Animal, MAX_WANDER};
use crate::config::SimulationConfig;
use crate::engine::{Engine, EngineFactory, GenerationStats, WorldSnapshot};
use crate::error::EngineError;
use crate::food::Food;

/// An animal this close to food eats it.
pub const EAT_RADIUS: f64 = 0.01;

/// Builds [`ForagingEngine`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForagingFactory;

impl EngineFactory for ForagingFactory {
    type Engine = ForagingEngine;

    fn construct(&self, config: &SimulationConfig) -> Result<ForagingEngine, EngineError> {
        Ok(ForagingEngine::new(config))
    }
}

pub struct ForagingEngine {
    rng: StdRng,
    animals: Vec<Animal>,
    food: Vec<Food>,
    mutation_rate: f64,
    mutation_coefficient: f64,
    steps_per_generation: u32,
    age: u32,
}

impl ForagingEngine {
    pub fn new(config: &SimulationConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let animals = (0..config.animal_count)
            .map(|_| Animal::random(&mut rng))
            .collect();
        let food = (0..config.food_count).map(|_| Food::random(&mut rng)).collect();

        Self {
            rng,
            animals,
            food,
            mutation_rate: config.mutation_rate,
            mutation_coefficient: config.mutation_coefficient,
            steps_per_generation: config.steps_per_generation(),
            age: 0,
        }
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    fn process_movements(&mut self) {
        // Drawn up front so the parallel pass stays deterministic for a seed.
        let wander: Vec<f64> = (0..self.animals.len())
            .map(|_| self.rng.random_range(-MAX_WANDER..=MAX_WANDER))
            .collect();
        let foods = &self.food;

        self.animals
            .par_iter_mut()
            .zip(wander.par_iter())
            .for_each(|(animal, &turn)| animal.update(foods, turn));
    }

    fn process_collisions(&mut self) {
        for animal in &mut self.animals {
            for food in &mut self.food {
                if animal.distance_to(food) < EAT_RADIUS {
                    food.relocate(&mut self.rng);
                    animal.score += 1;
                }
            }
        }
    }

    fn evolve(&mut self) -> GenerationStats {
        let stats = score_stats(&self.animals);

        let total: u64 = self.animals.iter().map(|a| u64::from(a.score) + 1).sum();
        let mut next = Vec::with_capacity(self.animals.len());
        for _ in 0..self.animals.len() {
            let parent = roulette(&self.animals, total, &mut self.rng);
            let genetics = parent.genetics.mutate(
                self.mutation_rate,
                self.mutation_coefficient,
                &mut self.rng,
            );
            next.push(Animal::with_genetics(genetics, &mut self.rng));
        }
        self.animals = next;

        debug!(
            min = stats.min_score,
            max = stats.max_score,
            avg = stats.avg_score,
            "population evolved"
        );
        stats
    }
}

impl Engine for ForagingEngine {
    fn world(&self) -> WorldSnapshot {
        WorldSnapshot {
            animals: self.animals.iter().map(Animal::entity).collect(),
            food: self.food.iter().map(Food::entity).collect(),
        }
    }

    fn step(&mut self) -> Result<Option<GenerationStats>, EngineError> {
        self.process_movements();
        self.process_collisions();

        self.age += 1;
        if self.age < self.steps_per_generation {
            return Ok(None);
        }
        self.age = 0;
        Ok(Some(self.evolve()))
    }
}

fn score_stats(animals: &[Animal]) -> GenerationStats {
    let min_score = animals.iter().map(|a| a.score).min().unwrap_or(0);
    let max_score = animals.iter().map(|a| a.score).max().unwrap_or(0);
    let sum: u64 = animals.iter().map(|a| u64::from(a.score)).sum();
    let avg_score = if animals.is_empty() {
        0.0
    } else {
        sum as f64 / animals.len() as f64
    };

    GenerationStats {
        min_score,
        max_score,
        avg_score,
    }
}

/// Pick a parent with probability proportional to `score + 1`.
fn roulette<'a>(animals: &'a [Animal], total: u64, rng: &mut impl Rng) -> &'a Animal {
    let mut ticket = rng.random_range(0..total.max(1));
    for animal in animals {
        let weight = u64::from(animal.score) + 1;
        if ticket < weight {
            return animal;
        }
        ticket -= weight;
    }
    // only reachable through rounding of `total`; the last animal is as good as any
    &animals[animals.len() - 1]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(steps: u32) -> SimulationConfig {
        SimulationConfig {
            animal_count: 12,
            food_count: 7,
            steps_per_generation: Some(steps),
            seed: Some(42),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn world_matches_configured_counts() {
        let engine = ForagingEngine::new(&config(10));
        let world = engine.world();
        assert_eq!(world.animals.len(), 12);
        assert_eq!(world.food.len(), 7);
        for entity in world.animals.iter().chain(&world.food) {
            assert!((0.0..=1.0).contains(&entity.x));
            assert!((0.0..=1.0).contains(&entity.y));
        }
    }

    #[test]
    fn world_is_idempotent_between_steps() {
        let mut engine = ForagingEngine::new(&config(10));
        assert_eq!(engine.world(), engine.world());
        engine.step().unwrap();
        assert_eq!(engine.world(), engine.world());
    }

    #[test]
    fn stats_arrive_once_per_generation() {
        let mut engine = ForagingEngine::new(&config(5));
        let results: Vec<_> = (0..15).map(|_| engine.step().unwrap()).collect();
        let boundaries: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(boundaries, vec![4, 9, 14]);
    }

    #[test]
    fn evolution_keeps_population_size_and_resets_scores() {
        let mut engine = ForagingEngine::new(&config(3));
        for _ in 0..3 {
            engine.step().unwrap();
        }
        assert_eq!(engine.animals().len(), 12);
        assert!(engine.animals().iter().all(|a| a.score == 0));
    }

    #[test]
    fn same_seed_gives_same_run() {
        let mut a = ForagingEngine::new(&config(4));
        let mut b = ForagingEngine::new(&config(4));
        for _ in 0..9 {
            assert_eq!(a.step().unwrap(), b.step().unwrap());
        }
        assert_eq!(a.world(), b.world());
    }

    #[test]
    fn score_stats_summarise_population() {
        let mut engine = ForagingEngine::new(&config(10));
        for (animal, score) in engine.animals.iter_mut().zip([3, 0, 9]) {
            animal.score = score;
        }
        engine.animals.truncate(3);
        let stats = score_stats(&engine.animals);
        assert_eq!(stats.min_score, 0);
        assert_eq!(stats.max_score, 9);
        assert!((stats.avg_score - 4.0).abs() < 1e-9);
    }
}
