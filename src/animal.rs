use rand::Rng;
use std::f64::consts::{PI, TAU};

use crate::engine::Entity;
use crate::food::Food;
use crate::genetics::Genetics;

/// Largest heading change while wandering, per step.
pub const MAX_WANDER: f64 = PI / 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Animal {
    pub x: f64,
    pub y: f64,
    /// Radians, 0 points along +x.
    pub heading: f64,
    pub genetics: Genetics,
    /// Food eaten during the current generation.
    pub score: u32,
}

impl Animal {
    pub fn random(rng: &mut impl Rng) -> Self {
        let genetics = Genetics::new_random(rng);
        Self::with_genetics(genetics, rng)
    }

    /// A fresh animal at a random spot carrying the given genes.
    pub fn with_genetics(genetics: Genetics, rng: &mut impl Rng) -> Self {
        Animal {
            x: rng.random(),
            y: rng.random(),
            heading: rng.random_range(0.0..TAU),
            genetics,
            score: 0,
        }
    }

    /// Steer towards the nearest visible food, or turn by `wander` when
    /// nothing is in range, then move one step. Positions wrap around.
    pub fn update(&mut self, foods: &[Food], wander: f64) {
        match self.nearest_food(foods) {
            Some((dx, dy, distance)) if distance < self.genetics.perception => {
                self.heading = dy.atan2(dx);
            }
            _ => {
                self.heading = (self.heading + wander).rem_euclid(TAU);
            }
        }

        self.x = (self.x + self.genetics.speed * self.heading.cos()).rem_euclid(1.0);
        self.y = (self.y + self.genetics.speed * self.heading.sin()).rem_euclid(1.0);
    }

    fn nearest_food(&self, foods: &[Food]) -> Option<(f64, f64, f64)> {
        foods
            .iter()
            .map(|f| {
                let dx = f.x - self.x;
                let dy = f.y - self.y;
                (dx, dy, (dx * dx + dy * dy).sqrt())
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
    }

    pub fn distance_to(&self, food: &Food) -> f64 {
        let dx = food.x - self.x;
        let dy = food.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn entity(&self) -> Entity {
        Entity {
            x: self.x,
            y: self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_at(x: f64, y: f64) -> Animal {
        Animal {
            x,
            y,
            heading: 0.0,
            genetics: Genetics {
                speed: 0.004,
                perception: 0.2,
            },
            score: 0,
        }
    }

    #[test]
    fn heads_for_visible_food() {
        let mut animal = animal_at(0.5, 0.5);
        let foods = [Food { x: 0.5, y: 0.6 }, Food { x: 0.9, y: 0.9 }];
        animal.update(&foods, 0.0);
        assert!((animal.heading - PI / 2.0).abs() < 1e-9);
        assert!(animal.y > 0.5);
        assert!((animal.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn wanders_when_food_is_out_of_sight() {
        let mut animal = animal_at(0.1, 0.1);
        let foods = [Food { x: 0.9, y: 0.9 }];
        animal.update(&foods, 0.25);
        assert!((animal.heading - 0.25).abs() < 1e-9);
    }

    #[test]
    fn position_wraps_at_world_edge() {
        let mut animal = animal_at(0.999, 0.5);
        animal.update(&[], 0.0);
        assert!(animal.x < 0.01);
        assert!((0.0..1.0).contains(&animal.x));
    }
}
