use rand::Rng;

use crate::engine::Entity;

#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub x: f64,
    pub y: f64,
}

impl Food {
    pub fn random(rng: &mut impl Rng) -> Self {
        Food {
            x: rng.random(),
            y: rng.random(),
        }
    }

    /// Eaten food reappears somewhere else.
    pub fn relocate(&mut self, rng: &mut impl Rng) {
        self.x = rng.random();
        self.y = rng.random();
    }

    pub fn entity(&self) -> Entity {
        Entity {
            x: self.x,
            y: self.y,
        }
    }
}
