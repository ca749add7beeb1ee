use rand::Rng;

pub const SPEED_MIN: f64 = 0.001;
pub const SPEED_MAX: f64 = 0.005;
pub const PERCEPTION_MIN: f64 = 0.05;
pub const PERCEPTION_MAX: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct Genetics {
    /// Distance covered per step, in world units.
    pub speed: f64,
    /// How far away food can be noticed.
    pub perception: f64,
}

impl Genetics {
    pub fn new_random(rng: &mut impl Rng) -> Self {
        Genetics {
            speed: rng.random_range(SPEED_MIN..=SPEED_MAX),
            perception: rng.random_range(PERCEPTION_MIN..=PERCEPTION_MAX),
        }
    }

    /// Each gene mutates with probability `rate` and moves by up to
    /// `coefficient` of its allowed span.
    pub fn mutate(&self, rate: f64, coefficient: f64, rng: &mut impl Rng) -> Self {
        Genetics {
            speed: mutate_gene(self.speed, SPEED_MIN, SPEED_MAX, rate, coefficient, rng),
            perception: mutate_gene(
                self.perception,
                PERCEPTION_MIN,
                PERCEPTION_MAX,
                rate,
                coefficient,
                rng,
            ),
        }
    }
}

fn mutate_gene(
    value: f64,
    min: f64,
    max: f64,
    rate: f64,
    coefficient: f64,
    rng: &mut impl Rng,
) -> f64 {
    if !rng.random_bool(rate) {
        return value;
    }
    let sign = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
    let delta = sign * coefficient * rng.random::<f64>() * (max - min);
    (value + delta).clamp(min, max)
}
