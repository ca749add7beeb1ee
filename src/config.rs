//! Settings for the viewer.
//!
//! Everything is loadable from a YAML file; missing sections fall back to
//! their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Steps per generation when the configuration does not name one.
pub const DEFAULT_STEPS_PER_GENERATION: u32 = 2500;

/// Generations advanced by one fast-forward burst.
pub const DEFAULT_FAST_FORWARD_GENERATIONS: u32 = 10;

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub fast_forward: FastForwardConfig,
}

/// Parameters an engine is constructed from.
///
/// Immutable once a [`crate::simulation::SimulationHandle`] has been built
/// from it; changing any field means building a new handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub animal_count: usize,
    pub food_count: usize,
    /// Chance of a gene mutating, in [0, 1].
    pub mutation_rate: f64,
    /// Magnitude of a mutation, in [0, 1].
    pub mutation_coefficient: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_per_generation: Option<u32>,
    /// Fixed RNG seed; a fresh one is drawn per construction when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            animal_count: 40,
            food_count: 20,
            mutation_rate: 0.01,
            mutation_coefficient: 0.3,
            steps_per_generation: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Steps per generation with the default applied.
    pub fn steps_per_generation(&self) -> u32 {
        self.steps_per_generation.unwrap_or(DEFAULT_STEPS_PER_GENERATION)
    }

    /// Reject parameters no engine should be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.animal_count == 0 {
            return Err(ConfigError::InvalidCount {
                field: "animal_count",
            });
        }
        if self.food_count == 0 {
            return Err(ConfigError::InvalidCount { field: "food_count" });
        }
        check_unit_interval("mutation_rate", self.mutation_rate)?;
        check_unit_interval("mutation_coefficient", self.mutation_coefficient)?;
        if self.steps_per_generation == Some(0) {
            return Err(ConfigError::ZeroStepsPerGeneration);
        }
        Ok(())
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check too
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Window host settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Initial logical width; the height follows from the 16:9 surface plus
    /// the stats panel.
    pub width: u32,
    /// Font used for the stats panel. The panel is left blank without it.
    pub font: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            font: "assets/FiraSans-Regular.ttf".to_owned(),
        }
    }
}

/// Fast-forward burst settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastForwardConfig {
    pub generations: u32,
    /// Optional cap on the steps one burst may take. Unlimited when absent;
    /// the engine alone decides when a generation ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u64>,
}

impl Default for FastForwardConfig {
    fn default() -> Self {
        Self {
            generations: DEFAULT_FAST_FORWARD_GENERATIONS,
            max_steps: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&contents)?;
        Ok(settings)
    }

    /// Write settings to a YAML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert_eq!(
            SimulationConfig::default().steps_per_generation(),
            DEFAULT_STEPS_PER_GENERATION
        );
    }

    #[test]
    fn zero_counts_are_rejected() {
        let config = SimulationConfig {
            animal_count: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCount {
                field: "animal_count"
            })
        ));

        let config = SimulationConfig {
            food_count: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCount { field: "food_count" })
        ));
    }

    #[test]
    fn rates_outside_unit_interval_are_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = SimulationConfig {
                mutation_rate: bad,
                ..SimulationConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::OutOfRange {
                    field: "mutation_rate",
                    ..
                })
            ));
        }

        let config = SimulationConfig {
            mutation_coefficient: 2.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unit_interval_bounds_are_accepted() {
        let config = SimulationConfig {
            mutation_rate: 0.0,
            mutation_coefficient: 1.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_steps_per_generation_is_rejected() {
        let config = SimulationConfig {
            steps_per_generation: Some(0),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroStepsPerGeneration)
        ));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let settings: Settings = serde_yaml::from_str("simulation:\n  animal_count: 7\n").unwrap();
        assert_eq!(settings.simulation.animal_count, 7);
        assert_eq!(settings.simulation.food_count, 20);
        assert_eq!(settings.window, WindowConfig::default());
        assert_eq!(settings.fast_forward.generations, 10);
        assert_eq!(settings.fast_forward.max_steps, None);
    }

    #[test]
    fn settings_survive_a_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");

        let mut settings = Settings::default();
        settings.simulation.steps_per_generation = Some(300);
        settings.simulation.seed = Some(9);
        settings.save(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::from_file(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
