//! Range controls for the simulation parameters.
//!
//! Each control behaves like a slider: it clamps to its range, snaps to its
//! step and shows its current value as text. A change produces a new
//! [`SimulationConfig`]; the caller decides what to rebuild.

use crate::config::SimulationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    AnimalCount,
    FoodCount,
    MutationRate,
    MutationCoefficient,
}

impl Parameter {
    pub fn label(self) -> &'static str {
        match self {
            Parameter::AnimalCount => "Animals",
            Parameter::FoodCount => "Food",
            Parameter::MutationRate => "Mutation rate",
            Parameter::MutationCoefficient => "Mutation coeff",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    pub parameter: Parameter,
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    value: f64,
}

impl RangeControl {
    fn new(
        parameter: Parameter,
        min: f64,
        max: f64,
        step: f64,
        decimals: usize,
        value: f64,
    ) -> Self {
        let mut control = Self {
            parameter,
            min,
            max,
            step,
            decimals,
            value: min,
        };
        control.set(value);
        control
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clamp into range and snap to the nearest step.
    pub fn set(&mut self, value: f64) -> bool {
        let snapped = if value.is_finite() {
            let steps = ((value - self.min) / self.step).round();
            let scale = 10f64.powi(self.decimals as i32);
            let snapped = ((self.min + steps * self.step) * scale).round() / scale;
            snapped.clamp(self.min, self.max)
        } else {
            self.min
        };
        let changed = snapped != self.value;
        self.value = snapped;
        changed
    }

    /// Move by `steps` increments. Returns whether the value changed.
    pub fn nudge(&mut self, steps: i32) -> bool {
        self.set(self.value + f64::from(steps) * self.step)
    }

    /// The live text next to the control.
    pub fn readout(&self) -> String {
        format!("{:.*}", self.decimals, self.value)
    }
}

/// The four controls plus which one the keyboard currently drives.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    controls: [RangeControl; 4],
    selected: usize,
    base: SimulationConfig,
}

impl ControlPanel {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            controls: [
                RangeControl::new(
                    Parameter::AnimalCount,
                    1.0,
                    100.0,
                    1.0,
                    0,
                    config.animal_count as f64,
                ),
                RangeControl::new(
                    Parameter::FoodCount,
                    1.0,
                    100.0,
                    1.0,
                    0,
                    config.food_count as f64,
                ),
                RangeControl::new(
                    Parameter::MutationRate,
                    0.0,
                    1.0,
                    0.01,
                    2,
                    config.mutation_rate,
                ),
                RangeControl::new(
                    Parameter::MutationCoefficient,
                    0.0,
                    1.0,
                    0.05,
                    2,
                    config.mutation_coefficient,
                ),
            ],
            selected: 0,
            base: config.clone(),
        }
    }

    pub fn controls(&self) -> &[RangeControl] {
        &self.controls
    }

    pub fn selected(&self) -> Parameter {
        self.controls[self.selected].parameter
    }

    pub fn select(&mut self, parameter: Parameter) {
        if let Some(idx) = self.controls.iter().position(|c| c.parameter == parameter) {
            self.selected = idx;
        }
    }

    /// Nudge the selected control. Returns the new configuration when the
    /// value actually moved.
    pub fn adjust(&mut self, steps: i32) -> Option<SimulationConfig> {
        if self.controls[self.selected].nudge(steps) {
            Some(self.config())
        } else {
            None
        }
    }

    /// Current configuration as described by the controls.
    pub fn config(&self) -> SimulationConfig {
        let value = |parameter: Parameter| {
            self.controls
                .iter()
                .find(|c| c.parameter == parameter)
                .map_or(0.0, RangeControl::value)
        };
        SimulationConfig {
            animal_count: value(Parameter::AnimalCount) as usize,
            food_count: value(Parameter::FoodCount) as usize,
            mutation_rate: value(Parameter::MutationRate),
            mutation_coefficient: value(Parameter::MutationCoefficient),
            ..self.base.clone()
        }
    }
}
