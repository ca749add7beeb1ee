use crate::engine::GenerationStats;

/// Generation bookkeeping shown to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunState {
    /// Starts at 1 and counts finished generations on top.
    pub generation_number: u32,
    /// Steps taken since the last generation boundary.
    pub generation_age: u32,
    pub last_avg_score: f64,
    /// False only while a fast-forward burst owns stepping.
    pub rendering_enabled: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            generation_number: 1,
            generation_age: 0,
            last_avg_score: 0.0,
            rendering_enabled: true,
        }
    }
}

/// Derives [`RunState`] from the stream of step results.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    state: RunState,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Feed the result of one step. Returns true when it closed a generation.
    pub fn update(&mut self, result: Option<&GenerationStats>) -> bool {
        match result {
            Some(stats) => {
                self.state.generation_age = 0;
                self.state.generation_number += 1;
                self.state.last_avg_score = stats.avg_score;
                true
            }
            None => {
                self.state.generation_age += 1;
                false
            }
        }
    }

    /// Back to generation 1. Called whenever a simulation is (re)created.
    pub fn reset(&mut self) {
        self.state = RunState::default();
    }

    pub(crate) fn finish_burst(&mut self) {
        self.state.generation_age = 0;
    }

    pub(crate) fn set_rendering(&mut self, enabled: bool) {
        self.state.rendering_enabled = enabled;
    }
}

/// The three text readouts of the stats panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedStats {
    pub generation: String,
    pub age: String,
    pub score: String,
}

impl From<&RunState> for DisplayedStats {
    fn from(state: &RunState) -> Self {
        Self {
            generation: state.generation_number.to_string(),
            age: state.generation_age.to_string(),
            score: format!("{:.2}", state.last_avg_score),
        }
    }
}

impl Default for DisplayedStats {
    fn default() -> Self {
        Self::from(&RunState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(avg: f64) -> GenerationStats {
        GenerationStats::from_avg(avg)
    }

    #[test]
    fn age_grows_until_a_generation_closes() {
        let mut aggregator = StatsAggregator::new();
        for _ in 0..4 {
            assert!(!aggregator.update(None));
        }
        assert_eq!(aggregator.state().generation_age, 4);
        assert_eq!(aggregator.state().generation_number, 1);

        assert!(aggregator.update(Some(&stats(2.5))));
        assert_eq!(aggregator.state().generation_age, 0);
        assert_eq!(aggregator.state().generation_number, 2);
        assert_eq!(aggregator.state().last_avg_score, 2.5);
    }

    #[test]
    fn number_and_age_follow_any_result_sequence() {
        let pattern = [false, true, false, false, true, true, false, false, false];
        let mut aggregator = StatsAggregator::new();
        for &boundary in &pattern {
            let result = boundary.then(|| stats(1.0));
            aggregator.update(result.as_ref());
        }
        let k = pattern.iter().filter(|b| **b).count() as u32;
        assert_eq!(aggregator.state().generation_number, 1 + k);
        assert_eq!(aggregator.state().generation_age, 3);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut aggregator = StatsAggregator::new();
        aggregator.update(Some(&stats(7.0)));
        aggregator.update(None);
        aggregator.set_rendering(false);
        aggregator.reset();
        assert_eq!(*aggregator.state(), RunState::default());
        assert!(aggregator.state().rendering_enabled);
    }

    #[test]
    fn readouts_are_formatted_for_display() {
        let state = RunState {
            generation_number: 12,
            generation_age: 345,
            last_avg_score: 3.14159,
            rendering_enabled: true,
        };
        let shown = DisplayedStats::from(&state);
        assert_eq!(shown.generation, "12");
        assert_eq!(shown.age, "345");
        assert_eq!(shown.score, "3.14");

        let initial = DisplayedStats::default();
        assert_eq!(initial.age, "0");
        assert_eq!(initial.generation, "1");
        assert_eq!(initial.score, "0.00");
    }
}
