//! Advancing several generations at once without drawing.

use std::ops::{Deref, DerefMut};

use tracing::{info, warn};

use crate::config::{DEFAULT_FAST_FORWARD_GENERATIONS, FastForwardConfig};
use crate::context::RunContext;
use crate::engine::EngineFactory;
use crate::error::FastForwardError;

/// Summary of a finished burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastForwardReport {
    pub generations: u32,
    pub steps: u64,
    pub last_avg_score: f64,
}

/// Runs a burst of whole generations while the frame scheduler is suspended.
#[derive(Debug, Clone)]
pub struct FastForwardController {
    target_generations: u32,
    max_steps: Option<u64>,
}

impl Default for FastForwardController {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_FORWARD_GENERATIONS)
    }
}

impl From<&FastForwardConfig> for FastForwardController {
    fn from(config: &FastForwardConfig) -> Self {
        Self {
            target_generations: config.generations,
            max_steps: config.max_steps,
        }
    }
}

impl FastForwardController {
    pub fn new(target_generations: u32) -> Self {
        Self {
            target_generations,
            max_steps: None,
        }
    }

    /// Give up after `max_steps` steps instead of waiting on the engine.
    pub fn with_step_limit(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn target_generations(&self) -> u32 {
        self.target_generations
    }

    /// Step until `target_generations` generations have closed, then resume
    /// rendering with the age at 0.
    ///
    /// Runs synchronously; no frame is scheduled until it returns. Where a
    /// generation ends is up to the engine, so without a step limit the burst
    /// runs as long as it takes. Rendering is enabled again and the age reset
    /// on every return path, errors included.
    pub fn run<F: EngineFactory>(
        &self,
        ctx: &mut RunContext<F>,
    ) -> Result<FastForwardReport, FastForwardError> {
        if !ctx.state().rendering_enabled {
            return Err(FastForwardError::AlreadyRunning);
        }

        let target = self.target_generations;
        let start_generation = ctx.state().generation_number;
        info!(target, start_generation, "fast-forward started");

        let mut burst = Suspended::begin(ctx);
        let mut completed = 0;
        let mut steps = 0u64;
        while completed < target {
            if self.max_steps.is_some_and(|limit| steps >= limit) {
                warn!(steps, completed, target, "fast-forward step limit reached");
                return Err(FastForwardError::StepLimitReached {
                    steps,
                    completed,
                    target,
                });
            }
            let result = burst.advance()?;
            steps += 1;
            if result.is_some() {
                completed += 1;
            }
        }
        drop(burst);

        let state = *ctx.state();
        info!(
            generation = state.generation_number,
            steps,
            avg_score = state.last_avg_score,
            "fast-forward finished"
        );
        Ok(FastForwardReport {
            generations: completed,
            steps,
            last_avg_score: state.last_avg_score,
        })
    }
}

/// Keeps rendering off for as long as it lives.
struct Suspended<'a, F: EngineFactory> {
    ctx: &'a mut RunContext<F>,
}

impl<'a, F: EngineFactory> Suspended<'a, F> {
    fn begin(ctx: &'a mut RunContext<F>) -> Self {
        ctx.stats_mut().set_rendering(false);
        Self { ctx }
    }
}

impl<F: EngineFactory> Deref for Suspended<'_, F> {
    type Target = RunContext<F>;

    fn deref(&self) -> &RunContext<F> {
        &*self.ctx
    }
}

impl<F: EngineFactory> DerefMut for Suspended<'_, F> {
    fn deref_mut(&mut self) -> &mut RunContext<F> {
        &mut *self.ctx
    }
}

impl<F: EngineFactory> Drop for Suspended<'_, F> {
    fn drop(&mut self) {
        let stats = self.ctx.stats_mut();
        stats.finish_burst();
        stats.set_rendering(true);
        self.ctx.publish();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::testing::ScriptedFactory;

    fn context(factory: ScriptedFactory, steps_per_generation: u32) -> RunContext<ScriptedFactory> {
        let config = SimulationConfig {
            steps_per_generation: Some(steps_per_generation),
            ..SimulationConfig::default()
        };
        RunContext::new(factory, config).unwrap()
    }

    #[test]
    fn advances_exactly_the_target_generations() {
        let mut ctx = context(ScriptedFactory::every(7, 4.25), 7);
        let report = FastForwardController::new(10).run(&mut ctx).unwrap();

        assert_eq!(report.generations, 10);
        assert_eq!(report.steps, 70);
        assert_eq!(ctx.state().generation_number, 11);
        assert_eq!(ctx.state().generation_age, 0);
        assert!(ctx.state().rendering_enabled);
        assert_eq!(ctx.readout().score, "4.25");
    }

    #[test]
    fn mid_generation_start_still_counts_whole_generations() {
        let script = [None, None, Some(1.0), None, Some(2.0), None, None, None, Some(3.0)];
        let mut ctx = context(ScriptedFactory::new(&script), 10);
        for _ in 0..4 {
            ctx.advance().unwrap();
        }
        let before = ctx.state().generation_number;
        assert_eq!(ctx.state().generation_age, 1);

        FastForwardController::new(3).run(&mut ctx).unwrap();
        assert_eq!(ctx.state().generation_number, before + 3);
        assert_eq!(ctx.state().generation_age, 0);
    }

    #[test]
    fn engine_decides_where_generations_end() {
        // the engine ignores the configured generation length
        let mut ctx = context(ScriptedFactory::every(30, 1.0), 2);
        let report = FastForwardController::new(10).run(&mut ctx).unwrap();

        assert_eq!(report.generations, 10);
        assert_eq!(report.steps, 300);
        assert_eq!(ctx.state().generation_number, 11);
        assert_eq!(ctx.state().generation_age, 0);
        assert!(ctx.state().rendering_enabled);
    }

    #[test]
    fn rendering_and_age_are_restored_when_the_engine_fails() {
        let mut ctx = context(ScriptedFactory::every(3, 1.0).failing_at(&[4]), 3);
        let err = FastForwardController::new(5).run(&mut ctx).unwrap_err();

        assert!(matches!(err, FastForwardError::Engine(_)));
        assert!(ctx.state().rendering_enabled);
        assert_eq!(ctx.state().generation_number, 2);
        assert_eq!(ctx.state().generation_age, 0);
        assert_eq!(ctx.readout().age, "0");
    }

    #[test]
    fn step_limit_is_opt_in() {
        let mut ctx = context(ScriptedFactory::new(&[]), 2);
        let err = FastForwardController::new(1)
            .with_step_limit(8)
            .run(&mut ctx)
            .unwrap_err();

        assert!(matches!(
            err,
            FastForwardError::StepLimitReached {
                steps: 8,
                completed: 0,
                target: 1
            }
        ));
        assert!(ctx.state().rendering_enabled);
        assert_eq!(ctx.state().generation_age, 0);
        assert_eq!(ctx.handle().steps(), 8);
    }

    #[test]
    fn configured_limit_reaches_the_controller() {
        let config = FastForwardConfig {
            generations: 2,
            max_steps: Some(5),
        };
        let mut ctx = context(ScriptedFactory::every(4, 1.0), 4);
        let err = FastForwardController::from(&config)
            .run(&mut ctx)
            .unwrap_err();
        assert!(matches!(err, FastForwardError::StepLimitReached { completed: 1, .. }));
    }

    #[test]
    fn second_burst_while_suspended_is_rejected() {
        let mut ctx = context(ScriptedFactory::every(2, 1.0), 2);
        ctx.stats_mut().set_rendering(false);

        let err = FastForwardController::default().run(&mut ctx).unwrap_err();
        assert!(matches!(err, FastForwardError::AlreadyRunning));
        assert_eq!(ctx.handle().steps(), 0);
    }

    #[test]
    fn zero_target_only_resets_age() {
        let mut ctx = context(ScriptedFactory::every(5, 1.0), 5);
        ctx.advance().unwrap();
        let report = FastForwardController::new(0).run(&mut ctx).unwrap();
        assert_eq!(report.steps, 0);
        assert_eq!(ctx.state().generation_number, 1);
        assert_eq!(ctx.state().generation_age, 0);
    }
}
