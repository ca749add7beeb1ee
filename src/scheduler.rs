//! The per-frame control loop.
//!
//! A host (the window event pump, or [`Ticker`] when headless) calls
//! [`FrameScheduler::tick`] once per refresh opportunity. Every tick runs to
//! completion before the host gets control back, so ticks never overlap.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::context::RunContext;
use crate::engine::EngineFactory;
use crate::render::{Surface, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    Rendering,
    /// A fast-forward burst owns stepping.
    Suspended,
}

/// What a tick did. Either way the host should schedule the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Rendered and stepped; `generation_closed` if the step ended a
    /// generation.
    Stepped { generation_closed: bool },
    /// Rendered, but the step failed. Stats were left alone.
    StepFailed,
    /// Suspended: nothing drawn, nothing stepped.
    Idle,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    frames_rendered: u64,
    frames_idle: u64,
    step_failures: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode<F: EngineFactory>(ctx: &RunContext<F>) -> FrameMode {
        if ctx.state().rendering_enabled {
            FrameMode::Rendering
        } else {
            FrameMode::Suspended
        }
    }

    /// Run one frame: render the current world, step, update the stats.
    pub fn tick<F: EngineFactory>(
        &mut self,
        ctx: &mut RunContext<F>,
        surface: &mut dyn Surface,
        size: [f64; 2],
    ) -> TickOutcome {
        if Self::mode(ctx) == FrameMode::Suspended {
            self.frames_idle += 1;
            return TickOutcome::Idle;
        }

        let snapshot = ctx.handle().world();
        render(&snapshot, surface, size[0], size[1]);
        self.frames_rendered += 1;

        let outcome = match ctx.advance() {
            Ok(result) => {
                if let Some(stats) = result {
                    debug!(
                        generation = ctx.state().generation_number,
                        avg_score = stats.avg_score,
                        "generation finished"
                    );
                }
                TickOutcome::Stepped {
                    generation_closed: result.is_some(),
                }
            }
            Err(err) => {
                self.step_failures += 1;
                warn!(error = %err, failures = self.step_failures, "step failed, still running");
                TickOutcome::StepFailed
            }
        };
        ctx.publish();
        outcome
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn frames_idle(&self) -> u64 {
        self.frames_idle
    }

    pub fn step_failures(&self) -> u64 {
        self.step_failures
    }
}

/// Fixed-cadence stand-in for a display refresh.
#[derive(Debug)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    /// `fps == 0` means ticks are never delayed.
    pub fn new(fps: u32) -> Self {
        let interval = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / fps
        };
        Self {
            interval,
            next: Instant::now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleep until the next refresh opportunity.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            std::thread::sleep(self.next - now);
        }
        // a late frame does not make the following ones hurry to catch up
        self.next = Instant::now().max(self.next) + self.interval;
    }
}
