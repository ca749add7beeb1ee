//! Windowless host: a fixed-cadence [`Ticker`] stands in for the display.

use tracing::{info, warn};

use crate::context::RunContext;
use crate::engine::EngineFactory;
use crate::fast_forward::FastForwardController;
use crate::render::DrawList;
use crate::scheduler::{FrameScheduler, TickOutcome, Ticker};
use crate::viewport::Viewport;

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub frames: u64,
    /// 0 runs frames back to back.
    pub fps: u32,
    /// Trigger a fast-forward after every n-th frame.
    pub fast_forward_every: Option<u64>,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u64,
    pub generation: u32,
    pub age: u32,
    pub last_avg_score: f64,
    pub fast_forwards: u32,
    pub step_failures: u64,
}

pub fn run<F: EngineFactory>(
    ctx: &mut RunContext<F>,
    options: &HeadlessOptions,
    fast_forward: &FastForwardController,
) -> HeadlessSummary {
    let viewport = Viewport::fit(options.width, 1.0);
    let mut surface = DrawList::new();
    let mut scheduler = FrameScheduler::new();
    let mut ticker = Ticker::new(options.fps);
    let mut fast_forwards = 0;

    for frame in 1..=options.frames {
        ticker.wait();
        let outcome = scheduler.tick(ctx, &mut surface, viewport.logical_size());
        if outcome == (TickOutcome::Stepped { generation_closed: true }) {
            let stats = ctx.readout();
            info!(generation = %stats.generation, avg_score = %stats.score, frame, "generation");
        }

        let due = options
            .fast_forward_every
            .is_some_and(|every| every > 0 && frame % every == 0);
        if due {
            match fast_forward.run(ctx) {
                Ok(_) => fast_forwards += 1,
                Err(err) => warn!(error = %err, frame, "fast-forward failed"),
            }
        }
    }

    let state = *ctx.state();
    let summary = HeadlessSummary {
        frames: scheduler.frames_rendered(),
        generation: state.generation_number,
        age: state.generation_age,
        last_avg_score: state.last_avg_score,
        fast_forwards,
        step_failures: scheduler.step_failures(),
    };
    info!(
        frames = summary.frames,
        generation = summary.generation,
        age = summary.age,
        fast_forwards,
        "headless run finished"
    );
    summary
}
