//! Windowed host: piston's event loop is the frame pump.

use piston_window::*;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::context::RunContext;
use crate::controls::{ControlPanel, Parameter};
use crate::engine::EngineFactory;
use crate::error::Error;
use crate::fast_forward::FastForwardController;
use crate::render::{Color, Surface};
use crate::scheduler::FrameScheduler;
use crate::viewport::Viewport;

const TITLE: &str = "Generation Viewer";
const PANEL_HEIGHT: f64 = 80.0;
const PANEL_COLOR: Color = [0.2, 0.2, 0.2, 1.0];
const WINDOW_COLOR: Color = [0.05, 0.05, 0.05, 1.0];
const TEXT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
const FONT_SIZE: u32 = 16;

/// Draws in logical units below the stats panel.
struct PistonSurface<'a, 'g> {
    transform: math::Matrix2d,
    graphics: &'a mut G2d<'g>,
    size: [f64; 2],
}

impl Surface for PistonSurface<'_, '_> {
    fn clear(&mut self, color: Color) {
        rectangle(
            color,
            [0.0, 0.0, self.size[0], self.size[1]],
            self.transform,
            &mut *self.graphics,
        );
    }

    fn fill_rect(&mut self, color: Color, rect: [f64; 4]) {
        rectangle(color, rect, self.transform, &mut *self.graphics);
    }
}

/// Open the window and drive `ctx` until it is closed.
pub fn run<F: EngineFactory>(settings: &Settings, mut ctx: RunContext<F>) -> Result<(), Error> {
    let initial_width = f64::from(settings.window.width);
    let [width, height] = Viewport::fit(initial_width, 1.0).logical_size();
    let mut window: PistonWindow = WindowSettings::new(
        TITLE,
        [width.round() as u32, (height + PANEL_HEIGHT).round() as u32],
    )
    .exit_on_esc(true)
    .build()
    .map_err(|err| Error::RenderTargetUnavailable(err.to_string()))?;
    let mut viewport = Viewport::fit(
        width,
        pixel_ratio(window.draw_size().width, window.size().width),
    );

    let mut glyphs = window.load_font(&settings.window.font).ok();
    if glyphs.is_none() {
        warn!(font = %settings.window.font, "stats panel text disabled, font not loaded");
    }

    let fast_forward = FastForwardController::from(&settings.fast_forward);
    let mut scheduler = FrameScheduler::new();
    let mut panel = ControlPanel::new(ctx.config());
    info!(
        width,
        height,
        pixel_ratio = viewport.pixel_ratio,
        "window open"
    );

    while let Some(event) = window.next() {
        if let Some(args) = event.resize_args() {
            let ratio = pixel_ratio(f64::from(args.draw_size[0]), args.window_size[0]);
            viewport = Viewport::fit(args.window_size[0], ratio);
            debug!(
                width = viewport.width,
                height = viewport.height,
                backing = ?viewport.backing_size(),
                "surface resized"
            );
        }

        if let Some(Button::Keyboard(key)) = event.press_args() {
            handle_key(key, &mut ctx, &mut panel, &fast_forward);
        }

        if event.render_args().is_some() {
            window.draw_2d(&event, |c, g, device| {
                clear(WINDOW_COLOR, g);

                {
                    let mut surface = PistonSurface {
                        transform: c.transform.trans(0.0, PANEL_HEIGHT),
                        graphics: &mut *g,
                        size: viewport.logical_size(),
                    };
                    scheduler.tick(&mut ctx, &mut surface, viewport.logical_size());
                }

                rectangle(
                    PANEL_COLOR,
                    [0.0, 0.0, viewport.width, PANEL_HEIGHT],
                    c.transform,
                    g,
                );
                if let Some(ref mut glyphs) = glyphs {
                    for (row, line) in panel_lines(&ctx, &panel, &fast_forward).iter().enumerate() {
                        let drawn = text::Text::new_color(TEXT_COLOR, FONT_SIZE).draw(
                            line,
                            glyphs,
                            &c.draw_state,
                            c.transform.trans(10.0, 22.0 + 22.0 * row as f64),
                            g,
                        );
                        if drawn.is_err() {
                            debug!(row, "panel text not drawn");
                        }
                    }
                    glyphs.factory.encoder.flush(device);
                }
            });
        }
    }

    info!(
        frames = scheduler.frames_rendered(),
        generation = ctx.state().generation_number,
        "window closed"
    );
    Ok(())
}

fn handle_key<F: EngineFactory>(
    key: Key,
    ctx: &mut RunContext<F>,
    panel: &mut ControlPanel,
    fast_forward: &FastForwardController,
) {
    match key {
        Key::F => match fast_forward.run(ctx) {
            Ok(report) => debug!(steps = report.steps, "fast-forward done"),
            Err(err) => warn!(error = %err, "fast-forward failed"),
        },
        Key::D1 => panel.select(Parameter::AnimalCount),
        Key::D2 => panel.select(Parameter::FoodCount),
        Key::D3 => panel.select(Parameter::MutationRate),
        Key::D4 => panel.select(Parameter::MutationCoefficient),
        Key::Left => adjust(ctx, panel, -1),
        Key::Right => adjust(ctx, panel, 1),
        Key::R => {
            if let Err(err) = ctx.restart() {
                warn!(error = %err, "restart failed");
            }
        }
        _ => {}
    }
}

/// Device pixels per logical pixel along the width.
fn pixel_ratio(draw_width: f64, window_width: f64) -> f64 {
    if window_width > 0.0 {
        draw_width / window_width
    } else {
        1.0
    }
}

/// Nudge the selected control and rebuild from the result. A rejected
/// config puts the panel back in step with the simulation still running.
fn adjust<F: EngineFactory>(ctx: &mut RunContext<F>, panel: &mut ControlPanel, steps: i32) {
    let selected = panel.selected();
    let Some(config) = panel.adjust(steps) else {
        return;
    };
    if ctx.replace(config).is_err() {
        *panel = ControlPanel::new(ctx.config());
        panel.select(selected);
    }
}

fn panel_lines<F: EngineFactory>(
    ctx: &RunContext<F>,
    panel: &ControlPanel,
    fast_forward: &FastForwardController,
) -> [String; 3] {
    let stats = ctx.readout();
    let controls: Vec<String> = panel
        .controls()
        .iter()
        .enumerate()
        .map(|(i, control)| {
            let text = format!("{} {}: {}", i + 1, control.parameter.label(), control.readout());
            if control.parameter == panel.selected() {
                format!("[{text}]")
            } else {
                text
            }
        })
        .collect();

    [
        format!(
            "Generation: {} | Age: {} | Avg score: {} | Threads: {}",
            stats.generation,
            stats.age,
            stats.score,
            rayon::current_num_threads()
        ),
        controls.join("   "),
        format!(
            "F: skip {} generations | 1-4 select, Left/Right adjust | R restart | Esc quit",
            fast_forward.target_generations()
        ),
    ]
}
