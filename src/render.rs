//! Maps world snapshots onto a drawing surface.

use crate::engine::{Entity, WorldSnapshot};

/// RGBA, components in [0, 1].
pub type Color = [f32; 4];

pub const BACKGROUND: Color = [0.1, 0.1, 0.1, 1.0];
pub const ANIMAL_COLOR: Color = [1.0, 0.0, 0.0, 1.0];
pub const FOOD_COLOR: Color = [0.0, 1.0, 0.0, 1.0];

/// Side of the square drawn for every entity, in surface units.
pub const ENTITY_SIZE: f64 = 10.0;

/// Something draw calls can be issued against, in logical units.
pub trait Surface {
    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// `rect` is `[x, y, width, height]`.
    fn fill_rect(&mut self, color: Color, rect: [f64; 4]);
}

/// Overwrite `surface` with `snapshot`. Nothing from earlier frames survives.
pub fn render(snapshot: &WorldSnapshot, surface: &mut dyn Surface, width: f64, height: f64) {
    surface.clear(BACKGROUND);
    for food in &snapshot.food {
        draw_entity(surface, FOOD_COLOR, food, width, height);
    }
    for animal in &snapshot.animals {
        draw_entity(surface, ANIMAL_COLOR, animal, width, height);
    }
}

/// Top-left corner of an entity's square. The square stays on the surface,
/// so `(1, 1)` lands at `(width, height)` minus the footprint.
pub fn entity_position(entity: &Entity, width: f64, height: f64) -> [f64; 2] {
    let x = (entity.x * width).min(width - ENTITY_SIZE).max(0.0);
    let y = (entity.y * height).min(height - ENTITY_SIZE).max(0.0);
    [x, y]
}

fn draw_entity(surface: &mut dyn Surface, color: Color, entity: &Entity, width: f64, height: f64) {
    let [x, y] = entity_position(entity, width, height);
    surface.fill_rect(color, [x, y, ENTITY_SIZE, ENTITY_SIZE]);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect { color: Color, rect: [f64; 4] },
}

/// Surface that keeps the calls of the latest frame. Used headless.
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames drawn (clears seen) so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn rects_of(&self, color: Color) -> usize {
        self.commands
            .iter()
            .filter(|command| {
                matches!(command, DrawCommand::FillRect { color: drawn, .. } if *drawn == color)
            })
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
        self.frames += 1;
    }

    fn fill_rect(&mut self, color: Color, rect: [f64; 4]) {
        self.commands.push(DrawCommand::FillRect { color, rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(animals: &[(f64, f64)], food: &[(f64, f64)]) -> WorldSnapshot {
        let to_entities = |points: &[(f64, f64)]| {
            points
                .iter()
                .map(|&(x, y)| Entity { x, y })
                .collect::<Vec<_>>()
        };
        WorldSnapshot {
            animals: to_entities(animals),
            food: to_entities(food),
        }
    }

    #[test]
    fn corners_map_to_surface_bounds() {
        let origin = entity_position(&Entity { x: 0.0, y: 0.0 }, 1280.0, 720.0);
        assert_eq!(origin, [0.0, 0.0]);

        let far = entity_position(&Entity { x: 1.0, y: 1.0 }, 1280.0, 720.0);
        assert_eq!(far, [1280.0 - ENTITY_SIZE, 720.0 - ENTITY_SIZE]);
    }

    #[test]
    fn interior_points_scale_with_surface() {
        let pos = entity_position(&Entity { x: 0.25, y: 0.5 }, 800.0, 450.0);
        assert_eq!(pos, [200.0, 225.0]);
    }

    #[test]
    fn frame_starts_with_a_clear_and_draws_every_entity() {
        let mut list = DrawList::new();
        let world = snapshot(&[(0.1, 0.1), (0.2, 0.2)], &[(0.5, 0.5)]);
        render(&world, &mut list, 100.0, 100.0);

        assert_eq!(list.commands()[0], DrawCommand::Clear(BACKGROUND));
        assert_eq!(list.rects_of(ANIMAL_COLOR), 2);
        assert_eq!(list.rects_of(FOOD_COLOR), 1);
        assert!(list.commands().iter().all(|c| match c {
            DrawCommand::FillRect { rect, .. } => rect[2] == ENTITY_SIZE && rect[3] == ENTITY_SIZE,
            DrawCommand::Clear(_) => true,
        }));
    }

    #[test]
    fn frames_do_not_accumulate() {
        let mut list = DrawList::new();
        render(&snapshot(&[(0.1, 0.1); 5], &[]), &mut list, 100.0, 100.0);
        render(&snapshot(&[(0.1, 0.1)], &[]), &mut list, 100.0, 100.0);
        assert_eq!(list.rects_of(ANIMAL_COLOR), 1);
        assert_eq!(list.frames(), 2);
    }
}
