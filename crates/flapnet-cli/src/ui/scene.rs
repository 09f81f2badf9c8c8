use std::collections::BTreeMap;

use flapnet_engine::{Bird, EntityId, Obstacle, Rect, Renderer, WorldConfig};
use ratatui::{
    buffer::Buffer,
    layout,
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Rectangle},
    },
};

const BIRD_COLOR: Color = Color::Yellow;
const PIPE_COLOR: Color = Color::Green;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sprite {
    Bird(Rect),
    Pipe(Rect),
}

/// Retained picture of the world, kept up to date by the simulation through [`Renderer`].
#[derive(Debug)]
pub struct Scene {
    title: &'static str,
    width: f64,
    height: f64,
    sprites: BTreeMap<EntityId, Sprite>,
}

impl Scene {
    pub fn new(title: &'static str, config: &WorldConfig) -> Self {
        Self {
            title,
            width: f64::from(config.screen_width),
            height: f64::from(config.screen_height),
            sprites: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn bird_count(&self) -> usize {
        self.sprites
            .values()
            .filter(|s| matches!(s, Sprite::Bird(_)))
            .count()
    }

    #[cfg(test)]
    pub(crate) fn pipe_count(&self) -> usize {
        self.sprites
            .values()
            .filter(|s| matches!(s, Sprite::Pipe(_)))
            .count()
    }

    /// Converts a screen rectangle (y down) into canvas space (y up).
    fn to_canvas(&self, rect: &Rect, color: Color) -> Rectangle {
        Rectangle {
            x: f64::from(rect.x),
            y: self.height - f64::from(rect.bottom()),
            width: f64::from(rect.width),
            height: f64::from(rect.height),
            color,
        }
    }
}

impl Renderer for Scene {
    fn draw_bird(&mut self, id: EntityId, bird: &Bird) {
        self.sprites.insert(id, Sprite::Bird(*bird.bounds()));
    }

    fn draw_obstacle(&mut self, id: EntityId, obstacle: &Obstacle) {
        self.sprites.insert(id, Sprite::Pipe(*obstacle.bounds()));
    }

    fn destroy(&mut self, id: EntityId) {
        self.sprites.remove(&id);
    }
}

impl Widget for &Scene {
    fn render(self, area: layout::Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Canvas::default()
            .block(Block::bordered().title(self.title))
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| {
                // pipes first so birds stay visible when they overlap
                for sprite in self.sprites.values() {
                    if let Sprite::Pipe(rect) = sprite {
                        ctx.draw(&self.to_canvas(rect, PIPE_COLOR));
                    }
                }
                for sprite in self.sprites.values() {
                    if let Sprite::Bird(rect) = sprite {
                        ctx.draw(&self.to_canvas(rect, BIRD_COLOR));
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use flapnet_engine::{NullPilot, World};
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_tracks_world_entities() {
        let config = WorldConfig::default();
        let mut scene = Scene::new("test", &config);
        let mut rng = Pcg32::seed_from_u64(0);
        let mut world = World::new(config).unwrap();
        world.spawn_cohort([NullPilot, NullPilot], &mut scene);
        assert_eq!(scene.bird_count(), 2);
        assert_eq!(scene.pipe_count(), 0);

        world.step(&mut rng, &mut scene);
        assert_eq!(scene.sprites.len(), 2 + 4);

        while !world.is_extinct() {
            world.step(&mut rng, &mut scene);
        }
        assert_eq!(scene.bird_count(), 0);
        assert_eq!(scene.sprites.len(), 4);
    }

    #[test]
    fn test_canvas_flips_y() {
        let config = WorldConfig::default();
        let scene = Scene::new("test", &config);
        let rect = scene.to_canvas(&Rect::new(10.0, 0.0, 40.0, 150.0), PIPE_COLOR);
        assert_eq!(rect.y, 350.0);
        assert_eq!(rect.height, 150.0);
    }

    #[test]
    fn test_renders_into_buffer() {
        let config = WorldConfig::default();
        let mut scene = Scene::new("test", &config);
        scene.draw_obstacle(
            EntityId::new(0),
            &Obstacle::new(0.0, 0.0, 1000.0, 500.0, flapnet_engine::Side::Top),
        );
        let area = layout::Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.fg == PIPE_COLOR)
            .count();
        assert!(painted > 0);
    }
}
