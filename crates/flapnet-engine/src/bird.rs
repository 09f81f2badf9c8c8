use crate::{WorldConfig, geometry::Rect, obstacle::Obstacle};

/// The physical body an agent flies.
///
/// Physics is displacement based: gravity moves the bird down by a fixed step each tick and
/// an ascend moves it up instantly. There is no velocity state. The tilt angle only affects
/// how the bird is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    bounds: Rect,
    angle: f32,
}

impl Bird {
    /// Creates a bird at the spawn point of `config`.
    #[must_use]
    pub fn spawn(config: &WorldConfig) -> Self {
        Self::at(config, config.bird_spawn_x(), config.bird_spawn_y())
    }

    /// Creates a bird with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn at(config: &WorldConfig, x: f32, y: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, config.bird_width, config.bird_height),
            angle: 0.0,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.bounds.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.bounds.y
    }

    /// Tilt in degrees, `0` is level and negative values point the beak down.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Applies one tick of gravity and tilts the bird down, never past `min_angle`.
    pub fn step_physics(&mut self, config: &WorldConfig) {
        self.bounds.y += config.gravity_step;
        self.angle = f32::max(self.angle - config.rotation_step, config.min_angle);
    }

    /// Moves the bird up by one ascend step and levels it.
    pub fn ascend(&mut self, config: &WorldConfig) {
        self.bounds.y -= config.ascend_step;
        self.angle = 0.0;
    }

    #[must_use]
    pub fn collides_with(&self, obstacle: &Obstacle) -> bool {
        self.bounds.intersects(obstacle.bounds())
    }

    /// Returns `true` if the bird left the vertical extent of the world.
    #[must_use]
    pub fn is_out_of_bounds(&self, config: &WorldConfig) -> bool {
        let y = self.bounds.y;
        y - config.bounds_margin < 0.0 || y + config.bounds_margin > config.screen_height
    }
}
