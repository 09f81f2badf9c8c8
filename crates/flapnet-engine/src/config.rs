use serde::{Deserialize, Serialize};

use crate::obstacle::TargetPolicy;

/// Error returned when a [`WorldConfig`] cannot drive a simulation.
///
/// Observations divide by the screen dimensions, so a zero-sized screen is rejected here
/// at startup rather than surfacing as `NaN` in the middle of a run.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("screen dimensions must be positive, got {width}x{height}")]
    DegenerateScreen { width: f32, height: f32 },
    #[display("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[display("gap height {gap_height} leaves no room for pipes on a screen {screen_height} high")]
    GapTooLarge { gap_height: f32, screen_height: f32 },
    #[display("at least one obstacle must be kept on screen")]
    NoObstacles,
}

/// Geometry and physics constants of the world.
///
/// Defaults reproduce the classic layout: a 1000x500 screen, 40 px pipes scrolling 10 px per
/// tick with a 100 px gap, and a 40x40 bird falling 8 px per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Vertical opening between the top and bottom pipe of a pair.
    pub gap_height: f32,
    pub obstacle_width: f32,
    /// Leftward scroll applied to every obstacle per tick.
    pub obstacle_step: f32,
    /// A new pair is spawned whenever fewer obstacles than this remain.
    pub min_obstacles: usize,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Downward displacement per tick.
    pub gravity_step: f32,
    /// Upward displacement applied instantly by an ascend action.
    pub ascend_step: f32,
    /// Degrees the bird tilts down per tick.
    pub rotation_step: f32,
    /// Lower bound of the bird's tilt in degrees.
    pub min_angle: f32,
    /// Slack added to the vertical world bounds before an agent counts as out of bounds.
    pub bounds_margin: f32,
    pub target_policy: TargetPolicy,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: 1000.0,
            screen_height: 500.0,
            gap_height: 100.0,
            obstacle_width: 40.0,
            obstacle_step: 10.0,
            min_obstacles: 3,
            bird_width: 40.0,
            bird_height: 40.0,
            gravity_step: 8.0,
            ascend_step: 40.0,
            rotation_step: 5.0,
            min_angle: -90.0,
            bounds_margin: 5.0,
            target_policy: TargetPolicy::default(),
        }
    }
}

impl WorldConfig {
    /// Checks that the configuration describes a playable world.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.screen_width) || !is_positive(self.screen_height) {
            return Err(ConfigError::DegenerateScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        for (name, value) in [
            ("gap_height", self.gap_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_step", self.obstacle_step),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
        ] {
            if !is_positive(value) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        // the highest spawn offset is h - h/3, the bottom pipe must still fit below it
        if self.screen_height - self.max_gap_offset() - self.gap_height < 0.0 {
            return Err(ConfigError::GapTooLarge {
                gap_height: self.gap_height,
                screen_height: self.screen_height,
            });
        }
        if self.min_obstacles == 0 {
            return Err(ConfigError::NoObstacles);
        }
        Ok(())
    }

    /// Smallest offset of a pipe gap from the top of the screen.
    #[must_use]
    pub fn min_gap_offset(&self) -> f32 {
        (self.screen_height / 3.0).trunc()
    }

    /// Largest offset of a pipe gap from the top of the screen.
    #[must_use]
    pub fn max_gap_offset(&self) -> f32 {
        self.screen_height.trunc() - self.min_gap_offset()
    }

    /// Horizontal position every bird is spawned at.
    #[must_use]
    pub fn bird_spawn_x(&self) -> f32 {
        self.screen_width / 10.0
    }

    /// Vertical position every bird is spawned at.
    #[must_use]
    pub fn bird_spawn_y(&self) -> f32 {
        self.screen_height / 2.0
    }
}

fn is_positive(value: f32) -> bool {
    value > 0.0
}
