use serde::{Deserialize, Serialize};

use crate::{WorldConfig, geometry::Rect};

/// Which half of a pipe pair an obstacle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Side {
    /// Hangs from the top of the screen down to the gap.
    Top,
    /// Rises from the bottom of the screen up to the gap.
    Bottom,
}

/// A pipe scrolling from right to left.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    bounds: Rect,
    side: Side,
}

impl Obstacle {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32, side: Side) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
            side,
        }
    }

    /// Builds the top/bottom pair of pipes at `x` whose gap starts `gap_offset` below the
    /// top of the screen.
    #[must_use]
    pub fn pair(config: &WorldConfig, x: f32, gap_offset: f32) -> [Self; 2] {
        let width = config.obstacle_width;
        let bottom_height = config.screen_height - gap_offset - config.gap_height;
        [
            Self::new(x, 0.0, width, gap_offset, Side::Top),
            Self::new(
                x,
                config.screen_height - bottom_height,
                width,
                bottom_height,
                Side::Bottom,
            ),
        ]
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

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns `false` once the pipe has scrolled entirely past the left edge.
    #[must_use]
    pub fn is_in_view(&self) -> bool {
        self.bounds.right() > 0.0
    }

    pub fn advance(&mut self, step: f32) {
        self.bounds.x -= step;
    }
}

/// How the single obstacle all agents observe in a tick is chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetPolicy {
    /// The bottom pipe with the smallest `x` whose right edge is still ahead of the agent's
    /// left edge. Falls back to the first obstacle when every pipe has been passed.
    #[default]
    NearestAhead,
    /// Always the first obstacle in spawn order.
    FirstInList,
}

impl TargetPolicy {
    /// Selects the target for an agent whose left edge is at `agent_x`.
    ///
    /// Returns `None` only if `obstacles` is empty.
    pub fn select<'a, I>(self, obstacles: I, agent_x: f32) -> Option<&'a Obstacle>
    where
        I: IntoIterator<Item = &'a Obstacle>,
        I::IntoIter: Clone,
    {
        let mut obstacles = obstacles.into_iter();
        match self {
            TargetPolicy::FirstInList => obstacles.next(),
            TargetPolicy::NearestAhead => obstacles
                .clone()
                .filter(|o| o.side().is_bottom() && o.bounds().right() > agent_x)
                .min_by(|a, b| a.x().total_cmp(&b.x()))
                .or_else(|| obstacles.next()),
        }
    }
}
