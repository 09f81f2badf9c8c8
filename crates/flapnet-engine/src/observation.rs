use crate::{WorldConfig, bird::Bird, obstacle::Obstacle};

/// Number of values in an [`Observation`].
pub const OBSERVATION_LEN: usize = 3;

/// What an agent senses in one tick, normalized by the screen dimensions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Observation {
    /// `(agent.x - target.x) / screen_width`, negative while the target is ahead.
    pub horizontal_gap: f32,
    /// `(agent.y - target.y) / screen_height`.
    pub vertical_gap: f32,
    /// `(screen_height - agent.y) / screen_height`.
    pub ground_gap: f32,
}

impl Observation {
    /// Measures `bird` against `target`.
    ///
    /// Without a target only the ground distance is meaningful and both gaps are zero.
    #[must_use]
    pub fn measure(config: &WorldConfig, bird: &Bird, target: Option<&Obstacle>) -> Self {
        let (horizontal_gap, vertical_gap) = match target {
            Some(target) => (
                (bird.x() - target.x()) / config.screen_width,
                (bird.y() - target.y()) / config.screen_height,
            ),
            None => (0.0, 0.0),
        };
        Self {
            horizontal_gap,
            vertical_gap,
            ground_gap: (config.screen_height - bird.y()) / config.screen_height,
        }
    }

    #[must_use]
    pub fn to_array(self) -> [f32; OBSERVATION_LEN] {
        [self.horizontal_gap, self.vertical_gap, self.ground_gap]
    }
}

/// Discrete decision taken by a pilot each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Action {
    NoOp,
    Ascend,
}

impl Action {
    /// Picks the action with the largest logit, preferring the lower index on ties.
    #[must_use]
    pub fn argmax(logits: [f32; 2]) -> Self {
        if logits[1] > logits[0] {
            Action::Ascend
        } else {
            Action::NoOp
        }
    }
}
