use crate::{
    WorldConfig,
    bird::Bird,
    observation::{Action, Observation},
    obstacle::Obstacle,
    pilot::Pilot,
    render::EntityId,
};

/// One bird and the pilot flying it.
///
/// The agent counts how many ticks it survived and keeps the last observation it acted on;
/// both are used to rank agents once their generation is over.
#[derive(Debug, Clone)]
pub struct Agent<P> {
    id: EntityId,
    bird: Bird,
    pilot: P,
    survival_ticks: u64,
    dead: bool,
    last_observation: Option<Observation>,
}

impl<P> Agent<P>
where
    P: Pilot,
{
    #[must_use]
    pub fn new(id: EntityId, bird: Bird, pilot: P) -> Self {
        Self {
            id,
            bird,
            pilot,
            survival_ticks: 0,
            dead: false,
            last_observation: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[must_use]
    pub fn pilot(&self) -> &P {
        &self.pilot
    }

    pub fn pilot_mut(&mut self) -> &mut P {
        &mut self.pilot
    }

    #[must_use]
    pub fn into_pilot(self) -> P {
        self.pilot
    }

    #[must_use]
    pub fn survival_ticks(&self) -> u64 {
        self.survival_ticks
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    #[must_use]
    pub fn last_observation(&self) -> Option<&Observation> {
        self.last_observation.as_ref()
    }

    /// Observes `target`, asks the pilot for an action and applies it.
    pub fn act(&mut self, config: &WorldConfig, target: Option<&Obstacle>) -> Action {
        let observation = Observation::measure(config, &self.bird, target);
        let action = self.pilot.decide(&observation);
        if action.is_ascend() {
            self.bird.ascend(config);
        }
        self.last_observation = Some(observation);
        action
    }

    /// Advances the bird by one tick. The survival counter stops once the agent is dead.
    pub fn step_physics(&mut self, config: &WorldConfig) {
        self.bird.step_physics(config);
        if !self.dead {
            self.survival_ticks += 1;
        }
    }

    /// Returns `true` if the bird touches any obstacle or left the world.
    #[must_use]
    pub fn is_fatal<'a, I>(&self, config: &WorldConfig, obstacles: I) -> bool
    where
        I: IntoIterator<Item = &'a Obstacle>,
    {
        obstacles.into_iter().any(|o| self.bird.collides_with(o))
            || self.bird.is_out_of_bounds(config)
    }

    pub fn mark_dead(&mut self) {
        self.dead = true;
    }
}
