use std::mem;

use rand::Rng;

use crate::{
    ConfigError, WorldConfig,
    agent::Agent,
    bird::Bird,
    obstacle::Obstacle,
    pilot::Pilot,
    render::{EntityId, EntityIds, Renderer},
};

/// What happened during one [`World::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the tick that was just simulated, starting at 1.
    pub tick: u64,
    /// Agents that died this tick, in cohort order.
    pub deaths: Vec<EntityId>,
    /// Agents still alive after the tick.
    pub live: usize,
}

impl TickReport {
    /// Returns `true` if the cohort has no live agent left.
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.live == 0
    }
}

/// The shared game state all agents of a cohort fly through.
///
/// The world owns every obstacle and agent. Agents that die are moved to a separate dead
/// set where they stay until the cohort is ranked with [`World::take_dead`].
#[derive(Debug, Clone)]
pub struct World<P> {
    config: WorldConfig,
    ids: EntityIds,
    obstacles: Vec<(EntityId, Obstacle)>,
    live: Vec<Agent<P>>,
    dead: Vec<Agent<P>>,
    tick: u64,
}

impl<P> World<P>
where
    P: Pilot,
{
    /// Creates an empty world with the initial obstacle layout.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self {
            config,
            ids: EntityIds::default(),
            obstacles: vec![],
            live: vec![],
            dead: vec![],
            tick: 0,
        };
        world.lay_initial_obstacles();
        Ok(world)
    }

    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of ticks simulated since the world was created.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn obstacles(&self) -> impl Iterator<Item = (EntityId, &Obstacle)> + '_ {
        self.obstacles.iter().map(|(id, o)| (*id, o))
    }

    #[must_use]
    pub fn live_agents(&self) -> &[Agent<P>] {
        &self.live
    }

    pub fn live_agents_mut(&mut self) -> impl Iterator<Item = &mut Agent<P>> + '_ {
        self.live.iter_mut()
    }

    #[must_use]
    pub fn dead_agents(&self) -> &[Agent<P>] {
        &self.dead
    }

    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.live.is_empty()
    }

    /// Adds one agent per pilot, all starting at the spawn point.
    pub fn spawn_cohort<I, R>(&mut self, pilots: I, renderer: &mut R)
    where
        I: IntoIterator<Item = P>,
        R: Renderer + ?Sized,
    {
        for pilot in pilots {
            let agent = Agent::new(self.ids.allocate(), Bird::spawn(&self.config), pilot);
            renderer.draw_bird(agent.id(), agent.bird());
            self.live.push(agent);
        }
    }

    /// Removes the dead set in death order, leaving the world ready for a new cohort.
    pub fn take_dead(&mut self) -> Vec<Agent<P>> {
        mem::take(&mut self.dead)
    }

    /// Replaces every obstacle with the initial layout.
    pub fn reset_obstacles<R>(&mut self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        for (id, _) in self.obstacles.drain(..) {
            renderer.destroy(id);
        }
        self.lay_initial_obstacles();
        for (id, obstacle) in &self.obstacles {
            renderer.draw_obstacle(*id, obstacle);
        }
    }

    /// Draws every obstacle and live bird, for a renderer attached after the entities were
    /// created.
    pub fn redraw<R>(&self, renderer: &mut R)
    where
        R: Renderer + ?Sized,
    {
        for (id, obstacle) in &self.obstacles {
            renderer.draw_obstacle(*id, obstacle);
        }
        for agent in &self.live {
            renderer.draw_bird(agent.id(), agent.bird());
        }
    }

    fn lay_initial_obstacles(&mut self) {
        let x0 = self.config.screen_width;
        let gap_offset = self.config.screen_height / 2.0;
        self.push_pair(x0, gap_offset);
        self.push_pair(x0 * 1.5, gap_offset);
    }

    fn push_pair(&mut self, x: f32, gap_offset: f32) {
        for obstacle in Obstacle::pair(&self.config, x, gap_offset) {
            self.obstacles.push((self.ids.allocate(), obstacle));
        }
    }

    /// Retires obstacles that scrolled out of view and spawns a new pair when too few remain.
    fn maintain_obstacles<G, R>(&mut self, rng: &mut G, renderer: &mut R)
    where
        G: Rng + ?Sized,
        R: Renderer + ?Sized,
    {
        self.obstacles.retain(|(id, obstacle)| {
            let keep = obstacle.is_in_view();
            if !keep {
                renderer.destroy(*id);
            }
            keep
        });

        if self.obstacles.len() < self.config.min_obstacles {
            #[expect(clippy::cast_possible_truncation)]
            let (min, max) = (
                self.config.min_gap_offset() as i32,
                self.config.max_gap_offset() as i32,
            );
            #[expect(clippy::cast_precision_loss)]
            let gap_offset = rng.random_range(min..=max) as f32;
            self.push_pair(self.config.screen_width, gap_offset);
        }
    }

    /// Advances the world by one tick.
    ///
    /// 1. Obstacle maintenance (retire, then spawn if needed)
    /// 2. Scroll obstacles left
    /// 3. Pick the target obstacle shared by every agent this tick
    /// 4. Each live agent observes, acts, falls and is checked for collisions
    /// 5. Agents that died are moved to the dead set and their visuals destroyed
    pub fn step<G, R>(&mut self, rng: &mut G, renderer: &mut R) -> TickReport
    where
        G: Rng + ?Sized,
        R: Renderer + ?Sized,
    {
        self.tick += 1;
        self.maintain_obstacles(rng, renderer);

        for (id, obstacle) in &mut self.obstacles {
            obstacle.advance(self.config.obstacle_step);
            renderer.draw_obstacle(*id, obstacle);
        }

        let config = &self.config;
        let obstacles = || self.obstacles.iter().map(|(_, o)| o);
        if let Some(first) = self.live.first() {
            let target = config.target_policy.select(obstacles(), first.bird().x());
            for agent in &mut self.live {
                agent.act(config, target);
                agent.step_physics(config);
                renderer.draw_bird(agent.id(), agent.bird());
                if agent.is_fatal(config, obstacles()) {
                    agent.mark_dead();
                }
            }
        }

        let mut deaths = vec![];
        let (dead, live): (Vec<_>, Vec<_>) =
            mem::take(&mut self.live).into_iter().partition(Agent::is_dead);
        for agent in dead {
            tracing::debug!(
                tick = self.tick,
                agent = %agent.id(),
                survived = agent.survival_ticks(),
                "agent died"
            );
            renderer.destroy(agent.id());
            deaths.push(agent.id());
            self.dead.push(agent);
        }
        self.live = live;

        TickReport {
            tick: self.tick,
            deaths,
            live: self.live.len(),
        }
    }
}
