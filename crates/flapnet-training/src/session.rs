use std::{
    mem,
    path::{Path, PathBuf},
};

use flapnet_controller::{Controller, PersistenceError};
use flapnet_engine::{NullRenderer, Renderer, TickReport, World};
use rand::Rng;

use crate::{
    config::{TrainingConfig, TrainingConfigError},
    population::Population,
    report::GenerationReport,
    selection::select_fittest,
};

/// Lifecycle of a [`TrainingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// A cohort is flying.
    Running,
    /// The cohort is extinct and the next one has not been spawned yet.
    ///
    /// A session only stays here when persisting the champion failed; the next
    /// [`TrainingSession::step`] retries.
    AwaitingNextGeneration,
    /// [`TrainingSession::quit`] was called. Further steps do nothing.
    Stopped,
}

/// What a call to [`TrainingSession::step`] did.
#[derive(Debug, Clone, PartialEq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// One tick was simulated and some agents are still alive.
    Ticked(TickReport),
    /// The tick killed the last agent. The champion was updated and persisted and the next
    /// cohort is in the air.
    GenerationCompleted {
        tick: TickReport,
        report: Option<GenerationReport>,
    },
    /// A previously failed generation switch was completed.
    GenerationStarted,
    Stopped,
}

/// The evolutionary training loop coupled to a world.
///
/// Each cohort flies until extinct. Its fittest agent becomes the champion, which is saved,
/// and the next cohort is generated from it by chained mutation:
///
/// ```text
/// Running --(last agent dies)--> AwaitingNextGeneration
///         <--(champion saved, obstacles reset, cohort spawned)--
/// Running | AwaitingNextGeneration --(quit: rank the dead, save)--> Stopped
/// ```
///
/// All randomness (mutation, learning-rate choice, pipe gaps) comes from the single generator
/// owned by the session.
#[derive(Debug)]
pub struct TrainingSession<R> {
    config: TrainingConfig,
    world: World<Controller>,
    population: Population,
    rng: R,
    state: SessionState,
    learning_rate: f32,
    champion_path: Option<PathBuf>,
    last_report: Option<GenerationReport>,
}

impl<R> TrainingSession<R>
where
    R: Rng,
{
    /// Validates `config` and spawns the first cohort from `population`.
    ///
    /// The session does not persist anything until [`TrainingSession::with_champion_path`]
    /// is called.
    pub fn new(
        config: TrainingConfig,
        population: Population,
        mut rng: R,
    ) -> Result<Self, TrainingConfigError> {
        config.validate()?;
        let mut world = World::new(config.world.clone())?;
        let learning_rate = config
            .schedule
            .rate_for(population.generation(), &mut rng);
        world.spawn_cohort(
            population.generate(config.cohort_size, learning_rate, &mut rng),
            &mut NullRenderer,
        );
        tracing::info!(
            generation = population.generation(),
            cohort = world.live_agents().len(),
            learning_rate,
            "training started"
        );
        Ok(Self {
            config,
            world,
            population,
            rng,
            state: SessionState::Running,
            learning_rate,
            champion_path: None,
            last_report: None,
        })
    }

    /// Saves the champion to `path` at every generation boundary and on quit.
    #[must_use]
    pub fn with_champion_path<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.champion_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    #[must_use]
    pub fn world(&self) -> &World<Controller> {
        &self.world
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Learning rate the flying cohort was mutated with.
    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    #[must_use]
    pub fn champion_path(&self) -> Option<&Path> {
        self.champion_path.as_deref()
    }

    /// Report of the most recently finished generation.
    #[must_use]
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Advances the session by one tick, switching generations when the cohort dies out.
    pub fn step<Rd>(&mut self, renderer: &mut Rd) -> Result<StepOutcome, PersistenceError>
    where
        Rd: Renderer + ?Sized,
    {
        match self.state {
            SessionState::Stopped => return Ok(StepOutcome::Stopped),
            SessionState::AwaitingNextGeneration => {
                self.start_next_generation(renderer)?;
                return Ok(StepOutcome::GenerationStarted);
            }
            SessionState::Running => {}
        }

        let tick = self.world.step(&mut self.rng, renderer);
        if !tick.is_extinct() {
            return Ok(StepOutcome::Ticked(tick));
        }

        let report = self.finish_generation();
        self.start_next_generation(renderer)?;
        Ok(StepOutcome::GenerationCompleted { tick, report })
    }

    /// Ranks the agents that already died, persists the champion and stops the session.
    ///
    /// The fittest agent of the partial dead set becomes the champion. When nothing has died
    /// yet the current champion is kept. Agents still flying are discarded.
    pub fn quit(&mut self) -> Result<(), PersistenceError> {
        if self.state.is_stopped() {
            return Ok(());
        }
        let dead = self.world.take_dead();
        if let Some(fittest) = select_fittest(&dead) {
            tracing::info!(
                agent = %fittest.id(),
                survival = fittest.survival_ticks(),
                "champion taken from the unfinished cohort"
            );
            self.population.set_best(fittest.pilot().clone());
        }
        self.save_champion()?;
        self.state = SessionState::Stopped;
        tracing::info!(
            generation = self.population.generation(),
            "training stopped"
        );
        Ok(())
    }

    /// Ranks the extinct cohort and promotes its fittest agent.
    fn finish_generation(&mut self) -> Option<GenerationReport> {
        let dead = self.world.take_dead();
        let generation = self.population.generation();
        let report = select_fittest(&dead).and_then(|fittest| {
            GenerationReport::from_cohort(generation, self.learning_rate, &dead, fittest)
        });
        self.population = mem::take(&mut self.population).advance_generation(&dead);
        self.state = SessionState::AwaitingNextGeneration;

        if let Some(report) = &report {
            tracing::info!(
                generation = report.generation,
                cohort = report.cohort_size,
                learning_rate = report.learning_rate,
                champion_survival = report.champion_survival,
                mean_survival = report.mean_survival,
                "generation finished"
            );
        }
        self.last_report.clone_from(&report);
        report
    }

    fn start_next_generation<Rd>(&mut self, renderer: &mut Rd) -> Result<(), PersistenceError>
    where
        Rd: Renderer + ?Sized,
    {
        self.save_champion()?;
        self.world.reset_obstacles(renderer);
        self.learning_rate = self
            .config
            .schedule
            .rate_for(self.population.generation(), &mut self.rng);
        self.world.spawn_cohort(
            self.population.generate(
                self.config.cohort_size,
                self.learning_rate,
                &mut self.rng,
            ),
            renderer,
        );
        self.state = SessionState::Running;
        Ok(())
    }

    fn save_champion(&self) -> Result<(), PersistenceError> {
        if let Some(path) = &self.champion_path {
            self.population.save(path)?;
            tracing::debug!(path = %path.display(), "champion saved");
        }
        Ok(())
    }
}
