use std::path::Path;

use flapnet_controller::{Controller, PersistenceError};
use flapnet_engine::Agent;
use rand::Rng;

use crate::{generation::Generation, selection::select_fittest};

/// The current champion and the number of generations that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    champion: Controller,
    generation: usize,
}

impl Population {
    /// Starts at generation 0 with `champion` as the best controller.
    #[must_use]
    pub fn new(champion: Controller) -> Self {
        Self {
            champion,
            generation: 0,
        }
    }

    /// Loads the champion from `path`.
    ///
    /// A missing or unreadable file is not an error: training starts over from a zero
    /// controller and a warning is logged.
    pub fn load_or_default<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        match Controller::load(path) {
            Ok(champion) => {
                tracing::info!(path = %path.display(), "loaded champion");
                Self::new(champion)
            }
            Err(error) => {
                tracing::warn!(
                    error = &error as &dyn std::error::Error,
                    "champion unavailable, starting from a zero controller"
                );
                Self::default()
            }
        }
    }

    pub fn save<P>(&self, path: P) -> Result<(), PersistenceError>
    where
        P: AsRef<Path>,
    {
        self.champion.save(path)
    }

    #[must_use]
    pub fn champion(&self) -> &Controller {
        &self.champion
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Replaces the champion as is.
    pub fn set_best(&mut self, controller: Controller) {
        self.champion = controller;
    }

    /// Returns the controllers of the next cohort: the champion followed by `mutants` chained
    /// mutations of it.
    pub fn generate<'r, R>(
        &self,
        mutants: usize,
        learning_rate: f32,
        rng: &'r mut R,
    ) -> Generation<'r, R>
    where
        R: Rng + ?Sized,
    {
        Generation::new(self.champion.clone(), mutants, learning_rate, rng)
    }

    /// Closes the current generation.
    ///
    /// The fittest agent of `dead` becomes the champion. An empty `dead` set keeps the current
    /// champion. The generation counter advances either way.
    #[must_use]
    pub fn advance_generation(self, dead: &[Agent<Controller>]) -> Self {
        let champion = match select_fittest(dead) {
            Some(fittest) => fittest.pilot().clone(),
            None => self.champion,
        };
        Self {
            champion,
            generation: self.generation + 1,
        }
    }
}
