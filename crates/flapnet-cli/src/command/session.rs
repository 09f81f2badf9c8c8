use std::path::PathBuf;

use anyhow::Context as _;
use flapnet_training::{Population, TrainingConfig, TrainingSession};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::util;

/// Options shared by every command that runs a training session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// JSON file overriding the default training configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the random generator (drawn from the OS when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Champion file to resume from and save to
    #[arg(long)]
    champion: Option<PathBuf>,
    /// Number of mutated controllers flying alongside the champion
    #[arg(long)]
    cohort_size: Option<usize>,
}

impl SessionArg {
    /// Reads the configuration file, if any, and applies command-line overrides on top.
    pub(crate) fn load_config(&self) -> anyhow::Result<TrainingConfig> {
        let mut config: TrainingConfig = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None => TrainingConfig::default(),
        };
        if let Some(path) = &self.champion {
            config.champion_path.clone_from(path);
        }
        if let Some(cohort_size) = self.cohort_size {
            config.cohort_size = cohort_size;
        }
        Ok(config)
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Builds a session resuming from the configured champion file.
    pub(crate) fn start(&self) -> anyhow::Result<(TrainingSession<Pcg32>, u64)> {
        let config = self.load_config()?;
        let seed = self.seed();
        let population = Population::load_or_default(&config.champion_path);
        let champion_path = config.champion_path.clone();
        let session = TrainingSession::new(config, population, Pcg32::seed_from_u64(seed))
            .context("Invalid training configuration")?
            .with_champion_path(champion_path);
        Ok((session, seed))
    }
}
