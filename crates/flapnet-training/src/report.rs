use flapnet_engine::{Agent, Pilot};

/// Survival statistics of one finished cohort.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Index of the finished generation, starting at 0.
    pub generation: usize,
    pub cohort_size: usize,
    /// Learning rate the cohort was mutated with.
    pub learning_rate: f32,
    /// Survival ticks of the agent selected as the new champion.
    pub champion_survival: u64,
    pub min_survival: u64,
    pub max_survival: u64,
    pub mean_survival: f64,
}

impl GenerationReport {
    /// Summarizes `dead`, the complete dead set of a cohort.
    ///
    /// Returns `None` when the cohort was empty.
    #[must_use]
    pub fn from_cohort<P>(
        generation: usize,
        learning_rate: f32,
        dead: &[Agent<P>],
        champion: &Agent<P>,
    ) -> Option<Self>
    where
        P: Pilot,
    {
        let survival = dead.iter().map(Agent::survival_ticks);
        let min_survival = survival.clone().min()?;
        let max_survival = survival.clone().max()?;
        let total: u64 = survival.sum();
        #[expect(clippy::cast_precision_loss)]
        let mean_survival = total as f64 / dead.len() as f64;
        Some(Self {
            generation,
            cohort_size: dead.len(),
            learning_rate,
            champion_survival: champion.survival_ticks(),
            min_survival,
            max_survival,
            mean_survival,
        })
    }
}
