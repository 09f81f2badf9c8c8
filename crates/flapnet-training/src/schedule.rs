use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

/// Learning rates the default schedule picks from.
pub const DEFAULT_RATE_MENU: [f32; 3] = [0.1, 0.05, 0.01];

/// Chooses the mutation learning rate for each new cohort.
///
/// The rate is picked once per cohort and shared by every mutation in its chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LearningRateSchedule {
    /// The same rate for every cohort.
    Fixed { rate: f32 },
    /// A rate drawn uniformly from `rates` for every cohort.
    RandomChoice { rates: Vec<f32> },
    /// `initial` for the first `threshold` generations, `later` afterwards.
    Stepped {
        initial: f32,
        later: f32,
        threshold: usize,
    },
}

impl Default for LearningRateSchedule {
    fn default() -> Self {
        Self::RandomChoice {
            rates: DEFAULT_RATE_MENU.to_vec(),
        }
    }
}

impl LearningRateSchedule {
    /// The stepped variant with its usual values: 0.1 for ten generations, then 0.01.
    #[must_use]
    pub fn stepped() -> Self {
        Self::Stepped {
            initial: 0.1,
            later: 0.01,
            threshold: 10,
        }
    }

    /// Every rate this schedule can produce.
    #[must_use]
    pub fn rates(&self) -> Vec<f32> {
        match self {
            Self::Fixed { rate } => vec![*rate],
            Self::RandomChoice { rates } => rates.clone(),
            Self::Stepped { initial, later, .. } => vec![*initial, *later],
        }
    }

    /// Returns the learning rate for the cohort of `generation` (0-based).
    ///
    /// An empty [`LearningRateSchedule::RandomChoice`] menu yields `0.0`, which reproduces the
    /// champion unchanged; configurations are validated against this beforehand.
    pub fn rate_for<R>(&self, generation: usize, rng: &mut R) -> f32
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Fixed { rate } => *rate,
            Self::RandomChoice { rates } => rates.choose(rng).copied().unwrap_or(0.0),
            Self::Stepped {
                initial,
                later,
                threshold,
            } => {
                if generation < *threshold {
                    *initial
                } else {
                    *later
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_fixed() {
        let mut rng = Pcg32::seed_from_u64(0);
        let schedule = LearningRateSchedule::Fixed { rate: 0.2 };
        for generation in 0..20 {
            assert_eq!(schedule.rate_for(generation, &mut rng), 0.2);
        }
    }

    #[test]
    fn test_random_choice_covers_menu() {
        let mut rng = Pcg32::seed_from_u64(1);
        let schedule = LearningRateSchedule::default();
        let mut seen = [0usize; 3];
        for generation in 0..3000 {
            let rate = schedule.rate_for(generation, &mut rng);
            let index = DEFAULT_RATE_MENU
                .iter()
                .position(|r| *r == rate)
                .expect("rate outside the menu");
            seen[index] += 1;
        }
        // uniform: each entry gets roughly a third of the draws
        for count in seen {
            assert!((800..1200).contains(&count), "{seen:?}");
        }
    }

    #[test]
    fn test_stepped_drops_after_threshold() {
        let mut rng = Pcg32::seed_from_u64(2);
        let schedule = LearningRateSchedule::stepped();
        assert_eq!(schedule.rate_for(0, &mut rng), 0.1);
        assert_eq!(schedule.rate_for(9, &mut rng), 0.1);
        assert_eq!(schedule.rate_for(10, &mut rng), 0.01);
        assert_eq!(schedule.rate_for(500, &mut rng), 0.01);
    }

    #[test]
    fn test_empty_menu_yields_zero() {
        let mut rng = Pcg32::seed_from_u64(3);
        let schedule = LearningRateSchedule::RandomChoice { rates: vec![] };
        assert_eq!(schedule.rate_for(0, &mut rng), 0.0);
    }

    #[test]
    fn test_rates() {
        assert_eq!(LearningRateSchedule::stepped().rates(), [0.1, 0.01]);
        assert_eq!(LearningRateSchedule::default().rates(), DEFAULT_RATE_MENU);
    }

    #[test]
    fn test_json_representation() {
        let schedule: LearningRateSchedule =
            serde_json::from_str(r#"{"kind": "fixed", "rate": 0.05}"#).unwrap();
        assert_eq!(schedule, LearningRateSchedule::Fixed { rate: 0.05 });
        let schedule: LearningRateSchedule = serde_json::from_str(
            r#"{"kind": "stepped", "initial": 0.1, "later": 0.01, "threshold": 10}"#,
        )
        .unwrap();
        assert_eq!(schedule, LearningRateSchedule::stepped());
    }
}
