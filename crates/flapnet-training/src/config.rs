use std::{path::PathBuf, time::Duration};

use flapnet_engine::{ConfigError, WorldConfig};
use serde::{Deserialize, Serialize};

use crate::schedule::LearningRateSchedule;

/// Largest accepted [`TrainingConfig::cohort_size`].
pub const MAX_COHORT_SIZE: usize = 100_000;

/// Error returned by [`TrainingConfig::validate`].
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum TrainingConfigError {
    #[display("invalid world configuration")]
    #[from]
    World { source: ConfigError },
    #[display("learning-rate schedule has no rate to choose from")]
    EmptyRateMenu,
    #[display("learning rate must be finite and non-negative, got {rate}")]
    InvalidRate { rate: f32 },
    #[display("cohort size {cohort_size} exceeds the maximum of {}", MAX_COHORT_SIZE)]
    CohortTooLarge { cohort_size: usize },
}

/// Everything a training session needs besides its random generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub world: WorldConfig,
    /// Number of mutated controllers per cohort. The unmutated champion flies alongside them,
    /// so a cohort holds `cohort_size + 1` agents.
    pub cohort_size: usize,
    pub schedule: LearningRateSchedule,
    /// Interval between two ticks when a tick driver runs in real time.
    pub tick_interval_ms: u64,
    /// File the champion is loaded from at startup and saved to at every generation boundary.
    pub champion_path: PathBuf,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            cohort_size: 20,
            schedule: LearningRateSchedule::default(),
            tick_interval_ms: 50,
            champion_path: PathBuf::from("champion.json"),
        }
    }
}

impl TrainingConfig {
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), TrainingConfigError> {
        self.world.validate()?;
        if self.cohort_size > MAX_COHORT_SIZE {
            return Err(TrainingConfigError::CohortTooLarge {
                cohort_size: self.cohort_size,
            });
        }
        let rates = self.schedule.rates();
        if rates.is_empty() {
            return Err(TrainingConfigError::EmptyRateMenu);
        }
        if let Some(rate) = rates.into_iter().find(|r| !r.is_finite() || *r < 0.0) {
            return Err(TrainingConfigError::InvalidRate { rate });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.cohort_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.champion_path, PathBuf::from("champion.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TrainingConfig = serde_json::from_str(
            r#"{"cohort_size": 5, "world": {"gap_height": 120.0}, "schedule": {"kind": "fixed", "rate": 0.02}}"#,
        )
        .unwrap();
        assert_eq!(config.cohort_size, 5);
        assert_eq!(config.world.gap_height, 120.0);
        assert_eq!(config.world.screen_width, 1000.0);
        assert_eq!(config.schedule, LearningRateSchedule::Fixed { rate: 0.02 });
        assert_eq!(config.tick_interval_ms, 50);
    }

    #[test]
    fn test_rejects_bad_world() {
        let mut config = TrainingConfig::default();
        config.world.screen_width = -1.0;
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::World { .. })
        ));
    }

    #[test]
    fn test_rejects_oversized_cohort() {
        let mut config = TrainingConfig {
            cohort_size: usize::MAX,
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::CohortTooLarge { cohort_size }) if cohort_size == usize::MAX
        ));

        config.cohort_size = MAX_COHORT_SIZE + 1;
        assert!(config.validate().is_err());
        config.cohort_size = MAX_COHORT_SIZE;
        assert!(config.validate().is_ok());
        config.cohort_size = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_schedules() {
        let mut config = TrainingConfig {
            schedule: LearningRateSchedule::RandomChoice { rates: vec![] },
            ..TrainingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::EmptyRateMenu)
        ));

        config.schedule = LearningRateSchedule::RandomChoice {
            rates: vec![0.1, f32::NAN],
        };
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::InvalidRate { .. })
        ));

        config.schedule = LearningRateSchedule::Fixed { rate: -0.5 };
        assert!(matches!(
            config.validate(),
            Err(TrainingConfigError::InvalidRate { rate }) if rate == -0.5
        ));
    }
}
