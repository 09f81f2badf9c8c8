//! Evolutionary training of flapnet controllers.
//!
//! Training is a gradient-free search: a cohort of controllers flies through the same world
//! until every agent has crashed, the agent that survived longest becomes the champion, and
//! the next cohort is derived from that champion by random perturbation.
//!
//! # How Training Works
//!
//! 1. **Generate** - [`Population::generate`] yields the champion followed by a chain of
//!    mutations, each one a [`tweak`](flapnet_controller::Controller::tweak) of the previous
//! 2. **Fly** - The cohort is spawned into a [`World`](flapnet_engine::World) and stepped tick
//!    by tick
//! 3. **Select** - Once extinct, [`select_fittest`] ranks the dead set by survival ticks,
//!    breaking ties by the smaller vertical gap to the target pipe
//! 4. **Persist** - The new champion is saved, the obstacles are reset and the loop restarts
//!
//! [`TrainingSession`] runs this loop as a state machine driven by an external tick source,
//! either a headless loop or a terminal UI.
//!
//! # Learning Rate
//!
//! The perturbation magnitude is chosen once per cohort by a [`LearningRateSchedule`]. The
//! default draws from `{0.1, 0.05, 0.01}` uniformly, so some cohorts explore far from the
//! champion while others refine it.
//!
//! # Example
//!
//! ```
//! use flapnet_engine::NullRenderer;
//! use flapnet_training::{Population, TrainingConfig, TrainingSession};
//! use rand::SeedableRng as _;
//!
//! let rng = rand_pcg::Pcg32::seed_from_u64(0);
//! let mut session = TrainingSession::new(TrainingConfig::default(), Population::default(), rng)
//!     .unwrap();
//!
//! while session.population().generation() < 3 {
//!     session.step(&mut NullRenderer).unwrap();
//! }
//! assert!(session.last_report().is_some());
//! ```
//!
//! # Current Limitations
//!
//! - **Single lineage**: Only the champion survives a generation; there is no crossover and
//!   no diversity beyond the mutation chain
//! - **Sequential**: Agents of a cohort are simulated one after another on one thread

pub use self::{
    config::{MAX_COHORT_SIZE, TrainingConfig, TrainingConfigError},
    generation::Generation,
    population::Population,
    report::GenerationReport,
    schedule::{DEFAULT_RATE_MENU, LearningRateSchedule},
    selection::select_fittest,
    session::{SessionState, StepOutcome, TrainingSession},
};

mod config;
mod generation;
mod population;
mod report;
mod schedule;
mod selection;
mod session;
