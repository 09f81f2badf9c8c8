//! Deterministic side-scrolling simulation for evolving flappy-bird pilots.
//!
//! The engine knows nothing about neural networks or training. It advances a [`World`] one
//! tick at a time and asks each agent's [`Pilot`] what to do:
//!
//! - [`World`] - Obstacles, live agents and the dead set of the current cohort
//! - [`Agent`] - A [`Bird`] body coupled to a pilot, with its survival counter
//! - [`Obstacle`] - One half of a scrolling pipe pair
//! - [`Observation`] / [`Action`] - The pilot's input and output
//! - [`Renderer`] - Optional visual collaborator driven by the world
//!
//! # Tick Order
//!
//! 1. Retire obstacles that left the screen, spawn a new pair if too few remain
//! 2. Scroll every obstacle left by a fixed step
//! 3. Select one target obstacle shared by every agent ([`TargetPolicy`])
//! 4. For each live agent: observe → decide → act → fall → collision check
//! 5. Move newly dead agents to the dead set and destroy their visuals
//!
//! # Example
//!
//! ```
//! use flapnet_engine::{NullPilot, NullRenderer, World, WorldConfig};
//! use rand::SeedableRng as _;
//!
//! let mut rng = rand_pcg::Pcg32::seed_from_u64(42);
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! world.spawn_cohort([NullPilot, NullPilot], &mut NullRenderer);
//!
//! while !world.is_extinct() {
//!     world.step(&mut rng, &mut NullRenderer);
//! }
//! assert_eq!(world.take_dead().len(), 2);
//! ```
//!
//! # Determinism
//!
//! The only source of randomness is the gap offset of newly spawned pipe pairs, drawn from
//! the generator passed to [`World::step`]. Given the same generator state, pilots and
//! configuration, two runs produce identical deaths on identical ticks.

pub use self::{
    agent::Agent,
    bird::Bird,
    config::{ConfigError, WorldConfig},
    geometry::Rect,
    observation::{Action, OBSERVATION_LEN, Observation},
    obstacle::{Obstacle, Side, TargetPolicy},
    pilot::{ManualPilot, NullPilot, Pilot},
    render::{EntityId, NullRenderer, Renderer},
    world::{TickReport, World},
};

mod agent;
mod bird;
mod config;
mod geometry;
mod observation;
mod obstacle;
mod pilot;
mod render;
mod world;
