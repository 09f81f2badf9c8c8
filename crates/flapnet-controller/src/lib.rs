//! Fixed-topology controllers evolved by random perturbation.
//!
//! A [`Controller`] is a tiny feed-forward network (3 inputs, 5 hidden ReLU units, 2 output
//! logits) that flies a bird by implementing [`flapnet_engine::Pilot`]. Training never
//! computes gradients: new controllers are derived from a parent with
//! [`Controller::tweak`], and the best one is kept on disk with [`Controller::save`].
//!
//! # Example
//!
//! ```
//! use flapnet_controller::Controller;
//! use flapnet_engine::{Action, Observation};
//!
//! let controller = Controller::zeroed();
//! let observation = Observation {
//!     horizontal_gap: -0.4,
//!     vertical_gap: 0.1,
//!     ground_gap: 0.5,
//! };
//! assert_eq!(controller.decide(&observation), Action::NoOp);
//! ```

pub use self::{
    network::{Controller, HIDDEN_LEN, OUTPUT_LEN},
    persistence::PersistenceError,
};

mod mutation;
mod network;
pub mod persistence;
