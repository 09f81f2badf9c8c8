use crate::observation::{Action, Observation};

/// Anything that can fly a bird: maps an observation to an action every tick.
///
/// Trained controllers are pure functions of the observation. Manual and scripted pilots
/// may keep state between ticks, hence `&mut self`.
pub trait Pilot {
    fn decide(&mut self, observation: &Observation) -> Action;
}

/// A pilot that never ascends. Useful as a baseline in headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPilot;

impl Pilot for NullPilot {
    fn decide(&mut self, _observation: &Observation) -> Action {
        Action::NoOp
    }
}

/// A pilot driven by keyboard input.
///
/// Each [`ManualPilot::request_ascend`] produces exactly one ascend on the next tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualPilot {
    ascend_requested: bool,
}

impl ManualPilot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_ascend(&mut self) {
        self.ascend_requested = true;
    }
}

impl Pilot for ManualPilot {
    fn decide(&mut self, _observation: &Observation) -> Action {
        if std::mem::take(&mut self.ascend_requested) {
            Action::Ascend
        } else {
            Action::NoOp
        }
    }
}
