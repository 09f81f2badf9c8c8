use flapnet_engine::{Action, OBSERVATION_LEN, Observation, Pilot};
use serde::{Deserialize, Serialize};

/// Width of the hidden layer.
pub const HIDDEN_LEN: usize = 5;
/// Number of output logits, one per [`Action`].
pub const OUTPUT_LEN: usize = 2;

/// Feed-forward network with one ReLU hidden layer.
///
/// ```text
/// logits = W2 · relu(W1 · x + b1) + b2
///
/// x:  [f32; 3]   observation
/// W1: [[f32; 3]; 5], b1: [f32; 5]
/// W2: [[f32; 5]; 2], b2: [f32; 2]
/// ```
///
/// The shapes are fixed at compile time; only the values change from one generation to the
/// next. Controllers are values: mutation returns a new controller and never touches the
/// parent.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Controller {
    pub(crate) w1: [[f32; OBSERVATION_LEN]; HIDDEN_LEN],
    pub(crate) b1: [f32; HIDDEN_LEN],
    pub(crate) w2: [[f32; HIDDEN_LEN]; OUTPUT_LEN],
    pub(crate) b2: [f32; OUTPUT_LEN],
}

impl Controller {
    /// Creates a controller whose parameters are all zero.
    ///
    /// A zero controller outputs equal logits for every input and therefore always picks
    /// [`Action::NoOp`].
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_parameters(
        w1: [[f32; OBSERVATION_LEN]; HIDDEN_LEN],
        b1: [f32; HIDDEN_LEN],
        w2: [[f32; HIDDEN_LEN]; OUTPUT_LEN],
        b2: [f32; OUTPUT_LEN],
    ) -> Self {
        Self { w1, b1, w2, b2 }
    }

    /// Iterates over every parameter in `w1, w2, b1, b2` order.
    pub fn parameters(&self) -> impl Iterator<Item = f32> + '_ {
        self.w1
            .iter()
            .flatten()
            .chain(self.w2.iter().flatten())
            .chain(&self.b1)
            .chain(&self.b2)
            .copied()
    }

    /// Mutable counterpart of [`Controller::parameters`], in the same order.
    pub(crate) fn parameters_mut(&mut self) -> impl Iterator<Item = &mut f32> + '_ {
        self.w1
            .iter_mut()
            .flatten()
            .chain(self.w2.iter_mut().flatten())
            .chain(&mut self.b1)
            .chain(&mut self.b2)
    }

    /// Computes the action logits for `input`.
    #[must_use]
    pub fn forward(&self, input: [f32; OBSERVATION_LEN]) -> [f32; OUTPUT_LEN] {
        let hidden = affine(&self.w1, &self.b1, &input).map(relu);
        affine(&self.w2, &self.b2, &hidden)
    }

    #[must_use]
    pub fn decide(&self, observation: &Observation) -> Action {
        Action::argmax(self.forward(observation.to_array()))
    }
}

impl Pilot for Controller {
    fn decide(&mut self, observation: &Observation) -> Action {
        Controller::decide(self, observation)
    }
}

fn affine<const I: usize, const O: usize>(
    weights: &[[f32; I]; O],
    bias: &[f32; O],
    input: &[f32; I],
) -> [f32; O] {
    std::array::from_fn(|o| {
        weights[o]
            .iter()
            .zip(input)
            .fold(bias[o], |acc, (w, x)| acc + w * x)
    })
}

fn relu(x: f32) -> f32 {
    x.max(0.0)
}
