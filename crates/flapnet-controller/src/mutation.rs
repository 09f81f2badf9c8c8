use rand::Rng;

use crate::Controller;

impl Controller {
    /// Returns a copy of this controller with every parameter perturbed by uniform noise.
    ///
    /// Each parameter `p` becomes `p + learning_rate * (2u - 1)` where `u` is drawn
    /// independently from `[0, 1)`, so the perturbation lies in
    /// `[-learning_rate, +learning_rate)`. Noise is drawn in `w1, w2, b1, b2` order, making
    /// the result reproducible for a fixed generator state.
    ///
    /// `self` is left untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use flapnet_controller::Controller;
    /// use rand::SeedableRng as _;
    ///
    /// let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
    /// let parent = Controller::zeroed();
    /// let child = parent.tweak(0.1, &mut rng);
    ///
    /// assert!(child.parameters().all(|p| (-0.1..=0.1).contains(&p)));
    /// assert_eq!(parent, Controller::zeroed());
    /// ```
    #[must_use]
    pub fn tweak<R>(&self, learning_rate: f32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut child = self.clone();
        for p in child.parameters_mut() {
            let u: f32 = rng.random();
            *p += learning_rate * (2.0 * u - 1.0);
        }
        child
    }
}
