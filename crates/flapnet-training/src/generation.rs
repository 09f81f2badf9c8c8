use std::iter::FusedIterator;

use flapnet_controller::Controller;
use rand::Rng;

/// The controllers of one cohort, produced by chained mutation.
///
/// The first item is the unmutated champion. Every later item is a [`Controller::tweak`] of
/// the item before it, so the cohort walks away from the champion one step at a time.
/// Mutations are drawn lazily from the generator as items are pulled; the iterator yields
/// exactly `mutants + 1` controllers (saturating at `usize::MAX`) and cannot be restarted.
///
/// Created by [`Population::generate`](crate::Population::generate).
#[derive(Debug)]
pub struct Generation<'r, R>
where
    R: ?Sized,
{
    previous: Controller,
    started: bool,
    remaining: usize,
    learning_rate: f32,
    rng: &'r mut R,
}

impl<'r, R> Generation<'r, R>
where
    R: Rng + ?Sized,
{
    pub(crate) fn new(
        champion: Controller,
        mutants: usize,
        learning_rate: f32,
        rng: &'r mut R,
    ) -> Self {
        Self {
            previous: champion,
            started: false,
            remaining: mutants.saturating_add(1),
            learning_rate,
            rng,
        }
    }

    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }
}

impl<R> Iterator for Generation<'_, R>
where
    R: Rng + ?Sized,
{
    type Item = Controller;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.started {
            self.previous = self.previous.tweak(self.learning_rate, &mut *self.rng);
        } else {
            self.started = true;
        }
        Some(self.previous.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<R> ExactSizeIterator for Generation<'_, R> where R: Rng + ?Sized {}

impl<R> FusedIterator for Generation<'_, R> where R: Rng + ?Sized {}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_yields_champion_then_mutants() {
        let mut rng = Pcg32::seed_from_u64(11);
        let champion = Controller::zeroed().tweak(1.0, &mut rng);
        let cohort: Vec<_> = Generation::new(champion.clone(), 20, 0.1, &mut rng).collect();
        assert_eq!(cohort.len(), 21);
        assert_eq!(cohort[0], champion);
        assert!(cohort[1..].iter().all(|c| *c != champion));
    }

    #[test]
    fn test_mutations_are_chained() {
        let champion = Controller::zeroed();
        let cohort: Vec<_> =
            Generation::new(champion.clone(), 3, 0.05, &mut Pcg32::seed_from_u64(4)).collect();

        // replaying the same stream by hand gives the same chain
        let mut rng = Pcg32::seed_from_u64(4);
        let first = champion.tweak(0.05, &mut rng);
        let second = first.tweak(0.05, &mut rng);
        let third = second.tweak(0.05, &mut rng);
        assert_eq!(cohort, [champion, first, second, third]);

        // each step stays within one learning rate of its predecessor
        for pair in cohort.windows(2) {
            for (b, a) in pair[1].parameters().zip(pair[0].parameters()) {
                assert!((b - a).abs() <= 0.05);
            }
        }
    }

    #[test]
    fn test_exact_size_and_fused() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut generation = Generation::new(Controller::zeroed(), 2, 0.1, &mut rng);
        assert_eq!(generation.len(), 3);
        generation.next();
        assert_eq!(generation.len(), 2);
        generation.next();
        generation.next();
        assert_eq!(generation.len(), 0);
        assert!(generation.next().is_none());
        assert!(generation.next().is_none());
    }

    #[test]
    fn test_huge_cohort_saturates() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut generation = Generation::new(Controller::zeroed(), usize::MAX, 0.1, &mut rng);
        assert_eq!(generation.len(), usize::MAX);
        assert_eq!(generation.next(), Some(Controller::zeroed()));
        assert_eq!(generation.len(), usize::MAX - 1);
    }

    #[test]
    fn test_zero_mutants_yields_only_champion() {
        let mut rng = Pcg32::seed_from_u64(0);
        let cohort: Vec<_> = Generation::new(Controller::zeroed(), 0, 0.1, &mut rng).collect();
        assert_eq!(cohort, [Controller::zeroed()]);
    }
}
