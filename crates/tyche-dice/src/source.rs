//! Sources of die faces.
//!
//! Engines never touch a random number generator directly; they draw
//! through [`DieSource`] so tests can script exact faces.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Produces one die face at a time.
pub trait DieSource {
    /// Roll a single die, returning a face in `1..=sides`.
    ///
    /// `sides` is always at least 1.
    fn roll_die(&mut self, sides: u32) -> u32;

    /// Roll `count` dice with the same number of sides.
    fn roll_dice(&mut self, count: usize, sides: u32) -> Vec<u32> {
        (0..count).map(|_| self.roll_die(sides)).collect()
    }
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn roll_die(&mut self, sides: u32) -> u32 {
        (**self).roll_die(sides)
    }
}

/// Uniform die faces drawn from any [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// A reproducible source seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> DieSource for RngSource<R> {
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.0.random_range(1..=sides)
    }
}

/// Replays a fixed sequence of faces.
///
/// Faces are returned verbatim, regardless of the requested sides. Once the
/// script runs out every further draw yields the fallback face, which is 1
/// unless set with [`ScriptedDice::then_always`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedDice {
    /// Script the given faces in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: faces.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Set the face returned after the script is exhausted.
    pub fn then_always(mut self, face: u32) -> Self {
        self.fallback = face;
        self
    }

    /// Number of scripted faces not yet drawn.
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for ScriptedDice {
    fn roll_die(&mut self, _sides: u32) -> u32 {
        self.faces.pop_front().unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_source_stays_in_range() {
        let mut source = RngSource::seeded(42);
        for sides in [1, 2, 6, 10, 20, 100] {
            for _ in 0..200 {
                let face = source.roll_die(sides);
                assert!((1..=sides).contains(&face), "d{sides} rolled {face}");
            }
        }
    }

    #[test]
    fn rng_source_deterministic_with_seed() {
        let mut a = RngSource::seeded(99);
        let mut b = RngSource::seeded(99);
        assert_eq!(a.roll_dice(20, 20), b.roll_dice(20, 20));
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut dice = ScriptedDice::new([3, 5, 6]);
        assert_eq!(dice.roll_dice(3, 6), vec![3, 5, 6]);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn scripted_falls_back_when_exhausted() {
        let mut dice = ScriptedDice::new([4]);
        assert_eq!(dice.roll_dice(3, 6), vec![4, 1, 1]);

        let mut dice = ScriptedDice::new([]).then_always(10);
        assert_eq!(dice.roll_die(10), 10);
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn draw(mut source: impl DieSource) -> u32 {
            source.roll_die(6)
        }
        let mut dice = ScriptedDice::new([2, 5]);
        assert_eq!(draw(&mut dice), 2);
        assert_eq!(draw(&mut dice), 5);
    }
}
