use craps_types::craps::{DiceRoll, DIE_FACES};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of dice rolls for a game.
pub trait Roller {
    fn roll(&mut self) -> DiceRoll;
}

impl<R: Roller + ?Sized> Roller for &mut R {
    fn roll(&mut self) -> DiceRoll {
        (**self).roll()
    }
}

impl<R: Roller + ?Sized> Roller for Box<R> {
    fn roll(&mut self) -> DiceRoll {
        (**self).roll()
    }
}

/// Deterministic dice roller.
///
/// Each instance owns its own ChaCha stream, so trials seeded independently
/// never share generator state. The same seed always yields the same sequence
/// of rolls.
#[derive(Clone, Debug)]
pub struct DiceRoller {
    rng: ChaCha8Rng,
}

impl DiceRoller {
    /// Create a roller from a signed seed (reinterpreted as `u64`).
    pub fn new(seed: i64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed as u64),
        }
    }

    /// Roll a single die (1-6).
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

impl Roller for DiceRoller {
    fn roll(&mut self) -> DiceRoll {
        let d1 = self.roll_die();
        let d2 = self.roll_die();
        DiceRoll::clamped(d1, d2)
    }
}
