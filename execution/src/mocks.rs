//! Test helpers: fixed roll scripts in place of a seeded roller.

use crate::Roller;
use craps_types::craps::DiceRoll;

/// Canonical dice for a total: the lowest first die that can make it.
///
/// 2 and 12 are necessarily hard; every other total is rolled "easy" where
/// possible.
pub fn roll_of(total: u8) -> DiceRoll {
    assert!((2..=12).contains(&total), "no two dice total {total}");
    let d1 = total.saturating_sub(6).max(1);
    DiceRoll::new(d1, total - d1).expect("faces in range")
}

/// Replays a fixed sequence of rolls.
#[derive(Clone, Debug)]
pub struct ScriptedRoller {
    rolls: Vec<DiceRoll>,
    next: usize,
}

impl ScriptedRoller {
    pub fn new(rolls: Vec<DiceRoll>) -> Self {
        Self { rolls, next: 0 }
    }

    pub fn from_totals(totals: &[u8]) -> Self {
        Self::new(totals.iter().map(|total| roll_of(*total)).collect())
    }

    pub fn from_dice(dice: &[(u8, u8)]) -> Self {
        Self::new(
            dice.iter()
                .map(|(d1, d2)| DiceRoll::new(*d1, *d2).expect("faces in range"))
                .collect(),
        )
    }

    /// Number of rolls handed out so far.
    pub fn consumed(&self) -> usize {
        self.next
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len() - self.next
    }
}

impl Roller for ScriptedRoller {
    fn roll(&mut self) -> DiceRoll {
        let roll = *self
            .rolls
            .get(self.next)
            .unwrap_or_else(|| panic!("roll script exhausted after {} rolls", self.next));
        self.next += 1;
        roll
    }
}
