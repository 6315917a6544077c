use super::{CRAPS, DIE_FACES, NATURALS, SEVEN};
use std::fmt;

/// A roll of two six-sided dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceRoll {
    d1: u8,
    d2: u8,
}

impl DiceRoll {
    /// Build a roll from two die faces. Returns `None` if either face is
    /// outside 1..=6.
    pub fn new(d1: u8, d2: u8) -> Option<Self> {
        let face = 1..=DIE_FACES;
        if !face.contains(&d1) || !face.contains(&d2) {
            return None;
        }
        Some(Self { d1, d2 })
    }

    /// Build a roll, clamping each face into 1..=6.
    pub fn clamped(d1: u8, d2: u8) -> Self {
        Self {
            d1: d1.clamp(1, DIE_FACES),
            d2: d2.clamp(1, DIE_FACES),
        }
    }

    pub fn dice(&self) -> (u8, u8) {
        (self.d1, self.d2)
    }

    /// Sum of both dice (2-12).
    pub fn value(&self) -> u8 {
        self.d1 + self.d2
    }

    /// Both dice show the same face.
    pub fn is_hard(&self) -> bool {
        self.d1 == self.d2
    }

    pub fn is_natural(&self) -> bool {
        NATURALS.contains(&self.value())
    }

    pub fn is_craps(&self) -> bool {
        CRAPS.contains(&self.value())
    }

    pub fn is_seven(&self) -> bool {
        self.value() == SEVEN
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hard = if self.is_hard() { " (hard)" } else { "" };
        write!(f, "{} [{}+{}]{}", self.value(), self.d1, self.d2, hard)
    }
}
