//! Come-out/point state machine.
//!
//! Each roll is orchestrated in a fixed order:
//! 1. the strategy places or adjusts bets against the current table,
//! 2. the dice are rolled,
//! 3. the player's bets are settled against the roll and the *pre-roll* table,
//! 4. the table advances its own phase.
//!
//! Settlement always sees the point that was in effect when the dice were
//! thrown, before any reset back to the come-out.

use crate::{Error, NoopObserver, Observer, Player, Roller, Strategy};
use craps_types::craps::{DiceRoll, Phase};

/// Counters for a single game.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameStats {
    /// Dice thrown.
    pub rolls: u64,
    /// Come-out rolls thrown.
    pub rounds: u64,
    /// Shooters that have taken the dice.
    pub shooters: u32,
    /// Come-out naturals plus points made.
    pub passes: u64,
    /// Come-out 2, 3 or 12.
    pub craps: u64,
    pub seven_outs: u64,
}

/// Table-level outcome of a roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseEvent {
    /// No phase change.
    None,
    /// Come-out 7 or 11.
    Natural(u8),
    /// Come-out 2, 3 or 12.
    Craps(u8),
    PointEstablished(u8),
    PointMade(u8),
    /// A 7 while a point was set; the shooter's turn ends.
    SevenOut(u8),
}

/// State of a single simulated table.
pub struct Game<'a> {
    phase: Phase,
    stats: GameStats,
    new_shooter: bool,
    observer: &'a dyn Observer,
}

impl Game<'static> {
    pub fn new() -> Self {
        Self::with_observer(&NoopObserver)
    }

    /// A table already in `phase`, with zeroed counters.
    pub fn with_phase(phase: Phase) -> Self {
        let mut game = Self::new();
        game.phase = phase;
        game
    }
}

impl Default for Game<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Game<'a> {
    pub fn with_observer(observer: &'a dyn Observer) -> Self {
        Self {
            phase: Phase::ComeOut,
            stats: GameStats::default(),
            new_shooter: true,
            observer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The established point, or 0 during the come-out.
    pub fn point(&self) -> u8 {
        self.phase.point()
    }

    pub fn is_come_out(&self) -> bool {
        self.phase.is_come_out()
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Run the game until at least `max_rolls` dice have been thrown.
    ///
    /// The budget is only checked when the table is on a come-out, so a trial
    /// that reaches the budget mid-point keeps rolling until the point is made
    /// or the shooter sevens out. Returns the number of rolls thrown.
    pub fn run(
        &mut self,
        roller: &mut impl Roller,
        player: &mut Player,
        strategy: &dyn Strategy,
        max_rolls: u64,
    ) -> Result<u64, Error> {
        if max_rolls == 0 {
            return Err(Error::InvalidRollBudget(max_rolls));
        }
        loop {
            if self.is_come_out() && self.stats.rolls >= max_rolls {
                break;
            }
            self.step(roller, player, strategy)?;
        }
        Ok(self.stats.rolls)
    }

    /// Play a single roll: place bets, roll, settle, then advance the phase.
    pub fn step(
        &mut self,
        roller: &mut impl Roller,
        player: &mut Player,
        strategy: &dyn Strategy,
    ) -> Result<DiceRoll, Error> {
        if self.new_shooter {
            self.new_shooter = false;
            self.stats.shooters += 1;
            self.observer.on_shooter(self.stats.shooters);
        }

        let existing = player.bets().len();
        strategy.place_bets(player, self)?;
        if let Some(placed) = player.bets().get(existing..) {
            if !placed.is_empty() {
                self.observer.on_bets_placed(placed, player.bankroll());
            }
        }

        let roll = roller.roll();
        self.stats.rolls += 1;
        self.observer.on_roll(roll, self.phase);

        let settlement = player.settle(roll, self);
        self.observer.on_settlement(&settlement, player.bankroll());

        self.advance(roll);
        Ok(roll)
    }

    /// Apply the table's own transition for `roll`.
    pub fn advance(&mut self, roll: DiceRoll) -> PhaseEvent {
        let total = roll.value();
        let event = match self.phase {
            Phase::ComeOut => {
                self.stats.rounds += 1;
                if roll.is_natural() {
                    self.stats.passes += 1;
                    PhaseEvent::Natural(total)
                } else if roll.is_craps() {
                    self.stats.craps += 1;
                    PhaseEvent::Craps(total)
                } else {
                    self.phase = Phase::Point(total);
                    PhaseEvent::PointEstablished(total)
                }
            }
            Phase::Point(point) => {
                if total == point {
                    self.stats.passes += 1;
                    self.phase = Phase::ComeOut;
                    PhaseEvent::PointMade(point)
                } else if roll.is_seven() {
                    self.stats.seven_outs += 1;
                    self.phase = Phase::ComeOut;
                    self.new_shooter = true;
                    PhaseEvent::SevenOut(point)
                } else {
                    PhaseEvent::None
                }
            }
        };
        self.observer.on_transition(event, &self.stats);
        event
    }
}
