//! Craps table engine: dice, bets, the come-out/point state machine, player
//! settlement and betting strategies.

use craps_types::Decimal;
use thiserror::Error;

mod bet;
mod game;
mod observer;
mod player;
mod roller;
pub mod strategy;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
mod integration_tests;

pub use bet::{buy_commission, payout, Bet, BetError, BetKind};
pub use game::{Game, GameStats, PhaseEvent};
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use player::{Player, PlayerStats, Settlement};
pub use roller::{DiceRoller, Roller};
pub use strategy::{resolve, BuyFourTen, PassLine, PlaceSixEight, Strategy, STRATEGIES};

/// Errors that stop a game run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },
    #[error("roll budget must be > 0 (got {0})")]
    InvalidRollBudget(u64),
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error(transparent)]
    Bet(#[from] BetError),
}
