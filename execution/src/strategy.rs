//! Betting strategies.
//!
//! A strategy is consulted before every roll, on the come-out and while a
//! point is working. It checks that the player can cover what it wants to put
//! down and then places bets through [Player::place_bet].

use crate::{Bet, Error, Game, Player};
use craps_types::Decimal;

/// Flat pass line wager.
pub const PASS_LINE_UNIT: Decimal = Decimal::from_int(5);

/// Place bet on each of the 6 and 8 (a multiple of 6 so 7:6 pays evenly).
pub const PLACE_UNIT: Decimal = Decimal::from_int(6);

/// Buy bet on each of the 4 and 10.
pub const BUY_UNIT: Decimal = Decimal::from_int(20);

/// Names accepted by [resolve].
pub const STRATEGIES: [&str; 3] = [PassLine::NAME, PlaceSixEight::NAME, BuyFourTen::NAME];

/// Betting policy, invoked once before every roll.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Place or adjust bets for the next roll.
    ///
    /// Returns [Error::InsufficientFunds] when the player cannot cover the
    /// wager the strategy requires; the game run stops there.
    fn place_bets(&self, player: &mut Player, game: &Game<'_>) -> Result<(), Error>;
}

/// Look up a strategy by name (surrounding whitespace is ignored).
pub fn resolve(name: &str) -> Result<Box<dyn Strategy>, Error> {
    match name.trim() {
        PassLine::NAME => Ok(Box::new(PassLine)),
        PlaceSixEight::NAME => Ok(Box::new(PlaceSixEight)),
        BuyFourTen::NAME => Ok(Box::new(BuyFourTen)),
        other => Err(Error::UnknownStrategy(other.to_string())),
    }
}

fn require(player: &Player, required: Decimal) -> Result<(), Error> {
    if player.bankroll() < required {
        return Err(Error::InsufficientFunds {
            required,
            available: player.bankroll(),
        });
    }
    Ok(())
}

/// Place every bet in `bets` that is not already working, provided the player
/// can cover all of them.
fn place_missing(player: &mut Player, bets: Vec<Bet>) -> Result<(), Error> {
    let missing: Vec<Bet> = bets
        .into_iter()
        .filter(|bet| !player.has_bet(bet.kind()))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    require(player, missing.iter().map(Bet::cost).sum())?;
    for bet in missing {
        player.place_bet(bet);
    }
    Ok(())
}

/// Bets the pass line on every come-out roll.
///
/// The player must hold at least one unit before every roll, even while the
/// point is working and no new bet is made.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassLine;

impl PassLine {
    pub const NAME: &'static str = "passline";
}

impl Strategy for PassLine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn place_bets(&self, player: &mut Player, game: &Game<'_>) -> Result<(), Error> {
        require(player, PASS_LINE_UNIT)?;
        if !game.is_come_out() {
            return Ok(());
        }
        player.place_bet(Bet::pass_line(PASS_LINE_UNIT)?);
        Ok(())
    }
}

/// Places the 6 and 8 once a point is established.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceSixEight;

impl PlaceSixEight {
    pub const NAME: &'static str = "place68";
}

impl Strategy for PlaceSixEight {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn place_bets(&self, player: &mut Player, game: &Game<'_>) -> Result<(), Error> {
        if game.is_come_out() {
            return Ok(());
        }
        place_missing(
            player,
            vec![Bet::place(6, PLACE_UNIT)?, Bet::place(8, PLACE_UNIT)?],
        )
    }
}

/// Buys the 4 and 10 once a point is established.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuyFourTen;

impl BuyFourTen {
    pub const NAME: &'static str = "buy410";
}

impl Strategy for BuyFourTen {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn place_bets(&self, player: &mut Player, game: &Game<'_>) -> Result<(), Error> {
        if game.is_come_out() {
            return Ok(());
        }
        place_missing(player, vec![Bet::buy(4, BUY_UNIT)?, Bet::buy(10, BUY_UNIT)?])
    }
}
