//! Wagers and their per-roll resolution.
//!
//! Every bet follows the same lifecycle: it is created by a strategy, updated
//! once per roll against the roll and the pre-roll game snapshot, and removed
//! from the player once it is won or lost. A resolved bet never changes again.

use crate::Game;
use craps_types::{
    craps::{BetStatus, DiceRoll, Odds, BUY_COMMISSION_BPS, BUY_COMMISSION_DENOM, POINTS},
    Decimal,
};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("bet amount must be positive (got {0})")]
    InvalidAmount(Decimal),
    #[error("{0} is not a point number")]
    InvalidNumber(u8),
}

/// Supported bet types, with any state the type tracks between rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BetKind {
    /// Come-out: 7/11 win, 2/3/12 lose, else the roll becomes this bet's point.
    /// The point is tracked on the bet (0 = not set), not read from the table,
    /// so the same logic can back come bets.
    PassLine { point: u8 },
    /// Number hits before a 7. Off during the come-out.
    Place { number: u8 },
    /// Place-style bet paid at true odds, with commission up front.
    Buy { number: u8 },
}

impl BetKind {
    /// Payout ratio for this bet type.
    pub fn odds(&self) -> Odds {
        match *self {
            BetKind::PassLine { .. } => Odds::EVEN,
            BetKind::Place { number } => match number {
                4 | 10 => Odds::PLACE_4_10,
                5 | 9 => Odds::PLACE_5_9,
                _ => Odds::PLACE_6_8,
            },
            BetKind::Buy { number } => match number {
                4 | 10 => Odds::TRUE_4_10,
                5 | 9 => Odds::TRUE_5_9,
                _ => Odds::TRUE_6_8,
            },
        }
    }

    /// Whether two kinds are the same bet on the table, ignoring tracked state.
    pub fn same_spot(&self, other: &BetKind) -> bool {
        match (self, other) {
            (BetKind::PassLine { .. }, BetKind::PassLine { .. }) => true,
            (BetKind::Place { number: a }, BetKind::Place { number: b }) => a == b,
            (BetKind::Buy { number: a }, BetKind::Buy { number: b }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetKind::PassLine { point: 0 } => write!(f, "pass line"),
            BetKind::PassLine { point } => write!(f, "pass line (point {point})"),
            BetKind::Place { number } => write!(f, "place {number}"),
            BetKind::Buy { number } => write!(f, "buy {number}"),
        }
    }
}

/// Total return (stake + winnings) of a winning `amount` at `odds`.
///
/// e.g. 10 at 3:2 returns 15 (winnings) + 10 (stake) = 25.
pub fn payout(amount: Decimal, odds: Odds) -> Decimal {
    amount + odds.winnings(amount)
}

/// Commission charged when buying a number: 5% of the bet, rounded up to the
/// cent.
pub fn buy_commission(amount: Decimal) -> Decimal {
    amount.mul_ratio_ceil(BUY_COMMISSION_BPS, BUY_COMMISSION_DENOM, Decimal::CENT)
}

/// An individual wager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bet {
    kind: BetKind,
    amount: Decimal,
    odds: Odds,
    commission: Decimal,
    status: BetStatus,
}

impl Bet {
    fn new(kind: BetKind, amount: Decimal) -> Result<Self, BetError> {
        if !amount.is_positive() {
            return Err(BetError::InvalidAmount(amount));
        }
        let commission = match kind {
            BetKind::Buy { .. } => buy_commission(amount),
            BetKind::PassLine { .. } | BetKind::Place { .. } => Decimal::ZERO,
        };
        Ok(Self {
            kind,
            amount,
            odds: kind.odds(),
            commission,
            status: BetStatus::Unresolved,
        })
    }

    pub fn pass_line(amount: Decimal) -> Result<Self, BetError> {
        Self::new(BetKind::PassLine { point: 0 }, amount)
    }

    pub fn place(number: u8, amount: Decimal) -> Result<Self, BetError> {
        if !POINTS.contains(&number) {
            return Err(BetError::InvalidNumber(number));
        }
        Self::new(BetKind::Place { number }, amount)
    }

    pub fn buy(number: u8, amount: Decimal) -> Result<Self, BetError> {
        if !POINTS.contains(&number) {
            return Err(BetError::InvalidNumber(number));
        }
        Self::new(BetKind::Buy { number }, amount)
    }

    pub fn kind(&self) -> BetKind {
        self.kind
    }

    pub fn status(&self) -> BetStatus {
        self.status
    }

    /// Amount wagered.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn odds(&self) -> Odds {
        self.odds
    }

    /// Commission paid at placement (not part of the wager).
    pub fn commission(&self) -> Decimal {
        self.commission
    }

    /// Amount returned to the player if the bet wins, including the stake.
    pub fn return_amount(&self) -> Decimal {
        payout(self.amount, self.odds)
    }

    /// Cost of putting this bet on the table.
    pub fn cost(&self) -> Decimal {
        self.amount + self.commission
    }

    /// Process `roll` against the bet. `game` is the table as it stood before
    /// the roll. Resolved bets are left untouched.
    pub fn update(&mut self, roll: DiceRoll, game: &Game<'_>) {
        if self.status.is_resolved() {
            return;
        }

        let total = roll.value();
        match &mut self.kind {
            BetKind::PassLine { point } => {
                if *point == 0 {
                    if roll.is_natural() {
                        self.status = BetStatus::Won;
                    } else if roll.is_craps() {
                        self.status = BetStatus::Lost;
                    } else {
                        *point = total;
                    }
                } else if total == *point {
                    self.status = BetStatus::Won;
                } else if roll.is_seven() {
                    self.status = BetStatus::Lost;
                }
            }
            BetKind::Place { number } | BetKind::Buy { number } => {
                // Off on the come-out
                if game.is_come_out() {
                    return;
                }
                if total == *number {
                    self.status = BetStatus::Won;
                } else if roll.is_seven() {
                    self.status = BetStatus::Lost;
                }
            }
        }
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {}", self.kind, self.amount, self.odds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::roll_of;
    use craps_types::craps::Phase;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn assert_close(actual: Decimal, expected: &str) {
        // Within half a cent
        let diff = (actual - dec(expected)).raw().abs();
        assert!(diff <= 50, "expected ~{expected}, got {actual:.4}");
    }

    #[test]
    fn test_payout_table() {
        let cases = [
            ("10", 3, 2, "25"),
            ("10", 2, 3, "16.67"),
            ("0", 3, 2, "0"),
            ("12", 5, 3, "32"),
            ("12.50", 5, 3, "33.33"),
            ("1", 0, 1, "1"),
            ("0", 2, 1, "0"),
        ];
        for (amount, win, loss, expected) in cases {
            let odds = Odds::new(win, loss).unwrap();
            assert_close(payout(dec(amount), odds), expected);
        }
    }

    #[test]
    fn test_payout_exact() {
        let odds = Odds::new(3, 2).unwrap();
        assert_eq!(payout(Decimal::from_int(10), odds), Decimal::from_int(25));
    }

    #[test]
    fn test_buy_commission_rounds_up() {
        assert_eq!(buy_commission(Decimal::from_int(20)), Decimal::from_int(1));
        assert_eq!(buy_commission(Decimal::from_int(25)), dec("1.25"));
        assert_eq!(buy_commission(dec("0.01")), dec("0.01"));
        assert_eq!(buy_commission(dec("10.10")), dec("0.51"));
    }

    #[test]
    fn test_bet_construction() {
        let bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
        assert_eq!(bet.kind(), BetKind::PassLine { point: 0 });
        assert_eq!(bet.status(), BetStatus::Unresolved);
        assert_eq!(bet.odds(), Odds::EVEN);
        assert_eq!(bet.return_amount(), Decimal::from_int(10));
        assert_eq!(bet.cost(), Decimal::from_int(5));

        assert_eq!(
            Bet::pass_line(Decimal::ZERO),
            Err(BetError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            Bet::place(7, Decimal::from_int(6)),
            Err(BetError::InvalidNumber(7))
        );
        assert_eq!(
            Bet::buy(11, Decimal::from_int(20)),
            Err(BetError::InvalidNumber(11))
        );
    }

    #[test]
    fn test_bet_odds_by_number() {
        let six = Decimal::from_int(6);
        assert_eq!(Bet::place(6, six).unwrap().return_amount(), Decimal::from_int(13));
        assert_eq!(Bet::place(8, six).unwrap().odds(), Odds::PLACE_6_8);
        assert_eq!(Bet::place(5, six).unwrap().odds(), Odds::PLACE_5_9);
        assert_eq!(Bet::place(10, six).unwrap().odds(), Odds::PLACE_4_10);

        let buy = Bet::buy(4, Decimal::from_int(20)).unwrap();
        assert_eq!(buy.odds(), Odds::TRUE_4_10);
        assert_eq!(buy.return_amount(), Decimal::from_int(60));
        assert_eq!(buy.commission(), Decimal::from_int(1));
        assert_eq!(buy.cost(), Decimal::from_int(21));
        assert_eq!(Bet::buy(9, Decimal::from_int(20)).unwrap().odds(), Odds::TRUE_5_9);
        assert_eq!(Bet::buy(8, Decimal::from_int(20)).unwrap().odds(), Odds::TRUE_6_8);
    }

    #[test]
    fn test_pass_line_come_out() {
        let game = Game::new();
        for (total, expected) in [
            (7, BetStatus::Won),
            (11, BetStatus::Won),
            (2, BetStatus::Lost),
            (3, BetStatus::Lost),
            (12, BetStatus::Lost),
        ] {
            let mut bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
            bet.update(roll_of(total), &game);
            assert_eq!(bet.status(), expected, "come-out {total}");
            assert_eq!(bet.kind(), BetKind::PassLine { point: 0 });
        }

        for point in POINTS {
            let mut bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
            bet.update(roll_of(point), &game);
            assert_eq!(bet.status(), BetStatus::Unresolved);
            assert_eq!(bet.kind(), BetKind::PassLine { point });
        }
    }

    #[test]
    fn test_pass_line_with_point() {
        let game = Game::new();
        for point in POINTS {
            // Hit the point
            let mut bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
            bet.update(roll_of(point), &game);
            for other in [2, 3, 11, 12] {
                bet.update(roll_of(other), &game);
                assert_eq!(bet.status(), BetStatus::Unresolved);
            }
            bet.update(roll_of(point), &game);
            assert_eq!(bet.status(), BetStatus::Won);

            // Seven out
            let mut bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
            bet.update(roll_of(point), &game);
            bet.update(roll_of(7), &game);
            assert_eq!(bet.status(), BetStatus::Lost);
        }
    }

    #[test]
    fn test_resolved_bet_never_changes() {
        let game = Game::new();
        let mut bet = Bet::pass_line(Decimal::from_int(5)).unwrap();
        bet.update(roll_of(7), &game);
        assert_eq!(bet.status(), BetStatus::Won);
        bet.update(roll_of(2), &game);
        assert_eq!(bet.status(), BetStatus::Won);
        bet.update(roll_of(6), &game);
        assert_eq!(bet.kind(), BetKind::PassLine { point: 0 });
    }

    #[test]
    fn test_place_bet_off_on_come_out() {
        let come_out = Game::new();
        let mut bet = Bet::place(6, Decimal::from_int(6)).unwrap();
        bet.update(roll_of(6), &come_out);
        assert_eq!(bet.status(), BetStatus::Unresolved);
        bet.update(roll_of(7), &come_out);
        assert_eq!(bet.status(), BetStatus::Unresolved);

        let on_point = Game::with_phase(Phase::Point(5));
        bet.update(roll_of(8), &on_point);
        assert_eq!(bet.status(), BetStatus::Unresolved);
        bet.update(roll_of(6), &on_point);
        assert_eq!(bet.status(), BetStatus::Won);

        let mut bet = Bet::buy(10, Decimal::from_int(20)).unwrap();
        bet.update(roll_of(7), &on_point);
        assert_eq!(bet.status(), BetStatus::Lost);
    }

    #[test]
    fn test_display() {
        let bet = Bet::place(8, Decimal::from_int(6)).unwrap();
        assert_eq!(bet.to_string(), "place 8 6.00 @ 7:6");
        assert_eq!(
            BetKind::PassLine { point: 4 }.to_string(),
            "pass line (point 4)"
        );
    }

    #[test]
    fn test_same_spot() {
        assert!(BetKind::PassLine { point: 0 }.same_spot(&BetKind::PassLine { point: 6 }));
        assert!(BetKind::Place { number: 6 }.same_spot(&BetKind::Place { number: 6 }));
        assert!(!BetKind::Place { number: 6 }.same_spot(&BetKind::Place { number: 8 }));
        assert!(!BetKind::Place { number: 6 }.same_spot(&BetKind::Buy { number: 6 }));
    }
}
