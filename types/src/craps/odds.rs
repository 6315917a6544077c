use crate::Decimal;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OddsError {
    /// A payout ratio with a zero loss denominator.
    #[error("invalid odds {win}:{loss}: loss must be positive")]
    InvalidOdds { win: u32, loss: u32 },
}

/// Payout ratio for a bet, independent of the amount wagered.
///
/// `win:loss` pays `win` for every `loss` staked, e.g. 3:2 pays 15 on a 10
/// wager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Odds {
    win: u32,
    loss: u32,
}

impl Odds {
    /// 1:1 (pass line)
    pub const EVEN: Odds = Odds { win: 1, loss: 1 };
    /// 9:5 (place 4 or 10)
    pub const PLACE_4_10: Odds = Odds { win: 9, loss: 5 };
    /// 7:5 (place 5 or 9)
    pub const PLACE_5_9: Odds = Odds { win: 7, loss: 5 };
    /// 7:6 (place 6 or 8)
    pub const PLACE_6_8: Odds = Odds { win: 7, loss: 6 };
    /// 2:1 true odds on 4 or 10
    pub const TRUE_4_10: Odds = Odds { win: 2, loss: 1 };
    /// 3:2 true odds on 5 or 9
    pub const TRUE_5_9: Odds = Odds { win: 3, loss: 2 };
    /// 6:5 true odds on 6 or 8
    pub const TRUE_6_8: Odds = Odds { win: 6, loss: 5 };

    pub fn new(win: u32, loss: u32) -> Result<Self, OddsError> {
        if loss == 0 {
            return Err(OddsError::InvalidOdds { win, loss });
        }
        Ok(Self { win, loss })
    }

    pub fn win(&self) -> u32 {
        self.win
    }

    pub fn loss(&self) -> u32 {
        self.loss
    }

    /// Winnings (excluding the stake) paid on `amount`.
    pub fn winnings(&self, amount: Decimal) -> Decimal {
        amount.mul_ratio(self.win, self.loss)
    }
}

impl fmt::Display for Odds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.win, self.loss)
    }
}
