use crate::{Bet, BetKind, Game};
use craps_types::{
    craps::{BetStatus, DiceRoll},
    Decimal,
};

/// Win/loss and bankroll statistics for a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    /// Sum of bet amounts placed (commission excluded).
    pub total_wagered: Decimal,
    pub bet_count: u32,
    pub commission_paid: Decimal,
    pub bankroll_max: Decimal,
    pub bankroll_min: Decimal,
}

/// Outcome of settling a player's bets against one roll.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub won: u32,
    pub lost: u32,
    /// Credited to the bankroll (stake + winnings of every winning bet).
    pub returned: Decimal,
    /// Stakes of losing bets (already debited at placement).
    pub forfeited: Decimal,
}

impl Settlement {
    pub fn is_empty(&self) -> bool {
        self.won == 0 && self.lost == 0
    }
}

/// The person betting at the table.
///
/// The engine does not keep the bankroll non-negative: strategies are
/// responsible for checking funds before they bet.
#[derive(Clone, Debug)]
pub struct Player {
    id: u32,
    bankroll: Decimal,
    bets: Vec<Bet>,
    stats: PlayerStats,
}

impl Player {
    pub fn new(id: u32, bankroll: Decimal) -> Self {
        Self {
            id,
            bankroll,
            bets: Vec::new(),
            stats: PlayerStats {
                bankroll_max: bankroll,
                bankroll_min: bankroll,
                ..Default::default()
            },
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bankroll(&self) -> Decimal {
        self.bankroll
    }

    /// Active (unresolved) bets, in placement order.
    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Whether a bet on the same spot as `kind` is already working.
    pub fn has_bet(&self, kind: BetKind) -> bool {
        self.bets.iter().any(|bet| bet.kind().same_spot(&kind))
    }

    /// Put `bet` on the table, debiting its amount and any commission.
    /// Bankroll extremes are sampled on settlement only.
    pub fn place_bet(&mut self, bet: Bet) {
        self.bankroll -= bet.cost();
        self.stats.total_wagered += bet.amount();
        self.stats.commission_paid += bet.commission();
        self.stats.bet_count += 1;
        self.bets.push(bet);
    }

    /// Resolve every active bet against `roll`.
    ///
    /// Winners are paid their full return, losers are dropped (their stake was
    /// taken at placement), and unresolved bets stay in order for the next
    /// roll.
    pub fn settle(&mut self, roll: DiceRoll, game: &Game<'_>) -> Settlement {
        let mut settlement = Settlement::default();
        let bets = std::mem::take(&mut self.bets);
        for mut bet in bets {
            bet.update(roll, game);
            match bet.status() {
                BetStatus::Won => {
                    let returned = bet.return_amount();
                    self.bankroll += returned;
                    self.stats.wins += 1;
                    settlement.won += 1;
                    settlement.returned += returned;
                }
                BetStatus::Lost => {
                    self.stats.losses += 1;
                    settlement.lost += 1;
                    settlement.forfeited += bet.amount();
                }
                BetStatus::Unresolved => self.bets.push(bet),
            }
        }
        self.track_bankroll();
        settlement
    }

    fn track_bankroll(&mut self) {
        self.stats.bankroll_max = self.stats.bankroll_max.max(self.bankroll);
        self.stats.bankroll_min = self.stats.bankroll_min.min(self.bankroll);
    }
}
