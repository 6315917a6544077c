use crate::{Bet, GameStats, PhaseEvent, Settlement};
use craps_types::{
    craps::{DiceRoll, Phase},
    Decimal,
};
use tracing::debug;

/// Hooks invoked by [crate::Game] as a trial progresses.
///
/// All methods default to no-ops. Observers only watch: nothing they do
/// feeds back into the simulation.
pub trait Observer {
    fn on_shooter(&self, _shooter: u32) {}

    fn on_bets_placed(&self, _bets: &[Bet], _bankroll: Decimal) {}

    fn on_roll(&self, _roll: DiceRoll, _phase: Phase) {}

    fn on_settlement(&self, _settlement: &Settlement, _bankroll: Decimal) {}

    fn on_transition(&self, _event: PhaseEvent, _stats: &GameStats) {}
}

/// Observer that ignores every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Observer that emits each event at `DEBUG` level, inside whatever span the
/// caller has entered.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_shooter(&self, shooter: u32) {
        debug!(shooter, "new shooter");
    }

    fn on_bets_placed(&self, bets: &[Bet], bankroll: Decimal) {
        for bet in bets {
            debug!(%bet, %bankroll, "bet placed");
        }
    }

    fn on_roll(&self, roll: DiceRoll, phase: Phase) {
        debug!(%roll, %phase, "rolled");
    }

    fn on_settlement(&self, settlement: &Settlement, bankroll: Decimal) {
        if settlement.is_empty() {
            return;
        }
        debug!(
            won = settlement.won,
            lost = settlement.lost,
            returned = %settlement.returned,
            forfeited = %settlement.forfeited,
            %bankroll,
            "bets settled"
        );
    }

    fn on_transition(&self, event: PhaseEvent, stats: &GameStats) {
        match event {
            PhaseEvent::None => {}
            PhaseEvent::SevenOut(point) => {
                debug!(point, rolls = stats.rolls, "seven out");
            }
            event => {
                debug!(?event, rolls = stats.rolls, "phase event");
            }
        }
    }
}
