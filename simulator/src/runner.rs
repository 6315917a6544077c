use crate::{BustPolicy, ValidatedConfig};
use craps_execution::{DiceRoller, Error, Game, Player, Strategy, TracingObserver};
use craps_types::Decimal;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, debug_span, info, info_span};

/// Outcome of one strategy in one trial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrialResult {
    pub trial: u64,
    pub strategy: &'static str,
    pub rolls: u64,
    pub net_profit: Decimal,
    pub total_wagered: Decimal,
    /// The strategy ran out of funds before the roll budget was reached.
    pub busted: bool,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to build thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
    #[error("trial {trial} ({strategy}) failed: {source}")]
    Trial {
        trial: u64,
        strategy: &'static str,
        #[source]
        source: Error,
    },
}

/// Runs every (trial, strategy) pair on a dedicated rayon pool.
///
/// Each trial is one task. Within a trial, every strategy plays against its
/// own roller seeded with `seed + trial`, so all strategies in a trial see the
/// same dice. Results are laid out trial-major in configured strategy order.
pub struct TrialRunner {
    config: ValidatedConfig,
    pool: ThreadPool,
}

impl TrialRunner {
    pub fn new(config: ValidatedConfig) -> Result<Self, RunError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.worker_threads)
            .thread_name(|index| format!("trial-{index}"))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Run all trials.
    ///
    /// Every trial runs to completion; if any failed, the error of the lowest
    /// failing trial is returned.
    pub fn run(&self) -> Result<Vec<TrialResult>, RunError> {
        let width = self.config.strategies.len();
        let mut results = vec![TrialResult::default(); self.config.result_count()];
        info!(
            trials = self.config.trials,
            strategies = ?self.config.strategy_names(),
            threads = self.config.worker_threads,
            rolls = self.config.rolls,
            "running trials"
        );
        let start = Instant::now();

        let outcomes: Vec<Result<(), RunError>> = self.pool.install(|| {
            results
                .par_chunks_mut(width)
                .enumerate()
                .map(|(trial, row)| self.run_trial(trial as u64, row))
                .collect()
        });
        outcomes.into_iter().collect::<Result<(), _>>()?;

        info!(elapsed = ?start.elapsed(), rows = results.len(), "trials complete");
        Ok(results)
    }

    fn run_trial(&self, trial: u64, row: &mut [TrialResult]) -> Result<(), RunError> {
        let seed = self.config.seed.wrapping_add(trial as i64);
        let span = info_span!("trial", trial, seed);
        let _enter = span.enter();

        for (id, (slot, strategy)) in row.iter_mut().zip(&self.config.strategies).enumerate() {
            *slot = self.play(trial, id as u32, seed, strategy.as_ref())?;
        }
        Ok(())
    }

    fn play(
        &self,
        trial: u64,
        id: u32,
        seed: i64,
        strategy: &dyn Strategy,
    ) -> Result<TrialResult, RunError> {
        let span = debug_span!("strategy", name = strategy.name());
        let _enter = span.enter();

        let observer = TracingObserver;
        let mut game = Game::with_observer(&observer);
        let mut player = Player::new(id, self.config.bankroll);
        let mut roller = DiceRoller::new(seed);

        let busted = match game.run(&mut roller, &mut player, strategy, self.config.rolls) {
            Ok(_) => false,
            Err(Error::InsufficientFunds {
                required,
                available,
            }) if self.config.bust_policy == BustPolicy::Record => {
                debug!(%required, %available, rolls = game.stats().rolls, "busted");
                true
            }
            Err(source) => {
                return Err(RunError::Trial {
                    trial,
                    strategy: strategy.name(),
                    source,
                })
            }
        };

        let result = TrialResult {
            trial,
            strategy: strategy.name(),
            rolls: game.stats().rolls,
            net_profit: player.bankroll() - self.config.bankroll,
            total_wagered: player.stats().total_wagered,
            busted,
        };
        debug!(
            rolls = result.rolls,
            net_profit = %result.net_profit,
            shooters = game.stats().shooters,
            "trial finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use craps_execution::PassLine;

    fn config(trials: u64, strategies: &[&str], threads: usize) -> Config {
        Config {
            trials,
            strategies: strategies.iter().map(|s| s.to_string()).collect(),
            worker_threads: threads,
            bust_policy: BustPolicy::Record,
            ..Default::default()
        }
    }

    fn run(config: Config) -> Result<Vec<TrialResult>, RunError> {
        TrialRunner::new(config.validate().unwrap()).unwrap().run()
    }

    #[test]
    fn test_results_are_trial_major() {
        let results = run(config(4, &["passline", "place68", "buy410"], 3)).unwrap();
        assert_eq!(results.len(), 12);
        for (index, result) in results.iter().enumerate() {
            assert_eq!(result.trial, (index / 3) as u64);
            assert_eq!(result.strategy, ["passline", "place68", "buy410"][index % 3]);
            assert!(result.busted || result.rolls >= 240);
        }
    }

    #[test]
    fn test_deterministic_across_thread_counts() {
        let strategies = ["buy410", "passline"];
        let single = run(config(16, &strategies, 1)).unwrap();
        let many = run(config(16, &strategies, 4)).unwrap();
        assert_eq!(single, many);
        assert_eq!(single, run(config(16, &strategies, 1)).unwrap());
    }

    #[test]
    fn test_trial_uses_offset_seed() {
        let results = run(config(3, &["passline"], 2)).unwrap();

        let mut game = Game::new();
        let mut player = Player::new(0, Decimal::from_int(440));
        let mut roller = DiceRoller::new(9_671_111 + 2);
        let rolls = game.run(&mut roller, &mut player, &PassLine, 240).unwrap();

        assert_eq!(results[2].rolls, rolls);
        assert_eq!(
            results[2].net_profit,
            player.bankroll() - Decimal::from_int(440)
        );
        assert_eq!(results[2].total_wagered, player.stats().total_wagered);
    }

    #[test]
    fn test_bust_policy() {
        let short = |policy| Config {
            trials: 20,
            bankroll: Decimal::from_int(5),
            rolls: 1_000,
            bust_policy: policy,
            worker_threads: 4,
            ..Default::default()
        };

        let recorded = run(short(BustPolicy::Record)).unwrap();
        assert_eq!(recorded.len(), 20);
        let first = recorded
            .iter()
            .find(|r| r.busted)
            .expect("a five unit bankroll busts within 1000 rolls");
        assert!(first.net_profit.is_negative());

        match run(short(BustPolicy::Abort)) {
            Err(RunError::Trial {
                trial,
                strategy,
                source: Error::InsufficientFunds { .. },
            }) => {
                assert_eq!(trial, first.trial);
                assert_eq!(strategy, "passline");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_repeated_strategy_gets_a_row_per_listing() {
        let results = run(config(3, &["passline", "buy410", "passline"], 2)).unwrap();
        assert_eq!(results.len(), 9);
        for row in results.chunks(3) {
            assert_eq!(row[0].strategy, "passline");
            assert_eq!(row[2].strategy, "passline");
            // Same trial seed, same dice
            assert_eq!(row[0], row[2]);
        }
    }

    #[test]
    fn test_zero_bankroll_fails_in_trial() {
        let config = Config {
            bankroll: Decimal::ZERO,
            ..Default::default()
        };
        match run(config) {
            Err(RunError::Trial {
                trial: 0,
                strategy: "passline",
                source: Error::InsufficientFunds {
                    required,
                    available,
                },
            }) => {
                assert_eq!(required, Decimal::from_int(5));
                assert_eq!(available, Decimal::ZERO);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
