use craps_execution::{resolve, Strategy};
use craps_types::{
    craps::{DEFAULT_BANKROLL, DEFAULT_ROLLS, DEFAULT_SEED},
    Decimal,
};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    str::FromStr,
    thread,
};
use thiserror::Error;
use tracing::Level;

/// Upper bound on the size of the rayon pool.
pub const MAX_WORKER_THREADS: usize = 1_024;

/// What to do when a strategy can no longer cover its wager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BustPolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Keep the partial trial and flag it as busted.
    Record,
}

impl fmt::Display for BustPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BustPolicy::Abort => f.write_str("abort"),
            BustPolicy::Record => f.write_str("record"),
        }
    }
}

/// Configuration for a [crate::TrialRunner], as read from YAML or flags.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub trials: u64,
    pub bankroll: Decimal,
    /// Base seed; trial `t` is seeded with `seed + t`.
    pub seed: i64,
    pub strategies: Vec<String>,
    /// Roll budget per trial (checked only on come-out rolls).
    pub rolls: u64,
    /// CSV destination (stdout when unset).
    pub out: Option<PathBuf>,
    /// JSON summary destination (skipped when unset).
    pub summary: Option<PathBuf>,
    /// 0 uses the available parallelism.
    pub worker_threads: usize,
    pub bust_policy: BustPolicy,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 1,
            bankroll: Decimal::from_int(DEFAULT_BANKROLL),
            seed: DEFAULT_SEED,
            strategies: vec![craps_execution::PassLine::NAME.to_string()],
            rolls: DEFAULT_ROLLS,
            out: None,
            summary: None,
            worker_threads: 0,
            bust_policy: BustPolicy::Abort,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
    #[error("worker_threads must be <= {max} (got {value})")]
    InvalidWorkerThreads { value: usize, max: usize },
    #[error("at least one strategy is required")]
    NoStrategies,
    #[error(transparent)]
    Engine(#[from] craps_execution::Error),
    #[error("{trials} trials x {strategies} strategies does not fit in memory")]
    TooManyResults { trials: u64, strategies: usize },
    #[error("invalid log level: {value}")]
    InvalidLogLevel { value: String },
}

/// A [Config] that has been checked and resolved.
pub struct ValidatedConfig {
    pub trials: u64,
    pub bankroll: Decimal,
    pub seed: i64,
    pub strategies: Vec<Box<dyn Strategy>>,
    pub rolls: u64,
    pub out: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub worker_threads: usize,
    pub bust_policy: BustPolicy,
    pub log_level: Level,
}

impl ValidatedConfig {
    /// Strategy names, in configured (and output) order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of rows the run will produce.
    pub fn result_count(&self) -> usize {
        // Checked during validation
        self.trials as usize * self.strategies.len()
    }
}

impl fmt::Debug for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedConfig")
            .field("trials", &self.trials)
            .field("bankroll", &self.bankroll)
            .field("seed", &self.seed)
            .field("strategies", &self.strategy_names())
            .field("rolls", &self.rolls)
            .field("out", &self.out)
            .field("summary", &self.summary)
            .field("worker_threads", &self.worker_threads)
            .field("bust_policy", &self.bust_policy)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load a YAML config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "trials",
                value: self.trials,
            });
        }
        if self.rolls == 0 {
            return Err(craps_execution::Error::InvalidRollBudget(self.rolls).into());
        }
        if self.worker_threads > MAX_WORKER_THREADS {
            return Err(ConfigError::InvalidWorkerThreads {
                value: self.worker_threads,
                max: MAX_WORKER_THREADS,
            });
        }

        let strategies = self
            .strategies
            .iter()
            .map(|name| resolve(name))
            .collect::<Result<Vec<Box<dyn Strategy>>, _>>()?;
        if strategies.is_empty() {
            return Err(ConfigError::NoStrategies);
        }
        usize::try_from(self.trials)
            .ok()
            .and_then(|trials| trials.checked_mul(strategies.len()))
            .ok_or(ConfigError::TooManyResults {
                trials: self.trials,
                strategies: strategies.len(),
            })?;

        let log_level =
            Level::from_str(&self.log_level).map_err(|_| ConfigError::InvalidLogLevel {
                value: self.log_level.clone(),
            })?;

        let worker_threads = if self.worker_threads == 0 {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            self.worker_threads
        };

        Ok(ValidatedConfig {
            trials: self.trials,
            bankroll: self.bankroll,
            seed: self.seed,
            strategies,
            rolls: self.rolls,
            out: self.out,
            summary: self.summary,
            worker_threads,
            bust_policy: self.bust_policy,
            log_level,
        })
    }
}
