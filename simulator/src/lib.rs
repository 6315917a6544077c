//! Seeded, parallel trials of craps betting strategies.

mod config;
mod report;
mod runner;
mod summary;

pub use config::{BustPolicy, Config, ConfigError, ValidatedConfig, MAX_WORKER_THREADS};
pub use report::{write_csv, CSV_HEADER};
pub use runner::{RunError, TrialResult, TrialRunner};
pub use summary::{StrategySummary, Summary};
