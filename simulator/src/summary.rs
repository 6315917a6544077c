use crate::TrialResult;
use craps_types::Decimal;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Aggregate outcome of one strategy across all trials.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: &'static str,
    pub trials: u64,
    pub busts: u64,
    pub mean_rolls: f64,
    pub total_net_profit: Decimal,
    pub mean_net_profit: Decimal,
    pub min_net_profit: Decimal,
    pub max_net_profit: Decimal,
    pub total_wagered: Decimal,
    /// Loss per unit wagered; `None` when nothing was wagered.
    pub edge: Option<f64>,
}

impl StrategySummary {
    fn empty(strategy: &'static str) -> Self {
        Self {
            strategy,
            trials: 0,
            busts: 0,
            mean_rolls: 0.0,
            total_net_profit: Decimal::ZERO,
            mean_net_profit: Decimal::ZERO,
            min_net_profit: Decimal::ZERO,
            max_net_profit: Decimal::ZERO,
            total_wagered: Decimal::ZERO,
            edge: None,
        }
    }
}

/// Per-strategy aggregates, in configured strategy order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub strategies: Vec<StrategySummary>,
}

impl Summary {
    /// Aggregate `results` per strategy name.
    ///
    /// A name listed more than once gets one entry, and its repeated rows
    /// (same trial, same dice) count once per trial.
    pub fn from_results(strategies: &[&'static str], results: &[TrialResult]) -> Self {
        let mut names: Vec<&'static str> = Vec::with_capacity(strategies.len());
        for &name in strategies {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let strategies = names
            .into_iter()
            .map(|name| {
                let mut rows: Vec<&TrialResult> =
                    results.iter().filter(|r| r.strategy == name).collect();
                rows.dedup_by_key(|r| r.trial);
                let Some(first) = rows.first() else {
                    return StrategySummary::empty(name);
                };

                let trials = rows.len() as u64;
                let total_net_profit: Decimal = rows.iter().map(|r| r.net_profit).sum();
                let total_wagered: Decimal = rows.iter().map(|r| r.total_wagered).sum();
                let total_rolls: u64 = rows.iter().map(|r| r.rolls).sum();
                let (min_net_profit, max_net_profit) = rows.iter().fold(
                    (first.net_profit, first.net_profit),
                    |(min, max), r| (min.min(r.net_profit), max.max(r.net_profit)),
                );
                let edge = total_wagered
                    .is_positive()
                    .then(|| -total_net_profit.to_f64() / total_wagered.to_f64());

                StrategySummary {
                    strategy: name,
                    trials,
                    busts: rows.iter().filter(|r| r.busted).count() as u64,
                    mean_rolls: total_rolls as f64 / trials as f64,
                    total_net_profit,
                    mean_net_profit: total_net_profit.div_int(trials as i64),
                    min_net_profit,
                    max_net_profit,
                    total_wagered,
                    edge,
                }
            })
            .collect();
        Self { strategies }
    }

    /// Emit one `INFO` line per strategy.
    pub fn log(&self) {
        for s in &self.strategies {
            info!(
                strategy = s.strategy,
                trials = s.trials,
                busts = s.busts,
                mean_rolls = s.mean_rolls,
                mean_net_profit = %s.mean_net_profit,
                min_net_profit = %s.min_net_profit,
                max_net_profit = %s.max_net_profit,
                total_wagered = %s.total_wagered,
                edge = ?s.edge,
                "strategy summary"
            );
        }
    }

    pub fn write_json<W: Write>(&self, mut writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(serde_json::Error::io)
    }
}
