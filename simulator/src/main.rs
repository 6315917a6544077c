use anyhow::Context;
use clap::Parser;
use craps_simulator::{write_csv, BustPolicy, Config, Summary, TrialRunner};
use craps_types::Decimal;
use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};
use tracing::{debug, info, Level};

/// Run craps betting strategies over seeded trials and print one CSV row per
/// trial and strategy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of trials to run for each strategy [default: 1]
    #[arg(long)]
    trials: Option<u64>,

    /// Starting bankroll for every player [default: 440]
    #[arg(long)]
    bankroll: Option<Decimal>,

    /// Base seed; trial t is seeded with seed + t [default: 9671111]
    #[arg(long, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Comma-separated strategies (passline, place68, buy410) [default: passline]
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<String>>,

    /// Roll budget per trial; a trial stops at the first come-out past it [default: 240]
    #[arg(long)]
    rolls: Option<u64>,

    /// CSV output file (stdout when unset)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write a per-strategy JSON summary to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Worker threads (0 uses every core)
    #[arg(long)]
    threads: Option<usize>,

    /// What to do when a strategy runs out of money [default: abort]
    #[arg(long, value_enum)]
    bust_policy: Option<BustPolicy>,

    /// Log every roll and bet
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(bankroll) = self.bankroll {
            config.bankroll = bankroll;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(strategies) = self.strategies {
            config.strategies = strategies;
        }
        if let Some(rolls) = self.rolls {
            config.rolls = rolls;
        }
        if self.out.is_some() {
            config.out = self.out;
        }
        if self.summary.is_some() {
            config.summary = self.summary;
        }
        if let Some(threads) = self.threads {
            config.worker_threads = threads;
        }
        if let Some(policy) = self.bust_policy {
            config.bust_policy = policy;
        }
        if self.verbose {
            config.log_level = Level::DEBUG.to_string();
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);
    let config = config.validate().context("invalid configuration")?;

    // Create logger (stdout is reserved for CSV output)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(io::stderr)
        .init();
    debug!(?config, "loaded configuration");

    // Run trials
    let runner = TrialRunner::new(config).context("failed to start trial runner")?;
    let results = runner.run().context("error running trials")?;
    let config = runner.config();

    // Write results
    match &config.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(BufWriter::new(file), &results)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), rows = results.len(), "wrote results");
        }
        None => write_csv(io::stdout().lock(), &results).context("failed to write results")?,
    }

    // Summarize
    let summary = Summary::from_results(&config.strategy_names(), &results);
    summary.log();
    if let Some(path) = &config.summary {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        summary
            .write_json(BufWriter::new(file))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote summary");
    }

    Ok(())
}
