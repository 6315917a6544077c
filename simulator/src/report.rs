use crate::TrialResult;
use std::io::{self, Write};

pub const CSV_HEADER: &str = "strategy,rolls,net_profit,total_wagered";

/// Write one CSV row per result, money to two decimals.
pub fn write_csv<W: Write>(mut writer: W, results: &[TrialResult]) -> io::Result<()> {
    writeln!(writer, "{CSV_HEADER}")?;
    for result in results {
        writeln!(
            writer,
            "{},{},{:.2},{:.2}",
            result.strategy, result.rolls, result.net_profit, result.total_wagered
        )?;
    }
    writer.flush()
}
