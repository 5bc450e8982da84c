use anyhow::{ensure, Context, Result};
use serde::Serialize;

use crate::io::RangesReader;
use crate::pool::OffsetRecord;

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct WidthStatistics {
    pub sequence_count: usize,
    pub named_count: usize,
    pub total_width: usize,
    pub min_width: usize,
    pub max_width: usize,
    pub mean_width: f64,
}

impl WidthStatistics {
    pub fn from_records(records: &[OffsetRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let total_width: usize = records.iter().map(|r| r.width).sum();
        Self {
            sequence_count: records.len(),
            named_count: records.iter().filter(|r| r.name.is_some()).count(),
            total_width,
            min_width: records.iter().map(|r| r.width).min().unwrap_or(0),
            max_width: records.iter().map(|r| r.width).max().unwrap_or(0),
            mean_width: total_width as f64 / records.len() as f64,
        }
    }
}

/// Reads the ranges file at `ranges` and prints its width statistics as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if its records disagree with the
/// sequence count and pool length in its metadata line.
pub fn summarize(ranges: &str) -> Result<WidthStatistics> {
    info!("Summarising ranges at {ranges}");
    let rdr = RangesReader::from_path(ranges)?;
    let records = rdr.records()?;
    let statistics = WidthStatistics::from_records(&records);

    ensure!(
        statistics.sequence_count == rdr.metadata.sequence_count,
        "{ranges} lists {} records, but its metadata expects {}",
        statistics.sequence_count,
        rdr.metadata.sequence_count
    );
    ensure!(
        statistics.total_width == rdr.metadata.pool_len,
        "{ranges} covers {} bytes, but its metadata expects {}",
        statistics.total_width,
        rdr.metadata.pool_len
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&statistics).context("Should be serialisable")?
    );

    Ok(statistics)
}
