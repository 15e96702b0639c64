//! Shared pipeline logic behind the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! selector chunking -> sequential fetch -> pivot onto the period axis.
//! The CLI can then focus on argument handling and presentation.

use std::collections::HashMap;

use tracing::warn;

use crate::data::DataClient;
use crate::domain::types::{ExtractConfig, SeriesRecord, SkippedUnit, WideTable};
use crate::pivot::{build_axis, pivot_table};

/// All computed outputs of a single `ifs data` run.
#[derive(Debug, Clone)]
pub struct DataRun {
    pub records: Vec<SeriesRecord>,
    pub skipped: Vec<SkippedUnit>,
    pub table: WideTable,
}

/// Execute the full data pipeline: fetch every (area, chunk) unit, then
/// pivot the surviving records onto the configured axis.
pub fn run_data(
    client: &DataClient,
    config: &ExtractConfig,
    area_names: &HashMap<String, String>,
) -> DataRun {
    let (records, skipped) = fetch_records(client, config, area_names);
    let axis = build_axis(config.start_year, config.end_year);
    let table = pivot_table(&records, axis);
    DataRun {
        records,
        skipped,
        table,
    }
}

/// Fetch all (area, indicator-chunk) units, strictly in order.
///
/// A failed unit is logged, recorded and skipped; the run continues and the
/// worst case is a smaller output table.
pub fn fetch_records(
    client: &DataClient,
    config: &ExtractConfig,
    area_names: &HashMap<String, String>,
) -> (Vec<SeriesRecord>, Vec<SkippedUnit>) {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for area in &config.areas {
        let country_name = area_names
            .get(area)
            .cloned()
            .unwrap_or_else(|| "Unknown Country".to_string());

        for (start, chunk) in chunk_indicators(&config.indicators, config.chunk_size) {
            let indicator_code = chunk.join("+");
            let indicator_name = batch_label(start, chunk.len());
            let key = series_key(&config.frequency, area, &indicator_code);

            match client.fetch_observations(
                &config.dataset,
                &key,
                config.start_year,
                config.end_year,
            ) {
                Ok(observations) => records.push(SeriesRecord {
                    country_name: country_name.clone(),
                    country_code: area.clone(),
                    indicator_name,
                    indicator_code,
                    observations,
                }),
                Err(err) => {
                    warn!(key = %key, error = %err, "skipping unit");
                    skipped.push(SkippedUnit {
                        unit: key,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }

    (records, skipped)
}

/// Split the indicator list into request-sized chunks, keeping each chunk's
/// 0-based start position for batch labelling. A zero chunk size is treated
/// as one.
pub fn chunk_indicators(indicators: &[String], chunk_size: usize) -> Vec<(usize, &[String])> {
    let chunk_size = chunk_size.max(1);
    indicators
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, chunk)| (i * chunk_size, chunk))
        .collect()
}

/// Positional label for an indicator batch, e.g. `Indicators 3-4`.
pub fn batch_label(start: usize, len: usize) -> String {
    format!("Indicators {}-{}", start + 1, start + len)
}

/// Series key for one request. With no frequency selector the key is
/// `AREA.CODES` (every frequency comes back); with one it gains the leading
/// dimension: `FREQ.AREA.CODES`.
pub fn series_key(frequency: &str, area: &str, indicator_codes: &str) -> String {
    if frequency.is_empty() {
        format!("{area}.{indicator_codes}")
    } else {
        format!("{frequency}.{area}.{indicator_codes}")
    }
}
