//! Core series assembly from decoded CSV records

use csv::StringRecord;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::stats::{BuildResult, BuildStats};
use crate::app::models::{Labels, Series};
use crate::app::services::value_parser::{parse_timestamp, parse_value};
use crate::constants::{MISSING_VALUE_SENTINEL, SERIES_NAMESPACE};
use crate::{Error, Result};

/// Build the column-indexed series mapping for one file's records
///
/// Record 0 is the header: every column index ≥ 1 must carry a non-empty
/// name and yields one empty series sharing `labels`. Each later record
/// contributes one datapoint per series — timestamp from column 0, value
/// from the series' own column — unless any of its cells is the
/// missing-value sentinel, in which case the whole row is dropped. A
/// malformed cell anywhere aborts the build.
pub fn build(records: &[StringRecord], labels: Arc<Labels>) -> Result<BuildResult> {
    let header = records
        .first()
        .ok_or_else(|| Error::validation("input has no header row"))?;

    let mut series = create_series(header, &labels)?;
    let mut stats = BuildStats::new();

    for record in &records[1..] {
        stats.rows_total += 1;

        if contains_missing_sentinel(record) {
            stats.rows_skipped += 1;
            debug!(
                "Dropping row {}: carries a '{}' token",
                stats.rows_total, MISSING_VALUE_SENTINEL
            );
            continue;
        }

        append_row(record, &mut series, &mut stats)?;
    }

    Ok(BuildResult { series, stats })
}

/// Create one empty series per non-time header column
fn create_series(
    header: &StringRecord,
    labels: &Arc<Labels>,
) -> Result<BTreeMap<usize, Series>> {
    let mut series = BTreeMap::new();

    for (index, cell) in header.iter().enumerate() {
        if index == 0 {
            // First column must be TIME
            continue;
        }

        let name = cell.trim();
        if name.is_empty() {
            return Err(Error::validation(format!(
                "empty header cell at column {}",
                index
            )));
        }

        let class = class_name(name);
        debug!("Creating series {} at column {}", class, index);
        series.insert(index, Series::new(class, Arc::clone(labels)));
    }

    Ok(series)
}

/// Normalize a header cell into a fully-qualified class name
///
/// Lowercased, every underscore replaced by the namespace separator, and
/// prefixed with the fixed namespace: "FLUX_RAW" becomes
/// "kepler.flux.raw".
fn class_name(header_cell: &str) -> String {
    let normalized = header_cell.to_lowercase().replace('_', ".");
    format!("{}.{}", SERIES_NAMESPACE, normalized)
}

/// Check a data row for the missing-value sentinel in any column
fn contains_missing_sentinel(record: &StringRecord) -> bool {
    record
        .iter()
        .any(|cell| cell.trim().eq_ignore_ascii_case(MISSING_VALUE_SENTINEL))
}

/// Parse one data row and append a datapoint to every series
fn append_row(
    record: &StringRecord,
    series: &mut BTreeMap<usize, Series>,
    stats: &mut BuildStats,
) -> Result<()> {
    let time_cell = record
        .get(0)
        .ok_or_else(|| Error::validation("data row has no time column"))?;
    let timestamp = parse_timestamp(time_cell)?;

    for (index, gts) in series.iter_mut() {
        let cell = record.get(*index).ok_or_else(|| {
            Error::validation(format!("data row has no value at column {}", index))
        })?;

        gts.add_datapoint(timestamp, parse_value(cell)?);
        stats.datapoints_appended += 1;
    }

    Ok(())
}
