//! Per-file ingestion pipeline
//!
//! One file is fully read, decoded, built into series, and pushed before
//! the pipeline returns. Each invocation owns its batch and series
//! mapping; concurrent invocations share nothing, so callers are free to
//! run one pipeline per file in parallel.

use csv::StringRecord;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::models::Batch;
use crate::app::services::warp10_client::Warp10Client;
use crate::app::services::{label_extractor, series_builder};
use crate::{Error, Result};

/// Outcome of one file's pipeline run
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileReport {
    pub file: String,
    pub series_built: usize,
    pub datapoints_built: usize,
    pub rows_skipped: usize,
}

/// Build the delivery batch for one file without pushing it
///
/// Pure function of the file's bytes and name: re-running it on an
/// unmodified file yields identical batch contents.
pub fn prepare_batch(path: &Path) -> Result<(Batch, FileReport)> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::validation(format!("path '{}' has no usable file name", path.display()))
        })?;

    let labels = Arc::new(label_extractor::extract_labels(filename)?);
    debug!("Labels for {}: {:?}", filename, labels);

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read {}", path.display()), e))?;

    let records = read_records(filename, &content)?;
    let result = series_builder::build(&records, labels)?;

    let report = FileReport {
        file: filename.to_string(),
        series_built: result.series.len(),
        datapoints_built: result.stats.datapoints_appended,
        rows_skipped: result.stats.rows_skipped,
    };

    Ok((Batch::from_series(result.series), report))
}

/// Run the full pipeline for one file: prepare, then push
pub async fn ingest_file(path: &Path, client: &Warp10Client) -> Result<FileReport> {
    let (batch, report) = prepare_batch(path)?;
    client.push(&batch).await?;

    info!(
        "Pushed {} series ({} datapoints) from {}",
        report.series_built, report.datapoints_built, report.file
    );
    Ok(report)
}

/// Decode the file content into raw records, header included
fn read_records(filename: &str, content: &str) -> Result<Vec<StringRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        records
            .push(record.map_err(|e| Error::csv_parsing(filename, "malformed record", Some(e)))?);
    }
    Ok(records)
}
