//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used
//! across the ingest and watch command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::constants::is_lightcurve_file;
use crate::{Error, Result};

/// Processing statistics for reporting across all commands
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ProcessingStats {
    /// Number of files fully processed and pushed
    pub files_processed: usize,
    /// Number of files that failed
    pub files_failed: usize,
    /// Number of series pushed
    pub series_pushed: usize,
    /// Number of datapoints pushed
    pub datapoints_pushed: usize,
    /// Number of rows dropped for carrying a missing-value sentinel
    pub rows_skipped: usize,
    /// Total processing time in milliseconds
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Fold one successful file report into the totals
    pub fn record_success(&mut self, report: &crate::app::services::pipeline::FileReport) {
        self.files_processed += 1;
        self.series_pushed += report.series_built;
        self.datapoints_pushed += report.datapoints_built;
        self.rows_skipped += report.rows_skipped;
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("lightcurve_ingestor={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Discover light-curve CSV files in a source directory
///
/// Matches any regular file whose name contains the "csv" marker, sorted
/// for consistent processing order.
pub fn discover_lightcurve_files(source_dir: &Path) -> Result<Vec<PathBuf>> {
    use walkdir::WalkDir;

    let mut files = Vec::new();

    for entry in WalkDir::new(source_dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(
                format!("failed to scan {}", source_dir.display()),
                e,
            )
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_lightcurve_file);
        if matches {
            files.push(path.to_path_buf());
        }
    }

    files.sort();

    debug!(
        "Discovered {} light-curve files in {}",
        files.len(),
        source_dir.display()
    );
    for file in &files {
        debug!("  Found: {}", file.display());
    }

    Ok(files)
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} [{per_sec}] ETA: {eta}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print the final run report in the requested format
pub fn print_final_report(stats: &ProcessingStats, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(stats).map_err(|e| {
                Error::configuration(format!("failed to serialize report: {}", e))
            })?;
            println!("{}", json);
        }
        OutputFormat::Human => {
            let failed = if stats.files_failed > 0 {
                stats.files_failed.to_string().red().to_string()
            } else {
                stats.files_failed.to_string()
            };

            println!();
            println!("{}", "Ingestion complete".bold());
            println!(
                "  Files:      {} pushed, {} failed",
                stats.files_processed.to_string().green(),
                failed
            );
            println!("  Series:     {}", stats.series_pushed);
            println!("  Datapoints: {}", stats.datapoints_pushed);
            println!("  Rows dropped (nan): {}", stats.rows_skipped);
            println!(
                "  Elapsed:    {:.2}s",
                stats.processing_time_ms as f64 / 1000.0
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_processing_stats_default() {
        let stats = ProcessingStats::default();
        assert_eq!(stats.files_processed, 0);
        assert_eq!(stats.files_failed, 0);
        assert_eq!(stats.datapoints_pushed, 0);
    }

    #[test]
    fn test_record_success_accumulates() {
        use crate::app::services::pipeline::FileReport;

        let mut stats = ProcessingStats::default();
        stats.record_success(&FileReport {
            file: "kplr000000001-x.csv".to_string(),
            series_built: 2,
            datapoints_built: 10,
            rows_skipped: 1,
        });
        stats.record_success(&FileReport {
            file: "kplr000000002-x.csv".to_string(),
            series_built: 1,
            datapoints_built: 5,
            rows_skipped: 0,
        });

        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.series_pushed, 3);
        assert_eq!(stats.datapoints_pushed, 15);
        assert_eq!(stats.rows_skipped, 1);
    }

    #[test]
    fn test_discover_lightcurve_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("kplr000000001-a.csv"), "TIME,FLUX\n").unwrap();
        fs::write(temp_dir.path().join("ktwo000000002-b.csv"), "TIME,FLUX\n").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "not a lightcurve").unwrap();
        fs::write(temp_dir.path().join("kplr000000003-c.fits"), "binary").unwrap();

        let files = discover_lightcurve_files(temp_dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["kplr000000001-a.csv", "ktwo000000002-b.csv"]);
    }

    #[test]
    fn test_discover_recurses_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("2024");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("kplr000000001-a.csv"), "TIME,FLUX\n").unwrap();

        let files = discover_lightcurve_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_discover_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let files = discover_lightcurve_files(temp_dir.path()).unwrap();
        assert!(files.is_empty());
    }
}
