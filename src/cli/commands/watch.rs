//! Watch command implementation (event-driven mode)
//!
//! Polls the source directory and spawns an independent pipeline task
//! for every newly appeared light-curve file. Tasks share nothing but
//! the client handle; a failed file is logged and abandoned without
//! affecting the others. Successfully pushed files are deleted unless
//! `--keep` is set, so they are not picked up again.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::shared::{ProcessingStats, discover_lightcurve_files, setup_logging};
use crate::app::services::pipeline::{self, FileReport};
use crate::app::services::warp10_client::Warp10Client;
use crate::cli::args::WatchArgs;
use crate::{Error, Result};

/// Watch command runner
///
/// Runs until cancelled (CTRL+C), then drains in-flight pipeline tasks
/// before returning the accumulated statistics.
pub async fn run_watch(
    args: WatchArgs,
    cancellation_token: CancellationToken,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Starting light-curve watch");
    args.validate()?;

    let config = args.to_config();
    config.validate()?;

    let client = Warp10Client::new(&config.endpoint, &config.token);

    // Files present at startup are left alone; the watcher reacts to
    // creations only.
    let mut seen: HashSet<PathBuf> = discover_lightcurve_files(&config.source_path)?
        .into_iter()
        .collect();
    if !seen.is_empty() {
        info!("Ignoring {} pre-existing light-curve files", seen.len());
    }

    info!(
        "Watching {} (poll interval: {}s)",
        config.source_path.display(),
        config.poll_interval_secs
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.poll_interval_secs));
    let mut tasks: JoinSet<(PathBuf, Result<FileReport>)> = JoinSet::new();
    let mut stats = ProcessingStats::default();

    loop {
        tokio::select! {
            _ = cancellation_token.cancelled() => {
                info!("Shutdown requested, draining {} in-flight files", tasks.len());
                break;
            }
            _ = interval.tick() => {
                match scan_new_files(&config.source_path, &seen) {
                    Ok(new_files) => {
                        for file in new_files {
                            seen.insert(file.clone());
                            info!("Detected new light-curve file: {}", file.display());

                            let client = client.clone();
                            let delete = config.delete_after_push;
                            tasks.spawn(async move {
                                let result = process_watched_file(&file, &client, delete).await;
                                (file, result)
                            });
                        }
                    }
                    Err(e) => {
                        // Transient scan failures do not stop the watcher
                        error!("Directory scan failed: {}", e);
                    }
                }
            }
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                record_outcome(joined, &mut stats);
            }
        }
    }

    // Drain whatever is still in flight
    while let Some(joined) = tasks.join_next().await {
        record_outcome(joined, &mut stats);
    }

    stats.processing_time_ms = start_time.elapsed().as_millis();
    info!(
        "Watch finished: {} files pushed, {} failed",
        stats.files_processed, stats.files_failed
    );

    Ok(stats)
}

/// Run the pipeline for one watched file and clean up its source
async fn process_watched_file(
    path: &Path,
    client: &Warp10Client,
    delete_after_push: bool,
) -> Result<FileReport> {
    let report = pipeline::ingest_file(path, client).await?;

    if delete_after_push {
        std::fs::remove_file(path)
            .map_err(|e| Error::io(format!("failed to remove {}", path.display()), e))?;
        debug!("Removed source file {}", path.display());
    }

    Ok(report)
}

/// Scan the watched directory for files not yet seen
fn scan_new_files(source_dir: &Path, seen: &HashSet<PathBuf>) -> Result<Vec<PathBuf>> {
    let files = discover_lightcurve_files(source_dir)?;
    Ok(files
        .into_iter()
        .filter(|file| !seen.contains(file))
        .collect())
}

/// Fold one finished pipeline task into the statistics
fn record_outcome(
    joined: std::result::Result<(PathBuf, Result<FileReport>), tokio::task::JoinError>,
    stats: &mut ProcessingStats,
) {
    match joined {
        Ok((_, Ok(report))) => {
            stats.record_success(&report);
        }
        Ok((file, Err(e))) => {
            // The file is abandoned; the watcher keeps running
            error!("Failed to process {}: {}", file.display(), e);
            stats.files_failed += 1;
        }
        Err(e) => {
            warn!("Pipeline task panicked or was cancelled: {}", e);
            stats.files_failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_new_files_skips_seen() {
        let temp_dir = TempDir::new().unwrap();
        let old = temp_dir.path().join("kplr000000001-a.csv");
        let new = temp_dir.path().join("kplr000000002-b.csv");
        fs::write(&old, "TIME,FLUX\n").unwrap();
        fs::write(&new, "TIME,FLUX\n").unwrap();

        let seen: HashSet<PathBuf> = [old].into_iter().collect();
        let found = scan_new_files(temp_dir.path(), &seen).unwrap();

        assert_eq!(found, vec![new]);
    }

    #[test]
    fn test_scan_new_files_ignores_non_lightcurves() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let found = scan_new_files(temp_dir.path(), &HashSet::new()).unwrap();
        assert!(found.is_empty());
    }
}
