//! Ingest command implementation (batch mode)
//!
//! Discovers every light-curve file in the source directory and runs the
//! per-file pipeline for each, up to `workers` files concurrently. Each
//! pipeline owns its batch and series mapping; the command only collects
//! reports.

use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::shared::{
    ProcessingStats, create_progress_bar, discover_lightcurve_files, print_final_report,
    setup_logging,
};
use crate::app::services::pipeline::{self, FileReport};
use crate::app::services::warp10_client::Warp10Client;
use crate::cli::args::IngestArgs;
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Ingest command runner
///
/// 1. Set up logging and validate configuration
/// 2. Discover light-curve files
/// 3. Run per-file pipelines concurrently with progress reporting
/// 4. Print the final report
pub async fn run_ingest(
    args: IngestArgs,
    cancellation_token: CancellationToken,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    setup_logging(args.get_log_level())?;

    info!("Starting light-curve ingest");
    args.validate()?;

    let config = args.to_config();
    config.validate()?;

    let files = discover_lightcurve_files(&config.source_path)?;
    info!(
        "Discovered {} light-curve files in {}",
        files.len(),
        config.source_path.display()
    );

    let mut stats = ProcessingStats::default();

    if files.is_empty() {
        warn!(
            "No light-curve files found in {}",
            config.source_path.display()
        );
        print_final_report(&stats, &args.output_format)?;
        return Ok(stats);
    }

    if config.dry_run {
        info!("Dry run: batches will be built but not pushed");
    }

    let progress_bar = if args.show_progress() {
        Some(create_progress_bar(
            files.len() as u64,
            "Ingesting light-curve files...",
        ))
    } else {
        None
    };

    let client = Warp10Client::new(&config.endpoint, &config.token);
    let mut results = stream::iter(files)
        .map(|file| process_file(file, client.clone(), config.clone()))
        .buffer_unordered(config.workers);

    while let Some((file, result)) = results.next().await {
        if cancellation_token.is_cancelled() {
            return Err(Error::interrupted("ingest interrupted by user"));
        }

        match result {
            Ok(report) => {
                stats.record_success(&report);
                info!(
                    "Completed {}: {} series, {} datapoints",
                    report.file, report.series_built, report.datapoints_built
                );
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                stats.files_failed += 1;

                if config.fail_fast {
                    return Err(e);
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_with_message("Done");
    }

    stats.processing_time_ms = start_time.elapsed().as_millis();
    print_final_report(&stats, &args.output_format)?;

    Ok(stats)
}

/// Run one file through the pipeline, or only through batch preparation
/// in dry-run mode
async fn process_file(
    file: PathBuf,
    client: Warp10Client,
    config: IngestConfig,
) -> (PathBuf, Result<FileReport>) {
    let result = if config.dry_run {
        pipeline::prepare_batch(&file).map(|(_, report)| report)
    } else {
        pipeline::ingest_file(&file, &client).await
    };
    (file, result)
}
