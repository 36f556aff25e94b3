//! Command implementations for the light-curve ingestor CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module:
//! - `ingest`: one-shot batch processing of a directory
//! - `watch`: poll a directory and process files as they appear

pub mod ingest;
pub mod shared;
pub mod watch;

// Re-export the main types for easy access
pub use shared::ProcessingStats;

use tokio_util::sync::CancellationToken;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the light-curve ingestor
///
/// Dispatches to the appropriate subcommand handler based on CLI args.
/// The cancellation token is triggered on CTRL+C; commands use it to
/// stop accepting new work and drain what is in flight.
pub async fn run(args: Args, cancellation_token: CancellationToken) -> Result<ProcessingStats> {
    match args.get_command() {
        Commands::Ingest(ingest_args) => ingest::run_ingest(ingest_args, cancellation_token).await,
        Commands::Watch(watch_args) => watch::run_watch(watch_args, cancellation_token).await,
    }
}
