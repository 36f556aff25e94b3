//! Command-line argument definitions for the light-curve ingestor
//!
//! This module defines the complete CLI interface using the clap derive
//! API. The three connection parameters (path, token, endpoint) are
//! required on every subcommand; their absence is fatal at startup.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::IngestConfig;
use crate::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::{Error, Result};

/// CLI arguments for the light-curve ingestor
///
/// Converts Kepler/K2 light-curve CSV exports into labeled time series
/// and pushes them, batched per file, to a Warp10 backend.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lightcurve-ingestor",
    version,
    about = "Convert light-curve CSV files into Warp10 time series",
    long_about = "Converts tabular light-curve measurement files (one time column plus \
                  multiple measurement columns) into labeled time series and delivers \
                  them, batched per file, to a Warp10 storage backend over HTTP."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the light-curve ingestor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Process every light-curve file in a directory once
    Ingest(IngestArgs),
    /// Watch a directory and process newly created files as they appear
    Watch(WatchArgs),
}

/// Arguments for the ingest command (batch mode)
#[derive(Debug, Clone, Parser)]
pub struct IngestArgs {
    /// Directory holding the light-curve CSV files
    #[arg(
        short = 'p',
        long = "path",
        value_name = "PATH",
        help = "Directory holding the light-curve CSV files"
    )]
    pub path: PathBuf,

    /// Warp10 write token
    #[arg(short = 't', long = "token", value_name = "TOKEN", help = "Warp10 write token")]
    pub token: String,

    /// Full Warp10 endpoint address, [proto]://[host]:[port]
    #[arg(
        short = 'e',
        long = "endpoint",
        value_name = "URL",
        help = "Full Warp10 endpoint address, e.g. http://localhost:8080"
    )]
    pub endpoint: String,

    /// Number of files processed concurrently
    ///
    /// Defaults to the number of CPU cores when not specified.
    #[arg(
        short = 'j',
        long = "workers",
        value_name = "COUNT",
        help = "Number of files processed concurrently (default: CPU cores)"
    )]
    pub workers: Option<usize>,

    /// Abort the whole run on the first file that fails
    ///
    /// By default a failed file is logged and counted, and the run
    /// continues with the remaining files.
    #[arg(long = "fail-fast", help = "Abort the whole run on the first failure")]
    pub fail_fast: bool,

    /// Build batches without pushing them
    ///
    /// Parses and assembles every file but skips the delivery step.
    /// Useful for validating a directory before committing data.
    #[arg(long = "dry-run", help = "Build batches without pushing them")]
    pub dry_run: bool,

    /// Output format for the final report
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the final report"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the watch command (event-driven mode)
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// Directory to watch for new light-curve CSV files
    #[arg(
        short = 'p',
        long = "path",
        value_name = "PATH",
        help = "Directory to watch for new light-curve CSV files"
    )]
    pub path: PathBuf,

    /// Warp10 write token
    #[arg(short = 't', long = "token", value_name = "TOKEN", help = "Warp10 write token")]
    pub token: String,

    /// Full Warp10 endpoint address, [proto]://[host]:[port]
    #[arg(
        short = 'e',
        long = "endpoint",
        value_name = "URL",
        help = "Full Warp10 endpoint address, e.g. http://localhost:8080"
    )]
    pub endpoint: String,

    /// Directory poll interval in seconds
    #[arg(
        long = "poll-interval",
        value_name = "SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        help = "Directory poll interval in seconds"
    )]
    pub poll_interval: u64,

    /// Keep source files after a successful push
    ///
    /// By default a successfully pushed file is deleted so it is not
    /// picked up again.
    #[arg(long = "keep", help = "Keep source files after a successful push")]
    pub keep: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for the final report
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl IngestArgs {
    /// Validate the ingest command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::configuration(format!(
                "Source path does not exist: {}",
                self.path.display()
            )));
        }

        if !self.path.is_dir() {
            return Err(Error::configuration(format!(
                "Source path is not a directory: {}",
                self.path.display()
            )));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(Error::configuration(
                    "Number of workers must be greater than 0".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Assemble the runtime configuration from these arguments
    pub fn to_config(&self) -> IngestConfig {
        let mut config = IngestConfig::new(&self.path, &self.endpoint, &self.token)
            .with_fail_fast(self.fail_fast)
            .with_dry_run(self.dry_run);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl WatchArgs {
    /// Validate the watch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::configuration(format!(
                "Watch path does not exist: {}",
                self.path.display()
            )));
        }

        if !self.path.is_dir() {
            return Err(Error::configuration(format!(
                "Watch path is not a directory: {}",
                self.path.display()
            )));
        }

        if self.poll_interval == 0 {
            return Err(Error::configuration(
                "Poll interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }

    /// Assemble the runtime configuration from these arguments
    pub fn to_config(&self) -> IngestConfig {
        IngestConfig::new(&self.path, &self.endpoint, &self.token)
            .with_delete_after_push(!self.keep)
            .with_poll_interval(self.poll_interval)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }
}
