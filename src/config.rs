//! Configuration management and validation
//!
//! Provides the runtime configuration assembled from CLI arguments and
//! passed explicitly into the pipeline entry points. No process-wide
//! mutable state: every component receives the configuration it needs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::{Error, Result};

/// Runtime configuration for ingestion runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory holding the light-curve CSV files
    pub source_path: PathBuf,

    /// Base URL of the Warp10 backend, e.g. "http://localhost:8080"
    pub endpoint: String,

    /// Warp10 write token
    pub token: String,

    /// Number of per-file pipelines run concurrently in batch mode
    pub workers: usize,

    /// Abort the whole run on the first per-file failure
    pub fail_fast: bool,

    /// Build batches but skip the push (and any post-push actions)
    pub dry_run: bool,

    /// Delete source files after a successful push (watch mode)
    pub delete_after_push: bool,

    /// Watch-mode directory poll interval in seconds
    pub poll_interval_secs: u64,
}

impl IngestConfig {
    /// Create a configuration with defaults for everything beyond the
    /// three required parameters
    pub fn new(
        source_path: impl Into<PathBuf>,
        endpoint: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            endpoint: endpoint.into(),
            token: token.into(),
            workers: num_cpus::get(),
            fail_fast: false,
            dry_run: false,
            delete_after_push: false,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    /// Set the number of concurrent per-file pipelines
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Abort the run on the first per-file failure
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Build batches without pushing them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Delete source files after a successful push
    pub fn with_delete_after_push(mut self, delete: bool) -> Self {
        self.delete_after_push = delete;
        self
    }

    /// Set the watch-mode poll interval
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Validate the configuration for consistency
    ///
    /// All three connection parameters are required; a missing or
    /// malformed one is fatal at startup.
    pub fn validate(&self) -> Result<()> {
        if !self.source_path.exists() {
            return Err(Error::configuration(format!(
                "Source path does not exist: {}",
                self.source_path.display()
            )));
        }

        if !self.source_path.is_dir() {
            return Err(Error::configuration(format!(
                "Source path is not a directory: {}",
                self.source_path.display()
            )));
        }

        if self.endpoint.is_empty() {
            return Err(Error::configuration("Endpoint not set".to_string()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::configuration(format!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            )));
        }

        if self.token.is_empty() {
            return Err(Error::configuration("Write token not set".to_string()));
        }

        if self.workers == 0 {
            return Err(Error::configuration(
                "Number of workers must be greater than 0".to_string(),
            ));
        }

        if self.poll_interval_secs == 0 {
            return Err(Error::configuration(
                "Poll interval must be at least 1 second".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn valid_config(dir: &TempDir) -> IngestConfig {
        IngestConfig::new(dir.path(), "http://localhost:8080", "write-token")
    }

    #[test]
    fn test_valid_configuration() {
        let dir = TempDir::new().unwrap();
        assert!(valid_config(&dir).validate().is_ok());
    }

    #[test]
    fn test_missing_source_path() {
        let config = IngestConfig::new("/nonexistent/path", "http://localhost:8080", "token");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.endpoint = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_endpoint_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.endpoint = "localhost:8080".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = valid_config(&dir);
        config.token = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_workers_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = valid_config(&dir).with_workers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let dir = TempDir::new().unwrap();
        let config = valid_config(&dir)
            .with_workers(2)
            .with_fail_fast(true)
            .with_dry_run(true)
            .with_delete_after_push(true)
            .with_poll_interval(10);

        assert_eq!(config.workers, 2);
        assert!(config.fail_fast);
        assert!(config.dry_run);
        assert!(config.delete_after_push);
        assert_eq!(config.poll_interval_secs, 10);
    }
}
