//! Light-curve Ingestor Library
//!
//! A Rust library for converting tabular light-curve measurement files
//! (Kepler/K2 CSV exports) into labeled time series and delivering them,
//! batched per file, to a Warp10 storage backend over HTTP.
//!
//! This library provides tools for:
//! - Parsing decimal and scientific-notation measurement tokens
//! - Deriving campaign/object/catalog labels from the light-curve
//!   filename convention
//! - Building one named series per measurement column, with nan-row
//!   filtering and strict fail-fast parsing
//! - Encoding and pushing whole-file batches in the Warp10 input format
//! - Batch-mode directory ingestion and watch-mode polling with
//!   independent per-file pipelines

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod label_extractor;
        pub mod pipeline;
        pub mod series_builder;
        pub mod value_parser;
        pub mod warp10_client;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Batch, Datapoint, Labels, Series};
pub use config::IngestConfig;

/// Result type alias for the light-curve ingestor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for light-curve ingestion operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input validation error (malformed filename, empty header cell, ...)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A cell could not be parsed as a decimal/scientific numeric token
    #[error("Parse error for token '{token}': {message}")]
    Parse { token: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The push request itself failed (connection refused, DNS, ...)
    #[error("Delivery error: {message}")]
    Delivery {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The backend answered the push with a non-OK status
    #[error("Backend rejected batch with status {status}: {body}")]
    BackendRejected { status: u16, body: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a numeric parse error for a token
    pub fn parse(token: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            token: token.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a delivery error
    pub fn delivery(message: impl Into<String>, source: Option<reqwest::Error>) -> Self {
        Self::Delivery {
            message: message.into(),
            source,
        }
    }

    /// Create a backend rejection error
    pub fn backend_rejected(status: u16, body: impl Into<String>) -> Self {
        Self::BackendRejected {
            status,
            body: body.into(),
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a processing interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Delivery {
            message: "HTTP request failed".to_string(),
            source: Some(error),
        }
    }
}
